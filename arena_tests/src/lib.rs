//! Shared fixtures for the arena integration tests.

use arena_client::arena::Arena;
use arena_shared::config::ArenaConfig;
use arena_shared::math::Vector;
use arena_shared::tank::Pattern;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// A light arena: few trees, fast ticks.
pub fn small_config(enemies: usize) -> ArenaConfig {
    ArenaConfig {
        tree_count: 8,
        enemy_count: enemies,
        tick_hz: 240,
        ..ArenaConfig::default()
    }
}

/// Parks enemy `index` `distance` units in front of the camera, holding
/// still on a seek pattern so it never closes in or fires.
pub fn park_enemy_ahead(arena: &mut Arena, index: usize, distance: f64) -> anyhow::Result<()> {
    let f = arena.camera.coord.f;
    let at = Vector::new(f.x * distance, 0.0, f.z * distance);
    let tank = arena
        .enemies
        .get_mut(index)
        .ok_or_else(|| anyhow::anyhow!("no enemy {index}"))?;
    tank.shape.coord.set_position(&at);
    tank.profile.speed = 0.0;
    tank.pattern = Pattern::Seek;
    tank.free = false;
    tank.frame = 0;
    Ok(())
}
