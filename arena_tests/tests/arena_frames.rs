//! Whole-frame behavior of the arena.

use arena_client::arena::Arena;
use arena_client::dump::JsonRenderer;
use arena_client::input::{autopilot, InputState};
use arena_shared::render::{NullRenderer, RecordingRenderer};
use arena_tests::{init_tracing, park_enemy_ahead, small_config};

#[test]
fn fixed_seed_runs_are_identical() -> anyhow::Result<()> {
    init_tracing();
    let mut a = Arena::seeded(small_config(3))?;
    let mut b = Arena::seeded(small_config(3))?;
    let mut ra = RecordingRenderer::default();
    let mut rb = RecordingRenderer::default();

    for frame in 0..240 {
        let input = autopilot(frame);
        assert_eq!(a.tick(input, &mut ra), b.tick(input, &mut rb));
        assert_eq!(ra.segments, rb.segments);
        assert_eq!(ra.radar, rb.radar);
    }
    Ok(())
}

#[test]
fn different_seeds_scatter_trees_differently() -> anyhow::Result<()> {
    let mut cfg = small_config(1);
    let a = Arena::seeded(cfg.clone())?;
    cfg.seed += 1;
    let b = Arena::seeded(cfg)?;
    let pa: Vec<_> = a.trees.iter().map(|t| t.coord.d_vec).collect();
    let pb: Vec<_> = b.trees.iter().map(|t| t.coord.d_vec).collect();
    assert_ne!(pa, pb);
    Ok(())
}

#[test]
fn player_bullet_kills_tank_straight_ahead() -> anyhow::Result<()> {
    init_tracing();
    let mut arena = Arena::seeded(small_config(1))?;
    park_enemy_ahead(&mut arena, 0, 60.0)?;

    let fire = InputState {
        fire: true,
        ..InputState::IDLE
    };
    let first = arena.tick(fire, &mut NullRenderer);
    assert!(first.player_bullet_in_flight);

    let mut killed_at = None;
    for _ in 0..5 {
        let report = arena.tick(InputState::IDLE, &mut NullRenderer);
        if report.stats.kills == 1 {
            killed_at = Some(report.frame);
            assert!(!report.player_bullet_in_flight);
            assert_eq!(report.active_enemies, 0);
            break;
        }
    }
    // 15 units per frame against a 15-unit sphere 60 units out.
    assert_eq!(killed_at, Some(2));

    // The destroyed tank comes back on the next frame.
    let spawns = arena.stats().spawns;
    let report = arena.tick(InputState::IDLE, &mut NullRenderer);
    assert_eq!(report.stats.spawns, spawns + 1);
    assert_eq!(report.active_enemies, 1);
    Ok(())
}

#[test]
fn tank_on_top_of_camera_is_rammed() -> anyhow::Result<()> {
    let mut arena = Arena::seeded(small_config(1))?;
    park_enemy_ahead(&mut arena, 0, 5.0)?;
    let report = arena.tick(InputState::IDLE, &mut NullRenderer);
    assert_eq!(report.stats.rams, 1);
    assert_eq!(report.active_enemies, 0);
    Ok(())
}

#[test]
fn frame_dump_writes_one_line_per_tick() -> anyhow::Result<()> {
    let mut arena = Arena::seeded(small_config(2))?;
    let mut dump = JsonRenderer::new(Vec::new());
    for frame in 0..3 {
        arena.tick(autopilot(frame), &mut dump);
    }
    let out = String::from_utf8(dump.finish()?)?;
    assert_eq!(out.lines().count(), 3);
    assert!(out.lines().all(|l| l.contains("\"radar\":{")));
    Ok(())
}

/// Smoke test: the paced loop runs a few seconds of frames without panicking.
#[tokio::test]
async fn paced_run_completes() -> anyhow::Result<()> {
    init_tracing();
    let mut arena = Arena::seeded(small_config(2))?;
    let mut rec = RecordingRenderer::default();
    let last = arena.run_for_frames(48, &mut rec, autopilot).await;

    let last = last.ok_or_else(|| anyhow::anyhow!("no frames ran"))?;
    assert_eq!(last.frame, 47);
    assert_eq!(rec.frames, 48);
    assert!(last.stats.shots_fired >= 2);
    assert!(!rec.segments.is_empty());
    Ok(())
}
