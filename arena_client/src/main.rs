//! Headless arena binary.
//!
//! Usage:
//!   cargo run -p arena_client -- [--config arena.json] [--frames 300] [--seed 7] [--dump] [--no-ascii]
//!
//! Runs the arena under the autopilot at the configured tick rate, then
//! prints the last frame as text. `--dump` writes one JSON line per frame
//! to stdout instead.

use std::env;
use std::fs;

use anyhow::Context;
use arena_client::arena::Arena;
use arena_client::ascii::AsciiRenderer;
use arena_client::dump::JsonRenderer;
use arena_client::input::autopilot;
use arena_shared::config::ArenaConfig;
use arena_shared::render::RenderBackend;
use tracing::info;

struct Args {
    config: Option<String>,
    frames: u64,
    seed: Option<u64>,
    dump: bool,
    ascii: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        frames: 300,
        seed: None,
        dump: false,
        ascii: true,
    };
    let argv: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" if i + 1 < argv.len() => {
                args.config = Some(argv[i + 1].clone());
                i += 2;
            }
            "--frames" if i + 1 < argv.len() => {
                args.frames = argv[i + 1].parse().context("--frames")?;
                i += 2;
            }
            "--seed" if i + 1 < argv.len() => {
                args.seed = Some(argv[i + 1].parse().context("--seed")?);
                i += 2;
            }
            "--dump" => {
                args.dump = true;
                i += 1;
            }
            "--no-ascii" => {
                args.ascii = false;
                i += 1;
            }
            _ => i += 1,
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> anyhow::Result<ArenaConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            ArenaConfig::from_json_str(&text).with_context(|| format!("parse {path}"))?
        }
        None => ArenaConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args()?;
    let cfg = load_config(&args)?;
    info!(seed = cfg.seed, frames = args.frames, tick_hz = cfg.tick_hz, "Starting arena");

    let mut ascii = AsciiRenderer::new(80, 40, cfg.viewport_width, cfg.viewport_height, &cfg.radar);
    let mut arena = Arena::seeded(cfg)?;

    let last = if args.dump {
        let mut dump = JsonRenderer::new(std::io::stdout().lock());
        let last = arena.run_for_frames(args.frames, &mut dump, autopilot).await;
        let _stdout = dump.finish()?;
        last
    } else {
        let renderer: &mut dyn RenderBackend = &mut ascii;
        arena.run_for_frames(args.frames, renderer, autopilot).await
    };

    if let Some(report) = &last {
        info!(
            frames = report.frame + 1,
            kills = report.stats.kills,
            rams = report.stats.rams,
            hits_taken = report.stats.player_hits,
            "Run finished"
        );
    }

    if args.ascii && !args.dump {
        print!("{}", ascii.render_to_string());
    }
    Ok(())
}
