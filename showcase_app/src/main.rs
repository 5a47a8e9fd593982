//! Headless driver for the loading scene
//!
//! Runs the scene at a fixed 60 fps without a window, completes item loads
//! after a simulated latency and turns the viewport to portrait halfway
//! through so the camera reframing shows up in the log.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use loading_scene::foundation::logging;
use loading_scene::foundation::time::RunTimer;
use loading_scene::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

mod headless_host;
use headless_host::HeadlessHost;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: &str = "60";
const DEFAULT_LOAD_LATENCY: &str = "0.75";
const LANDSCAPE: (u32, u32) = (1920, 1080);
const PORTRAIT: (u32, u32) = (540, 1080);

#[derive(Debug)]
struct RunConfig {
    config_path: Option<PathBuf>,
    seconds: f32,
    load_latency: f32,
    gpu_tier: u8,
    seed: Option<u64>,
}

/// Tallies reported once the run finishes
#[derive(Debug, Default)]
struct RunSummary {
    frames: u64,
    arrivals: usize,
    requests: usize,
}

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("showcase_headless")
        .about("Drives the loading scene without a window and logs what it does")
        .arg(
            Arg::new("config")
                .value_name("CONFIG")
                .help("Scene configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("seconds")
                .value_name("SECONDS")
                .help("Simulated run time in seconds")
                .default_value(DEFAULT_SECONDS),
        )
        .arg(
            Arg::new("latency")
                .short('l')
                .long("latency")
                .value_name("SECONDS")
                .help("Simulated asset load latency")
                .default_value(DEFAULT_LOAD_LATENCY),
        )
        .arg(
            Arg::new("tier")
                .short('t')
                .long("tier")
                .value_name("TIER")
                .help("GPU tier reported to the scene (fog needs 2 or more)")
                .value_parser(clap::value_parser!(u8))
                .default_value("2"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("Seed for a reproducible run")
                .value_parser(clap::value_parser!(u64)),
        )
        .get_matches();

    let run = RunConfig {
        config_path: matches.get_one::<String>("config").map(PathBuf::from),
        seconds: parse_seconds(&matches, "seconds").context("Invalid run time")?,
        load_latency: parse_seconds(&matches, "latency").context("Invalid load latency")?,
        gpu_tier: matches.get_one::<u8>("tier").copied().unwrap_or(2),
        seed: matches.get_one::<u64>("seed").copied(),
    };

    run_headless(&run)
}

fn parse_seconds(matches: &clap::ArgMatches, id: &str) -> Result<f32> {
    let raw = matches
        .get_one::<String>(id)
        .with_context(|| format!("Missing value for {id}"))?;
    let seconds: f32 = raw.parse().with_context(|| format!("Not a number: {raw}"))?;
    anyhow::ensure!(seconds.is_finite() && seconds >= 0.0, "Expected a non-negative duration, got {raw}");
    Ok(seconds)
}

fn load_scene_config(path: Option<&PathBuf>) -> Result<SceneConfig> {
    match path {
        Some(path) => {
            log::info!("Loading scene configuration from {}", path.display());
            SceneConfig::load_from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(SceneConfig::default()),
    }
}

fn run_headless(run: &RunConfig) -> Result<()> {
    let config = load_scene_config(run.config_path.as_ref())?;
    let rng = match run.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut scene = LoadingScene::new(
        config,
        GpuTier(run.gpu_tier),
        Viewport::new(LANDSCAPE.0, LANDSCAPE.1),
        HeadlessHost::new(run.load_latency),
        rng,
    )
    .context("Failed to build loading scene")?;

    if let Some(fog) = scene.fog() {
        log::info!("Fog running with {} particles", fog.particle_count());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_frames = (run.seconds / FRAME_TIME).round() as u64;
    let resize_frame = total_frames / 2;
    let mut summary = RunSummary::default();
    let timer = RunTimer::start();

    for frame in 0..total_frames {
        if frame == resize_frame {
            log::info!("Turning viewport to portrait {}x{}", PORTRAIT.0, PORTRAIT.1);
            scene.on_resize(PORTRAIT.0, PORTRAIT.1);
        }

        if scene.host_mut().tick(FRAME_TIME) {
            scene.on_loaded();
        }

        match scene.advance(FRAME_TIME).context("Frame update failed")? {
            Some(TransitionEvent::Arrived { .. }) => summary.arrivals += 1,
            Some(TransitionEvent::ItemRequested { .. }) => summary.requests += 1,
            None => {}
        }
        summary.frames += 1;
    }

    scene.teardown();

    let transform = scene.item_transform();
    log::info!(
        "Simulated {:.1}s in {} frames ({:.2?} wall, {:.0}x): {} arrivals, {} item requests, {} loads completed",
        run.seconds,
        summary.frames,
        timer.elapsed(),
        timer.speedup(run.seconds).unwrap_or(0.0),
        summary.arrivals,
        summary.requests,
        scene.host().loads_completed(),
    );
    log::info!(
        "Final item '{}' at {:?}, camera at {:?}, {} textures loaded",
        scene.current_item().caption,
        transform.position,
        scene.camera().position,
        scene.host().texture_count(),
    );

    Ok(())
}
