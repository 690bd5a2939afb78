//! Catpoint console driver.
//!
//! Reads commands from stdin (one per line), pushes them through the
//! ordered [`CommandQueue`] and lets a single [`SecurityService`] consume
//! them against the configured repository and the fake detector.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │  InMemoryRepository | JsonFileRepository   LogEventSink    │
//! │  FakeImageDetector                                         │
//! │  ──────────────── Port Trait Boundary ─────────────────    │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │          SecurityService (pure logic)                │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │  stdin ─▶ parse_line ─▶ CommandQueue ─▶ handle_command      │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use catpoint::adapters::fake_detector::FakeImageDetector;
use catpoint::adapters::json_store::JsonFileRepository;
use catpoint::adapters::log_sink::LogEventSink;
use catpoint::adapters::memory::InMemoryRepository;
use catpoint::app::commands::{ConsoleLine, parse_line};
use catpoint::app::ports::{EventSink, ImageDetector, SecurityRepository};
use catpoint::app::service::SecurityService;
use catpoint::config::SecurityConfig;
use catpoint::events::CommandQueue;

#[derive(Parser, Debug)]
#[command(name = "catpoint", version, about = "Home-security alarm controller console")]
struct Args {
    /// JSON config file.
    #[arg(long, env = "CATPOINT_CONFIG")]
    config: Option<PathBuf>,

    /// JSON state file (overrides the config file).  In-memory if unset.
    #[arg(long, env = "CATPOINT_STATE")]
    state: Option<PathBuf>,

    /// Seed for the fake detector (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SecurityConfig::load(path)
            .map_err(catpoint::Error::from)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SecurityConfig::default(),
    };
    if args.state.is_some() {
        config.state_path = args.state;
    }
    if args.seed.is_some() {
        config.detector_seed = args.seed;
    }
    config.validate().map_err(catpoint::Error::from)?;

    info!("Catpoint v{}", env!("CARGO_PKG_VERSION"));

    let mut detector = FakeImageDetector::new(config.detector_seed);
    let mut sink = LogEventSink::new();

    match config.state_path.clone() {
        Some(path) => {
            let mut repo = JsonFileRepository::open(&path)
                .map_err(catpoint::Error::from)
                .with_context(|| format!("opening state file {}", path.display()))?;
            info!("State file: {}", repo.path().display());
            run(config, &mut repo, &mut detector, &mut sink)
        }
        None => {
            info!("No state file configured, state is kept in memory");
            let mut repo = InMemoryRepository::new();
            run(config, &mut repo, &mut detector, &mut sink)
        }
    }
}

fn run(
    config: SecurityConfig,
    repo: &mut impl SecurityRepository,
    detector: &mut impl ImageDetector,
    sink: &mut impl EventSink,
) -> Result<()> {
    let mut service = SecurityService::new(config);
    let queue = CommandQueue::new();

    print_status(&service, &*repo);

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match parse_line(&line) {
            Ok(ConsoleLine::Command(cmd)) => {
                if let Err(e) = queue.submit(cmd) {
                    warn!("{}", e);
                }
            }
            Ok(ConsoleLine::Status) => print_status(&service, &*repo),
            Ok(ConsoleLine::Empty) => {}
            Err(e) => warn!("{}", e),
        }

        queue.drain(|cmd| {
            if let Err(e) = service.handle_command(cmd, repo, detector, sink) {
                warn!("Command failed: {}", e);
            }
        });
    }

    info!("Input closed, shutting down");
    Ok(())
}

fn print_status(service: &SecurityService, repo: &impl SecurityRepository) {
    let alarm = service.alarm_status(repo);
    let arming = service.arming_status(repo);
    println!("alarm:  {} ({})", alarm, alarm.description());
    println!("arming: {} ({})", arming, arming.description());
    let active = service.active_sensors(repo);
    if active.is_empty() {
        println!("active sensors: none");
    } else {
        let names: Vec<String> = active.iter().map(ToString::to_string).collect();
        println!("active sensors: {}", names.join(", "));
    }
}
