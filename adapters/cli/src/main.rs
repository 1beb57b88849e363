#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Path Defence session headlessly.

mod headless;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use path_defence_rendering::{
    Color, FrameControl, PlayfieldPresentation, Presentation, RenderingBackend, Scene,
};
use path_defence_simulation::{Simulation, StepOutcome};
use path_defence_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    headless::{HeadlessBackend, Pacing},
    scenario::Scenario,
};

#[derive(Parser, Debug)]
#[command(name = "path-defence")]
#[command(about = "Runs a Path Defence session from scripted input")]
struct Args {
    /// TOML file listing the input events to feed, keyed by tick
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to simulate before stopping
    #[arg(long, default_value_t = 108_000)]
    max_ticks: u32,

    /// Pace ticks at 60 per second instead of running as fast as possible
    #[arg(long, short = 'r')]
    realtime: bool,

    /// Ticks between HUD reports; 0 disables periodic reports
    #[arg(long, default_value_t = 600)]
    report_every: u32,

    /// Log filter, takes precedence over RUST_LOG
    #[arg(long)]
    log_filter: Option<String>,
}

/// Entry point for the Path Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match &args.log_filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    info!(
        inputs = scenario.len(),
        max_ticks = args.max_ticks,
        realtime = args.realtime,
        "loaded scenario"
    );

    let mut simulation = Simulation::new();
    let playfield = PlayfieldPresentation::new(query::playfield(simulation.world()))?;
    let scene = Scene::new(playfield, query::path(simulation.world()));
    let presentation = Presentation::new("Tower Defense", Color::WHITE, scene);

    let pacing = if args.realtime {
        Pacing::Realtime
    } else {
        Pacing::Fast
    };
    let backend = HeadlessBackend::new(scenario, pacing, args.max_ticks, args.report_every);

    backend.run(presentation, move |_delta, input, scene| {
        let outcome = simulation.step(&input.events);
        scene.update(&simulation.frame(), simulation.armed());
        match outcome {
            StepOutcome::Running => FrameControl::Continue,
            StepOutcome::Finished(_) => FrameControl::Exit,
            StepOutcome::Quit => {
                info!("quit requested");
                FrameControl::Exit
            }
        }
    })
}
