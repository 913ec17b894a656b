use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::time::Duration;

use intersection_sim::simulation::{
    self, FrameLimiter, HeadlessPresenter, Side, SimConfig, SimWorld, SpawnPolicy, TimerMode,
    TARGET_FRAME_RATE,
};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way signalized intersection simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "2000")]
    ticks: u64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Drive each traffic light from its own thread (wall-clock timing)
    #[arg(long)]
    threaded: bool,

    /// Real milliseconds per light-interval second when using threaded timers
    #[arg(long, default_value = "1000")]
    timer_unit_ms: u64,

    /// Wire every spawn slot to a lane instead of two of three per side
    #[arg(long)]
    spawn_all_lanes: bool,

    /// Hold headless runs to the target frame rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Log a status line every N ticks in headless mode (0 disables)
    #[arg(long, default_value = "165")]
    report_every: u64,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            spawn_policy: if self.spawn_all_lanes {
                SpawnPolicy::AllLanes
            } else {
                SpawnPolicy::Partial
            },
            timer_mode: if self.threaded {
                TimerMode::Threaded
            } else {
                TimerMode::Ticked
            },
            timer_unit: Duration::from_millis(self.timer_unit_ms),
            seed: self.seed,
            ..SimConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.sim_config();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config)
        }
        #[cfg(not(feature = "ui"))]
        {
            drop(config);
            anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
        }
    } else {
        run_headless(&cli, config)
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: SimConfig) -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let delta = 1.0 / TARGET_FRAME_RATE as f32;
    info!("Running intersection simulation in headless mode...");
    info!("Ticks: {}, Delta: {:.4}s", cli.ticks, delta);

    let mut world = SimWorld::new(config).context("Failed to build the simulation world")?;

    println!("Initial state:");
    world.print_summary();
    world.draw_map();

    let mut presenter = HeadlessPresenter::new(cli.ticks, cli.report_every);
    let mut limiter = if cli.realtime {
        FrameLimiter::new(TARGET_FRAME_RATE)
    } else {
        FrameLimiter::unlimited()
    };

    let ticks = simulation::run(&mut world, &mut presenter, &mut limiter, delta);

    let stats = &world.stats;
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", ticks);
    info!("Simulated time: {:.2}s", world.time);
    info!("Vehicles spawned: {}", stats.vehicles_spawned);
    for side in Side::ALL {
        info!("  from {:?}: {}", side, stats.spawned_from(side));
    }
    info!("Vehicles exited: {}", stats.vehicles_exited);
    info!("Vehicles turned: {}", stats.vehicles_turned);
    info!("Active vehicles: {}", world.vehicle_count());
    info!("Light toggles: {}", stats.light_toggles);

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SimConfig) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use intersection_sim::simulation::{WORLD_HEIGHT, WORLD_WIDTH};
    use intersection_sim::ui;

    let world = SimWorld::new(config).context("Failed to build the simulation world")?;

    println!("Starting Intersection Sim UI...");
    println!();
    println!("Controls:");
    println!("  Q / ESC     - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,intersection_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Traffic Light Simulator".into(),
                        resolution: (WORLD_WIDTH as u32, WORLD_HEIGHT as u32).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(ui::SimWorldResource(world))
        .add_plugins(ui::IntersectionUiPlugin)
        .run();

    Ok(())
}
