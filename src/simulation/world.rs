//! Main simulation world that ties everything together
//!
//! This is the entry point for running the intersection simulation
//! without any Bevy dependencies.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::config::{SimConfig, TimerMode};
use super::lane::{LaneStepReport, SimLane};
use super::layout::{entry_point, Side, LANES, LIGHTS, ROADS, SLOTS_PER_SIDE};
use super::scene::{LaneView, LightView, RoadView, SceneSnapshot};
use super::timers::{LightEvent, LightTimerThreads, TimerSettings};
use super::traffic_light::{draw_interval, SimTrafficLight};
use super::types::{
    LaneId, LightId, Rgb, RoadId, SimId, VehicleId, WORLD_HEIGHT, WORLD_WIDTH,
};
use super::vehicle::SimVehicle;

/// Random values consumed by one spawn attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDraw {
    /// Uniform draw in `[0, 1)`; a spawn happens only below the spawn probability
    pub roll: f64,
    pub side: Side,
    pub slot: usize,
}

/// Running totals for a simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimStats {
    pub ticks: u64,
    pub spawn_attempts: u64,
    /// Attempts that landed on a slot with no lane behind it
    pub unwired_spawns: u64,
    pub vehicles_spawned: u64,
    pub vehicles_exited: u64,
    pub vehicles_turned: u64,
    pub light_toggles: u64,
    /// Vehicles spawned per entry side, indexed by `Side::index`
    pub spawned_by_side: [u64; 4],
}

impl SimStats {
    pub fn spawned_from(&self, side: Side) -> u64 {
        self.spawned_by_side[side.index()]
    }
}

/// What a single `tick` did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<VehicleId>,
    pub light_toggles: usize,
    pub lanes: LaneStepReport,
}

/// The main simulation world
pub struct SimWorld {
    pub config: SimConfig,

    /// Static road strips, drawn but never simulated
    roads: Vec<RoadView>,

    /// All traffic lights, indexed by `LightId`
    lights: Vec<SimTrafficLight>,

    /// All lanes, indexed by `LaneId` and stepped in that order
    lanes: Vec<SimLane>,

    /// Present only in threaded timer mode
    timers: Option<LightTimerThreads>,

    /// Next ID to assign
    next_id: usize,

    /// Simulation time in seconds
    pub time: f32,

    pub stats: SimStats,

    rng: StdRng,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::build(SimConfig::default())
    }
}

impl SimWorld {
    /// Build the fixed junction described by `config`, starting light timer
    /// threads when the config asks for them
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;

        let mut world = Self::build(config);
        if world.config.timer_mode == TimerMode::Threaded {
            let settings = TimerSettings {
                interval: world.config.light_interval.clone(),
                unit: world.config.timer_unit,
                seed: world.config.seed,
            };
            let ids: Vec<LightId> = world.lights.iter().map(|light| light.id).collect();
            world.timers = Some(LightTimerThreads::spawn(&ids, &settings)?);
        }

        info!(
            "Junction ready: {} roads, {} lanes, {} lights, {:?} timers",
            world.roads.len(),
            world.lanes.len(),
            world.lights.len(),
            world.config.timer_mode
        );
        Ok(world)
    }

    /// Create a world with tick-driven timers and a seeded RNG for reproducible runs
    pub fn new_with_seed(seed: u64) -> Self {
        Self::build(SimConfig::default().with_seed(seed))
    }

    fn build(config: SimConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let roads = ROADS
            .iter()
            .enumerate()
            .map(|(i, spec)| RoadView {
                id: RoadId(i),
                bounds: spec.bounds,
                color: Rgb::ROAD_GREY,
                label: spec.label,
            })
            .collect();

        let lights = LIGHTS
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let first = draw_interval(&mut rng, &config.light_interval);
                SimTrafficLight::new(LightId(i), spec.name, spec.bounds, first)
            })
            .collect();

        let lanes = LANES
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                SimLane::new(LaneId(i), spec.bounds, spec.color, spec.vehicle_color, spec.light)
            })
            .collect();

        Self {
            config,
            roads,
            lights,
            lanes,
            timers: None,
            next_id: 0,
            time: 0.0,
            stats: SimStats::default(),
            rng,
        }
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn lanes(&self) -> &[SimLane] {
        &self.lanes
    }

    pub fn lane(&self, id: LaneId) -> Option<&SimLane> {
        self.lanes.get(id.0)
    }

    pub fn lights(&self) -> &[SimTrafficLight] {
        &self.lights
    }

    pub fn light(&self, id: LightId) -> Option<&SimTrafficLight> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut SimTrafficLight> {
        self.lights.get_mut(id.0)
    }

    pub fn roads(&self) -> &[RoadView] {
        &self.roads
    }

    pub fn vehicle_count(&self) -> usize {
        self.lanes.iter().map(SimLane::vehicle_count).sum()
    }

    pub fn has_light_threads(&self) -> bool {
        self.timers.as_ref().is_some_and(LightTimerThreads::is_running)
    }

    /// Place a vehicle directly into a lane, bypassing the spawner
    pub fn add_vehicle(&mut self, lane: LaneId, vehicle: SimVehicle) -> Option<VehicleId> {
        let id = vehicle.id;
        self.lanes.get_mut(lane.0)?.add_vehicle(vehicle);
        Some(id)
    }

    /// Allocate an id for a vehicle built outside the spawner
    pub fn allocate_vehicle_id(&mut self) -> VehicleId {
        VehicleId(self.next_sim_id())
    }

    /// Roll for a spawn and, on success, pick an entry side and slot
    pub fn spawn_tick(&mut self) -> Option<VehicleId> {
        let roll: f64 = self.rng.random();
        if roll >= self.config.spawn_probability {
            return None;
        }
        let side = Side::ALL[self.rng.random_range(0..Side::ALL.len())];
        let slot = self.rng.random_range(0..SLOTS_PER_SIDE);
        self.apply_spawn(SpawnDraw { roll, side, slot })
    }

    /// Carry out a spawn for an already drawn set of random values.
    /// Returns None when the roll fails or the slot has no lane wired to it.
    pub fn apply_spawn(&mut self, draw: SpawnDraw) -> Option<VehicleId> {
        if draw.roll >= self.config.spawn_probability {
            return None;
        }
        self.stats.spawn_attempts += 1;

        let Some(entry) = entry_point(
            draw.side,
            draw.slot,
            self.config.spawn_policy,
            self.config.vehicle_speed,
        ) else {
            self.stats.unwired_spawns += 1;
            debug!("Spawn slot {} on {:?} side is not wired", draw.slot, draw.side);
            return None;
        };

        let id = self.allocate_vehicle_id();
        let vehicle = SimVehicle::new(id, entry.position, entry.velocity);
        self.add_vehicle(entry.lane, vehicle)?;

        self.stats.vehicles_spawned += 1;
        self.stats.spawned_by_side[draw.side.index()] += 1;
        debug!(
            "Spawned vehicle {:?} in lane {} at ({}, {})",
            id,
            entry.lane.0 + 1,
            entry.position.x,
            entry.position.y
        );
        Some(id)
    }

    /// Advance tick-driven light timers, or apply toggles posted by timer threads.
    /// Once threaded timers are shut down the lights keep their last state.
    fn update_lights(&mut self, delta_secs: f32) -> usize {
        let mut toggles = 0;

        match self.config.timer_mode {
            TimerMode::Threaded => {
                let events = self
                    .timers
                    .as_ref()
                    .map(LightTimerThreads::drain)
                    .unwrap_or_default();
                for LightEvent::Toggled { light, after } in events {
                    let Some(target) = self.lights.get_mut(light.0) else {
                        warn!("Dropped toggle for unknown light {}", light.0);
                        continue;
                    };
                    let state = target.toggle();
                    info!(
                        "Light {} changed to {} after {:?}",
                        target.name,
                        state.label(),
                        after
                    );
                    toggles += 1;
                }
            }
            TimerMode::Ticked => {
                for light in &mut self.lights {
                    let range = &self.config.light_interval;
                    let mut state = light.state();
                    for secs in light.advance(delta_secs, &mut self.rng, range) {
                        state = state.toggled();
                        info!(
                            "Light {} changed to {} after {:?}",
                            light.name,
                            state.label(),
                            Duration::from_secs(secs)
                        );
                        toggles += 1;
                    }
                }
            }
        }

        self.stats.light_toggles += toggles as u64;
        toggles
    }

    /// Step every lane against a consistent view of its light
    fn update_lanes(&mut self) -> LaneStepReport {
        let mut report = LaneStepReport::default();
        for lane in &mut self.lanes {
            let light = &self.lights[lane.light.0];
            report += lane.step(light);
        }

        self.stats.vehicles_exited += report.removed as u64;
        self.stats.vehicles_turned += report.turned as u64;
        report
    }

    /// Run one simulation tick: lights, spawning, then every lane in order
    pub fn tick(&mut self, delta_secs: f32) -> TickReport {
        let light_toggles = self.update_lights(delta_secs);
        let spawned = self.spawn_tick();
        let lanes = self.update_lanes();

        self.stats.ticks += 1;
        self.time += delta_secs;

        TickReport {
            spawned,
            light_toggles,
            lanes,
        }
    }

    /// Copy out everything the presentation layer draws this frame
    pub fn scene(&self) -> SceneSnapshot {
        SceneSnapshot {
            roads: self.roads.clone(),
            lanes: self
                .lanes
                .iter()
                .map(|lane| LaneView {
                    id: lane.id,
                    bounds: lane.bounds,
                    color: lane.color,
                    vehicles: lane.snapshot(),
                })
                .collect(),
            lights: self
                .lights
                .iter()
                .map(|light| LightView {
                    id: light.id,
                    bounds: light.bounds,
                    state: light.state(),
                    color: light.color(),
                })
                .collect(),
        }
    }

    /// Stop any light timer threads; the lights freeze in their current state
    pub fn shutdown(&mut self) {
        if let Some(mut timers) = self.timers.take() {
            timers.shutdown();
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!("Time: {:.2}s, Ticks: {}", self.time, self.stats.ticks);
        println!(
            "Roads: {}, Lanes: {}, Lights: {}",
            self.roads.len(),
            self.lanes.len(),
            self.lights.len()
        );
        println!("Vehicles: {}", self.vehicle_count());
        println!(
            "Spawned: {}, Exited: {}, Turned: {}, Unwired spawn slots hit: {}",
            self.stats.vehicles_spawned,
            self.stats.vehicles_exited,
            self.stats.vehicles_turned,
            self.stats.unwired_spawns
        );
        println!(
            "Spawned by side: left {}, right {}, top {}, bottom {}",
            self.stats.spawned_from(Side::Left),
            self.stats.spawned_from(Side::Right),
            self.stats.spawned_from(Side::Top),
            self.stats.spawned_from(Side::Bottom)
        );
        println!();

        println!("--- Lights ---");
        for light in &self.lights {
            println!(
                "  {:<5} {:<5} ({:.1}s of {}s)",
                light.name,
                light.state().label(),
                light.elapsed(),
                light.interval()
            );
        }

        println!("--- Lanes ---");
        for lane in &self.lanes {
            if lane.vehicle_count() > 0 {
                println!("  Lane {:>2}: {} vehicles", lane.id.0 + 1, lane.vehicle_count());
            }
        }
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        const COLS: usize = 80;
        const ROWS: usize = 30;
        let scale_x = WORLD_WIDTH / COLS as f32;
        let scale_y = WORLD_HEIGHT / ROWS as f32;

        let to_grid = |x: f32, y: f32| -> (usize, usize) {
            let col = (x / scale_x).max(0.0) as usize;
            let row = (y / scale_y).max(0.0) as usize;
            (row.min(ROWS - 1), col.min(COLS - 1))
        };

        let mut grid = vec![vec![' '; COLS]; ROWS];

        // Lane surfaces
        for lane in &self.lanes {
            let (top, left) = to_grid(lane.bounds.x, lane.bounds.y);
            let (bottom, right) = to_grid(lane.bounds.right() - 1.0, lane.bounds.bottom() - 1.0);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                for cell in row.iter_mut().take(right + 1).skip(left) {
                    *cell = '.';
                }
            }
        }

        // Lights
        for light in &self.lights {
            let (row, col) = to_grid(light.bounds.x, light.bounds.y);
            grid[row][col] = if light.is_stopped() { 'R' } else { 'G' };
        }

        // Vehicles, drawn by heading
        for lane in &self.lanes {
            for vehicle in lane.vehicles() {
                let (row, col) = to_grid(vehicle.position.x, vehicle.position.y);
                let v = vehicle.velocity;
                grid[row][col] = if v.dx > 0.0 {
                    '>'
                } else if v.dx < 0.0 {
                    '<'
                } else if v.dy > 0.0 {
                    'v'
                } else {
                    '^'
                };
            }
        }

        println!("\n=== Junction Map ===");
        println!("Legend: .=Lane, R/G=Light (red/green), ><^v=Vehicle heading");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line.trim_end());
        }
        println!();
    }
}
