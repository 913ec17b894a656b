//! Tunable parameters of a simulation run

use anyhow::{bail, Result};
use std::ops::RangeInclusive;
use std::time::Duration;

use super::layout::SpawnPolicy;
use super::types::{
    LIGHT_INTERVAL_MAX_SECS, LIGHT_INTERVAL_MIN_SECS, SPAWN_PROBABILITY, VEHICLE_SPEED,
};

/// How light toggles are driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Each light counts down simulated time inside `SimWorld::tick`
    #[default]
    Ticked,
    /// Each light runs on its own thread and posts toggles to the world
    Threaded,
}

/// Settings for a `SimWorld`. The default is the stock junction.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Chance per tick of attempting a spawn
    pub spawn_probability: f64,
    /// Speed of newly spawned vehicles, in units per tick
    pub vehicle_speed: f32,
    /// Bounds of a light interval, in whole seconds
    pub light_interval: RangeInclusive<u64>,
    pub spawn_policy: SpawnPolicy,
    pub timer_mode: TimerMode,
    /// Real duration of one light-interval second in threaded mode
    pub timer_unit: Duration,
    /// Seed for reproducible runs; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spawn_probability: SPAWN_PROBABILITY,
            vehicle_speed: VEHICLE_SPEED,
            light_interval: LIGHT_INTERVAL_MIN_SECS..=LIGHT_INTERVAL_MAX_SECS,
            spawn_policy: SpawnPolicy::Partial,
            timer_mode: TimerMode::Ticked,
            timer_unit: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            bail!(
                "Spawn probability must be within [0, 1], got {}",
                self.spawn_probability
            );
        }
        if !self.vehicle_speed.is_finite() || self.vehicle_speed <= 0.0 {
            bail!("Vehicle speed must be positive, got {}", self.vehicle_speed);
        }
        if self.light_interval.is_empty() || *self.light_interval.start() == 0 {
            bail!(
                "Light interval must be a non-empty range starting at 1 or more, got {:?}",
                self.light_interval
            );
        }
        if self.timer_mode == TimerMode::Threaded && self.timer_unit.is_zero() {
            bail!("Threaded timers need a non-zero time unit");
        }
        Ok(())
    }
}
