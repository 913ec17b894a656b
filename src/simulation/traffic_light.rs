//! Traffic light state machine
//!
//! Standalone implementation that doesn't depend on Bevy. A light flips
//! between `Stopped` and `Go` after a randomly drawn number of seconds.

use rand::Rng;
use std::ops::RangeInclusive;

use super::types::{LightId, Rect, Rgb};

/// The two states a light can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    /// Red
    Stopped,
    /// Green
    Go,
}

impl LightState {
    pub fn toggled(self) -> Self {
        match self {
            LightState::Stopped => LightState::Go,
            LightState::Go => LightState::Stopped,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            LightState::Stopped => Rgb::RED,
            LightState::Go => Rgb::GREEN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightState::Stopped => "Red",
            LightState::Go => "Green",
        }
    }
}

/// Draw a light interval, in whole seconds, uniformly from `range`
pub fn draw_interval<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<u64>) -> u64 {
    rng.random_range(range.clone())
}

/// A traffic light with its own countdown
#[derive(Debug, Clone)]
pub struct SimTrafficLight {
    pub id: LightId,
    pub name: &'static str,
    /// Only the origin matters to the simulation; it marks the stop line
    pub bounds: Rect,
    state: LightState,
    /// Seconds accumulated since the last toggle
    elapsed: f32,
    /// Seconds the current state lasts
    interval: u64,
}

impl SimTrafficLight {
    /// Lights start out red
    pub fn new(id: LightId, name: &'static str, bounds: Rect, first_interval: u64) -> Self {
        Self {
            id,
            name,
            bounds,
            state: LightState::Stopped,
            elapsed: 0.0,
            interval: first_interval,
        }
    }

    pub fn state(&self) -> LightState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == LightState::Stopped
    }

    pub fn color(&self) -> Rgb {
        self.state.color()
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Flip the state and return the new one
    pub fn toggle(&mut self) -> LightState {
        self.state = self.state.toggled();
        self.state
    }

    /// Force a state without touching the countdown
    pub fn set_state(&mut self, state: LightState) {
        self.state = state;
    }

    /// Advance the countdown by `delta_secs`, toggling once for every interval
    /// that fully elapses and drawing a fresh interval after each toggle.
    /// Returns the intervals that expired, oldest first.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        delta_secs: f32,
        rng: &mut R,
        range: &RangeInclusive<u64>,
    ) -> Vec<u64> {
        let mut expired = Vec::new();
        self.elapsed += delta_secs;

        while self.interval > 0 && self.elapsed >= self.interval as f32 {
            self.elapsed -= self.interval as f32;
            self.toggle();
            expired.push(self.interval);
            self.interval = draw_interval(rng, range);
        }

        expired
    }
}
