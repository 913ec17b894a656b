//! Background light timers
//!
//! Each light gets its own thread that sleeps a random interval and then posts
//! a toggle event. Light state itself never leaves the simulation thread: the
//! world drains the channel once per tick and applies the toggles.

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::RangeInclusive;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::traffic_light::draw_interval;
use super::types::LightId;

/// Message sent by a timer thread when its light is due to flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    Toggled { light: LightId, after: Duration },
}

/// Stop flag shared by every timer thread
#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    /// Sleep for `duration` or until stopped. Returns true if stopped.
    fn wait(&self, duration: Duration) -> bool {
        let Ok(guard) = self.stopped.lock() else {
            return true;
        };
        match self.wake.wait_timeout_while(guard, duration, |stopped| !*stopped) {
            Ok((stopped, _)) => *stopped,
            Err(_) => true,
        }
    }

    fn stop(&self) {
        if let Ok(mut stopped) = self.stopped.lock() {
            *stopped = true;
        }
        self.wake.notify_all();
    }
}

/// Settings shared by all timer threads
#[derive(Debug, Clone)]
pub struct TimerSettings {
    /// Interval bounds, in units
    pub interval: RangeInclusive<u64>,
    /// Real duration of one interval unit; one second in normal runs
    pub unit: Duration,
    /// Base seed; each light mixes in its own id
    pub seed: Option<u64>,
}

/// Handle owning one timer thread per light
pub struct LightTimerThreads {
    stop: Arc<StopSignal>,
    handles: Vec<JoinHandle<()>>,
    /// Drained only by the simulation thread
    events: Mutex<Receiver<LightEvent>>,
}

impl LightTimerThreads {
    /// Start one thread per light id
    pub fn spawn(lights: &[LightId], settings: &TimerSettings) -> Result<Self> {
        let stop = Arc::new(StopSignal::default());
        let (sender, events) = mpsc::channel();
        let mut timers = Self {
            stop,
            handles: Vec::with_capacity(lights.len()),
            events: Mutex::new(events),
        };

        for &light in lights {
            let handle = spawn_timer(light, settings, Arc::clone(&timers.stop), sender.clone())
                .with_context(|| format!("Failed to start timer thread for light {}", light.0))?;
            timers.handles.push(handle);
        }

        Ok(timers)
    }

    /// Collect every toggle posted since the last drain
    pub fn drain(&self) -> Vec<LightEvent> {
        match self.events.lock() {
            Ok(events) => events.try_iter().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Signal every thread to stop and wait for all of them to exit
    pub fn shutdown(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        self.stop.stop();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("Light timer thread panicked during shutdown");
            }
        }
        debug!("Light timer threads stopped");
    }
}

impl Drop for LightTimerThreads {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_timer(
    light: LightId,
    settings: &TimerSettings,
    stop: Arc<StopSignal>,
    sender: Sender<LightEvent>,
) -> std::io::Result<JoinHandle<()>> {
    let interval = settings.interval.clone();
    let unit = settings.unit;
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ (light.0 as u64 + 1)),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    thread::Builder::new()
        .name(format!("light-timer-{}", light.0))
        .spawn(move || loop {
            let units = draw_interval(&mut rng, &interval);
            let after = unit * units as u32;
            if stop.wait(after) {
                break;
            }
            if sender.send(LightEvent::Toggled { light, after }).is_err() {
                break;
            }
        })
}
