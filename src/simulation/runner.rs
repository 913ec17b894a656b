//! The simulation/render loop, decoupled from any particular renderer

use log::info;
use std::thread;
use std::time::{Duration, Instant};

use super::scene::SceneSnapshot;
use super::world::SimWorld;

/// Whatever draws the scene and reports when the user wants to quit
pub trait Presenter {
    /// Polled once per tick before any simulation work
    fn exit_requested(&mut self) -> bool;

    /// Receives the scene after the tick's lane updates
    fn present(&mut self, scene: &SceneSnapshot);
}

/// Keeps the loop at or below a target rate
#[derive(Debug)]
pub struct FrameLimiter {
    period: Option<Duration>,
    next_frame: Instant,
}

impl FrameLimiter {
    /// A rate of zero disables limiting
    pub fn new(frames_per_second: u32) -> Self {
        let period = (frames_per_second > 0)
            .then(|| Duration::from_secs_f64(1.0 / f64::from(frames_per_second)));
        Self {
            period,
            next_frame: Instant::now(),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Sleep until the next frame is due
    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        self.next_frame += period;
        let now = Instant::now();
        if self.next_frame > now {
            thread::sleep(self.next_frame - now);
        } else {
            // Running behind; don't try to catch up with a burst of frames
            self.next_frame = now;
        }
    }
}

/// Drive `world` until the presenter asks to exit. Returns the number of ticks run.
pub fn run<P: Presenter>(
    world: &mut SimWorld,
    presenter: &mut P,
    limiter: &mut FrameLimiter,
    delta_secs: f32,
) -> u64 {
    let mut ticks = 0;
    while !presenter.exit_requested() {
        world.tick(delta_secs);
        presenter.present(&world.scene());
        limiter.wait();
        ticks += 1;
    }
    world.shutdown();
    ticks
}

/// Presenter for runs without a window: stops after a tick budget and logs
/// a short status line every `report_every` ticks
pub struct HeadlessPresenter {
    remaining: u64,
    report_every: u64,
    frames: u64,
    pub last_scene: Option<SceneSnapshot>,
}

impl HeadlessPresenter {
    pub fn new(ticks: u64, report_every: u64) -> Self {
        Self {
            remaining: ticks,
            report_every,
            frames: 0,
            last_scene: None,
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn exit_requested(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }

    fn present(&mut self, scene: &SceneSnapshot) {
        self.frames += 1;
        if self.report_every > 0 && self.frames % self.report_every == 0 {
            let lights: Vec<&str> = scene
                .lights
                .iter()
                .map(|light| light.state.label())
                .collect();
            info!(
                "Frame {}: {} vehicles, lights {:?}",
                self.frames,
                scene.vehicle_count(),
                lights
            );
        }
        self.last_scene = Some(scene.clone());
    }
}
