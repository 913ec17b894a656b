//! Standalone intersection simulation module
//!
//! This module contains all the core simulation logic (light timers, lanes,
//! vehicles and the spawner) and runs independently of the Bevy game engine.
//! It can be tested via console without needing to boot up a window.

mod config;
mod lane;
pub mod layout;
mod runner;
mod scene;
mod timers;
mod traffic_light;
mod types;
mod vehicle;
mod world;

pub use config::{SimConfig, TimerMode};
pub use lane::{held_at_stop_line, LaneStepReport, SimLane};
pub use layout::{EntryPoint, Side, SpawnPolicy, JUNCTION_INTERIOR, TURN_TRIGGER};
pub use runner::{run, FrameLimiter, HeadlessPresenter, Presenter};
pub use scene::{LaneView, LightView, RoadView, SceneSnapshot};
pub use timers::{LightEvent, LightTimerThreads, TimerSettings};
pub use traffic_light::{draw_interval, LightState, SimTrafficLight};
pub use types::{
    LaneId, LightId, Orientation, Position, Rect, Rgb, RoadId, SimId, Size, VehicleId, Velocity,
    LIGHT_INTERVAL_MAX_SECS, LIGHT_INTERVAL_MIN_SECS, SPAWN_PROBABILITY, TARGET_FRAME_RATE,
    TURN_CREEP_SPEED, VEHICLE_SIZE, VEHICLE_SPEED, WORLD_HEIGHT, WORLD_WIDTH,
};
pub use vehicle::{SimVehicle, VehicleSnapshot};
pub use world::{SimStats, SimWorld, SpawnDraw, TickReport};
