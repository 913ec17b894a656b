//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads a `SceneSnapshot` from `SimWorld` each frame and draws it as 2D sprites.

mod components;
mod input;
pub mod spawner;
pub mod sync;
mod world;

use bevy::prelude::*;

pub use components::{
    rect_transform, EntityMappings, SimWorldResource, VehicleLink, Z_VEHICLE,
};

use crate::simulation::TARGET_FRAME_RATE;
use input::handle_input;
use spawner::spawn_initial_visuals;
use sync::{sync_lights, sync_vehicles, tick_simulation};
use world::setup_world;

/// Plugin to register all UI systems
pub struct IntersectionUiPlugin;

impl Plugin for IntersectionUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .insert_resource(Time::<Fixed>::from_hz(f64::from(TARGET_FRAME_RATE)))
            .add_systems(
                Startup,
                (setup_world, spawn_initial_visuals.after(setup_world)),
            )
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(Update, (sync_lights, sync_vehicles, handle_input));
    }
}
