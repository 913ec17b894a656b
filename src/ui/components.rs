//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{LightId, Rect, Rgb, SimWorld, VehicleId, WORLD_HEIGHT, WORLD_WIDTH};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        Self(SimWorld::default())
    }
}

/// Maps simulation vehicles to the sprites drawing them
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub vehicles: HashMap<VehicleId, Entity>,
}

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// Links a Bevy entity to a simulation traffic light
#[derive(Component)]
pub struct LightLink(pub LightId);

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Draw order, back to front
pub const Z_ROAD: f32 = 0.0;
pub const Z_LANE: f32 = 1.0;
pub const Z_LIGHT: f32 = 2.0;
pub const Z_VEHICLE: f32 = 3.0;
pub const Z_LABEL: f32 = 4.0;

/// Convert a top-left anchored simulation rectangle into a centred 2D transform.
/// The simulation's y axis points down, Bevy's points up.
pub fn rect_transform(rect: &Rect, z: f32) -> Transform {
    Transform::from_xyz(
        rect.x + rect.width / 2.0 - WORLD_WIDTH / 2.0,
        WORLD_HEIGHT / 2.0 - (rect.y + rect.height / 2.0),
        z,
    )
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.r, rgb.g, rgb.b)
}
