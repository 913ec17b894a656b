//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{
    rect_transform, to_color, EntityMappings, LightLink, SimSynced, SimWorldResource, VehicleLink,
    Z_VEHICLE,
};
use crate::simulation::{Rect, VehicleId, VehicleSnapshot};

/// System to run simulation tick
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick(time.delta_secs());
}

/// System to sync light colours from simulation state
pub fn sync_lights(
    sim_world: Res<SimWorldResource>,
    mut light_query: Query<(&LightLink, &mut Sprite)>,
) {
    for (link, mut sprite) in light_query.iter_mut() {
        if let Some(light) = sim_world.0.light(link.0) {
            sprite.color = to_color(light.color());
        }
    }
}

/// System to sync vehicle sprites from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(&VehicleLink, &mut Transform)>,
) {
    let scene = sim_world.0.scene();
    let live: HashMap<VehicleId, &VehicleSnapshot> =
        scene.vehicles().map(|v| (v.id, v)).collect();

    // Despawn sprites whose vehicle has left the world
    mappings.vehicles.retain(|id, entity| {
        let keep = live.contains_key(id);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });

    // Move sprites we already draw
    for (link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = live.get(&link.0) {
            *transform = rect_transform(&vehicle_bounds(vehicle), Z_VEHICLE);
        }
    }

    // Spawn sprites for new vehicles
    for (id, vehicle) in &live {
        if mappings.vehicles.contains_key(id) {
            continue;
        }
        let entity = commands
            .spawn((
                SimSynced,
                VehicleLink(*id),
                Sprite::from_color(
                    to_color(vehicle.color),
                    Vec2::new(vehicle.size.width, vehicle.size.height),
                ),
                rect_transform(&vehicle_bounds(vehicle), Z_VEHICLE),
            ))
            .id();
        mappings.vehicles.insert(*id, entity);
    }
}

fn vehicle_bounds(vehicle: &VehicleSnapshot) -> Rect {
    Rect::new(
        vehicle.position.x,
        vehicle.position.y,
        vehicle.size.width,
        vehicle.size.height,
    )
}
