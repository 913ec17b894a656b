//! Systems for spawning the static scene from simulation state

use bevy::prelude::*;

use super::components::{
    rect_transform, to_color, LightLink, SimSynced, SimWorldResource, Z_LABEL, Z_LANE, Z_LIGHT,
    Z_ROAD,
};

/// System to create the roads, lanes and lights once at startup
pub fn spawn_initial_visuals(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let scene = sim_world.0.scene();

    for road in &scene.roads {
        let size = Vec2::new(road.bounds.width, road.bounds.height);
        commands.spawn((
            Sprite::from_color(to_color(road.color), size),
            rect_transform(&road.bounds, Z_ROAD),
        ));
        commands.spawn((
            Text2d::new(road.label),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::WHITE),
            rect_transform(&road.bounds, Z_LABEL),
        ));
    }

    for lane in &scene.lanes {
        let size = Vec2::new(lane.bounds.width, lane.bounds.height);
        commands.spawn((
            Sprite::from_color(to_color(lane.color), size),
            rect_transform(&lane.bounds, Z_LANE),
        ));
    }

    for light in &scene.lights {
        let size = Vec2::new(light.bounds.width, light.bounds.height);
        commands.spawn((
            SimSynced,
            LightLink(light.id),
            Sprite::from_color(to_color(light.color), size),
            rect_transform(&light.bounds, Z_LIGHT),
        ));
    }

    info!(
        "Spawned {} roads, {} lanes, {} lights",
        scene.roads.len(),
        scene.lanes.len(),
        scene.lights.len()
    );
}
