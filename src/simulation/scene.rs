//! Read-only scene description handed to the presentation layer
//!
//! Everything here is copied out of the world, so a renderer can hold a
//! snapshot for as long as it likes without blocking the simulation.

use super::traffic_light::LightState;
use super::types::{LaneId, LightId, Rect, Rgb, RoadId};
use super::vehicle::VehicleSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct RoadView {
    pub id: RoadId,
    pub bounds: Rect,
    pub color: Rgb,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    pub id: LaneId,
    pub bounds: Rect,
    pub color: Rgb,
    pub vehicles: Vec<VehicleSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightView {
    pub id: LightId,
    pub bounds: Rect,
    pub state: LightState,
    pub color: Rgb,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub roads: Vec<RoadView>,
    pub lanes: Vec<LaneView>,
    pub lights: Vec<LightView>,
}

impl SceneSnapshot {
    pub fn vehicle_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.vehicles.len()).sum()
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &VehicleSnapshot> {
        self.lanes.iter().flat_map(|lane| lane.vehicles.iter())
    }
}
