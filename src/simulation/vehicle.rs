//! Vehicle movement for the intersection simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{Position, Rgb, Size, Velocity, VehicleId, TURN_CREEP_SPEED, VEHICLE_SIZE};

/// A constant-velocity vehicle travelling along one axis
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub position: Position,
    pub velocity: Velocity,
    pub size: Size,
    /// Tint applied by the lane that owns the vehicle
    pub color: Rgb,
    /// Set once the vehicle has swapped its heading at the turn trigger
    pub turned: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, position: Position, velocity: Velocity) -> Self {
        Self {
            id,
            position,
            velocity,
            size: VEHICLE_SIZE,
            color: Rgb::BLUE,
            turned: false,
        }
    }

    /// Move by one tick's worth of velocity
    pub fn advance(&mut self) {
        self.position = self.position.translated(self.velocity);
    }

    /// True if the position lies outside `[0, width] x [0, height]`
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.position.x < 0.0
            || self.position.x > width
            || self.position.y < 0.0
            || self.position.y > height
    }

    /// Swap horizontal travel for the vertical creep used at the turn.
    /// Returns false, leaving the vehicle alone, unless it is still heading along +x.
    pub fn turn(&mut self) -> bool {
        if self.velocity.dx <= 0.0 {
            return false;
        }
        self.velocity = Velocity::new(0.0, TURN_CREEP_SPEED);
        self.turned = true;
        true
    }
}

/// Read-only view of a vehicle for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: Position,
    pub size: Size,
    pub color: Rgb,
}

impl From<&SimVehicle> for VehicleSnapshot {
    fn from(vehicle: &SimVehicle) -> Self {
        Self {
            id: vehicle.id,
            position: vehicle.position,
            size: vehicle.size,
            color: vehicle.color,
        }
    }
}
