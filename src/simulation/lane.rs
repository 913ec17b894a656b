//! Lane logic for the intersection simulation
//!
//! A lane owns the vehicles travelling in it and decides, tick by tick, which
//! of them move. Standalone implementation that doesn't depend on Bevy.

use log::debug;

use super::layout::{JUNCTION_INTERIOR, TURN_TRIGGER};
use super::traffic_light::SimTrafficLight;
use super::types::{LaneId, LightId, Orientation, Rect, Rgb, WORLD_HEIGHT, WORLD_WIDTH};
use super::vehicle::{SimVehicle, VehicleSnapshot};

/// What happened to a lane's vehicles during one `step`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneStepReport {
    pub moved: usize,
    pub held: usize,
    pub removed: usize,
    pub turned: usize,
}

impl std::ops::AddAssign for LaneStepReport {
    fn add_assign(&mut self, other: Self) {
        self.moved += other.moved;
        self.held += other.held;
        self.removed += other.removed;
        self.turned += other.turned;
    }
}

/// A lane in the junction
#[derive(Debug, Clone)]
pub struct SimLane {
    pub id: LaneId,
    pub bounds: Rect,
    pub color: Rgb,
    /// Tint given to every vehicle added to this lane
    pub vehicle_color: Rgb,
    /// The light whose stop line applies to this lane
    pub light: LightId,
    vehicles: Vec<SimVehicle>,
}

impl SimLane {
    pub fn new(id: LaneId, bounds: Rect, color: Rgb, vehicle_color: Rgb, light: LightId) -> Self {
        Self {
            id,
            bounds,
            color,
            vehicle_color,
            light,
            vehicles: Vec::new(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from(&self.bounds)
    }

    pub fn vehicles(&self) -> &[SimVehicle] {
        &self.vehicles
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Append a vehicle, tinting it with the lane's vehicle colour
    pub fn add_vehicle(&mut self, mut vehicle: SimVehicle) {
        vehicle.color = self.vehicle_color;
        self.vehicles.push(vehicle);
    }

    /// Whether `vehicle` must wait at the stop line this tick
    pub fn is_held(&self, vehicle: &SimVehicle, light: &SimTrafficLight) -> bool {
        held_at_stop_line(self.orientation(), vehicle, light)
    }

    /// Advance every vehicle one tick, applying the stop line, the turn trigger
    /// and removal at the edge of the world. `light` must be this lane's light.
    pub fn step(&mut self, light: &SimTrafficLight) -> LaneStepReport {
        debug_assert_eq!(light.id, self.light, "lane stepped with a foreign light");

        let orientation = self.orientation();
        let lane_id = self.id;
        let mut report = LaneStepReport::default();

        self.vehicles.retain_mut(|vehicle| {
            if held_at_stop_line(orientation, vehicle, light) {
                report.held += 1;
            } else {
                vehicle.advance();
                report.moved += 1;
            }

            if vehicle.is_out_of_bounds(WORLD_WIDTH, WORLD_HEIGHT) {
                debug!("Vehicle {:?} left the world from lane {}", vehicle.id, lane_id.0 + 1);
                report.removed += 1;
                return false;
            }

            if TURN_TRIGGER.contains(vehicle.position) && vehicle.turn() {
                debug!("Vehicle {:?} turned in lane {}", vehicle.id, lane_id.0 + 1);
                report.turned += 1;
            }

            true
        });

        report
    }

    /// Drawable state of every vehicle, as of the last `step`
    pub fn snapshot(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.iter().map(VehicleSnapshot::from).collect()
    }
}

/// Stop-line rule shared by every lane.
///
/// A vehicle inside the junction interior is never held. Otherwise, while the
/// light is red, a vehicle heading toward the light's coordinate on the lane's
/// axis waits until the light changes. Comparisons are inclusive, so a vehicle
/// sitting exactly on the line waits too.
pub fn held_at_stop_line(
    orientation: Orientation,
    vehicle: &SimVehicle,
    light: &SimTrafficLight,
) -> bool {
    if !light.is_stopped() || JUNCTION_INTERIOR.contains(vehicle.position) {
        return false;
    }

    let (pos, speed, line) = match orientation {
        Orientation::Horizontal => (vehicle.position.x, vehicle.velocity.dx, light.bounds.x),
        Orientation::Vertical => (vehicle.position.y, vehicle.velocity.dy, light.bounds.y),
    };

    (speed > 0.0 && pos <= line) || (speed < 0.0 && pos >= line)
}
