//! Fixed geometry of the four-way junction
//!
//! Every rectangle the simulation reasons about lives here under a name so the
//! lane logic never has to carry literal coordinates.

use super::types::{LaneId, LightId, Position, Rect, Rgb, Velocity};

/// Static description of a road strip and its label
#[derive(Debug, Clone, Copy)]
pub struct RoadSpec {
    pub bounds: Rect,
    pub label: &'static str,
}

/// Static description of a traffic light
#[derive(Debug, Clone, Copy)]
pub struct LightSpec {
    pub name: &'static str,
    pub bounds: Rect,
}

/// Static description of a lane and the light that governs it
#[derive(Debug, Clone, Copy)]
pub struct LaneSpec {
    pub bounds: Rect,
    pub color: Rgb,
    pub vehicle_color: Rgb,
    pub light: LightId,
}

pub const ROADS: [RoadSpec; 4] = [
    RoadSpec {
        bounds: Rect::new(200.0, 250.0, 400.0, 20.0),
        label: "Road A",
    },
    RoadSpec {
        bounds: Rect::new(200.0, 280.0, 400.0, 20.0),
        label: "Road B",
    },
    RoadSpec {
        bounds: Rect::new(350.0, 100.0, 20.0, 400.0),
        label: "Road C",
    },
    RoadSpec {
        bounds: Rect::new(380.0, 100.0, 20.0, 400.0),
        label: "Road D",
    },
];

/// Governs traffic entering from the right
pub const EAST_LIGHT: LightId = LightId(0);
/// Governs traffic entering from the left
pub const WEST_LIGHT: LightId = LightId(1);
/// Governs traffic entering from the top
pub const NORTH_LIGHT: LightId = LightId(2);
/// Governs traffic entering from the bottom
pub const SOUTH_LIGHT: LightId = LightId(3);

pub const LIGHTS: [LightSpec; 4] = [
    LightSpec {
        name: "east",
        bounds: Rect::new(450.0, 250.0, 25.0, 100.0),
    },
    LightSpec {
        name: "west",
        bounds: Rect::new(325.0, 250.0, 25.0, 100.0),
    },
    LightSpec {
        name: "north",
        bounds: Rect::new(350.0, 225.0, 100.0, 25.0),
    },
    LightSpec {
        name: "south",
        bounds: Rect::new(350.0, 350.0, 100.0, 25.0),
    },
];

const fn horizontal_lane(x: f32, y: f32, light: LightId) -> LaneSpec {
    LaneSpec {
        bounds: Rect::new(x, y, 150.0, 20.0),
        color: Rgb::WHITE,
        vehicle_color: Rgb::RED,
        light,
    }
}

const fn vertical_lane(x: f32, y: f32, light: LightId) -> LaneSpec {
    LaneSpec {
        bounds: Rect::new(x, y, 20.0, 150.0),
        color: Rgb::WHITE,
        vehicle_color: Rgb::BLUE,
        light,
    }
}

/// Lanes 1 through 12, in stepping order
pub const LANES: [LaneSpec; 12] = [
    horizontal_lane(200.0, 260.0, WEST_LIGHT),
    horizontal_lane(200.0, 290.0, WEST_LIGHT),
    horizontal_lane(200.0, 320.0, WEST_LIGHT),
    vertical_lane(360.0, 100.0, NORTH_LIGHT),
    vertical_lane(390.0, 100.0, NORTH_LIGHT),
    vertical_lane(420.0, 100.0, NORTH_LIGHT),
    horizontal_lane(450.0, 260.0, EAST_LIGHT),
    horizontal_lane(450.0, 290.0, EAST_LIGHT),
    horizontal_lane(450.0, 320.0, EAST_LIGHT),
    vertical_lane(420.0, 350.0, SOUTH_LIGHT),
    vertical_lane(390.0, 350.0, SOUTH_LIGHT),
    vertical_lane(360.0, 350.0, SOUTH_LIGHT),
];

/// Convert a 1-based lane number, as drawn on the map, to its id
pub const fn lane(number: usize) -> LaneId {
    LaneId(number - 1)
}

/// Junction interior; vehicles inside it are never held at a stop line
pub const JUNCTION_INTERIOR: Rect = Rect::new(350.0, 250.0, 100.0, 100.0);

/// Corner region where eastbound vehicles in the upper lane turn north
pub const TURN_TRIGGER: Rect = Rect::new(360.0, 260.0, 20.0, 20.0);

/// Edge of the map a vehicle can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Bottom => 3,
        }
    }

    /// Velocity pointing from this edge into the junction
    pub fn inward(self, speed: f32) -> Velocity {
        match self {
            Side::Left => Velocity::new(speed, 0.0),
            Side::Right => Velocity::new(-speed, 0.0),
            Side::Top => Velocity::new(0.0, speed),
            Side::Bottom => Velocity::new(0.0, -speed),
        }
    }
}

/// Parallel lane slots per entry side
pub const SLOTS_PER_SIDE: usize = 3;

const ENTRY_LEFT_X: f32 = 200.0;
const ENTRY_RIGHT_X: f32 = 600.0;
const ENTRY_TOP_Y: f32 = 100.0;
const ENTRY_BOTTOM_Y: f32 = 500.0;
const FIRST_SLOT_Y: f32 = 260.0;
const FIRST_SLOT_X: f32 = 360.0;
const SLOT_SPACING: f32 = 30.0;

/// Where a spawned vehicle appears and which lane receives it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPoint {
    pub lane: LaneId,
    pub position: Position,
    pub velocity: Velocity,
}

/// Which slot-to-lane bindings the spawner honours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnPolicy {
    /// Two of three slots per side are wired; the third spawns nothing
    #[default]
    Partial,
    /// Every slot feeds the lane it lines up with
    AllLanes,
}

impl Side {
    /// Entry position for the given slot on this side
    pub fn slot_position(self, slot: usize) -> Position {
        let offset = slot as f32 * SLOT_SPACING;
        match self {
            Side::Left => Position::new(ENTRY_LEFT_X, FIRST_SLOT_Y + offset),
            Side::Right => Position::new(ENTRY_RIGHT_X, FIRST_SLOT_Y + offset),
            Side::Top => Position::new(FIRST_SLOT_X + offset, ENTRY_TOP_Y),
            Side::Bottom => Position::new(FIRST_SLOT_X + offset, ENTRY_BOTTOM_Y),
        }
    }

    /// Lane lined up with the given slot, whether or not it is wired
    fn aligned_lane(self, slot: usize) -> LaneId {
        match (self, slot) {
            (Side::Left, s) => lane(1 + s),
            (Side::Right, s) => lane(7 + s),
            (Side::Top, s) => lane(4 + s),
            (Side::Bottom, s) => lane(12 - s),
        }
    }

    fn is_wired(self, slot: usize) -> bool {
        !matches!(
            (self, slot),
            (Side::Left, 2) | (Side::Right, 0) | (Side::Top, 0) | (Side::Bottom, 2)
        )
    }
}

/// Resolve a spawn side and slot to an entry point.
/// Returns None when the slot is out of range or not wired under `policy`.
pub fn entry_point(side: Side, slot: usize, policy: SpawnPolicy, speed: f32) -> Option<EntryPoint> {
    if slot >= SLOTS_PER_SIDE {
        return None;
    }
    if policy == SpawnPolicy::Partial && !side.is_wired(slot) {
        return None;
    }
    Some(EntryPoint {
        lane: side.aligned_lane(slot),
        position: side.slot_position(slot),
        velocity: side.inward(speed),
    })
}

