//! Core types for the intersection simulation
//!
//! These are standalone types that don't depend on Bevy. All coordinates are
//! screen units with the origin at the top-left corner and y growing downwards.

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub SimId);

/// Index of a lane in the fixed topology (0-based, lane 1 is `LaneId(0)`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneId(pub usize);

/// Index of a traffic light in the fixed topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

/// Index of a road in the fixed topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoadId(pub usize);

/// A 2D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn translated(&self, velocity: Velocity) -> Position {
        Position {
            x: self.x + velocity.dx,
            y: self.y + velocity.dy,
        }
    }
}

/// Per-tick displacement of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// Width and height of a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive on every edge
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    /// Lanes wider than they are tall carry traffic along the x axis
    pub fn is_horizontal(&self) -> bool {
        self.width > self.height
    }
}

/// Travel axis of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl From<&Rect> for Orientation {
    fn from(rect: &Rect) -> Self {
        if rect.is_horizontal() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// An opaque 8-bit RGB colour handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const ROAD_GREY: Rgb = Rgb::new(50, 50, 50);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Width of the simulated region
pub const WORLD_WIDTH: f32 = 800.0;

/// Height of the simulated region
pub const WORLD_HEIGHT: f32 = 600.0;

/// Side length of every vehicle
pub const VEHICLE_SIZE: Size = Size::new(20.0, 20.0);

/// Distance covered per tick by a freshly spawned vehicle
pub const VEHICLE_SPEED: f32 = 0.5;

/// Vertical velocity given to a vehicle once it turns at the junction
pub const TURN_CREEP_SPEED: f32 = -0.5;

/// Chance per tick that the spawner attempts to place a vehicle
pub const SPAWN_PROBABILITY: f64 = 0.02;

/// Shortest time a light holds its state, in whole seconds
pub const LIGHT_INTERVAL_MIN_SECS: u64 = 3;

/// Longest time a light holds its state, in whole seconds
pub const LIGHT_INTERVAL_MAX_SECS: u64 = 7;

/// Frame rate the render loop aims for
pub const TARGET_FRAME_RATE: u32 = 165;
