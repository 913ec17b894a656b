//! Intersection Simulation Library
//!
//! Simulates vehicles crossing a four-way signalized junction. The simulation
//! core runs independently or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
