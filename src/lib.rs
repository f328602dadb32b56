//! hill_drive – procedural world engine for a side‑scrolling driving game
//!
//! The core is headless: feed `DriveWorld::tick` a delta time and the held
//! controls, read terrain heights, vehicle state and visible entities back.
//! The Bevy binary in `main.rs` is only a presentation layer on top.

pub mod camera;
pub mod config;
pub mod constants;
pub mod entities;
pub mod spawn;
pub mod terrain;
pub mod vehicle;
pub mod world;

pub use config::{ConfigError, WorldConfig};
pub use entities::{DecorationVariant, EntityKind, PickupKind, VisibleEntity};
pub use vehicle::{Controls, VehicleState};
pub use world::{DriveWorld, WorldEvent};
