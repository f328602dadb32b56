//! default tuning – every value here is only a default for `WorldConfig`
use std::ops::RangeInclusive;

/// -------- tiles & terrain --------
pub const TILE_WIDTH: f32          = 64.0;
pub const INITIAL_COLUMNS: usize   = 200;
pub const CHUNK_COLUMNS: usize     = 80;
pub const BASE_HEIGHT: i32         = 180;
pub const MAX_STEP: i32            = 12;
pub const JITTER: i32              = 3;
pub const MIN_HEIGHT: i32          = 40;
pub const MAX_HEIGHT: i32          = 360;

/// ramps
pub const RAMP_CHANCE: f64                   = 0.08;
pub const RAMP_LENGTH: RangeInclusive<usize> = 6..=18;
pub const RAMP_DELTA: RangeInclusive<i32>    = 20..=90;
pub const RAMP_CLIMB_BIAS: f64               = 0.6;

/// -------- spawning --------
pub const SPAWN_START_COLUMN: usize     = 10;
pub const CURRENCY_CHANCE: f64          = 0.12;
pub const FUEL_CHANCE: f64              = 0.06;
pub const BOOST_CHANCE: f64             = 0.015;
pub const CURRENCY_MIN_SEPARATION: usize = 2;
pub const PICKUP_MIN_SEPARATION: usize  = 4;
pub const DECORATION_CHANCE: f64        = 0.10;
pub const DECORATION_MIN_SEPARATION: usize = 6;
pub const COLLECTIBLE_CLEARANCE: f32    = 60.0;
pub const COLLECTIBLE_SIZE: f32         = 36.0;

/// -------- vehicle --------
pub const FUEL_MAX: f32              = 100.0;
pub const FUEL_DECAY_PER_SEC: f32    = 2.0;
pub const FUEL_PICKUP: f32           = 30.0;
pub const BOOST_DURATION: f32        = 6.0;
pub const BOOST_MULTIPLIER: f32      = 1.8;
pub const BOOST_FUEL_MULTIPLIER: f32 = 1.5;
pub const MAX_SPEED: f32             = 420.0;
pub const ACCELERATION: f32          = 900.0;
pub const BRAKE: f32                 = 1400.0;
pub const FRICTION: f32              = 0.9;
pub const REVERSE_CAP: f32           = 0.3;   // fraction of max speed
pub const GRAVITY: f32               = -1200.0;
pub const AIR_CONTROL: f32           = 0.35;
pub const GROUND_EPSILON: f32        = 1.0;
pub const VEHICLE_WIDTH: f32         = 96.0;
pub const VEHICLE_HEIGHT: f32        = 64.0;
pub const START_X: f32               = 150.0;

/// -------- camera & streaming --------
pub const SCREEN_X: f32          = 400.0;
pub const CAMERA_LEAD: f32       = 200.0;
pub const CAMERA_SMOOTHING: f32  = 6.0;
pub const VIEW_WIDTH: f32        = 1000.0;
pub const LOOK_AHEAD_COLUMNS: usize = 212;
pub const CULL_MARGIN: f32       = 300.0;
