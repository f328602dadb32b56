//! startup configuration
//!
//! `WorldConfig` is built once (defaults, optionally overridden by a TOML
//! file) and handed by reference to every component constructor. Nothing in
//! the core mutates it afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/* ===========================================================
   sections
   =========================================================== */
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    pub tile_width: f32,
    pub initial_columns: usize,
    pub chunk_columns: usize,
    pub base_height: i32,
    /// slope limiter between adjacent columns
    pub max_step: i32,
    pub jitter: i32,
    pub min_height: i32,
    pub max_height: i32,
    pub ramp_chance: f64,
    pub ramp_length_min: usize,
    pub ramp_length_max: usize,
    pub ramp_delta_min: i32,
    pub ramp_delta_max: i32,
    /// probability that a ramp climbs rather than descends
    pub ramp_climb_bias: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_width: TILE_WIDTH,
            initial_columns: INITIAL_COLUMNS,
            chunk_columns: CHUNK_COLUMNS,
            base_height: BASE_HEIGHT,
            max_step: MAX_STEP,
            jitter: JITTER,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,
            ramp_chance: RAMP_CHANCE,
            ramp_length_min: *RAMP_LENGTH.start(),
            ramp_length_max: *RAMP_LENGTH.end(),
            ramp_delta_min: *RAMP_DELTA.start(),
            ramp_delta_max: *RAMP_DELTA.end(),
            ramp_climb_bias: RAMP_CLIMB_BIAS,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub start_column: usize,
    pub currency_chance: f64,
    pub currency_min_separation: usize,
    pub fuel_chance: f64,
    pub boost_chance: f64,
    /// shared by every interactive category
    pub pickup_min_separation: usize,
    pub decoration_chance: f64,
    pub decoration_min_separation: usize,
    pub collectible_clearance: f32,
    pub collectible_size: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            start_column: SPAWN_START_COLUMN,
            currency_chance: CURRENCY_CHANCE,
            currency_min_separation: CURRENCY_MIN_SEPARATION,
            fuel_chance: FUEL_CHANCE,
            boost_chance: BOOST_CHANCE,
            pickup_min_separation: PICKUP_MIN_SEPARATION,
            decoration_chance: DECORATION_CHANCE,
            decoration_min_separation: DECORATION_MIN_SEPARATION,
            collectible_clearance: COLLECTIBLE_CLEARANCE,
            collectible_size: COLLECTIBLE_SIZE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct VehicleConfig {
    pub fuel_max: f32,
    pub fuel_decay: f32,
    pub fuel_pickup: f32,
    pub boost_duration: f32,
    pub boost_multiplier: f32,
    pub boost_fuel_multiplier: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub brake: f32,
    /// fraction of velocity kept after one second without input
    pub friction: f32,
    pub reverse_cap: f32,
    pub gravity: f32,
    pub air_control: f32,
    pub ground_epsilon: f32,
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            fuel_max: FUEL_MAX,
            fuel_decay: FUEL_DECAY_PER_SEC,
            fuel_pickup: FUEL_PICKUP,
            boost_duration: BOOST_DURATION,
            boost_multiplier: BOOST_MULTIPLIER,
            boost_fuel_multiplier: BOOST_FUEL_MULTIPLIER,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            brake: BRAKE,
            friction: FRICTION,
            reverse_cap: REVERSE_CAP,
            gravity: GRAVITY,
            air_control: AIR_CONTROL,
            ground_epsilon: GROUND_EPSILON,
            width: VEHICLE_WIDTH,
            height: VEHICLE_HEIGHT,
            start_x: START_X,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// screen x of the point `lead` units ahead of the vehicle
    pub screen_x: f32,
    pub lead: f32,
    pub smoothing: f32,
    pub view_width: f32,
    pub look_ahead_columns: usize,
    pub cull_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            screen_x: SCREEN_X,
            lead: CAMERA_LEAD,
            smoothing: CAMERA_SMOOTHING,
            view_width: VIEW_WIDTH,
            look_ahead_columns: LOOK_AHEAD_COLUMNS,
            cull_margin: CULL_MARGIN,
        }
    }
}

/* ===========================================================
   root
   =========================================================== */
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// `None` → fresh entropy per session and per restart
    pub seed: Option<u64>,
    pub terrain: TerrainConfig,
    pub spawn: SpawnConfig,
    pub vehicle: VehicleConfig,
    pub camera: CameraConfig,
}

impl WorldConfig {
    /// defaults with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        let s = &self.spawn;
        let v = &self.vehicle;
        let c = &self.camera;

        ensure(t.tile_width > 0.0, "terrain.tile_width must be positive")?;
        ensure(t.chunk_columns > 0, "terrain.chunk_columns must be positive")?;
        ensure(t.initial_columns >= 2, "terrain.initial_columns must be at least 2")?;
        ensure(t.max_step > 0, "terrain.max_step must be positive")?;
        ensure(t.jitter >= 0, "terrain.jitter must not be negative")?;
        ensure(t.min_height <= t.max_height, "terrain.min_height exceeds max_height")?;
        ensure(
            (t.min_height..=t.max_height).contains(&t.base_height),
            "terrain.base_height outside [min_height, max_height]",
        )?;
        ensure(
            t.ramp_length_min >= 2 && t.ramp_length_min <= t.ramp_length_max,
            "terrain ramp length range is empty or shorter than 2",
        )?;
        ensure(
            t.ramp_delta_min >= 0 && t.ramp_delta_min <= t.ramp_delta_max,
            "terrain ramp delta range is empty or negative",
        )?;
        for (name, p) in [
            ("terrain.ramp_chance", t.ramp_chance),
            ("terrain.ramp_climb_bias", t.ramp_climb_bias),
            ("spawn.currency_chance", s.currency_chance),
            ("spawn.fuel_chance", s.fuel_chance),
            ("spawn.boost_chance", s.boost_chance),
            ("spawn.decoration_chance", s.decoration_chance),
        ] {
            ensure((0.0..=1.0).contains(&p), &format!("{name} must lie in [0, 1]"))?;
        }
        ensure(s.collectible_size > 0.0, "spawn.collectible_size must be positive")?;
        ensure(v.fuel_max > 0.0, "vehicle.fuel_max must be positive")?;
        ensure(v.fuel_decay >= 0.0, "vehicle.fuel_decay must not be negative")?;
        ensure(v.max_speed > 0.0, "vehicle.max_speed must be positive")?;
        ensure(
            v.friction > 0.0 && v.friction <= 1.0,
            "vehicle.friction must lie in (0, 1]",
        )?;
        ensure(v.reverse_cap >= 0.0, "vehicle.reverse_cap must not be negative")?;
        ensure(v.boost_multiplier >= 1.0, "vehicle.boost_multiplier must be at least 1")?;
        ensure(v.ground_epsilon >= 0.0, "vehicle.ground_epsilon must not be negative")?;
        ensure(v.width > 0.0 && v.height > 0.0, "vehicle box must have positive size")?;
        ensure(c.view_width > 0.0, "camera.view_width must be positive")?;
        ensure(c.smoothing >= 0.0, "camera.smoothing must not be negative")?;
        Ok(())
    }
}

#[inline]
fn ensure(cond: bool, msg: &str) -> Result<(), ConfigError> {
    if cond {
        Ok(())
    } else {
        Err(ConfigError::Invalid(msg.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = WorldConfig::from_toml_str(
            r#"
            seed = 7

            [terrain]
            max_step = 8

            [vehicle]
            fuel_decay = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.terrain.max_step, 8);
        assert_eq!(cfg.terrain.tile_width, TILE_WIDTH);
        assert_eq!(cfg.vehicle.fuel_decay, 5.0);
        assert_eq!(cfg.spawn, SpawnConfig::default());
    }

    #[test]
    fn rejects_bad_probability() {
        let err = WorldConfig::from_toml_str("[spawn]\ncurrency_chance = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("currency_chance")));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = WorldConfig::from_toml_str("[terrain\nmax_step = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WorldConfig::load("/definitely/not/here/hill_drive.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
