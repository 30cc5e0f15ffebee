//! # Configuration
//!
//! Runtime settings read from a JSON file. Every field is optional: missing
//! fields take their defaults, unknown fields are rejected, and a file that
//! cannot be read or parsed is logged and replaced by the defaults.

use std::{fs, io, path::Path};

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::engine_state::{EVICTION_MARGIN, RENDER_DISTANCE};

/// Top-level world settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Terrain seed. A random one is drawn when absent.
    pub seed: Option<u32>,
    /// Chunks generated and meshed around the player (Chebyshev radius).
    pub render_distance: i32,
    /// Extra chunks kept beyond the render distance before eviction.
    pub eviction_margin: i32,
    /// World XZ column the player spawns in.
    pub spawn: [f32; 2],
    /// Radians of view rotation per pixel of mouse movement.
    pub look_sensitivity: f32,
    /// Player physics.
    pub movement: MovementConfig,
    /// Block picking.
    pub pick: PickConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: None,
            render_distance: RENDER_DISTANCE,
            eviction_margin: EVICTION_MARGIN,
            spawn: [0.0, 0.0],
            look_sensitivity: 0.002,
            movement: MovementConfig::default(),
            pick: PickConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a JSON document, logging any error and falling back to the defaults.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                error!("failed to parse config: {}", err);
                Self::default()
            }
        }
    }

    /// Reads the config at `path`, using the defaults when it is missing or broken.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => {
                info!("found config at {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                info!("{} not found, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                error!("failed to read config: {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The configured seed, or a fresh random one.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| fastrand::u32(..))
    }
}

/// Player physics constants. Speeds are in blocks per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    /// Ground friction factor.
    pub friction: f32,
    /// Target speed while grounded.
    pub ground_max_speed: f32,
    /// Acceleration factor while grounded.
    pub ground_accelerate: f32,
    /// Target speed while airborne.
    pub air_max_speed: f32,
    /// Acceleration factor while airborne.
    pub air_accelerate: f32,
    /// Vertical speed lost every tick.
    pub gravity: f32,
    /// Vertical speed set by a jump.
    pub jump_velocity: f32,
    /// Speed in fly mode.
    pub fly_speed: f32,
    /// Width (and depth) of the player's box.
    pub player_width: f32,
    /// Height of the player's box.
    pub player_height: f32,
    /// Eye height above the feet.
    pub eye_height: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        MovementConfig {
            friction: 0.2,
            ground_max_speed: 0.3,
            ground_accelerate: 0.2,
            air_max_speed: 0.02,
            air_accelerate: 1.3,
            gravity: 0.01,
            jump_velocity: 0.2,
            fly_speed: 0.5,
            player_width: 0.6,
            player_height: 1.8,
            eye_height: 1.6,
        }
    }
}

/// Ray-march settings for block picking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickConfig {
    /// Distance between samples.
    pub step: f32,
    /// Maximum reach.
    pub max_distance: f32,
}

impl Default for PickConfig {
    fn default() -> Self {
        PickConfig {
            step: 0.1,
            max_distance: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = WorldConfig::from_json(r#"{ "seed": 7, "movement": { "gravity": 0.02 } }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.render_distance, RENDER_DISTANCE);
        assert_eq!(config.movement.gravity, 0.02);
        assert_eq!(config.movement.friction, 0.2);
        assert_eq!(config.pick, PickConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(WorldConfig::from_json(r#"{ "sead": 7 }"#).is_err());
        assert!(WorldConfig::from_json(r#"{ "pick": { "range": 3 } }"#).is_err());
    }

    #[test]
    fn broken_json_falls_back_to_defaults() {
        assert_eq!(WorldConfig::from_json_or_default("{ not json"), WorldConfig::default());
    }

    #[test]
    fn json_survives_serialization() {
        let config = WorldConfig {
            seed: Some(99),
            spawn: [12.5, -3.0],
            ..WorldConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(WorldConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = WorldConfig::load(Path::new("definitely/not/a/config.json"));
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn explicit_seed_is_used() {
        let config = WorldConfig {
            seed: Some(1234),
            ..WorldConfig::default()
        };
        assert_eq!(config.resolved_seed(), 1234);
    }
}
