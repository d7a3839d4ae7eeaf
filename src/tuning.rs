//! Data-driven game balance
//!
//! Every value defaults to its `consts` counterpart, so a tuning file only
//! needs to list what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Currency at session start
    pub starting_balance: i32,
    /// Belt speed at level 1 (pixels/s)
    pub belt_speed: f32,
    /// Growth factor: speed = belt_speed + level² * belt_speed_growth
    pub belt_speed_growth: f32,
    /// Seconds between spawns at level 1
    pub spawn_interval: f32,
    /// Per-level spawn interval reduction
    pub spawn_interval_step: f32,
    /// Floor for the spawn interval
    pub min_spawn_interval: f32,
    /// Seconds per difficulty level
    pub level_duration: f32,
    /// Belt band height (pixels)
    pub belt_height: f32,
    /// Conveyor frame height above/below the belt (pixels)
    pub belt_frame_height: f32,
    /// Belt texture tile width / belt height
    pub belt_tile_aspect: f32,
    /// Receptacle width / height
    pub receptacle_aspect: f32,
    /// Live item cap
    pub max_items: usize,
    /// Live particle cap
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_balance: INITIAL_BALANCE,
            belt_speed: INITIAL_BELT_SPEED,
            belt_speed_growth: BELT_SPEED_GROWTH,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            level_duration: LEVEL_DURATION,
            belt_height: BELT_HEIGHT,
            belt_frame_height: BELT_FRAME_HEIGHT,
            belt_tile_aspect: BELT_TILE_ASPECT,
            receptacle_aspect: RECEPTACLE_ASPECT,
            max_items: MAX_ITEMS,
            max_particles: MAX_PARTICLES,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("spawn_interval", self.spawn_interval),
            ("min_spawn_interval", self.min_spawn_interval),
            ("level_duration", self.level_duration),
            ("belt_height", self.belt_height),
            ("belt_tile_aspect", self.belt_tile_aspect),
            ("receptacle_aspect", self.receptacle_aspect),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(Error::InvalidTuning(format!("{name} must be positive, got {value}")));
            }
        }
        if self.belt_speed < 0.0 || self.belt_frame_height < 0.0 {
            return Err(Error::InvalidTuning(
                "belt_speed and belt_frame_height must not be negative".into(),
            ));
        }
        if self.max_items == 0 {
            return Err(Error::InvalidTuning("max_items must be at least 1".into()));
        }
        if self.starting_balance < 0 {
            return Err(Error::InvalidTuning("starting_balance must not be negative".into()));
        }
        Ok(())
    }

    /// Width of one belt texture tile, used to wrap the scroll offset
    pub fn belt_tile_width(&self) -> f32 {
        self.belt_height * self.belt_tile_aspect
    }
}
