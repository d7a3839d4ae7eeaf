//! Trash Rush - a conveyor belt sorting arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, spawning, difficulty, rules, drag interaction)
//! - `platform`: Game thread, frame clock and demo auto-sorter
//! - `renderer`: Presentation boundary (frame snapshots, HUD, presenters)
//! - `audio`: Fire-and-forget sound cues
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Currency the player starts every session with
    pub const INITIAL_BALANCE: i32 = 10;
    /// Belt speed at level 1 (pixels/s)
    pub const INITIAL_BELT_SPEED: f32 = 120.0;
    /// Seconds between spawns at level 1
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.0;
    /// Spawn interval never drops below this
    pub const MIN_SPAWN_INTERVAL: f32 = 0.5;
    /// Spawn interval shrinks by this much per level
    pub const SPAWN_INTERVAL_STEP: f32 = 0.5;
    /// Belt speed grows by level² times this
    pub const BELT_SPEED_GROWTH: f32 = 4.0;
    /// Seconds of play per difficulty level
    pub const LEVEL_DURATION: f32 = 30.0;

    /// Height of the moving belt band (pixels)
    pub const BELT_HEIGHT: f32 = 450.0;
    /// Height of the conveyor frame above and below the belt
    pub const BELT_FRAME_HEIGHT: f32 = 40.0;
    /// Belt texture tile width relative to belt height
    pub const BELT_TILE_ASPECT: f32 = 2.0;
    /// Receptacle width relative to its height
    pub const RECEPTACLE_ASPECT: f32 = 0.75;
    /// Horizontal gap between receptacles, relative to receptacle width
    pub const RECEPTACLE_PADDING: f32 = 0.3;

    /// Live item cap
    pub const MAX_ITEMS: usize = 100;
    /// Live particle cap (oldest dropped first)
    pub const MAX_PARTICLES: usize = 512;

    /// Screen layout fractions
    pub const HEADER_ZONE_FRACTION: f32 = 0.15;
    pub const CONVEYOR_ZONE_FRACTION: f32 = 0.7;

    /// Default play field for headless runs
    pub const DEFAULT_FIELD_WIDTH: f32 = 1920.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 1080.0;

    /// Particle defaults
    pub const PARTICLE_BASE_SIZE: f32 = 10.0;
    /// Particle velocities are expressed per 1/60 s
    pub const PARTICLE_TIME_SCALE: f32 = 60.0;
    pub const PARTICLE_GRAVITY: f32 = 0.1;

    /// Floating message defaults
    pub const MESSAGE_LIFETIME: f32 = 2.0;
    pub const MESSAGE_DRIFT_SPEED: f32 = 50.0;

    /// Shake intensity per remaining second of shake
    pub const SHAKE_DECAY: f32 = 20.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Shortest loop iteration when no frame cap is set (seconds)
    pub const MIN_FRAME_TIME: f32 = 0.001;
}

/// ARGB colors used for feedback effects
pub mod colors {
    pub const WHITE: u32 = 0xFFFF_FFFF;
    pub const RED: u32 = 0xFFFF_0000;
    pub const GREEN: u32 = 0xFF00_FF00;
    pub const YELLOW: u32 = 0xFFFF_FF00;
    pub const GRAY: u32 = 0xFF88_8888;

    /// Replace the alpha channel of `color` with `alpha` in [0, 1]
    #[inline]
    pub fn with_alpha(color: u32, alpha: f32) -> u32 {
        let a = (alpha.clamp(0.0, 1.0) * 255.0) as u32;
        (a << 24) | (color & 0x00FF_FFFF)
    }
}
