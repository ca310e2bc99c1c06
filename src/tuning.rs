//! Data-driven game balance
//!
//! Every knob the simulation reads lives here. Rates are per second; the
//! tick loop multiplies them by the timestep. Durations are seconds and get
//! converted to tick counts with [`crate::ticks_for`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a tuning file
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to read tuning file")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    /// Ship height in pixels (collision radius is half of this)
    pub ship_size: f32,
    /// Rotation speed (degrees per second)
    pub turn_speed: f32,
    /// Thrust acceleration (pixels per second squared)
    pub ship_thrust: f32,
    /// Velocity decay rate per second when not thrusting (0 = none)
    pub friction: f32,
    /// Explosion duration (seconds)
    pub ship_explode_dur: f32,
    /// Duration of one blink during invincibility (seconds)
    pub ship_blink_dur: f32,
    /// Invincibility after spawning (seconds)
    pub ship_inv_dur: f32,

    // === Lasers ===
    /// Max lasers on screen at once
    pub laser_max: usize,
    /// Laser speed (pixels per second)
    pub laser_speed: f32,
    /// Max travel distance as a fraction of screen width
    pub laser_dist: f32,
    /// Laser explosion duration (seconds)
    pub laser_explode_dur: f32,

    // === Asteroids ===
    /// Large asteroids in the level 0 belt
    pub asteroids_num: u32,
    /// Jaggedness of the silhouette (0 = none, 1 = lots)
    pub asteroids_jag: f32,
    /// Max starting speed (pixels per second)
    pub asteroids_speed: f32,
    /// Base size in pixels; a large asteroid has radius ceil(size / 2)
    pub asteroids_size: u32,
    /// Average vertex count
    pub asteroids_vert: u32,
    /// Speed gained per level (fraction of base speed)
    pub level_speed_step: f32,

    // === Scoring ===
    pub points_large: u32,
    pub points_medium: u32,
    pub points_small: u32,

    // === Flow ===
    /// Starting lives
    pub game_lives: u32,
    /// Banner fade time (seconds)
    pub text_fade_time: f32,
    /// Fade the game over banner and start a new game when it is gone
    pub auto_restart: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_size: 30.0,
            turn_speed: 360.0,
            ship_thrust: 300.0,
            friction: 0.7,
            ship_explode_dur: 0.3,
            ship_blink_dur: 0.1,
            ship_inv_dur: 3.0,

            laser_max: 10,
            laser_speed: 500.0,
            laser_dist: 0.6,
            laser_explode_dur: 0.1,

            asteroids_num: 1,
            asteroids_jag: 0.3,
            asteroids_speed: 50.0,
            asteroids_size: 100,
            asteroids_vert: 10,
            level_speed_step: 0.1,

            points_large: 20,
            points_medium: 50,
            points_small: 100,

            game_lives: 3,
            text_fade_time: 2.5,
            auto_restart: true,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.ship_size <= 0.0 {
            return Err(TuningError::Invalid("ship_size must be positive"));
        }
        if self.ship_blink_dur <= 0.0 {
            return Err(TuningError::Invalid("ship_blink_dur must be positive"));
        }
        if self.asteroids_size < 8 {
            return Err(TuningError::Invalid("asteroids_size must be at least 8"));
        }
        if self.text_fade_time <= 0.0 {
            return Err(TuningError::Invalid("text_fade_time must be positive"));
        }
        if !(0.0..=1.0).contains(&self.asteroids_jag) {
            return Err(TuningError::Invalid("asteroids_jag must be within 0..=1"));
        }
        Ok(())
    }

    /// Collision radius of the ship
    #[inline]
    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    /// Rotation rate in radians per second
    #[inline]
    pub fn turn_rate(&self) -> f32 {
        self.turn_speed.to_radians()
    }

    /// Number of blink cycles covering the invincibility window
    pub fn blink_cycles(&self) -> u32 {
        crate::ticks_for(self.ship_inv_dur, 1.0 / self.ship_blink_dur)
    }

    /// Speed multiplier for asteroids spawned on `level`
    #[inline]
    pub fn level_multiplier(&self, level: u32) -> f32 {
        1.0 + self.level_speed_step * level as f32
    }

    /// Minimum distance between a fresh asteroid and the ship
    pub fn belt_safe_distance(&self) -> f32 {
        self.asteroids_size as f32 * 2.0 + self.ship_radius()
    }
}
