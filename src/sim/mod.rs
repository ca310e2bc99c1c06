//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, destructive passes in reverse)
//! - No rendering or platform dependencies
//!
//! Side effects (sound, high score storage) go through [`Services`], which
//! the caller lends to every update.

pub mod clock;
pub mod collision;
pub mod director;
pub mod scoring;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::{laser_hit, ship_asteroid_hit};
pub use director::{create_asteroid_belt, game_over, new_game, start_level};
pub use scoring::{Destruction, destroy_asteroid};
pub use state::{Asteroid, AsteroidSize, Banner, GameState, Laser, Ship};
pub use tick::{Intent, TickInput, tick};

use crate::audio::Audio;
use crate::persistence::HighScoreStore;

/// Collaborators borrowed by the simulation for one update
pub struct Services<'a> {
    pub audio: &'a mut Audio,
    pub scores: &'a mut dyn HighScoreStore,
}

impl<'a> Services<'a> {
    pub fn new(audio: &'a mut Audio, scores: &'a mut dyn HighScoreStore) -> Self {
        Self { audio, scores }
    }
}
