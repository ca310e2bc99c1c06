//! Fixed timestep driver
//!
//! Owns the game state together with its collaborators and turns variable
//! frame times into whole simulation ticks.

use glam::Vec2;

use super::Services;
use super::director::new_game;
use super::state::GameState;
use super::tick::{Intent, TickInput, tick};
use crate::audio::Audio;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::HighScoreStore;
use crate::tuning::Tuning;

/// Game state plus the services it runs against
pub struct Clock {
    state: GameState,
    audio: Audio,
    store: Box<dyn HighScoreStore>,
    accumulator: f32,
    /// Intents waiting for the next tick
    pending: Vec<Intent>,
}

impl Clock {
    /// Build a clock and start a new game
    pub fn new(
        seed: u64,
        width: f32,
        height: f32,
        tuning: Tuning,
        audio: Audio,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let mut clock = Self {
            state: GameState::new(seed, width, height, tuning),
            audio,
            store,
            accumulator: 0.0,
            pending: Vec::new(),
        };
        clock.restart();
        clock
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Queue an intent for the next tick
    pub fn push_intent(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    /// Run exactly one tick with the queued intents
    pub fn step(&mut self) {
        let input = TickInput {
            intents: std::mem::take(&mut self.pending),
        };
        let mut services = Services::new(&mut self.audio, self.store.as_mut());
        tick(&mut self.state, &input, &mut services, SIM_DT);
    }

    /// Feed real elapsed time; returns the number of ticks run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Start over immediately
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.pending.clear();
        let mut services = Services::new(&mut self.audio, self.store.as_mut());
        new_game(&mut self.state, &mut services);
    }

    /// Change the arena size, keeping everything inside it
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        log::debug!("Arena resized to {width}x{height}");
        let state = &mut self.state;
        state.width = width;
        state.height = height;
        let max = Vec2::new(width, height);
        state.ship.pos = state.ship.pos.clamp(Vec2::ZERO, max);
        for roid in &mut state.asteroids {
            roid.pos = roid.pos.clamp(Vec2::ZERO, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use crate::persistence::MemoryStore;

    fn clock(seed: u64) -> Clock {
        Clock::new(
            seed,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Tuning::default(),
            Audio::silent(),
            Box::new(MemoryStore::with_score(500)),
        )
    }

    #[test]
    fn test_new_clock_starts_game() {
        let clock = clock(1);
        let state = clock.state();
        assert_eq!(state.level, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.high_score, 500);
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_advance_accumulates() {
        let mut clock = clock(2);
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert_eq!(clock.state().time_ticks, 1);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut clock = clock(3);
        // A long stall is clamped, then capped
        let ran = clock.advance(5.0);
        assert!(ran <= MAX_SUBSTEPS);
        assert_eq!(clock.state().time_ticks, ran as u64);
    }

    #[test]
    fn test_intents_apply_on_next_tick() {
        let mut clock = clock(4);
        clock.push_intent(Intent::Fire);
        assert!(clock.state().ship.lasers.is_empty());
        clock.step();
        assert_eq!(clock.state().ship.lasers.len(), 1);
        clock.push_intent(Intent::Fire);
        clock.step();
        assert_eq!(clock.state().ship.lasers.len(), 1);
    }

    #[test]
    fn test_resize_keeps_entities_inside() {
        let mut clock = clock(5);
        clock.resize(400.0, 300.0);
        let state = clock.state();
        assert_eq!(state.width, 400.0);
        assert!(state.asteroids.iter().all(|a| a.pos.x <= 400.0 && a.pos.y <= 300.0));
        assert!(state.ship.pos.x <= 400.0 && state.ship.pos.y <= 300.0);
    }
}
