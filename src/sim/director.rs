//! Level and round flow: belts, level starts, game over, new games

use glam::Vec2;
use rand::Rng;

use super::Services;
use super::state::{Asteroid, AsteroidSize, GameState};
use crate::audio::SoundEffect;
use crate::dist_between_points;
use crate::persistence::load_or_default;

/// Pieces one large asteroid yields over its lifetime (1 + 2 + 4)
pub const PIECES_PER_LARGE: u32 = 7;

/// Spawn rolls per asteroid before settling for the farthest point found
const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Fill the belt with large asteroids for the current level.
///
/// None spawn within [`Tuning::belt_safe_distance`](crate::Tuning::belt_safe_distance)
/// of the ship unless the arena is too small to allow it.
pub fn create_asteroid_belt(state: &mut GameState) {
    let count = state.tuning.asteroids_num + state.level;
    state.asteroids.clear();
    state.asteroids_total = count * PIECES_PER_LARGE;
    state.asteroids_left = state.asteroids_total;

    for _ in 0..count {
        let pos = spawn_point(state);
        let roid = Asteroid::new(&mut state.rng, pos, AsteroidSize::Large, state.level, &state.tuning);
        state.asteroids.push(roid);
    }
}

fn spawn_point(state: &mut GameState) -> Vec2 {
    let safe = state.tuning.belt_safe_distance();
    let ship = state.ship.pos;
    let mut best = Vec2::ZERO;
    let mut best_dist = f32::NEG_INFINITY;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Vec2::new(
            (state.rng.random::<f32>() * state.width).floor(),
            (state.rng.random::<f32>() * state.height).floor(),
        );
        let dist = dist_between_points(ship, pos);
        if dist >= safe {
            return pos;
        }
        if dist > best_dist {
            best = pos;
            best_dist = dist;
        }
    }

    log::warn!(
        "No asteroid spawn point clear of the ship in a {}x{} arena, using one {best_dist:.0}px away",
        state.width,
        state.height
    );
    best
}

/// Show the level banner and build a fresh belt
pub fn start_level(state: &mut GameState, services: &mut Services) {
    state.music_ratio = 1.0;
    services.audio.music().set_asteroid_ratio(1.0);
    state.banner.show(format!("Level {}", state.level + 1), true);
    create_asteroid_belt(state);
    log::info!(
        "Level {} started with {} asteroids",
        state.level + 1,
        state.asteroids.len()
    );
}

/// Last life lost
pub fn game_over(state: &mut GameState) {
    state.ship.dead = true;
    let fading = state.tuning.auto_restart;
    state.banner.show("Game Over", fading);
    log::info!(
        "Game over at level {} with {} points (best {})",
        state.level + 1,
        state.score,
        state.high_score
    );
}

/// Reset lives, level and score and start level 1
pub fn new_game(state: &mut GameState, services: &mut Services) {
    state.level = 0;
    state.lives = state.tuning.game_lives;
    state.score = 0;
    // A store that cannot load must not forget the best score seen so far
    state.high_score = load_or_default(services.scores).max(state.high_score);
    state.respawn_ship();
    if state.thrust_sounding {
        services.audio.stop(SoundEffect::Thrust);
        state.thrust_sounding = false;
    }
    services.audio.music().reset();
    log::info!("New game (high score {})", state.high_score);
    start_level(state, services);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Audio;
    use crate::audio::testing::Played;
    use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use crate::persistence::{HighScoreStore, StorageError};
    use crate::sim::scoring::destroy_asteroid;
    use crate::sim::testing::{Harness, started};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_level_zero_belt() {
        let mut h = Harness::new();
        let state = started(11, &mut h);
        assert_eq!(state.level, 0);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids_total, 7);
        assert_eq!(state.asteroids_left, 7);
        assert_eq!(state.lives, 3);
        assert_eq!(state.banner.text, "Level 1");
        assert_eq!(state.banner.alpha, 1.0);
        assert!(state.banner.fading);
    }

    #[test]
    fn test_next_level_has_one_more_asteroid() {
        let mut h = Harness::new();
        let mut state = started(12, &mut h);
        state.level = 4;
        start_level(&mut state, &mut h.services());
        assert_eq!(state.asteroids.len(), 5);
        assert_eq!(state.asteroids_total, 35);
        assert_eq!(state.banner.text, "Level 5");
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    }

    #[test]
    fn test_game_over_banner() {
        let mut h = Harness::new();
        let mut state = started(13, &mut h);
        game_over(&mut state);
        assert!(state.ship.dead);
        assert_eq!(state.banner.text, "Game Over");
        assert!(state.banner.fading);

        let tuning = Tuning {
            auto_restart: false,
            ..Tuning::default()
        };
        let mut state = GameState::new(13, DEFAULT_WIDTH, DEFAULT_HEIGHT, tuning);
        new_game(&mut state, &mut h.services());
        game_over(&mut state);
        assert!(!state.banner.fading);
    }

    #[test]
    fn test_new_game_resets_round() {
        let mut h = Harness::new();
        h.store.value = Some(900);
        let mut state = started(14, &mut h);
        state.level = 6;
        state.score = 300;
        state.lives = 0;
        state.ship.dead = true;
        state.thrust_sounding = true;
        h.log.borrow_mut().clear();

        new_game(&mut state, &mut h.services());
        assert_eq!(state.level, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.high_score, 900);
        assert!(!state.ship.dead);
        assert!(!state.thrust_sounding);
        assert_eq!(state.asteroids.len(), 1);
        let log = h.log.borrow();
        assert!(log.contains(&Played::Stop(SoundEffect::Thrust)));
        assert!(log.contains(&Played::Reset));
    }

    #[test]
    fn test_tiny_arena_still_places_belt() {
        let mut h = Harness::new();
        let mut state = GameState::new(15, 100.0, 100.0, Tuning::default());
        new_game(&mut state, &mut h.services());
        assert_eq!(state.asteroids.len(), 1);
    }

    /// Storage that is never reachable
    struct Offline;

    impl HighScoreStore for Offline {
        fn load(&mut self) -> Result<u32, StorageError> {
            Err(StorageError::Unavailable("offline".into()))
        }
        fn save(&mut self, _score: u32) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_new_game_keeps_high_score_without_storage() {
        let mut audio = Audio::silent();
        let mut store = Offline;
        let mut services = Services::new(&mut audio, &mut store);
        let mut state = GameState::new(3, DEFAULT_WIDTH, DEFAULT_HEIGHT, Tuning::default());

        new_game(&mut state, &mut services);
        assert_eq!(state.high_score, 0);
        destroy_asteroid(&mut state, 0, &mut services);
        assert_eq!(state.high_score, 20);

        new_game(&mut state, &mut services);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 20);
    }

    proptest! {
        #[test]
        fn belt_keeps_clear_of_ship(seed in any::<u64>(), level in 0u32..8) {
            let mut h = Harness::new();
            let mut state = started(seed, &mut h);
            state.level = level;
            create_asteroid_belt(&mut state);
            let safe = state.tuning.belt_safe_distance();
            prop_assert_eq!(state.asteroids.len() as u32, 1 + level);
            for roid in &state.asteroids {
                prop_assert!(dist_between_points(roid.pos, state.ship.pos) >= safe);
            }
        }
    }
}
