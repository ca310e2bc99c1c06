//! Asteroid destruction, splitting and points

use super::Services;
use super::director::start_level;
use super::state::{Asteroid, AsteroidSize, GameState};
use crate::audio::SoundEffect;
use crate::persistence::save_or_warn;

/// Pieces a destroyed asteroid breaks into
pub const SPLIT_CHILDREN: usize = 2;

/// What a destruction did to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destruction {
    pub size: AsteroidSize,
    pub points: u32,
    /// Children pushed to the end of the asteroid list
    pub children: usize,
    /// The belt was emptied and the next level started
    pub level_cleared: bool,
}

/// Destroy the asteroid at `index`.
///
/// Removal keeps the order of the remaining asteroids; children are appended.
/// Clearing the belt advances the level, which rebuilds the asteroid list, so
/// callers iterating over asteroids must stop when `level_cleared` is set.
pub fn destroy_asteroid(state: &mut GameState, index: usize, services: &mut Services) -> Destruction {
    let roid = state.asteroids.remove(index);

    let mut children = 0;
    if let Some(child) = roid.size.split() {
        for _ in 0..SPLIT_CHILDREN {
            let piece = Asteroid::new(&mut state.rng, roid.pos, child, state.level, &state.tuning);
            state.asteroids.push(piece);
        }
        children = SPLIT_CHILDREN;
    }

    let points = roid.size.points(&state.tuning);
    award_points(state, points, services);
    services.audio.play(SoundEffect::Hit);

    state.asteroids_left = state.asteroids_left.saturating_sub(1);
    state.music_ratio = if state.asteroids_left == 0 {
        1.0
    } else {
        state.asteroids_left as f32 / state.asteroids_total.max(1) as f32
    };
    services.audio.music().set_asteroid_ratio(state.music_ratio);

    log::debug!(
        "Destroyed {:?} asteroid at ({:.0}, {:.0}), {} left",
        roid.size,
        roid.pos.x,
        roid.pos.y,
        state.asteroids_left
    );

    let level_cleared = state.asteroids.is_empty();
    if level_cleared {
        state.level += 1;
        start_level(state, services);
    }

    Destruction {
        size: roid.size,
        points,
        children,
        level_cleared,
    }
}

/// Add points, writing a new high score through to the store
pub fn award_points(state: &mut GameState, points: u32, services: &mut Services) {
    state.score = state.score.saturating_add(points);
    if state.score > state.high_score {
        state.high_score = state.score;
        save_or_warn(services.scores, state.high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::{Played, plays};
    use crate::persistence::HighScoreStore;
    use crate::sim::testing::{Harness, started};

    #[test]
    fn test_split_chain() {
        let mut h = Harness::new();
        let mut state = started(1, &mut h);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].radius(), 50.0);

        let d = destroy_asteroid(&mut state, 0, &mut h.services());
        assert_eq!(d.points, 20);
        assert_eq!(d.children, 2);
        assert_eq!(state.score, 20);
        assert!(state.asteroids.iter().all(|a| a.radius() == 25.0));

        let d = destroy_asteroid(&mut state, 0, &mut h.services());
        assert_eq!(d.points, 50);
        assert_eq!(state.score, 70);
        assert_eq!(state.asteroids.len(), 3);
        assert_eq!(state.asteroids[0].radius(), 25.0);
        assert!(state.asteroids[1..].iter().all(|a| a.radius() == 13.0));

        let small = state.asteroids.len() - 1;
        let d = destroy_asteroid(&mut state, small, &mut h.services());
        assert_eq!(d.points, 100);
        assert_eq!(d.children, 0);
        assert_eq!(state.score, 170);
        assert_eq!(state.asteroids.len(), 2);
    }

    #[test]
    fn test_children_spawn_at_parent() {
        let mut h = Harness::new();
        let mut state = started(2, &mut h);
        let pos = state.asteroids[0].pos;
        destroy_asteroid(&mut state, 0, &mut h.services());
        assert!(state.asteroids.iter().all(|a| a.pos == pos));
    }

    #[test]
    fn test_removal_preserves_order() {
        let mut h = Harness::new();
        let mut state = started(3, &mut h);
        destroy_asteroid(&mut state, 0, &mut h.services());
        destroy_asteroid(&mut state, 0, &mut h.services());
        // [medium, small, small]
        let tail: Vec<_> = state.asteroids[1..].iter().map(|a| a.offsets().to_vec()).collect();
        destroy_asteroid(&mut state, 0, &mut h.services());
        let kept: Vec<_> = state.asteroids[..2].iter().map(|a| a.offsets().to_vec()).collect();
        assert_eq!(kept, tail);
    }

    #[test]
    fn test_high_score_written_through() {
        let mut h = Harness::new();
        h.store.value = Some(60);
        let mut state = started(4, &mut h);
        assert_eq!(state.high_score, 60);

        destroy_asteroid(&mut state, 0, &mut h.services());
        assert_eq!(state.high_score, 60, "20 points does not beat 60");
        assert_eq!(h.store.saves, 0);

        destroy_asteroid(&mut state, 0, &mut h.services());
        assert_eq!(state.high_score, 70);
        assert_eq!(h.store.load().unwrap(), 70);
        assert_eq!(h.store.saves, 1);
    }

    #[test]
    fn test_hit_cue_and_music_ratio() {
        let mut h = Harness::new();
        let mut state = started(5, &mut h);
        h.log.borrow_mut().clear();

        destroy_asteroid(&mut state, 0, &mut h.services());
        assert_eq!(plays(&h.log, SoundEffect::Hit), 1);
        assert_eq!(state.asteroids_left, 6);
        let expected = 6.0 / 7.0;
        assert!((state.music_ratio - expected).abs() < 1e-6);
        assert!(h.log.borrow().contains(&Played::Ratio(state.music_ratio)));
    }

    #[test]
    fn test_clearing_belt_advances_level() {
        let mut h = Harness::new();
        let mut state = started(6, &mut h);
        let mut guard = 0;
        loop {
            let last = state.asteroids.len() - 1;
            let d = destroy_asteroid(&mut state, last, &mut h.services());
            guard += 1;
            assert!(guard <= 7, "one large asteroid breaks into seven pieces");
            if d.level_cleared {
                break;
            }
        }
        assert_eq!(guard, 7);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 20 + 2 * 50 + 4 * 100);
        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(state.asteroids_total, 14);
        assert_eq!(state.asteroids_left, 14);
        assert_eq!(state.banner.text, "Level 2");
    }
}
