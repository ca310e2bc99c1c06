//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::Services;
use super::collision::{laser_hit, ship_asteroid_hit};
use super::director::{game_over, new_game};
use super::scoring::destroy_asteroid;
use super::state::{GameState, LaserStatus};
use crate::audio::SoundEffect;
use crate::consts::SIM_HZ;
use crate::ticks_for;

/// Player intent, queued by the input layer and consumed by the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Fire a laser (once per press)
    Fire,
    /// Fire released, re-arms the trigger
    FireRelease,
    RotateLeft,
    RotateRight,
    RotateStop,
    ThrustOn,
    ThrustOff,
    /// Start over; only honoured after game over
    Restart,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intents in arrival order
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn new(intents: impl Into<Vec<Intent>>) -> Self {
        Self {
            intents: intents.into(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, services: &mut Services, dt: f32) {
    state.time_ticks += 1;

    apply_intents(state, input, services);

    services.audio.music().tick();

    // Ship motion
    state.ship.apply_thrust(dt, &state.tuning);
    let thrust_wanted = state.ship.thrusting && !state.ship.dead;
    if thrust_wanted != state.thrust_sounding {
        if thrust_wanted {
            services.audio.play(SoundEffect::Thrust);
        } else {
            services.audio.stop(SoundEffect::Thrust);
        }
        state.thrust_sounding = thrust_wanted;
    }
    if !state.ship.is_exploding() {
        state.ship.update_motion(dt);
    }
    state.ship.wrap(state.width, state.height);

    for roid in &mut state.asteroids {
        roid.update(dt, state.width, state.height);
    }

    // Explosion countdown, then blink
    if state.ship.is_exploding() {
        state.ship.explode_ticks -= 1;
        if state.ship.explode_ticks == 0 {
            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                game_over(state);
            } else {
                log::info!("Ship lost, {} lives left", state.lives);
                state.respawn_ship();
            }
        }
    } else {
        state.ship.update_blink(&state.tuning);
    }

    if let Some(index) = ship_asteroid_hit(&state.ship, &state.asteroids) {
        state.ship.explode(&state.tuning);
        services.audio.play(SoundEffect::Explode);
        destroy_asteroid(state, index, services);
    }

    let max_dist = state.laser_max_distance();
    let (width, height) = (state.width, state.height);
    state
        .ship
        .lasers
        .retain_mut(|laser| laser.update(dt, max_dist, width, height) == LaserStatus::Alive);

    laser_asteroid_pass(state, services);

    state.banner.fade(dt, state.tuning.text_fade_time);
    if state.ship.dead && !state.banner.is_visible() {
        new_game(state, services);
    }
}

fn apply_intents(state: &mut GameState, input: &TickInput, services: &mut Services) {
    if state.ship.dead {
        if input.intents.contains(&Intent::Restart) {
            new_game(state, services);
        }
        return;
    }

    for intent in &input.intents {
        let ship = &mut state.ship;
        match intent {
            Intent::Fire => {
                if ship.shoot(&state.tuning) {
                    services.audio.play(SoundEffect::Laser);
                    log::debug!("Laser fired ({} in flight)", ship.lasers.len());
                }
            }
            Intent::FireRelease => ship.can_shoot = true,
            Intent::RotateLeft => ship.rotation = state.tuning.turn_rate(),
            Intent::RotateRight => ship.rotation = -state.tuning.turn_rate(),
            Intent::RotateStop => ship.rotation = 0.0,
            Intent::ThrustOn => ship.thrusting = true,
            Intent::ThrustOff => ship.thrusting = false,
            Intent::Restart => {}
        }
    }
}

/// Match flying lasers against asteroids.
///
/// Asteroids are visited from the back so removals and appended children
/// never shift an index still to be visited. A destroyed asteroid is not
/// tested again, and a cleared level ends the pass because the belt has been
/// rebuilt.
fn laser_asteroid_pass(state: &mut GameState, services: &mut Services) {
    let explode_ticks = ticks_for(state.tuning.laser_explode_dur, SIM_HZ);
    let mut i = state.asteroids.len();
    while i > 0 {
        i -= 1;
        let Some(hit) = laser_hit(&state.asteroids[i], &state.ship.lasers) else {
            continue;
        };
        state.ship.lasers[hit].explode(explode_ticks);
        if destroy_asteroid(state, i, services).level_cleared {
            break;
        }
    }
}
