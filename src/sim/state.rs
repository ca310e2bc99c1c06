//! Game state and core simulation types
//!
//! `GameState` exclusively owns the ship, the asteroid belt and (through the
//! ship) the lasers. Nothing in here touches audio, storage or rendering.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SIM_HZ;
use crate::tuning::Tuning;
use crate::{heading, ticks_for, wrap_position};

/// Asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Radius for a base size, using ceiling division (100 -> 50, 25, 13)
    pub fn radius(self, base_size: u32) -> f32 {
        let divisor = match self {
            AsteroidSize::Large => 2,
            AsteroidSize::Medium => 4,
            AsteroidSize::Small => 8,
        };
        base_size.div_ceil(divisor) as f32
    }

    /// Tier produced when this one splits (None for the smallest)
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Points awarded for destroying this tier
    pub fn points(self, tuning: &Tuning) -> u32 {
        match self {
            AsteroidSize::Large => tuning.points_large,
            AsteroidSize::Medium => tuning.points_medium,
            AsteroidSize::Small => tuning.points_small,
        }
    }
}

/// An asteroid with an irregular, fixed silhouette
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Velocity (pixels per second)
    pub vel: Vec2,
    pub size: AsteroidSize,
    radius: f32,
    /// Rotation of the silhouette (radians)
    pub angle: f32,
    /// Per-vertex radius multipliers, one per vertex, set at creation
    offsets: Vec<f32>,
}

impl Asteroid {
    /// Spawn an asteroid with random drift and silhouette.
    ///
    /// Speed scales with the level multiplier; each velocity component is
    /// drawn from [0, max) with a random sign.
    pub fn new(rng: &mut Pcg32, pos: Vec2, size: AsteroidSize, level: u32, tuning: &Tuning) -> Self {
        let max_speed = tuning.asteroids_speed * tuning.level_multiplier(level);
        let component = |rng: &mut Pcg32| {
            let speed = rng.random::<f32>() * max_speed;
            if rng.random_bool(0.5) { speed } else { -speed }
        };
        let vel = Vec2::new(component(rng), component(rng));
        let angle = rng.random::<f32>() * TAU;

        let avg = tuning.asteroids_vert as f32;
        let vert = ((rng.random::<f32>() * (avg + 1.0) + avg / 2.0).floor() as usize).max(3);
        let jag = tuning.asteroids_jag;
        let offsets = (0..vert)
            .map(|_| rng.random::<f32>() * jag * 2.0 + 1.0 - jag)
            .collect();

        Self {
            pos,
            vel,
            size,
            radius: size.radius(tuning.asteroids_size),
            angle,
            offsets,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }

    /// Jitter offsets defining the silhouette
    #[inline]
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Drift and wrap around the screen, using the radius as margin
    pub fn update(&mut self, dt: f32, width: f32, height: f32) {
        self.pos += self.vel * dt;
        self.pos = wrap_position(self.pos, self.radius, width, height);
    }

    /// Polygon points of the silhouette in screen space
    pub fn outline(&self) -> Vec<Vec2> {
        let vert = self.offsets.len() as f32;
        self.offsets
            .iter()
            .enumerate()
            .map(|(j, off)| {
                let a = self.angle + j as f32 * TAU / vert;
                self.pos + Vec2::new(a.cos(), a.sin()) * self.radius * off
            })
            .collect()
    }
}

/// Outcome of advancing a laser one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserStatus {
    Alive,
    Expired,
}

/// A laser shot
#[derive(Debug, Clone)]
pub struct Laser {
    pub pos: Vec2,
    /// Velocity (pixels per second)
    pub vel: Vec2,
    /// Distance travelled so far
    pub dist: f32,
    /// Ticks left in the hit explosion (0 = flying)
    pub explode_ticks: u32,
}

impl Laser {
    /// Fire from the ship's nose along its heading
    pub fn fire(ship: &Ship, speed: f32) -> Self {
        Self {
            pos: ship.nose(),
            vel: heading(ship.angle) * speed,
            dist: 0.0,
            explode_ticks: 0,
        }
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explode_ticks > 0
    }

    /// Start the hit explosion
    pub fn explode(&mut self, ticks: u32) {
        self.explode_ticks = ticks.max(1);
    }

    /// Advance one tick; `max_dist` is the travel limit in pixels
    pub fn update(&mut self, dt: f32, max_dist: f32, width: f32, height: f32) -> LaserStatus {
        if self.dist > max_dist {
            return LaserStatus::Expired;
        }

        if self.explode_ticks > 0 {
            self.explode_ticks -= 1;
            if self.explode_ticks == 0 {
                return LaserStatus::Expired;
            }
        } else {
            let step = self.vel * dt;
            self.pos += step;
            self.dist += step.length();
        }

        self.pos = wrap_position(self.pos, 0.0, width, height);
        LaserStatus::Alive
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Collision radius
    pub radius: f32,
    /// Facing angle (radians, π/2 = up)
    pub angle: f32,
    /// Rotation rate (radians per second)
    pub rotation: f32,
    /// Velocity accumulator (pixels per second)
    pub vel: Vec2,
    pub thrusting: bool,
    pub dead: bool,
    /// Cleared after a shot, set again by releasing fire
    pub can_shoot: bool,
    pub explode_ticks: u32,
    /// Ticks left in the current blink
    pub blink_ticks: u32,
    /// Blinks left before the ship becomes vulnerable
    pub blink_num: u32,
    /// Active lasers in fire order
    pub lasers: Vec<Laser>,
}

impl Ship {
    /// Fresh ship at `center`, facing up, invincible for the spawn window
    pub fn new(center: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: center,
            radius: tuning.ship_radius(),
            angle: FRAC_PI_2,
            rotation: 0.0,
            vel: Vec2::ZERO,
            thrusting: false,
            dead: false,
            can_shoot: true,
            explode_ticks: 0,
            blink_ticks: ticks_for(tuning.ship_blink_dur, SIM_HZ),
            blink_num: tuning.blink_cycles(),
            lasers: Vec::with_capacity(tuning.laser_max),
        }
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explode_ticks > 0
    }

    /// Immune to asteroids while blinking
    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.blink_num > 0
    }

    /// Visibility during the blink cycle
    #[inline]
    pub fn blink_on(&self) -> bool {
        self.blink_num % 2 == 0
    }

    /// Tip of the hull, where lasers spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + heading(self.angle) * (4.0 / 3.0 * self.radius)
    }

    /// Accelerate along the heading, or bleed speed through friction
    pub fn apply_thrust(&mut self, dt: f32, tuning: &Tuning) {
        if self.thrusting && !self.dead {
            self.vel += heading(self.angle) * tuning.ship_thrust * dt;
        } else {
            self.vel -= self.vel * tuning.friction * dt;
        }
    }

    /// Rotate and move (callers skip this while exploding)
    pub fn update_motion(&mut self, dt: f32) {
        self.angle += self.rotation * dt;
        self.pos += self.vel * dt;
    }

    pub fn wrap(&mut self, width: f32, height: f32) {
        self.pos = wrap_position(self.pos, self.radius, width, height);
    }

    /// Count down the invincibility blink
    pub fn update_blink(&mut self, tuning: &Tuning) {
        if self.blink_num == 0 {
            return;
        }
        self.blink_ticks = self.blink_ticks.saturating_sub(1);
        if self.blink_ticks == 0 {
            self.blink_ticks = ticks_for(tuning.ship_blink_dur, SIM_HZ);
            self.blink_num -= 1;
        }
    }

    pub fn explode(&mut self, tuning: &Tuning) {
        self.explode_ticks = ticks_for(tuning.ship_explode_dur, SIM_HZ).max(1);
    }

    /// Fire a laser if allowed. Always consumes the trigger.
    pub fn shoot(&mut self, tuning: &Tuning) -> bool {
        let fired = self.can_shoot && self.lasers.len() < tuning.laser_max && !self.is_exploding();
        if fired {
            let laser = Laser::fire(self, tuning.laser_speed);
            self.lasers.push(laser);
        }
        self.can_shoot = false;
        fired
    }
}

/// On-screen banner text ("Level 3", "Game Over")
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub alpha: f32,
    /// Whether the alpha decays each tick
    pub fading: bool,
}

impl Banner {
    pub fn hidden() -> Self {
        Self {
            text: String::new(),
            alpha: 0.0,
            fading: true,
        }
    }

    pub fn show(&mut self, text: impl Into<String>, fading: bool) {
        self.text = text.into();
        self.alpha = 1.0;
        self.fading = fading;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }

    /// Fade by one step; alpha never drops below zero
    pub fn fade(&mut self, dt: f32, fade_time: f32) {
        if self.fading && self.alpha > 0.0 {
            self.alpha = (self.alpha - dt / fade_time).max(0.0);
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Arena size in pixels
    pub width: f32,
    pub height: f32,
    /// Current level (0-based)
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    pub high_score: u32,
    pub ship: Ship,
    /// Active asteroids in spawn order
    pub asteroids: Vec<Asteroid>,
    pub banner: Banner,
    /// Asteroid pieces this round, counting every split generation
    pub asteroids_total: u32,
    /// Pieces still to destroy this round
    pub asteroids_left: u32,
    /// Remaining/total ratio fed to the adaptive music
    pub music_ratio: f32,
    /// Whether the thrust cue is currently sounding
    pub thrust_sounding: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create an empty state; call `director::new_game` to populate it
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let center = Vec2::new(width / 2.0, height / 2.0);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship::new(center, &tuning),
            lives: tuning.game_lives,
            tuning,
            width,
            height,
            level: 0,
            score: 0,
            high_score: 0,
            asteroids: Vec::new(),
            banner: Banner::hidden(),
            asteroids_total: 0,
            asteroids_left: 0,
            music_ratio: 1.0,
            thrust_sounding: false,
            time_ticks: 0,
        }
    }

    /// Center of the arena, where ships spawn
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Replace the ship with a fresh one at the center
    pub fn respawn_ship(&mut self) {
        self.ship = Ship::new(self.center(), &self.tuning);
    }

    /// Travel limit for lasers in pixels
    pub fn laser_max_distance(&self) -> f32 {
        self.tuning.laser_dist * self.width
    }
}
