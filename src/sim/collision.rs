//! Proximity tests between ship, lasers and asteroids
//!
//! Everything is circle based: the ship and asteroids use their collision
//! radii, lasers are points.

use glam::Vec2;

use super::state::{Asteroid, Laser, Ship};
use crate::dist_between_points;

/// Whether two circles overlap (strictly)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    dist_between_points(a, b) < ra + rb
}

/// Whether a point lies strictly inside a circle
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    dist_between_points(p, center) < radius
}

/// Whether the ship can be hit this tick
#[inline]
pub fn ship_is_vulnerable(ship: &Ship) -> bool {
    !ship.is_exploding() && !ship.dead && !ship.is_invincible()
}

/// First asteroid (in list order) touching a vulnerable ship
pub fn ship_asteroid_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    if !ship_is_vulnerable(ship) {
        return None;
    }
    asteroids
        .iter()
        .position(|a| circles_overlap(ship.pos, ship.radius, a.pos, a.radius()))
}

/// Newest flying laser inside the asteroid, scanning lasers in reverse.
///
/// Exploding lasers have already hit something and are ignored.
pub fn laser_hit(asteroid: &Asteroid, lasers: &[Laser]) -> Option<usize> {
    lasers
        .iter()
        .rposition(|l| !l.is_exploding() && point_in_circle(l.pos, asteroid.pos, asteroid.radius()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::AsteroidSize;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn asteroid_at(pos: Vec2, size: AsteroidSize) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = Asteroid::new(&mut rng, pos, size, 0, &Tuning::default());
        a.vel = Vec2::ZERO;
        a
    }

    fn vulnerable_ship(pos: Vec2) -> Ship {
        let mut ship = Ship::new(pos, &Tuning::default());
        ship.blink_num = 0;
        ship
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.9, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }

    #[test]
    fn test_invincible_ship_is_immune() {
        let roids = vec![asteroid_at(Vec2::new(100.0, 100.0), AsteroidSize::Large)];
        let mut ship = Ship::new(Vec2::new(100.0, 100.0), &Tuning::default());
        assert!(ship.blink_num > 0);
        assert_eq!(ship_asteroid_hit(&ship, &roids), None);

        ship.blink_num = 1;
        assert_eq!(ship_asteroid_hit(&ship, &roids), None);
        ship.blink_num = 0;
        assert_eq!(ship_asteroid_hit(&ship, &roids), Some(0));
    }

    #[test]
    fn test_exploding_or_dead_ship_is_immune() {
        let roids = vec![asteroid_at(Vec2::new(100.0, 100.0), AsteroidSize::Small)];
        let mut ship = vulnerable_ship(Vec2::new(100.0, 100.0));
        ship.explode_ticks = 3;
        assert_eq!(ship_asteroid_hit(&ship, &roids), None);
        ship.explode_ticks = 0;
        ship.dead = true;
        assert_eq!(ship_asteroid_hit(&ship, &roids), None);
    }

    #[test]
    fn test_first_asteroid_in_list_order_wins() {
        let roids = vec![
            asteroid_at(Vec2::new(500.0, 500.0), AsteroidSize::Large),
            asteroid_at(Vec2::new(110.0, 100.0), AsteroidSize::Small),
            asteroid_at(Vec2::new(90.0, 100.0), AsteroidSize::Small),
        ];
        let ship = vulnerable_ship(Vec2::new(100.0, 100.0));
        assert_eq!(ship_asteroid_hit(&ship, &roids), Some(1));
    }

    #[test]
    fn test_laser_is_a_point() {
        let roid = asteroid_at(Vec2::new(100.0, 100.0), AsteroidSize::Small);
        let ship = Ship::new(Vec2::ZERO, &Tuning::default());
        let mut laser = Laser::fire(&ship, 500.0);

        // Inside radius + a laser's own size but outside the radius alone
        laser.pos = Vec2::new(100.0 + 13.5, 100.0);
        assert_eq!(laser_hit(&roid, &[laser.clone()]), None);

        laser.pos = Vec2::new(100.0 + 12.5, 100.0);
        assert_eq!(laser_hit(&roid, &[laser]), Some(0));
    }

    #[test]
    fn test_laser_scan_is_reverse_and_skips_exploding() {
        let roid = asteroid_at(Vec2::new(100.0, 100.0), AsteroidSize::Large);
        let ship = Ship::new(Vec2::ZERO, &Tuning::default());
        let mut lasers: Vec<Laser> = (0..3)
            .map(|_| {
                let mut l = Laser::fire(&ship, 500.0);
                l.pos = Vec2::new(100.0, 100.0);
                l
            })
            .collect();
        assert_eq!(laser_hit(&roid, &lasers), Some(2));

        lasers[2].explode(6);
        assert_eq!(laser_hit(&roid, &lasers), Some(1));
    }
}
