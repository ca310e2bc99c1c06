//! Rocks - a vector-style asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, asteroids, lasers, collisions, levels)
//! - `renderer`: Scene snapshot and shape geometry, canvas painter on web
//! - `audio`: Sound cue and adaptive music capabilities
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (Hz)
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default arena dimensions (native builds and tests)
    pub const DEFAULT_WIDTH: f32 = 960.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Storage key for the high score
    pub const SAVE_KEY_SCORE: &str = "asteroidsGameHigh";
    /// Storage key for settings
    pub const SAVE_KEY_SETTINGS: &str = "rocks_settings";
}

/// Distance between two points
#[inline]
pub fn dist_between_points(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for a facing angle.
///
/// Angles are counter-clockwise with 0 pointing right and π/2 pointing up.
/// Screen y grows downward, so the y component is negated.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Wrap one coordinate around a toroidal edge.
///
/// Leaving past `-margin` re-enters at `extent + margin` and vice versa.
#[inline]
pub fn wrap_coord(v: f32, margin: f32, extent: f32) -> f32 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

/// Wrap a position around all four screen edges
#[inline]
pub fn wrap_position(pos: Vec2, margin: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, margin, width),
        wrap_coord(pos.y, margin, height),
    )
}

/// Convert a duration in seconds to whole ticks, rounding up.
///
/// Products like `0.1 * 60.0` land a hair above the integer in floating
/// point; the small slack keeps those from rounding up a whole extra tick.
#[inline]
pub fn ticks_for(seconds: f32, hz: f32) -> u32 {
    ((seconds * hz - 1e-3).ceil().max(0.0)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_up_is_negative_y() {
        let h = heading(FRAC_PI_2);
        assert!(h.x.abs() < 1e-6);
        assert!((h.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ticks_for() {
        assert_eq!(ticks_for(0.1, 60.0), 6);
        assert_eq!(ticks_for(0.3, 60.0), 18);
        assert_eq!(ticks_for(0.25, 60.0), 15);
        assert_eq!(ticks_for(0.01, 60.0), 1);
        assert_eq!(ticks_for(0.0, 60.0), 0);
    }

    #[test]
    fn test_wrap_edges() {
        assert_eq!(wrap_coord(-16.0, 15.0, 800.0), 815.0);
        assert_eq!(wrap_coord(816.0, 15.0, 800.0), -15.0);
        assert_eq!(wrap_coord(-15.0, 15.0, 800.0), -15.0);
        assert_eq!(wrap_coord(400.0, 15.0, 800.0), 400.0);
    }

    proptest! {
        #[test]
        fn wrapped_position_stays_in_band(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            margin in 0.0f32..60.0,
        ) {
            // One tick of movement never carries an entity further than one band,
            // so a single wrap must land inside [-margin, extent + margin].
            let w = 800.0;
            let h = 600.0;
            let p = wrap_position(Vec2::new(x, y), margin, w, h);
            if (-margin..=w + margin).contains(&x) {
                prop_assert_eq!(p.x, x);
            } else {
                prop_assert!(p.x >= -margin && p.x <= w + margin);
            }
            if (-margin..=h + margin).contains(&y) {
                prop_assert_eq!(p.y, y);
            } else {
                prop_assert!(p.y >= -margin && p.y <= h + margin);
            }
        }
    }
}
