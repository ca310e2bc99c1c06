//! Geometry for the vector-style primitives

use glam::Vec2;

/// RGBA color, components 0.0 - 1.0
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const DARK_RED: Color = [0.545, 0.0, 0.0, 1.0];
pub const ORANGE: Color = [1.0, 0.647, 0.0, 1.0];
pub const ORANGE_RED: Color = [1.0, 0.271, 0.0, 1.0];
pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
pub const SALMON: Color = [0.98, 0.502, 0.447, 1.0];
pub const PINK: Color = [1.0, 0.753, 0.796, 1.0];
pub const SLATE_GREY: Color = [0.439, 0.502, 0.565, 1.0];
pub const LIME: Color = [0.0, 1.0, 0.0, 1.0];
pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// CSS `rgba()` string for canvas styles
pub fn css(color: Color) -> String {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        c(color[0]),
        c(color[1]),
        c(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Triangle hull: nose, back left, back right.
///
/// `angle` follows the simulation convention (π/2 = up, screen y down).
pub fn ship_outline(pos: Vec2, radius: f32, angle: f32) -> [Vec2; 3] {
    let (sin, cos) = angle.sin_cos();
    [
        pos + Vec2::new(4.0 / 3.0 * radius * cos, -4.0 / 3.0 * radius * sin),
        pos + Vec2::new(
            -radius * (2.0 / 3.0 * cos + sin),
            radius * (2.0 / 3.0 * sin - cos),
        ),
        pos + Vec2::new(
            -radius * (2.0 / 3.0 * cos - sin),
            radius * (2.0 / 3.0 * sin + cos),
        ),
    ]
}

/// Engine flame behind the hull
pub fn thruster_flame(pos: Vec2, radius: f32, angle: f32) -> [Vec2; 3] {
    let (sin, cos) = angle.sin_cos();
    [
        pos + Vec2::new(
            -radius * (2.0 / 3.0 * cos + 0.5 * sin),
            radius * (2.0 / 3.0 * sin - 0.5 * cos),
        ),
        pos + Vec2::new(-radius * 5.0 / 3.0 * cos, radius * 5.0 / 3.0 * sin),
        pos + Vec2::new(
            -radius * (2.0 / 3.0 * cos - 0.5 * sin),
            radius * (2.0 / 3.0 * sin + 0.5 * cos),
        ),
    ]
}

/// Concentric filled discs of the ship explosion, outermost first
pub fn ship_explosion(radius: f32) -> [(f32, Color); 5] {
    [
        (radius * 1.7, DARK_RED),
        (radius * 1.4, RED),
        (radius * 1.1, ORANGE),
        (radius * 0.8, YELLOW),
        (radius * 0.5, WHITE),
    ]
}

/// Concentric discs of a laser hit, scaled by the ship radius
pub fn laser_explosion(ship_radius: f32) -> [(f32, Color); 3] {
    [
        (ship_radius * 0.75, ORANGE_RED),
        (ship_radius * 0.5, SALMON),
        (ship_radius * 0.25, PINK),
    ]
}

/// Where the i-th remaining life icon sits
pub fn life_icon_pos(index: u32, ship_size: f32) -> Vec2 {
    Vec2::new(ship_size + index as f32 * ship_size * 1.2, ship_size)
}
