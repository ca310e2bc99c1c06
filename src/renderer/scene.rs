//! Frame snapshot
//!
//! `Scene::capture` reads the game state between ticks and lists what to
//! draw, back to front. Painters only walk the list.

use glam::Vec2;

use super::shapes::{self, Color};
use crate::settings::Settings;
use crate::sim::GameState;

/// Banner and score font size in pixels
pub const TEXT_SIZE: f32 = 35.0;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One drawable
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Closed polygon
    Polygon {
        points: Vec<Vec2>,
        stroke: Option<Color>,
        fill: Option<Color>,
        line_width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        stroke: Option<Color>,
        fill: Option<Color>,
        line_width: f32,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        fill: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: Align,
        color: Color,
    },
}

/// Everything visible in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let mut scene = Self {
            width: state.width,
            height: state.height,
            background: shapes::BLACK,
            shapes: Vec::new(),
        };
        let ship_size = state.tuning.ship_size;
        let line_width = ship_size / 20.0;

        let ship = &state.ship;
        if ship.is_exploding() {
            for (radius, color) in shapes::ship_explosion(ship.radius) {
                scene.disc(ship.pos, radius, color);
            }
        } else if ship.blink_on() && !ship.dead {
            if ship.thrusting {
                scene.shapes.push(Shape::Polygon {
                    points: shapes::thruster_flame(ship.pos, ship.radius, ship.angle).to_vec(),
                    stroke: Some(shapes::YELLOW),
                    fill: Some(shapes::RED),
                    line_width: ship_size / 10.0,
                });
            }
            scene.hull(ship.pos, ship.radius, ship.angle, shapes::WHITE, line_width);
        }

        for roid in &state.asteroids {
            scene.shapes.push(Shape::Polygon {
                points: roid.outline(),
                stroke: Some(shapes::SLATE_GREY),
                fill: None,
                line_width,
            });
            if settings.show_bounding {
                scene.ring(roid.pos, roid.radius(), shapes::LIME);
            }
        }

        if settings.show_bounding {
            scene.ring(ship.pos, ship.radius, shapes::LIME);
        }
        if settings.show_centre_dot {
            scene.shapes.push(Shape::Rect {
                min: ship.pos - Vec2::ONE,
                size: Vec2::splat(2.0),
                fill: shapes::RED,
            });
        }

        for laser in &ship.lasers {
            if laser.is_exploding() {
                for (radius, color) in shapes::laser_explosion(ship.radius) {
                    scene.disc(laser.pos, radius, color);
                }
            } else {
                scene.disc(laser.pos, ship_size / 15.0, shapes::SALMON);
            }
        }

        if state.banner.is_visible() {
            scene.shapes.push(Shape::Text {
                text: state.banner.text.clone(),
                pos: Vec2::new(state.width / 2.0, state.height * 0.75),
                size: TEXT_SIZE,
                align: Align::Center,
                color: shapes::with_alpha(shapes::WHITE, state.banner.alpha),
            });
        }

        for i in 0..state.lives {
            let color = if ship.is_exploding() && i == state.lives - 1 {
                shapes::RED
            } else {
                shapes::WHITE
            };
            let pos = shapes::life_icon_pos(i, ship_size);
            scene.hull(pos, ship.radius, std::f32::consts::FRAC_PI_2, color, line_width);
        }

        scene.shapes.push(Shape::Text {
            text: format!("Score: {}", state.score),
            pos: Vec2::new(state.width - ship_size / 2.0, ship_size),
            size: TEXT_SIZE,
            align: Align::Right,
            color: shapes::WHITE,
        });
        scene.shapes.push(Shape::Text {
            text: format!("High: {}", state.high_score),
            pos: Vec2::new(state.width / 2.0, ship_size),
            size: TEXT_SIZE * 0.75,
            align: Align::Center,
            color: shapes::WHITE,
        });

        scene
    }

    fn hull(&mut self, pos: Vec2, radius: f32, angle: f32, color: Color, line_width: f32) {
        self.shapes.push(Shape::Polygon {
            points: shapes::ship_outline(pos, radius, angle).to_vec(),
            stroke: Some(color),
            fill: None,
            line_width,
        });
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.shapes.push(Shape::Circle {
            center,
            radius,
            stroke: None,
            fill: Some(color),
            line_width: 0.0,
        });
    }

    fn ring(&mut self, center: Vec2, radius: f32, color: Color) {
        self.shapes.push(Shape::Circle {
            center,
            radius,
            stroke: Some(color),
            fill: None,
            line_width: 2.0,
        });
    }

    /// Text items, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
