//! Vector rendering
//!
//! `scene` turns a game state into a flat list of shapes; on the web,
//! `canvas` paints that list with the Canvas 2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use scene::{Align, Scene, Shape};
