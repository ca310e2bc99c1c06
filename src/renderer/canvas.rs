//! Canvas 2D painter

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{Align, Scene, Shape};
use super::shapes::css;

/// Paints scenes onto a `<canvas>`
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Attach to the canvas element with the given id
    pub fn attach(canvas_id: &str) -> Result<Self, String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| format!("no element #{canvas_id}"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| format!("#{canvas_id} is not a canvas"))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("get_context failed: {e:?}"))?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "unexpected context type".to_string())?;
        Ok(Self { canvas, ctx })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Layout size of the element in CSS pixels
    pub fn client_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn paint(&self, scene: &Scene) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&css(scene.background));
        ctx.fill_rect(0.0, 0.0, scene.width as f64, scene.height as f64);

        for shape in &scene.shapes {
            match shape {
                Shape::Polygon {
                    points,
                    stroke,
                    fill,
                    line_width,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    self.finish(*fill, *stroke, *line_width);
                }
                Shape::Circle {
                    center,
                    radius,
                    stroke,
                    fill,
                    line_width,
                } => {
                    ctx.begin_path();
                    if ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .is_err()
                    {
                        continue;
                    }
                    ctx.close_path();
                    self.finish(*fill, *stroke, *line_width);
                }
                Shape::Rect { min, size, fill } => {
                    ctx.set_fill_style_str(&css(*fill));
                    ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                }
                Shape::Text {
                    text,
                    pos,
                    size,
                    align,
                    color,
                } => {
                    ctx.set_text_align(match align {
                        Align::Left => "left",
                        Align::Center => "center",
                        Align::Right => "right",
                    });
                    ctx.set_text_baseline("middle");
                    ctx.set_fill_style_str(&css(*color));
                    ctx.set_font(&format!("small-caps {size}px dejavu sans mono"));
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }

    fn finish(&self, fill: Option<[f32; 4]>, stroke: Option<[f32; 4]>, line_width: f32) {
        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(&css(fill));
            self.ctx.fill();
        }
        if let Some(stroke) = stroke {
            self.ctx.set_stroke_style_str(&css(stroke));
            self.ctx.set_line_width(line_width as f64);
            self.ctx.stroke();
        }
    }
}
