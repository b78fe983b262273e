// Renderer struct that wraps the canvas 2d context. The simulation only talks to
// the Surface trait, so it can be driven headless in tests.

use crate::color::Color;
use crate::error::SimError;
use crate::vector::Vec2;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    // Filled at `alpha`, outline stroked at full alpha in the same color
    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), Self::Error>;
}

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, SimError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| SimError::Dom("get_context('2d') threw".to_owned()))?
            .ok_or_else(|| SimError::Dom("canvas has no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SimError::Dom("context is not a CanvasRenderingContext2d".to_owned()))?;

        Ok(Renderer { context })
    }
}

impl Surface for Renderer {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> Result<(), JsValue> {
        let style = JsValue::from_str(&color.to_css());
        let ctx = &self.context;

        ctx.begin_path();
        ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0)?;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style(&style);
        ctx.fill();
        ctx.restore();
        ctx.set_stroke_style(&style);
        ctx.stroke();
        ctx.close_path();
        Ok(())
    }
}
