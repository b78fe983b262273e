#[macro_use]
mod utils;

pub mod app;
pub mod collision;
pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod renderer;
pub mod vector;
pub mod world;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::renderer::Renderer;
use crate::world::{Placement, World};
use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlCanvasElement};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Background {
    Light,
    Dark,
}

impl Background {
    pub fn toggled(self) -> Background {
        match self {
            Background::Light => Background::Dark,
            Background::Dark => Background::Light,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Background::Light => "white",
            Background::Dark => "black",
        }
    }
}

/// A canvas element plus the world drawn onto it. Either drive it from JS
/// (`frame` once per `requestAnimationFrame`) or hand the canvas id to
/// `start` and let the crate wire up the loop and the input listeners.
#[wasm_bindgen]
pub struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    renderer: Renderer,
    world: World,
    background: Background,
}

#[wasm_bindgen]
impl ParticleCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Result<ParticleCanvas, JsValue> {
        Ok(ParticleCanvas::from_config(canvas, SimConfig::default())?)
    }

    /// Same as `new` with the defaults overridden by a JSON object, e.g.
    /// `{"particle_count": 150, "seed": 7}`.
    pub fn with_config(canvas: HtmlCanvasElement, config_json: &str) -> Result<ParticleCanvas, JsValue> {
        let config = SimConfig::from_json(config_json)?;
        Ok(ParticleCanvas::from_config(canvas, config)?)
    }

    pub fn frame(&mut self) -> Result<(), JsValue> {
        self.world.frame(&mut self.renderer)
    }

    pub fn tick(&mut self) {
        self.world.tick();
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.world.render(&mut self.renderer)
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.world.set_pointer(x, y);
    }

    /// Resize the canvas backing store and repopulate the world to match.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let placement = {
            let _timer = Timer::new("ParticleCanvas::resize");
            self.world.reset(width, height)
        };
        report(placement, width, height);
    }

    pub fn toggle_background(&mut self) -> Result<(), JsValue> {
        self.background = self.background.toggled();
        self.canvas
            .style()
            .set_property("background-color", self.background.css())
    }

    pub fn particle_count(&self) -> usize {
        self.world.particles().len()
    }
}

impl ParticleCanvas {
    pub fn from_config(canvas: HtmlCanvasElement, config: SimConfig) -> Result<ParticleCanvas, SimError> {
        let renderer = Renderer::new(&canvas)?;
        let (width, height) = (canvas.width(), canvas.height());
        let world = {
            let _timer = Timer::new("ParticleCanvas::init");
            World::new(config, width, height)?
        };
        report(world.placement(), width, height);

        Ok(ParticleCanvas {
            canvas,
            renderer,
            world,
            background: Background::Light,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn background(&self) -> Background {
        self.background
    }
}

fn report(placement: Placement, width: u32, height: u32) {
    if placement.forced > 0 {
        warn!(
            "{} of {} particles could not be placed without overlap in {}x{}",
            placement.forced, placement.placed, width, height
        );
    } else {
        log!("placed {} particles in {}x{}", placement.placed, width, height);
    }
}
