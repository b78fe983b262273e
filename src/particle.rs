// Circular particle with its own per-frame update steps. The pairwise scan that
// needs the whole collection lives in World::tick, everything local is here.

use crate::color::Color;
use crate::config::SimConfig;
use crate::renderer::Surface;
use crate::vector::{distance, vec2, Vec2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    pub mass: f64,
    pub color: Color,
    pub opacity: f64,
}

impl Particle {
    pub fn new(position: Vec2, radius: f64, color: Color) -> Particle {
        Particle {
            position,
            velocity: vec2(0.0, 0.0),
            radius,
            mass: 1.0,
            color,
            opacity: 0.0,
        }
    }

    // Negative when the two circles interpenetrate
    pub fn gap(&self, other: &Particle) -> f64 {
        distance(&self.position, &other.position) - other.radius - self.radius
    }

    pub fn overlaps(&self, other: &Particle) -> bool {
        self.gap(other) < 0.0
    }

    /// Flip the velocity on each axis where the circle is touching or past an
    /// edge and still heading out. The position is never clamped.
    pub fn reflect_off_walls(&mut self, width: f64, height: f64) {
        // `>=` catches a circle resting exactly on an edge; the direction check
        // keeps one already past an edge from being flipped back outward.
        if (self.position.x + self.radius >= width && self.velocity.x > 0.0)
            || (self.position.x - self.radius <= 0.0 && self.velocity.x < 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y + self.radius >= height && self.velocity.y > 0.0)
            || (self.position.y - self.radius <= 0.0 && self.velocity.y < 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Near the pointer the opacity steps up toward the cap, otherwise it steps
    /// back down to zero. With the stock step equal to the cap this is an on/off
    /// flash rather than a fade.
    pub fn update_opacity(&mut self, pointer: &Vec2, config: &SimConfig) {
        if distance(pointer, &self.position) < config.highlight_distance
            && self.opacity < config.opacity_cap
        {
            self.opacity = (self.opacity + config.opacity_step).min(config.opacity_cap);
        } else if self.opacity > 0.0 {
            self.opacity = (self.opacity - config.opacity_step).max(0.0);
        }
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.draw_circle(self.position, self.radius, self.color, self.opacity)
    }
}
