//! The simulation context: particles, viewport and pointer.
//!
//! A `World` is created once per canvas and re-populated wholesale whenever the
//! viewport changes size. Each `tick` advances every particle exactly once, in
//! collection order, against all the others. The pair scan is O(n²), which is
//! fine at a few hundred particles.

use crate::collision::{pair_mut, resolve};
use crate::color::random_color;
use crate::config::SimConfig;
use crate::error::Result;
use crate::particle::Particle;
use crate::renderer::Surface;
use crate::vector::{vec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Outcome of populating the world.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Placement {
    pub placed: usize,
    /// Particles that ran out of placement attempts and were dropped in on top
    /// of a neighbour.
    pub forced: usize,
}

pub struct World {
    config: SimConfig,
    width: u32,
    height: u32,
    pointer: Vec2,
    particles: Vec<Particle>,
    placement: Placement,
    rng: StdRng,
}

impl World {
    /// Validate `config` and populate a `width` x `height` viewport.
    pub fn new(config: SimConfig, width: u32, height: u32) -> Result<World> {
        let mut world = World::empty(config, width, height)?;
        world.reset(width, height);
        Ok(world)
    }

    /// Build a world around hand-placed particles, skipping random placement.
    pub fn from_particles(
        config: SimConfig,
        width: u32,
        height: u32,
        particles: Vec<Particle>,
    ) -> Result<World> {
        let mut world = World::empty(config, width, height)?;
        world.placement = Placement {
            placed: particles.len(),
            forced: 0,
        };
        world.particles = particles;
        Ok(world)
    }

    fn empty(config: SimConfig, width: u32, height: u32) -> Result<World> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(World {
            config,
            width,
            height,
            pointer: vec2(width as f64 / 2.0, height as f64 / 2.0),
            particles: Vec::new(),
            placement: Placement::default(),
            rng,
        })
    }

    /// Throw away every particle and pack a fresh set into the new viewport.
    /// The pointer keeps its last position.
    pub fn reset(&mut self, width: u32, height: u32) -> Placement {
        self.width = width;
        self.height = height;

        let count = self.config.particle_count as usize;
        let mut particles: Vec<Particle> = Vec::with_capacity(count);
        let mut forced = 0;

        for _ in 0..count {
            let radius = self
                .rng
                .gen_range(self.config.min_radius, self.config.max_radius.saturating_add(1));
            let position = random_position(&mut self.rng, radius, width, height);
            let mut candidate = Particle::new(position, radius as f64, random_color(&mut self.rng));
            candidate.velocity = vec2(
                random_speed(&mut self.rng, self.config.max_speed),
                random_speed(&mut self.rng, self.config.max_speed),
            );
            candidate.mass = self.config.mass;

            let mut attempts = 1;
            while particles.iter().any(|p| candidate.overlaps(p)) {
                if attempts >= self.config.max_placement_attempts {
                    forced += 1;
                    break;
                }
                candidate.position = random_position(&mut self.rng, radius, width, height);
                attempts += 1;
            }
            particles.push(candidate);
        }

        self.particles = particles;
        self.placement = Placement {
            placed: count,
            forced,
        };
        self.placement
    }

    /// Advance every particle once: collisions against the rest of the
    /// collection, wall reflection, pointer highlight, then the Euler step.
    pub fn tick(&mut self) {
        let width = self.width as f64;
        let height = self.height as f64;

        for i in 0..self.particles.len() {
            for j in 0..self.particles.len() {
                if i == j {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.particles, i, j);
                if a.overlaps(b) {
                    resolve(a, b);
                }
            }

            let particle = &mut self.particles[i];
            particle.reflect_off_walls(width, height);
            particle.update_opacity(&self.pointer, &self.config);
            particle.advance();
        }
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> std::result::Result<(), S::Error> {
        surface.clear(self.width as f64, self.height as f64)?;
        for particle in &self.particles {
            particle.draw(surface)?;
        }
        Ok(())
    }

    /// One display refresh: step the simulation and draw the result.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> std::result::Result<(), S::Error> {
        self.tick();
        self.render(surface)
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = vec2(x, y);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// Whole-unit coordinate keeping the circle inside the viewport. An axis too
// short for the circle gets it centred instead.
fn random_coord<R: Rng>(rng: &mut R, radius: u32, extent: u32) -> f64 {
    if extent < radius.saturating_mul(2) {
        extent as f64 / 2.0
    } else {
        rng.gen_range(radius, extent - radius + 1) as f64
    }
}

fn random_position<R: Rng>(rng: &mut R, radius: u32, width: u32, height: u32) -> Vec2 {
    let x = random_coord(rng, radius, width);
    let y = random_coord(rng, radius, height);
    vec2(x, y)
}

fn random_speed<R: Rng>(rng: &mut R, max_speed: f64) -> f64 {
    if max_speed > 0.0 {
        rng.gen_range(-max_speed, max_speed)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;
    use crate::renderer::testing::{DrawCall, RecordingSurface};
    use crate::vector::dot;

    fn seeded(seed: u64, count: u32) -> SimConfig {
        let mut config = SimConfig::default();
        config.seed = Some(seed);
        config.particle_count = count;
        config
    }

    fn ball(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Particle {
        let mut p = Particle::new(vec2(x, y), radius, PALETTE[2]);
        p.velocity = vec2(vx, vy);
        p
    }

    #[test]
    fn default_world_packs_without_overlap() {
        let world = World::new(seeded(1, 400), 1920, 1080).unwrap();
        let particles = world.particles();
        assert_eq!(particles.len(), 400);
        assert_eq!(world.placement(), Placement { placed: 400, forced: 0 });

        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                assert!(a.gap(b) >= -1e-9);
            }
        }
    }

    #[test]
    fn spawned_particles_respect_config() {
        let world = World::new(seeded(2, 150), 800, 600).unwrap();
        for p in world.particles() {
            assert!(p.radius >= 5.0 && p.radius <= 30.0);
            assert_eq!(p.radius.fract(), 0.0);
            assert!(p.position.x - p.radius >= 0.0 && p.position.x + p.radius <= 800.0);
            assert!(p.position.y - p.radius >= 0.0 && p.position.y + p.radius <= 600.0);
            assert!(p.velocity.x >= -1.0 && p.velocity.x < 1.0);
            assert!(p.velocity.y >= -1.0 && p.velocity.y < 1.0);
            assert_eq!(p.mass, 1.0);
            assert_eq!(p.opacity, 0.0);
            assert!(PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn same_seed_same_world() {
        let a = World::new(seeded(99, 50), 640, 480).unwrap();
        let b = World::new(seeded(99, 50), 640, 480).unwrap();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn crowded_viewport_gives_up_and_reports() {
        let mut config = seeded(5, 60);
        config.min_radius = 30;
        config.max_radius = 30;
        config.max_placement_attempts = 25;
        let world = World::new(config, 120, 120).unwrap();
        let placement = world.placement();
        assert_eq!(placement.placed, 60);
        assert!(placement.forced > 0);
        assert_eq!(world.particles().len(), 60);
    }

    #[test]
    fn tiny_viewport_centres_particles() {
        let mut config = seeded(6, 1);
        config.min_radius = 20;
        config.max_radius = 20;
        let world = World::new(config, 10, 100).unwrap();
        assert_eq!(world.particles()[0].position.x, 5.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimConfig::default();
        config.min_radius = 0;
        assert!(World::new(config, 100, 100).is_err());

        let mut config = seeded(1, 1);
        config.max_radius = u32::MAX;
        assert!(World::new(config, 800, 600).is_err());
    }

    #[test]
    fn largest_allowed_radius_is_centred() {
        let mut config = seeded(1, 1);
        config.min_radius = SimConfig::RADIUS_LIMIT;
        config.max_radius = SimConfig::RADIUS_LIMIT;
        let world = World::new(config, 800, 600).unwrap();
        assert_eq!(world.config().max_radius, SimConfig::RADIUS_LIMIT);
        assert_eq!(world.particles()[0].position, vec2(400.0, 300.0));
    }

    #[test]
    fn reset_replaces_particles_and_keeps_pointer() {
        let mut world = World::new(seeded(3, 30), 500, 500).unwrap();
        world.set_pointer(12.0, 34.0);
        let before = world.particles().to_vec();

        let placement = world.reset(900, 300);

        assert_eq!(placement.placed, 30);
        assert_eq!(world.size(), (900, 300));
        assert_eq!(world.pointer(), vec2(12.0, 34.0));
        assert_ne!(world.particles(), &before[..]);
        for p in world.particles() {
            assert!(p.position.y + p.radius <= 300.0);
        }
    }

    #[test]
    fn pointer_starts_centred() {
        let world = World::new(seeded(4, 0), 300, 200).unwrap();
        assert_eq!(world.pointer(), vec2(150.0, 100.0));
        assert!(world.particles().is_empty());
    }

    #[test]
    fn tick_resolves_head_on_pair_then_moves() {
        let particles = vec![
            ball(100.0, 100.0, 1.0, 0.0, 6.0),
            ball(110.0, 100.0, -1.0, 0.0, 6.0),
        ];
        let mut world =
            World::from_particles(seeded(0, 0), 400, 400, particles).unwrap();
        world.tick();

        let ps = world.particles();
        assert!((ps[0].velocity.x + 1.0).abs() < 1e-9);
        assert!((ps[1].velocity.x - 1.0).abs() < 1e-9);
        assert!((ps[0].position.x - 99.0).abs() < 1e-9);
        assert!((ps[1].position.x - 111.0).abs() < 1e-9);
    }

    #[test]
    fn tick_reflects_off_right_wall() {
        let particles = vec![ball(190.0, 50.0, 2.0, 0.0, 10.0)];
        let mut world = World::from_particles(seeded(0, 0), 200, 100, particles).unwrap();
        world.tick();
        let p = world.particles()[0];
        assert_eq!(p.velocity, vec2(-2.0, 0.0));
        assert_eq!(p.position, vec2(188.0, 50.0));
    }

    #[test]
    fn kinetic_energy_survives_many_ticks() {
        let mut world = World::new(seeded(8, 60), 600, 400).unwrap();
        let energy = |w: &World| -> f64 {
            w.particles()
                .iter()
                .map(|p| p.mass * dot(&p.velocity, &p.velocity))
                .sum()
        };
        let start = energy(&world);
        for _ in 0..300 {
            world.tick();
        }
        assert!((energy(&world) - start).abs() < 1e-6 * start.max(1.0));
    }

    #[test]
    fn opacity_stays_bounded() {
        let mut world = World::new(seeded(9, 40), 400, 400).unwrap();
        for step in 0..400 {
            let t = step as f64 * 0.05;
            world.set_pointer(200.0 + 150.0 * t.cos(), 200.0 + 150.0 * t.sin());
            world.tick();
            for p in world.particles() {
                assert!(p.opacity >= 0.0 && p.opacity <= 0.5);
            }
        }
    }

    #[test]
    fn frame_clears_then_draws_every_particle() {
        let mut world = World::new(seeded(10, 5), 320, 240).unwrap();
        let mut surface = RecordingSurface::default();
        world.frame(&mut surface).unwrap();

        assert_eq!(surface.calls.len(), 6);
        assert_eq!(surface.calls[0], DrawCall::Clear(320.0, 240.0));
        for (call, p) in surface.calls[1..].iter().zip(world.particles()) {
            match call {
                DrawCall::Circle { center, radius, .. } => {
                    assert_eq!(*center, p.position);
                    assert_eq!(*radius, p.radius);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }
}
