// Tunable constants for the simulation. The defaults reproduce the stock
// 400 particle scene; a host page may override any subset through JSON.

use crate::error::{Result, SimError};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub particle_count: u32,
    pub min_radius: u32,
    pub max_radius: u32,
    pub mass: f64,
    // each velocity component is drawn from [-max_speed, max_speed)
    pub max_speed: f64,
    pub highlight_distance: f64,
    pub opacity_cap: f64,
    pub opacity_step: f64,
    // candidates tried per particle before it is placed regardless of overlap
    pub max_placement_attempts: u32,
    pub seed: Option<u64>,
}

impl SimConfig {
    pub const PARTICLE_COUNT: u32 = 400;
    pub const MIN_RADIUS: u32 = 5;
    pub const MAX_RADIUS: u32 = 30;
    pub const HIGHLIGHT_DISTANCE: f64 = 80.0;
    pub const OPACITY_CAP: f64 = 0.5;
    pub const OPACITY_STEP: f64 = 0.5;
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
    // upper bounds for host-supplied values
    pub const PARTICLE_COUNT_LIMIT: u32 = 100_000;
    pub const RADIUS_LIMIT: u32 = 100_000;

    pub fn from_json(json: &str) -> Result<SimConfig> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_radius == 0 {
            return Err(invalid("min_radius must be >= 1"));
        }
        if self.max_radius < self.min_radius {
            return Err(invalid("max_radius must be >= min_radius"));
        }
        if self.max_radius > SimConfig::RADIUS_LIMIT {
            return Err(invalid("max_radius must be <= 100000"));
        }
        if self.particle_count > SimConfig::PARTICLE_COUNT_LIMIT {
            return Err(invalid("particle_count must be <= 100000"));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(invalid("mass must be finite and > 0"));
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(invalid("max_speed must be finite and >= 0"));
        }
        if !self.highlight_distance.is_finite() || self.highlight_distance < 0.0 {
            return Err(invalid("highlight_distance must be finite and >= 0"));
        }
        if !self.opacity_cap.is_finite() || self.opacity_cap <= 0.0 || self.opacity_cap > 1.0 {
            return Err(invalid("opacity_cap must be in (0, 1]"));
        }
        if !self.opacity_step.is_finite() || self.opacity_step <= 0.0 {
            return Err(invalid("opacity_step must be finite and > 0"));
        }
        if self.max_placement_attempts == 0 {
            return Err(invalid("max_placement_attempts must be >= 1"));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            particle_count: SimConfig::PARTICLE_COUNT,
            min_radius: SimConfig::MIN_RADIUS,
            max_radius: SimConfig::MAX_RADIUS,
            mass: 1.0,
            max_speed: 1.0,
            highlight_distance: SimConfig::HIGHLIGHT_DISTANCE,
            opacity_cap: SimConfig::OPACITY_CAP,
            opacity_step: SimConfig::OPACITY_STEP,
            max_placement_attempts: SimConfig::MAX_PLACEMENT_ATTEMPTS,
            seed: None,
        }
    }
}

fn invalid(msg: &str) -> SimError {
    SimError::InvalidConfig(msg.to_owned())
}
