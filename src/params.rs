/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for a simulation run. The host maps these onto the
 * Flock's constructor and setters: CLI flags or sliders write here, and the
 * engine reads the result at the next tick.
 */

use crate::error::FlockError;
use crate::neighbors::EngineMode;

pub struct SimulationParams {
    pub num_boids: usize,
    pub num_predators: usize,
    pub flock_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub world_width: f32,
    pub world_height: f32,
    pub engine: EngineMode,
    pub parallel: bool,
    pub show_debug: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 500,
            num_predators: 0,
            flock_radius: 40.0,
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            world_width: 1920.0,
            world_height: 1080.0,
            engine: EngineMode::default(),
            parallel: false,
            show_debug: false,
        }
    }
}

impl SimulationParams {
    // Reject configurations the engine would fail fast on anyway
    pub fn validate(&self) -> Result<(), FlockError> {
        if self.flock_radius <= 0.0 {
            return Err(FlockError::InvalidRadius(self.flock_radius));
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(FlockError::DegenerateWorldBounds {
                width: self.world_width,
                height: self.world_height,
            });
        }
        Ok(())
    }

    // Parameter ranges for host sliders

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=100.0
    }

    pub fn num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=10_000
    }
}
