/*
 * Flock Module
 *
 * The population engine. The Flock owns the boid array, the tunable rule
 * weights and interaction radius, the world bounds, and the active neighbor
 * strategy, and advances the whole population one tick per step() call.
 *
 * step() is strictly two-phase. Phase one rebuilds the neighbor strategy and
 * computes one combined steering force per boid, reading only the positions
 * and velocities as they were at the start of the tick. Phase two applies
 * the forces, integrates, and wraps. Reads never interleave with writes, so
 * phase one can fan out across threads unchanged.
 */

use glam::Vec2;
use rayon::prelude::*;

use crate::boid::Boid;
use crate::error::FlockError;
use crate::neighbors::{BruteForce, EngineMode, NeighborQuery, QuadTreeIndex};

/// World dimensions shared by the toroidal wrap and the spatial index.
#[derive(Clone, Copy, Debug)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, FlockError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(FlockError::DegenerateWorldBounds { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Multipliers for the three steering rules, adjustable every tick.
#[derive(Clone, Copy, Debug)]
pub struct RuleWeights {
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            separation: 1.0,
            alignment: 1.0,
            cohesion: 1.0,
        }
    }
}

pub struct Flock {
    boids: Vec<Boid>,
    radius: f32,
    weights: RuleWeights,
    bounds: WorldBounds,
    mode: EngineMode,
    finder: Box<dyn NeighborQuery>,
    parallel: bool,
}

impl Flock {
    pub fn new(bounds: WorldBounds, radius: f32) -> Result<Self, FlockError> {
        if radius <= 0.0 {
            return Err(FlockError::InvalidRadius(radius));
        }
        let mode = EngineMode::default();
        Ok(Self {
            boids: Vec::new(),
            radius,
            weights: RuleWeights::default(),
            bounds,
            mode,
            finder: Self::finder_for(mode),
            parallel: false,
        })
    }

    fn finder_for(mode: EngineMode) -> Box<dyn NeighborQuery> {
        match mode {
            EngineMode::Basic => Box::new(BruteForce),
            EngineMode::Tree => Box::new(QuadTreeIndex::default()),
        }
    }

    // Append one boid; indices are stable identity, boids are never removed
    pub fn add_boid(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    // Advance the simulation by one tick
    pub fn step(&mut self) {
        self.finder.rebuild(&self.boids, &self.bounds);

        // Phase one: read-only force evaluation over the start-of-tick state
        let forces: Vec<Vec2> = if self.parallel {
            (0..self.boids.len())
                .into_par_iter()
                .map(|i| self.force_on(i, &mut Vec::new()))
                .collect()
        } else {
            let mut scratch = Vec::with_capacity(32);
            (0..self.boids.len())
                .map(|i| self.force_on(i, &mut scratch))
                .collect()
        };

        // Phase two: apply, integrate, wrap
        for (boid, force) in self.boids.iter_mut().zip(forces) {
            boid.apply_force(force);
            boid.update();
            boid.wrap_edges(&self.bounds);
        }
    }

    fn force_on(&self, index: usize, scratch: &mut Vec<usize>) -> Vec2 {
        scratch.clear();
        self.finder
            .neighbors_of(&self.boids, index, self.radius, scratch);
        self.boids[index].flock(&self.boids, scratch, self.radius, &self.weights)
    }

    // Runtime configuration, effective from the next step()

    pub fn set_weights(&mut self, separation: f32, alignment: f32, cohesion: f32) {
        self.weights = RuleWeights {
            separation,
            alignment,
            cohesion,
        };
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), FlockError> {
        if radius <= 0.0 {
            return Err(FlockError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(())
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) -> Result<(), FlockError> {
        self.bounds = WorldBounds::new(width, height)?;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: EngineMode) {
        if mode != self.mode {
            self.mode = mode;
            self.finder = Self::finder_for(mode);
        }
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    // Accessors

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn weights(&self) -> RuleWeights {
        self.weights
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boid_at(&self, index: usize) -> Result<&Boid, FlockError> {
        self.boids.get(index).ok_or(FlockError::IndexOutOfRange {
            index,
            len: self.boids.len(),
        })
    }

    pub fn boid_at_mut(&mut self, index: usize) -> Result<&mut Boid, FlockError> {
        let len = self.boids.len();
        self.boids
            .get_mut(index)
            .ok_or(FlockError::IndexOutOfRange { index, len })
    }
}
