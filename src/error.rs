/*
 * Error Module
 *
 * Failure kinds for the flocking engine. All of these indicate caller
 * mistakes rather than recoverable runtime conditions: the engine itself is
 * pure computation over already-validated numeric state.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FlockError {
    /// Interaction radius must be positive; a non-positive radius would
    /// silently degenerate every steering rule to zero.
    #[error("interaction radius must be positive, got {0}")]
    InvalidRadius(f32),

    /// World bounds feed both the toroidal wrap and the quadtree partition,
    /// which divide by these dimensions.
    #[error("world bounds must be positive, got {width}x{height}")]
    DegenerateWorldBounds { width: f32, height: f32 },

    /// Boid accessor called with an index outside the population.
    #[error("boid index {index} out of range for flock of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
