/*
 * Boid Flocking Engine - Module Definitions
 *
 * This file defines the module structure for the flocking simulation core.
 * The engine is headless: it advances boid kinematics one tick at a time and
 * leaves rendering, input, and frame pacing entirely to the host.
 */

// Re-export key components for easier access
pub use boid::Boid;
pub use error::FlockError;
pub use flock::{Flock, RuleWeights, WorldBounds};
pub use neighbors::{BruteForce, EngineMode, NeighborQuery, QuadTreeIndex};
pub use params::SimulationParams;
pub use spatial::{QuadTree, Rect};

// Define modules
pub mod boid;
pub mod error;
pub mod flock;
pub mod neighbors;
pub mod params;
pub mod spatial;

// Constants
/// Extra reach, beyond the flock radius, at which prey react to a predator.
pub const PREDATOR_FLEE_RANGE: f32 = 70.0;
/// Unnormalized scale applied to the prey-vs-predator avoidance vector.
/// Deliberately exaggerated so prey snap away instead of easing off.
pub const PREDATOR_FLEE_SCALE: f32 = 900.0;
/// Damping applied to accumulated acceleration before integration.
pub const ACCEL_DAMPING: f32 = 0.4;
/// Maximum number of points a quadtree node holds before subdividing.
pub const QUADTREE_NODE_CAPACITY: usize = 8;
