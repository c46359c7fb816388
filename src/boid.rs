/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * On top of the three rules, predators repel each other at short range and
 * prey flee any predator inside an extended radius.
 *
 * Rule evaluators are read-only: they take the boid array plus a neighbor
 * index list and return a steering force. Mutation happens only in update()
 * and wrap_edges(), which the owning Flock calls after all forces for the
 * tick have been computed.
 */

use glam::{vec2, Vec2};
use rand::Rng;

use crate::flock::{RuleWeights, WorldBounds};
use crate::{ACCEL_DAMPING, PREDATOR_FLEE_RANGE, PREDATOR_FLEE_SCALE};

#[derive(Clone, Debug)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub predator: bool,
}

impl Boid {
    pub fn new(x: f32, y: f32) -> Self {
        Self::spawn(x, y, false)
    }

    pub fn new_predator(x: f32, y: f32) -> Self {
        Self::spawn(x, y, true)
    }

    fn spawn(x: f32, y: f32, predator: bool) -> Self {
        let mut rng = rand::thread_rng();

        // Random initial heading; predators start slower than prey
        let theta = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = if predator { 1.0 } else { 2.0 };
        let velocity = vec2(theta.cos(), theta.sin()) * speed;

        Self {
            position: vec2(x, y),
            velocity,
            acceleration: Vec2::ZERO,
            max_speed: 7.5,
            max_force: 0.75,
            predator,
        }
    }

    // Apply a force to the boid; repeated calls accumulate
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    // Calculate separation force (avoid crowding neighbors).
    // Predator pairs double up on short-range repulsion; prey add a large
    // unnormalized flee vector against any predator within the extended range.
    pub fn separation(&self, boids: &[Boid], neighbor_indices: &[usize], radius: f32) -> Vec2 {
        let mut steering = Vec2::ZERO;
        let mut count = 0;

        for &i in neighbor_indices {
            let other = &boids[i];
            let d = self.position.distance(other.position);

            if d > 0.0 && d < radius {
                // Vector pointing away from the neighbor, weighted by distance
                let diff = (self.position - other.position).normalize() / d;
                steering += diff;
                count += 1;
            }

            if d > 0.0 && d < radius && self.predator && other.predator {
                let diff = (self.position - other.position).normalize() / d;
                steering += diff;
                count += 1;
            } else if d > 0.0
                && d < radius + PREDATOR_FLEE_RANGE
                && !self.predator
                && other.predator
            {
                // Abrupt flee response: not distance-normalized on purpose
                steering += (self.position - other.position) * PREDATOR_FLEE_SCALE;
                count += 1;
            }
        }

        if count > 0 {
            steering /= count as f32;
        }
        if steering.length() > 0.0 {
            // Implement Reynolds: Steering = Desired - Velocity
            steering = steering.normalize() * self.max_speed - self.velocity;
            steering = steering.clamp_length_max(self.max_force);
        }

        steering
    }

    // Calculate alignment force (steer towards average heading of neighbors)
    pub fn alignment(&self, boids: &[Boid], neighbor_indices: &[usize], radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for &i in neighbor_indices {
            let other = &boids[i];
            let d = self.position.distance(other.position);

            if d > 0.0 && d < radius {
                sum += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            sum /= count as f32;

            // Implement Reynolds: Steering = Desired - Velocity
            let desired = sum.normalize_or_zero() * self.max_speed;
            (desired - self.velocity).clamp_length_max(self.max_force)
        } else {
            Vec2::ZERO
        }
    }

    // Calculate cohesion force (steer towards average position of neighbors)
    pub fn cohesion(&self, boids: &[Boid], neighbor_indices: &[usize], radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for &i in neighbor_indices {
            let other = &boids[i];
            let d = self.position.distance(other.position);

            if d > 0.0 && d < radius {
                sum += other.position;
                count += 1;
            }
        }

        if count > 0 {
            sum /= count as f32;
            self.seek(sum)
        } else {
            Vec2::ZERO
        }
    }

    // Steer towards a target location at max speed
    pub fn seek(&self, target: Vec2) -> Vec2 {
        let desired = (target - self.position).normalize_or_zero() * self.max_speed;

        // Implement Reynolds: Steering = Desired - Velocity
        (desired - self.velocity).clamp_length_max(self.max_force)
    }

    // Combine the three weighted rules into a single steering force
    pub fn flock(
        &self,
        boids: &[Boid],
        neighbor_indices: &[usize],
        radius: f32,
        weights: &RuleWeights,
    ) -> Vec2 {
        let separation = self.separation(boids, neighbor_indices, radius) * weights.separation;
        let alignment = self.alignment(boids, neighbor_indices, radius) * weights.alignment;
        let cohesion = self.cohesion(boids, neighbor_indices, radius) * weights.cohesion;

        separation + alignment + cohesion
    }

    // Integrate one tick: dampen acceleration, update velocity and position
    pub fn update(&mut self) {
        // Soften direction changes so the turn is not abrupt
        self.acceleration *= ACCEL_DAMPING;
        self.velocity += self.acceleration;

        // Limit speed
        self.velocity = self.velocity.clamp_length_max(self.max_speed);

        self.position += self.velocity;

        // Reset acceleration each cycle
        self.acceleration = Vec2::ZERO;
    }

    // Wrap the boid around the world edges. One translation per axis is
    // always enough given per-tick displacement bounded by max_speed.
    pub fn wrap_edges(&mut self, bounds: &WorldBounds) {
        if self.position.x < 0.0 {
            self.position.x += bounds.width;
        }
        if self.position.y < 0.0 {
            self.position.y += bounds.height;
        }
        if self.position.x >= bounds.width {
            self.position.x -= bounds.width;
        }
        if self.position.y >= bounds.height {
            self.position.y -= bounds.height;
        }
    }

    // Angle of the velocity vector, for orientation-only rendering use
    pub fn heading(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x)
    }
}
