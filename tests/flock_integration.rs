/*
 * Cross-module tests for the flocking engine: the naive and quadtree
 * neighbor engines must be interchangeable, and the kinematic invariants
 * must hold over many ticks, not just one.
 */

use glam::vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use flock_sim::{Boid, EngineMode, Flock, WorldBounds};

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 1080.0;

/// Deterministic population: positions from a seeded RNG, fixed velocities.
fn seeded_population(n: usize, predators: usize, seed: u64) -> Vec<Boid> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut boids = Vec::with_capacity(n + predators);

    for i in 0..n + predators {
        let mut b = if i < n {
            Boid::new(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT))
        } else {
            Boid::new_predator(rng.gen_range(0.0..WIDTH), rng.gen_range(0.0..HEIGHT))
        };
        let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        b.velocity = vec2(theta.cos(), theta.sin()) * 2.0;
        boids.push(b);
    }
    boids
}

fn flock_with(mode: EngineMode, boids: &[Boid]) -> Flock {
    let bounds = WorldBounds::new(WIDTH, HEIGHT).unwrap();
    let mut flock = Flock::new(bounds, 40.0).unwrap();
    flock.set_mode(mode);
    for b in boids {
        flock.add_boid(b.clone());
    }
    flock
}

#[test]
fn basic_and_tree_engines_agree() {
    let population = seeded_population(200, 0, 7);
    let mut basic = flock_with(EngineMode::Basic, &population);
    let mut tree = flock_with(EngineMode::Tree, &population);

    for step in 0..30 {
        basic.step();
        tree.step();

        for i in 0..basic.len() {
            let a = basic.boid_at(i).unwrap();
            let b = tree.boid_at(i).unwrap();
            assert!(
                a.position.distance(b.position) < 1e-4,
                "positions diverged at step {step}, boid {i}: {:?} vs {:?}",
                a.position,
                b.position
            );
            assert!(a.velocity.distance(b.velocity) < 1e-4);
        }
    }
}

#[test]
fn engines_agree_with_predators_in_the_mix() {
    // Predator avoidance reaches beyond the flock radius; the tree engine
    // must not miss predators in that outer band.
    let population = seeded_population(150, 5, 99);
    let mut basic = flock_with(EngineMode::Basic, &population);
    let mut tree = flock_with(EngineMode::Tree, &population);

    for _ in 0..20 {
        basic.step();
        tree.step();
    }

    for i in 0..basic.len() {
        let a = basic.boid_at(i).unwrap();
        let b = tree.boid_at(i).unwrap();
        assert!(a.position.distance(b.position) < 1e-3);
    }
}

#[test]
fn parallel_evaluation_matches_sequential() {
    let population = seeded_population(100, 2, 3);
    let mut sequential = flock_with(EngineMode::Tree, &population);
    let mut parallel = flock_with(EngineMode::Tree, &population);
    parallel.set_parallel(true);

    for _ in 0..10 {
        sequential.step();
        parallel.step();
    }

    for i in 0..sequential.len() {
        let a = sequential.boid_at(i).unwrap();
        let b = parallel.boid_at(i).unwrap();
        // Per-boid force evaluation is deterministic, so this is exact
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }
}

#[test]
fn speed_and_position_invariants_hold_over_long_runs() {
    let population = seeded_population(300, 10, 42);
    let mut flock = flock_with(EngineMode::Tree, &population);

    for _ in 0..100 {
        flock.step();

        for boid in flock.boids() {
            assert!(boid.velocity.length() <= boid.max_speed + 1e-4);
            assert!(boid.position.x >= 0.0 && boid.position.x < WIDTH);
            assert!(boid.position.y >= 0.0 && boid.position.y < HEIGHT);
            assert!(boid.acceleration == glam::Vec2::ZERO);
        }
    }
}

#[test]
fn reconfiguring_mid_run_takes_effect_next_step() {
    let population = seeded_population(50, 0, 11);
    let mut flock = flock_with(EngineMode::Tree, &population);

    flock.step();
    flock.set_mode(EngineMode::Basic);
    flock.set_weights(1.5, 0.5, 0.5);
    flock.set_radius(60.0).unwrap();
    flock.step();

    assert_eq!(flock.mode(), EngineMode::Basic);
    assert_eq!(flock.radius(), 60.0);
    assert_eq!(flock.len(), 50);
}
