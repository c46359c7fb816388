/*
 * Headless Host
 *
 * A thin batch driver around the flocking engine: builds a population from
 * CLI flags, steps it a fixed number of ticks, and logs throughput. Useful
 * for profiling the two neighbor engines against each other and for sanity
 * runs without any renderer attached.
 */

use std::time::Instant;

use clap::Parser;
use rand::Rng;
use tracing::{debug, info};

use flock_sim::{Boid, EngineMode, Flock, SimulationParams, WorldBounds};

/// Radius of the disc the initial prey population spawns in, centered on the
/// world. A tight spawn reduces the jitter of the first few ticks.
const SPAWN_RADIUS: f32 = 250.0;

#[derive(Parser)]
#[command(name = "flock-sim", about = "Headless boid flocking simulation")]
struct Cli {
    /// Number of prey boids
    #[arg(long, default_value_t = 500)]
    boids: usize,

    /// Number of predator boids
    #[arg(long, default_value_t = 0)]
    predators: usize,

    /// Flock interaction radius
    #[arg(long, default_value_t = 40.0)]
    radius: f32,

    /// Neighbor engine: full scan or quadtree
    #[arg(long, default_value = "tree")]
    engine: EngineMode,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    steps: usize,

    /// World width
    #[arg(long, default_value_t = 1920.0)]
    width: f32,

    /// World height
    #[arg(long, default_value_t = 1080.0)]
    height: f32,

    /// Evaluate forces in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose per-interval logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let params = SimulationParams {
        num_boids: cli.boids,
        num_predators: cli.predators,
        flock_radius: cli.radius,
        world_width: cli.width,
        world_height: cli.height,
        engine: cli.engine,
        parallel: cli.parallel,
        show_debug: cli.debug,
        ..SimulationParams::default()
    };
    params.validate()?;

    let mut flock = build_flock(&params)?;
    info!(
        boids = cli.boids,
        predators = cli.predators,
        radius = cli.radius,
        engine = ?cli.engine,
        parallel = cli.parallel,
        "starting simulation"
    );

    let report_every = (cli.steps / 10).max(1);
    let start = Instant::now();
    let mut interval_start = Instant::now();

    for tick in 1..=cli.steps {
        flock.step();

        if params.show_debug && tick % report_every == 0 {
            let elapsed = interval_start.elapsed();
            debug!(
                tick,
                interval_ms = elapsed.as_millis() as u64,
                ticks_per_sec = report_every as f64 / elapsed.as_secs_f64(),
                avg_speed = average_speed(&flock),
                "progress"
            );
            interval_start = Instant::now();
        }
    }

    let elapsed = start.elapsed();
    info!(
        steps = cli.steps,
        elapsed_ms = elapsed.as_millis() as u64,
        ticks_per_sec = cli.steps as f64 / elapsed.as_secs_f64(),
        avg_speed = average_speed(&flock),
        "simulation finished"
    );

    Ok(())
}

fn build_flock(params: &SimulationParams) -> Result<Flock, flock_sim::FlockError> {
    let bounds = WorldBounds::new(params.world_width, params.world_height)?;
    let mut flock = Flock::new(bounds, params.flock_radius)?;
    flock.set_mode(params.engine);
    flock.set_parallel(params.parallel);
    flock.set_weights(
        params.separation_weight,
        params.alignment_weight,
        params.cohesion_weight,
    );

    let mut rng = rand::thread_rng();
    let center_x = params.world_width * 0.5;
    let center_y = params.world_height * 0.5;

    // Prey spawn uniformly inside a disc around the world center
    for _ in 0..params.num_boids {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let r = SPAWN_RADIUS * rng.gen_range(0.0f32..1.0).sqrt();
        flock.add_boid(Boid::new(
            center_x + r * angle.cos(),
            center_y + r * angle.sin(),
        ));
    }

    // Predators spawn anywhere in the world
    for _ in 0..params.num_predators {
        flock.add_boid(Boid::new_predator(
            rng.gen_range(0.0..params.world_width),
            rng.gen_range(0.0..params.world_height),
        ));
    }

    Ok(flock)
}

fn average_speed(flock: &Flock) -> f32 {
    if flock.is_empty() {
        return 0.0;
    }
    let total: f32 = flock.boids().iter().map(|b| b.velocity.length()).sum();
    total / flock.len() as f32
}
