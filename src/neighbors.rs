/*
 * Neighbor Query Module
 *
 * The two neighbor-finding strategies behind Flock::step(), selectable at
 * runtime. Both hand the steering rules an index list resolved against the
 * single owned boid array; the rules' own distance guards do the final
 * filtering, so the strategies must only never omit a boid that could
 * contribute a force.
 *
 * - BruteForce: every other boid is a candidate. O(n) per boid, O(n^2) per
 *   tick. The reference semantics.
 * - QuadTreeIndex: rebuilds a quadtree from the pre-tick position snapshot
 *   and range-queries it. Sublinear on average when boids are spread out,
 *   and a pure filtering optimization over BruteForce.
 */

use std::str::FromStr;

use crate::boid::Boid;
use crate::flock::WorldBounds;
use crate::spatial::{QuadTree, Rect};
use crate::PREDATOR_FLEE_RANGE;

/// Which neighbor-finding strategy a Flock runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineMode {
    /// Full-population scan.
    Basic,
    /// Quadtree radius queries.
    #[default]
    Tree,
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(EngineMode::Basic),
            "tree" => Ok(EngineMode::Tree),
            other => Err(format!("unknown engine '{other}', expected 'basic' or 'tree'")),
        }
    }
}

pub trait NeighborQuery: Send + Sync {
    /// Rebuild internal state from the boid positions at the start of a tick.
    fn rebuild(&mut self, boids: &[Boid], bounds: &WorldBounds);

    /// Push the candidate neighbor indices for boid `index` into `out`,
    /// excluding `index` itself.
    fn neighbors_of(&self, boids: &[Boid], index: usize, radius: f32, out: &mut Vec<usize>);
}

/// Every other boid is a candidate neighbor.
#[derive(Default)]
pub struct BruteForce;

impl NeighborQuery for BruteForce {
    fn rebuild(&mut self, _boids: &[Boid], _bounds: &WorldBounds) {}

    fn neighbors_of(&self, boids: &[Boid], index: usize, _radius: f32, out: &mut Vec<usize>) {
        out.extend((0..boids.len()).filter(|&j| j != index));
    }
}

/// Quadtree-backed candidate search, rebuilt wholesale every tick.
#[derive(Default)]
pub struct QuadTreeIndex {
    tree: Option<QuadTree>,
}

impl NeighborQuery for QuadTreeIndex {
    fn rebuild(&mut self, boids: &[Boid], bounds: &WorldBounds) {
        let mut tree = QuadTree::new(Rect::new(0.0, 0.0, bounds.width, bounds.height));
        for (i, boid) in boids.iter().enumerate() {
            // A boid the host placed outside the world simply misses one
            // tick of the index; wrap_edges brings it back in range.
            tree.insert(boid.position.x, boid.position.y, i);
        }
        self.tree = Some(tree);
    }

    fn neighbors_of(&self, boids: &[Boid], index: usize, radius: f32, out: &mut Vec<usize>) {
        let Some(tree) = &self.tree else {
            return;
        };
        let pos = boids[index].position;

        // Query out to the predator flee range so prey never miss a predator
        // sitting in the annulus beyond the plain flock radius; the rules
        // re-check exact distances anyway.
        let reach = radius + PREDATOR_FLEE_RANGE;
        tree.query_circle(pos.x, pos.y, reach, out);
        out.retain(|&j| j != index);
        // Ascending order gives the rules the same summation order as the
        // full scan, so the two engines stay numerically interchangeable
        out.sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn boid_at(x: f32, y: f32) -> Boid {
        let mut b = Boid::new(x, y);
        b.velocity = vec2(1.0, 0.0);
        b
    }

    #[test]
    fn engine_mode_parses_cli_names() {
        assert_eq!("basic".parse::<EngineMode>().unwrap(), EngineMode::Basic);
        assert_eq!("tree".parse::<EngineMode>().unwrap(), EngineMode::Tree);
        assert!("grid".parse::<EngineMode>().is_err());
    }

    #[test]
    fn brute_force_returns_all_but_self() {
        let boids: Vec<Boid> = (0..5).map(|i| boid_at(i as f32 * 10.0, 0.0)).collect();
        let finder = BruteForce;

        let mut out = Vec::new();
        finder.neighbors_of(&boids, 2, 40.0, &mut out);
        assert_eq!(out, vec![0, 1, 3, 4]);
    }

    #[test]
    fn tree_index_excludes_self_and_far_boids() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let boids = vec![
            boid_at(100.0, 100.0),
            boid_at(110.0, 100.0),
            boid_at(900.0, 900.0),
        ];

        let mut finder = QuadTreeIndex::default();
        finder.rebuild(&boids, &bounds);

        let mut out = Vec::new();
        finder.neighbors_of(&boids, 0, 40.0, &mut out);
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn tree_index_reaches_into_predator_annulus() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        // 90 apart: outside a radius of 40, inside 40 + flee range
        let boids = vec![boid_at(100.0, 100.0), boid_at(190.0, 100.0)];

        let mut finder = QuadTreeIndex::default();
        finder.rebuild(&boids, &bounds);

        let mut out = Vec::new();
        finder.neighbors_of(&boids, 0, 40.0, &mut out);
        assert_eq!(out, vec![1]);
    }
}
