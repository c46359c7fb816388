/*
 * Spatial Index Module
 *
 * This module defines the QuadTree used for radius-range neighbor queries.
 * The tree partitions the world rectangle recursively: a node stores up to
 * QUADTREE_NODE_CAPACITY points directly, then subdivides into four equal
 * quadrants and lets further points descend into whichever quadrant contains
 * them.
 *
 * The tree is rebuilt from scratch every tick from the current boid
 * positions. There is no incremental update and no deletion, which keeps
 * "the tree reflects positions at the start of this tick" trivially true.
 */

use crate::QUADTREE_NODE_CAPACITY;

/// A stored point: a boid position tagged with its index in the flock array.
#[derive(Clone, Copy, Debug)]
struct TreePoint {
    x: f32,
    y: f32,
    index: usize,
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    // Half-open on both axes so a point on a split line lands in exactly
    // one quadrant: no duplication, no gaps.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    // Closest-point test between the rectangle and a circle
    pub fn intersects_circle(&self, cx: f32, cy: f32, r: f32) -> bool {
        let closest_x = cx.clamp(self.x, self.x + self.w);
        let closest_y = cy.clamp(self.y, self.y + self.h);
        let dx = cx - closest_x;
        let dy = cy - closest_y;
        dx * dx + dy * dy <= r * r
    }
}

pub struct QuadTree {
    boundary: Rect,
    capacity: usize,
    points: Vec<TreePoint>,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    pub fn new(boundary: Rect) -> Self {
        Self::with_capacity(boundary, QUADTREE_NODE_CAPACITY)
    }

    pub fn with_capacity(boundary: Rect, capacity: usize) -> Self {
        Self {
            boundary,
            capacity,
            points: Vec::new(),
            children: None,
        }
    }

    // Insert a point; returns false if it lies outside the boundary
    pub fn insert(&mut self, x: f32, y: f32, index: usize) -> bool {
        if !self.boundary.contains(x, y) {
            return false;
        }
        if self.points.len() < self.capacity {
            self.points.push(TreePoint { x, y, index });
            return true;
        }
        let children = self
            .children
            .get_or_insert_with(|| Self::subdivide(self.boundary, self.capacity));
        for child in children.iter_mut() {
            if child.insert(x, y, index) {
                return true;
            }
        }
        false
    }

    // Collect indices of all stored points within r of (cx, cy), pruning
    // subtrees whose boundary does not touch the query circle
    pub fn query_circle(&self, cx: f32, cy: f32, r: f32, out: &mut Vec<usize>) {
        if !self.boundary.intersects_circle(cx, cy, r) {
            return;
        }
        for p in &self.points {
            let dx = p.x - cx;
            let dy = p.y - cy;
            if dx * dx + dy * dy <= r * r {
                out.push(p.index);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_circle(cx, cy, r, out);
            }
        }
    }

    fn subdivide(boundary: Rect, capacity: usize) -> Box<[QuadTree; 4]> {
        let hw = boundary.w * 0.5;
        let hh = boundary.h * 0.5;
        let Rect { x, y, .. } = boundary;

        Box::new([
            QuadTree::with_capacity(Rect::new(x, y, hw, hh), capacity),
            QuadTree::with_capacity(Rect::new(x + hw, y, hw, hh), capacity),
            QuadTree::with_capacity(Rect::new(x, y + hh, hw, hh), capacity),
            QuadTree::with_capacity(Rect::new(x + hw, y + hh, hw, hh), capacity),
        ])
    }
}
