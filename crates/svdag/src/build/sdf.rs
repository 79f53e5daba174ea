//! Recursive pool construction from an occupancy predicate.
//!
//! The predicate answers "is this cell solid" given the cell center and
//! half edge, which is how signed distance fields are sampled without the
//! core knowing anything about distances. See `sdf_samplers`-style shapes
//! in the tests for typical predicates.

use std::collections::HashMap;

use glam::Vec3;

use crate::bounds::Cube;
use crate::build::{anchor_root, intern};
use crate::node::{Node, LEAF};
use crate::pool::NodePool;

/// Build a pool of `depth` levels over `cube` from `inside`.
///
/// Cells at `depth` are leaves: a leaf is solid iff
/// `inside(center, half_edge)`. Identical subtrees are shared as they are
/// built. Interior nodes whose octants are all solid are kept as nodes
/// rather than collapsed to a leaf, so depth stays uniform across the
/// structure.
///
/// A predicate panic propagates; the pool built so far is dropped with the
/// locals and never observed.
///
/// # Panics
/// Debug-asserts a positive cube edge.
pub fn from_fn(depth: u32, cube: Cube, inside: impl Fn(Vec3, f32) -> bool) -> NodePool {
  debug_assert!(cube.edge > 0.0, "bounding cube must have a positive edge");
  let mut pool = NodePool::new();
  let mut dedup: HashMap<Node, i32> = HashMap::new();
  let slot = build_cell(&mut pool, &mut dedup, &inside, cube, depth);
  anchor_root(&mut pool, slot);
  pool
}

/// Slot value for the cell `cube` with `depth` levels below it.
fn build_cell(
  pool: &mut NodePool,
  dedup: &mut HashMap<Node, i32>,
  inside: &impl Fn(Vec3, f32) -> bool,
  cube: Cube,
  depth: u32,
) -> i32 {
  if depth == 0 {
    return if inside(cube.center(), cube.half()) {
      LEAF
    } else {
      0
    };
  }
  let mut node = Node::new();
  for octant in 0..8 {
    let slot = build_cell(pool, dedup, inside, cube.octant(octant), depth - 1);
    node.set_child(octant, slot);
  }
  intern(pool, dedup, node)
}

#[cfg(test)]
#[path = "sdf_test.rs"]
mod sdf_test;
