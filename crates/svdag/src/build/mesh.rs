//! Triangle voxelization: recursive octant subdivision with a
//! separating-axis triangle/cube overlap test.
//!
//! Each level re-filters the parent's candidate triangles against the
//! child cube with the full 13-axis SAT test; no spatial index is built.
//! That makes the builder slow on purpose - the payoff of the structure is
//! the dedup near the leaves, where flat and axis-aligned geometry
//! collapses into a handful of shared subtrees.

use std::collections::HashMap;

use glam::Vec3;
use smallvec::SmallVec;

use crate::bounds::Cube;
use crate::build::{anchor_root, intern};
use crate::node::{Node, LEAF};
use crate::pool::NodePool;
use crate::scene::TriangleScene;

/// Candidate triangle indices carried down one octant branch.
///
/// Near the leaves these sets are tiny; the inline capacity keeps the hot
/// part of the recursion off the heap.
type Candidates = SmallVec<[u32; 32]>;

/// Voxelize `scene` into a pool of `depth` levels over `cube`.
///
/// A triangle survives into a child octant iff it overlaps the child cube;
/// a leaf cell is solid iff any candidate reaches it. `progress` receives
/// a monotonic count of leaf-level octant evaluations - purely
/// observational, it cannot abort the build.
///
/// # Panics
/// Debug-asserts a positive cube edge.
pub fn from_scene(
  scene: &impl TriangleScene,
  depth: u32,
  cube: Cube,
  mut progress: impl FnMut(u64),
) -> NodePool {
  debug_assert!(cube.edge > 0.0, "bounding cube must have a positive edge");
  let mut pool = NodePool::new();
  let mut dedup: HashMap<Node, i32> = HashMap::new();
  let candidates: Candidates = (0..scene.triangle_count() as u32).collect();
  let mut leaves_done: u64 = 0;

  let slot = if depth == 0 {
    leaves_done += 1;
    progress(leaves_done);
    let solid = candidates
      .iter()
      .any(|&t| tri_cube_overlap(cube.center(), cube.half(), scene.triangle(t as usize)));
    if solid {
      LEAF
    } else {
      0
    }
  } else {
    build_cell(
      scene,
      &mut pool,
      &mut dedup,
      cube,
      depth,
      &candidates,
      &mut leaves_done,
      &mut progress,
    )
  };
  anchor_root(&mut pool, slot);
  pool
}

/// Slot value for the cell `cube` with `depth >= 1` levels below it.
#[allow(clippy::too_many_arguments)]
fn build_cell(
  scene: &impl TriangleScene,
  pool: &mut NodePool,
  dedup: &mut HashMap<Node, i32>,
  cube: Cube,
  depth: u32,
  candidates: &[u32],
  leaves_done: &mut u64,
  progress: &mut impl FnMut(u64),
) -> i32 {
  let mut node = Node::new();
  for octant in 0..8 {
    let child_cube = cube.octant(octant);
    let center = child_cube.center();
    let half = child_cube.half();
    let subset: Candidates = candidates
      .iter()
      .copied()
      .filter(|&t| tri_cube_overlap(center, half, scene.triangle(t as usize)))
      .collect();
    if depth == 1 {
      *leaves_done += 1;
      progress(*leaves_done);
    }
    if subset.is_empty() {
      continue;
    }
    let slot = if depth == 1 {
      LEAF
    } else {
      build_cell(
        scene,
        pool,
        dedup,
        child_cube,
        depth - 1,
        &subset,
        leaves_done,
        progress,
      )
    };
    node.set_child(octant, slot);
  }
  intern(pool, dedup, node)
}

/// Triangle/cube overlap via the separating axis theorem.
///
/// The 13 axes are the 3 cube face normals, the triangle plane normal and
/// the 9 cross products of cube edge directions with triangle edges.
/// Touching counts as overlap.
pub fn tri_cube_overlap(center: Vec3, half: f32, triangle: [Vec3; 3]) -> bool {
  // Work with the cube at the origin.
  let v0 = triangle[0] - center;
  let v1 = triangle[1] - center;
  let v2 = triangle[2] - center;

  // Cube face normals: plain AABB rejection.
  let min = v0.min(v1).min(v2);
  let max = v0.max(v1).max(v2);
  if min.x > half || max.x < -half {
    return false;
  }
  if min.y > half || max.y < -half {
    return false;
  }
  if min.z > half || max.z < -half {
    return false;
  }

  let e0 = v1 - v0;
  let e1 = v2 - v1;
  let e2 = v0 - v2;

  // Triangle plane: the cube must straddle it.
  let normal = e0.cross(e1);
  let distance = normal.dot(v0);
  let radius = half * (normal.x.abs() + normal.y.abs() + normal.z.abs());
  if distance.abs() > radius {
    return false;
  }

  // Edge cross products.
  for edge in [e0, e1, e2] {
    for axis in [
      Vec3::new(0.0, -edge.z, edge.y),
      Vec3::new(edge.z, 0.0, -edge.x),
      Vec3::new(-edge.y, edge.x, 0.0),
    ] {
      let p0 = axis.dot(v0);
      let p1 = axis.dot(v1);
      let p2 = axis.dot(v2);
      let lo = p0.min(p1).min(p2);
      let hi = p0.max(p1).max(p2);
      let radius = half * (axis.x.abs() + axis.y.abs() + axis.z.abs());
      if lo > radius || hi < -radius {
        return false;
      }
    }
  }

  true
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
