//! Read-only queries: parametric ray casting and point containment.
//!
//! The ray march is the classic parametric octree traversal: per-axis
//! entry/exit parameters pick the first child behind the entry plane, and
//! siblings are stepped in the order the ray crosses the mid-planes, so
//! the first solid leaf encountered is the nearest one. Negative direction
//! components are mirrored away up front and child indices are unmirrored
//! through an octant mask on lookup.

use glam::Vec3;

use crate::bounds::Cube;
use crate::pool::NodePool;

/// Stand-in for direction components that are exactly zero. Small enough
/// that the resulting parameters land far outside any real interval, large
/// enough that the divisions stay finite. Dividing by a true zero would
/// yield an `inf - inf = NaN` mid-plane parameter whenever the origin sits
/// inside that axis slab, and NaN comparisons corrupt the child visit
/// order.
const DIR_EPSILON: f32 = 1e-12;

/// Cast a ray at the pool over `cube`, returning the first solid hit
/// point.
///
/// `dir` need not be normalized; `max_dist` is measured in multiples of
/// its length. A positive slot reached at `max_depth` counts as solid, so
/// a coarse `max_depth` queries the structure at a coarse resolution.
/// Returns `None` when the ray misses, exits before hitting anything, or
/// would hit beyond `max_dist`.
///
/// # Panics
/// Panics on a zero direction vector.
pub fn raycast(
  pool: &NodePool,
  cube: Cube,
  origin: Vec3,
  dir: Vec3,
  max_depth: u32,
  max_dist: f32,
) -> Option<Vec3> {
  assert!(dir != Vec3::ZERO, "ray direction must be non-zero");
  if pool.is_empty() {
    return None;
  }

  // Mirror axes with a negative direction component so the march only
  // ever moves toward +X/+Y/+Z; `mirror` undoes it on slot lookup.
  let center = cube.center();
  let mut o = origin;
  let mut d = dir;
  let mut mirror = 0usize;
  if d.x < 0.0 {
    o.x = 2.0 * center.x - o.x;
    d.x = -d.x;
    mirror |= 1;
  }
  if d.y < 0.0 {
    o.y = 2.0 * center.y - o.y;
    d.y = -d.y;
    mirror |= 2;
  }
  if d.z < 0.0 {
    o.z = 2.0 * center.z - o.z;
    d.z = -d.z;
    mirror |= 4;
  }
  if d.x == 0.0 {
    d.x = DIR_EPSILON;
  }
  if d.y == 0.0 {
    d.y = DIR_EPSILON;
  }
  if d.z == 0.0 {
    d.z = DIR_EPSILON;
  }

  let t0 = (cube.corner - o) / d;
  let t1 = (cube.max() - o) / d;
  if t0.max_element() >= t1.min_element() || t1.min_element() < 0.0 {
    return None;
  }

  let t = if max_depth == 0 {
    // The root itself is the leaf level.
    if pool.root().is_empty() {
      None
    } else {
      Some(t0.max_element())
    }
  } else {
    descend(pool, pool.root_index(), max_depth, t0, t1, mirror, max_dist)
  }?;

  if t > max_dist {
    return None;
  }
  Some(origin + dir * t.max(0.0))
}

/// March the children of `index`, with `remaining >= 1` levels allowed
/// below it. Returns the entry parameter of the first solid hit.
fn descend(
  pool: &NodePool,
  index: usize,
  remaining: u32,
  t0: Vec3,
  t1: Vec3,
  mirror: usize,
  max_dist: f32,
) -> Option<f32> {
  let tm = 0.5 * (t0 + t1);
  let mut child = first_child(t0, tm);
  loop {
    let (ct0, ct1) = child_params(child, t0, tm, t1);
    let t_entry = ct0.max_element();
    if t_entry > max_dist {
      // Later siblings only get farther.
      return None;
    }
    // Children entirely behind the origin are skipped, not hit.
    if ct1.min_element() >= 0.0 {
      let slot = pool.get(index).child(child ^ mirror);
      if slot < 0 || (slot > 0 && remaining == 1) {
        return Some(t_entry);
      }
      if slot > 0 {
        let hit = descend(
          pool,
          NodePool::slot_index(slot),
          remaining - 1,
          ct0,
          ct1,
          mirror,
          max_dist,
        );
        if hit.is_some() {
          return hit;
        }
      }
    }
    child = next_child(child, ct1)?;
  }
}

/// First child crossed by the ray: an axis is already in its high half
/// when its mid-plane parameter lies before the node entry parameter.
fn first_child(t0: Vec3, tm: Vec3) -> usize {
  let t_entry = t0.max_element();
  let mut child = 0;
  if tm.x < t_entry {
    child |= 1;
  }
  if tm.y < t_entry {
    child |= 2;
  }
  if tm.z < t_entry {
    child |= 4;
  }
  child
}

/// Parameter interval of `child` within its parent's `(t0, tm, t1)`.
fn child_params(child: usize, t0: Vec3, tm: Vec3, t1: Vec3) -> (Vec3, Vec3) {
  let ct0 = Vec3::new(
    if child & 1 != 0 { tm.x } else { t0.x },
    if child & 2 != 0 { tm.y } else { t0.y },
    if child & 4 != 0 { tm.z } else { t0.z },
  );
  let ct1 = Vec3::new(
    if child & 1 != 0 { t1.x } else { tm.x },
    if child & 2 != 0 { t1.y } else { tm.y },
    if child & 4 != 0 { t1.z } else { tm.z },
  );
  (ct0, ct1)
}

/// Sibling entered after leaving `child` through its earliest exit plane.
///
/// Crossing a mid-plane sets that axis bit; if it is already set the ray
/// leaves the parent instead.
fn next_child(child: usize, ct1: Vec3) -> Option<usize> {
  let bit = if ct1.x <= ct1.y && ct1.x <= ct1.z {
    1
  } else if ct1.y <= ct1.z {
    2
  } else {
    4
  };
  if child & bit != 0 {
    None
  } else {
    Some(child | bit)
  }
}

/// Whether the octree-grid cell containing `point` is solid.
///
/// Descends by octant until a leaf or an empty slot settles it. Points
/// outside `cube` are never contained.
pub fn contains(pool: &NodePool, cube: Cube, point: Vec3) -> bool {
  if pool.is_empty() || !cube.contains(point) {
    return false;
  }
  let mut index = pool.root_index();
  let mut cell = cube;
  loop {
    let octant = cell.octant_of(point);
    let slot = pool.get(index).child(octant);
    if slot == 0 {
      return false;
    }
    if slot < 0 {
      return true;
    }
    index = NodePool::slot_index(slot);
    cell = cell.octant(octant);
  }
}

#[cfg(test)]
#[path = "traverse_test.rs"]
mod traverse_test;
