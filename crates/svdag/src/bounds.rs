//! Axis-aligned cubes and canonical octant subdivision.
//!
//! Octant numbering is structural: every builder, editor and traversal in
//! this crate derives child `k` from the same bit layout, so two pools
//! built anywhere in the crate agree on which slot covers which volume.
//!
//! ```text
//! Octant bits (low half / high half along each axis):
//!   bit 0: X    bit 1: Y    bit 2: Z
//!
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```

use glam::Vec3;

/// Axis-aligned cube given by its minimum corner and edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
  /// Minimum corner.
  pub corner: Vec3,
  /// Edge length (positive).
  pub edge: f32,
}

impl Cube {
  /// Create a cube from its minimum corner and edge length.
  ///
  /// # Panics
  /// Debug-asserts that the edge is positive.
  pub fn new(corner: Vec3, edge: f32) -> Self {
    debug_assert!(edge > 0.0, "cube edge must be positive, got {edge}");
    Self { corner, edge }
  }

  /// Smallest cube anchored at `min` that covers the box `min..=max`.
  pub fn from_bounds(min: Vec3, max: Vec3) -> Self {
    let size = max - min;
    Self::new(min, size.x.max(size.y).max(size.z))
  }

  /// Center point.
  pub fn center(&self) -> Vec3 {
    self.corner + Vec3::splat(self.edge * 0.5)
  }

  /// Half the edge length.
  pub fn half(&self) -> f32 {
    self.edge * 0.5
  }

  /// Maximum corner.
  pub fn max(&self) -> Vec3 {
    self.corner + Vec3::splat(self.edge)
  }

  /// Sub-cube for octant `k`.
  ///
  /// # Panics
  /// Panics if `k >= 8`.
  pub fn octant(&self, k: usize) -> Cube {
    assert!(k < 8, "octant out of range: {k}");
    let half = self.half();
    let offset = Vec3::new(
      (k & 1) as f32,
      ((k >> 1) & 1) as f32,
      ((k >> 2) & 1) as f32,
    ) * half;
    Cube {
      corner: self.corner + offset,
      edge: half,
    }
  }

  /// Octant index of `point` relative to the cube center.
  ///
  /// Points on a mid-plane land in the high half, matching the `>=`
  /// convention used when descending.
  pub fn octant_of(&self, point: Vec3) -> usize {
    let center = self.center();
    (point.x >= center.x) as usize
      | (((point.y >= center.y) as usize) << 1)
      | (((point.z >= center.z) as usize) << 2)
  }

  /// Whether `point` lies inside the cube (boundary inclusive).
  pub fn contains(&self, point: Vec3) -> bool {
    let max = self.max();
    point.x >= self.corner.x
      && point.x <= max.x
      && point.y >= self.corner.y
      && point.y <= max.y
      && point.z >= self.corner.z
      && point.z <= max.z
  }
}

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;
