//! Triangle input for the voxelizing builder.
//!
//! The core consumes occupancy only: triangle count, vertex positions and
//! the scene bounds. Anything else a mesh format carries (normals,
//! materials, texture coordinates) stays with the importer.

use glam::Vec3;

/// Read access to triangle geometry.
pub trait TriangleScene {
  /// Total number of triangles.
  fn triangle_count(&self) -> usize;

  /// Vertex positions of triangle `index`.
  fn triangle(&self, index: usize) -> [Vec3; 3];

  /// Axis-aligned bounds of the whole scene as `(min, max)`.
  fn bounds(&self) -> (Vec3, Vec3);
}

/// Blanket impl for boxed trait objects.
impl TriangleScene for Box<dyn TriangleScene> {
  fn triangle_count(&self) -> usize {
    (**self).triangle_count()
  }

  fn triangle(&self, index: usize) -> [Vec3; 3] {
    (**self).triangle(index)
  }

  fn bounds(&self) -> (Vec3, Vec3) {
    (**self).bounds()
  }
}

/// Indexed triangle mesh with a cached bounding box.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
  positions: Vec<Vec3>,
  triangles: Vec<[u32; 3]>,
  min: Vec3,
  max: Vec3,
}

impl TriangleMesh {
  /// Build a mesh from vertex positions and triangle index triplets.
  ///
  /// # Panics
  /// Panics if a triangle references a vertex that does not exist.
  pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
    for triangle in &triangles {
      for &index in triangle {
        assert!(
          (index as usize) < positions.len(),
          "triangle references vertex {index} of {}",
          positions.len()
        );
      }
    }
    let mut min = Vec3::INFINITY;
    let mut max = Vec3::NEG_INFINITY;
    for &position in &positions {
      min = min.min(position);
      max = max.max(position);
    }
    if positions.is_empty() {
      min = Vec3::ZERO;
      max = Vec3::ZERO;
    }
    Self {
      positions,
      triangles,
      min,
      max,
    }
  }

  /// Vertex positions.
  pub fn positions(&self) -> &[Vec3] {
    &self.positions
  }

  /// Triangle index triplets.
  pub fn triangle_indices(&self) -> &[[u32; 3]] {
    &self.triangles
  }
}

impl TriangleScene for TriangleMesh {
  fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  fn triangle(&self, index: usize) -> [Vec3; 3] {
    let [a, b, c] = self.triangles[index];
    [
      self.positions[a as usize],
      self.positions[b as usize],
      self.positions[c as usize],
    ]
  }

  fn bounds(&self) -> (Vec3, Vec3) {
    (self.min, self.max)
  }
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;
