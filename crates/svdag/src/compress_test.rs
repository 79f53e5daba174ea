use glam::Vec3;

use super::*;
use crate::bounds::Cube;
use crate::build;
use crate::edit;
use crate::node::LEAF;
use crate::traverse::contains;

fn unit_cube() -> Cube {
  Cube::new(Vec3::new(-1.0, -1.0, -1.0), 2.0)
}

/// A pool with two identical interior nodes collapses to one plus the
/// rewritten root.
#[test]
fn test_duplicates_merge() {
  let mut pool = NodePool::new();
  pool.push(Node::from_children([LEAF; 8]));
  pool.push(Node::from_children([LEAF; 8]));
  let root = pool.push(Node::from_children([1, 2, 0, 0, 0, 0, 0, 0]));
  pool.set_root(root);

  pool.compress();

  assert_eq!(pool.len(), 2);
  assert_eq!(pool.root_index(), 1);
  assert_eq!(pool.get(0).children(), &[LEAF; 8]);
  // Both root slots now share the single surviving child.
  assert_eq!(pool.root().children(), &[1, 1, 0, 0, 0, 0, 0, 0]);
}

/// After compression no two nodes compare equal.
#[test]
fn test_no_structural_duplicates_remain() {
  let cube = unit_cube();
  let mut pool = build::sdf::from_fn(3, cube, |center, _| center.length() < 0.9);
  // Force duplicates back in via copy-on-write edits.
  let root = pool.root_index();
  edit::duplicate_child(&mut pool, root, 0);
  let root = pool.root_index();
  edit::duplicate_child(&mut pool, root, 7);

  pool.compress();

  for i in 0..pool.len() {
    for j in (i + 1)..pool.len() {
      assert_ne!(pool.get(i), pool.get(j), "nodes {i} and {j} are equal");
    }
  }
}

/// Compression is idempotent byte for byte.
#[test]
fn test_idempotent() {
  let cube = unit_cube();
  let mut pool = build::sdf::from_fn(4, cube, |center, _| center.x + center.y < 0.3);
  let root = pool.root_index();
  edit::duplicate_child(&mut pool, root, 2);

  pool.compress();
  let mut once = Vec::new();
  pool.serialize(&mut once).unwrap();

  pool.compress();
  let mut twice = Vec::new();
  pool.serialize(&mut twice).unwrap();

  assert_eq!(once, twice);
}

/// Nodes not reachable from the root are dropped.
#[test]
fn test_unreachable_nodes_dropped() {
  let mut pool = NodePool::new();
  pool.push(Node::from_children([LEAF; 8]));
  pool.push(Node::from_children([42; 8])); // orphan garbage
  let root = pool.push(Node::from_children([1, 0, 0, 0, 0, 0, 0, 0]));
  pool.set_root(root);

  pool.compress();

  assert_eq!(pool.len(), 2);
  assert!(pool.nodes().iter().all(|n| n.children() != &[42; 8]));
}

/// Point queries are identical before and after compression.
#[test]
fn test_queries_survive_compression() {
  let cube = unit_cube();
  let mut pool = build::sdf::from_fn(4, cube, |center, _| center.length() < 0.7);
  let root = pool.root_index();
  edit::duplicate_child(&mut pool, root, 0);
  let before = pool.clone();

  pool.compress();

  let samples = 8usize;
  for x in 0..samples {
    for y in 0..samples {
      for z in 0..samples {
        let point = cube.corner
          + Vec3::new(x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5) * (cube.edge / samples as f32);
        assert_eq!(
          contains(&before, cube, point),
          contains(&pool, cube, point),
          "query diverged at {point}"
        );
      }
    }
  }
}

/// The full solid at depth 2 compresses to exactly two nodes: one shared
/// all-leaf interior plus the root.
#[test]
fn test_full_solid_depth2_is_two_nodes() {
  let cube = unit_cube();
  let mut pool = build::sdf::from_fn(2, cube, |_, _| true);
  pool.compress();

  assert_eq!(pool.len(), 2);
  assert_eq!(pool.get(0).children(), &[LEAF; 8]);
  assert_eq!(pool.root().children(), &[1; 8]);
}

/// Compressing a zero-length pool is a no-op rather than a panic.
#[test]
fn test_compress_empty_pool() {
  let mut pool = NodePool::new();
  pool.compress();
  assert!(pool.is_empty());
}
