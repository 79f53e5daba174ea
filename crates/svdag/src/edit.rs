//! Structural edits on an existing pool.
//!
//! The pool is a DAG: one child index may be referenced by many parents.
//! Editing a shared node in place would silently rewrite every region that
//! shares it, so the operations here only ever mutate the root (which has
//! no parents) or nodes they just appended. [`duplicate_child`] and
//! [`subdivide_child`] are the sanctioned way to obtain a private copy
//! before deeper edits.
//!
//! [`combine`] and [`subtract`] append their merge results at the tail and
//! leave the source graphs untouched, which temporarily breaks the
//! "children before parents" ordering (the graph stays acyclic and
//! in-bounds). Recompressing restores the strict ordering and sweeps the
//! intermediates; pass `recompress = true` unless batching several edits.

use crate::node::Node;
use crate::pool::NodePool;

/// Append a shallow copy of the child node at `pool[parent].child(octant)`
/// and repoint the parent slot at the copy.
///
/// The copy shares its grandchildren with the original, so the subtree
/// remains a DAG. Returns the new node's index, or `None` when the slot
/// holds no interior child (empty or leaf).
pub fn duplicate_child(pool: &mut NodePool, parent: usize, octant: usize) -> Option<usize> {
  let slot = pool.get(parent).child(octant);
  if slot <= 0 {
    return None;
  }
  let copy = *pool.get(NodePool::slot_index(slot));
  let index = pool.push(copy);
  pool.get_mut(parent).set_child(octant, NodePool::index_slot(index));
  Some(index)
}

/// Replace `pool[parent].child(octant)` with an interior node whose 8
/// slots all hold the old value: the same volume, represented one level
/// deeper.
///
/// Works on leaf and interior slots alike; returns `None` only when the
/// slot is empty.
pub fn subdivide_child(pool: &mut NodePool, parent: usize, octant: usize) -> Option<usize> {
  let slot = pool.get(parent).child(octant);
  if slot == 0 {
    return None;
  }
  let index = pool.push(Node::from_children([slot; 8]));
  pool.get_mut(parent).set_child(octant, NodePool::index_slot(index));
  Some(index)
}

/// Merge `other`'s occupancy into `pool`.
///
/// `other` is copied in with its references shifted past the existing
/// nodes; the argument itself is never mutated. Slot collisions resolve
/// per octant:
///
/// - one side empty: the other side is adopted unchanged
/// - leaf vs leaf: `overwrite` picks the second operand, otherwise the
///   first stays
/// - leaf vs interior: `overwrite` picks the second operand, otherwise the
///   leaf wins (solid dominates)
/// - interior vs interior: merged recursively into a fresh node
///
/// # Panics
/// Panics if either pool is zero-length; a valid pool always holds at
/// least its root node (an empty volume is one all-zero root).
pub fn combine(pool: &mut NodePool, other: &NodePool, overwrite: bool, recompress: bool) {
  assert!(!pool.is_empty(), "combine target pool has no root node");
  assert!(!other.is_empty(), "combine argument pool has no root node");
  let offset = pool.len() as i32;
  for index in 0..other.len() {
    pool.push(other.get(index).shifted(offset));
  }
  let root_a = pool.root_index();
  let root_b = offset as usize + other.root_index();
  for octant in 0..8 {
    let a = pool.get(root_a).child(octant);
    let b = pool.get(root_b).child(octant);
    let merged = merge_slot(pool, a, b, overwrite);
    pool.get_mut(root_a).set_child(octant, merged);
  }
  if recompress {
    pool.compress();
  }
}

/// Merged slot value for an `(a, b)` pair, appending nodes as needed.
fn merge_slot(pool: &mut NodePool, a: i32, b: i32, overwrite: bool) -> i32 {
  if b == 0 {
    return a;
  }
  if a == 0 {
    return b;
  }
  if a < 0 && b < 0 {
    return if overwrite { b } else { a };
  }
  if a > 0 && b > 0 {
    let mut node = Node::new();
    for octant in 0..8 {
      let child_a = pool.get(NodePool::slot_index(a)).child(octant);
      let child_b = pool.get(NodePool::slot_index(b)).child(octant);
      let merged = merge_slot(pool, child_a, child_b, overwrite);
      node.set_child(octant, merged);
    }
    return NodePool::index_slot(pool.push(node));
  }
  // One leaf, one interior.
  if overwrite {
    b
  } else if a < 0 {
    a
  } else {
    b
  }
}

/// Carve `other`'s occupancy out of `pool`.
///
/// Same shifting step as [`combine`]; per octant:
///
/// - second side empty: first side kept
/// - first side empty, or the second side solid here: the cell empties
/// - first side solid, second side interior: the leaf spreads into an
///   implicit all-leaf interior so the finer geometry can carve it
/// - interior vs interior: carved recursively; subtrees that empty out
///   collapse back to 0
///
/// # Panics
/// Panics if either pool is zero-length; a valid pool always holds at
/// least its root node (an empty volume is one all-zero root).
pub fn subtract(pool: &mut NodePool, other: &NodePool, recompress: bool) {
  assert!(!pool.is_empty(), "subtract target pool has no root node");
  assert!(!other.is_empty(), "subtract argument pool has no root node");
  let offset = pool.len() as i32;
  for index in 0..other.len() {
    pool.push(other.get(index).shifted(offset));
  }
  let root_a = pool.root_index();
  let root_b = offset as usize + other.root_index();
  for octant in 0..8 {
    let a = pool.get(root_a).child(octant);
    let b = pool.get(root_b).child(octant);
    let carved = subtract_slot(pool, a, b);
    pool.get_mut(root_a).set_child(octant, carved);
  }
  if recompress {
    pool.compress();
  }
}

/// Carved slot value for an `(a, b)` pair, appending nodes as needed.
fn subtract_slot(pool: &mut NodePool, a: i32, b: i32) -> i32 {
  if b == 0 || a == 0 {
    // Nothing to remove, or nothing there.
    return a;
  }
  if b < 0 {
    // Solid here on the subtrahend side: the whole cell goes, leaf or not.
    return 0;
  }
  // The subtrahend is interior; a solid minuend spreads one level down.
  let mut node = Node::new();
  for octant in 0..8 {
    let child_a = if a < 0 {
      a
    } else {
      pool.get(NodePool::slot_index(a)).child(octant)
    };
    let child_b = pool.get(NodePool::slot_index(b)).child(octant);
    let carved = subtract_slot(pool, child_a, child_b);
    node.set_child(octant, carved);
  }
  if node.is_empty() {
    return 0;
  }
  NodePool::index_slot(pool.push(node))
}

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;
