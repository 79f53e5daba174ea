//! Builders that turn volumetric sources into node pools.
//!
//! Both builders share the same shape: recurse through octants, intern the
//! resulting node in a dedup map so identical subtrees are stored once,
//! and anchor the root at the pool tail. The result already satisfies the
//! no-duplicates invariant; running `compress` afterwards is a no-op until
//! the pool is edited.

use std::collections::HashMap;

use crate::node::Node;
use crate::pool::NodePool;

pub mod mesh;
pub mod sdf;

/// Slot value for `node`, appending it unless an equal node exists.
///
/// All-empty nodes are never stored; they are the 0 slot.
pub(crate) fn intern(pool: &mut NodePool, dedup: &mut HashMap<Node, i32>, node: Node) -> i32 {
  if node.is_empty() {
    return 0;
  }
  if let Some(&slot) = dedup.get(&node) {
    return slot;
  }
  let slot = NodePool::index_slot(pool.push(node));
  dedup.insert(node, slot);
  slot
}

/// Turn a recursion result into a pool with its root at the tail.
///
/// A positive slot is already the tail node (an in-progress root can never
/// dedup against its own descendants). A negative slot means the whole
/// cube came back solid at depth 0 and is materialized one level down; a
/// zero slot becomes the all-zero root that represents an empty volume.
pub(crate) fn anchor_root(pool: &mut NodePool, slot: i32) {
  let root = if slot > 0 {
    NodePool::slot_index(slot)
  } else if slot < 0 {
    pool.push(Node::from_children([slot; 8]))
  } else {
    pool.push(Node::new())
  };
  debug_assert_eq!(root, pool.len() - 1, "build roots land at the tail");
  pool.set_root(root);
}
