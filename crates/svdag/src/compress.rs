//! Pool compression: structural deduplication of the reachable graph.
//!
//! The walk is reverse post-order (children before parents), the only order
//! in which slots can be rewritten in one pass: by the time a parent is
//! visited, every child already has its canonical index in the output pool.
//! Nodes not reachable from the root are never visited and simply fall
//! away.

use std::collections::HashMap;

use crate::node::Node;
use crate::pool::NodePool;

impl NodePool {
  /// Deduplicate structurally identical subtrees and drop unreachable
  /// nodes.
  ///
  /// Idempotent, and invisible to queries: `contains` and `raycast` return
  /// the same results before and after. On return no two nodes compare
  /// equal and the root is the last node.
  pub fn compress(&mut self) {
    if self.is_empty() {
      return;
    }
    let mut out = NodePool::new();
    let mut canonical: HashMap<usize, i32> = HashMap::new();
    let mut dedup: HashMap<Node, i32> = HashMap::new();
    let root_slot = canonicalize(self, self.root_index(), &mut out, &mut canonical, &mut dedup);
    // The root always survives (even all-zero) and cannot dedup against a
    // proper descendant, so it lands at the tail.
    debug_assert_eq!(NodePool::slot_index(root_slot), out.len() - 1);
    out.set_root(NodePool::slot_index(root_slot));
    *self = out;
  }
}

/// Rewrite the subtree under `index` into `out`, returning its canonical
/// slot value.
///
/// `canonical` memoizes old index -> canonical slot so shared nodes are
/// visited exactly once; `dedup` maps canonicalized node values to the
/// surviving representative.
fn canonicalize(
  pool: &NodePool,
  index: usize,
  out: &mut NodePool,
  canonical: &mut HashMap<usize, i32>,
  dedup: &mut HashMap<Node, i32>,
) -> i32 {
  if let Some(&slot) = canonical.get(&index) {
    return slot;
  }
  let mut node = *pool.get(index);
  for octant in 0..8 {
    let slot = node.child(octant);
    if slot > 0 {
      let child = canonicalize(pool, NodePool::slot_index(slot), out, canonical, dedup);
      node.set_child(octant, child);
    }
  }
  let slot = match dedup.get(&node) {
    Some(&existing) => existing,
    None => {
      let slot = NodePool::index_slot(out.push(node));
      dedup.insert(node, slot);
      slot
    }
  };
  canonical.insert(index, slot);
  slot
}

#[cfg(test)]
#[path = "compress_test.rs"]
mod compress_test;
