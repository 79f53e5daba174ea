use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::node::LEAF;

/// Hand-build the single-leaf pool from the depth-1 "octant 0 solid"
/// scenario.
fn single_leaf_pool() -> NodePool {
  let mut pool = NodePool::new();
  let root = pool.push(Node::from_children([LEAF, 0, 0, 0, 0, 0, 0, 0]));
  pool.set_root(root);
  pool
}

#[test]
fn test_push_get_len() {
  let mut pool = NodePool::new();
  assert!(pool.is_empty());

  let a = pool.push(Node::from_children([LEAF; 8]));
  let b = pool.push(Node::from_children([NodePool::index_slot(a); 8]));
  assert_eq!(a, 0);
  assert_eq!(b, 1);
  assert_eq!(pool.len(), 2);
  assert_eq!(pool.get(0).child(0), LEAF);
  assert_eq!(pool.get(1).child(0), 1);
}

#[test]
#[should_panic]
fn test_get_out_of_range_panics() {
  let pool = NodePool::new();
  pool.get(0);
}

#[test]
#[should_panic]
fn test_set_root_out_of_range_panics() {
  let mut pool = NodePool::new();
  pool.set_root(0);
}

/// Slot/index conversion is 1-based so index 0 stays addressable.
#[test]
fn test_slot_index_conversion() {
  assert_eq!(NodePool::index_slot(0), 1);
  assert_eq!(NodePool::index_slot(41), 42);
  assert_eq!(NodePool::slot_index(1), 0);
  assert_eq!(NodePool::slot_index(42), 41);
  for index in 0..100 {
    assert_eq!(NodePool::slot_index(NodePool::index_slot(index)), index);
  }
}

/// shift_indexes(k) then shift_indexes(-k) is the identity, and leaves and
/// empties never move.
#[test]
fn test_shift_indexes_roundtrip() {
  let mut pool = NodePool::new();
  pool.push(Node::from_children([LEAF; 8]));
  pool.push(Node::from_children([1, 0, LEAF, 0, 1, 0, 0, 0]));
  pool.push(Node::from_children([2, 1, 0, 0, 0, 0, 0, LEAF]));
  pool.set_root(2);
  let before = pool.clone();

  pool.shift_indexes(7);
  assert_eq!(pool.get(1).children(), &[8, 0, LEAF, 0, 8, 0, 0, 0]);
  assert_eq!(pool.get(2).children(), &[9, 8, 0, 0, 0, 0, 0, LEAF]);

  pool.shift_indexes(-7);
  assert_eq!(pool, before);
}

/// The single-root pool serializes to exactly 40 bytes: an 8-byte count
/// and one 32-byte record.
#[test]
fn test_serialize_layout() {
  let pool = single_leaf_pool();
  let mut bytes = Vec::new();
  pool.serialize(&mut bytes).unwrap();

  assert_eq!(bytes.len(), 40);
  assert_eq!(&bytes[0..8], &1u64.to_le_bytes());
  assert_eq!(&bytes[8..12], &(-1i32).to_le_bytes());
  assert_eq!(&bytes[12..40], &[0u8; 28]);
}

/// Serialize then deserialize reproduces the pool byte for byte.
#[test]
fn test_serialize_roundtrip_small() {
  let pool = single_leaf_pool();
  let mut bytes = Vec::new();
  pool.serialize(&mut bytes).unwrap();

  let loaded = NodePool::deserialize(bytes.as_slice()).unwrap();
  assert_eq!(loaded, pool);

  let mut bytes_again = Vec::new();
  loaded.serialize(&mut bytes_again).unwrap();
  assert_eq!(bytes, bytes_again);
}

/// Round-trip 1000 random but structurally valid nodes.
#[test]
fn test_serialize_roundtrip_random() {
  let mut rng = StdRng::seed_from_u64(0x5DA6);
  let mut pool = NodePool::new();
  for index in 0..1000usize {
    let mut node = Node::new();
    for octant in 0..8 {
      // Empty, leaf, or a reference to some strictly earlier node.
      let slot = match rng.gen_range(0..3) {
        0 => 0,
        1 => LEAF,
        _ if index > 0 => NodePool::index_slot(rng.gen_range(0..index)),
        _ => 0,
      };
      node.set_child(octant, slot);
    }
    pool.push(node);
  }
  pool.set_root(pool.len() - 1);

  let mut bytes = Vec::new();
  pool.serialize(&mut bytes).unwrap();
  assert_eq!(bytes.len(), 8 + 1000 * NODE_RECORD_BYTES as usize);

  let loaded = NodePool::deserialize(bytes.as_slice()).unwrap();
  assert_eq!(loaded.nodes(), pool.nodes());
  assert_eq!(loaded.root_index(), pool.len() - 1);

  let mut bytes_again = Vec::new();
  loaded.serialize(&mut bytes_again).unwrap();
  assert_eq!(bytes, bytes_again);
}

/// A slot referencing the node itself (or anything later) is corruption.
#[test]
fn test_deserialize_rejects_forward_reference() {
  // One node whose first slot claims to reference pool index 0 - itself.
  let mut bytes = Vec::new();
  bytes.extend_from_slice(&1u64.to_le_bytes());
  bytes.extend_from_slice(&1i32.to_le_bytes());
  bytes.extend_from_slice(&[0u8; 28]);

  let err = NodePool::deserialize(bytes.as_slice()).unwrap_err();
  assert!(err.to_string().contains("ahead of itself"), "{err}");
}

/// A zero-node file is malformed: even an empty volume stores its root.
#[test]
fn test_deserialize_rejects_zero_nodes() {
  let bytes = 0u64.to_le_bytes();
  let err = NodePool::deserialize(bytes.as_slice()).unwrap_err();
  assert!(err.to_string().contains("zero nodes"), "{err}");
}

/// A truncated stream fails instead of producing a short pool.
#[test]
fn test_deserialize_rejects_short_read() {
  let mut bytes = Vec::new();
  bytes.extend_from_slice(&2u64.to_le_bytes());
  bytes.extend_from_slice(&[0u8; 32]); // only one of the two records

  assert!(NodePool::deserialize(bytes.as_slice()).is_err());
}

/// File save/load round-trips and the size check catches trailing bytes.
#[test]
fn test_file_roundtrip_and_size_check() {
  let dir = std::env::temp_dir();
  let path = dir.join(format!("svdag_pool_test_{}.svdag", std::process::id()));

  let pool = single_leaf_pool();
  pool.save_file(&path).unwrap();
  let loaded = NodePool::load_file(&path).unwrap();
  assert_eq!(loaded, pool);

  // Appending a stray byte breaks the size arithmetic.
  let mut bytes = std::fs::read(&path).unwrap();
  bytes.push(0);
  std::fs::write(&path, &bytes).unwrap();
  assert!(NodePool::load_file(&path).is_err());

  std::fs::remove_file(&path).ok();
}
