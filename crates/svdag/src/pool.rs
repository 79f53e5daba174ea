//! NodePool - flat storage for an SVDAG plus its root anchor.
//!
//! The pool is pure topology: the bounding cube and maximum depth are
//! supplied by the queries that walk it. Indices inside slots are 1-based
//! (slot `v` points at pool index `v - 1`) so that index 0 stays usable and
//! `0` keeps meaning "empty".
//!
//! # On-disk format
//!
//! ```text
//! u64 LE   node count
//! 32 bytes per node: 8 x i32 LE slots, pool order, root last
//! ```
//!
//! No header, no version, no checksum. Loading validates that every
//! positive slot references an earlier node, which also rules out cycles.

use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::node::{Node, CHILD_COUNT};

/// Size in bytes of one serialized node record.
pub const NODE_RECORD_BYTES: u64 = (CHILD_COUNT * 4) as u64;

/// Append-only array of nodes with an explicit root index.
///
/// Builders, [`compress`](NodePool::compress) and
/// [`deserialize`](NodePool::deserialize) leave the root at the tail;
/// the explicit field is what keeps edits honest in between.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePool {
  nodes: Vec<Node>,
  root: usize,
}

impl NodePool {
  /// Create an empty pool.
  pub fn new() -> Self {
    Self {
      nodes: Vec::new(),
      root: 0,
    }
  }

  /// Number of nodes.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Whether the pool holds no nodes at all.
  ///
  /// Note that an *empty volume* is represented by one all-zero root node,
  /// not by a zero-length pool; builders never return this state.
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// All nodes, pool order.
  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  /// Node at `index`.
  ///
  /// # Panics
  /// Panics when out of range; indices come from slots this pool handed
  /// out, so an out-of-range index is a programming error.
  pub fn get(&self, index: usize) -> &Node {
    &self.nodes[index]
  }

  /// Mutable access for editors in this crate.
  ///
  /// Nodes may be shared by many parents; callers must only mutate nodes
  /// they know to have a single parent (the root, or a fresh copy).
  pub(crate) fn get_mut(&mut self, index: usize) -> &mut Node {
    &mut self.nodes[index]
  }

  /// Append a node, returning its index.
  ///
  /// The caller must only store references to nodes already present, which
  /// is what keeps the graph acyclic.
  pub fn push(&mut self, node: Node) -> usize {
    self.nodes.push(node);
    self.nodes.len() - 1
  }

  /// Index of the root node.
  pub fn root_index(&self) -> usize {
    self.root
  }

  /// Root node.
  ///
  /// # Panics
  /// Panics on a zero-length pool.
  pub fn root(&self) -> &Node {
    &self.nodes[self.root]
  }

  /// Re-anchor the root.
  ///
  /// # Panics
  /// Panics if `index` is out of range.
  pub fn set_root(&mut self, index: usize) {
    assert!(index < self.nodes.len(), "root index {index} out of range");
    self.root = index;
  }

  /// Pool index referenced by a positive slot value.
  pub fn slot_index(slot: i32) -> usize {
    debug_assert!(slot > 0, "slot {slot} does not reference a node");
    (slot - 1) as usize
  }

  /// Slot value referencing a pool index.
  pub fn index_slot(index: usize) -> i32 {
    index as i32 + 1
  }

  /// Add `offset` to every positive slot of every node.
  ///
  /// Empty (0) and leaf (negative) slots are unchanged. Used when
  /// concatenating pools; `shift_indexes(k)` followed by
  /// `shift_indexes(-k)` is the identity.
  pub fn shift_indexes(&mut self, offset: i32) {
    for node in self.nodes.iter_mut() {
      *node = node.shifted(offset);
    }
  }

  /// Write the pool to `sink`: u64 LE count, then the raw node records.
  ///
  /// Readers anchor the root at the last record, so compress first if
  /// edits may have moved it off the tail.
  pub fn serialize(&self, mut sink: impl Write) -> Result<()> {
    sink
      .write_all(&(self.nodes.len() as u64).to_le_bytes())
      .context("writing node count")?;
    let mut record = [0u8; NODE_RECORD_BYTES as usize];
    for node in &self.nodes {
      for (slot, bytes) in node.children().iter().zip(record.chunks_exact_mut(4)) {
        bytes.copy_from_slice(&slot.to_le_bytes());
      }
      sink.write_all(&record).context("writing node record")?;
    }
    Ok(())
  }

  /// Read a pool written by [`serialize`](NodePool::serialize).
  ///
  /// A pool holds at least its root node, and every positive slot must
  /// reference an earlier node; anything else is corruption and aborts
  /// the load. The root is the last record.
  pub fn deserialize(mut source: impl Read) -> Result<Self> {
    let mut count_bytes = [0u8; 8];
    source
      .read_exact(&mut count_bytes)
      .context("reading node count")?;
    let count = usize::try_from(u64::from_le_bytes(count_bytes))
      .context("node count does not fit this platform")?;
    if count == 0 {
      bail!("pool has zero nodes; even an empty volume stores its root");
    }

    let mut nodes = Vec::new();
    let mut record = [0u8; NODE_RECORD_BYTES as usize];
    for index in 0..count {
      source
        .read_exact(&mut record)
        .with_context(|| format!("reading node {index} of {count}"))?;
      let mut children = [0i32; CHILD_COUNT];
      for (slot, bytes) in children.iter_mut().zip(record.chunks_exact(4)) {
        *slot = i32::from_le_bytes(bytes.try_into().unwrap());
      }
      for (octant, &slot) in children.iter().enumerate() {
        if slot > 0 && Self::slot_index(slot) >= index {
          bail!(
            "node {index} octant {octant} references index {} ahead of itself",
            Self::slot_index(slot)
          );
        }
      }
      nodes.push(Node::from_children(children));
    }
    let root = count - 1;
    Ok(Self { nodes, root })
  }

  /// Serialize to a file.
  pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
      .with_context(|| format!("creating {}", path.display()))?;
    let mut sink = BufWriter::new(file);
    self.serialize(&mut sink)?;
    sink
      .into_inner()
      .map_err(|err| err.into_error())
      .and_then(|file| file.sync_all())
      .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
  }

  /// Load a pool from a file, checking the size arithmetic first.
  ///
  /// The file must be exactly `8 + 32 * node_count` bytes.
  pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
      .with_context(|| format!("opening {}", path.display()))?;
    let file_size = file.metadata()?.len();
    if file_size < 8 || (file_size - 8) % NODE_RECORD_BYTES != 0 {
      bail!(
        "{}: {} bytes is not 8 + {} * n",
        path.display(),
        file_size,
        NODE_RECORD_BYTES
      );
    }
    let pool = Self::deserialize(BufReader::new(file))
      .with_context(|| format!("loading {}", path.display()))?;
    let expected = 8 + pool.len() as u64 * NODE_RECORD_BYTES;
    if expected != file_size {
      bail!(
        "{}: header claims {} nodes ({} bytes) but the file is {} bytes",
        path.display(),
        pool.len(),
        expected,
        file_size
      );
    }
    Ok(pool)
  }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
