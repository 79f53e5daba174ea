//! svdag - Sparse Voxel Directed Acyclic Graph engine.
//!
//! An SVDAG is an octree in which structurally identical subtrees are
//! deduplicated into a single shared node. The compression is lossless:
//! random access and ray traversal see exactly the geometry that was built,
//! at a fraction of the memory of the equivalent tree.
//!
//! The crate is split along the lifecycle of a pool:
//!
//! - [`node`] / [`pool`]: the 8-slot node record and the flat array that
//!   stores the graph, including the little-endian dump/load format
//! - [`build`]: recursive construction from an occupancy predicate
//!   ([`build::sdf`]) or from triangle geometry ([`build::mesh`])
//! - [`compress`]: structural deduplication of the reachable graph
//! - [`edit`]: duplicate/subdivide/combine/subtract
//! - [`traverse`]: parametric ray casting and point containment
//!
//! # Slot encoding
//!
//! Every node holds 8 signed 32-bit slots, one per octant:
//!
//! ```text
//!  0        the octant is empty
//!  negative the octant is solid at this depth (LEAF = -1)
//!  positive 1-based reference: slot v points at pool index v - 1
//! ```
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use svdag::{build, traverse, Cube};
//!
//! // Voxelize a sphere to 64^3 and compress the result.
//! let cube = Cube::new(Vec3::splat(-1.0), 2.0);
//! let mut pool = build::sdf::from_fn(6, cube, |center, _half| center.length() < 0.8);
//! pool.compress();
//!
//! // Cast a ray at it.
//! let hit = traverse::raycast(
//!   &pool, cube,
//!   Vec3::new(-2.0, 0.1, 0.1), Vec3::X,
//!   6, f32::MAX,
//! );
//! println!("hit: {:?} with {} nodes", hit, pool.len());
//! ```

pub mod bounds;
pub mod node;
pub mod pool;

// Re-export the core value types
pub use bounds::Cube;
pub use node::{Node, CHILD_COUNT, LEAF};
pub use pool::NodePool;

// Compression lives in its own module but surfaces as NodePool::compress
mod compress;

// Builders: volumetric predicate and triangle geometry
pub mod build;

// Triangle input abstraction for the mesh builder
pub mod scene;
pub use scene::{TriangleMesh, TriangleScene};

// Structural editing of an existing pool
pub mod edit;

// Read-only queries: ray casting and point containment
pub mod traverse;
pub use traverse::{contains, raycast};
