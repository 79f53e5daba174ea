//! Mesh voxelizer front-end.
//!
//! Bakes a triangle mesh into a sparse voxel DAG file:
//! load the mesh, wrap its bounding box in a cube, voxelize to the
//! requested depth, compress, write the pool.
//!
//! Progress goes to stdout, diagnostics to stderr; the exit code is 0 on
//! success and 1 on any failure.

mod obj;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use svdag::{build, Cube, TriangleScene};

/// Sparse voxel DAG baker for triangle meshes.
#[derive(Parser, Debug)]
#[command(name = "mesh_baker")]
#[command(about = "Voxelizes a mesh into a sparse voxel DAG file")]
struct Args {
	/// Input mesh (Wavefront OBJ; positions and faces only).
	input: PathBuf,

	/// Output SVDAG file.
	output: PathBuf,

	/// Octree depth; voxel resolution is 2^depth per axis.
	depth: u32,
}

fn main() -> Result<()> {
	let args = Args::parse();
	ensure!(args.depth >= 1, "depth must be at least 1");
	ensure!(
		args.depth <= 16,
		"depth {} would walk up to 8^{} leaf cells; this builder is not built for that",
		args.depth,
		args.depth
	);

	println!("Input file: {}", args.input.display());
	println!("Output file: {}", args.output.display());
	println!("Depth: {}", args.depth);

	let mesh = obj::load(&args.input)?;
	println!("Triangles: {}", mesh.triangle_count());

	let (min, max) = mesh.bounds();
	let cube = Cube::from_bounds(min, max);
	ensure!(
		cube.edge > 0.0,
		"mesh bounding box is degenerate ({min} to {max})"
	);

	let start = Instant::now();
	let mut pool = build::mesh::from_scene(&mesh, args.depth, cube, |leaves| {
		if leaves % (1 << 16) == 0 {
			println!("  {} leaf cells evaluated", leaves);
		}
	});
	println!("Time to voxelize: {} ms", start.elapsed().as_millis());
	println!("DAG nodes: {}", pool.len());

	pool.compress();
	println!("DAG nodes after compression: {}", pool.len());

	pool
		.save_file(&args.output)
		.with_context(|| format!("writing {}", args.output.display()))?;
	println!("Wrote {}", args.output.display());

	Ok(())
}
