//! Minimal Wavefront OBJ reader.
//!
//! Only vertex positions (`v`) and faces (`f`) are consumed; faces with
//! more than three corners are fan-triangulated. Normals, texture
//! coordinates, materials and groups are skipped - the voxelizer needs
//! occupancy geometry and nothing else.

use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use svdag::TriangleMesh;

/// Load `path` into a triangle mesh.
pub fn load(path: &Path) -> Result<TriangleMesh> {
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("reading {}", path.display()))?;
	parse(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parse OBJ text into a triangle mesh.
pub fn parse(text: &str) -> Result<TriangleMesh> {
	let mut positions: Vec<Vec3> = Vec::new();
	let mut triangles: Vec<[u32; 3]> = Vec::new();

	for (index, line) in text.lines().enumerate() {
		let line_no = index + 1;
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let mut fields = line.split_whitespace();
		match fields.next() {
			Some("v") => {
				let x = parse_coordinate(fields.next(), line_no)?;
				let y = parse_coordinate(fields.next(), line_no)?;
				let z = parse_coordinate(fields.next(), line_no)?;
				positions.push(Vec3::new(x, y, z));
			}
			Some("f") => {
				let mut corners: Vec<u32> = Vec::new();
				for field in fields {
					corners.push(parse_face_corner(field, positions.len(), line_no)?);
				}
				if corners.len() < 3 {
					bail!("line {line_no}: face needs at least 3 vertices");
				}
				for i in 1..corners.len() - 1 {
					triangles.push([corners[0], corners[i], corners[i + 1]]);
				}
			}
			// vn, vt, o, g, s, usemtl, mtllib and friends carry nothing the
			// voxelizer uses.
			_ => {}
		}
	}

	if triangles.is_empty() {
		bail!("no faces found");
	}
	Ok(TriangleMesh::new(positions, triangles))
}

fn parse_coordinate(field: Option<&str>, line_no: usize) -> Result<f32> {
	field
		.with_context(|| format!("line {line_no}: vertex needs 3 coordinates"))?
		.parse::<f32>()
		.with_context(|| format!("line {line_no}: bad vertex coordinate"))
}

/// Parse one face corner (`v`, `v/vt`, `v//vn` or `v/vt/vn`) into a
/// zero-based vertex index.
fn parse_face_corner(field: &str, vertex_count: usize, line_no: usize) -> Result<u32> {
	let index_text = field.split('/').next().unwrap_or(field);
	let index: i64 = index_text
		.parse()
		.with_context(|| format!("line {line_no}: bad face index '{field}'"))?;
	if index < 1 {
		bail!("line {line_no}: face index {index} (negative and zero indices are not supported)");
	}
	let index = (index - 1) as u64;
	if index >= vertex_count as u64 {
		bail!(
			"line {line_no}: face references vertex {} of {vertex_count}",
			index + 1
		);
	}
	Ok(index as u32)
}

#[cfg(test)]
#[path = "obj_test.rs"]
mod obj_test;
