//! YAML definitions of region sets.
//!
//! ```yaml
//! name: squares
//! regions:
//!   - number: 0
//!     name: South
//!     abbrev: S
//!     outline: [[0, 0], [0, 1], [1, 1], [1, 0]]
//!   - outline: [[0, 1, 5], [0, 2, 5], [1, 2, 5], [1, 1, 5]]
//! ```
//!
//! Vertices have two or three values; a third (z) value is ignored.

use super::{Region, Regions, default_abbrev, default_name, drop_z, polygon_from_rings};
use anyhow::{Context, Result, bail, ensure};
use geo::{MultiPolygon, Polygon};
use serde::Deserialize;
use std::{fs::File, io::BufReader, io::Read, path::Path};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegionsFile {
	/// Name of the region set
	#[serde(default)]
	pub name: Option<String>,

	/// Regions in mask order
	pub regions: Vec<RegionEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegionEntry {
	/// Region number; defaults to the position in the list
	#[serde(default)]
	pub number: Option<i64>,

	#[serde(default)]
	pub name: Option<String>,

	#[serde(default)]
	pub abbrev: Option<String>,

	/// Exterior ring
	pub outline: Vec<Vec<f64>>,

	/// Interior rings of the exterior
	#[serde(default)]
	pub holes: Vec<Vec<Vec<f64>>>,

	/// Further polygons belonging to the same region
	#[serde(default)]
	pub parts: Vec<PartEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartEntry {
	pub outline: Vec<Vec<f64>>,

	#[serde(default)]
	pub holes: Vec<Vec<Vec<f64>>>,
}

impl RegionsFile {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening region file {}", path.display()))?;
		Self::from_reader(BufReader::new(file)).with_context(|| format!("parsing region file {}", path.display()))
	}

	/// Converts the definitions into a region set.
	pub fn into_regions(self) -> Result<Regions> {
		let mut regions = Vec::with_capacity(self.regions.len());
		for (index, entry) in self.regions.into_iter().enumerate() {
			let number = entry.number.unwrap_or(index as i64);
			let mut polygons = vec![to_polygon(&entry.outline, &entry.holes).with_context(|| format!("region {number}"))?];
			for part in &entry.parts {
				polygons.push(to_polygon(&part.outline, &part.holes).with_context(|| format!("region {number}"))?);
			}
			regions.push(Region::new(
				number,
				&entry.name.unwrap_or_else(|| default_name(number)),
				&entry.abbrev.unwrap_or_else(|| default_abbrev(number)),
				MultiPolygon::new(polygons),
			));
		}
		let regions = Regions::new(regions)?;
		Ok(match self.name {
			Some(name) => regions.with_name(&name),
			None => regions,
		})
	}
}

fn to_polygon(outline: &[Vec<f64>], holes: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>> {
	let exterior = to_ring(outline)?;
	ensure!(exterior.len() >= 3, "an outline needs at least 3 vertices, got {}", exterior.len());
	let interiors = holes.iter().map(|hole| to_ring(hole)).collect::<Result<Vec<_>>>()?;
	Ok(polygon_from_rings(&exterior, &interiors))
}

/// The first vertex decides whether the ring is 2D or 3D.
fn to_ring(vertices: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
	if vertices.first().is_some_and(|v| v.len() == 3) {
		let xyz = vertices
			.iter()
			.map(|vertex| match vertex.as_slice() {
				[x, y, z] => Ok([*x, *y, *z]),
				other => bail!("a 3D outline needs 3 values per vertex, got {other:?}"),
			})
			.collect::<Result<Vec<_>>>()?;
		return Ok(drop_z(&xyz));
	}
	vertices
		.iter()
		.map(|vertex| match vertex.as_slice() {
			[x, y] => Ok([*x, *y]),
			[_, _, _] => bail!("a 2D outline cannot contain the 3D vertex {vertex:?}"),
			other => bail!("a vertex needs 2 or 3 values, got {other:?}"),
		})
		.collect()
}
