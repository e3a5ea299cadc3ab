use geo::{BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use std::fmt::Debug;

/// A numbered, named planar outline that defines region membership.
#[derive(Clone, PartialEq)]
pub struct Region {
	pub number: i64,
	pub name: String,
	pub abbrev: String,
	pub polygon: MultiPolygon<f64>,
}

impl Region {
	pub fn new(number: i64, name: &str, abbrev: &str, polygon: impl Into<MultiPolygon<f64>>) -> Self {
		Self {
			number,
			name: name.to_string(),
			abbrev: abbrev.to_string(),
			polygon: polygon.into(),
		}
	}

	/// Creates a region from a single exterior ring, using the default name `Region<n>`
	/// and abbreviation `r<n>`. The ring does not need to be closed.
	pub fn from_outline(number: i64, outline: &[[f64; 2]]) -> Self {
		Self::new(
			number,
			&default_name(number),
			&default_abbrev(number),
			polygon_from_rings(outline, &[]),
		)
	}

	/// Bounding box of all parts, or `None` for an empty polygon.
	pub fn bounds(&self) -> Option<Rect<f64>> {
		self.polygon.bounding_rect()
	}
}

impl Debug for Region {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Region")
			.field("number", &self.number)
			.field("name", &self.name)
			.field("abbrev", &self.abbrev)
			.field("parts", &self.polygon.0.len())
			.finish()
	}
}

pub(crate) fn default_name(number: i64) -> String {
	format!("Region{number}")
}

pub(crate) fn default_abbrev(number: i64) -> String {
	format!("r{number}")
}

/// Builds a polygon from an exterior ring and interior rings. Rings are closed if needed.
pub fn polygon_from_rings(exterior: &[[f64; 2]], interiors: &[Vec<[f64; 2]>]) -> Polygon<f64> {
	Polygon::new(
		ring(exterior),
		interiors.iter().map(|interior| ring(interior)).collect(),
	)
}

fn ring(vertices: &[[f64; 2]]) -> LineString<f64> {
	LineString::new(vertices.iter().map(|&[x, y]| Coord { x, y }).collect())
}

/// Drops the z value of 3D vertices.
pub fn drop_z(vertices: &[[f64; 3]]) -> Vec<[f64; 2]> {
	vertices.iter().map(|&[x, y, _]| [x, y]).collect()
}
