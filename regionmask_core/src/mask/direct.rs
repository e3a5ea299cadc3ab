//! Point-in-polygon masking.
//!
//! Every grid cell is tested against the polygon parts whose bounding boxes contain it,
//! found through an R-tree over the part envelopes.

use super::{LAT_OFFSET, LON_OFFSET};
use crate::array::NdArray;
use anyhow::{Result, bail, ensure};
use geo::{BoundingRect, CoordinatePosition, MultiPolygon, Polygon, coord, coordinate_position::CoordPos};
use rstar::{AABB, RTree, RTreeObject};

/// Bounding box of one polygon part, pointing back to its region and part.
#[derive(Clone, Debug)]
struct PartEnvelope {
	region: usize,
	part: usize,
	envelope: AABB<[f64; 2]>,
}

impl RTreeObject for PartEnvelope {
	type Envelope = AABB<[f64; 2]>;

	fn envelope(&self) -> Self::Envelope {
		self.envelope
	}
}

/// Spatial index over the polygons of a region set.
pub(crate) struct PolygonIndex<'a> {
	polygons: Vec<&'a MultiPolygon<f64>>,
	tree: RTree<PartEnvelope>,
}

impl<'a> PolygonIndex<'a> {
	pub fn new(polygons: Vec<&'a MultiPolygon<f64>>) -> Self {
		let parts = polygons
			.iter()
			.enumerate()
			.flat_map(|(region, multi)| {
				multi.0.iter().enumerate().filter_map(move |(part, polygon)| {
					let rect = polygon.bounding_rect()?;
					Some(PartEnvelope {
						region,
						part,
						envelope: AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
					})
				})
			})
			.collect();
		Self {
			polygons,
			tree: RTree::bulk_load(parts),
		}
	}

	fn part(&self, entry: &PartEnvelope) -> &Polygon<f64> {
		&self.polygons[entry.region].0[entry.part]
	}

	/// Position of the first region containing the point. Points on an edge count as inside.
	pub fn first_containing(&self, x: f64, y: f64) -> Option<usize> {
		let point = coord! { x: x, y: y };
		self
			.tree
			.locate_in_envelope_intersecting(&AABB::from_point([x, y]))
			.filter(|entry| self.part(entry).coordinate_position(&point) != CoordPos::Outside)
			.map(|entry| entry.region)
			.min()
	}
}

/// Checks the label values against the regions and the fill value.
pub(crate) fn check_numbers(numbers: &[i64], n_regions: usize, fill: f64) -> Result<()> {
	ensure!(
		numbers.len() == n_regions,
		"`numbers` and `coords` must have the same length (got {} numbers for {} regions)",
		numbers.len(),
		n_regions
	);
	if numbers.iter().any(|n| *n as f64 == fill) {
		bail!("The fill value should not be one of the region numbers. Got fill={fill}");
	}
	Ok(())
}

/// Shape of the mask and the longitude/latitude of each cell in row-major order.
///
/// 1D axes span a `(lat, lon)` grid, 2D coordinates are used cell by cell.
pub(crate) fn cells(lon: &NdArray<f64>, lat: &NdArray<f64>) -> Result<(Vec<usize>, Vec<[f64; 2]>)> {
	if lon.ndim() == 1 && lat.ndim() == 1 {
		let points = lat
			.as_slice()
			.iter()
			.flat_map(|y| lon.as_slice().iter().map(move |x| [*x, *y]))
			.collect();
		return Ok((vec![lat.len(), lon.len()], points));
	}
	ensure!(
		lon.shape() == lat.shape(),
		"2D lon and lat coordinates need to have the same shape"
	);
	let points = lon.as_slice().iter().zip(lat.as_slice()).map(|(x, y)| [*x, *y]).collect();
	Ok((lon.shape().to_vec(), points))
}

/// Labels every cell with the number of the first region containing it, or `fill`.
pub fn mask_direct(
	lon: &NdArray<f64>,
	lat: &NdArray<f64>,
	polygons: Vec<&MultiPolygon<f64>>,
	numbers: &[i64],
	fill: f64,
) -> Result<NdArray<f64>> {
	check_numbers(numbers, polygons.len(), fill)?;
	let (shape, points) = cells(lon, lat)?;
	let index = PolygonIndex::new(polygons);

	let values = points
		.iter()
		.map(|[x, y]| {
			index
				.first_containing(x - LON_OFFSET, y - LAT_OFFSET)
				.map_or(fill, |region| numbers[region] as f64)
		})
		.collect();

	NdArray::from_shape_vec(shape, values)
}
