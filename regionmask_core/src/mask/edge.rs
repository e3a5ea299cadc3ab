use super::direct::PolygonIndex;
use crate::grid::LonRange;

/// Assigns unlabeled cells on the western edge of the longitude range or at the south pole.
///
/// The centre offset moves such cells just outside a global outline. They are tested again
/// without offset, and at `lon + 360` for outlines drawn up to the eastern edge.
/// `values` and `points` are in the same cell order.
pub(crate) fn mask_edge_points(
	values: &mut [f64],
	points: &[[f64; 2]],
	index: &PolygonIndex<'_>,
	numbers: &[i64],
	fill: f64,
	convention: LonRange,
) -> usize {
	let lon_min = convention.start();
	let is_fill = |v: f64| if fill.is_nan() { v.is_nan() } else { v == fill };

	let mut assigned = 0;
	for (value, [lon, lat]) in values.iter_mut().zip(points) {
		if !is_fill(*value) || (*lon != lon_min && *lat != -90.0) {
			continue;
		}
		let region = index
			.first_containing(*lon, *lat)
			.or_else(|| index.first_containing(lon + 360.0, *lat));
		if let Some(region) = region {
			*value = numbers[region] as f64;
			assigned += 1;
		}
	}
	if assigned > 0 {
		log::debug!("assigned {assigned} grid points on the edge of the longitude range or at -90°");
	}
	assigned
}
