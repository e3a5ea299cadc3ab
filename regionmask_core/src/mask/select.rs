//! Choice between point-in-polygon testing and the rasterization variants.
//!
//! Rasterization needs a contiguous, evenly spaced pixel grid. Grids that are evenly spaced
//! only after wrapping (they cross the antimeridian inside the array) are either rotated back
//! into one contiguous axis when they cover the whole globe, or rasterized in two pieces.

use crate::array::NdArray;
use crate::grid::{regular_step, same_step};

/// Low-level strategy used to compute a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
	/// Point-in-polygon test for every grid cell.
	Direct,
	/// Rasterize onto the evenly spaced grid as given.
	Raster,
	/// The longitudes cover the full circle but start mid-array at index `split`:
	/// rasterize on the rotated axis and rotate the columns back.
	RasterReassemble { split: usize },
	/// The longitudes jump across the antimeridian at index `split`:
	/// rasterize both runs and join them.
	RasterSplit { split: usize },
}

impl Strategy {
	pub fn is_raster(self) -> bool {
		self != Strategy::Direct
	}
}

/// Picks the fastest strategy that is valid for the coordinates.
pub fn select_strategy(lon: &NdArray<f64>, lat: &NdArray<f64>) -> Strategy {
	if lon.ndim() != 1 || lat.ndim() != 1 {
		return Strategy::Direct;
	}
	let (lon, lat) = (lon.as_slice(), lat.as_slice());

	if regular_step(lat).is_none() {
		return Strategy::Direct;
	}
	if regular_step(lon).is_some() {
		return Strategy::Raster;
	}

	let Some((split, step)) = find_split(lon) else {
		return Strategy::Direct;
	};

	let rotated: Vec<f64> = lon[split..].iter().chain(&lon[..split]).copied().collect();
	let covers_globe = same_step(lon.len() as f64 * step.abs(), 360.0);
	let strategy = if covers_globe && regular_step(&rotated).is_some_and(|s| same_step(s, step)) {
		Strategy::RasterReassemble { split }
	} else {
		Strategy::RasterSplit { split }
	};
	log::debug!("longitudes split at index {split} (step {step}): {strategy:?}");
	strategy
}

/// Finds a single antimeridian jump in otherwise evenly spaced longitudes.
///
/// Returns the index of the first value after the jump and the common step of both runs.
pub(crate) fn find_split(lon: &[f64]) -> Option<(usize, f64)> {
	let mut jumps = lon.windows(2).enumerate().filter(|(_, w)| (w[1] - w[0]).abs() > 180.0);
	let (index, _) = jumps.next()?;
	if jumps.next().is_some() {
		return None;
	}
	let split = index + 1;
	let (left, right) = lon.split_at(split);

	let step = match (regular_step(left), regular_step(right)) {
		(Some(a), Some(b)) if same_step(a, b) => a,
		(Some(a), None) if right.len() == 1 => a,
		(None, Some(b)) if left.len() == 1 => b,
		_ => return None,
	};
	Some((split, step))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grid::wrap_to_range;
	use rstest::rstest;

	fn equal() -> Vec<f64> {
		(0..360).map(|i| 0.5 + i as f64).collect()
	}

	fn close_to_equal() -> Vec<f64> {
		let jitter = [4e-7, -9e-7, 2e-7, 6e-7, -3e-7, 0.0, -5e-7];
		equal()
			.iter()
			.enumerate()
			.map(|(i, v)| v + jitter[i % jitter.len()])
			.collect()
	}

	fn wrapped() -> Vec<f64> {
		wrap_to_range(&equal(), -180.0)
	}

	fn wrapped_part() -> Vec<f64> {
		let mut lon = wrapped();
		lon.pop();
		lon
	}

	fn grid_2d() -> NdArray<f64> {
		NdArray::from_shape_vec(vec![2, 5], (0..10).map(f64::from).collect()).unwrap()
	}

	fn un_equal() -> Vec<f64> {
		vec![0.0, 1.0, 2.0, 4.0, 5.0, 6.1]
	}

	// 0: raster, 1: reassemble, 2: split, 3: direct
	fn rank(strategy: Strategy) -> u8 {
		match strategy {
			Strategy::Raster => 0,
			Strategy::RasterReassemble { .. } => 1,
			Strategy::RasterSplit { .. } => 2,
			Strategy::Direct => 3,
		}
	}

	#[rstest]
	fn determine_strategy(
		#[values(
			(NdArray::from(equal()), 0),
			(NdArray::from(close_to_equal()), 0),
			(NdArray::from(wrapped()), 1),
			(NdArray::from(wrapped_part()), 2),
			(NdArray::from(vec![1.0]), 3),
			(grid_2d(), 3),
			(NdArray::from(un_equal()), 3)
		)]
		lon: (NdArray<f64>, u8),
		#[values(
			(NdArray::from(equal()), 0),
			(NdArray::from(close_to_equal()), 0),
			(NdArray::from(vec![1.0]), 3),
			(grid_2d(), 3),
			(NdArray::from(un_equal()), 3)
		)]
		lat: (NdArray<f64>, u8),
	) {
		let expected = lon.1.max(lat.1);
		assert_eq!(rank(select_strategy(&lon.0, &lat.0)), expected);
	}

	#[test]
	fn split_index_is_first_value_after_jump() {
		assert_eq!(find_split(&wrapped()), Some((180, 1.0)));
		assert_eq!(
			select_strategy(&NdArray::from(wrapped()), &NdArray::from(vec![0.0, 1.0])),
			Strategy::RasterReassemble { split: 180 }
		);
	}

	#[test]
	fn single_value_runs_are_allowed() {
		assert_eq!(find_split(&[177.0, 179.0, -179.0]), Some((2, 2.0)));
		assert_eq!(find_split(&[179.0, -179.0, -177.0]), Some((1, 2.0)));
		assert_eq!(find_split(&[179.0, -179.0]), None);
	}

	#[test]
	fn two_jumps_are_not_split() {
		assert_eq!(find_split(&[170.0, 175.0, -175.0, 175.0]), None);
	}

	#[test]
	fn runs_with_different_steps_are_not_split() {
		assert_eq!(find_split(&[170.0, 175.0, -178.0, -176.0]), None);
	}
}
