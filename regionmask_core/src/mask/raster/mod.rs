//! Rasterization of region polygons onto evenly spaced grids.
//!
//! All variants share one burn loop. A variant only decides which contiguous longitude
//! runs are rasterized and into which output columns each run lands:
//!
//! - [`Strategy::Raster`]: one run, columns in order.
//! - [`Strategy::RasterReassemble`]: the rotated axis `lon[split..] ++ lon[..split]` as one run,
//!   its columns rotated back into the caller's order.
//! - [`Strategy::RasterSplit`]: the runs before and after the antimeridian jump separately.

mod burn;
mod transform;

pub use burn::*;
pub use transform::*;

use super::{LAT_OFFSET, LON_OFFSET, Strategy, direct::check_numbers, select::find_split};
use crate::grid::regular_step;
use anyhow::{Result, bail};
use geo::MultiPolygon;
use ndarray::Array2;

/// A contiguous, evenly spaced run of longitudes and the output columns it fills.
#[derive(Debug)]
struct Run {
	start: f64,
	columns: Vec<usize>,
}

fn plan(lon: &[f64], strategy: Strategy) -> Result<(f64, Vec<Run>)> {
	let n = lon.len();
	Ok(match strategy {
		Strategy::Raster => {
			let Some(step) = regular_step(lon) else {
				bail!("longitudes are not evenly spaced");
			};
			let run = Run {
				start: lon[0],
				columns: (0..n).collect(),
			};
			(step, vec![run])
		}
		Strategy::RasterReassemble { split } => {
			let step = split_step(lon, split)?;
			let run = Run {
				start: lon[split],
				columns: (split..n).chain(0..split).collect(),
			};
			(step, vec![run])
		}
		Strategy::RasterSplit { split } => {
			let step = split_step(lon, split)?;
			let runs = vec![
				Run {
					start: lon[0],
					columns: (0..split).collect(),
				},
				Run {
					start: lon[split],
					columns: (split..n).collect(),
				},
			];
			(step, runs)
		}
		Strategy::Direct => bail!("the direct strategy does not rasterize"),
	})
}

fn split_step(lon: &[f64], split: usize) -> Result<f64> {
	match find_split(lon) {
		Some((found, step)) if found == split => Ok(step),
		_ => bail!("longitudes do not split at index {split}"),
	}
}

/// Rasterizes the regions onto the 1D `(lat, lon)` grid.
///
/// Cells get the number of the last region covering their centre, or `fill`.
/// Returns the mask with shape `(lat, lon)`.
pub fn mask_raster(
	lon: &[f64],
	lat: &[f64],
	strategy: Strategy,
	polygons: Vec<&MultiPolygon<f64>>,
	numbers: &[i64],
	fill: f64,
) -> Result<Array2<f64>> {
	check_numbers(numbers, polygons.len(), fill)?;
	let Some(d_lat) = regular_step(lat) else {
		bail!("latitudes are not evenly spaced");
	};
	let (d_lon, runs) = plan(lon, strategy)?;

	let mut out = Array2::from_elem((lat.len(), lon.len()), fill);

	for run in &runs {
		let grid = PixelGrid {
			transform: transform_from_steps(run.start - LON_OFFSET, d_lon, lat[0] - LAT_OFFSET, d_lat),
			width: run.columns.len(),
			height: lat.len(),
		};
		for (region, multi) in polygons.iter().enumerate() {
			let value = numbers[region] as f64;
			let mut burned = 0;
			for part in &multi.0 {
				burned += burn_polygon(part, &grid, |row, col| out[[row, run.columns[col]]] = value);
			}
			log::trace!("region {} burned into {burned} cells", numbers[region]);
		}
	}

	Ok(out)
}
