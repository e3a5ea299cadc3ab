use anyhow::{Result, ensure};

/// Longest axis [`arange`] builds.
pub const MAX_AXIS_LEN: usize = 100_000_000;

/// Returns `start, start + step, …` up to but excluding `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
	ensure!(step != 0.0 && step.is_finite(), "step must be finite and non-zero, got {step}");
	let n = ((stop - start) / step).ceil();
	ensure!(n.is_finite(), "cannot build a range from {start} to {stop}");
	ensure!(
		n <= MAX_AXIS_LEN as f64,
		"a range from {start} to {stop} in steps of {step} has more than {MAX_AXIS_LEN} values"
	);
	Ok((0..n.max(0.0) as usize).map(|i| start + i as f64 * step).collect())
}

/// Cell centres of the cells whose edges are `start, start + step, …, stop`.
///
/// `stop` is the last edge and is included when it lies on the step grid.
pub fn centres_from_bounds(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
	let edges = arange(start, stop + step / 2.0, step)?;
	Ok(edges.windows(2).map(|w| f64::midpoint(w[0], w[1])).collect())
}

/// Longitude and latitude cell centres for the given edge ranges.
pub fn lon_lat_from_bounds(
	lon_start: f64,
	lon_stop: f64,
	d_lon: f64,
	lat_start: f64,
	lat_stop: f64,
	d_lat: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
	Ok((
		centres_from_bounds(lon_start, lon_stop, d_lon)?,
		centres_from_bounds(lat_start, lat_stop, d_lat)?,
	))
}
