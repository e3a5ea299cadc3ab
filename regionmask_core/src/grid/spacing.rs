//! Detection of evenly spaced coordinate axes.

const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

/// Returns the constant step of `values` if they form a strictly monotonic, evenly spaced
/// sequence of at least two points.
///
/// Differences may deviate from the first difference by `1e-8 + 1e-5 * |step|`, which
/// absorbs floating point jitter of coordinates written with limited precision.
pub fn regular_step(values: &[f64]) -> Option<f64> {
	if values.len() < 2 {
		return None;
	}
	let step = values[1] - values[0];
	if !step.is_finite() || step == 0.0 {
		return None;
	}
	let tolerance = ATOL + RTOL * step.abs();
	values
		.windows(2)
		.all(|w| {
			let d = w[1] - w[0];
			d.signum() == step.signum() && (d - step).abs() <= tolerance
		})
		.then_some(step)
}

/// Whether `values` is evenly spaced, see [`regular_step`].
pub fn is_regular(values: &[f64]) -> bool {
	regular_step(values).is_some()
}

/// Whether two steps are equal within the regularity tolerance.
pub(crate) fn same_step(a: f64, b: f64) -> bool {
	(a - b).abs() <= ATOL + RTOL * a.abs()
}
