//! Longitude normalization.
//!
//! The same meridian can be written as 359° or -1°. Before masking, grid longitudes are
//! brought into the convention of the region outlines, either explicitly or by trying the
//! candidates and keeping the one that places most grid points within the regions' extent.

use anyhow::{Result, bail, ensure};
use geo::Rect;
use std::{fmt::Display, str::FromStr};

/// A right-open longitude interval of width 360°.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LonRange {
	/// `[-180, 180)`
	Lon180,
	/// `[0, 360)`
	Lon360,
}

impl LonRange {
	pub fn start(self) -> f64 {
		match self {
			LonRange::Lon180 => -180.0,
			LonRange::Lon360 => 0.0,
		}
	}
}

/// How grid longitudes are normalized before masking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapLon {
	/// Keep longitudes as given and skip the region extent check.
	Disabled,
	/// Try all conventions and keep the one covering most grid points.
	#[default]
	Auto,
	/// Wrap to `[-180, 180)`.
	To180,
	/// Wrap to `[0, 360)`.
	To360,
}

impl From<bool> for WrapLon {
	fn from(value: bool) -> Self {
		if value { WrapLon::Auto } else { WrapLon::Disabled }
	}
}

impl TryFrom<i64> for WrapLon {
	type Error = anyhow::Error;

	fn try_from(value: i64) -> Result<Self> {
		match value {
			180 => Ok(WrapLon::To180),
			360 => Ok(WrapLon::To360),
			_ => bail!("wrap_lon must be one of true, false, 180 or 360, got {value}"),
		}
	}
}

impl FromStr for WrapLon {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"auto" | "true" => Ok(WrapLon::Auto),
			"false" | "none" => Ok(WrapLon::Disabled),
			"180" => Ok(WrapLon::To180),
			"360" => Ok(WrapLon::To360),
			_ => bail!("wrap_lon must be one of true, false, 180 or 360, got '{s}'"),
		}
	}
}

impl Display for WrapLon {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			WrapLon::Disabled => "false",
			WrapLon::Auto => "auto",
			WrapLon::To180 => "180",
			WrapLon::To360 => "360",
		})
	}
}

/// Maps a longitude into `[start, start + 360)`. NaN stays NaN.
pub fn wrap_value(value: f64, start: f64) -> f64 {
	let mut offset = (value - start).rem_euclid(360.0);
	// rem_euclid can round up to the excluded upper bound for tiny negative offsets
	if offset >= 360.0 {
		offset -= 360.0;
	}
	start + offset
}

/// Maps every longitude into `[range_start, range_start + 360)`.
pub fn wrap_to_range(lon: &[f64], range_start: f64) -> Vec<f64> {
	lon.iter().map(|v| wrap_value(*v, range_start)).collect()
}

/// Result of [`determine_and_apply_wrap`].
#[derive(Clone, Debug, PartialEq)]
pub struct Wrapped {
	pub lon: Vec<f64>,
	/// The range the longitudes were wrapped into, `None` if they were kept.
	pub range: Option<LonRange>,
}

/// Decides whether longitudes need wrapping for the given region extent and applies it.
///
/// # Errors
/// Fails if wrapping is not disabled and the regions span more than 360° of longitude.
pub fn determine_and_apply_wrap(lon: &[f64], region_bounds: Option<Rect<f64>>, wrap_lon: WrapLon) -> Result<Wrapped> {
	if wrap_lon != WrapLon::Disabled
		&& let Some(bounds) = region_bounds
	{
		ensure!(
			bounds.width() <= 360.0,
			"Cannot determine the longitude convention: the regions span {}° of longitude (more than 360°). \
			 Set `wrap_lon=False` to skip this check.",
			bounds.width()
		);
	}

	let wrapped = match wrap_lon {
		WrapLon::Disabled => keep(lon),
		WrapLon::To180 => wrap_into(lon, LonRange::Lon180),
		WrapLon::To360 => wrap_into(lon, LonRange::Lon360),
		WrapLon::Auto => match region_bounds {
			Some(bounds) => best_candidate(lon, bounds),
			None => keep(lon),
		},
	};

	log::debug!("wrap_lon={wrap_lon}: longitudes wrapped into {:?}", wrapped.range);
	Ok(wrapped)
}

fn keep(lon: &[f64]) -> Wrapped {
	Wrapped {
		lon: lon.to_vec(),
		range: None,
	}
}

fn wrap_into(lon: &[f64], range: LonRange) -> Wrapped {
	Wrapped {
		lon: wrap_to_range(lon, range.start()),
		range: Some(range),
	}
}

fn best_candidate(lon: &[f64], bounds: Rect<f64>) -> Wrapped {
	let (west, east) = (bounds.min().x, bounds.max().x);
	let coverage = |values: &[f64]| values.iter().filter(|v| (west..=east).contains(*v)).count();

	let mut best = keep(lon);
	let mut best_coverage = coverage(&best.lon);
	for range in [LonRange::Lon180, LonRange::Lon360] {
		let candidate = wrap_into(lon, range);
		let candidate_coverage = coverage(&candidate.lon);
		// ties keep the earlier candidate, preferring the caller's values
		if candidate_coverage > best_coverage {
			best = candidate;
			best_coverage = candidate_coverage;
		}
	}
	best
}
