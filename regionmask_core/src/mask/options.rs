use crate::grid::WrapLon;
use anyhow::{Result, bail};
use std::{fmt::Display, str::FromStr};

/// Masking method requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// Rasterize the polygons onto the grid. Requires evenly spaced 1D coordinates.
	Rasterize,
	/// Test every grid point against the polygons.
	Shapely,
}

impl FromStr for Method {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"rasterize" => Ok(Method::Rasterize),
			"shapely" => Ok(Method::Shapely),
			_ => bail!("Method must be None or one of 'rasterize' and 'shapely'."),
		}
	}
}

impl Display for Method {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Method::Rasterize => "rasterize",
			Method::Shapely => "shapely",
		})
	}
}

/// Options for [`Regions::mask_2d`](crate::Regions::mask_2d) and
/// [`Regions::mask_3d`](crate::Regions::mask_3d).
#[derive(Clone, Debug, PartialEq)]
pub struct MaskOptions {
	/// Name of the longitude coordinate, also used as output dimension name
	pub lon_name: String,
	/// Name of the latitude coordinate, also used as output dimension name
	pub lat_name: String,
	/// Values written into the 2D mask instead of the region numbers
	pub numbers: Option<Vec<i64>>,
	/// `None` selects the fastest applicable method
	pub method: Option<Method>,
	pub wrap_lon: WrapLon,
	/// 3D only: drop regions without any grid point
	pub drop: bool,
}

impl Default for MaskOptions {
	fn default() -> Self {
		Self {
			lon_name: "lon".to_string(),
			lat_name: "lat".to_string(),
			numbers: None,
			method: None,
			wrap_lon: WrapLon::Auto,
			drop: true,
		}
	}
}

impl MaskOptions {
	pub fn with_names(mut self, lon_name: &str, lat_name: &str) -> Self {
		self.lon_name = lon_name.to_string();
		self.lat_name = lat_name.to_string();
		self
	}

	pub fn with_numbers(mut self, numbers: Vec<i64>) -> Self {
		self.numbers = Some(numbers);
		self
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn with_wrap_lon(mut self, wrap_lon: impl Into<WrapLon>) -> Self {
		self.wrap_lon = wrap_lon.into();
		self
	}

	pub fn with_drop(mut self, drop: bool) -> Self {
		self.drop = drop;
		self
	}
}
