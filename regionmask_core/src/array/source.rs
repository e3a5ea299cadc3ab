//! Lookup of longitude/latitude coordinates in mapping-like or labeled inputs.

use super::{CoordData, Coordinate, DataArray, NdArray};
use std::collections::{BTreeMap, HashMap};

/// Anything that exposes named coordinate variables.
pub trait CoordSource {
	fn coordinate(&self, name: &str) -> Option<Coordinate>;
}

impl CoordSource for HashMap<String, NdArray<f64>> {
	fn coordinate(&self, name: &str) -> Option<Coordinate> {
		self.get(name).map(|values| unlabeled(name, values))
	}
}

impl CoordSource for BTreeMap<String, NdArray<f64>> {
	fn coordinate(&self, name: &str) -> Option<Coordinate> {
		self.get(name).map(|values| unlabeled(name, values))
	}
}

impl<T> CoordSource for DataArray<T> {
	fn coordinate(&self, name: &str) -> Option<Coordinate> {
		self.coord(name).cloned()
	}
}

/// Coordinates without dimension names get the coordinate's own name for a 1D axis
/// and no names otherwise; the mask assembler invents index dimensions for them.
fn unlabeled(name: &str, values: &NdArray<f64>) -> Coordinate {
	let dims = if values.ndim() == 1 { vec![name.to_string()] } else { vec![] };
	Coordinate {
		dims,
		data: CoordData::Float(values.clone()),
	}
}

const LON_ALIASES: [&str; 2] = ["lon", "longitude"];
const LAT_ALIASES: [&str; 2] = ["lat", "latitude"];

/// Finds a coordinate by `name`, falling back to the common aliases of the axis.
///
/// Returns the name that matched together with the coordinate.
pub(crate) fn find_coordinate<S: CoordSource + ?Sized>(
	source: &S,
	name: &str,
	is_lon: bool,
) -> Option<(String, Coordinate)> {
	let aliases = if is_lon { LON_ALIASES } else { LAT_ALIASES };
	std::iter::once(name)
		.chain(aliases.into_iter().filter(|alias| *alias != name))
		.find_map(|candidate| {
			source
				.coordinate(candidate)
				.map(|coord| (candidate.to_string(), coord))
		})
}
