use super::NdArray;
use anyhow::{Result, ensure};
use std::{collections::BTreeMap, fmt::Debug};

/// Values of a coordinate variable.
#[derive(Clone, Debug, PartialEq)]
pub enum CoordData {
	Float(NdArray<f64>),
	Int(NdArray<i64>),
	Text(NdArray<String>),
}

impl CoordData {
	pub fn shape(&self) -> &[usize] {
		match self {
			CoordData::Float(a) => a.shape(),
			CoordData::Int(a) => a.shape(),
			CoordData::Text(a) => a.shape(),
		}
	}

	/// Returns the values as floats. Integer coordinates are converted, text yields `None`.
	pub fn to_float(&self) -> Option<NdArray<f64>> {
		match self {
			CoordData::Float(a) => Some(a.clone()),
			CoordData::Int(a) => Some(a.map(|v| *v as f64)),
			CoordData::Text(_) => None,
		}
	}

	pub fn as_float(&self) -> Option<&[f64]> {
		match self {
			CoordData::Float(a) => Some(a.as_slice()),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<&[i64]> {
		match self {
			CoordData::Int(a) => Some(a.as_slice()),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&[String]> {
		match self {
			CoordData::Text(a) => Some(a.as_slice()),
			_ => None,
		}
	}
}

/// A named coordinate variable: its values and the dimensions they run along.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinate {
	pub dims: Vec<String>,
	pub data: CoordData,
}

impl Coordinate {
	/// Creates a coordinate, checking that there is one dimension name per axis.
	pub fn new(dims: Vec<String>, data: CoordData) -> Result<Self> {
		ensure!(
			dims.len() == data.shape().len(),
			"coordinate with {} dimensions needs {} dimension names, got {:?}",
			data.shape().len(),
			data.shape().len(),
			dims
		);
		Ok(Self { dims, data })
	}

	/// A 1-dimensional coordinate along `dim`.
	pub fn along<D: Into<CoordData>>(dim: &str, data: D) -> Self {
		let data = data.into();
		let dims = if data.shape().is_empty() {
			vec![]
		} else {
			vec![dim.to_string()]
		};
		Self { dims, data }
	}
}

impl From<NdArray<f64>> for CoordData {
	fn from(value: NdArray<f64>) -> Self {
		CoordData::Float(value)
	}
}

impl From<Vec<f64>> for CoordData {
	fn from(value: Vec<f64>) -> Self {
		CoordData::Float(NdArray::from(value))
	}
}

impl From<Vec<i64>> for CoordData {
	fn from(value: Vec<i64>) -> Self {
		CoordData::Int(NdArray::from(value))
	}
}

impl From<Vec<String>> for CoordData {
	fn from(value: Vec<String>) -> Self {
		CoordData::Text(NdArray::from(value))
	}
}

/// A labeled N-dimensional array: values plus dimension names and coordinate variables.
#[derive(Clone, PartialEq)]
pub struct DataArray<T> {
	pub name: Option<String>,
	pub dims: Vec<String>,
	pub values: NdArray<T>,
	pub coords: BTreeMap<String, Coordinate>,
}

impl<T> DataArray<T> {
	pub fn new(dims: Vec<String>, values: NdArray<T>) -> Result<Self> {
		ensure!(
			dims.len() == values.ndim(),
			"array with {} dimensions needs {} dimension names, got {:?}",
			values.ndim(),
			values.ndim(),
			dims
		);
		Ok(Self {
			name: None,
			dims,
			values,
			coords: BTreeMap::new(),
		})
	}

	pub fn with_name(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	/// Attaches a coordinate. Every dimension of the coordinate that also labels the array
	/// must have the same length.
	pub fn with_coord(mut self, name: &str, coord: Coordinate) -> Result<Self> {
		for (dim, len) in coord.dims.iter().zip(coord.data.shape()) {
			if let Some(pos) = self.dims.iter().position(|d| d == dim) {
				ensure!(
					self.values.shape()[pos] == *len,
					"coordinate '{name}' has length {len} along '{dim}', but the array has length {}",
					self.values.shape()[pos]
				);
			}
		}
		self.coords.insert(name.to_string(), coord);
		Ok(self)
	}

	pub fn shape(&self) -> &[usize] {
		self.values.shape()
	}

	pub fn coord(&self, name: &str) -> Option<&Coordinate> {
		self.coords.get(name)
	}

	/// Returns the values of the coordinate `name` as floats.
	pub fn coord_values(&self, name: &str) -> Option<Vec<f64>> {
		self.coord(name)?.data.to_float().map(NdArray::into_vec)
	}

	pub fn is_all<F: Fn(&T) -> bool>(&self, predicate: F) -> bool {
		self.values.as_slice().iter().all(predicate)
	}

	/// Returns layer `index` of the leading dimension as a flat slice.
	pub fn layer(&self, index: usize) -> Option<&[T]> {
		let (&n, rest) = self.shape().split_first()?;
		if index >= n {
			return None;
		}
		let size: usize = rest.iter().product();
		Some(&self.values.as_slice()[index * size..(index + 1) * size])
	}
}

impl<T: Debug> Debug for DataArray<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DataArray")
			.field("name", &self.name)
			.field("dims", &self.dims)
			.field("shape", &self.values.shape())
			.field("coords", &self.coords.keys().collect::<Vec<_>>())
			.finish()
	}
}
