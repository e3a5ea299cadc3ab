use anyhow::{Context, Result, ensure};
use ndarray::{Array, ArrayD, Dimension, IxDyn};
use std::fmt::Debug;

/// An N-dimensional array in standard (row-major) layout.
///
/// Wraps an [`ndarray::ArrayD`] and keeps it contiguous, so the values are always available
/// as one flat slice with the last dimension varying fastest.
#[derive(Clone, PartialEq)]
pub struct NdArray<T> {
	data: ArrayD<T>,
}

impl<T> NdArray<T> {
	/// Creates an array from a shape and row-major data.
	///
	/// # Errors
	/// Returns an error if the product of `shape` does not match `data.len()`.
	pub fn from_shape_vec(shape: Vec<usize>, data: Vec<T>) -> Result<Self> {
		let expected: usize = shape.iter().product();
		ensure!(
			expected == data.len(),
			"shape {:?} requires {} values, but {} were given",
			shape,
			expected,
			data.len()
		);
		let data = ArrayD::from_shape_vec(IxDyn(&shape), data).with_context(|| format!("building array of shape {shape:?}"))?;
		Ok(Self { data })
	}

	/// Creates a 0-dimensional array holding a single value.
	pub fn scalar(value: T) -> Self
	where
		T: Clone,
	{
		Self {
			data: ArrayD::from_elem(IxDyn(&[]), value),
		}
	}

	pub fn ndim(&self) -> usize {
		self.data.ndim()
	}

	pub fn shape(&self) -> &[usize] {
		self.data.shape()
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn as_slice(&self) -> &[T] {
		// every constructor yields standard layout
		self.data.as_slice().unwrap_or(&[])
	}

	/// The underlying `ndarray` array.
	pub fn as_array(&self) -> &ArrayD<T> {
		&self.data
	}

	pub fn into_vec(self) -> Vec<T> {
		let len = self.data.len();
		let (mut data, offset) = self.data.into_raw_vec_and_offset();
		// a standard layout view may start inside a larger allocation
		data.drain(..offset.unwrap_or(0));
		data.truncate(len);
		data
	}

	/// Returns the element at a multi-dimensional index, or `None` if out of bounds.
	pub fn get(&self, index: &[usize]) -> Option<&T> {
		if index.len() != self.ndim() {
			return None;
		}
		self.data.get(index)
	}

	/// Applies `f` to every element, keeping the shape.
	pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> NdArray<U> {
		NdArray { data: self.data.map(f) }
	}

	/// Returns the values as a flat row-major vector.
	pub fn to_vec(&self) -> Vec<T>
	where
		T: Clone,
	{
		self.as_slice().to_vec()
	}
}

impl<T: Clone, D: Dimension> From<Array<T, D>> for NdArray<T> {
	fn from(array: Array<T, D>) -> Self {
		let data = if array.is_standard_layout() {
			array.into_dyn()
		} else {
			array.as_standard_layout().into_owned().into_dyn()
		};
		Self { data }
	}
}

impl<T> From<Vec<T>> for NdArray<T> {
	fn from(data: Vec<T>) -> Self {
		Self {
			data: Array::from_vec(data).into_dyn(),
		}
	}
}

impl<T: Clone> From<&[T]> for NdArray<T> {
	fn from(data: &[T]) -> Self {
		Self::from(data.to_vec())
	}
}

impl<T: Clone, const N: usize> From<[T; N]> for NdArray<T> {
	fn from(data: [T; N]) -> Self {
		Self::from(data.to_vec())
	}
}

impl From<f64> for NdArray<f64> {
	fn from(value: f64) -> Self {
		Self::scalar(value)
	}
}

impl<T> TryFrom<Vec<Vec<T>>> for NdArray<T> {
	type Error = anyhow::Error;

	/// Builds a 2-dimensional array from rows. All rows must have the same length.
	fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
		let n_rows = rows.len();
		let n_cols = rows.first().map_or(0, Vec::len);
		ensure!(
			rows.iter().all(|row| row.len() == n_cols),
			"all rows of a 2D array must have the same length"
		);
		let data = rows.into_iter().flatten().collect();
		Self::from_shape_vec(vec![n_rows, n_cols], data)
	}
}

impl<T: Debug> Debug for NdArray<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NdArray")
			.field("shape", &self.shape())
			.field("data", &self.as_slice())
			.finish()
	}
}
