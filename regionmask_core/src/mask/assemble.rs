//! Entry points that turn coordinates into labeled masks.
//!
//! A mask call validates the coordinates, normalizes the longitudes, picks a strategy,
//! computes the raw mask and wraps it into a [`DataArray`] that carries the caller's
//! coordinates.

use super::{
	MaskOptions, Method, Strategy,
	direct::{PolygonIndex, cells, check_numbers, mask_direct},
	edge::mask_edge_points,
	raster::mask_raster,
	select::select_strategy,
};
use crate::{
	array::{CoordData, CoordSource, Coordinate, DataArray, NdArray, find_coordinate},
	grid::{WrapLon, determine_and_apply_wrap},
	regions::Regions,
};
use anyhow::{Context, Result, anyhow, bail, ensure};
use std::collections::BTreeMap;

const FILL: f64 = f64::NAN;
const RASTERIZE_SPACING: &str = "`lat` and `lon` must be equally spaced to use `method='rasterize'`";

/// Longitude and latitude of a mask call, as given by the caller.
struct GridInput {
	lon_name: String,
	lat_name: String,
	lon: Coordinate,
	lat: Coordinate,
	/// Coordinates of the source named like the dimensions of 2D lon/lat.
	dim_coords: BTreeMap<String, Coordinate>,
}

impl GridInput {
	fn from_arrays(lon: NdArray<f64>, lat: NdArray<f64>, options: &MaskOptions) -> Self {
		let coordinate = |name: &str, values: NdArray<f64>| {
			let dims = if values.ndim() == 1 { vec![name.to_string()] } else { vec![] };
			Coordinate {
				dims,
				data: CoordData::Float(values),
			}
		};
		Self {
			lon: coordinate(&options.lon_name, lon),
			lat: coordinate(&options.lat_name, lat),
			lon_name: options.lon_name.clone(),
			lat_name: options.lat_name.clone(),
			dim_coords: BTreeMap::new(),
		}
	}

	fn from_source<S: CoordSource + ?Sized>(source: &S, options: &MaskOptions) -> Result<Self> {
		let (lon_name, lon) = find_coordinate(source, &options.lon_name, true)
			.ok_or_else(|| anyhow!("coordinate '{}' not found, also tried 'lon' and 'longitude'", options.lon_name))?;
		let (lat_name, lat) = find_coordinate(source, &options.lat_name, false)
			.ok_or_else(|| anyhow!("coordinate '{}' not found, also tried 'lat' and 'latitude'", options.lat_name))?;

		let dim_coords = lon
			.dims
			.iter()
			.chain(&lat.dims)
			.filter(|dim| **dim != lon_name && **dim != lat_name)
			.filter_map(|dim| {
				let coord = source.coordinate(dim)?;
				(coord.dims.len() == 1).then(|| (dim.clone(), coord))
			})
			.collect();

		Ok(Self {
			lon_name,
			lat_name,
			lon,
			lat,
			dim_coords,
		})
	}

	/// Numeric lon/lat values, checked for matching dimensions.
	fn values(&self) -> Result<(NdArray<f64>, NdArray<f64>)> {
		let lon = self.lon.data.to_float().with_context(|| format!("coordinate '{}' must be numeric", self.lon_name))?;
		let lat = self.lat.data.to_float().with_context(|| format!("coordinate '{}' must be numeric", self.lat_name))?;

		ensure!(
			lon.ndim() == lat.ndim(),
			"Equal number of dimensions required, got lon with {} and lat with {}",
			lon.ndim(),
			lat.ndim()
		);
		ensure!(matches!(lon.ndim(), 1 | 2), "1D or 2D data required, got {}D", lon.ndim());
		ensure!(
			lon.ndim() == 1 || lon.shape() == lat.shape(),
			"2D lon and lat coordinates need to have the same shape, got {:?} and {:?}",
			lon.shape(),
			lat.shape()
		);
		Ok((lon, lat))
	}

	fn is_1d(&self) -> bool {
		self.lon.data.shape().len() == 1
	}

	/// Dimension names of the mask.
	fn dims(&self) -> Vec<String> {
		if self.is_1d() {
			let first = |c: &Coordinate, name: &str| c.dims.first().cloned().unwrap_or_else(|| name.to_string());
			return vec![first(&self.lat, &self.lat_name), first(&self.lon, &self.lon_name)];
		}
		if self.lon.dims.len() == 2 {
			self.lon.dims.clone()
		} else if self.lat.dims.len() == 2 {
			self.lat.dims.clone()
		} else {
			vec![format!("{}_idx", self.lat_name), format!("{}_idx", self.lon_name)]
		}
	}

	/// Attaches the lon/lat coordinates, and index coordinates for 2D grids.
	fn label<T>(&self, mut array: DataArray<T>, dims: &[String], shape: &[usize]) -> Result<DataArray<T>> {
		let (lat_dims, lon_dims) = if self.is_1d() {
			(vec![dims[0].clone()], vec![dims[1].clone()])
		} else {
			(dims.to_vec(), dims.to_vec())
		};
		array = array
			.with_coord(&self.lat_name, Coordinate::new(lat_dims, self.lat.data.clone())?)?
			.with_coord(&self.lon_name, Coordinate::new(lon_dims, self.lon.data.clone())?)?;

		if !self.is_1d() {
			for (dim, &len) in dims.iter().zip(shape) {
				if array.coords.contains_key(dim) {
					continue;
				}
				let coord = match self.dim_coords.get(dim) {
					Some(coord) if coord.data.shape() == [len] => Coordinate::new(vec![dim.clone()], coord.data.clone())?,
					_ => Coordinate::along(dim, (0..len as i64).collect::<Vec<i64>>()),
				};
				array = array.with_coord(dim, coord)?;
			}
		}
		Ok(array)
	}
}

impl Regions {
	/// Labels every grid cell with the number of the region containing it, `NaN` if none.
	///
	/// `lon` and `lat` are either both 1D axes of a rectangular grid or both 2D with equal
	/// shape. The result is named `region` and carries the given coordinates.
	///
	/// # Errors
	/// Fails on mismatching coordinates, on invalid options, and if the regions span more
	/// than 360° of longitude while wrapping is enabled.
	pub fn mask_2d(
		&self,
		lon: impl Into<NdArray<f64>>,
		lat: impl Into<NdArray<f64>>,
		options: &MaskOptions,
	) -> Result<DataArray<f64>> {
		self.mask_2d_input(&GridInput::from_arrays(lon.into(), lat.into(), options), options)
	}

	/// Like [`Regions::mask_2d`], reading `lon`/`lat` from a labeled source.
	pub fn mask_2d_from<S: CoordSource + ?Sized>(&self, source: &S, options: &MaskOptions) -> Result<DataArray<f64>> {
		self.mask_2d_input(&GridInput::from_source(source, options)?, options)
	}

	/// One boolean layer per region, stacked along a leading `region` dimension.
	///
	/// The `region` coordinate holds the region numbers, `abbrevs` and `names` run along it.
	/// With `options.drop`, regions without any grid cell are left out. `options.numbers`
	/// is not used.
	pub fn mask_3d(
		&self,
		lon: impl Into<NdArray<f64>>,
		lat: impl Into<NdArray<f64>>,
		options: &MaskOptions,
	) -> Result<DataArray<bool>> {
		self.mask_3d_input(&GridInput::from_arrays(lon.into(), lat.into(), options), options)
	}

	/// Like [`Regions::mask_3d`], reading `lon`/`lat` from a labeled source.
	pub fn mask_3d_from<S: CoordSource + ?Sized>(&self, source: &S, options: &MaskOptions) -> Result<DataArray<bool>> {
		self.mask_3d_input(&GridInput::from_source(source, options)?, options)
	}

	fn mask_2d_input(&self, input: &GridInput, options: &MaskOptions) -> Result<DataArray<f64>> {
		let numbers = options.numbers.clone().unwrap_or_else(|| self.numbers());
		let values = self.compute_mask(input, &numbers, options)?;

		if values.as_slice().iter().all(|v| v.is_nan()) {
			log::warn!("No gridpoint belongs to any region. Returning an all-NaN mask.");
		}

		let dims = input.dims();
		let shape = values.shape().to_vec();
		let array = DataArray::new(dims.clone(), values)?.with_name("region");
		input.label(array, &dims, &shape)
	}

	fn mask_3d_input(&self, input: &GridInput, options: &MaskOptions) -> Result<DataArray<bool>> {
		let values = self.compute_mask(input, &self.numbers(), options)?;
		let grid_shape = values.shape().to_vec();

		let mut data = Vec::new();
		let mut kept = Vec::new();
		for region in self {
			let layer: Vec<bool> = values.as_slice().iter().map(|v| *v == region.number as f64).collect();
			if options.drop && !layer.contains(&true) {
				continue;
			}
			data.extend(layer);
			kept.push(region);
		}

		let mut shape = vec![kept.len()];
		shape.extend(&grid_shape);
		if !data.contains(&true) {
			log::warn!(
				"No gridpoint belongs to any region. Returning an all-False mask with shape {:?}.",
				shape
			);
		}

		let grid_dims = input.dims();
		let mut dims = vec!["region".to_string()];
		dims.extend(grid_dims.iter().cloned());

		let numbers: Vec<i64> = kept.iter().map(|r| r.number).collect();
		let abbrevs: Vec<String> = kept.iter().map(|r| r.abbrev.clone()).collect();
		let names: Vec<String> = kept.iter().map(|r| r.name.clone()).collect();
		let array = DataArray::new(dims, NdArray::from_shape_vec(shape, data)?)?
			.with_name("mask")
			.with_coord("region", Coordinate::along("region", numbers))?
			.with_coord("abbrevs", Coordinate::along("region", abbrevs))?
			.with_coord("names", Coordinate::along("region", names))?;
		input.label(array, &grid_dims, &grid_shape)
	}

	/// Computes the unlabeled mask with `numbers` as labels and `NaN` as fill.
	fn compute_mask(&self, input: &GridInput, numbers: &[i64], options: &MaskOptions) -> Result<NdArray<f64>> {
		let forced_raster = options.method == Some(Method::Rasterize);
		if forced_raster && (input.lon.data.shape().len() != 1 || input.lat.data.shape().len() != 1) {
			bail!(RASTERIZE_SPACING);
		}
		let (lon, lat) = input.values()?;
		check_numbers(numbers, self.len(), FILL)?;

		let wrapped = determine_and_apply_wrap(lon.as_slice(), self.bounds(), options.wrap_lon)?;
		let lon = NdArray::from_shape_vec(lon.shape().to_vec(), wrapped.lon)?;

		let strategy = match options.method {
			None => select_strategy(&lon, &lat),
			Some(Method::Shapely) => Strategy::Direct,
			Some(Method::Rasterize) => {
				let strategy = select_strategy(&lon, &lat);
				if !strategy.is_raster() {
					bail!(RASTERIZE_SPACING);
				}
				strategy
			}
		};
		log::debug!("masking {} regions on a {:?} grid using {strategy:?}", self.len(), lon.shape());

		let mut values = match strategy {
			Strategy::Direct => mask_direct(&lon, &lat, self.polygons(), numbers, FILL)?,
			_ => {
				NdArray::from(mask_raster(lon.as_slice(), lat.as_slice(), strategy, self.polygons(), numbers, FILL)?)
			}
		};

		// the western edge follows the convention of the outlines, not of the grid
		let convention = self.lon_range();
		let on_edge = lon.as_slice().contains(&convention.start()) || lat.as_slice().contains(&-90.0);
		if options.wrap_lon != WrapLon::Disabled && on_edge {
			let (shape, points) = cells(&lon, &lat)?;
			let mut flat = values.into_vec();
			let index = PolygonIndex::new(self.polygons());
			mask_edge_points(&mut flat, &points, &index, numbers, FILL, convention);
			values = NdArray::from_shape_vec(shape, flat)?;
		}

		Ok(values)
	}
}
