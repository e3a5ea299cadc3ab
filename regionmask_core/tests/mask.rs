use pretty_assertions::assert_eq;
use regionmask_core::{
	CoordData, Coordinate, DataArray, MaskOptions, Method, NdArray, Region, Regions, WrapLon, drop_z,
	lon_lat_from_bounds, polygon_from_rings, wrap_to_range,
};
use rstest::rstest;
use std::collections::HashMap;

// ── helpers ──────────────────────────────────────────────

const DUMMY_LON: [f64; 2] = [0.5, 1.5];
const DUMMY_LAT: [f64; 2] = [0.5, 1.5];

/// Three stacked unit squares; no grid point of the dummy grid falls into the third.
fn dummy_regions() -> Regions {
	Regions::from_outlines(&[
		vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
		vec![[0.0, 1.0], [0.0, 2.0], [1.0, 2.0], [1.0, 1.0]],
		vec![[0.0, 2.0], [0.0, 3.0], [1.0, 3.0], [1.0, 2.0]],
	])
}

fn with_method(method: Method) -> MaskOptions {
	MaskOptions::default().with_method(method)
}

fn labels(mask: &DataArray<f64>) -> Vec<Option<i64>> {
	mask.values.as_slice().iter().map(|v| (!v.is_nan()).then_some(*v as i64)).collect()
}

fn expected_2d(a: i64, b: i64) -> Vec<Option<i64>> {
	vec![Some(a), None, Some(b), None]
}

fn rectangle(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Vec<[f64; 2]> {
	vec![
		[lon_min, lat_max],
		[lon_min, lat_min],
		[lon_max, lat_min],
		[lon_max, lat_max],
	]
}

fn reversed(mut outline: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
	outline.reverse();
	outline
}

fn shifted(outline: &[[f64; 2]], d_lon: f64) -> Vec<[f64; 2]> {
	outline.iter().map(|[x, y]| [x + d_lon, *y]).collect()
}

/// Cells with `lon_min < lon <= lon_max` and `lat_min < lat <= lat_max`.
fn expected_rectangle(lon: &[f64], lat: &[f64], bounds: [f64; 4]) -> Vec<bool> {
	let [lon_min, lon_max, lat_min, lat_max] = bounds;
	lat.iter()
		.flat_map(|y| lon.iter().map(move |x| lon_min < *x && *x <= lon_max && lat_min < *y && *y <= lat_max))
		.collect()
}

fn as_labels(selected: &[bool]) -> Vec<Option<i64>> {
	selected.iter().map(|s| s.then_some(0)).collect()
}

// ── basic masks ──────────────────────────────────────────

#[rstest]
fn mask_dummy_grid(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let mask = dummy_regions().mask_2d(DUMMY_LON, DUMMY_LAT, &with_method(method)).unwrap();
	assert_eq!(mask.name.as_deref(), Some("region"));
	assert_eq!(mask.shape(), &[2, 2]);
	assert_eq!(labels(&mask), expected_2d(0, 1));
	assert_eq!(mask.coord_values("lon"), Some(DUMMY_LON.to_vec()));
	assert_eq!(mask.coord_values("lat"), Some(DUMMY_LAT.to_vec()));
}

#[rstest]
fn mask_with_numbers(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let options = with_method(method).with_numbers(vec![5, 6, 7]);
	let mask = dummy_regions().mask_2d(DUMMY_LON, DUMMY_LAT, &options).unwrap();
	assert_eq!(labels(&mask), expected_2d(5, 6));
}

#[test]
fn numbers_must_match_regions() {
	let options = MaskOptions::default().with_numbers(vec![5]);
	let err = dummy_regions().mask_2d(DUMMY_LON, DUMMY_LAT, &options).unwrap_err();
	assert!(err.to_string().starts_with("`numbers` and `coords` must have the same length"));
}

#[rstest]
fn outlines_with_z_values(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let regions = Regions::from_outlines(&[
		drop_z(&[[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]]),
		drop_z(&[[0.0, 1.0, 1.0], [0.0, 2.0, 1.0], [1.0, 2.0, 1.0], [1.0, 1.0, 1.0]]),
	]);
	let mask = regions.mask_2d(DUMMY_LON, DUMMY_LAT, &with_method(method)).unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));
}

#[rstest]
fn mask_from_mapping(
	#[values("lon", "longitude")] lon_name: &str,
	#[values("lat", "latitude")] lat_name: &str,
	#[values(Method::Rasterize, Method::Shapely)] method: Method,
) {
	let mut source = HashMap::new();
	source.insert(lon_name.to_string(), NdArray::from(DUMMY_LON));
	source.insert(lat_name.to_string(), NdArray::from(DUMMY_LAT));

	let options = with_method(method).with_names(lon_name, lat_name);
	let mask = dummy_regions().mask_2d_from(&source, &options).unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));
	assert_eq!(mask.dims, vec![lat_name.to_string(), lon_name.to_string()]);
	assert_eq!(mask.coord_values(lon_name), Some(DUMMY_LON.to_vec()));
}

#[test]
fn mapping_falls_back_to_aliases() {
	let mut source = HashMap::new();
	source.insert("longitude".to_string(), NdArray::from(DUMMY_LON));
	source.insert("latitude".to_string(), NdArray::from(DUMMY_LAT));
	let mask = dummy_regions().mask_2d_from(&source, &MaskOptions::default()).unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));
	assert!(mask.coord("longitude").is_some());
}

#[rstest]
fn empty_mask_is_not_an_error(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let mask = dummy_regions().mask_2d([10.0, 11.0], [10.0, 11.0], &with_method(method)).unwrap();
	assert_eq!(mask.shape(), &[2, 2]);
	assert!(mask.is_all(|v| v.is_nan()));
	assert_eq!(mask.coord_values("lon"), Some(vec![10.0, 11.0]));
	assert_eq!(mask.coord_values("lat"), Some(vec![10.0, 11.0]));
}

// ── coordinate errors ────────────────────────────────────

fn zeros(ndim: usize) -> NdArray<f64> {
	NdArray::from_shape_vec(vec![2; ndim], vec![0.0; 1 << ndim]).unwrap()
}

#[rstest]
#[case(2, 1)]
#[case(1, 2)]
#[case(0, 1)]
fn unequal_ndim(#[case] lon_ndim: usize, #[case] lat_ndim: usize) {
	let err = dummy_regions()
		.mask_2d(zeros(lon_ndim), zeros(lat_ndim), &MaskOptions::default())
		.unwrap_err();
	assert!(err.to_string().starts_with("Equal number of dimensions required"));
}

#[test]
fn unequal_2d_shapes() {
	let lon = NdArray::from_shape_vec(vec![2, 3], vec![0.0; 6]).unwrap();
	let lat = NdArray::from_shape_vec(vec![2, 4], vec![0.0; 8]).unwrap();
	let err = dummy_regions().mask_2d(lon, lat, &MaskOptions::default()).unwrap_err();
	assert!(err.to_string().starts_with("2D lon and lat coordinates need to have the same shape"));
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(4)]
fn ndim_must_be_1_or_2(#[case] ndim: usize) {
	let err = dummy_regions()
		.mask_2d(zeros(ndim), zeros(ndim), &MaskOptions::default())
		.unwrap_err();
	assert!(err.to_string().starts_with("1D or 2D data required"));
}

fn lon_2d() -> NdArray<f64> {
	NdArray::try_from(vec![vec![0.5, 1.5], vec![0.5, 1.5]]).unwrap()
}

fn lat_2d() -> NdArray<f64> {
	NdArray::try_from(vec![vec![0.5, 0.5], vec![1.5, 1.5]]).unwrap()
}

#[rstest]
fn rasterize_needs_regular_grid(
	#[values(lon_2d(), NdArray::from(vec![0.0, 1.0, 3.0]), NdArray::from(0.0))] lon: NdArray<f64>,
	#[values(lat_2d(), NdArray::from(vec![0.0, 1.0, 3.0]), NdArray::from(0.0))] lat: NdArray<f64>,
) {
	let err = dummy_regions()
		.mask_2d(lon, lat, &with_method(Method::Rasterize))
		.unwrap_err();
	assert_eq!(
		err.to_string(),
		"`lat` and `lon` must be equally spaced to use `method='rasterize'`"
	);
}

// ── 2D coordinates ───────────────────────────────────────

#[test]
fn curvilinear_grid() {
	let mask = dummy_regions()
		.mask_2d(lon_2d(), lat_2d(), &with_method(Method::Shapely))
		.unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));
	assert_eq!(mask.dims, vec!["lat_idx".to_string(), "lon_idx".to_string()]);
	assert_eq!(mask.coord("lat").unwrap().data, CoordData::Float(lat_2d()));
	assert_eq!(mask.coord("lon").unwrap().data, CoordData::Float(lon_2d()));
	assert_eq!(mask.coord("lat_idx").unwrap().data.as_int(), Some(&[0_i64, 1][..]));
	assert_eq!(mask.coord("lon_idx").unwrap().data.as_int(), Some(&[0_i64, 1][..]));
}

#[test]
fn labeled_array_with_2d_coords() {
	let dims = vec!["lat_1D".to_string(), "lon_1D".to_string()];
	let data = DataArray::new(dims.clone(), NdArray::<f64>::try_from(vec![vec![0.1, 0.2], vec![0.3, 0.4]]).unwrap())
		.unwrap()
		.with_coord("lat_1D", Coordinate::along("lat_1D", vec![1_i64, 2]))
		.unwrap()
		.with_coord("lon_1D", Coordinate::along("lon_1D", vec![1_i64, 2]))
		.unwrap()
		.with_coord("lat_2D", Coordinate::new(dims.clone(), CoordData::Float(lat_2d())).unwrap())
		.unwrap()
		.with_coord("lon_2D", Coordinate::new(dims.clone(), CoordData::Float(lon_2d())).unwrap())
		.unwrap();

	let options = with_method(Method::Shapely).with_names("lon_2D", "lat_2D");
	let mask = dummy_regions().mask_2d_from(&data, &options).unwrap();

	assert_eq!(labels(&mask), expected_2d(0, 1));
	assert_eq!(mask.dims, dims);
	assert_eq!(mask.coord("lat_2D").unwrap().data, CoordData::Float(lat_2d()));
	assert_eq!(mask.coord("lon_2D").unwrap().data, CoordData::Float(lon_2d()));
	assert_eq!(mask.coord("lat_1D").unwrap().data.as_int(), Some(&[1_i64, 2][..]));
	assert_eq!(mask.coord("lon_1D").unwrap().data.as_int(), Some(&[1_i64, 2][..]));
}

// ── wrapping ─────────────────────────────────────────────

/// Two squares west of the 0° meridian, written in the 0..360 convention.
fn regions_360() -> Regions {
	Regions::from_outlines(&[
		vec![[359.0, 0.0], [359.0, 1.0], [0.0, 1.0], [0.0, 0.0]],
		vec![[359.0, 1.0], [359.0, 2.0], [0.0, 2.0], [0.0, 1.0]],
	])
}

#[rstest]
fn wrap_lon_options(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let regions = regions_360();
	let lon = [-1.5, -0.5];

	let mask = |wrap_lon: WrapLon| {
		let options = with_method(method).with_wrap_lon(wrap_lon);
		labels(&regions.mask_2d(lon, DUMMY_LAT, &options).unwrap())
	};

	assert_eq!(mask(WrapLon::Disabled), vec![None; 4]);
	assert_eq!(mask(WrapLon::To180), vec![None; 4]);
	assert_eq!(mask(WrapLon::Auto), expected_2d(0, 1));
	assert_eq!(mask(WrapLon::To360), expected_2d(0, 1));
}

#[rstest]
fn auto_wrap(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let options = with_method(method);

	// -180..180 regions and 0..360 lon
	let regions = Regions::from_outlines(&[
		vec![[-180.0, 0.0], [-180.0, 1.0], [-1.0, 1.0], [-1.0, 0.0]],
		vec![[-180.0, 1.0], [-180.0, 2.0], [-1.0, 2.0], [-1.0, 1.0]],
	]);
	let mask = regions.mask_2d([358.5, 359.5], DUMMY_LAT, &options).unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));
	assert_eq!(mask.coord_values("lon"), Some(vec![358.5, 359.5]));

	// 0..360 regions and -180..180 lon
	let mask = regions_360().mask_2d([-1.5, -0.5], DUMMY_LAT, &options).unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));

	// 0..360 regions and 0..360 lon
	let mask = regions_360().mask_2d([0.5, 359.5], DUMMY_LAT, &options).unwrap();
	assert_eq!(labels(&mask), expected_2d(0, 1));
}

fn wide_region() -> Regions {
	Regions::from_numbered_outlines(&[rectangle(-180.0, 360.0, 0.0, 10.0)], &[1]).unwrap()
}

#[test]
fn wide_regions_need_disabled_wrap() {
	let lon: Vec<f64> = (0..214).map(|i| -175.0 + 2.5 * f64::from(i)).collect();
	let lat = vec![10.0, 7.0, 4.0];
	let options = MaskOptions::default().with_wrap_lon(false);

	let mask = wide_region().mask_2d(lon.clone(), lat.clone(), &options).unwrap();
	assert!(mask.is_all(|v| *v == 1.0));
	assert_eq!(mask.coord_values("lon"), Some(lon.clone()));

	let mask = wide_region().mask_3d(lon.clone(), lat.clone(), &options).unwrap();
	assert!(mask.is_all(|v| *v));

	// no special treatment of -180° without wrapping
	let mask = wide_region().mask_2d(vec![-180.0], lat.clone(), &options).unwrap();
	assert!(mask.is_all(|v| v.is_nan()));
	let mask = wide_region().mask_3d(vec![-180.0], lat.clone(), &options).unwrap();
	assert_eq!(mask.shape(), &[0, 3, 1]);

	let err = wide_region().mask_2d(lon.clone(), lat.clone(), &MaskOptions::default()).unwrap_err();
	assert!(err.to_string().contains("Set `wrap_lon=False` to skip this check."));
	let err = wide_region().mask_3d(lon, lat, &MaskOptions::default()).unwrap_err();
	assert!(err.to_string().contains("Set `wrap_lon=False` to skip this check."));
}

#[rstest]
fn western_edge_on_zero_meridian(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let regions = Regions::from_outlines(&[rectangle(0.0, 1.0, 0.0, 1.0)]);
	let lat = vec![0.5, 1.5];
	let expected = vec![None, Some(0), None, None, None, None];

	let mask = regions.mask_2d(vec![0.0, 1.0, 2.0], lat.clone(), &with_method(method)).unwrap();
	assert_eq!(labels(&mask), expected);
	let mask = regions.mask_2d(vec![-360.0, -359.0, -358.0], lat, &with_method(method)).unwrap();
	assert_eq!(labels(&mask), expected);
}

// ── edges and holes ──────────────────────────────────────

const US: [f64; 4] = [-100.0, -80.0, 28.0, 50.0];
const US_HOLE: [f64; 4] = [-94.0, -86.0, 34.0, 44.0];

fn us_grid(d_lon: f64) -> (Vec<f64>, Vec<f64>) {
	lon_lat_from_bounds(-161.0 + d_lon, -29.0 + d_lon, 2.0, 75.0, 13.0, -2.0).unwrap()
}

fn us_regions(d_lon: f64, clockwise: bool, hole: bool) -> Regions {
	let [x0, x1, y0, y1] = US;
	let outline = shifted(&rectangle(x0, x1, y0, y1), d_lon);
	let outline = if clockwise { reversed(outline) } else { outline };
	let interiors = if hole {
		let [x0, x1, y0, y1] = US_HOLE;
		let inner = shifted(&rectangle(x0, x1, y0, y1), d_lon);
		vec![if clockwise { inner } else { reversed(inner) }]
	} else {
		vec![]
	};
	Regions::from_polygons(vec![polygon_from_rings(&outline, &interiors)])
}

fn expected_us(lon: &[f64], lat: &[f64], hole: bool) -> Vec<Option<i64>> {
	let wrapped = wrap_to_range(lon, -180.0);
	let outer = expected_rectangle(&wrapped, lat, US);
	let inner = expected_rectangle(&wrapped, lat, US_HOLE);
	let selected: Vec<bool> = outer.iter().zip(&inner).map(|(o, i)| *o && !(hole && *i)).collect();
	as_labels(&selected)
}

#[rstest]
fn edges_of_rectangle(
	#[values(Method::Rasterize, Method::Shapely)] method: Method,
	#[values(0.0, 360.0)] region_shift: f64,
	#[values(false, true)] clockwise: bool,
	#[values(0.0, 360.0)] grid_shift: f64,
	#[values(false, true)] hole: bool,
) {
	let (lon, lat) = us_grid(grid_shift);
	let regions = us_regions(region_shift, clockwise, hole);
	let mask = regions.mask_2d(lon.clone(), lat.clone(), &with_method(method)).unwrap();
	assert_eq!(labels(&mask), expected_us(&lon, &lat, hole));
	assert_eq!(mask.coord_values("lon"), Some(lon));
	assert_eq!(mask.coord_values("lat"), Some(lat));
}

// ── antimeridian ─────────────────────────────────────────

#[rstest]
#[case(360.0)]
#[case(300.0)]
fn rasterize_on_split_lon(#[case] lon_stop: f64, #[values(false, true)] clockwise: bool) {
	let (lon, lat) = lon_lat_from_bounds(0.0, lon_stop, 2.0, 75.0, 13.0, -2.0).unwrap();
	let regions = us_regions(0.0, clockwise, false);

	let raster = regions.mask_2d(lon.clone(), lat.clone(), &with_method(Method::Rasterize)).unwrap();
	assert_eq!(labels(&raster), expected_us(&lon, &lat, false));
	assert_eq!(raster.coord_values("lon"), Some(lon.clone()));

	let direct = regions.mask_2d(lon, lat, &with_method(Method::Shapely)).unwrap();
	assert_eq!(labels(&raster), labels(&direct));
}

/// A global outline covers every grid point, including -180°, 0° and -90°.
#[rstest]
fn whole_globe(
	#[values(Method::Rasterize, Method::Shapely)] method: Method,
	#[values(-180.0, 0.0)] west: f64,
	#[values(-180.0, 0.0)] lon_start: f64,
) {
	let regions = Regions::from_outlines(&[vec![
		[west, 90.0],
		[west, -90.0],
		[west + 360.0, -90.0],
		[west + 360.0, 90.0],
	]]);
	let lon: Vec<f64> = (0..36).map(|i| lon_start + 10.0 * f64::from(i)).collect();
	let lat: Vec<f64> = (0..19).map(|i| 90.0 - 10.0 * f64::from(i)).collect();

	let mask = regions.mask_2d(lon, lat, &with_method(method)).unwrap();
	assert!(mask.is_all(|v| *v == 0.0));
}

// ── agreement of the strategies ──────────────────────────

#[rstest]
fn sloped_edges_agree(#[values(false, true)] clockwise: bool) {
	let (lon, lat) = lon_lat_from_bounds(-0.5, 16.0, 1.0, 10.5, -0.5, -1.0).unwrap();
	let outline = vec![[0.0, 10.1], [0.0, 0.1], [5.1, 0.1], [15.1, 10.1]];
	let regions = Regions::from_outlines(&[if clockwise { reversed(outline) } else { outline }]);

	let direct = regions.mask_2d(lon.clone(), lat.clone(), &with_method(Method::Shapely)).unwrap();
	let raster = regions.mask_2d(lon, lat, &with_method(Method::Rasterize)).unwrap();
	assert_eq!(labels(&direct), labels(&raster));
	assert!(labels(&direct).iter().any(Option::is_some));
}

#[test]
fn irregular_outlines_agree_off_the_edges() {
	let regions = Regions::new(vec![
		Region::from_outline(3, &[[-20.3, -10.7], [10.1, -30.2], [40.6, 5.3], [0.2, 35.9]]),
		Region::from_outline(8, &[[60.4, 20.1], [95.7, 18.9], [80.2, 60.3]]),
		Region::new(
			11,
			"Ring",
			"RNG",
			polygon_from_rings(
				&[[-150.3, -60.1], [-90.2, -60.4], [-90.6, -20.2], [-150.1, -20.7]],
				&[vec![[-130.3, -50.2], [-110.4, -50.6], [-110.7, -30.3], [-130.2, -30.1]]],
			),
		),
	])
	.unwrap();
	let (lon, lat) = lon_lat_from_bounds(-180.0, 180.0, 2.5, 90.0, -90.0, -2.5).unwrap();

	let direct = regions.mask_2d(lon.clone(), lat.clone(), &with_method(Method::Shapely)).unwrap();
	let raster = regions.mask_2d(lon, lat, &with_method(Method::Rasterize)).unwrap();
	assert_eq!(labels(&direct), labels(&raster));
	for number in [3, 8, 11] {
		assert!(labels(&direct).contains(&Some(number)));
	}
}

#[rstest]
fn shifted_longitudes_give_same_mask(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let regions = us_regions(0.0, false, true);
	let (lon, lat) = us_grid(0.0);
	let shifted: Vec<f64> = lon.iter().map(|v| v + 360.0).collect();

	let a = regions.mask_2d(lon, lat.clone(), &with_method(method)).unwrap();
	let b = regions.mask_2d(shifted.clone(), lat, &with_method(method)).unwrap();
	assert_eq!(labels(&a), labels(&b));
	assert_eq!(b.coord_values("lon"), Some(shifted));
}

// ── 3D masks ─────────────────────────────────────────────

#[rstest]
fn mask_3d(#[values(Method::Rasterize, Method::Shapely)] method: Method, #[values(true, false)] drop: bool) {
	let regions = dummy_regions();
	let options = with_method(method).with_drop(drop);
	let mask = regions.mask_3d(DUMMY_LON, DUMMY_LAT, &options).unwrap();

	let a = [true, false, false, false];
	let b = [false, false, true, false];
	let c = [false; 4];
	let expected: Vec<bool> = if drop { [a, b].concat() } else { [a, b, c].concat() };
	let n = if drop { 2 } else { 3 };

	assert_eq!(mask.shape(), &[n, 2, 2]);
	assert_eq!(mask.values.as_slice(), expected.as_slice());
	assert_eq!(mask.dims, vec!["region".to_string(), "lat".to_string(), "lon".to_string()]);
	assert_eq!(mask.coord_values("lon"), Some(DUMMY_LON.to_vec()));

	let selected = regions.select(&regions.numbers()[..n]).unwrap();
	assert_eq!(mask.coord("region").unwrap().data.as_int(), Some(selected.numbers().as_slice()));
	assert_eq!(mask.coord("abbrevs").unwrap().data.as_text(), Some(selected.abbrevs().as_slice()));
	assert_eq!(mask.coord("names").unwrap().data.as_text(), Some(selected.names().as_slice()));
}

#[rstest]
fn empty_3d_mask(#[values(Method::Rasterize, Method::Shapely)] method: Method) {
	let mask = dummy_regions().mask_3d([10.0, 11.0], [10.0, 11.0], &with_method(method)).unwrap();
	assert_eq!(mask.shape(), &[0, 2, 2]);
	assert_eq!(mask.coord_values("lon"), Some(vec![10.0, 11.0]));
	assert_eq!(mask.coord_values("lat"), Some(vec![10.0, 11.0]));
}

#[rstest]
fn mask_3d_from_mapping(#[values("lon", "longitude")] lon_name: &str, #[values("lat", "latitude")] lat_name: &str) {
	let mut source = HashMap::new();
	source.insert(lon_name.to_string(), NdArray::from(DUMMY_LON));
	source.insert(lat_name.to_string(), NdArray::from(DUMMY_LAT));
	let options = MaskOptions::default().with_names(lon_name, lat_name);
	let mask = dummy_regions().mask_3d_from(&source, &options).unwrap();
	assert_eq!(mask.shape(), &[2, 2, 2]);
	assert_eq!(mask.coord_values(lat_name), Some(DUMMY_LAT.to_vec()));
}

#[test]
fn mask_3d_matches_mask_2d() {
	let regions = us_regions(0.0, false, true);
	let (lon, lat) = us_grid(0.0);
	let options = MaskOptions::default().with_drop(false);
	let mask_2d = regions.mask_2d(lon.clone(), lat.clone(), &options).unwrap();
	let mask_3d = regions.mask_3d(lon, lat, &options).unwrap();

	let numbers = mask_3d.coord("region").unwrap().data.as_int().unwrap().to_vec();
	let labels_2d = labels(&mask_2d);
	for (i, label) in labels_2d.iter().enumerate() {
		let hits: Vec<i64> = numbers
			.iter()
			.enumerate()
			.filter(|(layer, _)| mask_3d.layer(*layer).unwrap()[i])
			.map(|(_, n)| *n)
			.collect();
		assert_eq!(hits, label.iter().copied().collect::<Vec<_>>());
	}
}

#[test]
fn dropped_layers_are_all_false() {
	let regions = dummy_regions();
	let kept = regions.mask_3d(DUMMY_LON, DUMMY_LAT, &MaskOptions::default()).unwrap();
	let all = regions
		.mask_3d(DUMMY_LON, DUMMY_LAT, &MaskOptions::default().with_drop(false))
		.unwrap();

	let kept_numbers = kept.coord("region").unwrap().data.as_int().unwrap().to_vec();
	let all_numbers = all.coord("region").unwrap().data.as_int().unwrap().to_vec();
	for (i, number) in all_numbers.iter().enumerate() {
		let layer = all.layer(i).unwrap();
		match kept_numbers.iter().position(|n| n == number) {
			Some(k) => assert_eq!(kept.layer(k).unwrap(), layer),
			None => assert!(layer.iter().all(|v| !v)),
		}
	}
}
