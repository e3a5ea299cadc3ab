use super::load_regions;
use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use regionmask_core::{DataArray, MaskOptions, Method, WrapLon, lon_lat_from_bounds};
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// YAML file with the region outlines
	#[arg(required = true)]
	filename: PathBuf,

	/// longitude cell edges as start,stop,step
	/// e.g. -180,180,1 for a global 1° grid
	#[arg(long, required = true, allow_hyphen_values = true, verbatim_doc_comment)]
	lon: String,

	/// latitude cell edges as start,stop,step
	#[arg(long, required = true, allow_hyphen_values = true)]
	lat: String,

	/// masking method: rasterize or shapely
	/// picks the fastest one if not set
	#[arg(long, verbatim_doc_comment)]
	method: Option<Method>,

	/// wrap grid longitudes: auto, false, 180 or 360
	#[arg(long, default_value = "auto")]
	wrap_lon: WrapLon,

	/// mask only these region numbers, comma separated
	#[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
	select: Option<Vec<i64>>,

	/// values written instead of the region numbers, comma separated
	#[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
	numbers: Option<Vec<i64>>,

	/// print one boolean layer per region
	#[arg(long = "3d")]
	three_d: bool,

	/// with --3d, also print regions that contain no grid cell
	#[arg(long)]
	keep_empty: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	print!("{}", render(arguments)?);
	Ok(())
}

/// Computes the mask and formats it with the northernmost row first.
pub fn render(arguments: &Subcommand) -> Result<String> {
	let mut regions = load_regions(&arguments.filename)?;
	if let Some(numbers) = &arguments.select {
		regions = regions.select(numbers)?;
	}

	let [lon_start, lon_stop, d_lon] = parse_bounds(&arguments.lon).context("parsing --lon")?;
	let [lat_start, lat_stop, d_lat] = parse_bounds(&arguments.lat).context("parsing --lat")?;
	let (lon, lat) = lon_lat_from_bounds(lon_start, lon_stop, d_lon, lat_start, lat_stop, d_lat)?;
	ensure!(!lon.is_empty() && !lat.is_empty(), "the grid has no cells");
	log::info!("masking {} regions on {} x {} cells", regions.len(), lat.len(), lon.len());

	let mut options = MaskOptions::default()
		.with_wrap_lon(arguments.wrap_lon)
		.with_drop(!arguments.keep_empty);
	if let Some(method) = arguments.method {
		options = options.with_method(method);
	}
	if let Some(numbers) = &arguments.numbers {
		options = options.with_numbers(numbers.clone());
	}

	let north_first = lat.last() > lat.first();
	let width = lon.len();
	if arguments.three_d {
		let mask = regions.mask_3d(lon, lat, &options)?;
		render_layers(&mask, width, north_first)
	} else {
		let mask = regions.mask_2d(lon, lat, &options)?;
		let cells: Vec<String> = mask
			.values
			.as_slice()
			.iter()
			.map(|v| if v.is_nan() { ".".to_string() } else { (*v as i64).to_string() })
			.collect();
		Ok(render_grid(&cells, width, north_first, " "))
	}
}

fn render_layers(mask: &DataArray<bool>, width: usize, north_first: bool) -> Result<String> {
	let (Some(numbers), Some(abbrevs)) = (
		mask.coord("region").and_then(|c| c.data.as_int()),
		mask.coord("abbrevs").and_then(|c| c.data.as_text()),
	) else {
		bail!("3D mask without region labels");
	};

	let mut out = String::new();
	for (index, (number, abbrev)) in numbers.iter().zip(abbrevs).enumerate() {
		let Some(layer) = mask.layer(index) else {
			bail!("3D mask without layer {index}");
		};
		let cells: Vec<String> = layer.iter().map(|v| if *v { "#" } else { "." }.to_string()).collect();
		out.push_str(&format!("{number} {abbrev}\n"));
		out.push_str(&render_grid(&cells, width, north_first, ""));
	}
	Ok(out)
}

fn render_grid(cells: &[String], width: usize, north_first: bool, separator: &str) -> String {
	let pad = cells.iter().map(String::len).max().unwrap_or(1);
	let mut rows: Vec<String> = cells
		.chunks(width)
		.map(|row| row.iter().map(|c| format!("{c:>pad$}")).collect::<Vec<_>>().join(separator))
		.collect();
	if north_first {
		rows.reverse();
	}
	rows.iter().map(|row| format!("{row}\n")).collect()
}

fn parse_bounds(text: &str) -> Result<[f64; 3]> {
	let values = text
		.split(',')
		.map(|v| v.trim().parse::<f64>().with_context(|| format!("invalid number '{v}'")))
		.collect::<Result<Vec<f64>>>()?;
	match values.as_slice() {
		[start, stop, step] => Ok([*start, *stop, *step]),
		_ => bail!("expected start,stop,step, got '{text}'"),
	}
}
