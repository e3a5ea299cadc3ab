use super::load_regions;
use anyhow::Result;
use clap::Args;
use regionmask_core::Regions;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// YAML file with the region outlines
	#[arg(required = true)]
	filename: PathBuf,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!("probe {:?}", arguments.filename);
	print!("{}", describe(&load_regions(&arguments.filename)?));
	Ok(())
}

/// One line per region with number, abbreviation, name and bounding box.
pub fn describe(regions: &Regions) -> String {
	let mut out = format!(
		"{}: {} regions, longitudes {}\n",
		regions.name().unwrap_or("unnamed"),
		regions.len(),
		if regions.lon_180() { "-180..180" } else { "0..360" }
	);

	let abbrev_width = regions.iter().map(|r| r.abbrev.len()).max().unwrap_or(0).max(6);
	let name_width = regions.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
	out.push_str(&format!("number  {:abbrev_width$}  {:name_width$}  bounds\n", "abbrev", "name"));
	for region in regions {
		let bounds = match region.bounds() {
			Some(b) => format!("[{}, {}] - [{}, {}]", b.min().x, b.min().y, b.max().x, b.max().y),
			None => "empty".to_string(),
		};
		out.push_str(&format!(
			"{:>6}  {:abbrev_width$}  {:name_width$}  {bounds}\n",
			region.number, region.abbrev, region.name
		));
	}
	out
}
