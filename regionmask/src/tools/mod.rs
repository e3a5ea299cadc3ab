pub mod mask;
pub mod probe;

use anyhow::{Context, Result};
use regionmask_core::{Regions, RegionsFile};
use std::path::Path;

pub fn load_regions(filename: &Path) -> Result<Regions> {
	let regions = RegionsFile::from_path(filename)?
		.into_regions()
		.with_context(|| format!("reading regions from {}", filename.display()))?;
	log::debug!("loaded {} regions from {}", regions.len(), filename.display());
	Ok(regions)
}
