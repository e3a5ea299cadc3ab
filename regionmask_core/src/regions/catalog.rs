use super::{Regions, RegionsFile};
use anyhow::{Result, ensure};
use std::path::PathBuf;

/// A read-only source of predefined region sets.
pub trait RegionCatalog {
	fn regions(&self, key: &str) -> Result<Regions>;
}

/// Catalog backed by a directory of `<key>.yml` region files.
#[derive(Clone, Debug)]
pub struct RegionDirectory {
	root: PathBuf,
}

impl RegionDirectory {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl RegionCatalog for RegionDirectory {
	fn regions(&self, key: &str) -> Result<Regions> {
		ensure!(
			!key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'),
			"invalid region set key '{key}'"
		);
		let path = self.root.join(format!("{key}.yml"));
		let regions = RegionsFile::from_path(&path)?.into_regions()?;
		log::debug!("loaded {} regions from {}", regions.len(), path.display());
		Ok(match regions.name() {
			Some(_) => regions,
			None => regions.with_name(key),
		})
	}
}
