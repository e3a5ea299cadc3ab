use super::{Region, polygon_from_rings};
use crate::grid::LonRange;
use anyhow::{Result, bail, ensure};
use geo::{MultiPolygon, Rect, coord};
use itertools::Itertools;

/// An ordered, immutable set of regions with unique numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct Regions {
	name: Option<String>,
	regions: Vec<Region>,
}

impl Regions {
	/// Creates a region set.
	///
	/// # Errors
	/// Fails if two regions share a number.
	pub fn new(regions: Vec<Region>) -> Result<Self> {
		ensure!(
			regions.iter().map(|r| r.number).all_unique(),
			"region numbers must be unique, got {:?}",
			regions.iter().map(|r| r.number).collect::<Vec<_>>()
		);
		Ok(Self { name: None, regions })
	}

	/// Creates regions numbered `0..n` from exterior rings.
	pub fn from_outlines(outlines: &[Vec<[f64; 2]>]) -> Self {
		let regions = outlines
			.iter()
			.enumerate()
			.map(|(i, outline)| Region::from_outline(i as i64, outline))
			.collect();
		Self { name: None, regions }
	}

	/// Creates regions numbered `0..n` from polygons, e.g. polygons with holes.
	pub fn from_polygons<P: Into<MultiPolygon<f64>>>(polygons: Vec<P>) -> Self {
		let regions = polygons
			.into_iter()
			.enumerate()
			.map(|(i, polygon)| {
				let number = i as i64;
				Region::new(number, &super::default_name(number), &super::default_abbrev(number), polygon)
			})
			.collect();
		Self { name: None, regions }
	}

	/// Like [`Regions::from_outlines`] but with explicit numbers.
	pub fn from_numbered_outlines(outlines: &[Vec<[f64; 2]>], numbers: &[i64]) -> Result<Self> {
		ensure!(
			outlines.len() == numbers.len(),
			"got {} outlines but {} numbers",
			outlines.len(),
			numbers.len()
		);
		Self::new(
			outlines
				.iter()
				.zip(numbers)
				.map(|(outline, &number)| {
					Region::new(
						number,
						&super::default_name(number),
						&super::default_abbrev(number),
						polygon_from_rings(outline, &[]),
					)
				})
				.collect(),
		)
	}

	pub fn with_name(mut self, name: &str) -> Self {
		self.name = Some(name.to_string());
		self
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn len(&self) -> usize {
		self.regions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Region> {
		self.regions.iter()
	}

	pub fn get(&self, number: i64) -> Option<&Region> {
		self.regions.iter().find(|r| r.number == number)
	}

	pub fn numbers(&self) -> Vec<i64> {
		self.regions.iter().map(|r| r.number).collect()
	}

	pub fn names(&self) -> Vec<String> {
		self.regions.iter().map(|r| r.name.clone()).collect()
	}

	pub fn abbrevs(&self) -> Vec<String> {
		self.regions.iter().map(|r| r.abbrev.clone()).collect()
	}

	pub fn polygons(&self) -> Vec<&MultiPolygon<f64>> {
		self.regions.iter().map(|r| &r.polygon).collect()
	}

	/// Combined bounding box of all regions.
	pub fn bounds(&self) -> Option<Rect<f64>> {
		self.regions
			.iter()
			.filter_map(Region::bounds)
			.reduce(|a, b| {
				Rect::new(
					coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
					coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
				)
			})
	}

	/// Whether the outlines fit into the -180..180 longitude convention.
	pub fn lon_180(&self) -> bool {
		self.bounds().is_some_and(|b| b.min().x >= -180.0 && b.max().x <= 180.0)
	}

	/// The longitude convention the outlines are written in.
	pub fn lon_range(&self) -> LonRange {
		if self.lon_180() { LonRange::Lon180 } else { LonRange::Lon360 }
	}

	/// Returns the subset of regions with the given numbers, in the given order.
	pub fn select(&self, numbers: &[i64]) -> Result<Regions> {
		let mut regions = Vec::with_capacity(numbers.len());
		for number in numbers {
			match self.get(*number) {
				Some(region) => regions.push(region.clone()),
				None => bail!("region number {number} not found"),
			}
		}
		let mut selected = Regions::new(regions)?;
		selected.name.clone_from(&self.name);
		Ok(selected)
	}
}

impl<'a> IntoIterator for &'a Regions {
	type Item = &'a Region;
	type IntoIter = std::slice::Iter<'a, Region>;

	fn into_iter(self) -> Self::IntoIter {
		self.regions.iter()
	}
}
