//! Scanline fill of polygons onto a pixel grid.
//!
//! A pixel is burned if its centre lies inside the polygon by the even-odd rule. Along each
//! pixel row the crossings of all ring edges with the row's centre line are collected from
//! an R-tree of edges, sorted, and the pixels between consecutive pairs are filled.

use super::Affine;
use geo::{BoundingRect, LineString, Polygon};
use rstar::{AABB, RTree, RTreeObject};
use std::ops::Range;

/// One edge of a polygon ring.
#[derive(Clone, Debug)]
struct EdgeSegment {
	start: [f64; 2],
	end: [f64; 2],
}

impl EdgeSegment {
	/// The x coordinate where the edge crosses the line at height `y`.
	///
	/// Only edges with one end above `y` and the other at or below it cross, so a pixel
	/// centre exactly at a vertex height is counted once.
	fn crossing(&self, y: f64) -> Option<f64> {
		let [x1, y1] = self.start;
		let [x2, y2] = self.end;
		if (y1 > y) == (y2 > y) {
			return None;
		}
		Some(x1 + (x2 - x1) * (y - y1) / (y2 - y1))
	}
}

impl RTreeObject for EdgeSegment {
	type Envelope = AABB<[f64; 2]>;

	fn envelope(&self) -> Self::Envelope {
		AABB::from_corners(
			[self.start[0].min(self.end[0]), self.start[1].min(self.end[1])],
			[self.start[0].max(self.end[0]), self.start[1].max(self.end[1])],
		)
	}
}

fn ring_edges(ring: &LineString<f64>) -> impl Iterator<Item = EdgeSegment> + '_ {
	let first = ring.0.first().copied();
	let last = ring.0.last().copied();
	// rings built by geo are closed, the extra edge only matters for hand-made ones
	let closing = match (last, first) {
		(Some(l), Some(f)) if l != f => Some((l, f)),
		_ => None,
	};
	ring
		.lines()
		.map(|line| (line.start, line.end))
		.chain(closing)
		.map(|(s, e)| EdgeSegment {
			start: [s.x, s.y],
			end: [e.x, e.y],
		})
}

/// Pixel grid a polygon is burned into.
#[derive(Clone, Copy, Debug)]
pub struct PixelGrid {
	pub transform: Affine,
	pub width: usize,
	pub height: usize,
}

impl PixelGrid {
	/// Columns whose centre x lies in `[xa, xb)`.
	fn columns(&self, xa: f64, xb: f64) -> Range<usize> {
		let t = &self.transform;
		let ua = (xa - t.c) / t.a - 0.5;
		let ub = (xb - t.c) / t.a - 0.5;
		let (lo, hi) = if t.a > 0.0 {
			(ua.ceil(), ub.ceil())
		} else {
			(ub.floor() + 1.0, ua.floor() + 1.0)
		};
		let clamp = |v: f64| v.clamp(0.0, self.width as f64) as usize;
		clamp(lo)..clamp(hi)
	}

	fn row_centre(&self, row: usize) -> f64 {
		self.transform.apply(0.0, row as f64 + 0.5).1
	}
}

/// Calls `burn` with the `(row, col)` of every pixel whose centre lies inside `polygon`.
///
/// Returns the number of burned pixels.
pub fn burn_polygon<F: FnMut(usize, usize)>(polygon: &Polygon<f64>, grid: &PixelGrid, mut burn: F) -> usize {
	let Some(bounds) = polygon.bounding_rect() else {
		return 0;
	};
	let (x_min, x_max) = (bounds.min().x, bounds.max().x);
	let tree = RTree::bulk_load(
		std::iter::once(polygon.exterior())
			.chain(polygon.interiors())
			.flat_map(ring_edges)
			.collect(),
	);

	let mut count = 0;
	let mut crossings = Vec::new();
	for row in 0..grid.height {
		let y = grid.row_centre(row);
		crossings.clear();
		crossings.extend(
			tree
				.locate_in_envelope_intersecting(&AABB::from_corners([x_min, y], [x_max, y]))
				.filter_map(|edge| edge.crossing(y)),
		);
		if crossings.len() < 2 {
			continue;
		}
		crossings.sort_by(f64::total_cmp);
		for pair in crossings.chunks_exact(2) {
			for col in grid.columns(pair[0], pair[1]) {
				burn(row, col);
				count += 1;
			}
		}
	}
	count
}
