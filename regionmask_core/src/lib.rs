//! Region membership masks for longitude/latitude grids.
//!
//! A [`Regions`] set of numbered polygons is turned into a mask that labels every grid cell
//! with the region containing its centre:
//!
//! ```
//! use regionmask_core::{MaskOptions, Regions};
//!
//! let regions = Regions::from_outlines(&[
//! 	vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
//! 	vec![[0.0, 1.0], [0.0, 2.0], [1.0, 2.0], [1.0, 1.0]],
//! ]);
//! let mask = regions.mask_2d(vec![0.5, 1.5], vec![0.5, 1.5], &MaskOptions::default())?;
//! assert_eq!(mask.values.as_slice()[0], 0.0);
//! assert!(mask.values.as_slice()[1].is_nan());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Evenly spaced grids are rasterized, everything else is tested point by point.

pub mod array;
pub mod grid;
pub mod mask;
pub mod regions;

pub use array::*;
pub use grid::*;
pub use mask::{MaskOptions, Method};
pub use regions::*;
