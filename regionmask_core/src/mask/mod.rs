//! Mask computation.
//!
//! [`Regions::mask_2d`](crate::Regions::mask_2d) and [`Regions::mask_3d`](crate::Regions::mask_3d)
//! are the entry points. Below them sit the strategy selection, the point-in-polygon engine
//! and the rasterizer.

mod assemble;
mod direct;
mod edge;
mod options;
mod raster;
mod select;

pub use direct::mask_direct;
pub use options::*;
pub use raster::{Affine, mask_raster, transform_from_steps};
pub use select::{Strategy, select_strategy};

/// Grid cells are tested at their centre shifted by these offsets, so that a cell centre
/// on a western or southern edge falls outside and one on an eastern or northern edge inside.
pub(crate) const LON_OFFSET: f64 = 1e-8;
pub(crate) const LAT_OFFSET: f64 = 1e-10;
