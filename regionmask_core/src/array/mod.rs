mod data_array;
mod nd_array;
mod source;

pub use data_array::*;
pub use nd_array::*;
pub(crate) use source::find_coordinate;
pub use source::CoordSource;
