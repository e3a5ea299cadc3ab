mod catalog;
mod file;
mod region;
#[allow(clippy::module_inception)]
mod regions;

pub use catalog::*;
pub use file::*;
pub use region::*;
pub use regions::*;
