mod axes;
mod spacing;
mod wrap;

pub use axes::*;
pub(crate) use spacing::same_step;
pub use spacing::{is_regular, regular_step};
pub use wrap::*;
