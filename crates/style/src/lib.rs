//! Style primitives for the document model: dimensions, spacing, page
//! geometry and flexbox attributes.

pub mod dimension;
pub mod flex;

pub use dimension::{Dimension, Margins, PageSize};
pub use flex::{AlignItems, AlignSelf, FlexDirection, JustifyContent};
