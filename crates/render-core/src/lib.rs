//! Core rendering abstractions for layout output.
//!
//! This crate defines the boundary a drawing backend implements to consume
//! solved pages: the `PageRenderer` trait and its error type. Backends
//! receive positioned primitives in page coordinates and never re-measure
//! anything.

mod error;
mod traits;

pub use error::RenderError;
pub use traits::PageRenderer;
