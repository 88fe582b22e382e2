use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot determine dimensions for image '{src}': no explicit size and no natural dimensions")]
    UnmeasurableImage { src: String },
    #[error("invalid placement: {0}")]
    Placement(#[from] folio_dom::PlacementError),
    #[error("flex solver error: {0}")]
    Solver(String),
}

pub mod config;
pub mod cursor;
pub mod flex;
pub mod fonts;
pub mod measure;
pub mod output;
pub mod paginate;

pub use self::config::{LayoutConfig, LayoutMode, OverflowPolicy};
pub use self::cursor::{PageCursor, SpaceOutcome};
pub use self::fonts::{FaceMetrics, FontCatalog, FontInstance, ScaledMetrics};
pub use self::measure::Measurer;
pub use self::output::{
    LayoutElement, LayoutNode, LayoutOutput, LayoutWarning, Page, PositionedElement,
};
pub use self::paginate::paginate;

// Re-export geometry types used throughout to prevent type mismatches
pub use folio_types::Rect;

#[cfg(test)]
mod flex_test;
#[cfg(test)]
mod test_utils;
