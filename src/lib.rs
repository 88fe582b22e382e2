//! Declarative document layout and pagination with pluggable render
//! backends.
//!
//! A document is a JSON-friendly tree of content nodes plus a layout
//! configuration. The engine measures the tree, solves flex containers,
//! paginates, and hands each page to a [`PageRenderer`] as positioned
//! primitives. Nothing is drawn during measurement; whatever a backend
//! receives is final.
//!
//! ```
//! use folio::{Document, ScaledMetrics};
//!
//! let doc = Document::from_json(r#"{
//!     "nodes": [
//!         { "type": "heading", "text": "Quarterly Report" },
//!         { "type": "text", "text": "All figures in points." }
//!     ]
//! }"#).unwrap();
//! let output = doc.layout(&ScaledMetrics::default()).unwrap();
//! assert_eq!(output.page_count(), 1);
//! ```

mod document;

pub use document::{Document, DocumentError};

pub use folio_dom::{ContentNode, GroupNode, Placement, PlacementError};
pub use folio_layout::{
    FaceMetrics, FontCatalog, LayoutConfig, LayoutElement, LayoutError, LayoutMode, LayoutOutput,
    LayoutWarning, OverflowPolicy, PositionedElement, ScaledMetrics,
};
pub use folio_render_core::{PageRenderer, RenderError};
pub use folio_style::{Dimension, Margins, PageSize};
pub use folio_traits::{FontError, FontMetrics, SharedFontData};
pub use folio_types::Color;
