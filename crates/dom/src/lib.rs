//! The declarative content tree.
//!
//! This crate defines the author-facing description of document content:
//! what exists (text, headings, images, shapes, nested groups) and where it
//! wants to be (flowing after its siblings, or absolutely placed), before
//! any measurement or layout happens. The layout engine consumes this tree
//! read-only.

mod node;
mod placement;

pub use node::{
    CircleNode, ContentNode, DividerNode, GroupNode, HeadingNode, ImageNode, LineNode, NodeCommon,
    PageBreakNode, PositionMode, RectNode, TextNode,
};
pub use placement::{validate, Placement, PlacementError};
