//! FontMetrics trait for abstracting the rendering backend's font metrics.
//!
//! The layout engine measures text through this trait before anything is
//! drawn, and the renderer later consumes the same font/size identifiers.
//! Implementations MUST be deterministic for identical inputs; the whole
//! measurement/render consistency guarantee rests on that.

use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Shared font binary data (reference-counted bytes).
pub type SharedFontData = Arc<Vec<u8>>;

/// Error type for font registration and lookup.
#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("font '{0}' is not registered")]
    NotRegistered(String),

    #[error("failed to parse font data for '{0}'")]
    Unparsable(String),
}

/// Synchronous, deterministic text metrics at a given font and size.
///
/// Calls are stateless: family and size arrive as arguments on every call,
/// so there is no shared font state for the measurer to mutate or restore.
pub trait FontMetrics: Send + Sync + Debug {
    /// Width in points of `text` drawn unwrapped at `size` in `family`.
    fn text_width(&self, text: &str, family: &str, size: f32) -> f32;

    /// Whether `family` covers `ch` with a vector glyph. Uncovered glyphs
    /// (e.g. emoji destined for bitmap rendering) get an estimated
    /// fixed-width box during measurement instead of a real advance.
    fn covers(&self, _ch: char, _family: &str) -> bool {
        true
    }
}
