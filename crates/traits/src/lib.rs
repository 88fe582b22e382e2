pub mod metrics;

pub use metrics::{FontError, FontMetrics, SharedFontData};
