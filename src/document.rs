use serde::{Deserialize, Serialize};
use thiserror::Error;

use folio_dom::ContentNode;
use folio_layout::{LayoutConfig, LayoutError, LayoutOutput, LayoutWarning};
use folio_render_core::{PageRenderer, RenderError};
use folio_traits::FontMetrics;

/// A complete document: layout configuration plus the content tree.
///
/// The configuration fields sit at the top level of the JSON document,
/// alongside `nodes`:
///
/// ```json
/// {
///     "pageSize": "A4",
///     "margins": 36,
///     "nodes": [ { "type": "text", "text": "hello" } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    #[serde(flatten)]
    pub config: LayoutConfig,
    pub nodes: Vec<ContentNode>,
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Document {
    pub fn new(config: LayoutConfig, nodes: Vec<ContentNode>) -> Self {
        Self { config, nodes }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Measures and paginates the document without rendering anything.
    pub fn layout(&self, metrics: &dyn FontMetrics) -> Result<LayoutOutput<'_>, DocumentError> {
        Ok(folio_layout::paginate(&self.nodes, metrics, &self.config)?)
    }

    /// Lays the document out and drives `renderer` through every page in
    /// order. Layout warnings are returned to the caller; renderers never
    /// see them.
    pub fn render(
        &self,
        metrics: &dyn FontMetrics,
        renderer: &mut dyn PageRenderer,
    ) -> Result<Vec<LayoutWarning>, DocumentError> {
        let output = self.layout(metrics)?;
        let (page_width, page_height) = self.config.page_dimensions();

        log::info!(
            "rendering {} page(s) at {page_width:.0}x{page_height:.0}pt",
            output.page_count()
        );
        renderer.begin_document(page_width, page_height)?;
        for page in &output.pages {
            let elements = page.flatten(&self.config);
            renderer.render_page(page.index, &elements)?;
        }
        renderer.finish()?;

        Ok(output.warnings)
    }
}
