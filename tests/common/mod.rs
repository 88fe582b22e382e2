pub mod fixtures;

use folio::{Document, PageRenderer, PositionedElement, RenderError, ScaledMetrics};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Deterministic metrics: every glyph advances half the font size.
pub fn metrics() -> ScaledMetrics {
    ScaledMetrics::default()
}

pub fn document(template: &Value) -> Result<Document, Box<dyn std::error::Error>> {
    Ok(Document::from_json(&serde_json::to_string(template)?)?)
}

/// A render backend that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct CollectingRenderer {
    pub began: Option<(f32, f32)>,
    pub pages: Vec<(usize, Vec<PositionedElement>)>,
    pub finished: bool,
}

impl PageRenderer for CollectingRenderer {
    fn begin_document(&mut self, page_width: f32, page_height: f32) -> Result<(), RenderError> {
        self.began = Some((page_width, page_height));
        Ok(())
    }

    fn render_page(
        &mut self,
        page_index: usize,
        elements: &[PositionedElement],
    ) -> Result<(), RenderError> {
        self.pages.push((page_index, elements.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.finished = true;
        Ok(())
    }
}
