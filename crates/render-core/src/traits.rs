use crate::error::RenderError;
use folio_layout::PositionedElement;

/// A drawing backend for solved pages.
///
/// The engine measures and positions everything before any of these
/// methods run; implementations draw each element at exactly the frame
/// they are handed, using the same font identifiers the measurement pass
/// saw. Pages arrive in order, each exactly once.
pub trait PageRenderer {
    fn begin_document(&mut self, page_width: f32, page_height: f32) -> Result<(), RenderError>;

    /// Draws one page. `page_index` is 1-based.
    fn render_page(
        &mut self,
        page_index: usize,
        elements: &[PositionedElement],
    ) -> Result<(), RenderError>;

    fn finish(&mut self) -> Result<(), RenderError>;
}
