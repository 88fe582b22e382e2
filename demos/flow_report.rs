//! Lays out a small flowing report and prints every positioned primitive.
//!
//! Run with `cargo run --example flow_report`.

use folio::{Document, LayoutElement, PageRenderer, PositionedElement, RenderError, ScaledMetrics};

struct ConsoleRenderer;

impl PageRenderer for ConsoleRenderer {
    fn begin_document(&mut self, page_width: f32, page_height: f32) -> Result<(), RenderError> {
        println!("document {page_width:.0}x{page_height:.0}pt");
        Ok(())
    }

    fn render_page(
        &mut self,
        page_index: usize,
        elements: &[PositionedElement],
    ) -> Result<(), RenderError> {
        println!("-- page {page_index} --");
        for e in elements {
            let what = match &e.element {
                LayoutElement::Text { content, size, .. } => {
                    format!("text {size:.0}pt {content:?}")
                }
                LayoutElement::Image { src } => format!("image {src}"),
                LayoutElement::Rect { .. } => "rect".to_string(),
                LayoutElement::Circle { radius, .. } => format!("circle r={radius:.0}"),
                LayoutElement::Line { thickness, .. } => format!("line {thickness:.1}pt"),
            };
            println!(
                "  ({:6.1}, {:6.1}) {:5.1}x{:5.1}  {what}",
                e.x, e.y, e.width, e.height
            );
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        println!("done");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let doc = Document::from_json(
        r##"{
            "pageSize": "A4",
            "margins": 48,
            "nodes": [
                { "type": "heading", "text": "Quarterly Report" },
                { "type": "text", "text": "Revenue grew steadily across all three regions, with the strongest gains in the north. Figures below are in thousands." },
                { "type": "divider", "thickness": 2 },
                {
                    "type": "group",
                    "direction": "row",
                    "gap": 12,
                    "children": [
                        { "type": "rect", "width": 120, "height": 60, "color": "#336699" },
                        { "type": "rect", "width": 120, "height": 90, "color": "#669933" },
                        { "type": "rect", "width": 120, "height": 45, "color": "#993366" }
                    ]
                },
                { "type": "page-break" },
                { "type": "heading", "text": "Appendix", "level": 2 },
                { "type": "text", "text": "Methodology notes and raw data references." }
            ]
        }"##,
    )?;

    let warnings = doc.render(&ScaledMetrics::default(), &mut ConsoleRenderer)?;
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
