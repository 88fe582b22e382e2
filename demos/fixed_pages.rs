//! Fixed-mode layout: every element declares its page and coordinates.
//!
//! Run with `cargo run --example fixed_pages`.

use folio::{Document, PageRenderer, PositionedElement, RenderError, ScaledMetrics};

struct CountingRenderer {
    total: usize,
}

impl PageRenderer for CountingRenderer {
    fn begin_document(&mut self, page_width: f32, page_height: f32) -> Result<(), RenderError> {
        println!("document {page_width:.0}x{page_height:.0}pt");
        Ok(())
    }

    fn render_page(
        &mut self,
        page_index: usize,
        elements: &[PositionedElement],
    ) -> Result<(), RenderError> {
        println!("page {page_index}: {} element(s)", elements.len());
        for e in elements {
            println!("  ({:.0}, {:.0}) {:?}", e.x, e.y, e.element);
        }
        self.total += elements.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        println!("{} element(s) total", self.total);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let doc = Document::from_json(
        r##"{
            "pageSize": { "width": 420, "height": 595 },
            "margins": 30,
            "mode": "fixed",
            "overflow": "warn",
            "nodes": [
                { "type": "heading", "text": "Cover", "page": 1, "left": 60, "top": 80 },
                { "type": "rect", "width": 100, "height": 100, "page": 1, "left": 160, "top": 240, "color": "#222222" },
                { "type": "circle", "radius": 40, "page": 2, "left": 170, "top": 220, "color": "#aa3311" },
                { "type": "line", "x1": 0, "y1": 0, "x2": 360, "y2": 0, "thickness": 2, "page": 2, "left": 30, "top": 540 },
                { "type": "text", "text": "Back cover text, pinned near the bottom edge.", "page": 3, "left": 40, "top": 500, "width": 340 }
            ]
        }"##,
    )?;

    let warnings = doc.render(&ScaledMetrics::default(), &mut CountingRenderer { total: 0 })?;
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
