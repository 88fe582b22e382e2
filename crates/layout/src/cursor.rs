//! The vertical position tracker for one page of flow layout.

use crate::config::{LayoutConfig, LayoutMode};
use folio_style::Margins;

/// Result of asking the cursor for vertical space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceOutcome {
    /// The content fits at the current position.
    Fits,
    /// A page break occurred; the cursor is back at the top margin of a
    /// fresh page.
    Broke,
}

/// Tracks the current Y offset, margins and content width for one page.
///
/// Created at the top margin when a page opens; `y` never decreases within
/// a page's lifetime. Fixed-mode cursors never break.
#[derive(Debug, Clone)]
pub struct PageCursor {
    y: f32,
    margins: Margins,
    page_width: f32,
    page_height: f32,
    mode: LayoutMode,
}

// Tolerance for floating point fit checks.
const FIT_EPSILON: f32 = 0.01;

impl PageCursor {
    pub fn new(config: &LayoutConfig) -> Self {
        let (page_width, page_height) = config.page_dimensions();
        Self {
            y: config.margins.top,
            margins: config.margins,
            page_width,
            page_height,
            mode: config.mode,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn content_width(&self) -> f32 {
        (self.page_width - self.margins.horizontal()).max(0.0)
    }

    pub fn usable_height(&self) -> f32 {
        (self.page_height - self.margins.vertical()).max(0.0)
    }

    /// Vertical space left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f32 {
        (self.page_height - self.margins.bottom - self.y).max(0.0)
    }

    pub fn at_top(&self) -> bool {
        (self.y - self.margins.top).abs() < FIT_EPSILON
    }

    /// Guarantees `needed` points of space, breaking to a fresh page if the
    /// remainder is too small. Breaking from the top of an already-fresh
    /// page gains nothing, so oversized content stays put and overflows.
    /// Fixed-mode cursors never break.
    pub fn ensure_space(&mut self, needed: f32) -> SpaceOutcome {
        if self.mode == LayoutMode::Fixed {
            return SpaceOutcome::Fits;
        }
        if needed > self.remaining() + FIT_EPSILON && !self.at_top() {
            self.y = self.margins.top;
            SpaceOutcome::Broke
        } else {
            SpaceOutcome::Fits
        }
    }

    /// Moves the cursor down. Never moves it up.
    pub fn advance(&mut self, dy: f32) {
        if dy > 0.0 {
            self.y += dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_style::PageSize;

    fn flow_config() -> LayoutConfig {
        LayoutConfig {
            page_size: PageSize::Custom {
                width: 400.0,
                height: 500.0,
            },
            margins: Margins::all(50.0),
            ..Default::default()
        }
    }

    #[test]
    fn starts_at_top_margin() {
        let cursor = PageCursor::new(&flow_config());
        assert_eq!(cursor.y(), 50.0);
        assert!(cursor.at_top());
        assert_eq!(cursor.remaining(), 400.0);
        assert_eq!(cursor.content_width(), 300.0);
    }

    #[test]
    fn advance_is_monotonic() {
        let mut cursor = PageCursor::new(&flow_config());
        cursor.advance(100.0);
        assert_eq!(cursor.y(), 150.0);
        cursor.advance(-30.0);
        assert_eq!(cursor.y(), 150.0, "negative advance must not move up");
        cursor.advance(0.0);
        assert_eq!(cursor.y(), 150.0);
    }

    #[test]
    fn breaks_when_space_runs_out() {
        let mut cursor = PageCursor::new(&flow_config());
        assert_eq!(cursor.ensure_space(400.0), SpaceOutcome::Fits);
        cursor.advance(350.0);
        assert_eq!(cursor.remaining(), 50.0);
        assert_eq!(cursor.ensure_space(100.0), SpaceOutcome::Broke);
        assert_eq!(cursor.y(), 50.0, "break resets to the top margin");
    }

    #[test]
    fn never_breaks_from_a_fresh_page() {
        let mut cursor = PageCursor::new(&flow_config());
        // taller than the whole usable height: break would not help
        assert_eq!(cursor.ensure_space(1000.0), SpaceOutcome::Fits);
    }

    #[test]
    fn fixed_mode_never_breaks() {
        let mut cursor = PageCursor::new(&LayoutConfig {
            mode: LayoutMode::Fixed,
            ..flow_config()
        });
        cursor.advance(390.0);
        assert_eq!(cursor.ensure_space(500.0), SpaceOutcome::Fits);
    }

    #[test]
    fn no_overrun_after_fitting_ensure() {
        let mut cursor = PageCursor::new(&flow_config());
        for height in [120.0, 90.0, 150.0, 80.0, 200.0] {
            if cursor.ensure_space(height) == SpaceOutcome::Broke {
                assert!(cursor.at_top());
            }
            let before = cursor.y();
            cursor.advance(height);
            assert!(cursor.y() >= before);
            // after a non-breaking ensure, the placed content stays inside
            // the bottom margin
            assert!(cursor.y() <= 500.0 - 50.0 + 0.01);
        }
    }
}
