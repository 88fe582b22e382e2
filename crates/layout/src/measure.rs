//! The dry-run measurement pass.
//!
//! Heights computed here must match what the renderer later consumes for
//! the same node at the same width; any divergence between the two passes
//! is a defect. Measurement never mutates the content tree or any shared
//! font state (the metrics trait is stateless per call).

use crate::config::LayoutConfig;
use crate::LayoutError;
use folio_dom::{ContentNode, GroupNode, HeadingNode, ImageNode, Placement, TextNode};
use folio_style::FlexDirection;
use folio_traits::FontMetrics;

const WIDTH_EPSILON: f32 = 0.01;

/// Computes rendered heights (and natural widths for row layouts) for
/// content nodes without drawing anything.
pub struct Measurer<'a> {
    metrics: &'a dyn FontMetrics,
    config: &'a LayoutConfig,
}

impl<'a> Measurer<'a> {
    pub fn new(metrics: &'a dyn FontMetrics, config: &'a LayoutConfig) -> Self {
        Self { metrics, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    /// Height in points the node will consume when laid out against
    /// `available_width`.
    pub fn measure(&self, node: &ContentNode, available_width: f32) -> Result<f32, LayoutError> {
        // A declared point height is authoritative for any node kind.
        if let Some(h) = node.common().height.and_then(|d| d.as_pt()) {
            return Ok(h);
        }

        match node {
            ContentNode::Text(t) => Ok(self.text_node_height(t, available_width)),
            ContentNode::Heading(h) => Ok(self.heading_height(h, available_width)),
            ContentNode::Image(i) => self.image_height(i, available_width),
            ContentNode::Rect(_) => Ok(0.0),
            ContentNode::Circle(c) => Ok(2.0 * c.radius),
            ContentNode::Line(l) => Ok((l.y2 - l.y1).abs().max(l.thickness.unwrap_or(1.0))),
            ContentNode::Divider(d) => Ok(d.thickness.unwrap_or(1.0)),
            ContentNode::Group(g) => self.group_height(g, available_width),
            ContentNode::PageBreak(_) => Ok(0.0),
        }
    }

    /// Unwrapped width the node naturally takes, capped by the caller.
    /// Used for shrink-to-content sizing inside row containers.
    pub fn natural_width(&self, node: &ContentNode, limit: f32) -> f32 {
        if let Some(w) = node.common().width.and_then(|d| d.as_pt()) {
            return w;
        }
        match node {
            ContentNode::Text(t) => {
                let (family, size) = self.text_font(t);
                self.widest_line(&t.text, family, size)
            }
            ContentNode::Heading(h) => {
                let (family, size) = self.heading_font(h);
                self.widest_line(&h.text, family, size)
            }
            ContentNode::Image(i) => i
                .natural_width
                .unwrap_or(self.config.image_fallback_height),
            ContentNode::Rect(_) => 0.0,
            ContentNode::Circle(c) => 2.0 * c.radius,
            ContentNode::Line(l) => (l.x2 - l.x1).abs().max(l.thickness.unwrap_or(1.0)),
            ContentNode::Divider(_) => {
                if limit.is_finite() {
                    limit
                } else {
                    0.0
                }
            }
            ContentNode::Group(g) => {
                let padding = g.padding();
                let inner_limit = (limit - padding.horizontal()).max(0.0);
                let widths = g
                    .children
                    .iter()
                    .map(|c| self.natural_width(c, inner_limit));
                let content = match g.direction {
                    FlexDirection::Row => {
                        let n = g.children.len();
                        widths.sum::<f32>() + g.gap * n.saturating_sub(1) as f32
                    }
                    FlexDirection::Column => widths.fold(0.0f32, f32::max),
                };
                content + padding.horizontal()
            }
            ContentNode::PageBreak(_) => 0.0,
        }
    }

    /// Width of the widest single word; the narrowest a text node can wrap.
    pub fn min_content_width(&self, node: &ContentNode) -> f32 {
        match node {
            ContentNode::Text(t) => {
                let (family, size) = self.text_font(t);
                self.widest_word(&t.text, family, size)
            }
            ContentNode::Heading(h) => {
                let (family, size) = self.heading_font(h);
                self.widest_word(&h.text, family, size)
            }
            _ => self.natural_width(node, f32::INFINITY),
        }
    }

    fn text_font<'b>(&'b self, t: &'b TextNode) -> (&'b str, f32) {
        (
            t.font_family
                .as_deref()
                .unwrap_or(&self.config.default_font_family),
            t.font_size.unwrap_or(self.config.default_font_size),
        )
    }

    fn heading_font<'b>(&'b self, h: &'b HeadingNode) -> (&'b str, f32) {
        (
            h.font_family
                .as_deref()
                .unwrap_or(&self.config.default_font_family),
            h.font_size.unwrap_or_else(|| self.config.heading_size(h.level)),
        )
    }

    fn text_node_height(&self, t: &TextNode, available_width: f32) -> f32 {
        let (family, size) = self.text_font(t);
        self.text_height(&t.text, family, size, t.line_gap, available_width)
    }

    fn heading_height(&self, h: &HeadingNode, available_width: f32) -> f32 {
        let (family, size) = self.heading_font(h);
        self.text_height(&h.text, family, size, h.line_gap, available_width)
    }

    /// Simulates line wrapping word by word and returns the block height.
    ///
    /// The wrap must be simulated here rather than delegated to the
    /// backend, because lines mixing vector text with bitmap glyphs are
    /// invisible to the backend's native wrapping.
    pub fn text_height(
        &self,
        text: &str,
        family: &str,
        size: f32,
        line_gap: Option<f32>,
        available_width: f32,
    ) -> f32 {
        let line_height = self.config.line_height(size, line_gap);
        let lines: usize = text
            .split('\n')
            .map(|hard_line| self.count_wrapped_lines(hard_line, family, size, available_width))
            .sum();
        lines.max(1) as f32 * line_height
    }

    fn count_wrapped_lines(&self, line: &str, family: &str, size: f32, max_width: f32) -> usize {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return 1;
        };
        let space = self.metrics.text_width(" ", family, size);
        let mut lines = 1usize;
        let mut current = self.word_width(first, family, size);
        for word in words {
            let w = self.word_width(word, family, size);
            if current + space + w > max_width + WIDTH_EPSILON {
                lines += 1;
                current = w;
            } else {
                current += space + w;
            }
        }
        lines
    }

    /// Measured width of one word, substituting an em-sized box for every
    /// glyph the metrics provider does not cover (bitmap-rendered glyphs).
    pub fn word_width(&self, word: &str, family: &str, size: f32) -> f32 {
        let mut width = 0.0f32;
        let mut run = String::new();
        for ch in word.chars() {
            if self.metrics.covers(ch, family) {
                run.push(ch);
            } else {
                if !run.is_empty() {
                    width += self.metrics.text_width(&run, family, size);
                    run.clear();
                }
                width += size;
            }
        }
        if !run.is_empty() {
            width += self.metrics.text_width(&run, family, size);
        }
        width
    }

    fn widest_line(&self, text: &str, family: &str, size: f32) -> f32 {
        text.split('\n')
            .map(|line| {
                let space = self.metrics.text_width(" ", family, size);
                let mut total = 0.0f32;
                for (i, word) in line.split_whitespace().enumerate() {
                    if i > 0 {
                        total += space;
                    }
                    total += self.word_width(word, family, size);
                }
                total
            })
            .fold(0.0f32, f32::max)
    }

    fn widest_word(&self, text: &str, family: &str, size: f32) -> f32 {
        text.split_whitespace()
            .map(|w| self.word_width(w, family, size))
            .fold(0.0f32, f32::max)
    }

    fn image_height(&self, img: &ImageNode, available_width: f32) -> Result<f32, LayoutError> {
        let explicit_width = img
            .common
            .width
            .and_then(|d| d.resolve(available_width));
        match (explicit_width, img.natural_width, img.natural_height) {
            (Some(w), Some(nw), Some(nh)) if nw > 0.0 => Ok(w * nh / nw),
            (_, _, Some(nh)) => Ok(nh),
            _ if img.is_remote() => Err(LayoutError::UnmeasurableImage {
                src: img.src.clone(),
            }),
            _ => Ok(self.config.image_fallback_height),
        }
    }

    /// Summed height of a group's children, as reserved by the atomic
    /// grouping check. Page-pinned children and page breaks consume no
    /// flow space.
    fn group_height(&self, g: &GroupNode, available_width: f32) -> Result<f32, LayoutError> {
        let padding = g.padding();
        let inner = (available_width - padding.horizontal()).max(0.0);
        let mut flowing = 0usize;
        let mut total = 0.0f32;
        let mut tallest = 0.0f32;
        for child in &g.children {
            // Page breaks and page-pinned children never enter the flex
            // tree, so they earn neither height nor a gap here.
            if child.is_page_break()
                || matches!(child.placement(), Ok(Placement::AbsolutePage { .. }))
            {
                continue;
            }
            let child_width = match g.direction {
                FlexDirection::Column => child
                    .common()
                    .width
                    .and_then(|d| d.resolve(inner))
                    .unwrap_or(inner),
                FlexDirection::Row => child
                    .common()
                    .width
                    .and_then(|d| d.resolve(inner))
                    .unwrap_or_else(|| self.natural_width(child, inner).min(inner)),
            };
            let h = self.measure(child, child_width)?;
            flowing += 1;
            total += h;
            tallest = tallest.max(h);
        }
        let content = match g.direction {
            FlexDirection::Column => total + g.gap * flowing.saturating_sub(1) as f32,
            FlexDirection::Row => tallest,
        };
        Ok(content + padding.vertical())
    }
}
