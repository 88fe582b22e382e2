//! Solved layout results: positioned frames per page, and the flattened
//! primitive stream a render backend consumes.

use std::fmt;

use crate::config::LayoutConfig;
use folio_dom::ContentNode;
use folio_types::{Color, Rect};

/// One solved node: its content, its frame in page coordinates, and its
/// solved children.
#[derive(Debug, Clone)]
pub struct LayoutNode<'a> {
    pub node: &'a ContentNode,
    pub frame: Rect,
    pub children: Vec<LayoutNode<'a>>,
}

impl<'a> LayoutNode<'a> {
    /// Lowest y-extent reached by this node or any descendant.
    pub fn max_extent(&self) -> f32 {
        self.children
            .iter()
            .map(LayoutNode::max_extent)
            .fold(self.frame.bottom(), f32::max)
    }
}

/// A finished page of solved roots. Page indices are 1-based.
#[derive(Debug, Clone, Default)]
pub struct Page<'a> {
    pub index: usize,
    pub roots: Vec<LayoutNode<'a>>,
}

impl<'a> Page<'a> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            roots: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Lowest y-extent of any content on the page.
    pub fn max_extent(&self) -> f32 {
        self.roots
            .iter()
            .map(LayoutNode::max_extent)
            .fold(0.0f32, f32::max)
    }

    /// Flattens the solved tree into draw-order positioned primitives.
    /// Container nodes and page breaks contribute nothing themselves.
    pub fn flatten(&self, config: &LayoutConfig) -> Vec<PositionedElement> {
        let mut out = Vec::new();
        for root in &self.roots {
            flatten_into(root, config, &mut out);
        }
        out
    }
}

fn flatten_into<'a>(node: &LayoutNode<'a>, config: &LayoutConfig, out: &mut Vec<PositionedElement>) {
    if let Some(element) = primitive_for(node.node, &node.frame, config) {
        out.push(PositionedElement {
            x: node.frame.x,
            y: node.frame.y,
            width: node.frame.width,
            height: node.frame.height,
            element,
        });
    }
    for child in &node.children {
        flatten_into(child, config, out);
    }
}

fn primitive_for(node: &ContentNode, frame: &Rect, config: &LayoutConfig) -> Option<LayoutElement> {
    match node {
        ContentNode::Text(t) => {
            let family = t
                .font_family
                .clone()
                .unwrap_or_else(|| config.default_font_family.clone());
            let size = t.font_size.unwrap_or(config.default_font_size);
            Some(LayoutElement::Text {
                content: t.text.clone(),
                family,
                size,
                line_height: config.line_height(size, t.line_gap),
                color: t.color.unwrap_or(Color::BLACK),
            })
        }
        ContentNode::Heading(h) => {
            let family = h
                .font_family
                .clone()
                .unwrap_or_else(|| config.default_font_family.clone());
            let size = h.font_size.unwrap_or_else(|| config.heading_size(h.level));
            Some(LayoutElement::Text {
                content: h.text.clone(),
                family,
                size,
                line_height: config.line_height(size, h.line_gap),
                color: h.color.unwrap_or(Color::BLACK),
            })
        }
        ContentNode::Image(i) => Some(LayoutElement::Image {
            src: i.src.clone(),
        }),
        ContentNode::Rect(r) => Some(LayoutElement::Rect {
            color: r.color.unwrap_or(Color::BLACK),
        }),
        ContentNode::Circle(c) => Some(LayoutElement::Circle {
            radius: c.radius,
            color: c.color.unwrap_or(Color::BLACK),
        }),
        // Line endpoints are authored relative to the node origin and
        // emitted here in page coordinates.
        ContentNode::Line(l) => Some(LayoutElement::Line {
            x1: frame.x + l.x1,
            y1: frame.y + l.y1,
            x2: frame.x + l.x2,
            y2: frame.y + l.y2,
            thickness: l.thickness.unwrap_or(1.0),
            color: l.color.unwrap_or(Color::BLACK),
        }),
        // A divider is sugar for a full-width horizontal rule.
        ContentNode::Divider(d) => {
            let thickness = d.thickness.unwrap_or(1.0);
            let y = frame.y + thickness / 2.0;
            Some(LayoutElement::Line {
                x1: frame.x,
                y1: y,
                x2: frame.right(),
                y2: y,
                thickness,
                color: d.color.unwrap_or(Color::BLACK),
            })
        }
        ContentNode::Group(_) | ContentNode::PageBreak(_) => None,
    }
}

/// The full result of a layout run.
#[derive(Debug, Clone, Default)]
pub struct LayoutOutput<'a> {
    pub pages: Vec<Page<'a>>,
    pub warnings: Vec<LayoutWarning>,
}

impl<'a> LayoutOutput<'a> {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Non-fatal conditions surfaced alongside the solved pages.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// Content on a fixed-mode page extends past the physical page edge.
    PageOverflow { page: usize, extent: f32, limit: f32 },
    /// A single unbreakable unit is taller than a full empty page; it is
    /// placed anyway and will overflow.
    OversizedUnit {
        kind: &'static str,
        height: f32,
        usable: f32,
    },
    /// Flow content in fixed mode always lands on page 1, which is easy
    /// to misread as page-aware behavior once more pages exist.
    FlowContentOnFixedPage { pages: usize },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::PageOverflow { page, extent, limit } => write!(
                f,
                "content on page {page} extends to {extent:.1}pt, past the {limit:.1}pt page edge"
            ),
            LayoutWarning::OversizedUnit { kind, height, usable } => write!(
                f,
                "{kind} is {height:.1}pt tall but only {usable:.1}pt fits on an empty page"
            ),
            LayoutWarning::FlowContentOnFixedPage { pages } => write!(
                f,
                "flow content in fixed mode is placed on page 1 of {pages}"
            ),
        }
    }
}

/// One drawable primitive with its solved page-coordinate frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

/// What to draw inside a positioned frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text {
        content: String,
        family: String,
        size: f32,
        line_height: f32,
        color: Color,
    },
    Image {
        src: String,
    },
    Rect {
        color: Color,
    },
    Circle {
        radius: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{DividerNode, GroupNode, RectNode, TextNode};

    fn leaf(node: &ContentNode, frame: Rect) -> LayoutNode<'_> {
        LayoutNode {
            node,
            frame,
            children: Vec::new(),
        }
    }

    #[test]
    fn max_extent_reaches_into_children() {
        let rect = ContentNode::Rect(RectNode::default());
        let group = ContentNode::Group(GroupNode::default());
        let tree = LayoutNode {
            node: &group,
            frame: Rect::new(0.0, 10.0, 100.0, 50.0),
            children: vec![leaf(&rect, Rect::new(0.0, 40.0, 100.0, 80.0))],
        };
        assert_eq!(tree.max_extent(), 120.0);
    }

    #[test]
    fn groups_flatten_to_nothing_but_children_survive() {
        let rect = ContentNode::Rect(RectNode::default());
        let group = ContentNode::Group(GroupNode::default());
        let mut page = Page::new(1);
        page.roots.push(LayoutNode {
            node: &group,
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            children: vec![leaf(&rect, Rect::new(10.0, 20.0, 30.0, 40.0))],
        });
        let elements = page.flatten(&LayoutConfig::default());
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].x, 10.0);
        assert!(matches!(elements[0].element, LayoutElement::Rect { .. }));
    }

    #[test]
    fn divider_becomes_full_width_line() {
        let divider = ContentNode::Divider(DividerNode {
            thickness: Some(2.0),
            ..Default::default()
        });
        let mut page = Page::new(1);
        page.roots
            .push(leaf(&divider, Rect::new(36.0, 100.0, 500.0, 2.0)));
        let elements = page.flatten(&LayoutConfig::default());
        match &elements[0].element {
            LayoutElement::Line { x1, x2, y1, y2, thickness, .. } => {
                assert_eq!(*x1, 36.0);
                assert_eq!(*x2, 536.0);
                assert_eq!(*y1, 101.0);
                assert_eq!(*y1, *y2);
                assert_eq!(*thickness, 2.0);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn text_inherits_configured_defaults() {
        let text = ContentNode::Text(TextNode {
            text: "hi".into(),
            ..Default::default()
        });
        let mut page = Page::new(1);
        page.roots
            .push(leaf(&text, Rect::new(0.0, 0.0, 100.0, 14.0)));
        let config = LayoutConfig::default();
        let elements = page.flatten(&config);
        match &elements[0].element {
            LayoutElement::Text { family, size, line_height, .. } => {
                assert_eq!(family, "Helvetica");
                assert_eq!(*size, 12.0);
                assert!((line_height - 13.8).abs() < 1e-4);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }
}
