//! Shared helpers for in-crate layout tests.

use crate::config::LayoutConfig;
use crate::fonts::ScaledMetrics;
use crate::measure::Measurer;
use crate::output::LayoutOutput;
use crate::LayoutError;
use folio_dom::{ContentNode, GroupNode, NodeCommon, RectNode, TextNode};
use folio_style::{Dimension, Margins, PageSize};

/// A 400x500 page with 50pt margins: 300pt of content width and 400pt of
/// usable height, so fit arithmetic in tests stays round.
pub fn test_config() -> LayoutConfig {
    LayoutConfig {
        page_size: PageSize::Custom {
            width: 400.0,
            height: 500.0,
        },
        margins: Margins::all(50.0),
        ..Default::default()
    }
}

pub fn paginate_nodes<'a>(
    nodes: &'a [ContentNode],
    config: &LayoutConfig,
) -> Result<LayoutOutput<'a>, LayoutError> {
    crate::paginate(nodes, &ScaledMetrics::default(), config)
}

pub fn solve_node<'a>(
    node: &'a ContentNode,
    config: &LayoutConfig,
    width: f32,
) -> Result<crate::flex::Solved<'a>, LayoutError> {
    let metrics = ScaledMetrics::default();
    let measurer = Measurer::new(&metrics, config);
    crate::flex::solve(node, &measurer, 0.0, 0.0, width)
}

pub fn rect(width: f32, height: f32) -> ContentNode {
    ContentNode::Rect(RectNode {
        common: NodeCommon {
            width: Some(Dimension::Pt(width)),
            height: Some(Dimension::Pt(height)),
            ..Default::default()
        },
        ..Default::default()
    })
}

pub fn rect_with(width: f32, height: f32, common: NodeCommon) -> ContentNode {
    ContentNode::Rect(RectNode {
        common: NodeCommon {
            width: Some(Dimension::Pt(width)),
            height: Some(Dimension::Pt(height)),
            ..common
        },
        ..Default::default()
    })
}

pub fn text(content: &str) -> ContentNode {
    ContentNode::Text(TextNode {
        text: content.into(),
        ..Default::default()
    })
}

pub fn column(gap: f32, children: Vec<ContentNode>) -> ContentNode {
    ContentNode::Group(GroupNode {
        gap,
        children,
        ..Default::default()
    })
}

pub fn row(gap: f32, children: Vec<ContentNode>) -> ContentNode {
    ContentNode::Group(GroupNode {
        direction: folio_style::FlexDirection::Row,
        gap,
        children,
        ..Default::default()
    })
}
