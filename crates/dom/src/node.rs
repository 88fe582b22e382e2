use folio_style::{AlignItems, AlignSelf, Dimension, FlexDirection, JustifyContent, Margins};
use folio_types::Color;
use serde::{Deserialize, Serialize};

/// A single piece of declared document content.
///
/// Externally tagged on `type`, so a JSON document reads as
/// `{ "type": "text", "text": "...", "width": "50%" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentNode {
    Text(TextNode),
    Heading(HeadingNode),
    Image(ImageNode),
    Rect(RectNode),
    Circle(CircleNode),
    Line(LineNode),
    Divider(DividerNode),
    Group(GroupNode),
    PageBreak(PageBreakNode),
}

impl ContentNode {
    pub fn common(&self) -> &NodeCommon {
        match self {
            ContentNode::Text(n) => &n.common,
            ContentNode::Heading(n) => &n.common,
            ContentNode::Image(n) => &n.common,
            ContentNode::Rect(n) => &n.common,
            ContentNode::Circle(n) => &n.common,
            ContentNode::Line(n) => &n.common,
            ContentNode::Divider(n) => &n.common,
            ContentNode::Group(n) => &n.common,
            ContentNode::PageBreak(n) => &n.common,
        }
    }

    /// String identifier for the node type, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentNode::Text(_) => "text",
            ContentNode::Heading(_) => "heading",
            ContentNode::Image(_) => "image",
            ContentNode::Rect(_) => "rect",
            ContentNode::Circle(_) => "circle",
            ContentNode::Line(_) => "line",
            ContentNode::Divider(_) => "divider",
            ContentNode::Group(_) => "group",
            ContentNode::PageBreak(_) => "page-break",
        }
    }

    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Group(g) => &g.children,
            _ => &[],
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ContentNode::Group(_))
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self, ContentNode::PageBreak(_))
    }
}

/// Fields shared by every node kind: identity, declared placement, sizing
/// and flex-item attributes.
///
/// `position`, `left`, `top` and `page` are the raw author declarations;
/// they resolve into a [`crate::Placement`] at the layout boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeCommon {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    /// Target page index for absolutely placed content (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    /// Flex grow factor when this node sits inside a group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grow: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
}

/// The author-declared positioning mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    Relative,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Extra space between lines, in points. When absent the measurer
    /// applies its default line-height factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

fn default_level() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    pub text: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_gap: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    pub src: String,
    /// Intrinsic pixel dimensions, populated upstream by the image loader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_height: Option<f32>,
}

impl ImageNode {
    /// Whether the source is fetched over the network rather than local.
    pub fn is_remote(&self) -> bool {
        self.src.starts_with("http://") || self.src.starts_with("https://")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    pub radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// A horizontal rule spanning its container's width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupNode {
    #[serde(flatten)]
    pub common: NodeCommon,
    pub direction: FlexDirection,
    pub gap: f32,
    pub justify: JustifyContent,
    pub align_items: AlignItems,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Margins>,
    /// When unset, groups keep their children together on one page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_together: Option<bool>,
    pub children: Vec<ContentNode>,
}

impl GroupNode {
    pub fn keeps_together(&self) -> bool {
        self.keep_together.unwrap_or(true)
    }

    pub fn padding(&self) -> Margins {
        self.padding.unwrap_or_default()
    }
}

/// A manual break: everything after it starts on a fresh page in flow mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageBreakNode {
    #[serde(flatten)]
    pub common: NodeCommon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_tagged_nodes() {
        let node: ContentNode = serde_json::from_value(json!({
            "type": "text",
            "text": "hello",
            "fontSize": 14,
            "width": "50%"
        }))
        .unwrap();
        let ContentNode::Text(t) = &node else {
            panic!("expected text node, got {}", node.kind());
        };
        assert_eq!(t.text, "hello");
        assert_eq!(t.font_size, Some(14.0));
        assert_eq!(t.common.width, Some(Dimension::Percent(50.0)));
    }

    #[test]
    fn group_defaults() {
        let node: ContentNode = serde_json::from_value(json!({
            "type": "group",
            "children": [{ "type": "divider" }]
        }))
        .unwrap();
        let ContentNode::Group(g) = &node else {
            panic!("expected group");
        };
        assert_eq!(g.direction, FlexDirection::Column);
        assert_eq!(g.gap, 0.0);
        assert!(g.keeps_together());
        assert_eq!(g.children.len(), 1);
    }

    #[test]
    fn heading_level_defaults_to_one() {
        let node: ContentNode =
            serde_json::from_value(json!({ "type": "heading", "text": "Title" })).unwrap();
        let ContentNode::Heading(h) = &node else {
            panic!("expected heading");
        };
        assert_eq!(h.level, 1);
    }

    #[test]
    fn remote_image_detection() {
        let img = ImageNode {
            src: "https://example.com/a.png".into(),
            ..Default::default()
        };
        assert!(img.is_remote());
        let img = ImageNode {
            src: "assets/a.png".into(),
            ..Default::default()
        };
        assert!(!img.is_remote());
    }
}
