//! Bridge between the content tree and the taffy flex solver.
//!
//! Each layout item gets its own short-lived [`TaffyTree`]; the tree and
//! every node in it are released when the solve returns, on the error
//! paths included. Leaf sizing goes through the measure closure, so leaf
//! heights here and the pagination pass both come from the same
//! [`Measurer`].

use taffy::prelude::*;
use taffy::style::{AvailableSpace, LengthPercentage};

use crate::measure::Measurer;
use crate::output::LayoutNode;
use crate::LayoutError;
use folio_dom::{ContentNode, GroupNode, Placement};
use folio_style::{AlignItems, AlignSelf, Dimension, FlexDirection, JustifyContent, Margins};
use folio_types::Rect;

/// A solved item plus any page-pinned descendants that were lifted out of
/// the flow. Pinned nodes are solved separately against their target page.
#[derive(Debug)]
pub struct Solved<'a> {
    pub root: LayoutNode<'a>,
    pub pinned: Vec<&'a ContentNode>,
}

/// Solves one item tree at `origin` against `width` points of horizontal
/// space. The item's own placement has already been decided by the caller;
/// only descendants are inspected for nested placements.
pub fn solve<'a>(
    node: &'a ContentNode,
    measurer: &Measurer<'_>,
    origin_x: f32,
    origin_y: f32,
    width: f32,
) -> Result<Solved<'a>, LayoutError> {
    let mut solver = Solver::new(measurer);
    let built = solver.build(node, None, width)?;
    solver.compute(built.id, width)?;
    let root = solver.extract_root(&built, origin_x, origin_y)?;
    Ok(Solved {
        root,
        pinned: solver.pinned,
    })
}

fn tf(e: taffy::TaffyError) -> LayoutError {
    LayoutError::Solver(format!("{e:?}"))
}

struct Built<'a> {
    id: NodeId,
    node: &'a ContentNode,
    children: Vec<Built<'a>>,
}

struct Solver<'a, 'm> {
    taffy: TaffyTree<usize>,
    leaves: Vec<&'a ContentNode>,
    pinned: Vec<&'a ContentNode>,
    measurer: &'m Measurer<'m>,
}

impl<'a, 'm> Solver<'a, 'm> {
    fn new(measurer: &'m Measurer<'m>) -> Self {
        let mut taffy = TaffyTree::new();
        // Whole-point snapping would make solved heights disagree with
        // the fractional heights the pagination pass reserved.
        taffy.disable_rounding();
        Self {
            taffy,
            leaves: Vec::new(),
            pinned: Vec::new(),
            measurer,
        }
    }

    /// Recursively mirrors the content tree into taffy nodes.
    ///
    /// `parent_direction` is `None` for the item root, whose width comes
    /// from the caller rather than a flex parent.
    fn build(
        &mut self,
        node: &'a ContentNode,
        parent_direction: Option<FlexDirection>,
        root_width: f32,
    ) -> Result<Built<'a>, LayoutError> {
        let style = node_style(node, parent_direction, root_width);

        if let ContentNode::Group(g) = node {
            let mut children = Vec::with_capacity(g.children.len());
            for child in &g.children {
                // Page-pinned descendants leave the flow entirely; manual
                // breaks only mean something to the pagination pass.
                if matches!(child.placement()?, Placement::AbsolutePage { .. }) {
                    self.pinned.push(child);
                    continue;
                }
                if child.is_page_break() {
                    continue;
                }
                children.push(self.build(child, Some(g.direction), root_width)?);
            }
            let ids: Vec<NodeId> = children.iter().map(|c| c.id).collect();
            let id = self.taffy.new_with_children(style, &ids).map_err(tf)?;
            Ok(Built { id, node, children })
        } else {
            let index = self.leaves.len();
            self.leaves.push(node);
            let id = self
                .taffy
                .new_leaf_with_context(style, index)
                .map_err(tf)?;
            Ok(Built {
                id,
                node,
                children: Vec::new(),
            })
        }
    }

    fn compute(&mut self, root: NodeId, width: f32) -> Result<(), LayoutError> {
        let Solver {
            taffy,
            leaves,
            measurer,
            ..
        } = self;

        let available_space = taffy::geometry::Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        };

        // Capture measurement errors to propagate out of the closure
        let mut measure_error = None;

        taffy
            .compute_layout_with_measure(
                root,
                available_space,
                |known_dims, available_space, _node_id, context, _style| {
                    if measure_error.is_some() {
                        return taffy::geometry::Size::ZERO;
                    }
                    let Some(index) = context else {
                        return taffy::geometry::Size::ZERO;
                    };
                    let node = leaves[*index];

                    let width = known_dims.width.unwrap_or_else(|| match available_space.width {
                        AvailableSpace::Definite(w) => measurer.natural_width(node, w).min(w),
                        AvailableSpace::MaxContent => {
                            measurer.natural_width(node, f32::INFINITY)
                        }
                        AvailableSpace::MinContent => measurer.min_content_width(node),
                    });

                    match measurer.measure(node, width) {
                        Ok(height) => taffy::geometry::Size {
                            width,
                            height: known_dims.height.unwrap_or(height),
                        },
                        Err(e) => {
                            measure_error = Some(e);
                            taffy::geometry::Size::ZERO
                        }
                    }
                },
            )
            .map_err(tf)?;

        match measure_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Reads the root's solved frame out at the caller-chosen origin. The
    /// root's own placement was already folded into that origin, so only
    /// descendants get their declared offsets applied.
    fn extract_root(
        &self,
        built: &Built<'a>,
        origin_x: f32,
        origin_y: f32,
    ) -> Result<LayoutNode<'a>, LayoutError> {
        let layout = self.taffy.layout(built.id).map_err(tf)?;
        let frame = Rect::new(origin_x, origin_y, layout.size.width, layout.size.height);
        let children = built
            .children
            .iter()
            .map(|child| self.extract(child, origin_x, origin_y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LayoutNode {
            node: built.node,
            frame,
            children,
        })
    }

    /// Reads solved frames back out, composing page coordinates from the
    /// parent frame. Offset-placed nodes keep their flow slot and shift by
    /// their declared offset here, subtree included.
    fn extract(
        &self,
        built: &Built<'a>,
        parent_x: f32,
        parent_y: f32,
    ) -> Result<LayoutNode<'a>, LayoutError> {
        let layout = self.taffy.layout(built.id).map_err(tf)?;
        let mut x = parent_x + layout.location.x;
        let mut y = parent_y + layout.location.y;
        if let Placement::AbsoluteOffset { left, top } = built.node.placement()? {
            x += left;
            y += top;
        }
        let frame = Rect::new(x, y, layout.size.width, layout.size.height);
        let children = built
            .children
            .iter()
            .map(|child| self.extract(child, x, y))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LayoutNode {
            node: built.node,
            frame,
            children,
        })
    }
}

/// Content kinds that fill their container's width when none is declared.
fn fills_width(node: &ContentNode) -> bool {
    matches!(
        node,
        ContentNode::Text(_)
            | ContentNode::Heading(_)
            | ContentNode::Group(_)
            | ContentNode::Divider(_)
    )
}

fn node_style(
    node: &ContentNode,
    parent_direction: Option<FlexDirection>,
    root_width: f32,
) -> taffy::style::Style {
    let common = node.common();

    let width = match common.width {
        Some(d) => dimension_to_taffy(d),
        // In a column (and at the root), block-like content spans the
        // full available width; in a row it shrinks to its content.
        None if fills_width(node) && parent_direction != Some(FlexDirection::Row) => {
            match parent_direction {
                None => taffy::style::Dimension::length(root_width),
                Some(_) => taffy::style::Dimension::percent(1.0),
            }
        }
        None => taffy::style::Dimension::auto(),
    };
    let height = match common.height {
        Some(d) => dimension_to_taffy(d),
        None => taffy::style::Dimension::auto(),
    };

    let mut style = taffy::style::Style {
        display: taffy::style::Display::Flex,
        box_sizing: taffy::style::BoxSizing::BorderBox,
        size: taffy::geometry::Size { width, height },
        flex_grow: common.grow.unwrap_or(0.0),
        flex_shrink: 1.0,
        align_self: align_self_to_taffy(common.align_self.unwrap_or_default()),
        ..Default::default()
    };

    if let ContentNode::Group(g) = node {
        apply_group_style(&mut style, g);
    }

    style
}

fn apply_group_style(style: &mut taffy::style::Style, g: &GroupNode) {
    style.flex_direction = direction_to_taffy(g.direction);
    style.justify_content = justify_to_taffy(g.justify);
    style.align_items = align_items_to_taffy(g.align_items);
    style.padding = padding_to_taffy(&g.padding());
    style.gap = match g.direction {
        FlexDirection::Row => taffy::geometry::Size {
            width: LengthPercentage::length(g.gap),
            height: LengthPercentage::length(0.0),
        },
        FlexDirection::Column => taffy::geometry::Size {
            width: LengthPercentage::length(0.0),
            height: LengthPercentage::length(g.gap),
        },
    };
}

fn dimension_to_taffy(d: Dimension) -> taffy::style::Dimension {
    match d {
        Dimension::Pt(v) => taffy::style::Dimension::length(v),
        Dimension::Percent(p) => taffy::style::Dimension::percent(p / 100.0),
        Dimension::Auto => taffy::style::Dimension::auto(),
    }
}

fn padding_to_taffy(m: &Margins) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        left: LengthPercentage::length(m.left),
        right: LengthPercentage::length(m.right),
        top: LengthPercentage::length(m.top),
        bottom: LengthPercentage::length(m.bottom),
    }
}

fn direction_to_taffy(d: FlexDirection) -> taffy::style::FlexDirection {
    match d {
        FlexDirection::Row => taffy::style::FlexDirection::Row,
        FlexDirection::Column => taffy::style::FlexDirection::Column,
    }
}

fn justify_to_taffy(j: JustifyContent) -> Option<taffy::style::JustifyContent> {
    match j {
        JustifyContent::Start => Some(taffy::style::JustifyContent::FlexStart),
        JustifyContent::Center => Some(taffy::style::JustifyContent::Center),
        JustifyContent::End => Some(taffy::style::JustifyContent::FlexEnd),
        JustifyContent::SpaceBetween => Some(taffy::style::JustifyContent::SpaceBetween),
        JustifyContent::SpaceAround => Some(taffy::style::JustifyContent::SpaceAround),
    }
}

fn align_items_to_taffy(a: AlignItems) -> Option<taffy::style::AlignItems> {
    match a {
        AlignItems::Stretch => Some(taffy::style::AlignItems::Stretch),
        AlignItems::Start => Some(taffy::style::AlignItems::FlexStart),
        AlignItems::Center => Some(taffy::style::AlignItems::Center),
        AlignItems::End => Some(taffy::style::AlignItems::FlexEnd),
    }
}

fn align_self_to_taffy(a: AlignSelf) -> Option<taffy::style::AlignSelf> {
    match a {
        AlignSelf::Auto => None,
        AlignSelf::Stretch => Some(taffy::style::AlignSelf::Stretch),
        AlignSelf::Start => Some(taffy::style::AlignSelf::FlexStart),
        AlignSelf::Center => Some(taffy::style::AlignSelf::Center),
        AlignSelf::End => Some(taffy::style::AlignSelf::FlexEnd),
    }
}
