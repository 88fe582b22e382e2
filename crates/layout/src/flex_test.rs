//! Solver-level tests: one item tree in, solved frames out.

use crate::test_utils::{column, rect, rect_with, row, solve_node, test_config, text};
use folio_dom::{ContentNode, GroupNode, NodeCommon, PositionMode, RectNode};
use folio_style::{Dimension, JustifyContent, Margins};

#[test]
fn column_stacks_children_with_gap() {
    let config = test_config();
    let group = column(10.0, vec![rect(40.0, 40.0), rect(40.0, 30.0)]);
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.frame.height, 80.0);
    assert_eq!(solved.root.children.len(), 2);
    assert_eq!(solved.root.children[0].frame.y, 0.0);
    assert_eq!(solved.root.children[1].frame.y, 50.0);
}

#[test]
fn row_height_is_tallest_child() {
    let config = test_config();
    let group = row(0.0, vec![rect(40.0, 25.0), rect(40.0, 60.0)]);
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.frame.height, 60.0);
    assert_eq!(solved.root.children[1].frame.x, 40.0);
}

#[test]
fn grow_splits_leftover_space() {
    let config = test_config();
    let grower = |height: f32| {
        rect_with(
            10.0,
            height,
            NodeCommon {
                grow: Some(1.0),
                ..Default::default()
            },
        )
    };
    let group = row(0.0, vec![grower(20.0), grower(20.0)]);
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.children[0].frame.width, 150.0);
    assert_eq!(solved.root.children[1].frame.width, 150.0);
    assert_eq!(solved.root.children[1].frame.x, 150.0);
}

#[test]
fn percent_width_resolves_against_container() {
    let config = test_config();
    let child = ContentNode::Rect(RectNode {
        common: NodeCommon {
            width: Some(Dimension::Percent(50.0)),
            height: Some(Dimension::Pt(20.0)),
            ..Default::default()
        },
        ..Default::default()
    });
    let group = column(0.0, vec![child]);
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.children[0].frame.width, 150.0);
}

#[test]
fn text_fills_width_and_wraps() {
    let config = test_config();
    // 6pt per char at the default 12pt size: "aaaa" is 24pt, spaces 6pt,
    // so at 60pt two words fit per line
    let node = text("aaaa aaaa aaaa");
    let solved = solve_node(&node, &config, 60.0).unwrap();

    assert_eq!(solved.root.frame.width, 60.0);
    assert!((solved.root.frame.height - 2.0 * 13.8).abs() < 1e-3);
}

#[test]
fn justify_space_between_pushes_to_edges() {
    let config = test_config();
    let group = ContentNode::Group(GroupNode {
        direction: folio_style::FlexDirection::Row,
        justify: JustifyContent::SpaceBetween,
        children: vec![rect(50.0, 20.0), rect(50.0, 20.0)],
        ..Default::default()
    });
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.children[0].frame.x, 0.0);
    assert_eq!(solved.root.children[1].frame.x, 250.0);
}

#[test]
fn padding_insets_children() {
    let config = test_config();
    let group = ContentNode::Group(GroupNode {
        padding: Some(Margins::all(10.0)),
        children: vec![rect(40.0, 30.0)],
        ..Default::default()
    });
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.children[0].frame.x, 10.0);
    assert_eq!(solved.root.children[0].frame.y, 10.0);
    assert_eq!(solved.root.frame.height, 50.0);
}

#[test]
fn offset_child_keeps_its_flow_slot() {
    let config = test_config();
    let shifted = rect_with(
        40.0,
        30.0,
        NodeCommon {
            position: Some(PositionMode::Absolute),
            left: Some(6.0),
            top: Some(4.0),
            ..Default::default()
        },
    );
    let group = column(0.0, vec![rect(40.0, 20.0), shifted, rect(40.0, 10.0)]);
    let solved = solve_node(&group, &config, 300.0).unwrap();

    // The offset child sits at its flow position plus the offset, and the
    // sibling after it is laid out as if the offset never happened.
    assert_eq!(solved.root.children[1].frame.x, 6.0);
    assert_eq!(solved.root.children[1].frame.y, 24.0);
    assert_eq!(solved.root.children[2].frame.y, 50.0);
}

#[test]
fn root_offset_is_the_callers_business() {
    // The scheduler folds a root item's declared offset into the solve
    // origin; extraction must not add it again.
    let config = test_config();
    let node = rect_with(
        40.0,
        40.0,
        NodeCommon {
            position: Some(PositionMode::Absolute),
            left: Some(200.0),
            top: Some(10.0),
            ..Default::default()
        },
    );
    let solved = solve_node(&node, &config, 300.0).unwrap();
    assert_eq!(solved.root.frame.x, 0.0);
    assert_eq!(solved.root.frame.y, 0.0);
}

#[test]
fn page_pinned_child_leaves_the_flow() {
    let config = test_config();
    let pinned = rect_with(
        40.0,
        30.0,
        NodeCommon {
            page: Some(3),
            left: Some(100.0),
            top: Some(100.0),
            ..Default::default()
        },
    );
    let group = column(0.0, vec![rect(40.0, 20.0), pinned]);
    let solved = solve_node(&group, &config, 300.0).unwrap();

    assert_eq!(solved.root.children.len(), 1);
    assert_eq!(solved.root.frame.height, 20.0);
    assert_eq!(solved.pinned.len(), 1);
    assert_eq!(solved.pinned[0].common().page, Some(3));
}

#[test]
fn remote_image_error_escapes_the_solver() {
    let config = test_config();
    let group = column(
        0.0,
        vec![ContentNode::Image(folio_dom::ImageNode {
            src: "https://example.com/a.png".into(),
            ..Default::default()
        })],
    );
    let err = solve_node(&group, &config, 300.0).unwrap_err();
    assert!(matches!(err, crate::LayoutError::UnmeasurableImage { .. }));
}
