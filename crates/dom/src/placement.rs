//! Resolution of raw author positioning fields into a single tagged
//! placement, and the boundary validation that rejects conflicting
//! declarations before layout begins.

use crate::{ContentNode, PositionMode};
use thiserror::Error;

/// Where a node lands, resolved from its raw `position`/`left`/`top`/`page`
/// declarations.
///
/// The offset/page distinction matters for nested absolute nodes: an
/// `AbsoluteOffset` shifts with the flow position it would otherwise have
/// had, while an `AbsolutePage` is pinned to page coordinates and ignores
/// siblings entirely.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    #[default]
    Flowing,
    AbsoluteOffset {
        left: f32,
        top: f32,
    },
    AbsolutePage {
        page: usize,
        left: f32,
        top: f32,
    },
}

impl Placement {
    pub fn is_absolute(&self) -> bool {
        !matches!(self, Placement::Flowing)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("{kind} node{id} declares position 'relative' but also sets {fields}")]
    Conflict {
        kind: &'static str,
        id: String,
        fields: String,
    },
}

impl ContentNode {
    /// Resolves the declared placement of this node.
    ///
    /// Rules:
    /// - explicit `position: "absolute"`, or any of `left`/`top`/`page`
    ///   set, makes the node absolute;
    /// - an absolute node with a `page` is pinned to page coordinates,
    ///   without one it is an offset from its flow position;
    /// - explicit `position: "relative"` combined with any absolute field
    ///   is a conflict and is rejected with the offending field names.
    pub fn placement(&self) -> Result<Placement, PlacementError> {
        let c = self.common();
        let absolute_fields = [
            ("left", c.left.is_some()),
            ("top", c.top.is_some()),
            ("page", c.page.is_some()),
        ];
        let declared: Vec<&str> = absolute_fields
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect();

        match c.position {
            Some(PositionMode::Relative) if !declared.is_empty() => {
                Err(PlacementError::Conflict {
                    kind: self.kind(),
                    id: c
                        .id
                        .as_ref()
                        .map(|id| format!(" '{}'", id))
                        .unwrap_or_default(),
                    fields: declared.join(", "),
                })
            }
            Some(PositionMode::Relative) => Ok(Placement::Flowing),
            Some(PositionMode::Absolute) => Ok(resolve_absolute(c)),
            None if declared.is_empty() => Ok(Placement::Flowing),
            None => Ok(resolve_absolute(c)),
        }
    }
}

fn resolve_absolute(c: &crate::NodeCommon) -> Placement {
    let left = c.left.unwrap_or(0.0);
    let top = c.top.unwrap_or(0.0);
    match c.page {
        Some(page) => Placement::AbsolutePage {
            page: page.max(1),
            left,
            top,
        },
        None => Placement::AbsoluteOffset { left, top },
    }
}

/// Validates a whole content tree, rejecting any conflicting positioning
/// declaration before layout starts.
pub fn validate(nodes: &[ContentNode]) -> Result<(), PlacementError> {
    for node in nodes {
        node.placement()?;
        validate(node.children())?;
    }
    Ok(())
}
