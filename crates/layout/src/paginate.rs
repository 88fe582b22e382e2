//! The pagination scheduler: walks root content in order and assigns
//! solved items to pages.
//!
//! Flow mode advances a monotonic page cursor and breaks automatically
//! when an item will not fit; fixed mode buckets content by declared page
//! index and never breaks.

use itertools::Itertools;

use crate::config::{LayoutConfig, LayoutMode, OverflowPolicy};
use crate::cursor::{PageCursor, SpaceOutcome};
use crate::flex;
use crate::measure::Measurer;
use crate::output::{LayoutOutput, LayoutWarning, Page};
use crate::LayoutError;
use folio_dom::{ContentNode, Placement};
use folio_traits::FontMetrics;

/// Lays out a whole document tree into pages.
///
/// Placement conflicts are rejected up front, before any page exists, so
/// a failed run never yields partial output.
pub fn paginate<'a>(
    nodes: &'a [ContentNode],
    metrics: &dyn FontMetrics,
    config: &LayoutConfig,
) -> Result<LayoutOutput<'a>, LayoutError> {
    folio_dom::validate(nodes)?;
    let measurer = Measurer::new(metrics, config);
    let mut output = match config.mode {
        LayoutMode::Flow => flow(nodes, &measurer, config)?,
        LayoutMode::Fixed => fixed(nodes, &measurer, config)?,
    };
    if config.overflow == OverflowPolicy::Warn {
        scan_overflow(&mut output, config);
    }
    Ok(output)
}

fn flow<'a>(
    nodes: &'a [ContentNode],
    measurer: &Measurer<'_>,
    config: &LayoutConfig,
) -> Result<LayoutOutput<'a>, LayoutError> {
    let mut output = LayoutOutput::default();
    let mut cursor = PageCursor::new(config);
    let mut current = 1usize;
    let mut pinned: Vec<&'a ContentNode> = Vec::new();
    let width = config.content_width();

    for item in flow_items(nodes) {
        match item.placement()? {
            Placement::AbsolutePage { .. } => pinned.push(item),
            Placement::AbsoluteOffset { left, top } => {
                // Anchored to the current flow position but consumes no
                // flow space.
                let solved = flex::solve(
                    item,
                    measurer,
                    config.margins.left + left,
                    cursor.y() + top,
                    width,
                )?;
                page_mut(&mut output.pages, current).roots.push(solved.root);
                pinned.extend(solved.pinned);
            }
            Placement::Flowing => {
                if item.is_page_break() {
                    if !cursor.at_top() {
                        log::debug!("manual break after page {current}");
                        current += 1;
                        cursor = PageCursor::new(config);
                    }
                    // The break itself still materializes the page it ends.
                    page_mut(&mut output.pages, current);
                    continue;
                }

                let height = measurer.measure(item, width)?;
                if height > cursor.usable_height() + config.epsilon {
                    output.warnings.push(LayoutWarning::OversizedUnit {
                        kind: item.kind(),
                        height,
                        usable: cursor.usable_height(),
                    });
                }
                if cursor.ensure_space(height) == SpaceOutcome::Broke {
                    log::debug!(
                        "auto break after page {current}: {} needs {height:.1}pt",
                        item.kind()
                    );
                    current += 1;
                }
                let solved =
                    flex::solve(item, measurer, config.margins.left, cursor.y(), width)?;
                let consumed = solved.root.frame.height;
                page_mut(&mut output.pages, current).roots.push(solved.root);
                pinned.extend(solved.pinned);
                cursor.advance(consumed);
            }
        }
    }

    // At least one page exists even for an empty document.
    page_mut(&mut output.pages, current.max(1));

    place_pinned(pinned, measurer, config, &mut output)?;
    Ok(output)
}

/// Root iteration order for flow mode. A column group that opted out of
/// keep-together and carries no styling of its own is transparent: its
/// children flow as if declared at the root, so each can break
/// independently.
fn flow_items(nodes: &[ContentNode]) -> Vec<&ContentNode> {
    let mut items = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            ContentNode::Group(g) if is_transparent(node, g) => {
                items.extend(flow_items(&g.children));
            }
            _ => items.push(node),
        }
    }
    items
}

fn is_transparent(node: &ContentNode, g: &folio_dom::GroupNode) -> bool {
    let c = node.common();
    !g.keeps_together()
        && g.direction == folio_style::FlexDirection::Column
        && g.gap == 0.0
        && g.padding.is_none()
        && g.justify == folio_style::JustifyContent::Start
        && g.align_items == folio_style::AlignItems::Stretch
        && c.width.is_none()
        && c.height.is_none()
        && c.position.is_none()
        && c.left.is_none()
        && c.top.is_none()
        && c.page.is_none()
}

fn fixed<'a>(
    nodes: &'a [ContentNode],
    measurer: &Measurer<'_>,
    config: &LayoutConfig,
) -> Result<LayoutOutput<'a>, LayoutError> {
    let mut output = LayoutOutput::default();
    let width = config.content_width();

    let pairs = nodes
        .iter()
        .map(|node| {
            node.placement().map(|p| match p {
                Placement::AbsolutePage { page, .. } => (page, node),
                _ => (1, node),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let buckets = pairs.into_iter().into_group_map();

    let page_count = buckets.keys().copied().max().unwrap_or(1).max(1);
    for index in 1..=page_count {
        page_mut(&mut output.pages, index);
    }

    let flow_count = nodes
        .iter()
        .filter(|n| {
            !n.is_page_break() && !matches!(n.placement(), Ok(Placement::AbsolutePage { .. }))
        })
        .count();
    if flow_count > 0 && page_count > 1 {
        output
            .warnings
            .push(LayoutWarning::FlowContentOnFixedPage { pages: page_count });
    }

    let mut pinned: Vec<&'a ContentNode> = Vec::new();
    for (index, items) in buckets.into_iter().sorted_by_key(|(index, _)| *index) {
        // Declaration order within a page is preserved; the cursor never
        // breaks in fixed mode, content past the bottom simply overflows.
        let mut cursor = PageCursor::new(config);
        for item in items {
            if item.is_page_break() {
                log::debug!("ignoring page break in fixed mode");
                continue;
            }
            let solved = match item.placement()? {
                Placement::AbsolutePage { left, top, .. } => {
                    let item_width = absolute_width(item, measurer, width);
                    flex::solve(item, measurer, left, top, item_width)?
                }
                Placement::AbsoluteOffset { left, top } => flex::solve(
                    item,
                    measurer,
                    config.margins.left + left,
                    cursor.y() + top,
                    width,
                )?,
                Placement::Flowing => {
                    let solved =
                        flex::solve(item, measurer, config.margins.left, cursor.y(), width)?;
                    cursor.advance(solved.root.frame.height);
                    solved
                }
            };
            page_mut(&mut output.pages, index).roots.push(solved.root);
            pinned.extend(solved.pinned);
        }
    }

    place_pinned(pinned, measurer, config, &mut output)?;
    Ok(output)
}

/// Solves page-pinned nodes lifted out of group flows and attaches each to
/// its target page, materializing pages as needed. Pinned nodes may
/// themselves contain further pinned descendants.
fn place_pinned<'a>(
    pending: Vec<&'a ContentNode>,
    measurer: &Measurer<'_>,
    config: &LayoutConfig,
    output: &mut LayoutOutput<'a>,
) -> Result<(), LayoutError> {
    let width = config.content_width();
    let mut pending: std::collections::VecDeque<_> = pending.into();
    while let Some(node) = pending.pop_front() {
        let Placement::AbsolutePage { page, left, top } = node.placement()? else {
            continue;
        };
        let item_width = absolute_width(node, measurer, width);
        let solved = flex::solve(node, measurer, left, top, item_width)?;
        page_mut(&mut output.pages, page).roots.push(solved.root);
        pending.extend(solved.pinned);
    }
    Ok(())
}

/// Width basis for a page-pinned item: its declared width resolved
/// against the content width, or its natural width when undeclared.
fn absolute_width(node: &ContentNode, measurer: &Measurer<'_>, content_width: f32) -> f32 {
    node.common()
        .width
        .and_then(|d| d.resolve(content_width))
        .unwrap_or_else(|| measurer.natural_width(node, content_width).min(content_width))
}

/// Returns the 1-based page, growing the page list to reach it.
fn page_mut<'a, 'n>(pages: &'a mut Vec<Page<'n>>, index: usize) -> &'a mut Page<'n> {
    while pages.len() < index {
        pages.push(Page::new(pages.len() + 1));
    }
    &mut pages[index - 1]
}

fn scan_overflow(output: &mut LayoutOutput<'_>, config: &LayoutConfig) {
    let (_, page_height) = config.page_dimensions();
    for page in &output.pages {
        let extent = page.max_extent();
        if extent > page_height + config.epsilon {
            log::warn!(
                "page {} overflows: content reaches {extent:.1}pt of {page_height:.1}pt",
                page.index
            );
            output.warnings.push(LayoutWarning::PageOverflow {
                page: page.index,
                extent,
                limit: page_height,
            });
        }
    }
}
