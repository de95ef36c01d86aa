//! Taffy Bridge - Concrete frames from computed layout items.
//!
//! The registry computes offsets; this turns them into rectangles for a given
//! content rectangle. The Taffy tree mirrors the style records:
//!
//! ```text
//! root (flex, sized to the content rect)
//! ├── region nodes   position: absolute, inset from the item offsets
//! └── main node      in flow, padded by MainStyles
//! ```
//!
//! Inactive regions are laid out in place and then slid off by the hidden
//! translate, the same way the style records describe them.

use taffy::{
    AvailableSpace, Dimension, Display, LengthPercentage, LengthPercentageAuto, NodeId,
    Position as TaffyPosition, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::error::{LayoutError, Result};
use crate::style::{MainStyles, Translate};
use crate::types::{Axis, ContentRect, Position, Rect};

use super::types::{Frame, FrameRegion, ResolvedRegion};

fn frame_error(err: impl std::fmt::Display) -> LayoutError {
    LayoutError::Frame(err.to_string())
}

fn inset(value: f64) -> LengthPercentageAuto {
    LengthPercentageAuto::Length(value as f32)
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Absolutely-positioned style for one region.
///
/// The pinned edge and the two cross edges are inset; the thickness is fixed.
fn region_style(region: &FrameRegion) -> Style {
    let item = &region.item;
    let thickness = Dimension::Length(region.thickness() as f32);
    let auto = LengthPercentageAuto::Auto;

    let (inset_rect, size) = match region.position {
        Position::Top => (
            TaffyRect {
                top: inset(item.top),
                right: inset(item.right),
                bottom: auto,
                left: inset(item.left),
            },
            Size { width: Dimension::Auto, height: thickness },
        ),
        Position::Bottom => (
            TaffyRect {
                top: auto,
                right: inset(item.right),
                bottom: inset(item.bottom),
                left: inset(item.left),
            },
            Size { width: Dimension::Auto, height: thickness },
        ),
        Position::Left => (
            TaffyRect {
                top: inset(item.top),
                right: auto,
                bottom: inset(item.bottom),
                left: inset(item.left),
            },
            Size { width: thickness, height: Dimension::Auto },
        ),
        Position::Right => (
            TaffyRect {
                top: inset(item.top),
                right: inset(item.right),
                bottom: inset(item.bottom),
                left: auto,
            },
            Size { width: thickness, height: Dimension::Auto },
        ),
    };

    Style {
        position: TaffyPosition::Absolute,
        inset: inset_rect,
        size,
        ..Default::default()
    }
}

/// In-flow style for the main area.
fn main_style(main: &MainStyles) -> Style {
    Style {
        display: Display::Flex,
        flex_grow: 1.0,
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Percent(1.0),
        },
        padding: TaffyRect {
            top: LengthPercentage::Length(main.padding_top as f32),
            right: LengthPercentage::Length(main.padding_right as f32),
            bottom: LengthPercentage::Length(main.padding_bottom as f32),
            left: LengthPercentage::Length(main.padding_left as f32),
        },
        ..Default::default()
    }
}

/// Slide a laid-out rect by the hidden translate.
fn apply_translate(rect: Rect, translate: Translate) -> Rect {
    if translate.is_identity() {
        return rect;
    }
    match translate.axis {
        Axis::X => Rect { x: rect.x + rect.width * translate.percent / 100.0, ..rect },
        Axis::Y => Rect { y: rect.y + rect.height * translate.percent / 100.0, ..rect },
    }
}

fn to_rect(tree: &TaffyTree, node: NodeId) -> Result<Rect> {
    let layout = tree.layout(node).map_err(frame_error)?;
    Ok(Rect::new(
        f64::from(layout.location.x),
        f64::from(layout.location.y),
        f64::from(layout.size.width),
        f64::from(layout.size.height),
    ))
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Resolve regions and the main area against a content rectangle.
pub fn resolve_frame(
    rect: ContentRect,
    regions: &[FrameRegion],
    main: &MainStyles,
) -> Result<Frame> {
    let mut tree: TaffyTree = TaffyTree::new();

    let region_nodes = regions
        .iter()
        .map(|region| tree.new_leaf(region_style(region)))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(frame_error)?;
    let main_node = tree.new_leaf(main_style(main)).map_err(frame_error)?;

    let mut children = region_nodes.clone();
    children.push(main_node);

    let root_style = Style {
        display: Display::Flex,
        size: Size {
            width: Dimension::Length(rect.width as f32),
            height: Dimension::Length(rect.height as f32),
        },
        ..Default::default()
    };
    let root = tree.new_with_children(root_style, &children).map_err(frame_error)?;

    let available = Size {
        width: AvailableSpace::Definite(rect.width as f32),
        height: AvailableSpace::Definite(rect.height as f32),
    };
    tree.compute_layout(root, available).map_err(frame_error)?;

    let canvas = Rect::new(0.0, 0.0, rect.width, rect.height);
    let mut resolved = Vec::with_capacity(regions.len());
    for (region, &node) in regions.iter().zip(&region_nodes) {
        let placed = apply_translate(
            to_rect(&tree, node)?,
            Translate::for_region(region.position, region.active),
        );
        resolved.push(ResolvedRegion {
            id: region.id.clone(),
            rect: placed,
            z_index: region.z_index,
            visible: region.active && placed.intersects(&canvas),
        });
    }

    let outer = to_rect(&tree, main_node)?;
    let main_rect = Rect::new(
        outer.x + main.padding_left,
        outer.y + main.padding_top,
        (outer.width - main.padding_left - main.padding_right).max(0.0),
        (outer.height - main.padding_top - main.padding_bottom).max(0.0),
    );

    tracing::trace!(
        regions = resolved.len(),
        width = rect.width,
        height = rect.height,
        "resolved frame"
    );

    Ok(Frame {
        regions: resolved,
        main: main_rect,
    })
}
