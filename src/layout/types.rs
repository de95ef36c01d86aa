//! Frame types - input and output of concrete geometry resolution.

use crate::types::{LayoutItem, Position, Rect};

/// One region's resolved layout state, ready to be placed on a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRegion {
    pub id: String,
    pub position: Position,
    /// Offsets with overlaps applied, and the configured thickness.
    pub item: LayoutItem,
    /// Rendered thickness, when it differs from the layout thickness.
    pub element_size: Option<f64>,
    pub z_index: i32,
    pub active: bool,
}

impl FrameRegion {
    /// Thickness the region is drawn with.
    pub fn thickness(&self) -> f64 {
        self.element_size.unwrap_or(self.item.size)
    }
}

/// A region placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRegion {
    pub id: String,
    pub rect: Rect,
    pub z_index: i32,
    /// Active and at least partly on the canvas.
    pub visible: bool,
}

/// Concrete geometry of a whole layout for one content rectangle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Regions in registration order.
    pub regions: Vec<ResolvedRegion>,
    /// Content box of the main area.
    pub main: Rect,
}

impl Frame {
    pub fn region(&self, id: &str) -> Option<&ResolvedRegion> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Visible regions, topmost first.
    pub fn stacking_order(&self) -> Vec<&ResolvedRegion> {
        let mut visible: Vec<&ResolvedRegion> =
            self.regions.iter().filter(|region| region.visible).collect();
        visible.sort_by(|a, b| b.z_index.cmp(&a.z_index));
        visible
    }
}
