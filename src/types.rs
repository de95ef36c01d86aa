//! Core types for spark-layout.
//!
//! These are the plain values that flow through the registry: edges, layers,
//! computed items and the structural hints regions register with.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::LayoutError;

// =============================================================================
// Z-Index Budget
// =============================================================================

/// Base z-index of a layout that has no enclosing layout.
pub const ROOT_Z_INDEX: i32 = 1000;

/// How far a nested layout's base sits below its parent's base.
pub const NESTED_Z_INDEX_STEP: i32 = 100;

/// z-index units consumed per registered region.
pub const Z_INDEX_STRIDE: i32 = 2;

/// Regions one registry can stack while staying below the parent tier.
///
/// With `n` regions the topmost sits at `base + STRIDE * (n + 1)`, which must
/// stay under `base + NESTED_Z_INDEX_STEP`.
pub const MAX_REGIONS_PER_TIER: usize = (NESTED_Z_INDEX_STEP / Z_INDEX_STRIDE - 2) as usize;

// =============================================================================
// Position
// =============================================================================

/// The viewport edge a region is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    pub const ALL: [Position; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Left and right regions are horizontal: their thickness is a width.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Right and bottom regions slide the other way when hidden.
    pub fn is_opposite(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    /// Axis the region slides along when it is hidden.
    pub fn motion_axis(self) -> Axis {
        if self.is_horizontal() { Axis::X } else { Axis::Y }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(LayoutError::InvalidPosition(other.to_string())),
        }
    }
}

/// Translation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

// =============================================================================
// Edges / Layer
// =============================================================================

/// Space consumed on each edge, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Edges {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn get(&self, position: Position) -> f64 {
        match position {
            Position::Top => self.top,
            Position::Bottom => self.bottom,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    pub fn get_mut(&mut self, position: Position) -> &mut f64 {
        match position {
            Position::Top => &mut self.top,
            Position::Bottom => &mut self.bottom,
            Position::Left => &mut self.left,
            Position::Right => &mut self.right,
        }
    }

    /// Copy with `amount` added to one edge.
    pub fn with_added(mut self, position: Position, amount: f64) -> Self {
        *self.get_mut(position) += amount;
        self
    }
}

/// Accumulated offsets after one region has been applied.
///
/// The first layer of every computation has an empty id and zero edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: String,
    pub edges: Edges,
}

impl Layer {
    pub fn origin() -> Self {
        Self {
            id: String::new(),
            edges: Edges::ZERO,
        }
    }
}

// =============================================================================
// Layout Item
// =============================================================================

/// The computed placement of one region.
///
/// `top`/`left`/`right`/`bottom` are the offsets the region must respect
/// (space already taken by regions before it), `size` is its own thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub size: f64,
}

impl LayoutItem {
    pub fn new(id: impl Into<String>, edges: Edges, size: f64) -> Self {
        Self {
            id: id.into(),
            top: edges.top,
            bottom: edges.bottom,
            left: edges.left,
            right: edges.right,
            size,
        }
    }

    pub fn edges(&self) -> Edges {
        Edges {
            top: self.top,
            left: self.left,
            right: self.right,
            bottom: self.bottom,
        }
    }

    pub fn offset(&self, position: Position) -> f64 {
        self.edges().get(position)
    }

    pub(crate) fn offset_mut(&mut self, position: Position) -> &mut f64 {
        match position {
            Position::Top => &mut self.top,
            Position::Bottom => &mut self.bottom,
            Position::Left => &mut self.left,
            Position::Right => &mut self.right,
        }
    }
}

// =============================================================================
// Overlaps
// =============================================================================

/// A declared `"top:bottom"` overlap pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub top: String,
    pub bottom: String,
}

impl Overlap {
    /// Parse `"topId:bottomId"`. Entries without a colon are not overlaps.
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.contains(':') {
            return None;
        }
        let mut parts = raw.split(':');
        let top = parts.next()?;
        let bottom = parts.next()?;
        Some(Self {
            top: top.to_string(),
            bottom: bottom.to_string(),
        })
    }
}

/// Offset correction applied to one region because of an overlap pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapAdjustment {
    pub position: Position,
    pub amount: f64,
}

// =============================================================================
// Region Status
// =============================================================================

/// Lifecycle status of a region as the registry sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionStatus {
    /// Mounted and declared active: occupies space.
    #[default]
    Active,
    /// Mounted but declared inactive: registered, zero thickness.
    Inactive,
    /// Kept alive off-screen by the host: treated as inactive.
    Suspended,
}

impl RegionStatus {
    pub fn resolve(declared_active: bool, suspended: bool) -> Self {
        if suspended {
            Self::Suspended
        } else if declared_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn occupies_space(self) -> bool {
        self == Self::Active
    }
}

// =============================================================================
// Tree Path
// =============================================================================

/// Structural position of a region below its layout root.
///
/// Child indices from the root down. Ordering is lexicographic, which is
/// document (pre-)order: a parent sorts before its children, and earlier
/// siblings before later ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TreePath(Vec<u32>);

impl TreePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self(indices.into())
    }

    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<u32>> for TreePath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl From<&[u32]> for TreePath {
    fn from(indices: &[u32]) -> Self {
        Self(indices.to_vec())
    }
}

// =============================================================================
// Rectangles
// =============================================================================

/// Content rectangle reported by a resize observer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ContentRect {
    pub width: f64,
    pub height: f64,
}

impl ContentRect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A concrete rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the two rectangles share a region of positive area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// =============================================================================
// Layout Classes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Classes a layout container renders with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayoutClasses: u8 {
        const LAYOUT = 1 << 0;
        const FULL_HEIGHT = 1 << 1;
    }
}

impl LayoutClasses {
    pub fn class_names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::LAYOUT) {
            names.push("spark-layout");
        }
        if self.contains(Self::FULL_HEIGHT) {
            names.push("spark-layout--full-height");
        }
        names
    }
}
