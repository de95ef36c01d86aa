//! Computed style records.
//!
//! The registry hands these to region presentations. They are plain values;
//! `declarations()` renders them as CSS property/value pairs for hosts that
//! emit markup, and the taffy bridge reads the typed fields directly.

use std::fmt;

use crate::error::{LayoutError, Result};
use crate::types::{Axis, Edges, LayoutItem, Position};

/// How far (percent of own size) an inactive region slides off-canvas.
pub const HIDDEN_TRANSLATE_PERCENT: f64 = 110.0;

/// Render a pixel amount: `64.0` → `"64px"`.
pub fn convert_to_unit(value: f64) -> String {
    format!("{value}px")
}

// =============================================================================
// Value types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssPosition {
    Fixed,
    Absolute,
    Relative,
}

impl CssPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }
}

/// A length along one axis of the layout container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Fixed pixels.
    Px(f64),
    /// The full container minus both ends: `calc(100% - start - end)`.
    Fill { start: f64, end: f64 },
}

impl Length {
    /// Resolve against the container's extent on this axis.
    pub fn resolve(&self, available: f64) -> f64 {
        match *self {
            Self::Px(px) => px,
            Self::Fill { start, end } => (available - start - end).max(0.0),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Px(px) => f.write_str(&convert_to_unit(px)),
            Self::Fill { start, end } => write!(f, "calc(100% - {start}px - {end}px)"),
        }
    }
}

/// Slide transform, in percent of the region's own size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    pub axis: Axis,
    pub percent: f64,
}

impl Translate {
    /// Zero when active, ±110% away from the pinned edge otherwise.
    pub fn for_region(position: Position, active: bool) -> Self {
        let direction = if position.is_opposite() { -1.0 } else { 1.0 };
        let percent = if active { 0.0 } else { -HIDDEN_TRANSLATE_PERCENT * direction };
        Self {
            axis: position.motion_axis(),
            percent,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.percent == 0.0
    }
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.axis {
            Axis::X => "X",
            Axis::Y => "Y",
        };
        write!(f, "translate{axis}({}%)", self.percent)
    }
}

// =============================================================================
// Layout Item Styles
// =============================================================================

/// Style of one region's own element.
///
/// Before the layout's first measurement pass only the pre-measurement subset
/// is filled; `width`, `height` and margins stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItemStyles {
    /// Edge pinned to 0. Offsets are applied through margins.
    pub anchor: Position,
    pub z_index: i32,
    pub transform: Translate,
    pub position: CssPosition,
    /// `transition: none` while any region disables transitions.
    pub transition_none: bool,
    pub height: Option<Length>,
    pub width: Option<Length>,
    pub margin_top: Option<f64>,
    pub margin_right: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub margin_left: Option<f64>,
}

impl LayoutItemStyles {
    pub fn is_measured(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            (self.anchor.as_str(), "0".to_string()),
            ("z-index", self.z_index.to_string()),
            ("transform", self.transform.to_string()),
            ("position", self.position.as_str().to_string()),
        ];
        if self.transition_none {
            out.push(("transition", "none".to_string()));
        }
        if let Some(height) = self.height {
            out.push(("height", height.to_string()));
        }
        if let Some(left) = self.margin_left {
            out.push(("margin-left", convert_to_unit(left)));
        }
        if let Some(right) = self.margin_right {
            out.push(("margin-right", convert_to_unit(right)));
        }
        if let Some(top) = self.margin_top {
            out.push(("margin-top", convert_to_unit(top)));
        }
        if let Some(bottom) = self.margin_bottom {
            out.push(("margin-bottom", convert_to_unit(bottom)));
        }
        if let Some(width) = self.width {
            out.push(("width", width.to_string()));
        }
        out
    }

    pub fn to_css(&self) -> String {
        render(&self.declarations())
    }
}

/// Everything the style derivation reads for one region.
#[derive(Debug, Clone)]
pub struct ItemStyleInputs<'a> {
    pub id: &'a str,
    pub position: Position,
    pub active: bool,
    pub absolute: bool,
    pub element_size: Option<f64>,
    /// The registry is nested inside another layout.
    pub nested: bool,
    pub z_index: i32,
    pub transitions_enabled: bool,
    /// The layout finished its first measurement pass.
    pub mounted: bool,
    /// The region's computed item, overlaps already applied.
    pub item: Option<&'a LayoutItem>,
}

/// Derive one region's style.
///
/// After mount a missing item means the register/unregister protocol was
/// broken, and that is reported rather than papered over with zero geometry.
pub fn layout_item_styles(inputs: &ItemStyleInputs<'_>) -> Result<LayoutItemStyles> {
    let position = inputs.position;
    let mut styles = LayoutItemStyles {
        anchor: position,
        z_index: inputs.z_index,
        transform: Translate::for_region(position, inputs.active),
        position: if inputs.absolute || inputs.nested {
            CssPosition::Absolute
        } else {
            CssPosition::Fixed
        },
        transition_none: !inputs.transitions_enabled,
        height: None,
        width: None,
        margin_top: None,
        margin_right: None,
        margin_bottom: None,
        margin_left: None,
    };

    if !inputs.mounted {
        return Ok(styles);
    }

    let item = inputs
        .item
        .ok_or_else(|| LayoutError::MissingLayoutItem(inputs.id.to_string()))?;

    let horizontal = position.is_horizontal();
    let element_size = inputs.element_size.map(Length::Px);

    styles.height = if horizontal {
        Some(Length::Fill {
            start: item.top,
            end: item.bottom,
        })
    } else {
        element_size
    };
    styles.width = if horizontal {
        element_size
    } else {
        Some(Length::Fill {
            start: item.left,
            end: item.right,
        })
    };
    if position == Position::Right {
        styles.margin_right = Some(item.right);
    } else {
        styles.margin_left = Some(item.left);
    }
    if position != Position::Bottom {
        styles.margin_top = Some(item.top);
    }
    if position != Position::Top {
        styles.margin_bottom = Some(item.bottom);
    }

    Ok(styles)
}

// =============================================================================
// Scrim / Main / Layout container
// =============================================================================

/// Style of the backdrop just beneath a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrimStyles {
    pub z_index: i32,
    pub position: CssPosition,
}

impl ScrimStyles {
    pub fn new(region_z_index: i32, nested: bool) -> Self {
        Self {
            z_index: region_z_index - 1,
            position: if nested {
                CssPosition::Absolute
            } else {
                CssPosition::Fixed
            },
        }
    }

    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("z-index", self.z_index.to_string()),
            ("position", self.position.as_str().to_string()),
        ]
    }
}

/// Padding for the content-hosting region: all space taken by active regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainStyles {
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub transition_none: bool,
}

impl MainStyles {
    pub fn new(edges: Edges, transitions_enabled: bool) -> Self {
        Self {
            padding_top: edges.top,
            padding_right: edges.right,
            padding_bottom: edges.bottom,
            padding_left: edges.left,
            transition_none: !transitions_enabled,
        }
    }

    pub fn padding(&self) -> Edges {
        Edges {
            top: self.padding_top,
            left: self.padding_left,
            right: self.padding_right,
            bottom: self.padding_bottom,
        }
    }

    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("position", CssPosition::Relative.as_str().to_string()),
            ("padding-left", convert_to_unit(self.padding_left)),
            ("padding-right", convert_to_unit(self.padding_right)),
            ("padding-top", convert_to_unit(self.padding_top)),
            ("padding-bottom", convert_to_unit(self.padding_bottom)),
        ];
        if self.transition_none {
            out.push(("transition", "none".to_string()));
        }
        out
    }

    pub fn to_css(&self) -> String {
        render(&self.declarations())
    }
}

impl Default for MainStyles {
    fn default() -> Self {
        Self::new(Edges::ZERO, true)
    }
}

/// Style of the layout container itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStyles {
    pub z_index: i32,
}

fn render(declarations: &[(&'static str, String)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(position: Position, item: Option<&'a LayoutItem>) -> ItemStyleInputs<'a> {
        ItemStyleInputs {
            id: "region",
            position,
            active: true,
            absolute: false,
            element_size: None,
            nested: false,
            z_index: 1004,
            transitions_enabled: true,
            mounted: true,
            item,
        }
    }

    #[test]
    fn test_convert_to_unit() {
        assert_eq!(convert_to_unit(64.0), "64px");
        assert_eq!(convert_to_unit(12.5), "12.5px");
    }

    #[test]
    fn test_translate_directions() {
        assert_eq!(Translate::for_region(Position::Left, false).to_string(), "translateX(-110%)");
        assert_eq!(Translate::for_region(Position::Right, false).to_string(), "translateX(110%)");
        assert_eq!(Translate::for_region(Position::Bottom, false).to_string(), "translateY(110%)");
        assert!(Translate::for_region(Position::Top, true).is_identity());
    }

    #[test]
    fn test_pre_measurement_subset() {
        let mut pre = inputs(Position::Top, None);
        pre.mounted = false;

        let styles = layout_item_styles(&pre).unwrap();
        assert!(!styles.is_measured());
        assert_eq!(styles.margin_top, None);
        assert_eq!(styles.position, CssPosition::Fixed);
        assert_eq!(
            styles.to_css(),
            "top: 0; z-index: 1004; transform: translateY(0%); position: fixed;"
        );
    }

    #[test]
    fn test_missing_item_after_mount() {
        let result = layout_item_styles(&inputs(Position::Top, None));
        assert_eq!(result, Err(LayoutError::MissingLayoutItem("region".to_string())));
    }

    #[test]
    fn test_left_drawer_styles() {
        let item = LayoutItem::new(
            "drawer",
            Edges {
                top: 64.0,
                left: 0.0,
                right: 0.0,
                bottom: 48.0,
            },
            256.0,
        );
        let mut drawer = inputs(Position::Left, Some(&item));
        drawer.element_size = Some(256.0);

        let styles = layout_item_styles(&drawer).unwrap();
        assert_eq!(styles.height, Some(Length::Fill { start: 64.0, end: 48.0 }));
        assert_eq!(styles.width, Some(Length::Px(256.0)));
        assert_eq!(styles.margin_left, Some(0.0));
        assert_eq!(styles.margin_right, None);
        assert_eq!(styles.margin_top, Some(64.0));
        assert_eq!(styles.margin_bottom, Some(48.0));
        assert!(styles.to_css().contains("height: calc(100% - 64px - 48px);"));
    }

    #[test]
    fn test_right_and_bottom_margins() {
        let item = LayoutItem::new(
            "footer",
            Edges {
                top: 64.0,
                left: 256.0,
                right: 10.0,
                bottom: 0.0,
            },
            48.0,
        );
        let footer = layout_item_styles(&inputs(Position::Bottom, Some(&item))).unwrap();
        assert_eq!(footer.margin_top, None);
        assert_eq!(footer.margin_bottom, Some(0.0));
        assert_eq!(footer.margin_left, Some(256.0));
        assert_eq!(footer.width, Some(Length::Fill { start: 256.0, end: 10.0 }));
        assert_eq!(footer.height, None);

        let rail = layout_item_styles(&inputs(Position::Right, Some(&item))).unwrap();
        assert_eq!(rail.margin_right, Some(10.0));
        assert_eq!(rail.margin_left, None);
    }

    #[test]
    fn test_nested_and_absolute_positioning() {
        let item = LayoutItem::new("bar", Edges::ZERO, 64.0);
        let mut nested = inputs(Position::Top, Some(&item));
        nested.nested = true;
        assert_eq!(layout_item_styles(&nested).unwrap().position, CssPosition::Absolute);

        let mut absolute = inputs(Position::Top, Some(&item));
        absolute.absolute = true;
        assert_eq!(layout_item_styles(&absolute).unwrap().position, CssPosition::Absolute);
    }

    #[test]
    fn test_scrim_styles() {
        assert_eq!(
            ScrimStyles::new(1004, false),
            ScrimStyles {
                z_index: 1003,
                position: CssPosition::Fixed,
            }
        );
        assert_eq!(ScrimStyles::new(904, true).position, CssPosition::Absolute);
    }

    #[test]
    fn test_main_styles_css() {
        let main = MainStyles::new(Edges::ZERO.with_added(Position::Top, 64.0), false);
        assert_eq!(
            main.to_css(),
            concat!(
                "position: relative; padding-left: 0px; padding-right: 0px; ",
                "padding-top: 64px; padding-bottom: 0px; transition: none;",
            )
        );
    }

    #[test]
    fn test_length_resolve() {
        assert_eq!(Length::Px(12.0).resolve(100.0), 12.0);
        assert_eq!(Length::Fill { start: 10.0, end: 20.0 }.resolve(100.0), 70.0);
        assert_eq!(Length::Fill { start: 80.0, end: 40.0 }.resolve(100.0), 0.0);
    }
}
