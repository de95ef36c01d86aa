//! Primitive types - Props and cleanup.
//!
//! These types define the interface for layout and layout item props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::{Position, TreePath};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by primitives.
///
/// Call this to unmount and release the registration.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// When bound to a region Slot, the reactive connection is preserved.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a getter closure.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// Sizes are usually written as integers
impl From<u32> for PropValue<f64> {
    fn from(value: u32) -> Self {
        PropValue::Static(f64::from(value))
    }
}

impl From<u32> for PropValue<Option<f64>> {
    fn from(value: u32) -> Self {
        PropValue::Static(Some(f64::from(value)))
    }
}

// =============================================================================
// Layout Props
// =============================================================================

/// Properties for a layout (registry) root.
///
/// # Example
///
/// ```ignore
/// use spark_layout::{create_layout, LayoutProps};
///
/// let layout = create_layout(LayoutProps {
///     overlaps: vec!["drawer:bar".to_string()].into(),
///     full_height: true,
/// }, None);
/// ```
#[derive(Clone, Default)]
pub struct LayoutProps {
    /// `"topId:bottomId"` overlap pairs.
    pub overlaps: PropValue<Vec<String>>,

    /// Adds the full-height class. No geometry effect.
    pub full_height: bool,
}

// =============================================================================
// Layout Item Props
// =============================================================================

/// Properties for a region registering with a layout.
///
/// # Example
///
/// ```ignore
/// use spark_layout::{use_layout_item, LayoutItemProps, Position};
/// use spark_signals::signal;
///
/// let open = signal(true);
///
/// let drawer = use_layout_item(Some(layout.registry()), LayoutItemProps {
///     id: Some("drawer".to_string()),
///     position: Position::Left.into(),
///     layout_size: 256.into(),
///     active: open.clone().into(),
///     ..Default::default()
/// })?;
///
/// // Close the drawer - main padding and neighbours update
/// open.set(false);
/// ```
#[derive(Clone)]
pub struct LayoutItemProps {
    // =========================================================================
    // Identity
    // =========================================================================

    /// Region id. Generated when not given.
    pub id: Option<String>,

    /// Structural position below the layout root, for document-order insertion.
    pub tree_path: Option<TreePath>,

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Layering priority, lower values are laid out first (default: 0).
    pub order: PropValue<i32>,

    /// Edge to occupy (default: top).
    pub position: PropValue<Position>,

    /// Thickness along the region's axis when active.
    pub layout_size: PropValue<f64>,

    /// Rendered thickness when it differs from `layout_size` (a floating
    /// drawer occupies 0 but draws 256). `None` leaves it to the element.
    pub element_size: PropValue<Option<f64>>,

    // =========================================================================
    // Behavior
    // =========================================================================

    /// Whether the region occupies space (default: true).
    pub active: PropValue<bool>,

    /// Position relative to the nearest positioned ancestor (default: false).
    pub absolute: PropValue<bool>,

    /// Suppress transitions while this region is registered.
    pub disable_transitions: Option<PropValue<bool>>,
}

impl Default for LayoutItemProps {
    fn default() -> Self {
        Self {
            id: None,
            tree_path: None,
            order: PropValue::Static(0),
            position: PropValue::Static(Position::Top),
            layout_size: PropValue::Static(0.0),
            element_size: PropValue::Static(None),
            active: PropValue::Static(true),
            absolute: PropValue::Static(false),
            disable_transitions: None,
        }
    }
}
