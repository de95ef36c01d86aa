//! Layout Primitives - Layout roots and the regions that register with them.
//!
//! This module provides:
//! - [`create_layout`] - A layout root (or a nested one) owning a registry
//! - [`use_layout_item`] - A region registering on one edge of a layout
//! - [`use_layout`] - Lookup of the enclosing registry
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `layout_size: 64u32.into()`
//! - Signals: `active: open_signal.into()` (stays connected!)
//! - Getters: `layout_size: PropValue::getter(|| compute_size())`
//!
//! Pass props directly - don't extract values before binding:
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! use_layout_item(Some(registry), LayoutItemProps { active: open.clone().into(), ..default });
//!
//! // WRONG - reads once, the drawer never closes
//! use_layout_item(Some(registry), LayoutItemProps { active: open.get().into(), ..default });
//! ```

mod layout;
mod layout_item;
mod types;

pub use layout::{create_layout, use_layout, LayoutHandle};
pub use layout_item::{use_layout_item, LayoutItemHandle};
pub use types::*;
