//! Layout Item Primitive - One region's registration lifecycle.
//!
//! `use_layout_item` registers a region with the enclosing registry and hands
//! back a handle. The handle:
//! - reads the region's own style, scrim and z-index back from the registry
//! - suspends the region while the host keeps it alive off-screen
//! - unregisters exactly once, on `unmount` or drop
//!
//! # Reactivity
//!
//! Props are bound to the registry's slots, not read once. Changing a bound
//! signal moves every affected region and the main padding.

use std::cell::Cell;
use std::fmt;

use spark_signals::{signal, Signal};

use crate::engine::{
    generate_layout_item_id, LayoutRegistry, RegionInputs, RegisteredRegion, WeakLayoutRegistry,
};
use crate::error::{LayoutError, Result};
use crate::style::{LayoutItemStyles, ScrimStyles};
use crate::types::{ContentRect, LayoutItem, RegionStatus, TreePath};

use super::types::{Cleanup, LayoutItemProps, PropValue};

/// A registered region.
pub struct LayoutItemHandle {
    id: String,
    tree_path: Option<TreePath>,
    registry: WeakLayoutRegistry,
    region: RegisteredRegion,
    declared_active: PropValue<bool>,
    suspended: Signal<bool>,
    registered: Cell<bool>,
}

/// Register a region with the enclosing layout.
///
/// Fails with [`LayoutError::MissingRegistry`] when there is no enclosing
/// layout, and with the registry's errors for duplicate ids or bad sizes.
pub fn use_layout_item(
    layout: Option<&LayoutRegistry>,
    props: LayoutItemProps,
) -> Result<LayoutItemHandle> {
    let registry = layout.ok_or(LayoutError::MissingRegistry("use_layout_item"))?;

    let id = props.id.clone().unwrap_or_else(generate_layout_item_id);
    let tree_path = props.tree_path.clone();
    let declared_active = props.active.clone();
    let suspended = signal(false);

    let mut inputs = RegionInputs::new(id.clone(), props);
    inputs.active = {
        let declared_active = declared_active.clone();
        let suspended = suspended.clone();
        PropValue::getter(move || !suspended.get() && declared_active.get())
    };

    let region = registry.register(inputs)?;

    Ok(LayoutItemHandle {
        id,
        tree_path,
        registry: registry.downgrade(),
        region,
        declared_active,
        suspended,
        registered: Cell::new(true),
    })
}

impl LayoutItemHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree_path(&self) -> Option<&TreePath> {
        self.tree_path.as_ref()
    }

    /// Path for the `index`th structural child, for regions nested inside
    /// this one.
    pub fn child_path(&self, index: u32) -> Option<TreePath> {
        self.tree_path.as_ref().map(|path| path.child(index))
    }

    pub fn styles(&self) -> Result<LayoutItemStyles> {
        self.region.styles()
    }

    pub fn scrim_styles(&self) -> ScrimStyles {
        self.region.scrim_styles()
    }

    pub fn z_index(&self) -> i32 {
        self.region.z_index()
    }

    /// This region's computed item, if the layout is still alive.
    pub fn layout_item(&self) -> Option<LayoutItem> {
        self.registry
            .upgrade()
            .and_then(|registry| registry.get_layout_item(&self.id))
    }

    pub fn layout_rect(&self) -> Option<ContentRect> {
        self.registry.upgrade().and_then(|registry| registry.layout_rect())
    }

    pub fn status(&self) -> RegionStatus {
        RegionStatus::resolve(self.declared_active.get(), self.suspended.get())
    }

    /// Host is keeping the region alive off-screen: stop occupying space.
    pub fn deactivate(&self) {
        self.suspended.set(true);
    }

    /// Host brought the region back.
    pub fn activate(&self) {
        self.suspended.set(false);
    }

    pub fn is_registered(&self) -> bool {
        self.registered.get()
    }

    /// Unregister now. Later calls, and the drop, do nothing.
    pub fn unmount(&self) {
        if !self.registered.replace(false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(&self.id);
        }
    }

    /// Hand the handle's lifetime to a cleanup function.
    pub fn into_cleanup(self) -> Cleanup {
        Box::new(move || self.unmount())
    }
}

impl Drop for LayoutItemHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for LayoutItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutItemHandle")
            .field("id", &self.id)
            .field("tree_path", &self.tree_path)
            .field("registered", &self.registered.get())
            .finish_non_exhaustive()
    }
}
