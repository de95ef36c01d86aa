//! Layout Primitive - The root of an edge layout.
//!
//! A layout owns one [`LayoutRegistry`]. Regions register with it through
//! [`use_layout_item`](super::use_layout_item); the content area reads
//! [`LayoutHandle::main_styles`] for its padding.
//!
//! Layouts nest: passing the enclosing registry as `parent` gives the new
//! layout its own coordinate space and a base z-index one tier lower.
//!
//! # Example
//!
//! ```ignore
//! use spark_layout::{create_layout, use_layout_item, LayoutProps, LayoutItemProps, Position};
//!
//! let layout = create_layout(LayoutProps::default(), None);
//!
//! let bar = use_layout_item(Some(layout.registry()), LayoutItemProps {
//!     position: Position::Top.into(),
//!     layout_size: 64u32.into(),
//!     ..Default::default()
//! })?;
//!
//! layout.mount();
//! assert_eq!(layout.main_styles().padding_top, 64.0);
//! ```

use crate::engine::LayoutRegistry;
use crate::error::{LayoutError, Result};
use crate::style::{LayoutStyles, MainStyles};
use crate::types::{ContentRect, LayoutClasses, LayoutItem};

use super::types::LayoutProps;

/// A created layout: its registry plus container presentation.
#[derive(Debug, Clone)]
pub struct LayoutHandle {
    registry: LayoutRegistry,
    full_height: bool,
}

/// Create a layout.
///
/// `parent` is the nearest enclosing layout's registry; `None` creates a root.
pub fn create_layout(props: LayoutProps, parent: Option<&LayoutRegistry>) -> LayoutHandle {
    LayoutHandle {
        registry: LayoutRegistry::new(props.overlaps, parent),
        full_height: props.full_height,
    }
}

/// Look up the enclosing registry for content that needs it.
pub fn use_layout(layout: Option<&LayoutRegistry>) -> Result<LayoutRegistry> {
    layout
        .cloned()
        .ok_or(LayoutError::MissingRegistry("use_layout"))
}

impl LayoutHandle {
    /// The registry to hand to regions and nested layouts.
    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    pub fn classes(&self) -> LayoutClasses {
        if self.full_height {
            LayoutClasses::LAYOUT | LayoutClasses::FULL_HEIGHT
        } else {
            LayoutClasses::LAYOUT
        }
    }

    pub fn class_names(&self) -> Vec<&'static str> {
        self.classes().class_names()
    }

    /// Container style: the base z-index of this layout.
    pub fn styles(&self) -> LayoutStyles {
        LayoutStyles {
            z_index: self.registry.root_z_index(),
        }
    }

    /// Mark the first measurement pass complete. Region styles gain sizes and
    /// margins from here on.
    pub fn mount(&self) {
        self.registry.mark_mounted();
    }

    pub fn is_mounted(&self) -> bool {
        self.registry.is_mounted()
    }

    pub fn main_styles(&self) -> MainStyles {
        self.registry.main_styles()
    }

    pub fn get_layout_item(&self, id: &str) -> Option<LayoutItem> {
        self.registry.get_layout_item(id)
    }

    pub fn items(&self) -> Vec<LayoutItem> {
        self.registry.items()
    }

    pub fn layout_rect(&self) -> Option<ContentRect> {
        self.registry.layout_rect()
    }

    pub fn set_layout_rect(&self, rect: Option<ContentRect>) {
        self.registry.set_layout_rect(rect);
    }
}
