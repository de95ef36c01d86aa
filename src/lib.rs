//! # spark-layout
//!
//! Reactive edge layout for UI components.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A layout owns a registry. Bars, drawers and footers register with it, each
//! pinned to one edge with a thickness and a priority. The registry stacks them
//! edge by edge and derives, reactively:
//!
//! ```text
//! region props → RegionSlots → layers → items → region styles / z-index
//!                                         └──→ main content padding
//! ```
//!
//! Changing any bound signal (a drawer opening, a bar resizing) flows through
//! the deriveds; nothing is recomputed eagerly.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Position, Edges, LayoutItem, TreePath, etc.)
//! - [`engine`] - Layout registry, region slots, layer computation
//! - [`primitives`] - `create_layout` / `use_layout_item` and their props
//! - [`style`] - Style records for regions, scrims and main content
//! - [`layout`] - Taffy bridge resolving concrete frames
//! - [`pipeline`] - Resize input and the frame derived
//! - [`config`] - Serde configuration for declaratively loaded layouts

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{LayoutError, Result};

pub use engine::{
    generate_layout_item_id, Geometry, LayoutRegistry, RegionInputs, RegionState,
    RegisteredRegion, WeakLayoutRegistry,
};

pub use primitives::{
    create_layout, use_layout, use_layout_item, Cleanup, LayoutHandle, LayoutItemHandle,
    LayoutItemProps, LayoutProps, PropValue,
};

pub use style::{
    convert_to_unit, CssPosition, Length, LayoutItemStyles, LayoutStyles, MainStyles, ScrimStyles,
    Translate,
};

pub use layout::{resolve_frame, Frame, FrameRegion, ResolvedRegion};

pub use pipeline::{
    apply_resize_event, create_frame_derived, detect_terminal_rect, observe_terminal,
};

pub use config::{LayoutConfig, RegionConfig, SizeValue};
