//! Frame Derived - Reactive concrete geometry.
//!
//! Creates a Derived that resolves the frame whenever:
//! - The layout rect changes
//! - A region registers, unregisters, or changes any input
//! - Overlaps change

use spark_signals::{derived, Derived};

use crate::engine::LayoutRegistry;
use crate::error::Result;
use crate::layout::{resolve_frame, Frame, FrameRegion};
use crate::style::MainStyles;

/// Create the frame derived for a registry.
///
/// Yields `Ok(None)` until the first layout rect is known. Reads only the
/// rect and the registry's geometry.
pub fn create_frame_derived(
    registry: &LayoutRegistry,
) -> Derived<Result<Option<Frame>>, impl Fn() -> Result<Option<Frame>>> {
    let registry = registry.clone();

    derived(move || {
        let Some(rect) = registry.layout_rect() else {
            return Ok(None);
        };

        let geometry = registry.geometry();
        let root_z_index = registry.root_z_index();
        let regions: Vec<FrameRegion> = geometry
            .regions
            .iter()
            .filter_map(|region| {
                let id = region.id();
                Some(FrameRegion {
                    id: id.to_string(),
                    position: region.snapshot.position,
                    item: geometry.item(id)?.clone(),
                    element_size: region.element_size,
                    z_index: geometry.z_index(id, root_z_index),
                    active: region.snapshot.active,
                })
            })
            .collect();

        let main = MainStyles::new(geometry.main_edges(), geometry.transitions_enabled);
        resolve_frame(rect, &regions, &main).map(Some)
    })
}

// =============================================================================
// Tests
// =============================================================================
