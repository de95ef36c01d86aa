//! Layout Engine - Region registry and layer computation.
//!
//! The engine manages the core data structures:
//! - Registry: ordered region ids, reactive inputs, derived geometry
//! - RegionSlots: one Slot per region input, bound to the caller's props
//! - Layers: pure functions turning input snapshots into offsets
//!
//! # Architecture
//!
//! Regions are NOT positioned by a tree walk. They are entries in an ordered
//! list, and each one consumes space on one edge:
//!
//! ```text
//! order 0: bar     (top,  64)  → sees { top: 0,  left: 0 }
//! order 0: drawer  (left, 256) → sees { top: 64, left: 0 }
//! main                         → padding { top: 64, left: 256 }
//! ```

mod layers;
mod region;
mod registry;
mod uid;

pub use layers::*;
pub use region::RegionSlots;
pub use registry::*;
pub use uid::generate_layout_item_id;
