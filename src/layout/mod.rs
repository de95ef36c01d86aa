//! Concrete geometry - Frames for a known content rectangle.
//!
//! The registry works in offsets and style records. When the host knows the
//! size of the layout element, [`resolve_frame`] runs the records through
//! [Taffy](https://github.com/DioxusLabs/taffy) and returns concrete rects.
//!
//! # Example
//!
//! ```ignore
//! use spark_layout::layout::resolve_frame;
//!
//! let frame = resolve_frame(ContentRect::new(800.0, 600.0), &regions, &registry.main_styles())?;
//! let drawer = frame.region("drawer").unwrap();
//! ```

mod taffy_bridge;
mod types;

pub use taffy_bridge::resolve_frame;
pub use types::*;
