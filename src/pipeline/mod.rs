//! Reactive Pipeline
//!
//! Connects a registry to concrete output.
//!
//! # Pipeline Architecture
//!
//! ```text
//! resize input → layout rect ─┐
//!                             ├→ frameDerived → host render effect
//! regions → registry items ───┘
//! ```
//!
//! ## Key Design Principles
//!
//! - **Pure Deriveds**: the frame derived only reads; it never writes signals
//! - **Side Effects in the Host**: drawing a frame belongs in the host's effect

pub mod frame_derived;
pub mod resize;

pub use frame_derived::create_frame_derived;
pub use resize::{apply_resize_event, detect_terminal_rect, observe_terminal};
