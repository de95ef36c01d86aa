//! Layout errors.
//!
//! Everything here is a programming or configuration mistake on the caller's
//! side. There is no I/O in the layout engine, so nothing is retried.

use thiserror::Error;

/// Errors reported by the layout registry and its handles.
///
/// `Clone + PartialEq` so a failure can travel through a `Derived` value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A layout item or nested layout needed an enclosing registry and got none.
    #[error("could not find an enclosing layout for {0}")]
    MissingRegistry(&'static str),

    /// The id is already registered in this registry.
    #[error("layout item \"{0}\" is already registered")]
    DuplicateRegion(String),

    /// The id is registered but was never resolved into a computed item.
    #[error("layout item \"{0}\" is missing")]
    MissingLayoutItem(String),

    /// A size input is not a finite, non-negative number.
    #[error("invalid size {value:?} for layout item \"{id}\"")]
    InvalidSize { id: String, value: String },

    /// Unknown edge name.
    #[error("invalid layout position {0:?}, expected top, bottom, left or right")]
    InvalidPosition(String),

    /// Taffy failed to resolve the concrete frame.
    #[error("frame resolution failed: {0}")]
    Frame(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
