//! Error types for the menu engine.
//!
//! This module defines the centralized error type [`MenuError`] and a type alias
//! [`Result`] used by every fallible operation in the crate. Failures are always
//! locally recoverable: an operation that returns an error has left the menu
//! exactly as it was before the call.

use std::collections::TryReserveError;
use thiserror::Error;

/// The main error type for menu operations.
///
/// The first three variants form the engine's own taxonomy (storage growth,
/// bad index, unknown item). The remaining variants belong to the plumbing
/// around the engine: renderer selection, terminal I/O and configuration.
///
/// # Examples
///
/// ```
/// use pickmenu::MenuError;
///
/// let err = MenuError::InvalidIndex { index: 7, len: 3 };
/// assert_eq!(err.to_string(), "index 7 out of range for 3 entries");
/// ```
#[derive(Debug, Error)]
pub enum MenuError {
    /// Growing item, selection or text storage failed.
    ///
    /// The operation was not applied; prior state is intact.
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// An index-based operation addressed a position outside the collection.
    #[error("index {index} out of range for {len} entries")]
    InvalidIndex {
        /// Index passed by the caller.
        index: usize,
        /// Length of the collection at the time of the call.
        len: usize,
    },

    /// The referenced item is not present where the operation looked for it.
    #[error("item not found")]
    NotFound,

    /// No registered renderer carries the requested name.
    #[error("renderer not found: {0}")]
    RendererNotFound(String),

    /// The registry holds no usable renderer at all.
    #[error("no renderer available")]
    NoRenderer,

    /// Terminal or filesystem I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_failure_converts_from_try_reserve() {
        let mut v: Vec<u8> = Vec::new();
        let err = v.try_reserve(usize::MAX).map_err(MenuError::from).unwrap_err();
        assert!(matches!(err, MenuError::AllocationFailure(_)));
    }

    #[test]
    fn io_error_converts() {
        let err: MenuError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert_eq!(err.to_string(), "IO error: boom");
    }
}
