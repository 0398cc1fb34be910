//! Error types for identifier and key construction.

use thiserror::Error;

/// Result type alias using shroud's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing identifiers or keys.
///
/// Everything fails at parse or construction time. Once a
/// [`Uuid128`](crate::Uuid128) and a [`FacadeKey`](crate::FacadeKey)
/// exist, the transform itself is total and cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Identifier input is neither 16 raw bytes nor 36 characters of text.
    #[error("invalid identifier length: {0}")]
    InvalidLength(usize),

    /// Text input does not match the expected pattern.
    #[error("invalid format: {0}")]
    InvalidFormat(&'static str),
}
