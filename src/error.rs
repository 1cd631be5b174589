//! Error types for Weir.

use thiserror::Error;

/// Result type alias using Weir's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pipe operations.
///
/// No error values travel *through* a pipe; stages treat [`Error::Closed`]
/// from a send as a normal termination signal, not a fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The other side of the pipe has disconnected.
    #[error("pipe closed")]
    Closed,

    /// A non-blocking send found the pipe full.
    #[error("pipe full")]
    Full,
}
