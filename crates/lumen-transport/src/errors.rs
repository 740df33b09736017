//! Transport error types.

use std::io;

use thiserror::Error;

/// Failure in the socket or shared-memory layer.
///
/// Fatal to the affected resource: a failed send must not be resumed for the
/// same logical message, and a failed mapping must not be used.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying socket write failed
    #[error("socket send failed: {0}")]
    Send(#[source] io::Error),

    /// The socket accepted zero bytes mid-message; the message cannot be
    /// completed and must not be resumed
    #[error("socket accepted 0 bytes with {remaining} bytes left to send")]
    ZeroWrite {
        /// Bytes that were still unsent
        remaining: usize,
    },

    /// Mapping a shared-memory descriptor failed
    #[error("mapping {size} bytes of shared memory failed: {source}")]
    MapFailed {
        /// Requested view size in bytes
        size: usize,
        /// Underlying mmap error
        #[source]
        source: io::Error,
    },
}

/// Convenient Result alias for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;
