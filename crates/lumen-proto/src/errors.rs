//! Error types for the lumen wire format.
//!
//! All errors are structured, testable, and carry the exact condition that
//! failed. Every variant is fatal to the connection that produced it: this
//! layer never retries, and recovery (drop the client, log, reconnect) is the
//! session layer's decision.

use thiserror::Error;

/// Wire-level errors raised while encoding or decoding message arguments and
/// while routing requests by opcode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload ended before a field could be read
    #[error("payload truncated: need {needed} bytes at offset {offset}, {available} remain")]
    Truncated {
        /// Cursor position where the read was attempted
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the payload
        available: usize,
    },

    /// A string argument did not contain valid UTF-8
    #[error("string argument is not valid UTF-8")]
    InvalidString,

    /// A zero-length string where a non-null string is required
    #[error("unexpected null string argument")]
    NullString,

    /// Opcode outside the interface's request table
    #[error("invalid opcode {opcode} for {interface}: {count} requests defined")]
    InvalidOpcode {
        /// Interface whose table was consulted
        interface: String,
        /// Opcode received on the wire
        opcode: u16,
        /// Number of requests the interface declares
        count: usize,
    },

    /// A request declared an fd argument but the connection has none pending
    #[error("no pending file descriptor to claim")]
    NoPendingFd,

    /// An event tried to carry more than one file descriptor
    #[error("message carries more than one file descriptor")]
    TooManyFds,

    /// Wrong number of arguments passed to an event encoder
    #[error("{interface}.{message} takes {expected} arguments, got {actual}")]
    ArityMismatch {
        /// Owning interface
        interface: String,
        /// Event or request name
        message: String,
        /// Declared argument count
        expected: usize,
        /// Argument count supplied by the caller
        actual: usize,
    },

    /// Argument value kind does not match the declared wire type
    #[error("argument {index} of {interface}.{message}: expected {expected}, got {actual}")]
    ArgumentMismatch {
        /// Owning interface
        interface: String,
        /// Event or request name
        message: String,
        /// Zero-based argument position
        index: usize,
        /// Wire type the schema declares
        expected: &'static str,
        /// Kind of the value the caller supplied
        actual: &'static str,
    },

    /// An event name that the interface does not declare
    #[error("{interface} declares no event named {message:?}")]
    UnknownMessage {
        /// Interface consulted
        interface: String,
        /// Name that failed to resolve
        message: String,
    },

    /// A decoded request has no registered handler
    #[error("no handler registered for {interface}.{request}")]
    UnhandledRequest {
        /// Owning interface
        interface: String,
        /// Request that was decoded
        request: String,
    },
}

/// Convenient Result alias for wire-format operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
