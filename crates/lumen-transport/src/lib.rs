//! # lumen-transport: socket and shared-memory primitives
//!
//! The two OS-facing pieces the protocol core depends on:
//!
//! - [`send_with_fds`]: deliver a payload plus ancillary file descriptors
//!   over a Unix-domain socket, tolerating partial writes. Descriptors ride
//!   the first chunk only.
//! - [`ShmMapping`]: map a client-supplied file descriptor into a
//!   byte-addressable view for zero-copy buffer access.
//!
//! Neither primitive synchronizes internally. A socket must not be written
//! by two callers concurrently (interleaved partial writes corrupt message
//! framing), and a mapping must not be unmapped while a reader holds the
//! view; both disciplines belong to the session layer. No operation here
//! defines a timeout or cancellation point.

#![warn(missing_docs)]

pub mod errors;
pub mod shm;
pub mod socket;

pub use errors::{Result, TransportError};
pub use shm::ShmMapping;
pub use socket::{send_with_fds, MessageSink};
