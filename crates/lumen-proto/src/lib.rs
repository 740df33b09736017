//! # lumen-proto: wire-format primitives
//!
//! This crate implements the byte-level contract of the lumen display
//! protocol: the little-endian argument encoding shared by every interface,
//! and the records that carry encoded messages between the protocol core and
//! the session layer.
//!
//! ## Wire format
//!
//! Every argument occupies a multiple of 4 bytes:
//!
//! - `u32` / `i32` / object id / enum value: 4 bytes, little endian
//! - fixed-point: 4 bytes, signed, real value × 256 (see [`Fixed`])
//! - string: 4-byte length (including the terminating NUL), the bytes, a NUL,
//!   then zero padding up to the next 4-byte boundary
//! - array: 4-byte byte length, the bytes, zero padding to 4
//! - file descriptor: nothing inline; one ancillary descriptor per argument,
//!   in declaration order
//!
//! Header framing (object id + opcode + total size) is applied by the session
//! layer, not here: this crate produces and consumes argument payloads.
//!
//! ## Error handling
//!
//! All decoding is bounds-checked and returns [`ProtocolError`] on malformed
//! input. A failed read never leaves a reader in a partially-advanced state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod fixed;
pub mod message;
pub mod object;
pub mod wire;

pub use errors::{ProtocolError, Result};
pub use fixed::Fixed;
pub use message::{InboundMessage, OutgoingMessage};
pub use object::{GlobalId, ObjectId};
pub use wire::{WireReader, WireWriter};
