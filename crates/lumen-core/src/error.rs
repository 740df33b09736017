//! The error seam between generated logic and the session layer.
//!
//! Marshalling and dispatch can fail for exactly two reasons: the wire data
//! (or the caller's arguments) violated the protocol, or delivering a message
//! failed in the transport. `DispatchError` keeps the two kinds distinct so
//! the session layer can tell a misbehaving client from a dead socket.

use lumen_proto::ProtocolError;
use lumen_transport::TransportError;
use thiserror::Error;

/// Failure while emitting an event or dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Malformed wire data, unknown opcode, missing ancillary descriptor, or
    /// mistyped encoder arguments. Fatal to the affected connection.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Socket or shared-memory failure underneath a send. Fatal to the
    /// affected resource.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convenient Result alias for marshal/dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;
