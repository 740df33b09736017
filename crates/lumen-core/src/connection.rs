//! The capability surface generated logic needs from the session layer.
//!
//! The session manager owns every runtime entity this core touches: the
//! socket, the per-connection object table, the global bind registry, and
//! the queue of ancillary descriptors received but not yet consumed.
//! Generated encoders and dispatchers reach all of them through this one
//! trait, and through nothing else.

use std::os::fd::OwnedFd;

use lumen_proto::{GlobalId, ObjectId, OutgoingMessage, ProtocolError};
use lumen_transport::TransportError;

/// Per-connection capabilities implemented by the external session manager.
///
/// Implementations are driven from a single execution context per
/// connection; none of these methods are expected to be re-entrant.
pub trait Connection {
    /// Queue or deliver an outbound message.
    ///
    /// The implementation applies header framing (object id + opcode + size)
    /// and hands the bytes plus the optional descriptor to the socket.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the underlying delivery fails. The
    /// message must not be resent.
    fn send_message(&mut self, message: OutgoingMessage) -> Result<(), TransportError>;

    /// Claim the oldest pending ancillary file descriptor.
    ///
    /// Ownership moves to the caller, who must close it exactly once (the
    /// returned handle does so on drop).
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NoPendingFd`] when the queue is empty: the
    /// client sent a request with an fd argument but no descriptor.
    fn claim_fd(&mut self) -> Result<OwnedFd, ProtocolError>;

    /// Drop an object from this connection's object table.
    fn remove_object(&mut self, object: ObjectId);

    /// Drop a global binding: the client no longer holds `object` as a bind
    /// of the global advertised under `global`.
    fn remove_global_bind(&mut self, global: GlobalId, object: ObjectId);
}
