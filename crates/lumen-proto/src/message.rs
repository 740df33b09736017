//! Message records exchanged with the session layer.

use std::os::fd::OwnedFd;

use bytes::Bytes;

use crate::ObjectId;

/// An outbound event, ready for delivery.
///
/// The payload holds the encoded arguments only. Header framing (object id +
/// opcode + total size prefix) is applied by the session layer when it writes
/// the message to the socket.
///
/// The optional descriptor is owned: the kernel duplicates it across the
/// process boundary on send, so the local copy is closed when this record is
/// dropped without affecting the receiver.
#[derive(Debug)]
pub struct OutgoingMessage {
    /// Destination object
    pub object_id: ObjectId,
    /// Event's index in its interface's event list
    pub opcode: u16,
    /// Encoded arguments
    pub payload: Bytes,
    /// At most one ancillary descriptor per message
    pub fd: Option<OwnedFd>,
}

/// An inbound request, as handed over by the session layer.
///
/// The session layer has already stripped the header; `payload` is the
/// argument bytes. Any ancillary descriptors that arrived with the stream
/// sit in the connection's pending queue and are claimed during decoding,
/// never read from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Target object
    pub object_id: ObjectId,
    /// Request's index in its interface's request list
    pub opcode: u16,
    /// Encoded arguments
    pub payload: Bytes,
}
