//! Event marshalling: typed arguments → wire payload + optional descriptor.
//!
//! One encoder per event, interpreted from its [`MessageSpec`]. Arguments
//! are serialized in declaration order into a single little-endian buffer;
//! at most one file descriptor may ride along; the wire format has no room
//! for more.

use std::os::fd::OwnedFd;

use bytes::Bytes;
use lumen_proto::{ObjectId, OutgoingMessage, ProtocolError, WireWriter};

use crate::{
    compile::{CompiledInterface, MessageSpec},
    connection::Connection,
    error::{DispatchError, Result},
    types::{ArgValue, WireType},
};

impl CompiledInterface {
    /// Encode and send one event to `object`.
    ///
    /// `bound_version` is the version the destination object was bound at.
    /// When the event declares `since` and the bound version is older, this
    /// is a no-op: nothing reaches the wire. Events without `since` ignore
    /// the bound version entirely.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownMessage`] if `event` is not declared by this
    /// interface; arity/kind mismatches and a second fd argument are also
    /// [`ProtocolError`]s. Delivery failures surface as
    /// [`DispatchError::Transport`].
    pub fn emit_event(
        &self,
        conn: &mut dyn Connection,
        object: ObjectId,
        bound_version: u32,
        event: &str,
        args: Vec<ArgValue>,
    ) -> Result<()> {
        let spec = self.event(event).ok_or_else(|| ProtocolError::UnknownMessage {
            interface: self.name.clone(),
            message: event.to_owned(),
        })?;

        if let Some(since) = spec.since {
            if bound_version < since {
                return Ok(());
            }
        }

        let (payload, fd) = spec.encode_args(args)?;
        conn.send_message(OutgoingMessage { object_id: object, opcode: spec.opcode, payload, fd })
            .map_err(DispatchError::from)
    }
}

impl MessageSpec {
    /// Serialize `args` against this spec's declared types.
    ///
    /// This is the runtime stand-in for the static signatures a textual
    /// generator would emit: a value of the wrong kind is rejected before a
    /// single byte is written.
    pub(crate) fn encode_args(
        &self,
        args: Vec<ArgValue>,
    ) -> std::result::Result<(Bytes, Option<OwnedFd>), ProtocolError> {
        if args.len() != self.args.len() {
            return Err(ProtocolError::ArityMismatch {
                interface: self.interface.clone(),
                message: self.name.clone(),
                expected: self.args.len(),
                actual: args.len(),
            });
        }

        let mut w = WireWriter::new();
        let mut fd = None;

        for (index, (spec, value)) in self.args.iter().zip(args).enumerate() {
            match (&spec.ty, value) {
                (WireType::NewId { interface: Some(_) }, ArgValue::NewId(id)) => w.put_object(id),
                (
                    WireType::NewId { interface: None },
                    ArgValue::NewIdUnbound { interface, version, id },
                ) => {
                    w.put_string(&interface);
                    w.put_uint(version);
                    w.put_object(id);
                },
                (WireType::Object { nullable: false }, ArgValue::Object(id)) => w.put_object(id),
                (WireType::Object { nullable: true }, ArgValue::NullableObject(id)) => {
                    w.put_nullable_object(id);
                },
                (WireType::Uint { .. }, ArgValue::Uint(v)) => w.put_uint(v),
                (WireType::Int, ArgValue::Int(v)) => w.put_int(v),
                (WireType::Fixed, ArgValue::Fixed(v)) => w.put_fixed(v),
                (WireType::String { nullable: false }, ArgValue::Str(s)) => w.put_string(&s),
                (WireType::String { nullable: true }, ArgValue::NullableStr(s)) => {
                    w.put_nullable_string(s.as_deref());
                },
                (WireType::Array, ArgValue::Array(data)) => w.put_array(&data),
                (WireType::Fd, ArgValue::Fd(handle)) => {
                    if fd.is_some() {
                        return Err(ProtocolError::TooManyFds);
                    }
                    fd = Some(handle);
                },
                (ty, value) => {
                    return Err(ProtocolError::ArgumentMismatch {
                        interface: self.interface.clone(),
                        message: self.name.clone(),
                        index,
                        expected: ty.expects(),
                        actual: value.kind_name(),
                    });
                },
            }
        }

        Ok((w.finish(), fd))
    }
}
