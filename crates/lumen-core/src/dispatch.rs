//! Request dispatch: wire payload → typed arguments → handler invocation.
//!
//! One [`Dispatcher`] per interface, keyed by opcode over its request table.
//! Decoding walks the payload at a running cursor in declaration order; fd
//! arguments never touch the cursor; they are claimed from the connection's
//! pending ancillary queue, one claim per argument.
//!
//! Requests carry no `since` gate. Unlike events, version compatibility for
//! requests is established at bind time by the session manager; the
//! asymmetry is part of the protocol.

use std::{fmt::Write as _, sync::Arc};

use lumen_proto::{GlobalId, InboundMessage, ObjectId, ProtocolError, WireReader};

use crate::{
    compile::{CompiledInterface, MessageSpec},
    config::DispatchConfig,
    connection::Connection,
    error::Result,
    types::{ArgValue, WireType},
};

/// A registered request handler.
///
/// Invoked with the connection, the target object, and the decoded arguments,
/// in that order. The returned bool is the auto-remove signal: it is
/// consulted only for requests named `release` or `destroy` and ignored for
/// everything else.
pub type RequestHandler =
    Box<dyn Fn(&mut dyn Connection, ObjectId, Vec<ArgValue>) -> Result<bool> + Send + Sync>;

/// Decodes and routes one interface's requests.
pub struct Dispatcher {
    interface: Arc<CompiledInterface>,
    handlers: Vec<Option<RequestHandler>>,
    global: Option<GlobalId>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher with an empty handler table.
    #[must_use]
    pub fn new(interface: Arc<CompiledInterface>, config: DispatchConfig) -> Self {
        let handlers = interface.requests().iter().map(|_| None).collect();
        Self { interface, handlers, global: None, config }
    }

    /// Attach the global id this interface is advertised under.
    ///
    /// Needed only for interfaces whose `release` request unbinds a global;
    /// without it, `release` removes the object but touches no registry.
    #[must_use]
    pub fn with_global(mut self, global: GlobalId) -> Self {
        self.global = Some(global);
        self
    }

    /// Register the handler for a request, by name.
    ///
    /// # Errors
    ///
    /// [`lumen_schema::SchemaError::UnknownRequest`] when the interface
    /// declares no request with that name, a wiring mistake caught at
    /// startup, not at dispatch time.
    pub fn on<F>(&mut self, request: &str, handler: F) -> std::result::Result<(), lumen_schema::SchemaError>
    where
        F: Fn(&mut dyn Connection, ObjectId, Vec<ArgValue>) -> Result<bool> + Send + Sync + 'static,
    {
        let spec = self
            .interface
            .requests()
            .iter()
            .find(|r| r.name == request)
            .ok_or_else(|| lumen_schema::SchemaError::UnknownRequest {
                interface: self.interface.name.clone(),
                request: request.to_owned(),
            })?;
        self.handlers[usize::from(spec.opcode)] = Some(Box::new(handler));
        Ok(())
    }

    /// Decode one inbound request and invoke its handler.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::InvalidOpcode`] for an opcode outside the request
    /// table (fatal to the connection), decoding errors for malformed
    /// payloads, [`ProtocolError::NoPendingFd`] when an fd argument has no
    /// pending descriptor, and whatever the handler itself returns.
    pub fn dispatch(&self, conn: &mut dyn Connection, message: &InboundMessage) -> Result<()> {
        let spec = self.interface.request(message.opcode).ok_or_else(|| {
            ProtocolError::InvalidOpcode {
                interface: self.interface.name.clone(),
                opcode: message.opcode,
                count: self.interface.requests().len(),
            }
        })?;

        let args = decode_args(spec, conn, &message.payload)?;

        if self.config.trace_requests {
            tracing::debug!(
                target: "lumen::dispatch",
                "{}",
                trace_line(spec, message.object_id, &args)
            );
        }

        let handler = self.handlers[usize::from(message.opcode)].as_ref().ok_or_else(|| {
            ProtocolError::UnhandledRequest {
                interface: self.interface.name.clone(),
                request: spec.name.clone(),
            }
        })?;

        let auto_remove = handler(conn, message.object_id, args)?;

        // Lifecycle hooks: the handler decides, the dispatcher cleans up.
        if auto_remove {
            match spec.name.as_str() {
                "destroy" => conn.remove_object(message.object_id),
                "release" => {
                    conn.remove_object(message.object_id);
                    if let Some(global) = self.global {
                        conn.remove_global_bind(global, message.object_id);
                    }
                },
                _ => {},
            }
        }

        Ok(())
    }
}

fn decode_args(
    spec: &MessageSpec,
    conn: &mut dyn Connection,
    payload: &[u8],
) -> Result<Vec<ArgValue>> {
    let mut r = WireReader::new(payload);
    let mut args = Vec::with_capacity(spec.args.len());

    for arg in &spec.args {
        let value = match &arg.ty {
            WireType::NewId { interface: Some(_) } => ArgValue::NewId(r.get_object()?),
            WireType::NewId { interface: None } => ArgValue::NewIdUnbound {
                interface: r.get_string()?,
                version: r.get_uint()?,
                id: r.get_object()?,
            },
            WireType::Object { nullable: false } => ArgValue::Object(r.get_object()?),
            WireType::Object { nullable: true } => {
                ArgValue::NullableObject(r.get_nullable_object()?)
            },
            WireType::Uint { .. } => ArgValue::Uint(r.get_uint()?),
            WireType::Int => ArgValue::Int(r.get_int()?),
            WireType::Fixed => ArgValue::Fixed(r.get_fixed()?),
            WireType::String { nullable: false } => ArgValue::Str(r.get_string()?),
            WireType::String { nullable: true } => ArgValue::NullableStr(r.get_nullable_string()?),
            WireType::Array => ArgValue::Array(r.get_array()?),
            WireType::Fd => ArgValue::Fd(conn.claim_fd()?),
        };
        args.push(value);
    }

    Ok(args)
}

fn trace_line(spec: &MessageSpec, object: ObjectId, args: &[ArgValue]) -> String {
    let mut line = format!("{}@{}.{}(", spec.interface, object, spec.name);
    for (i, (arg, value)) in spec.args.iter().zip(args).enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        match value {
            ArgValue::NewIdUnbound { interface, version, id } => {
                let _ = write!(
                    line,
                    "{n}Interface: {interface:?}, {n}Version: {version}, {n}Id: {id}",
                    n = arg.name
                );
            },
            value => {
                let _ = write!(line, "{}: {}", arg.name, value);
            },
        }
    }
    line.push(')');
    line
}

#[cfg(test)]
mod tests {
    use lumen_proto::Fixed;

    use super::*;

    fn spec(args: Vec<(&str, WireType)>) -> MessageSpec {
        MessageSpec {
            interface: "CellSurface".into(),
            name: "attach".into(),
            opcode: 0,
            since: None,
            args: args
                .into_iter()
                .map(|(name, ty)| crate::compile::ArgSpec { name: name.into(), ty })
                .collect(),
        }
    }

    #[test]
    fn trace_line_matches_original_format() {
        let spec = spec(vec![
            ("buffer", WireType::Object { nullable: true }),
            ("x", WireType::Int),
            ("scale", WireType::Fixed),
        ]);
        let args = vec![
            ArgValue::NullableObject(Some(ObjectId(9))),
            ArgValue::Int(-4),
            ArgValue::Fixed(Fixed::from_f64(1.5)),
        ];
        assert_eq!(
            trace_line(&spec, ObjectId(12), &args),
            "CellSurface@12.attach(buffer: 9, x: -4, scale: 1.5)"
        );
    }

    #[test]
    fn trace_line_expands_unbound_new_id() {
        let spec = spec(vec![("id", WireType::NewId { interface: None })]);
        let args = vec![ArgValue::NewIdUnbound {
            interface: "cell_output".into(),
            version: 3,
            id: ObjectId(7),
        }];
        assert_eq!(
            trace_line(&spec, ObjectId(1), &args),
            "CellSurface@1.attach(idInterface: \"cell_output\", idVersion: 3, idId: 7)"
        );
    }
}
