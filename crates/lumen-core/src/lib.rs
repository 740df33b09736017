//! # lumen-core: the protocol compiler
//!
//! This crate turns a parsed protocol schema into runnable marshal and
//! dispatch logic. Compilation happens once, offline, and is deterministic:
//! a pure function from schema to compiled tables:
//!
//! ```text
//!  lumen-schema AST
//!        │ compile()            (offline, validates every reference)
//!        ▼
//!  CompiledProtocol ── CompiledInterface ── MessageSpec (opcode-indexed)
//!        │                                      │
//!        │ emit_event()                         │ Dispatcher::dispatch()
//!        ▼                                      ▼
//!  OutgoingMessage ──► Connection::send   handler(conn, object, args)
//! ```
//!
//! The compiled tables are interpreted at runtime rather than rendered to
//! source text; the wire contract is identical either way. Generated encoders and
//! the dispatcher hold no mutable state and take no locks; they may run in
//! whatever per-connection context the session manager uses, as long as one
//! connection's messages are processed in arrival order.
//!
//! The session manager stays on the other side of the [`Connection`] trait:
//! it owns object tables, global registries, and the socket; this crate only
//! reads and writes through that narrow capability surface.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod compile;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod types;

pub use compile::{compile, ArgSpec, CompiledInterface, CompiledProtocol, MessageSpec};
pub use config::DispatchConfig;
pub use connection::Connection;
pub use dispatch::{Dispatcher, RequestHandler};
pub use error::DispatchError;
pub use types::{ArgValue, WireType};
