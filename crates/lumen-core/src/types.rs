//! The type mapper: schema argument kinds to wire types and runtime values.
//!
//! [`WireType`] is what a schema [`ArgKind`] compiles down to once its
//! references are resolved; [`ArgValue`] is the in-memory representation
//! that flows between handlers, encoders, and decoders. Both are closed
//! sums: every consumption site matches exhaustively, so adding a kind
//! fails to compile until each site is updated.

use std::{
    collections::HashSet,
    fmt,
    os::fd::{AsRawFd, OwnedFd},
};

use lumen_proto::{Fixed, ObjectId};
use lumen_schema::{ArgKind, SchemaError};

/// Index of declared names used to validate references at compile time.
#[derive(Debug, Default)]
pub(crate) struct NameIndex {
    pub(crate) interfaces: HashSet<String>,
    pub(crate) enums: HashSet<String>,
}

/// A fully resolved argument type: how it looks on the wire and in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireType {
    /// 4-byte id of a newly created object when `interface` is bound;
    /// otherwise three fields (interface name string, version, id).
    NewId {
        /// Target interface, when the schema binds one
        interface: Option<String>,
    },
    /// 4-byte id of an existing object; 0 permitted only when nullable.
    Object {
        /// Whether "no object" (id 0) is a legal value
        nullable: bool,
    },
    /// 4-byte unsigned integer, optionally carrying an enum's values.
    Uint {
        /// Resolved qualified enum name, when the schema types the value
        enum_ref: Option<String>,
    },
    /// 4-byte signed integer.
    Int,
    /// Length-prefixed, NUL-terminated, padded text.
    String {
        /// Whether a null string (length 0) is a legal value
        nullable: bool,
    },
    /// One ancillary descriptor, nothing inline.
    Fd,
    /// 4-byte signed 24.8 fixed-point.
    Fixed,
    /// Length-prefixed, padded byte sequence.
    Array,
}

impl WireType {
    /// Resolve a schema argument kind, validating its references.
    pub(crate) fn resolve(kind: &ArgKind, names: &NameIndex) -> Result<Self, SchemaError> {
        Ok(match kind {
            ArgKind::NewId { interface } => Self::NewId {
                interface: resolve_interface(interface.as_deref(), names)?,
            },
            ArgKind::Object { interface, allow_null } => {
                // The reference constrains which ids are legal; on the wire
                // the id alone is carried either way.
                resolve_interface(interface.as_deref(), names)?;
                Self::Object { nullable: *allow_null }
            },
            ArgKind::Uint { enum_ref } => {
                if let Some(name) = enum_ref {
                    if !names.enums.contains(name) {
                        return Err(SchemaError::UnresolvedEnum(name.clone()));
                    }
                }
                Self::Uint { enum_ref: enum_ref.clone() }
            },
            ArgKind::Int => Self::Int,
            ArgKind::String { allow_null } => Self::String { nullable: *allow_null },
            ArgKind::Fd => Self::Fd,
            ArgKind::Fixed => Self::Fixed,
            ArgKind::Array => Self::Array,
        })
    }

    /// Human-readable name of the value kind this type expects, for
    /// mismatch diagnostics.
    pub(crate) fn expects(&self) -> &'static str {
        match self {
            Self::NewId { interface: Some(_) } => "new id",
            Self::NewId { interface: None } => "unbound new id",
            Self::Object { nullable: false } => "object",
            Self::Object { nullable: true } => "nullable object",
            Self::Uint { .. } => "uint",
            Self::Int => "int",
            Self::String { nullable: false } => "string",
            Self::String { nullable: true } => "nullable string",
            Self::Fd => "fd",
            Self::Fixed => "fixed",
            Self::Array => "array",
        }
    }
}

fn resolve_interface(
    interface: Option<&str>,
    names: &NameIndex,
) -> Result<Option<String>, SchemaError> {
    match interface {
        None => Ok(None),
        Some(name) if names.interfaces.contains(name) => Ok(Some(name.to_owned())),
        Some(name) => Err(SchemaError::UnresolvedInterface(name.to_owned())),
    }
}

/// A decoded or to-be-encoded argument value.
///
/// Descriptor values own their fd: claiming one from the connection moves it
/// here, handing the value to an encoder moves it into the outgoing message.
#[derive(Debug)]
pub enum ArgValue {
    /// Id of a newly created object bound to a known interface
    NewId(ObjectId),
    /// Unbound new-object triple: the client names the interface
    NewIdUnbound {
        /// Requested interface name, as sent
        interface: String,
        /// Requested version
        version: u32,
        /// Id the client allocated
        id: ObjectId,
    },
    /// Reference to an existing object
    Object(ObjectId),
    /// Nullable reference; wire value 0 is `None`
    NullableObject(Option<ObjectId>),
    /// Unsigned integer or enum value
    Uint(u32),
    /// Signed integer
    Int(i32),
    /// 24.8 fixed-point
    Fixed(Fixed),
    /// Text
    Str(String),
    /// Nullable text
    NullableStr(Option<String>),
    /// Opaque bytes
    Array(Vec<u8>),
    /// Owned file descriptor, transferred out of band
    Fd(OwnedFd),
}

impl ArgValue {
    /// Human-readable name of this value's kind, for mismatch diagnostics.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::NewId(_) => "new id",
            Self::NewIdUnbound { .. } => "unbound new id",
            Self::Object(_) => "object",
            Self::NullableObject(_) => "nullable object",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::Fixed(_) => "fixed",
            Self::Str(_) => "string",
            Self::NullableStr(_) => "nullable string",
            Self::Array(_) => "array",
            Self::Fd(_) => "fd",
        }
    }
}

impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NewId(a), Self::NewId(b)) | (Self::Object(a), Self::Object(b)) => a == b,
            (
                Self::NewIdUnbound { interface: ai, version: av, id: aid },
                Self::NewIdUnbound { interface: bi, version: bv, id: bid },
            ) => ai == bi && av == bv && aid == bid,
            (Self::NullableObject(a), Self::NullableObject(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::NullableStr(a), Self::NullableStr(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Fd(a), Self::Fd(b)) => a.as_raw_fd() == b.as_raw_fd(),
            _ => false,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewId(id) | Self::Object(id) => write!(f, "{id}"),
            Self::NewIdUnbound { interface, version, id } => {
                write!(f, "{interface} v{version} {id}")
            },
            Self::NullableObject(Some(id)) => write!(f, "{id}"),
            Self::NullableObject(None) => write!(f, "null"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Fixed(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::NullableStr(Some(s)) => write!(f, "{s:?}"),
            Self::NullableStr(None) => write!(f, "null"),
            Self::Array(a) => write!(f, "array[{}]", a.len()),
            Self::Fd(_) => write!(f, "fd"),
        }
    }
}
