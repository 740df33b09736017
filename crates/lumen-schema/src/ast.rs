//! The canonical protocol AST.
//!
//! Produced once by [`crate::parse`] and treated as immutable from then on.
//! All `Vec`s preserve document order; for requests and events that order is
//! the opcode assignment and must never change.

/// A parsed protocol document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    /// Protocol name, as declared
    pub name: String,
    /// Copyright text, if the document carries one
    pub copyright: Option<String>,
    /// Interfaces in document order
    pub interfaces: Vec<Interface>,
}

/// A named, versioned group of requests, events, and enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Normalized (capitalized-word) interface name
    pub name: String,
    /// Highest version this interface definition describes
    pub version: u32,
    /// Client-to-server messages; position = opcode
    pub requests: Vec<MessageDecl>,
    /// Server-to-client messages; position = opcode
    pub events: Vec<MessageDecl>,
    /// Enums in document order
    pub enums: Vec<EnumDecl>,
}

/// A request or event declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDecl {
    /// Message name as declared (snake_case)
    pub name: String,
    /// Interface version that introduced this message.
    ///
    /// Parsed for both directions; only event emission gates on it. Request
    /// dispatch deliberately does not: clients are assumed to have
    /// negotiated a compatible version at bind time.
    pub since: Option<u32>,
    /// Description summary, if present
    pub summary: Option<String>,
    /// Arguments in declaration order
    pub args: Vec<Arg>,
}

/// An enum declaration, its name already qualified and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// Qualified normalized name, e.g. `WlOutputTransform`
    pub name: String,
    /// Entries in document order
    pub entries: Vec<EnumEntry>,
}

/// A single enum entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    /// Entry name as declared
    pub name: String,
    /// Literal value, verbatim; may be decimal or bit-flag hex
    pub value: String,
    /// Entry summary, if present
    pub summary: Option<String>,
}

/// A typed message argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// Argument name, sanitized against reserved identifiers
    pub name: String,
    /// Declared kind
    pub kind: ArgKind,
}

/// The closed set of argument kinds.
///
/// Every consumption site matches exhaustively on this enum; adding a kind
/// must fail to compile until each match is extended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgKind {
    /// A newly created object. With an `interface` attribute the id binds to
    /// that interface; without one, the client names the interface on the
    /// wire (unbound form: interface string, version, id).
    NewId {
        /// Normalized target interface, if declared
        interface: Option<String>,
    },
    /// A reference to an existing object.
    Object {
        /// Normalized target interface, if declared
        interface: Option<String>,
        /// Whether id 0 ("no object") is permitted
        allow_null: bool,
    },
    /// An unsigned 32-bit integer, optionally typed by an enum.
    Uint {
        /// Qualified normalized enum name, if declared
        enum_ref: Option<String>,
    },
    /// A signed 32-bit integer.
    Int,
    /// A text string.
    String {
        /// Whether a null string is permitted
        allow_null: bool,
    },
    /// A file descriptor, transferred out of band.
    Fd,
    /// A signed 24.8 fixed-point number.
    Fixed,
    /// An opaque byte sequence.
    Array,
}
