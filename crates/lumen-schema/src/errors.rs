//! Error types for schema parsing and reference resolution.
//!
//! Every `SchemaError` is raised at generation time and is fatal to the
//! build step: there is no partial output to recover.

use thiserror::Error;

/// Parse or validation failure in a protocol schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Document bytes are not UTF-8 text
    #[error("schema document is not valid UTF-8")]
    NotUtf8,

    /// Document is not well-formed XML (message from the XML parser)
    #[error("malformed schema document: {0}")]
    Malformed(String),

    /// Document root element is not `<protocol>`
    #[error("expected <protocol> document root, found <{0}>")]
    UnexpectedRoot(String),

    /// A required attribute is absent
    #[error("missing attribute {attribute:?} on <{element}>")]
    MissingAttribute {
        /// Element that lacks the attribute
        element: &'static str,
        /// Attribute name expected
        attribute: &'static str,
    },

    /// A numeric attribute failed to parse
    #[error("<{element} name={name:?}>: attribute {attribute:?} value {value:?} is not a number")]
    InvalidNumber {
        /// Element carrying the attribute
        element: &'static str,
        /// Declared name of the element
        name: String,
        /// Attribute that failed to parse
        attribute: &'static str,
        /// Offending value
        value: String,
    },

    /// Two interfaces share a name within one protocol
    #[error("duplicate interface name {0:?}")]
    DuplicateInterface(String),

    /// An argument declared a type outside the recognized set
    #[error("{interface}.{message}: argument {arg:?} has unknown type {ty:?}")]
    UnknownArgType {
        /// Owning interface (normalized name)
        interface: String,
        /// Request or event the argument belongs to
        message: String,
        /// Argument name
        arg: String,
        /// Unrecognized type string
        ty: String,
    },

    /// An `interface` attribute names an undeclared interface
    #[error("unresolved interface reference {0:?}")]
    UnresolvedInterface(String),

    /// An `enum` attribute names an undeclared enum
    #[error("unresolved enum reference {0:?}")]
    UnresolvedEnum(String),

    /// Handler registration named a request the interface does not declare
    #[error("{interface} declares no request named {request:?}")]
    UnknownRequest {
        /// Interface the registration targeted
        interface: String,
        /// Request name that failed to resolve
        request: String,
    },
}

impl From<roxmltree::Error> for SchemaError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Convenient Result alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
