//! Protocol object and global identifiers.

use std::fmt;

/// A 32-bit identifier naming a protocol object, scoped to one connection.
///
/// The wire value 0 is reserved: it encodes "no object" for nullable
/// references and never names a live object. Interface typing is dynamic
/// under runtime interpretation: the dispatcher that decodes an id knows
/// which interface owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// The raw wire value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this is the reserved null id.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a globally advertised interface in the registry.
///
/// The session manager assigns global ids when it advertises interfaces;
/// this core only echoes them back when a `release` request unbinds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalId(pub u32);

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
