//! # lumen-schema: protocol schema parsing
//!
//! Parses a declarative protocol schema document (XML) into a canonical AST:
//! protocol → interfaces → requests/events/enums → typed arguments.
//!
//! The AST is produced once, offline, from an immutable document and never
//! mutated afterwards. Two properties of the document are load-bearing and
//! preserved exactly:
//!
//! - **Order is the wire contract.** The zero-based position of a request or
//!   event within its interface IS its opcode. Nothing here sorts, dedups, or
//!   otherwise reorders declarations.
//!
//! - **Enum literals are verbatim.** Entry values may be decimal or bit-flag
//!   hex; they are kept as written, not renormalized.
//!
//! Names are normalized at parse time: interface and enum names become
//! capitalized-word identifiers, bare enum references are qualified with
//! their owning interface, and argument names that would collide with
//! generated identifiers are remapped (see [`names`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod errors;
pub mod names;
pub mod parser;

pub use ast::{Arg, ArgKind, EnumDecl, EnumEntry, Interface, MessageDecl, Protocol};
pub use errors::{Result, SchemaError};
pub use parser::parse;
