//! Protocol compilation: AST → opcode-indexed spec tables.
//!
//! [`compile`] is the generation step. It runs once, offline, validates
//! every cross-reference in the schema, and produces immutable tables that
//! the marshal and dispatch paths interpret. Nothing here is touched again
//! after startup, so the tables are freely shared across connections.

use std::{collections::HashMap, sync::Arc};

use lumen_schema::{EnumDecl, Protocol, SchemaError};

use crate::types::{NameIndex, WireType};

/// A compiled protocol: every interface resolved and opcode-indexed.
#[derive(Debug)]
pub struct CompiledProtocol {
    /// Protocol name, as declared
    pub name: String,
    /// Copyright text carried over from the schema
    pub copyright: Option<String>,
    interfaces: Vec<Arc<CompiledInterface>>,
    by_name: HashMap<String, usize>,
}

impl CompiledProtocol {
    /// Look up an interface by its normalized name.
    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&Arc<CompiledInterface>> {
        self.by_name.get(name).map(|&idx| &self.interfaces[idx])
    }

    /// All interfaces, in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> &[Arc<CompiledInterface>] {
        &self.interfaces
    }
}

/// One interface's compiled tables.
#[derive(Debug)]
pub struct CompiledInterface {
    /// Normalized interface name
    pub name: String,
    /// Declared version
    pub version: u32,
    requests: Vec<MessageSpec>,
    events: Vec<MessageSpec>,
    /// Enum declarations, entries verbatim
    pub enums: Vec<EnumDecl>,
}

impl CompiledInterface {
    /// The request table; position = opcode.
    #[must_use]
    pub fn requests(&self) -> &[MessageSpec] {
        &self.requests
    }

    /// The event table; position = opcode.
    #[must_use]
    pub fn events(&self) -> &[MessageSpec] {
        &self.events
    }

    /// Look up a request by opcode.
    #[must_use]
    pub fn request(&self, opcode: u16) -> Option<&MessageSpec> {
        self.requests.get(usize::from(opcode))
    }

    /// Look up an event by name.
    #[must_use]
    pub fn event(&self, name: &str) -> Option<&MessageSpec> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// A compiled request or event: resolved argument types plus its opcode.
#[derive(Debug)]
pub struct MessageSpec {
    /// Owning interface's normalized name
    pub interface: String,
    /// Message name as declared
    pub name: String,
    /// Position in the owning table, which is the wire opcode
    pub opcode: u16,
    /// Version gate, meaningful for events only
    pub since: Option<u32>,
    /// Resolved arguments in declaration order
    pub args: Vec<ArgSpec>,
}

/// One resolved argument.
#[derive(Debug)]
pub struct ArgSpec {
    /// Argument name, sanitized
    pub name: String,
    /// Resolved wire type
    pub ty: WireType,
}

/// Compile a parsed protocol into spec tables.
///
/// # Errors
///
/// Returns [`SchemaError`] when an `interface` or `enum` reference does not
/// resolve to a declaration. Resolution failures surface here, at
/// generation time, never during dispatch.
pub fn compile(ast: &Protocol) -> Result<CompiledProtocol, SchemaError> {
    let mut names = NameIndex::default();
    for interface in &ast.interfaces {
        names.interfaces.insert(interface.name.clone());
        for decl in &interface.enums {
            names.enums.insert(decl.name.clone());
        }
    }

    let mut interfaces = Vec::with_capacity(ast.interfaces.len());
    let mut by_name = HashMap::with_capacity(ast.interfaces.len());

    for interface in &ast.interfaces {
        let compiled = CompiledInterface {
            name: interface.name.clone(),
            version: interface.version,
            requests: compile_messages(&interface.name, &interface.requests, &names)?,
            events: compile_messages(&interface.name, &interface.events, &names)?,
            enums: interface.enums.clone(),
        };
        by_name.insert(compiled.name.clone(), interfaces.len());
        interfaces.push(Arc::new(compiled));
    }

    Ok(CompiledProtocol {
        name: ast.name.clone(),
        copyright: ast.copyright.clone(),
        interfaces,
        by_name,
    })
}

fn compile_messages(
    interface: &str,
    decls: &[lumen_schema::MessageDecl],
    names: &NameIndex,
) -> Result<Vec<MessageSpec>, SchemaError> {
    decls
        .iter()
        .enumerate()
        .map(|(opcode, decl)| {
            let args = decl
                .args
                .iter()
                .map(|arg| {
                    Ok(ArgSpec {
                        name: arg.name.clone(),
                        ty: WireType::resolve(&arg.kind, names)?,
                    })
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;

            Ok(MessageSpec {
                interface: interface.to_owned(),
                name: decl.name.clone(),
                opcode: opcode as u16,
                since: decl.since,
                args,
            })
        })
        .collect()
}
