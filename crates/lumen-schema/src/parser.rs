//! Schema document parsing.
//!
//! The parser walks the XML tree once, in document order, converting each
//! element into its AST node. Unknown elements (descriptions aside) are
//! skipped; unknown argument *types* are a hard error carrying the interface
//! and message they occurred in.

use roxmltree::{Document, Node};

use crate::{
    ast::{Arg, ArgKind, EnumDecl, EnumEntry, Interface, MessageDecl, Protocol},
    errors::{Result, SchemaError},
    names,
};

/// Parse a protocol schema document.
///
/// # Errors
///
/// Returns [`SchemaError`] on non-UTF-8 input, malformed XML, a root element
/// other than `<protocol>`, missing or non-numeric required attributes,
/// duplicate interface names, or an argument type outside the recognized
/// set. A failed parse produces nothing; there is no partial AST.
pub fn parse(document: &[u8]) -> Result<Protocol> {
    let text = std::str::from_utf8(document).map_err(|_| SchemaError::NotUtf8)?;
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    if root.tag_name().name() != "protocol" {
        return Err(SchemaError::UnexpectedRoot(root.tag_name().name().to_owned()));
    }

    let name = required_attr(root, "protocol", "name")?.to_owned();
    let mut copyright = None;
    let mut interfaces: Vec<Interface> = Vec::new();

    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "copyright" => {
                copyright = child.text().map(|t| t.trim().to_owned());
            },
            "interface" => {
                let interface = parse_interface(child)?;
                if interfaces.iter().any(|i| i.name == interface.name) {
                    return Err(SchemaError::DuplicateInterface(interface.name));
                }
                interfaces.push(interface);
            },
            _ => {},
        }
    }

    Ok(Protocol { name, copyright, interfaces })
}

fn parse_interface(node: Node<'_, '_>) -> Result<Interface> {
    let raw_name = required_attr(node, "interface", "name")?;
    let name = names::pascal_case(raw_name);
    let version = numeric_attr(node, "interface", raw_name, "version")?
        .ok_or(SchemaError::MissingAttribute { element: "interface", attribute: "version" })?;

    let mut requests = Vec::new();
    let mut events = Vec::new();
    let mut enums = Vec::new();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "request" => requests.push(parse_message(raw_name, &name, "request", child)?),
            "event" => events.push(parse_message(raw_name, &name, "event", child)?),
            "enum" => enums.push(parse_enum(raw_name, child)?),
            _ => {},
        }
    }

    Ok(Interface { name, version, requests, events, enums })
}

fn parse_message(
    iface_raw: &str,
    iface_name: &str,
    element: &'static str,
    node: Node<'_, '_>,
) -> Result<MessageDecl> {
    let name = required_attr(node, element, "name")?.to_owned();
    let since = numeric_attr(node, element, &name, "since")?;
    let mut summary = None;
    let mut args = Vec::new();

    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "description" => summary = child.attribute("summary").map(str::to_owned),
            "arg" => args.push(parse_arg(iface_raw, iface_name, &name, child)?),
            _ => {},
        }
    }

    Ok(MessageDecl { name, since, summary, args })
}

fn parse_arg(
    iface_raw: &str,
    iface_name: &str,
    message: &str,
    node: Node<'_, '_>,
) -> Result<Arg> {
    let raw_name = required_attr(node, "arg", "name")?;
    let name = names::sanitize_arg_name(raw_name);
    let ty = required_attr(node, "arg", "type")?;

    let interface = node.attribute("interface").map(names::pascal_case);
    let allow_null = node.attribute("allow-null") == Some("true");
    let enum_ref = node.attribute("enum").map(|e| names::qualify_enum(iface_raw, e));

    let kind = match ty {
        "new_id" => ArgKind::NewId { interface },
        "object" => ArgKind::Object { interface, allow_null },
        "uint" => ArgKind::Uint { enum_ref },
        "int" => ArgKind::Int,
        "string" => ArgKind::String { allow_null },
        "fd" => ArgKind::Fd,
        "fixed" => ArgKind::Fixed,
        "array" => ArgKind::Array,
        other => {
            return Err(SchemaError::UnknownArgType {
                interface: iface_name.to_owned(),
                message: message.to_owned(),
                arg: name,
                ty: other.to_owned(),
            });
        },
    };

    Ok(Arg { name, kind })
}

fn parse_enum(iface_raw: &str, node: Node<'_, '_>) -> Result<EnumDecl> {
    let raw_name = required_attr(node, "enum", "name")?;
    let name = names::qualify_enum(iface_raw, raw_name);
    let mut entries = Vec::new();

    for child in node.children().filter(Node::is_element) {
        if child.tag_name().name() == "entry" {
            entries.push(EnumEntry {
                name: required_attr(child, "entry", "name")?.to_owned(),
                value: required_attr(child, "entry", "value")?.to_owned(),
                summary: child.attribute("summary").map(str::to_owned),
            });
        }
    }

    Ok(EnumDecl { name, entries })
}

fn required_attr<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str> {
    node.attribute(attribute)
        .ok_or(SchemaError::MissingAttribute { element, attribute })
}

fn numeric_attr(
    node: Node<'_, '_>,
    element: &'static str,
    name: &str,
    attribute: &'static str,
) -> Result<Option<u32>> {
    match node.attribute(attribute) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| SchemaError::InvalidNumber {
            element,
            name: name.to_owned(),
            attribute,
            value: value.to_owned(),
        }),
    }
}
