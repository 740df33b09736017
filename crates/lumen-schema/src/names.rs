//! Identifier normalization rules.
//!
//! Schema names arrive in `snake_case` (interfaces, enums) or may be dotted
//! (`other_iface.enum_name`). Normalized names are capitalized-word
//! identifiers: split on underscores and dots, capitalize the first letter of
//! each segment, lowercase the rest, join.

/// Normalize a schema name to a capitalized-word identifier.
///
/// `wl_output` → `WlOutput`, `zxdg_surface.error` → `ZxdgSurfaceError`.
#[must_use]
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split(['_', '.']).filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

/// Resolve an enum reference to its qualified, normalized name.
///
/// Bare names belong to the owning interface and are qualified with it
/// before normalization; dotted names are used as given.
#[must_use]
pub fn qualify_enum(owning_interface: &str, enum_ref: &str) -> String {
    if enum_ref.contains('.') {
        pascal_case(enum_ref)
    } else {
        pascal_case(&format!("{owning_interface}.{enum_ref}"))
    }
}

/// Remap argument names that collide with generated identifiers.
#[must_use]
pub fn sanitize_arg_name(name: &str) -> String {
    match name {
        "interface" | "class" | "make" => format!("{name}_"),
        _ => name.to_owned(),
    }
}
