//! Pure, deterministic identifier derivation (spec §4.2). Nothing here
//! consults the descriptor tree or does I/O.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Converts a `lower_snake` or `camelCase` identifier to `CamelCase`,
/// preserving the parser's own initialisms the way `heck` does (it does
/// not re-split already-capitalized runs).
pub fn camel(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Concatenates `camel` of each path segment with no separator, e.g.
/// `["outer", "inner"]` -> `"OuterInner"`.
pub fn camel_slice(path: &[String]) -> String {
    path.iter().map(|s| camel(s)).collect()
}

/// Rust-style `lower_snake` field identifier, with a `r#` prefix if it
/// collides with a keyword.
pub fn snake(name: &str) -> String {
    let ident = name.to_snake_case();
    match ident.as_str() {
        "abstract" | "alignof" | "as" | "become" | "box" | "break" | "const" | "continue"
        | "crate" | "do" | "else" | "enum" | "extern" | "false" | "final" | "fn" | "for"
        | "if" | "impl" | "in" | "let" | "loop" | "macro" | "match" | "mod" | "move" | "mut"
        | "offsetof" | "override" | "priv" | "proc" | "pub" | "pure" | "ref" | "return"
        | "self" | "sizeof" | "static" | "struct" | "super" | "trait" | "true" | "type"
        | "typeof" | "unsafe" | "unsized" | "use" | "virtual" | "where" | "while" | "yield" => {
            format!("r#{ident}")
        }
        _ => ident,
    }
}

/// The companion "is-set" boolean for a singular optional field, e.g.
/// `xxx_IsFooSet` for a field named `foo`.
pub fn setter_flag(field_name: &str) -> String {
    format!("xxx_Is{}Set", camel(field_name))
}

/// The companion length counter for a repeated field, e.g. `xxx_LenFoo`.
pub fn length_counter(field_name: &str) -> String {
    format!("xxx_Len{}", camel(field_name))
}

/// A short, file-scoped suffix appended to per-file helper function names
/// so that two generated files sharing an output package don't collide
/// (spec §4.2, §9 "Per-file helper names"). Derived from the file's own
/// name with non-identifier characters stripped, lower-cased.
pub fn file_local(file_name: &str) -> String {
    let stem = file_name
        .rsplit('/')
        .next()
        .unwrap_or(file_name)
        .trim_end_matches(".proto");
    let mut out = String::new();
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push_str("file");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_converts_snake_case() {
        assert_eq!(camel("foo_bar"), "FooBar");
        assert_eq!(camel("fooBar"), "FooBar");
    }

    #[test]
    fn camel_slice_concatenates_path_segments() {
        assert_eq!(
            camel_slice(&["outer".to_string(), "inner".to_string()]),
            "OuterInner"
        );
    }

    #[test]
    fn snake_escapes_keywords() {
        assert_eq!(snake("Type"), "type");
        assert_eq!(snake("self"), "r#self");
        assert_eq!(snake("While"), "r#while");
    }

    #[test]
    fn companion_names_follow_convention() {
        assert_eq!(setter_flag("foo"), "xxx_IsFooSet");
        assert_eq!(length_counter("items"), "xxx_LenItems");
    }

    #[test]
    fn file_local_strips_extension_and_path() {
        assert_eq!(file_local("path/to/my_file.proto"), "my_file");
        assert_eq!(file_local("test.proto"), "test");
        assert_eq!(file_local("weird name!.proto"), "weird_name_");
    }
}
