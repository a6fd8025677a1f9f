//! The option vocabulary of spec §6. Since this generator is a filter
//! process with no user-facing flags, every one of these is read off the
//! descriptor itself rather than from a builder API (contrast
//! `prost_build::Config`, which is populated by the caller's `build.rs`).
//!
//! Real extension fields require a compiled extension descriptor, which
//! this generator (consistent with its Non-goals) does not parse; instead
//! options are read the way any protoc plugin reads options it has no
//! compiled extension for: out of `uninterpreted_option`, matched by
//! dotted name.

use prost_types::{FieldOptions, FileOptions, MessageOptions, UninterpretedOption};

/// File-level or message-level switches from spec §6. A field's absence
/// means "not overridden"; `*_all` options apply to every message in the
/// file unless the message turns them off individually (not modeled here,
/// since spec.md does not specify a per-message override syntax beyond
/// the `*_all` names themselves).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub marshaler: bool,
    pub unmarshaler: bool,
    pub sizer: bool,
    pub stringer: bool,
    pub face: bool,
    pub testgen: bool,
    pub benchgen: bool,
    pub goproto_getters: bool,
    pub goproto_stringer: bool,
}

fn uninterpreted_bool(opts: &[UninterpretedOption], name: &str) -> bool {
    opts.iter().any(|opt| {
        let dotted = opt
            .name
            .iter()
            .map(|part| part.name_part.as_str())
            .collect::<Vec<_>>()
            .join(".");
        if dotted != name {
            return false;
        }
        match (&opt.identifier_value, opt.positive_int_value) {
            (Some(ident), _) => ident == "true",
            (None, Some(n)) => n != 0,
            _ => true, // bare presence is treated as "on"
        }
    })
}

/// Looks up an option that may be absent; distinguishes "not set" from
/// "set to false", which `uninterpreted_bool` collapses together. Used
/// for `nullable`, whose default (`true`) differs from every other
/// switch's default (`false`).
fn uninterpreted_opt_bool(opts: &[UninterpretedOption], name: &str) -> Option<bool> {
    opts.iter().find_map(|opt| {
        let dotted = opt
            .name
            .iter()
            .map(|part| part.name_part.as_str())
            .collect::<Vec<_>>()
            .join(".");
        if dotted != name {
            return None;
        }
        Some(match (&opt.identifier_value, opt.positive_int_value) {
            (Some(ident), _) => ident == "true",
            (None, Some(n)) => n != 0,
            _ => true,
        })
    })
}

fn uninterpreted_string(opts: &[UninterpretedOption], name: &str) -> Option<String> {
    opts.iter().find_map(|opt| {
        let dotted = opt
            .name
            .iter()
            .map(|part| part.name_part.as_str())
            .collect::<Vec<_>>()
            .join(".");
        if dotted != name {
            return None;
        }
        opt.string_value
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    })
}

/// Per-field options (spec §6): `customtype`, `embed`, `nullable`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    pub custom_type: Option<String>,
    pub embed: bool,
    pub nullable: bool,
}

/// Reads a field's `customtype`/`embed`/`nullable` options straight off
/// its `uninterpreted_option` list, the same way `file_options`/
/// `message_options` do for message-level switches. `nullable` defaults
/// to `true` when unset (spec §3: singular message fields are nullable
/// unless told otherwise).
pub fn field_options(options: Option<&FieldOptions>) -> FieldOverrides {
    let opts = options
        .map(|o| o.uninterpreted_option.as_slice())
        .unwrap_or(&[]);
    FieldOverrides {
        custom_type: uninterpreted_string(opts, "customtype"),
        embed: uninterpreted_bool(opts, "embed"),
        nullable: uninterpreted_opt_bool(opts, "nullable").unwrap_or(true),
    }
}

/// Extracts the `*_all` switches that apply to every message in a file.
pub fn file_options(options: Option<&FileOptions>) -> Options {
    let opts = options
        .map(|o| o.uninterpreted_option.as_slice())
        .unwrap_or(&[]);
    Options {
        marshaler: uninterpreted_bool(opts, "marshaler_all"),
        unmarshaler: uninterpreted_bool(opts, "unmarshaler_all"),
        sizer: uninterpreted_bool(opts, "sizer_all"),
        stringer: uninterpreted_bool(opts, "stringer_all"),
        face: uninterpreted_bool(opts, "face_all"),
        testgen: uninterpreted_bool(opts, "testgen_all"),
        benchgen: uninterpreted_bool(opts, "benchgen_all"),
        goproto_getters: uninterpreted_bool(opts, "goproto_getters_all"),
        goproto_stringer: uninterpreted_bool(opts, "goproto_stringer_all"),
    }
}

/// Merges file-level defaults with a message's own overrides: a `true`
/// at either level turns the feature on (there is no way to opt a single
/// message back out of an `*_all` switch in spec.md's vocabulary).
pub fn message_options(file_defaults: Options, options: Option<&MessageOptions>) -> Options {
    let opts = options
        .map(|o| o.uninterpreted_option.as_slice())
        .unwrap_or(&[]);
    Options {
        marshaler: file_defaults.marshaler || uninterpreted_bool(opts, "marshaler"),
        unmarshaler: file_defaults.unmarshaler || uninterpreted_bool(opts, "unmarshaler"),
        sizer: file_defaults.sizer || uninterpreted_bool(opts, "sizer"),
        stringer: file_defaults.stringer || uninterpreted_bool(opts, "stringer"),
        face: file_defaults.face || uninterpreted_bool(opts, "face"),
        testgen: file_defaults.testgen || uninterpreted_bool(opts, "testgen"),
        benchgen: file_defaults.benchgen || uninterpreted_bool(opts, "benchgen"),
        goproto_getters: file_defaults.goproto_getters
            || uninterpreted_bool(opts, "goproto_getters"),
        goproto_stringer: file_defaults.goproto_stringer
            || uninterpreted_bool(opts, "goproto_stringer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::uninterpreted_option::NamePart;

    fn opt(name: &str, identifier_value: Option<&str>) -> UninterpretedOption {
        UninterpretedOption {
            name: vec![NamePart {
                name_part: name.to_string(),
                is_extension: false,
            }],
            identifier_value: identifier_value.map(str::to_string),
            positive_int_value: None,
            negative_int_value: None,
            double_value: None,
            string_value: None,
            aggregate_value: None,
        }
    }

    #[test]
    fn reads_true_identifier_value() {
        let opts = vec![opt("marshaler_all", Some("true"))];
        assert!(uninterpreted_bool(&opts, "marshaler_all"));
        assert!(!uninterpreted_bool(&opts, "unmarshaler_all"));
    }

    #[test]
    fn message_override_adds_to_file_default() {
        let file_defaults = Options {
            marshaler: true,
            ..Options::default()
        };
        let message_opts = MessageOptions {
            uninterpreted_option: vec![opt("stringer", Some("true"))],
            ..Default::default()
        };
        let merged = message_options(file_defaults, Some(&message_opts));
        assert!(merged.marshaler);
        assert!(merged.stringer);
        assert!(!merged.unmarshaler);
    }

    #[test]
    fn unknown_options_are_ignored() {
        let opts = vec![opt("some_future_option", Some("true"))];
        assert!(!uninterpreted_bool(&opts, "marshaler_all"));
    }
}
