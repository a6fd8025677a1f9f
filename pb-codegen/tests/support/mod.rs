//! Shared fixture builders for the emitter integration tests. Kept under
//! `tests/support` (a directory, not a top-level `tests/*.rs` file) so
//! cargo doesn't treat it as its own test binary.

use pb_codegen::descriptor::{
    ExtensionRepr, FieldDescriptor, FieldType, FileDescriptor, Label, MessageDescriptor,
};

pub fn field(name: &str, tag: u32, field_type: FieldType, label: Label, packed: bool) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        tag,
        label,
        field_type,
        packed,
        custom_type: None,
        embed: false,
        nullable: true,
    }
}

pub fn message(path: &[&str], fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    MessageDescriptor {
        path: path.iter().map(|s| s.to_string()).collect(),
        fields,
        extension_ranges: vec![],
        extension_repr: None,
        is_marshaler: true,
        is_unmarshaler: true,
        is_stringer: true,
        is_face: true,
        has_testgen: true,
        has_benchgen: false,
        has_verbose_equal: false,
        goproto_getters_disabled: false,
    }
}

pub fn message_with_extensions(path: &[&str], fields: Vec<FieldDescriptor>, ranges: Vec<(i32, i32)>) -> MessageDescriptor {
    let mut m = message(path, fields);
    m.extension_ranges = ranges;
    m.extension_repr = Some(ExtensionRepr::Bytes);
    m.is_face = false;
    m
}

pub fn file(package: &str, local_name: &str, messages: Vec<MessageDescriptor>) -> FileDescriptor {
    FileDescriptor {
        package: package.to_string(),
        local_name: local_name.to_string(),
        messages,
    }
}

/// A small two-message schema exercising every field shape the
/// accessor/marshal/unmarshal plugins distinguish: a singular scalar, a
/// singular message (self-recursive, so it must come out boxed), a
/// packed repeated scalar, and an unpacked repeated scalar.
pub fn sample_file() -> FileDescriptor {
    let tree = message(
        &["Tree"],
        vec![
            field("value", 1, FieldType::Int32, Label::Optional, false),
            field(
                "child",
                2,
                FieldType::Message(".sample.Tree".to_string()),
                Label::Optional,
                false,
            ),
        ],
    );
    let counters = message(
        &["Counters"],
        vec![
            field("packed", 1, FieldType::Int32, Label::Repeated, true),
            field("unpacked", 2, FieldType::Int32, Label::Repeated, false),
            field("label", 3, FieldType::String, Label::Optional, false),
        ],
    );
    file("sample", "sample_proto", vec![tree, counters])
}
