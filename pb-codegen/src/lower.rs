//! Lowers the raw `prost_types::FileDescriptorProto` the host delivers
//! into this crate's own [`descriptor`] model. This is the one place that
//! reaches into the wire-format descriptor proto directly; every emitter
//! downstream works only with [`descriptor::FileDescriptor`].

use prost_types::field_descriptor_proto::{Label as ProtoLabel, Type as ProtoType};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use crate::config::{self, Options};
use crate::descriptor::{
    ExtensionRepr, FieldDescriptor, FieldType, FileDescriptor, Label, MessageDescriptor,
};
use crate::error::GenError;
use crate::ident;

pub fn lower_file(proto: &FileDescriptorProto) -> Result<FileDescriptor, GenError> {
    let package = proto.package.clone().unwrap_or_default();
    let file_name = proto.name.clone().unwrap_or_default();
    let file_defaults = config::file_options(proto.options.as_ref());

    let mut messages = Vec::new();
    for message in &proto.message_type {
        lower_message(message, &[], file_defaults, &mut messages)?;
    }

    let file = FileDescriptor {
        package,
        local_name: ident::file_local(&file_name),
        messages,
    };
    file.validate()?;
    Ok(file)
}

fn lower_message(
    proto: &DescriptorProto,
    enclosing: &[String],
    file_defaults: Options,
    out: &mut Vec<MessageDescriptor>,
) -> Result<(), GenError> {
    let name = proto
        .name
        .clone()
        .ok_or_else(|| GenError::MalformedDescriptor {
            detail: "message with no name".to_string(),
        })?;
    let mut path = enclosing.to_vec();
    path.push(name);

    let options = config::message_options(file_defaults, proto.options.as_ref());

    let extension_ranges: Vec<(i32, i32)> = proto
        .extension_range
        .iter()
        .map(|r| (r.start.unwrap_or(0), r.end.unwrap_or(0)))
        .collect();
    let extension_repr = if extension_ranges.is_empty() {
        None
    } else {
        // Extension representation is a message-level choice (spec §3);
        // this generator defaults new messages to the bytes form and
        // lets `extensions_map` flip it, mirroring how gogoproto's
        // `extensions_map`/`extensions_bytes` pair of options works.
        let uses_map = proto
            .options
            .as_ref()
            .map(|o| {
                o.uninterpreted_option.iter().any(|opt| {
                    opt.name
                        .first()
                        .map(|p| p.name_part == "extensions_map")
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false);
        Some(if uses_map {
            ExtensionRepr::Map
        } else {
            ExtensionRepr::Bytes
        })
    };

    let fields = proto
        .field
        .iter()
        .map(lower_field)
        .collect::<Result<Vec<_>, _>>()?;

    let descriptor = MessageDescriptor {
        path: path.clone(),
        fields,
        extension_ranges,
        extension_repr,
        is_marshaler: options.marshaler,
        is_unmarshaler: options.unmarshaler,
        is_stringer: options.stringer,
        is_face: options.face,
        has_testgen: options.testgen,
        has_benchgen: options.benchgen,
        has_verbose_equal: false,
        goproto_getters_disabled: !options.goproto_getters,
    };
    descriptor.validate()?;
    out.push(descriptor);

    for nested in &proto.nested_type {
        if nested
            .options
            .as_ref()
            .and_then(|o| o.map_entry)
            .unwrap_or(false)
        {
            // Map-entry synthetic messages are an artifact of the MAP
            // field sugar; spec.md's Non-goals exclude map field support,
            // so descriptors that only exist to back a map are skipped.
            continue;
        }
        lower_message(nested, &path, file_defaults, out)?;
    }

    Ok(())
}

fn lower_field(proto: &FieldDescriptorProto) -> Result<FieldDescriptor, GenError> {
    let name = proto
        .name
        .clone()
        .ok_or_else(|| GenError::MalformedDescriptor {
            detail: "field with no name".to_string(),
        })?;
    let tag = u32::try_from(proto.number.unwrap_or(0)).map_err(|_| GenError::MalformedDescriptor {
        detail: format!("field {name} has a negative tag"),
    })?;
    let label = match proto.label() {
        ProtoLabel::Optional => Label::Optional,
        ProtoLabel::Required => Label::Required,
        ProtoLabel::Repeated => Label::Repeated,
    };
    let field_type = match proto.r#type() {
        ProtoType::Double => FieldType::Double,
        ProtoType::Float => FieldType::Float,
        ProtoType::Int64 => FieldType::Int64,
        ProtoType::Uint64 => FieldType::Uint64,
        ProtoType::Int32 => FieldType::Int32,
        ProtoType::Fixed64 => FieldType::Fixed64,
        ProtoType::Fixed32 => FieldType::Fixed32,
        ProtoType::Bool => FieldType::Bool,
        ProtoType::String => FieldType::String,
        ProtoType::Group => FieldType::Group,
        ProtoType::Message => {
            FieldType::Message(proto.type_name.clone().unwrap_or_default())
        }
        ProtoType::Bytes => FieldType::Bytes,
        ProtoType::Uint32 => FieldType::Uint32,
        ProtoType::Enum => FieldType::Enum(proto.type_name.clone().unwrap_or_default()),
        ProtoType::Sfixed32 => FieldType::Sfixed32,
        ProtoType::Sfixed64 => FieldType::Sfixed64,
        ProtoType::Sint32 => FieldType::Sint32,
        ProtoType::Sint64 => FieldType::Sint64,
    };
    let packed = proto
        .options
        .as_ref()
        .and_then(|o| o.packed)
        .unwrap_or(false);
    let overrides = config::field_options(proto.options.as_ref());

    Ok(FieldDescriptor {
        name,
        tag,
        label,
        field_type,
        packed,
        custom_type: overrides.custom_type,
        embed: overrides.embed,
        nullable: overrides.nullable,
    })
}
