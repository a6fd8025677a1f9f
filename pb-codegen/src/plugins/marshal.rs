//! The marshaller emitter (spec §4.5): `Size`, `Marshal`, `MarshalTo`,
//! and `MarshalToUsingCachedSize` for every message with `is_marshaler`.

use crate::context::FileContext;
use crate::descriptor::{ExtensionRepr, FieldDescriptor, FieldType, MessageDescriptor};
use crate::error::GenError;
use crate::ident;
use crate::registry::Plugin;

pub struct MarshalPlugin;

impl Plugin for MarshalPlugin {
    fn name(&self) -> &'static str {
        "marshal"
    }

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError> {
        let messages = ctx.file.messages.clone();
        let any_marshaler = messages.iter().any(|m| m.is_marshaler);
        if !any_marshaler {
            return Ok(());
        }
        ctx.imports.use_package("bytes::BufMut");
        emit_encode_helpers(ctx);
        for message in &messages {
            if message.is_marshaler {
                emit_message(ctx, message);
            }
        }
        Ok(())
    }
}

fn emit_encode_helpers(ctx: &mut FileContext) {
    let suffix = ctx.file.local_name.clone();
    let w = &mut ctx.writer;
    w.emit_line(format!(
        "fn encode_varint_{suffix}(value: u64, buf: &mut impl bytes::BufMut) {{"
    ));
    w.indent();
    w.emit_line("pb_wire::encode_varint(value, buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();

    w.emit_line(format!(
        "fn encoded_len_varint_{suffix}(value: u64) -> usize {{"
    ));
    w.indent();
    w.emit_line("pb_wire::encoded_len_varint(value)");
    w.outdent();
    w.emit_line("}");
    w.blank();

    w.emit_line(format!(
        "fn encode_fixed32_{suffix}(value: u32, buf: &mut impl bytes::BufMut) {{"
    ));
    w.indent();
    w.emit_line("pb_wire::encode_fixed32(value, buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();

    w.emit_line(format!(
        "fn encode_fixed64_{suffix}(value: u64, buf: &mut impl bytes::BufMut) {{"
    ));
    w.indent();
    w.emit_line("pb_wire::encode_fixed64(value, buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

/// One field's contribution to wire output: how to size and encode a
/// single occurrence's *value* (the tag is handled by the caller).
enum ValueKind {
    Varint,
    Fixed32Raw,
    Fixed64Raw,
    Float,
    Double,
    ZigZag32,
    ZigZag64,
    LenString,
    LenBytes,
    LenMessage,
}

fn value_kind(field_type: &FieldType) -> ValueKind {
    match field_type {
        FieldType::Int32 | FieldType::Int64 | FieldType::Uint32 | FieldType::Uint64
        | FieldType::Bool | FieldType::Enum(_) => ValueKind::Varint,
        FieldType::Sint32 => ValueKind::ZigZag32,
        FieldType::Sint64 => ValueKind::ZigZag64,
        FieldType::Fixed32 | FieldType::Sfixed32 => ValueKind::Fixed32Raw,
        FieldType::Fixed64 | FieldType::Sfixed64 => ValueKind::Fixed64Raw,
        FieldType::Float => ValueKind::Float,
        FieldType::Double => ValueKind::Double,
        FieldType::String => ValueKind::LenString,
        FieldType::Bytes => ValueKind::LenBytes,
        FieldType::Message(_) => ValueKind::LenMessage,
        FieldType::Group => unreachable!("groups are rejected at descriptor validation"),
    }
}

fn emit_message(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let suffix = ctx.file.local_name.clone();
    let fields = message.fields.clone();
    let extension_repr = message.extension_repr;

    ctx.writer.emit_line("#[allow(non_snake_case)]");
    ctx.writer.emit_line(format!("impl {type_name} {{"));
    ctx.writer.indent();

    emit_size(ctx, &fields, extension_repr, &suffix);
    emit_marshal(ctx, &type_name);
    emit_marshal_to(ctx, &fields, &suffix);
    emit_marshal_to_using_cached_size(ctx, &fields, extension_repr, &suffix);

    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();
}

fn emit_size(
    ctx: &mut FileContext,
    fields: &[FieldDescriptor],
    extension_repr: Option<ExtensionRepr>,
    suffix: &str,
) {
    let w = &mut ctx.writer;
    w.emit_line("pub fn Size(&self) -> usize {");
    w.indent();
    w.emit_line("let mut n = 0usize;");
    for field in fields {
        emit_size_for_field(w, field, suffix);
    }
    match extension_repr {
        Some(ExtensionRepr::Map) => {
            w.emit_line("for raw in self.xxx_extensions.values() {");
            w.indent();
            w.emit_line("n += raw.len();");
            w.outdent();
            w.emit_line("}");
        }
        Some(ExtensionRepr::Bytes) => {
            w.emit_line("n += self.xxx_extensions.len();");
        }
        None => {}
    }
    w.emit_line("n += self.xxx_unrecognized.len();");
    w.emit_line("self.xxx_size_cached.set(n as u32);");
    w.emit_line("n");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_size_for_field(w: &mut crate::writer::Writer, field: &FieldDescriptor, suffix: &str) {
    let snake = ident::snake(&field.name);
    let set_flag = ident::setter_flag(&field.name);
    let len_counter = ident::length_counter(&field.name);

    let key = format!(
        "pb_wire::tag_key({}, pb_wire::WireType::{:?})",
        field.tag,
        field.wire_type()
    );

    match (field.is_repeated(), field.field_type.is_message()) {
        (false, false) => {
            w.emit_line(format!("if self.{set_flag} {{"));
            w.indent();
            w.emit_line(format!("n += encoded_len_varint_{suffix}({key} as u64);"));
            w.emit_line(value_size_expr(&format!("self.{snake}"), field, suffix));
            w.outdent();
            w.emit_line("}");
        }
        (false, true) => {
            w.emit_line(format!("if self.{set_flag} {{"));
            w.indent();
            w.emit_line(format!("n += encoded_len_varint_{suffix}({key} as u64);"));
            w.emit_line(format!("let child_len = self.{snake}.Size();"));
            w.emit_line(format!("n += encoded_len_varint_{suffix}(child_len as u64);"));
            w.emit_line("n += child_len;");
            w.outdent();
            w.emit_line("}");
        }
        (true, false) if field.packed => {
            w.emit_line(format!("if self.{len_counter} > 0 {{"));
            w.indent();
            w.emit_line("let mut payload_len = 0usize;");
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(value_size_expr_accum("payload_len", "(*value)", field, suffix));
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("n += encoded_len_varint_{suffix}({key} as u64);"));
            w.emit_line(format!(
                "n += encoded_len_varint_{suffix}(payload_len as u64);"
            ));
            w.emit_line("n += payload_len;");
            w.outdent();
            w.emit_line("}");
        }
        (true, false) => {
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(format!("n += encoded_len_varint_{suffix}({key} as u64);"));
            w.emit_line(value_size_expr("(*value)", field, suffix));
            w.outdent();
            w.emit_line("}");
        }
        (true, true) => {
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(format!("n += encoded_len_varint_{suffix}({key} as u64);"));
            w.emit_line("let child_len = value.Size();");
            w.emit_line(format!("n += encoded_len_varint_{suffix}(child_len as u64);"));
            w.emit_line("n += child_len;");
            w.outdent();
            w.emit_line("}");
        }
    }
}

/// Emits `n += <size of encoding value as its scalar wire value>;`.
fn value_size_expr(value_expr: &str, field: &FieldDescriptor, suffix: &str) -> String {
    match value_kind(&field.field_type) {
        ValueKind::Varint => format!("n += encoded_len_varint_{suffix}({value_expr} as u64);"),
        ValueKind::ZigZag32 => format!(
            "n += encoded_len_varint_{suffix}(pb_wire::encode_zigzag32({value_expr}) as u64);"
        ),
        ValueKind::ZigZag64 => format!(
            "n += encoded_len_varint_{suffix}(pb_wire::encode_zigzag64({value_expr}) as u64);"
        ),
        ValueKind::Fixed32Raw | ValueKind::Float => "n += 4;".to_string(),
        ValueKind::Fixed64Raw | ValueKind::Double => "n += 8;".to_string(),
        ValueKind::LenString => format!(
            "n += encoded_len_varint_{suffix}({value_expr}.len() as u64) + {value_expr}.len();"
        ),
        ValueKind::LenBytes => format!(
            "n += encoded_len_varint_{suffix}({value_expr}.len() as u64) + {value_expr}.len();"
        ),
        ValueKind::LenMessage => unreachable!("message fields sized separately"),
    }
}

fn value_size_expr_accum(
    accum: &str,
    value_expr: &str,
    field: &FieldDescriptor,
    suffix: &str,
) -> String {
    match value_kind(&field.field_type) {
        ValueKind::Varint => {
            format!("{accum} += encoded_len_varint_{suffix}({value_expr} as u64);")
        }
        ValueKind::ZigZag32 => format!(
            "{accum} += encoded_len_varint_{suffix}(pb_wire::encode_zigzag32({value_expr}) as u64);"
        ),
        ValueKind::ZigZag64 => format!(
            "{accum} += encoded_len_varint_{suffix}(pb_wire::encode_zigzag64({value_expr}) as u64);"
        ),
        ValueKind::Fixed32Raw | ValueKind::Float => format!("{accum} += 4;"),
        ValueKind::Fixed64Raw | ValueKind::Double => format!("{accum} += 8;"),
        ValueKind::LenString | ValueKind::LenBytes | ValueKind::LenMessage => {
            unreachable!("packed encoding only applies to non-LEN scalars")
        }
    }
}

fn emit_marshal(ctx: &mut FileContext, type_name: &str) {
    let _ = type_name;
    let w = &mut ctx.writer;
    w.emit_line("pub fn Marshal(&self) -> Result<Vec<u8>, pb_wire::Error> {");
    w.indent();
    w.emit_line("let size = self.Size();");
    w.emit_line("let mut buf = vec![0u8; size];");
    w.emit_line("self.MarshalToUsingCachedSize(&mut buf)?;");
    w.emit_line("Ok(buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_marshal_to(ctx: &mut FileContext, fields: &[FieldDescriptor], suffix: &str) {
    let _ = (fields, suffix);
    let w = &mut ctx.writer;
    w.emit_line("pub fn MarshalTo(&self, buf: &mut [u8]) -> Result<usize, pb_wire::Error> {");
    w.indent();
    w.emit_line("let size = self.Size();");
    w.emit_line("if buf.len() < size {");
    w.indent();
    w.emit_line("return Err(pb_wire::Error::BufferTooSmall);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("self.MarshalToUsingCachedSize(buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_marshal_to_using_cached_size(
    ctx: &mut FileContext,
    fields: &[FieldDescriptor],
    extension_repr: Option<ExtensionRepr>,
    suffix: &str,
) {
    let w = &mut ctx.writer;
    w.emit_line(
        "pub fn MarshalToUsingCachedSize(&self, buf: &mut [u8]) -> Result<usize, pb_wire::Error> {",
    );
    w.indent();
    w.emit_line("let size = self.xxx_size_cached.get() as usize;");
    w.emit_line("if buf.len() < size {");
    w.indent();
    w.emit_line("return Err(pb_wire::Error::BufferTooSmall);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("let mut cursor: &mut [u8] = &mut buf[..size];");
    for field in fields {
        emit_marshal_for_field(w, field, suffix);
    }
    match extension_repr {
        Some(ExtensionRepr::Map) => {
            w.emit_line("for raw in self.xxx_extensions.values() {");
            w.indent();
            w.emit_line("bytes::BufMut::put_slice(&mut cursor, raw);");
            w.outdent();
            w.emit_line("}");
        }
        Some(ExtensionRepr::Bytes) => {
            w.emit_line("bytes::BufMut::put_slice(&mut cursor, &self.xxx_extensions);");
        }
        None => {}
    }
    w.emit_line("bytes::BufMut::put_slice(&mut cursor, &self.xxx_unrecognized);");
    w.emit_line("Ok(size)");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_marshal_for_field(w: &mut crate::writer::Writer, field: &FieldDescriptor, suffix: &str) {
    let snake = ident::snake(&field.name);
    let set_flag = ident::setter_flag(&field.name);
    let len_counter = ident::length_counter(&field.name);
    let key = format!(
        "pb_wire::tag_key({}, pb_wire::WireType::{:?})",
        field.tag,
        field.wire_type()
    );

    match (field.is_repeated(), field.field_type.is_message()) {
        (false, false) => {
            w.emit_line(format!("if self.{set_flag} {{"));
            w.indent();
            w.emit_line(format!(
                "encode_varint_{suffix}({key} as u64, &mut cursor);"
            ));
            w.emit_line(emit_value_write(&format!("self.{snake}"), field, suffix));
            w.outdent();
            w.emit_line("}");
        }
        (false, true) => {
            w.emit_line(format!("if self.{set_flag} {{"));
            w.indent();
            w.emit_line(format!("let child_len = self.{snake}.Size();"));
            w.emit_line(format!(
                "encode_varint_{suffix}({key} as u64, &mut cursor);"
            ));
            w.emit_line(format!(
                "encode_varint_{suffix}(child_len as u64, &mut cursor);"
            ));
            w.emit_line("let (child_buf, rest) = cursor.split_at_mut(child_len);");
            w.emit_line(format!(
                "self.{snake}.MarshalToUsingCachedSize(child_buf).map_err(pb_wire::Error::into_child)?;"
            ));
            w.emit_line("cursor = rest;");
            w.outdent();
            w.emit_line("}");
        }
        (true, false) if field.packed => {
            w.emit_line(format!("if self.{len_counter} > 0 {{"));
            w.indent();
            w.emit_line("let mut payload_len = 0usize;");
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(value_size_expr_accum("payload_len", "(*value)", field, suffix));
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!(
                "encode_varint_{suffix}({key} as u64, &mut cursor);"
            ));
            w.emit_line(format!(
                "encode_varint_{suffix}(payload_len as u64, &mut cursor);"
            ));
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(emit_value_write("(*value)", field, suffix));
            w.outdent();
            w.emit_line("}");
            w.outdent();
            w.emit_line("}");
        }
        (true, false) => {
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(format!(
                "encode_varint_{suffix}({key} as u64, &mut cursor);"
            ));
            w.emit_line(emit_value_write("(*value)", field, suffix));
            w.outdent();
            w.emit_line("}");
        }
        (true, true) => {
            w.emit_line(format!(
                "for value in &self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line(format!(
                "encode_varint_{suffix}({key} as u64, &mut cursor);"
            ));
            w.emit_line("let child_len = value.Size();");
            w.emit_line(format!(
                "encode_varint_{suffix}(child_len as u64, &mut cursor);"
            ));
            w.emit_line("let (child_buf, rest) = cursor.split_at_mut(child_len);");
            w.emit_line("value.MarshalToUsingCachedSize(child_buf).map_err(pb_wire::Error::into_child)?;");
            w.emit_line("cursor = rest;");
            w.outdent();
            w.emit_line("}");
        }
    }
}

fn emit_value_write(value_expr: &str, field: &FieldDescriptor, suffix: &str) -> String {
    match value_kind(&field.field_type) {
        ValueKind::Varint => format!("encode_varint_{suffix}({value_expr} as u64, &mut cursor);"),
        ValueKind::ZigZag32 => format!(
            "encode_varint_{suffix}(pb_wire::encode_zigzag32({value_expr}) as u64, &mut cursor);"
        ),
        ValueKind::ZigZag64 => format!(
            "encode_varint_{suffix}(pb_wire::encode_zigzag64({value_expr}) as u64, &mut cursor);"
        ),
        ValueKind::Fixed32Raw => {
            format!("encode_fixed32_{suffix}({value_expr} as u32, &mut cursor);")
        }
        ValueKind::Fixed64Raw => {
            format!("encode_fixed64_{suffix}({value_expr} as u64, &mut cursor);")
        }
        ValueKind::Float => {
            format!("encode_fixed32_{suffix}({value_expr}.to_bits(), &mut cursor);")
        }
        ValueKind::Double => {
            format!("encode_fixed64_{suffix}({value_expr}.to_bits(), &mut cursor);")
        }
        ValueKind::LenString => format!(
            "encode_varint_{suffix}({value_expr}.len() as u64, &mut cursor); bytes::BufMut::put_slice(&mut cursor, {value_expr}.as_bytes());"
        ),
        ValueKind::LenBytes => format!(
            "encode_varint_{suffix}({value_expr}.len() as u64, &mut cursor); bytes::BufMut::put_slice(&mut cursor, {value_expr});"
        ),
        ValueKind::LenMessage => unreachable!("message fields encoded separately"),
    }
}
