//! The unmarshaller emitter (spec §4.6): `Unmarshal`/`MergeFrom` for every
//! message with `is_unmarshaler`. Unknown tags are skipped and appended to
//! `xxx_unrecognized`; tags inside a declared extension range are stashed
//! instead. Packable scalar fields accept both their unpacked wire type
//! and a packed `LEN` encoding regardless of the field's declared `packed`
//! flag (spec §9 "Packed leniency").

use crate::context::FileContext;
use crate::descriptor::{FieldDescriptor, FieldType, MessageDescriptor};
use crate::error::GenError;
use crate::ident;
use crate::registry::Plugin;

pub struct UnmarshalPlugin;

impl Plugin for UnmarshalPlugin {
    fn name(&self) -> &'static str {
        "unmarshal"
    }

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError> {
        let messages = ctx.file.messages.clone();
        let any_unmarshaler = messages.iter().any(|m| m.is_unmarshaler);
        if !any_unmarshaler {
            return Ok(());
        }
        ctx.imports.use_package("bytes::Buf");
        emit_decode_helpers(ctx);
        for message in &messages {
            if message.is_unmarshaler {
                emit_message(ctx, message);
            }
        }
        Ok(())
    }
}

fn emit_decode_helpers(ctx: &mut FileContext) {
    let suffix = ctx.file.local_name.clone();
    let w = &mut ctx.writer;
    w.emit_line(format!(
        "fn decode_varint_{suffix}(buf: &mut impl bytes::Buf) -> Result<u64, pb_wire::Error> {{"
    ));
    w.indent();
    w.emit_line("pb_wire::decode_varint(buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();

    w.emit_line(format!(
        "fn decode_fixed32_{suffix}(buf: &mut impl bytes::Buf) -> Result<u32, pb_wire::Error> {{"
    ));
    w.indent();
    w.emit_line("pb_wire::decode_fixed32(buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();

    w.emit_line(format!(
        "fn decode_fixed64_{suffix}(buf: &mut impl bytes::Buf) -> Result<u64, pb_wire::Error> {{"
    ));
    w.indent();
    w.emit_line("pb_wire::decode_fixed64(buf)");
    w.outdent();
    w.emit_line("}");
    w.blank();

    w.emit_line(format!(
        "fn skip_value_{suffix}(wire_type: pb_wire::WireType, buf: &mut impl bytes::Buf, out: &mut Vec<u8>) -> Result<(), pb_wire::Error> {{"
    ));
    w.indent();
    w.emit_line("match wire_type {");
    w.indent();
    w.emit_line("pb_wire::WireType::Varint => {");
    w.indent();
    w.emit_line(format!("let value = decode_varint_{suffix}(buf)?;"));
    w.emit_line("pb_wire::encode_varint(value, out);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("pb_wire::WireType::Fixed32 => {");
    w.indent();
    w.emit_line(format!("let value = decode_fixed32_{suffix}(buf)?;"));
    w.emit_line("pb_wire::encode_fixed32(value, out);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("pb_wire::WireType::Fixed64 => {");
    w.indent();
    w.emit_line(format!("let value = decode_fixed64_{suffix}(buf)?;"));
    w.emit_line("pb_wire::encode_fixed64(value, out);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("pb_wire::WireType::Len => {");
    w.indent();
    w.emit_line(format!("let len = decode_varint_{suffix}(buf)? as usize;"));
    w.emit_line(format!("pb_wire::encode_varint(len as u64, out);"));
    w.emit_line("if bytes::Buf::remaining(buf) < len {");
    w.indent();
    w.emit_line("return Err(pb_wire::Error::UnexpectedEof);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("let mut payload = vec![0u8; len];");
    w.emit_line("bytes::Buf::copy_to_slice(buf, &mut payload);");
    w.emit_line("out.extend_from_slice(&payload);");
    w.outdent();
    w.emit_line("}");
    w.outdent();
    w.emit_line("}");
    w.emit_line("Ok(())");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

enum ValueKind {
    Varint(&'static str),
    ZigZag32,
    ZigZag64,
    Fixed32Raw(&'static str),
    Fixed64Raw(&'static str),
    Float,
    Double,
}

fn scalar_value_kind(field_type: &FieldType) -> ValueKind {
    match field_type {
        FieldType::Int32 => ValueKind::Varint("i32"),
        FieldType::Int64 => ValueKind::Varint("i64"),
        FieldType::Uint32 => ValueKind::Varint("u32"),
        FieldType::Uint64 => ValueKind::Varint("u64"),
        FieldType::Bool => ValueKind::Varint("bool"),
        FieldType::Enum(_) => ValueKind::Varint("i32"),
        FieldType::Sint32 => ValueKind::ZigZag32,
        FieldType::Sint64 => ValueKind::ZigZag64,
        FieldType::Fixed32 => ValueKind::Fixed32Raw("u32"),
        FieldType::Sfixed32 => ValueKind::Fixed32Raw("i32"),
        FieldType::Fixed64 => ValueKind::Fixed64Raw("u64"),
        FieldType::Sfixed64 => ValueKind::Fixed64Raw("i64"),
        FieldType::Float => ValueKind::Float,
        FieldType::Double => ValueKind::Double,
        FieldType::String | FieldType::Bytes | FieldType::Message(_) | FieldType::Group => {
            unreachable!("not a fixed/varint scalar")
        }
    }
}

/// The wire type a single, non-packed occurrence of this scalar decodes
/// as.
fn unpacked_wire_type(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::Int32 | FieldType::Int64 | FieldType::Uint32 | FieldType::Uint64
        | FieldType::Bool | FieldType::Enum(_) | FieldType::Sint32 | FieldType::Sint64 => {
            "Varint"
        }
        FieldType::Fixed32 | FieldType::Sfixed32 | FieldType::Float => "Fixed32",
        FieldType::Fixed64 | FieldType::Sfixed64 | FieldType::Double => "Fixed64",
        FieldType::String | FieldType::Bytes | FieldType::Message(_) => "Len",
        FieldType::Group => unreachable!("groups are rejected at descriptor validation"),
    }
}

/// Emits `let value = <decoded scalar>;` reading one occurrence from
/// `buf`.
fn emit_decode_one(w: &mut crate::writer::Writer, field_type: &FieldType, suffix: &str) {
    match scalar_value_kind(field_type) {
        ValueKind::Varint(cast) => {
            w.emit_line(format!("let raw = decode_varint_{suffix}(buf)?;"));
            if cast == "bool" {
                w.emit_line("let value = raw != 0;");
            } else {
                w.emit_line(format!("let value = raw as {cast};"));
            }
        }
        ValueKind::ZigZag32 => {
            w.emit_line(format!("let raw = decode_varint_{suffix}(buf)?;"));
            w.emit_line("let value = pb_wire::decode_zigzag32(raw as u32);");
        }
        ValueKind::ZigZag64 => {
            w.emit_line(format!("let raw = decode_varint_{suffix}(buf)?;"));
            w.emit_line("let value = pb_wire::decode_zigzag64(raw);");
        }
        ValueKind::Fixed32Raw(cast) => {
            w.emit_line(format!("let raw = decode_fixed32_{suffix}(buf)?;"));
            if cast == "u32" {
                w.emit_line("let value = raw;");
            } else {
                w.emit_line(format!("let value = raw as {cast};"));
            }
        }
        ValueKind::Fixed64Raw(cast) => {
            w.emit_line(format!("let raw = decode_fixed64_{suffix}(buf)?;"));
            if cast == "u64" {
                w.emit_line("let value = raw;");
            } else {
                w.emit_line(format!("let value = raw as {cast};"));
            }
        }
        ValueKind::Float => {
            w.emit_line(format!("let raw = decode_fixed32_{suffix}(buf)?;"));
            w.emit_line("let value = f32::from_bits(raw);");
        }
        ValueKind::Double => {
            w.emit_line(format!("let raw = decode_fixed64_{suffix}(buf)?;"));
            w.emit_line("let value = f64::from_bits(raw);");
        }
    }
}

fn emit_message(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let suffix = ctx.file.local_name.clone();
    let fields = message.fields.clone();
    let extension_ranges = message.extension_ranges.clone();
    let extension_repr = message.extension_repr;

    ctx.writer.emit_line("#[allow(non_snake_case)]");
    ctx.writer.emit_line(format!("impl {type_name} {{"));
    ctx.writer.indent();

    emit_unmarshal(ctx);
    emit_merge_from(ctx, &fields, &extension_ranges, extension_repr, &suffix);

    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();
}

fn emit_unmarshal(ctx: &mut FileContext) {
    let w = &mut ctx.writer;
    w.emit_line("pub fn Unmarshal(&mut self, data: &[u8]) -> Result<(), pb_wire::Error> {");
    w.indent();
    w.emit_line("let mut cursor = data;");
    w.emit_line("self.MergeFrom(&mut cursor)");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_merge_from(
    ctx: &mut FileContext,
    fields: &[FieldDescriptor],
    extension_ranges: &[(i32, i32)],
    extension_repr: Option<crate::descriptor::ExtensionRepr>,
    suffix: &str,
) {
    let w = &mut ctx.writer;
    w.emit_line(
        "pub fn MergeFrom(&mut self, buf: &mut impl bytes::Buf) -> Result<(), pb_wire::Error> {",
    );
    w.indent();
    w.emit_line("while bytes::Buf::has_remaining(buf) {");
    w.indent();
    w.emit_line(format!("let key = decode_varint_{suffix}(buf)?;"));
    w.emit_line("let (tag, wire_type) = pb_wire::split_tag_key(key)?;");
    w.emit_line("match tag {");
    w.indent();
    for field in fields {
        emit_field_arm(w, field, suffix);
    }
    if let Some(repr) = extension_repr {
        for &(start, end) in extension_ranges {
            w.emit_line(format!("{start}..={end} => {{", end = end - 1));
            w.indent();
            emit_extension_stash(w, repr, suffix);
            w.outdent();
            w.emit_line("}");
        }
    }
    w.emit_line("_ => {");
    w.indent();
    w.emit_line("let mut key_bytes = Vec::new();");
    w.emit_line("pb_wire::encode_varint(key, &mut key_bytes);");
    w.emit_line("self.xxx_unrecognized.extend_from_slice(&key_bytes);");
    w.emit_line(format!(
        "skip_value_{suffix}(wire_type, buf, &mut self.xxx_unrecognized)?;"
    ));
    w.outdent();
    w.emit_line("}");
    w.outdent();
    w.emit_line("}");
    w.outdent();
    w.emit_line("}");
    w.emit_line("Ok(())");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_extension_stash(
    w: &mut crate::writer::Writer,
    repr: crate::descriptor::ExtensionRepr,
    suffix: &str,
) {
    use crate::descriptor::ExtensionRepr;
    match repr {
        ExtensionRepr::Map => {
            w.emit_line("let mut raw = Vec::new();");
            w.emit_line("pb_wire::encode_varint(key, &mut raw);");
            w.emit_line(format!("skip_value_{suffix}(wire_type, buf, &mut raw)?;"));
            w.emit_line("self.xxx_extensions.entry(tag).or_default().extend_from_slice(&raw);");
        }
        ExtensionRepr::Bytes => {
            w.emit_line("let mut key_bytes = Vec::new();");
            w.emit_line("pb_wire::encode_varint(key, &mut key_bytes);");
            w.emit_line("self.xxx_extensions.extend_from_slice(&key_bytes);");
            w.emit_line(format!(
                "skip_value_{suffix}(wire_type, buf, &mut self.xxx_extensions)?;"
            ));
        }
    }
}

fn emit_field_arm(w: &mut crate::writer::Writer, field: &FieldDescriptor, suffix: &str) {
    let snake = ident::snake(&field.name);
    let set_flag = ident::setter_flag(&field.name);
    let len_counter = ident::length_counter(&field.name);
    let tag = field.tag;

    w.emit_line(format!("{tag} => {{"));
    w.indent();

    match (field.is_repeated(), field.field_type.is_message()) {
        (false, false) => match &field.field_type {
            FieldType::String => {
                emit_wire_type_guard(w, "Len");
                emit_len_string_read(w, suffix);
                w.emit_line(format!("self.{snake} = value;"));
                w.emit_line(format!("self.{set_flag} = true;"));
            }
            FieldType::Bytes => {
                emit_wire_type_guard(w, "Len");
                emit_len_bytes_read(w, suffix);
                w.emit_line(format!("self.{snake} = value;"));
                w.emit_line(format!("self.{set_flag} = true;"));
            }
            other => {
                emit_wire_type_guard(w, unpacked_wire_type(other));
                emit_decode_one(w, other, suffix);
                w.emit_line(format!("self.{snake} = value;"));
                w.emit_line(format!("self.{set_flag} = true;"));
            }
        },
        (false, true) => {
            emit_wire_type_guard(w, "Len");
            w.emit_line(format!("let len = decode_varint_{suffix}(buf)? as usize;"));
            w.emit_line("if bytes::Buf::remaining(buf) < len {");
            w.indent();
            w.emit_line("return Err(pb_wire::Error::UnexpectedEof);");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("self.{set_flag} = true;"));
            w.emit_line("let mut child_buf = bytes::Buf::take(&mut *buf, len);");
            w.emit_line(format!(
                "self.{snake}.MergeFrom(&mut child_buf).map_err(pb_wire::Error::into_child)?;"
            ));
        }
        (true, false) if field.is_packable() => {
            w.emit_line("match wire_type {");
            w.indent();
            w.emit_line(format!(
                "pb_wire::WireType::{} => {{",
                unpacked_wire_type(&field.field_type)
            ));
            w.indent();
            emit_decode_one(w, &field.field_type, suffix);
            w.emit_line(format!(
                "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
            ));
            w.emit_line(format!("self.{snake}[self.{len_counter}] = value;"));
            w.emit_line(format!("self.{len_counter} += 1;"));
            w.outdent();
            w.emit_line("}");
            w.emit_line("pb_wire::WireType::Len => {");
            w.indent();
            w.emit_line(format!("let len = decode_varint_{suffix}(buf)? as usize;"));
            w.emit_line("if bytes::Buf::remaining(buf) < len {");
            w.indent();
            w.emit_line("return Err(pb_wire::Error::UnexpectedEof);");
            w.outdent();
            w.emit_line("}");
            w.emit_line("let mut packed = bytes::Buf::take(&mut *buf, len);");
            w.emit_line("while bytes::Buf::has_remaining(&packed) {");
            w.indent();
            w.emit_line("let buf = &mut packed;");
            emit_decode_one(w, &field.field_type, suffix);
            w.emit_line(format!(
                "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
            ));
            w.emit_line(format!("self.{snake}[self.{len_counter}] = value;"));
            w.emit_line(format!("self.{len_counter} += 1;"));
            w.outdent();
            w.emit_line("}");
            w.outdent();
            w.emit_line("}");
            w.emit_line("_ => return Err(pb_wire::Error::WrongWireType),");
            w.outdent();
            w.emit_line("}");
        }
        (true, false) => match &field.field_type {
            FieldType::String => {
                emit_wire_type_guard(w, "Len");
                emit_len_string_read(w, suffix);
                w.emit_line(format!(
                    "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
                ));
                w.emit_line(format!("self.{snake}[self.{len_counter}] = value;"));
                w.emit_line(format!("self.{len_counter} += 1;"));
            }
            FieldType::Bytes => {
                emit_wire_type_guard(w, "Len");
                emit_len_bytes_read(w, suffix);
                w.emit_line(format!(
                    "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
                ));
                w.emit_line(format!("self.{snake}[self.{len_counter}] = value;"));
                w.emit_line(format!("self.{len_counter} += 1;"));
            }
            _ => unreachable!("non-packable non-string/bytes repeated scalar"),
        },
        (true, true) => {
            emit_wire_type_guard(w, "Len");
            w.emit_line(format!("let len = decode_varint_{suffix}(buf)? as usize;"));
            w.emit_line("if bytes::Buf::remaining(buf) < len {");
            w.indent();
            w.emit_line("return Err(pb_wire::Error::UnexpectedEof);");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!(
                "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
            ));
            w.emit_line(format!("self.{snake}[self.{len_counter}].Clear();"));
            w.emit_line("let mut child_buf = bytes::Buf::take(&mut *buf, len);");
            w.emit_line(format!(
                "self.{snake}[self.{len_counter}].MergeFrom(&mut child_buf).map_err(pb_wire::Error::into_child)?;"
            ));
            w.emit_line(format!("self.{len_counter} += 1;"));
        }
    }

    w.outdent();
    w.emit_line("}");
}

fn emit_wire_type_guard(w: &mut crate::writer::Writer, expected: &str) {
    w.emit_line(format!(
        "if wire_type != pb_wire::WireType::{expected} {{"
    ));
    w.indent();
    w.emit_line("return Err(pb_wire::Error::WrongWireType);");
    w.outdent();
    w.emit_line("}");
}

fn emit_len_string_read(w: &mut crate::writer::Writer, suffix: &str) {
    w.emit_line(format!("let len = decode_varint_{suffix}(buf)? as usize;"));
    w.emit_line("if bytes::Buf::remaining(buf) < len {");
    w.indent();
    w.emit_line("return Err(pb_wire::Error::UnexpectedEof);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("let mut raw = vec![0u8; len];");
    w.emit_line("bytes::Buf::copy_to_slice(buf, &mut raw);");
    w.emit_line("let value = String::from_utf8_lossy(&raw).into_owned();");
}

fn emit_len_bytes_read(w: &mut crate::writer::Writer, suffix: &str) {
    w.emit_line(format!("let len = decode_varint_{suffix}(buf)? as usize;"));
    w.emit_line("if bytes::Buf::remaining(buf) < len {");
    w.indent();
    w.emit_line("return Err(pb_wire::Error::UnexpectedEof);");
    w.outdent();
    w.emit_line("}");
    w.emit_line("let mut value = vec![0u8; len];");
    w.emit_line("bytes::Buf::copy_to_slice(buf, &mut value);");
}
