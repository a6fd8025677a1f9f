//! The accessor emitter (spec §4.4): per-field storage-state bookkeeping
//! and the has/set/mutate/clear/get/size operations the codec emitters
//! depend on.

use crate::context::FileContext;
use crate::descriptor::{FieldDescriptor, FieldType, MessageDescriptor};
use crate::error::GenError;
use crate::ident;
use crate::registry::Plugin;

pub struct AccessorPlugin;

impl Plugin for AccessorPlugin {
    fn name(&self) -> &'static str {
        "accessor"
    }

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError> {
        let messages = ctx.file.messages.clone();
        for message in &messages {
            emit_message(ctx, message);
        }
        Ok(())
    }
}

/// Whether a field's Rust storage/operations are the "scalar" or
/// "message" shape, crossed with singular/repeated, per the table in
/// spec §4.4.
pub(crate) enum Shape {
    SingularScalar,
    SingularMessage,
    RepeatedScalar,
    RepeatedMessage,
}

pub(crate) fn shape(field: &FieldDescriptor) -> Shape {
    match (field.is_repeated(), field.field_type.is_message()) {
        (false, false) => Shape::SingularScalar,
        (false, true) => Shape::SingularMessage,
        (true, false) => Shape::RepeatedScalar,
        (true, true) => Shape::RepeatedMessage,
    }
}

pub(crate) fn scalar_rust_type(field_type: &FieldType) -> &'static str {
    match field_type {
        FieldType::Double => "f64",
        FieldType::Float => "f32",
        FieldType::Int32 | FieldType::Sint32 | FieldType::Sfixed32 => "i32",
        FieldType::Int64 | FieldType::Sint64 | FieldType::Sfixed64 => "i64",
        FieldType::Uint32 | FieldType::Fixed32 => "u32",
        FieldType::Uint64 | FieldType::Fixed64 => "u64",
        FieldType::Bool => "bool",
        FieldType::String => "String",
        FieldType::Bytes => "Vec<u8>",
        FieldType::Enum(_) => "i32",
        FieldType::Message(_) | FieldType::Group => unreachable!("not a scalar shape"),
    }
}

/// Renders a fully qualified message type name (`.pkg.Outer.Inner`) as a
/// path relative to the current file's own package.
pub(crate) fn message_rust_path(ctx: &FileContext, fq_type_name: &str) -> String {
    let trimmed = fq_type_name.trim_start_matches('.');
    let rel = if ctx.file.package.is_empty() {
        trimmed
    } else {
        trimmed
            .strip_prefix(&format!("{}.", ctx.file.package))
            .unwrap_or(trimmed)
    };
    rel.replace('.', "::")
}

/// The element type a field's storage holds, honoring `custom_type`.
pub(crate) fn element_rust_type(ctx: &FileContext, field: &FieldDescriptor) -> String {
    if let Some(custom) = &field.custom_type {
        return custom.clone();
    }
    match &field.field_type {
        FieldType::Message(fq) => message_rust_path(ctx, fq),
        other => scalar_rust_type(other).to_string(),
    }
}

/// True if the singular message field declared on `owner_fq` must be
/// boxed to break a reference cycle.
pub(crate) fn is_boxed(ctx: &FileContext, owner_fq: &str, field: &FieldDescriptor) -> bool {
    match &field.field_type {
        FieldType::Message(fq) => ctx.graph.should_box_field(owner_fq, fq),
        _ => false,
    }
}

enum StorageKind {
    Scalar {
        rust_type: String,
        set_flag: String,
    },
    Message {
        rust_type: String,
        set_flag: String,
        boxed: bool,
    },
    Repeated {
        rust_type: String,
        len_counter: String,
    },
}

fn storage_kind(ctx: &FileContext, fq_name: &str, field: &FieldDescriptor) -> StorageKind {
    let rust_type = element_rust_type(ctx, field);
    match shape(field) {
        Shape::SingularScalar => StorageKind::Scalar {
            rust_type,
            set_flag: ident::setter_flag(&field.name),
        },
        Shape::SingularMessage => StorageKind::Message {
            rust_type,
            set_flag: ident::setter_flag(&field.name),
            boxed: is_boxed(ctx, fq_name, field),
        },
        Shape::RepeatedScalar | Shape::RepeatedMessage => StorageKind::Repeated {
            rust_type,
            len_counter: ident::length_counter(&field.name),
        },
    }
}

fn emit_message(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let fq_name = ctx.fq_name(&message.type_name());

    emit_struct(ctx, message, &type_name, &fq_name);
    ctx.writer.blank();
    emit_impl(ctx, message, &type_name, &fq_name);
    ctx.writer.blank();
}

fn emit_struct(ctx: &mut FileContext, message: &MessageDescriptor, type_name: &str, fq_name: &str) {
    // Resolve every field's storage type before touching the writer, so
    // the immutable `ctx` borrows needed for type resolution don't
    // overlap with the mutable borrow `ctx.writer` needs below.
    let storage: Vec<(String, StorageKind)> = message
        .fields
        .iter()
        .map(|field| (ident::snake(&field.name), storage_kind(ctx, fq_name, field)))
        .collect();

    let w = &mut ctx.writer;
    w.emit_line("#[derive(Clone, Debug, Default, PartialEq)]");
    w.emit_line(format!("pub struct {type_name} {{"));
    w.indent();
    for (snake, kind) in &storage {
        match kind {
            StorageKind::Scalar { rust_type, set_flag } => {
                w.emit_line(format!("pub(crate) {snake}: {rust_type},"));
                w.emit_line(format!("pub(crate) {set_flag}: bool,"));
            }
            StorageKind::Message { rust_type, set_flag, boxed } => {
                let stored = if *boxed {
                    format!("Box<{rust_type}>")
                } else {
                    rust_type.clone()
                };
                w.emit_line(format!("pub(crate) {snake}: {stored},"));
                w.emit_line(format!("pub(crate) {set_flag}: bool,"));
            }
            StorageKind::Repeated { rust_type, len_counter } => {
                w.emit_line(format!("pub(crate) {snake}: Vec<{rust_type}>,"));
                w.emit_line(format!("pub(crate) {len_counter}: usize,"));
            }
        }
    }
    w.emit_line("pub(crate) xxx_size_cached: core::cell::Cell<u32>,");
    w.emit_line("pub(crate) xxx_unrecognized: Vec<u8>,");
    if message.has_extensions() {
        match message.extension_repr {
            Some(crate::descriptor::ExtensionRepr::Map) => {
                w.emit_line(
                    "pub(crate) xxx_extensions: std::collections::BTreeMap<u32, Vec<u8>>,",
                );
            }
            Some(crate::descriptor::ExtensionRepr::Bytes) => {
                w.emit_line("pub(crate) xxx_extensions: Vec<u8>,");
            }
            None => unreachable!(),
        }
    }
    w.outdent();
    w.emit_line("}");
}

fn emit_impl(ctx: &mut FileContext, message: &MessageDescriptor, type_name: &str, fq_name: &str) {
    ctx.writer.emit_line("#[allow(non_snake_case)]");
    ctx.writer.emit_line(format!("impl {type_name} {{"));
    ctx.writer.indent();
    let fields = message.fields.clone();
    for field in &fields {
        emit_field_ops(ctx, fq_name, field);
    }
    emit_message_clear(ctx, message);
    emit_size_cached(ctx);
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
}

fn emit_field_ops(ctx: &mut FileContext, fq_name: &str, field: &FieldDescriptor) {
    let camel = ident::camel(&field.name);
    let snake = ident::snake(&field.name);
    let set_flag = ident::setter_flag(&field.name);
    let len_counter = ident::length_counter(&field.name);
    let rust_type = element_rust_type(ctx, field);

    match shape(field) {
        Shape::SingularScalar => {
            let w = &mut ctx.writer;
            w.emit_line(format!("pub fn Has{camel}(&self) -> bool {{"));
            w.indent();
            w.emit_line(format!("self.{set_flag}"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Set{camel}(&mut self, value: {rust_type}) -> Result<(), pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!("self.{snake} = value;"));
            w.emit_line(format!("self.{set_flag} = true;"));
            w.emit_line("Ok(())");
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!("pub fn Clear{camel}(&mut self) {{"));
            w.indent();
            w.emit_line(format!("self.{snake} = Default::default();"));
            w.emit_line(format!("self.{set_flag} = false;"));
            w.outdent();
            w.emit_line("}");
            w.blank();
        }
        Shape::SingularMessage => {
            let boxed = is_boxed(ctx, fq_name, field);
            let w = &mut ctx.writer;

            w.emit_line(format!("pub fn Has{camel}(&self) -> bool {{"));
            w.indent();
            w.emit_line(format!("self.{set_flag}"));
            w.outdent();
            w.emit_line("}");

            let deref = if boxed { "&mut *" } else { "&mut " };
            w.emit_line(format!(
                "pub fn Mutate{camel}(&mut self) -> Result<&mut {rust_type}, pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!("self.{set_flag} = true;"));
            w.emit_line(format!("Ok({deref}self.{snake})"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!("pub fn Clear{camel}(&mut self) {{"));
            w.indent();
            w.emit_line(format!("self.{snake}.Clear();"));
            w.emit_line(format!("self.{set_flag} = false;"));
            w.outdent();
            w.emit_line("}");
            w.blank();
        }
        Shape::RepeatedScalar => {
            let w = &mut ctx.writer;

            w.emit_line(format!("pub fn {camel}Size(&self) -> usize {{"));
            w.indent();
            w.emit_line(format!("self.{len_counter}"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Add{camel}(&mut self, value: {rust_type}) -> Result<(), pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!(
                "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
            ));
            w.emit_line(format!("self.{snake}[self.{len_counter}] = value;"));
            w.emit_line(format!("self.{len_counter} += 1;"));
            w.emit_line("Ok(())");
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Set{camel}(&mut self, index: usize, value: {rust_type}) -> Result<(), pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!("if index >= self.{len_counter} {{"));
            w.indent();
            w.emit_line("return Err(pb_wire::Error::IndexOutOfBounds);");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("self.{snake}[index] = value;"));
            w.emit_line("Ok(())");
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Get{camel}(&self, index: usize) -> Result<{rust_type}, pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!("if index >= self.{len_counter} {{"));
            w.indent();
            w.emit_line("return Err(pb_wire::Error::IndexOutOfBounds);");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("Ok(self.{snake}[index].clone())"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!("pub fn Clear{camel}(&mut self) {{"));
            w.indent();
            w.emit_line(format!("self.{len_counter} = 0;"));
            w.outdent();
            w.emit_line("}");
            w.blank();
        }
        Shape::RepeatedMessage => {
            let w = &mut ctx.writer;

            w.emit_line(format!("pub fn {camel}Size(&self) -> usize {{"));
            w.indent();
            w.emit_line(format!("self.{len_counter}"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Add{camel}(&mut self) -> Result<&mut {rust_type}, pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!(
                "pb_wire::grow_to_fit(&mut self.{snake}, self.{len_counter} + 1);"
            ));
            w.emit_line(format!("self.{snake}[self.{len_counter}].Clear();"));
            w.emit_line(format!("let idx = self.{len_counter};"));
            w.emit_line(format!("self.{len_counter} += 1;"));
            w.emit_line(format!("Ok(&mut self.{snake}[idx])"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Mutate{camel}(&mut self, index: usize) -> Result<&mut {rust_type}, pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!("if index >= self.{len_counter} {{"));
            w.indent();
            w.emit_line("return Err(pb_wire::Error::IndexOutOfBounds);");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("Ok(&mut self.{snake}[index])"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!(
                "pub fn Get{camel}(&self, index: usize) -> Result<&{rust_type}, pb_wire::Error> {{"
            ));
            w.indent();
            w.emit_line(format!("if index >= self.{len_counter} {{"));
            w.indent();
            w.emit_line("return Err(pb_wire::Error::IndexOutOfBounds);");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("Ok(&self.{snake}[index])"));
            w.outdent();
            w.emit_line("}");

            w.emit_line(format!("pub fn Clear{camel}(&mut self) {{"));
            w.indent();
            w.emit_line(format!(
                "for item in &mut self.{snake}[..self.{len_counter}] {{"
            ));
            w.indent();
            w.emit_line("item.Clear();");
            w.outdent();
            w.emit_line("}");
            w.emit_line(format!("self.{len_counter} = 0;"));
            w.outdent();
            w.emit_line("}");
            w.blank();
        }
    }
}

fn emit_message_clear(ctx: &mut FileContext, message: &MessageDescriptor) {
    let w = &mut ctx.writer;
    w.emit_line("pub fn Clear(&mut self) {");
    w.indent();
    for field in &message.fields {
        let camel = ident::camel(&field.name);
        w.emit_line(format!("self.Clear{camel}();"));
    }
    w.emit_line("self.xxx_unrecognized.clear();");
    w.outdent();
    w.emit_line("}");
    w.blank();
}

fn emit_size_cached(ctx: &mut FileContext) {
    let w = &mut ctx.writer;
    w.emit_line("pub fn SizeCached(&self) -> usize {");
    w.indent();
    w.emit_line("self.xxx_size_cached.get() as usize");
    w.outdent();
    w.emit_line("}");
}
