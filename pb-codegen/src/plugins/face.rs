//! The "face" emitter: a read-only trait abstraction over a message, so
//! callers can program against an interface rather than the concrete
//! generated struct. Out of the core's scope (spec.md §1) beyond its
//! contract with the descriptor model and source-writer, which this
//! plugin consumes unchanged.
//!
//! `extensions` combined with `face` is rejected at descriptor
//! construction (spec §3/§7, `GenError::ExtensionsWithFace`), so this
//! plugin never has to reconcile a trait method with extension storage.

use crate::context::FileContext;
use crate::descriptor::MessageDescriptor;
use crate::error::GenError;
use crate::ident;
use crate::registry::Plugin;

use super::accessor::Shape;

pub struct FacePlugin;

impl Plugin for FacePlugin {
    fn name(&self) -> &'static str {
        "face"
    }

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError> {
        let messages = ctx.file.messages.clone();
        for message in &messages {
            if message.is_face {
                emit_message(ctx, message);
            }
        }
        Ok(())
    }
}

fn emit_message(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let fq_name = ctx.fq_name(&message.type_name());
    let trait_name = format!("{type_name}Face");
    let fields = message.fields.clone();

    ctx.writer.emit_line(format!("pub trait {trait_name} {{"));
    ctx.writer.indent();
    for field in &fields {
        emit_trait_method(ctx, field);
    }
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();

    ctx.writer.emit_line("#[allow(non_snake_case)]");
    ctx.writer.emit_line(format!("impl {trait_name} for {type_name} {{"));
    ctx.writer.indent();
    for field in &fields {
        emit_trait_impl(ctx, &fq_name, field);
    }
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();
}

fn emit_trait_method(ctx: &mut FileContext, field: &crate::descriptor::FieldDescriptor) {
    let camel = ident::camel(&field.name);
    let rust_type = super::accessor::element_rust_type(ctx, field);

    let signature = match super::accessor::shape(field) {
        Shape::SingularScalar => format!("fn Get{camel}(&self) -> {rust_type};"),
        Shape::SingularMessage => format!("fn Get{camel}(&self) -> Option<&{rust_type}>;"),
        Shape::RepeatedScalar | Shape::RepeatedMessage => {
            format!("fn Get{camel}(&self) -> &[{rust_type}];")
        }
    };
    ctx.writer.emit_line(signature);
}

fn emit_trait_impl(ctx: &mut FileContext, fq_name: &str, field: &crate::descriptor::FieldDescriptor) {
    let camel = ident::camel(&field.name);
    let snake = ident::snake(&field.name);
    let set_flag = ident::setter_flag(&field.name);
    let len_counter = ident::length_counter(&field.name);
    let rust_type = super::accessor::element_rust_type(ctx, field);

    match super::accessor::shape(field) {
        Shape::SingularScalar => {
            ctx.writer
                .emit_line(format!("fn Get{camel}(&self) -> {rust_type} {{"));
            ctx.writer.indent();
            ctx.writer.emit_line(format!("self.{snake}.clone()"));
            ctx.writer.outdent();
            ctx.writer.emit_line("}");
        }
        Shape::SingularMessage => {
            let boxed = super::accessor::is_boxed(ctx, fq_name, field);
            let deref = if boxed { "&*" } else { "&" };
            ctx.writer
                .emit_line(format!("fn Get{camel}(&self) -> Option<&{rust_type}> {{"));
            ctx.writer.indent();
            ctx.writer.emit_line(format!("if self.{set_flag} {{"));
            ctx.writer.indent();
            ctx.writer.emit_line(format!("Some({deref}self.{snake})"));
            ctx.writer.outdent();
            ctx.writer.emit_line("} else {");
            ctx.writer.indent();
            ctx.writer.emit_line("None");
            ctx.writer.outdent();
            ctx.writer.emit_line("}");
            ctx.writer.outdent();
            ctx.writer.emit_line("}");
        }
        Shape::RepeatedScalar | Shape::RepeatedMessage => {
            ctx.writer
                .emit_line(format!("fn Get{camel}(&self) -> &[{rust_type}] {{"));
            ctx.writer.indent();
            ctx.writer
                .emit_line(format!("&self.{snake}[..self.{len_counter}]"));
            ctx.writer.outdent();
            ctx.writer.emit_line("}");
        }
    }
}
