//! The debug-string emitter. Out of the core's scope (spec.md §1) beyond
//! its contract with the descriptor model and source-writer: it must
//! consume both unchanged, which is the only thing this plugin actually
//! exercises.
//!
//! Emits a recursive `String(&self) -> String` per message with
//! `is_stringer`, printing `Field: value` pairs for every set singular
//! field and every element of every non-empty repeated field, in
//! declaration order. Unset singular fields and empty repeated fields
//! are omitted, matching the common gogo-protobuf convention of not
//! printing absent values.

use crate::context::FileContext;
use crate::descriptor::MessageDescriptor;
use crate::error::GenError;
use crate::ident;
use crate::registry::Plugin;

use super::accessor::Shape;

pub struct StringerPlugin;

impl Plugin for StringerPlugin {
    fn name(&self) -> &'static str {
        "stringer"
    }

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError> {
        let messages = ctx.file.messages.clone();
        for message in &messages {
            if message.is_stringer {
                emit_message(ctx, message);
            }
        }
        Ok(())
    }
}

fn emit_message(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let fields = message.fields.clone();

    ctx.writer.emit_line("#[allow(non_snake_case)]");
    ctx.writer.emit_line(format!("impl {type_name} {{"));
    ctx.writer.indent();
    ctx.writer.emit_line("pub fn String(&self) -> String {");
    ctx.writer.indent();
    ctx.writer.emit_line("let mut parts: Vec<String> = Vec::new();");

    for field in &fields {
        let snake = ident::snake(&field.name);
        let set_flag = ident::setter_flag(&field.name);
        let len_counter = ident::length_counter(&field.name);
        let label = field.name.clone();

        match super::accessor::shape(field) {
            Shape::SingularScalar => {
                ctx.writer.emit_line(format!("if self.{set_flag} {{"));
                ctx.writer.indent();
                ctx.writer.emit_line(format!(
                    "parts.push(format!(\"{label}: {{:?}}\", self.{snake}));"
                ));
                ctx.writer.outdent();
                ctx.writer.emit_line("}");
            }
            Shape::SingularMessage => {
                ctx.writer.emit_line(format!("if self.{set_flag} {{"));
                ctx.writer.indent();
                ctx.writer.emit_line(format!(
                    "parts.push(format!(\"{label}: <{{}}>\", self.{snake}.String()));"
                ));
                ctx.writer.outdent();
                ctx.writer.emit_line("}");
            }
            Shape::RepeatedScalar => {
                ctx.writer.emit_line(format!("if self.{len_counter} > 0 {{"));
                ctx.writer.indent();
                ctx.writer.emit_line(format!(
                    "parts.push(format!(\"{label}: {{:?}}\", &self.{snake}[..self.{len_counter}]));"
                ));
                ctx.writer.outdent();
                ctx.writer.emit_line("}");
            }
            Shape::RepeatedMessage => {
                ctx.writer.emit_line(format!("if self.{len_counter} > 0 {{"));
                ctx.writer.indent();
                ctx.writer.emit_line(format!(
                    "let items: Vec<String> = self.{snake}[..self.{len_counter}].iter().map(|item| item.String()).collect();"
                ));
                ctx.writer.emit_line(format!(
                    "parts.push(format!(\"{label}: [{{}}]\", items.join(\", \")));"
                ));
                ctx.writer.outdent();
                ctx.writer.emit_line("}");
            }
        }
    }

    let mut closing_line = String::new();
    closing_line.push_str("format!(\"");
    closing_line.push_str(&type_name);
    closing_line.push_str(" {{{}}}\", parts.join(\", \"))");
    ctx.writer.emit_line(closing_line);
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();

    ctx.writer.emit_line(format!("impl core::fmt::Display for {type_name} {{"));
    ctx.writer.indent();
    ctx.writer.emit_line(
        "fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {",
    );
    ctx.writer.indent();
    ctx.writer.emit_line("f.write_str(&self.String())");
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();
}
