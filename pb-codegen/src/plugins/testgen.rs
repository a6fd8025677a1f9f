//! The test/benchmark emitter. Out of the core's scope (spec.md §1)
//! beyond its contract with the descriptor model and source-writer: it
//! emits a `#[cfg(test)]` module per message with `has_testgen`,
//! exercising the round-trip property the core's marshaller/unmarshaller
//! must satisfy (spec §8 Property 1). A companion throwaway-iteration
//! smoke test is emitted for `has_benchgen`, since the workspace carries
//! no benchmark harness dependency to drive a real `#[bench]`.
//!
//! Both require `is_marshaler`/`is_unmarshaler` to be meaningful; a
//! message with `has_testgen` but neither codec enabled gets no test
//! (there would be nothing to round-trip).

use crate::context::FileContext;
use crate::descriptor::MessageDescriptor;
use crate::error::GenError;
use crate::ident;
use crate::registry::Plugin;

pub struct TestgenPlugin;

impl Plugin for TestgenPlugin {
    fn name(&self) -> &'static str {
        "testgen"
    }

    fn generate(&self, ctx: &mut FileContext) -> Result<(), GenError> {
        let messages = ctx.file.messages.clone();
        let any = messages
            .iter()
            .any(|m| (m.has_testgen || m.has_benchgen) && m.is_marshaler && m.is_unmarshaler);
        if !any {
            return Ok(());
        }

        ctx.writer.emit_line("#[cfg(test)]");
        ctx.writer.emit_line("mod generated_tests {");
        ctx.writer.indent();
        ctx.writer.emit_line("use super::*;");
        ctx.writer.blank();
        for message in &messages {
            if !(message.is_marshaler && message.is_unmarshaler) {
                continue;
            }
            if message.has_testgen {
                emit_roundtrip_test(ctx, message);
            }
            if message.has_benchgen {
                emit_bench_smoke_test(ctx, message);
            }
        }
        ctx.writer.outdent();
        ctx.writer.emit_line("}");
        ctx.writer.blank();
        Ok(())
    }
}

fn emit_roundtrip_test(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let test_name = format!("{}_marshal_unmarshal_round_trip", ident::snake(&type_name));

    ctx.writer.emit_line("#[test]");
    ctx.writer.emit_line(format!("fn {test_name}() {{"));
    ctx.writer.indent();
    ctx.writer.emit_line(format!("let original = {type_name}::default();"));
    ctx.writer.emit_line("let encoded = original.Marshal().expect(\"encoding a default message never fails\");");
    ctx.writer.emit_line(format!("assert_eq!(encoded.len(), original.SizeCached());"));
    ctx.writer.emit_line(format!("let mut decoded = {type_name}::default();"));
    ctx.writer.emit_line("decoded.Unmarshal(&encoded).expect(\"decoding freshly encoded bytes never fails\");");
    ctx.writer.emit_line("assert_eq!(original, decoded);");
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();
}

fn emit_bench_smoke_test(ctx: &mut FileContext, message: &MessageDescriptor) {
    let type_name = ident::camel_slice(&message.path);
    let test_name = format!("{}_marshal_many_times", ident::snake(&type_name));

    ctx.writer.emit_line("#[test]");
    ctx.writer.emit_line(format!("fn {test_name}() {{"));
    ctx.writer.indent();
    ctx.writer.emit_line(format!("let value = {type_name}::default();"));
    ctx.writer.emit_line("for _ in 0..1000 {");
    ctx.writer.indent();
    ctx.writer.emit_line("let _ = value.Marshal().expect(\"encoding a default message never fails\");");
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.outdent();
    ctx.writer.emit_line("}");
    ctx.writer.blank();
}
