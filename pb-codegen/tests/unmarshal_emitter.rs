//! Asserts on the unmarshal plugin's rendered source text (spec §4.6):
//! the packed/unpacked wire-type leniency, nested-message error
//! propagation, and unknown-field preservation.

mod support;

use pb_codegen::context::FileContext;
use pb_codegen::message_graph::MessageGraph;
use pb_codegen::plugins::UnmarshalPlugin;
use pb_codegen::registry::Plugin;

fn render(file: &pb_codegen::descriptor::FileDescriptor, graph: &MessageGraph) -> String {
    let mut ctx = FileContext::new(file, graph);
    UnmarshalPlugin.generate(&mut ctx).unwrap();
    ctx.finish()
}

#[test]
fn unmarshal_delegates_to_merge_from_over_a_whole_slice() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("pub fn Unmarshal(&mut self, data: &[u8]) -> Result<(), pb_wire::Error> {"));
    assert!(out.contains("let mut cursor = data;"));
    assert!(out.contains("self.MergeFrom(&mut cursor)"));
}

#[test]
fn declared_packed_scalar_field_still_accepts_unpacked_wire_type() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    // field `packed` is declared packed=true, but its decoder still
    // matches on both wire types rather than hard-rejecting Varint.
    assert!(out.contains("1 => {"));
    assert!(out.contains("pb_wire::WireType::Varint => {"));
    assert!(out.contains("pb_wire::WireType::Len => {"));
    assert!(out.contains("_ => return Err(pb_wire::Error::WrongWireType),"));
}

#[test]
fn declared_unpacked_scalar_field_also_accepts_a_packed_len_run() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    // field `unpacked` is declared packed=false; it's still packable
    // (int32), so it goes through the same dual-wire-type match arm.
    assert!(out.contains("2 => {"));
    assert!(out.contains("let mut packed = bytes::Buf::take(&mut *buf, len);"));
}

#[test]
fn nested_message_decode_failure_propagates_via_into_child() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains(
        "self.child.MergeFrom(&mut child_buf).map_err(pb_wire::Error::into_child)?;"
    ));
}

#[test]
fn unknown_tags_are_stashed_into_unrecognized_bytes() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("_ => {"));
    assert!(out.contains("self.xxx_unrecognized.extend_from_slice(&key_bytes);"));
    assert!(out.contains("skip_value_sample_proto(wire_type, buf, &mut self.xxx_unrecognized)?;"));
}

#[test]
fn tags_inside_an_extension_range_are_stashed_separately_from_unknown_tags() {
    let value_field = support::field(
        "value",
        1,
        pb_codegen::descriptor::FieldType::Int32,
        pb_codegen::descriptor::Label::Optional,
        false,
    );
    let message = support::message_with_extensions(&["WithExt"], vec![value_field], vec![(100, 200)]);
    let file = support::file("ext", "ext_proto", vec![message]);
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("100..=199 => {"));
    assert!(out.contains("self.xxx_extensions.extend_from_slice(&key_bytes);"));
}
