//! Asserts on the marshal plugin's rendered source text (spec §4.5):
//! per-file helper suffixing, packed-vs-unpacked size/encode bodies, and
//! the child-message `Box`-transparent recursive encode.

mod support;

use pb_codegen::context::FileContext;
use pb_codegen::message_graph::MessageGraph;
use pb_codegen::plugins::MarshalPlugin;
use pb_codegen::registry::Plugin;

fn render(file: &pb_codegen::descriptor::FileDescriptor, graph: &MessageGraph) -> String {
    let mut ctx = FileContext::new(file, graph);
    MarshalPlugin.generate(&mut ctx).unwrap();
    ctx.finish()
}

#[test]
fn per_file_helpers_are_suffixed_with_the_file_local_name() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("fn encode_varint_sample_proto(value: u64, buf: &mut impl bytes::BufMut) {"));
    assert!(out.contains("fn encoded_len_varint_sample_proto(value: u64) -> usize {"));
    assert!(out.contains("pb_wire::encode_varint(value, buf)"));
}

#[test]
fn marshal_and_marshal_to_delegate_through_cached_size() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("pub fn Marshal(&self) -> Result<Vec<u8>, pb_wire::Error> {"));
    assert!(out.contains("self.MarshalToUsingCachedSize(&mut buf)?;"));
    assert!(out.contains("pub fn MarshalTo(&self, buf: &mut [u8]) -> Result<usize, pb_wire::Error> {"));
    assert!(out.contains("return Err(pb_wire::Error::BufferTooSmall);"));
}

#[test]
fn packed_repeated_scalar_writes_one_len_envelope() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("if self.xxx_LenPacked > 0 {"));
    assert!(out.contains("let mut payload_len = 0usize;"));
    assert!(out.contains("encode_varint_sample_proto(payload_len as u64, &mut cursor);"));
}

#[test]
fn unpacked_repeated_scalar_writes_one_tag_key_per_element() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("for value in &self.unpacked[..self.xxx_LenUnpacked] {"));
}

#[test]
fn boxed_child_message_is_written_through_a_transparent_deref() {
    let file = support::sample_file();
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);

    assert!(out.contains("let child_len = self.child.Size();"));
    assert!(out.contains("let (child_buf, rest) = cursor.split_at_mut(child_len);"));
    assert!(out.contains("self.child.MarshalToUsingCachedSize(child_buf).map_err(pb_wire::Error::into_child)?;"));
}

#[test]
fn plugin_emits_nothing_when_no_message_is_a_marshaler() {
    let mut tree = support::message(
        &["Quiet"],
        vec![support::field(
            "value",
            1,
            pb_codegen::descriptor::FieldType::Int32,
            pb_codegen::descriptor::Label::Optional,
            false,
        )],
    );
    tree.is_marshaler = false;
    let file = support::file("quiet", "quiet_proto", vec![tree]);
    let graph = MessageGraph::new(std::iter::once(&file));
    let out = render(&file, &graph);
    assert!(out.is_empty());
}
