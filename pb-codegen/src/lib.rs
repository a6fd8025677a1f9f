//! A Protocol Buffers code generator plugin suite (spec.md §1): given a
//! parsed `.proto` schema, emits a C++-style accessor API, a length-
//! prefix/varint wire-format marshaller and unmarshaller, a recursive
//! debug-printer, a "face" trait abstraction, and a companion test
//! generator.
//!
//! The core this crate exists for is the wire-format codec emitter
//! ([`plugins::accessor`], [`plugins::marshal`], [`plugins::unmarshal`]).
//! The remaining plugins are out of scope beyond their contract with the
//! shared [`descriptor`] model and [`writer::Writer`]: they must keep
//! consuming both unchanged.

pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod ident;
pub mod imports;
pub mod lower;
pub mod message_graph;
pub mod plugins;
pub mod registry;
pub mod writer;

use registry::Registry;

/// Builds the registry in spec §4.7's mandated order: the core codec
/// emitters first (`accessor` before `marshal`/`unmarshal`, since both
/// depend on the storage fields `accessor` declares), then the
/// out-of-scope-but-contract-compatible emitters.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(Box::new(plugins::AccessorPlugin))
        .expect("accessor is the first registration; cannot collide");
    registry
        .register(Box::new(plugins::MarshalPlugin))
        .expect("marshal is the second registration; cannot collide");
    registry
        .register(Box::new(plugins::UnmarshalPlugin))
        .expect("unmarshal is the third registration; cannot collide");
    registry
        .register(Box::new(plugins::StringerPlugin))
        .expect("stringer is the fourth registration; cannot collide");
    registry
        .register(Box::new(plugins::FacePlugin))
        .expect("face is the fifth registration; cannot collide");
    registry
        .register(Box::new(plugins::TestgenPlugin))
        .expect("testgen is the sixth registration; cannot collide");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_registers_every_plugin_once() {
        let mut registry = default_registry();
        let file = descriptor::FileDescriptor {
            package: String::new(),
            local_name: "f".to_string(),
            messages: vec![],
        };
        let graph = message_graph::MessageGraph::new(std::iter::once(&file));
        assert!(registry.generate_file(&file, &graph).unwrap().is_empty());
    }
}
