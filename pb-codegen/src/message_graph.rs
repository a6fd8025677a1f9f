//! Detects recursive message nesting (spec §9 "Recursion cycles") so the
//! accessor emitter knows which singular message fields must box their
//! child to keep the generated struct's size finite. Adapted from
//! `prost-build`'s `MessageGraph`, generalized from "is `inner` nested in
//! `outer`" to "does taking this field create a cycle back to its own
//! message".

use std::collections::HashMap;

use petgraph::algo::has_path_connecting;
use petgraph::graph::NodeIndex;
use petgraph::Graph;

use crate::descriptor::{FieldType, FileDescriptor, Label};

pub struct MessageGraph {
    index: HashMap<String, NodeIndex>,
    graph: Graph<String, ()>,
}

impl MessageGraph {
    pub fn new<'a>(files: impl Iterator<Item = &'a FileDescriptor>) -> MessageGraph {
        let mut g = MessageGraph {
            index: HashMap::new(),
            graph: Graph::new(),
        };
        for file in files {
            for message in &file.messages {
                let msg_name = fq_name(&file.package, &message.path.join("."));
                let msg_index = g.get_or_insert(msg_name);
                for field in &message.fields {
                    if let FieldType::Message(type_name) = &field.field_type {
                        if field.label != Label::Repeated {
                            let field_index = g.get_or_insert(type_name.clone());
                            g.graph.add_edge(msg_index, field_index, ());
                        }
                    }
                }
            }
        }
        g
    }

    fn get_or_insert(&mut self, name: String) -> NodeIndex {
        let MessageGraph { index, graph } = self;
        *index.entry(name.clone()).or_insert_with(|| graph.add_node(name))
    }

    /// True if a message with fully qualified name `inner` is reachable
    /// from `outer` by following singular message-field edges.
    pub fn is_nested(&self, outer: &str, inner: &str) -> bool {
        let (Some(&outer), Some(&inner)) = (self.index.get(outer), self.index.get(inner)) else {
            return false;
        };
        has_path_connecting(&self.graph, outer, inner, None)
    }

    /// A singular message field must be boxed when its declared type can
    /// reach the field's own enclosing message: direct self-reference
    /// (`A` contains optional `A`) or mutual recursion (`A` -> `B` -> `A`).
    pub fn should_box_field(&self, owner_fq_name: &str, field_type_fq_name: &str) -> bool {
        owner_fq_name == field_type_fq_name || self.is_nested(field_type_fq_name, owner_fq_name)
    }

    #[cfg(test)]
    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn fq_name(package: &str, type_name: &str) -> String {
    if package.is_empty() {
        format!(".{type_name}")
    } else {
        format!(".{package}.{type_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, MessageDescriptor};

    fn message(name: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
        MessageDescriptor {
            path: vec![name.to_string()],
            fields,
            extension_ranges: vec![],
            extension_repr: None,
            is_marshaler: true,
            is_unmarshaler: true,
            is_stringer: false,
            is_face: false,
            has_testgen: false,
            has_benchgen: false,
            has_verbose_equal: false,
            goproto_getters_disabled: false,
        }
    }

    fn msg_field(name: &str, type_name: &str, repeated: bool) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            tag: 1,
            label: if repeated {
                Label::Repeated
            } else {
                Label::Optional
            },
            field_type: FieldType::Message(type_name.to_string()),
            packed: false,
            custom_type: None,
            embed: false,
            nullable: true,
        }
    }

    #[test]
    fn self_reference_must_be_boxed() {
        let file = FileDescriptor {
            package: "p".to_string(),
            local_name: "f".to_string(),
            messages: vec![message("A", vec![msg_field("child", ".p.A", false)])],
        };
        let graph = MessageGraph::new(std::iter::once(&file));
        assert!(graph.should_box_field(".p.A", ".p.A"));
    }

    #[test]
    fn mutual_recursion_must_be_boxed() {
        let file = FileDescriptor {
            package: "p".to_string(),
            local_name: "f".to_string(),
            messages: vec![
                message("A", vec![msg_field("b", ".p.B", false)]),
                message("B", vec![msg_field("a", ".p.A", false)]),
            ],
        };
        let graph = MessageGraph::new(std::iter::once(&file));
        assert!(graph.should_box_field(".p.A", ".p.B"));
        assert!(graph.should_box_field(".p.B", ".p.A"));
    }

    #[test]
    fn repeated_message_field_is_never_flagged() {
        let file = FileDescriptor {
            package: "p".to_string(),
            local_name: "f".to_string(),
            messages: vec![message("A", vec![msg_field("children", ".p.A", true)])],
        };
        let graph = MessageGraph::new(std::iter::once(&file));
        // repeated fields are already Vec-backed, so no cycle edge was added.
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn acyclic_nesting_is_not_boxed() {
        let file = FileDescriptor {
            package: "p".to_string(),
            local_name: "f".to_string(),
            messages: vec![
                message("A", vec![msg_field("b", ".p.B", false)]),
                message("B", vec![]),
            ],
        };
        let graph = MessageGraph::new(std::iter::once(&file));
        assert!(!graph.should_box_field(".p.A", ".p.B"));
    }
}
