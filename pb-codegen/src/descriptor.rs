//! The in-memory schema that every emitter consumes (spec §3). Read-only
//! once built; construction is the only place invariants are checked.

use crate::error::GenError;

/// A field's cardinality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Optional,
    Required,
    Repeated,
}

/// A field's declared Protobuf type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    /// Carries the referenced message's dotted type path.
    Message(String),
    /// Carries the referenced enum's dotted type path.
    Enum(String),
    /// Unsupported; surviving to this point is itself a bug, but kept as
    /// a variant so lowering can report `GenError::UnsupportedGroup`
    /// with field context before rejecting it.
    Group,
}

impl FieldType {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldType::Message(_) | FieldType::Group)
    }

    pub fn is_message(&self) -> bool {
        matches!(self, FieldType::Message(_))
    }

    /// The wire type a non-packed occurrence of this type is framed with.
    pub fn scalar_wire_type(&self) -> pb_wire::WireType {
        use pb_wire::WireType::*;
        match self {
            FieldType::Int32
            | FieldType::Int64
            | FieldType::Uint32
            | FieldType::Uint64
            | FieldType::Sint32
            | FieldType::Sint64
            | FieldType::Bool
            | FieldType::Enum(_) => Varint,
            FieldType::Double | FieldType::Fixed64 | FieldType::Sfixed64 => Fixed64,
            FieldType::Float | FieldType::Fixed32 | FieldType::Sfixed32 => Fixed32,
            FieldType::String | FieldType::Bytes | FieldType::Message(_) => Len,
            FieldType::Group => Len, // unreachable post-validation
        }
    }
}

/// A single field of a [`MessageDescriptor`].
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub tag: u32,
    pub label: Label,
    pub field_type: FieldType,
    pub packed: bool,
    pub custom_type: Option<String>,
    pub embed: bool,
    pub nullable: bool,
}

impl FieldDescriptor {
    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }

    /// The wire type this occurrence is actually framed with: packed
    /// repeated scalars use `LEN` regardless of their element type.
    pub fn wire_type(&self) -> pb_wire::WireType {
        if self.is_repeated() && self.packed && self.field_type.is_scalar() {
            pb_wire::WireType::Len
        } else {
            self.field_type.scalar_wire_type()
        }
    }

    /// True for scalar types that packed encoding applies to: every
    /// scalar except STRING/BYTES (which are already LEN-framed and
    /// gain nothing from packing) and MESSAGE/GROUP.
    pub fn is_packable(&self) -> bool {
        self.field_type.is_scalar()
            && !matches!(self.field_type, FieldType::String | FieldType::Bytes)
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}
impl Eq for Label {}

/// How a message with `has_extensions` stores the bytes it doesn't
/// otherwise understand but must preserve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtensionRepr {
    /// tag -> opaque encoded bytes.
    Map,
    /// Raw concatenation of the encoded extension fields.
    Bytes,
}

/// A message type and every codegen-relevant option attached to it.
#[derive(Clone, Debug)]
pub struct MessageDescriptor {
    /// Dotted path of enclosing type names, innermost last.
    pub path: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub extension_ranges: Vec<(i32, i32)>,
    pub extension_repr: Option<ExtensionRepr>,
    pub is_marshaler: bool,
    pub is_unmarshaler: bool,
    pub is_stringer: bool,
    pub is_face: bool,
    pub has_testgen: bool,
    pub has_benchgen: bool,
    pub has_verbose_equal: bool,
    pub goproto_getters_disabled: bool,
}

impl MessageDescriptor {
    pub fn has_extensions(&self) -> bool {
        self.extension_repr.is_some()
    }

    /// The dotted name, e.g. `Outer.Inner`.
    pub fn type_name(&self) -> String {
        self.path.join(".")
    }

    /// Validates every invariant from spec §3. Called once at
    /// construction time; emitters may assume all of these hold.
    pub fn validate(&self) -> Result<(), GenError> {
        let message = self.type_name();

        if self.extension_repr.is_some() && self.is_face {
            return Err(GenError::ExtensionsWithFace {
                message: message.clone(),
            });
        }

        let mut seen_tags: std::collections::HashMap<u32, &str> = std::collections::HashMap::new();
        for field in &self.fields {
            if field.field_type == FieldType::Group {
                return Err(GenError::UnsupportedGroup {
                    message: message.clone(),
                    field: field.name.clone(),
                });
            }
            if matches!(field.field_type, FieldType::Enum(_)) && field.custom_type.is_some() {
                return Err(GenError::EnumWithCustomType {
                    message: message.clone(),
                    field: field.name.clone(),
                });
            }
            if field.packed && !(field.is_repeated() && field.is_packable()) {
                return Err(GenError::InvalidPackedFlag {
                    message: message.clone(),
                    field: field.name.clone(),
                });
            }
            if let Some(first) = seen_tags.insert(field.tag, &field.name) {
                return Err(GenError::DuplicateTag {
                    message: message.clone(),
                    tag: field.tag,
                    first_field: first.to_string(),
                    second_field: field.name.clone(),
                });
            }
        }

        let mut ranges = self.extension_ranges.clone();
        ranges.sort_by_key(|&(start, _)| start);
        for pair in ranges.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.1 > b.0 {
                return Err(GenError::OverlappingExtensionRanges {
                    message: message.clone(),
                    first: a,
                    second: b,
                });
            }
        }

        Ok(())
    }

    /// True if `tag` falls inside any declared extension range.
    pub fn tag_is_extension(&self, tag: u32) -> bool {
        let tag = tag as i32;
        self.extension_ranges
            .iter()
            .any(|&(start, end)| tag >= start && tag < end)
    }
}

impl FieldType {
    fn eq_variant(&self, other: &FieldType) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}
impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        self.eq_variant(other)
    }
}
impl Eq for FieldType {}

/// A `.proto` file's worth of message declarations.
#[derive(Clone, Debug)]
pub struct FileDescriptor {
    pub package: String,
    /// Short, file-scoped suffix used to namespace per-file helper
    /// functions (spec §4.2 `fileLocal`).
    pub local_name: String,
    pub messages: Vec<MessageDescriptor>,
}

impl FileDescriptor {
    pub fn validate(&self) -> Result<(), GenError> {
        for message in &self.messages {
            message.validate()?;
        }
        Ok(())
    }
}
