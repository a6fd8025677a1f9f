use core::fmt;

/// Fatal, generator-time errors (spec §7). These terminate the process
/// with a diagnostic; no partial output file is ever written once one of
/// these is raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenError {
    /// A GROUP-typed field was encountered; groups are unsupported.
    UnsupportedGroup { message: String, field: String },
    /// A field declared ENUM type together with a `custom_type` option.
    EnumWithCustomType { message: String, field: String },
    /// A message requested both extensions and the `face` option.
    ExtensionsWithFace { message: String },
    /// Two tag numbers collided within one message.
    DuplicateTag {
        message: String,
        tag: u32,
        first_field: String,
        second_field: String,
    },
    /// Two extension ranges for the same message overlap.
    OverlappingExtensionRanges {
        message: String,
        first: (i32, i32),
        second: (i32, i32),
    },
    /// `packed = true` on a field that isn't a repeated scalar.
    InvalidPackedFlag { message: String, field: String },
    /// Two plugins registered under the same name.
    DuplicatePlugin { name: String },
    /// The descriptor set was missing data the lowering pass requires.
    MalformedDescriptor { detail: String },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::UnsupportedGroup { message, field } => write!(
                f,
                "{message}.{field}: GROUP fields are not supported by the codec emitters"
            ),
            GenError::EnumWithCustomType { message, field } => write!(
                f,
                "{message}.{field}: an ENUM field cannot also declare custom_type"
            ),
            GenError::ExtensionsWithFace { message } => write!(
                f,
                "{message}: a message with extensions cannot also request the face plugin"
            ),
            GenError::DuplicateTag {
                message,
                tag,
                first_field,
                second_field,
            } => write!(
                f,
                "{message}: tag {tag} used by both {first_field} and {second_field}"
            ),
            GenError::OverlappingExtensionRanges {
                message,
                first,
                second,
            } => write!(
                f,
                "{message}: extension ranges {first:?} and {second:?} overlap"
            ),
            GenError::InvalidPackedFlag { message, field } => write!(
                f,
                "{message}.{field}: packed=true is only valid on repeated scalar fields"
            ),
            GenError::DuplicatePlugin { name } => {
                write!(f, "plugin \"{name}\" is already registered")
            }
            GenError::MalformedDescriptor { detail } => {
                write!(f, "malformed descriptor: {detail}")
            }
        }
    }
}

impl std::error::Error for GenError {}
