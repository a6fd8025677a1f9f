//! The concrete plugins registered by [`crate::default_registry`] (spec
//! §4.7). `accessor`, `marshal`, and `unmarshal` are the core this
//! specification is about; `stringer`, `face`, and `testgen` are the
//! out-of-scope-but-contract-compatible emitters spec.md §1 requires to
//! keep working against the same descriptor model and source-writer.

pub mod accessor;
pub mod face;
pub mod marshal;
pub mod stringer;
pub mod testgen;
pub mod unmarshal;

pub use accessor::AccessorPlugin;
pub use face::FacePlugin;
pub use marshal::MarshalPlugin;
pub use stringer::StringerPlugin;
pub use testgen::TestgenPlugin;
pub use unmarshal::UnmarshalPlugin;
