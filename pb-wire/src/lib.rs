//! Runtime primitives referenced by code emitted by `pb-codegen`.
//!
//! Generated messages link against the types in this crate ([`Error`],
//! [`WireType`]) directly, but the varint and fixed-width encode/decode
//! *functions* are deliberately re-emitted, with a per-file name suffix,
//! into every generated file (see `pb_codegen::ident::fileLocal`) rather
//! than called through this crate. This module is therefore both the
//! shared vocabulary and the canonical reference implementation that
//! those per-file copies are generated from.

#![forbid(unsafe_code)]

mod error;
mod fixed;
mod growth;
mod skip;
mod varint;
mod wire_type;
mod zigzag;

pub use error::Error;
pub use growth::grow_to_fit;
pub use fixed::{decode_fixed32, decode_fixed64, encode_fixed32, encode_fixed64};
pub use skip::skip_field;
pub use varint::{decode_varint, encode_varint, encoded_len_varint};
pub use wire_type::{tag_key, split_tag_key, WireType};
pub use zigzag::{decode_zigzag32, decode_zigzag64, encode_zigzag32, encode_zigzag64};
