use crate::Error;

/// The 3-bit wire-type tag that accompanies every field key on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    Len = 2,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_u64(value: u64) -> Result<WireType, Error> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::Len),
            5 => Ok(WireType::Fixed32),
            _ => Err(Error::WrongWireType),
        }
    }
}

/// Packs a field number and wire type into the varint-encoded tag-key:
/// `(tag << 3) | wire_type`.
#[inline]
pub fn tag_key(tag: u32, wire_type: WireType) -> u64 {
    (u64::from(tag) << 3) | wire_type as u64
}

/// Splits a decoded tag-key varint back into `(tag, wire_type)`.
#[inline]
pub fn split_tag_key(key: u64) -> Result<(u32, WireType), Error> {
    let wire_type = WireType::from_u64(key & 0x7)?;
    let tag = u32::try_from(key >> 3).map_err(|_| Error::WrongWireType)?;
    Ok((tag, wire_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_splits_tag_key() {
        // field1 int64 (VARINT) -> key 0x08, as in spec scenario 1.
        assert_eq!(tag_key(1, WireType::Varint), 0x08);
        assert_eq!(split_tag_key(0x08).unwrap(), (1, WireType::Varint));

        // field2 string (LEN) -> key 0x12.
        assert_eq!(tag_key(2, WireType::Len), 0x12);
        assert_eq!(split_tag_key(0x12).unwrap(), (2, WireType::Len));

        // inner message at tag 3 -> key 0x1a, as in scenario 4.
        assert_eq!(tag_key(3, WireType::Len), 0x1a);
    }

    #[test]
    fn rejects_unknown_wire_type() {
        assert_eq!(WireType::from_u64(3), Err(Error::WrongWireType));
        assert_eq!(WireType::from_u64(6), Err(Error::WrongWireType));
    }
}
