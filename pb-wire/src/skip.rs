use bytes::Buf;

use crate::{decode_varint, Error, WireType};

/// Consumes one field, including its tag-key, from the front of `buf` and
/// returns the bytes consumed (key + payload). Used both to skip unknown
/// fields (spec §4.6) and to stash extension bytes without interpreting
/// them.
///
/// `buf` must be positioned at the start of a tag-key varint; the caller
/// is responsible for rewinding to that position (spec §4.6: "rewind the
/// key bytes").
pub fn skip_field(buf: &mut impl Buf) -> Result<usize, Error> {
    let start_remaining = buf.remaining();
    let key = decode_varint(buf)?;
    let (_tag, wire_type) = crate::split_tag_key(key)?;
    match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
        }
        WireType::Fixed32 => {
            if buf.remaining() < 4 {
                return Err(Error::UnexpectedEof);
            }
            buf.advance(4);
        }
        WireType::Fixed64 => {
            if buf.remaining() < 8 {
                return Err(Error::UnexpectedEof);
            }
            buf.advance(8);
        }
        WireType::Len => {
            let len = decode_varint(buf)?;
            let len = usize::try_from(len).map_err(|_| Error::UnexpectedEof)?;
            if buf.remaining() < len {
                return Err(Error::UnexpectedEof);
            }
            buf.advance(len);
        }
    }
    Ok(start_remaining - buf.remaining())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_unknown_varint_field() {
        // spec scenario 5: decode `08 01 50 ff ff 01`, tag 10 is unknown.
        let input = [0x08u8, 0x01, 0x50, 0xff, 0xff, 0x01];
        let mut slice = &input[..];
        // consume the known field1 = 1 manually first.
        let _key = decode_varint(&mut slice).unwrap();
        let _value = decode_varint(&mut slice).unwrap();

        let unknown_start = slice;
        let consumed = skip_field(&mut slice.clone()).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(&unknown_start[..consumed], &[0x50, 0xff, 0xff, 0x01]);
    }

    #[test]
    fn truncated_length_delimited_field_is_eof() {
        // key for a LEN field (tag 2) followed by a length that overruns.
        let input = [0x12u8, 0x05, 0x01, 0x02];
        let mut slice = &input[..];
        assert_eq!(skip_field(&mut slice), Err(Error::UnexpectedEof));
    }
}
