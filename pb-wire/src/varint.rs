use bytes::{Buf, BufMut};
use core::cmp::min;

use crate::Error;

/// Encodes `value` as a base-128 little-endian varint, high bit set on
/// every byte but the last. Never more than 10 bytes.
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut impl BufMut) {
    for _ in 0..10 {
        if value < 0x80 {
            buf.put_u8(value as u8);
            break;
        } else {
            buf.put_u8(((value & 0x7F) | 0x80) as u8);
            value >>= 7;
        }
    }
}

/// The number of bytes `encode_varint` would write for `value`; always
/// between 1 and 10 inclusive.
#[inline]
pub fn encoded_len_varint(value: u64) -> usize {
    ((((value | 1).leading_zeros() ^ 63) * 9 + 73) / 64) as usize
}

/// Decodes a varint from the front of `buf`, advancing it past the bytes
/// consumed. Returns [`Error::UnexpectedEof`] if the buffer runs out
/// mid-varint, or [`Error::VarintOverflow`] if more than 10 bytes are
/// read without terminating.
#[inline]
pub fn decode_varint(buf: &mut impl Buf) -> Result<u64, Error> {
    let mut value = 0u64;
    for count in 0..min(10, buf.remaining()) {
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7F) << (count * 7);
        if byte <= 0x7F {
            if count == 9 && byte >= 0x02 {
                return Err(Error::VarintOverflow);
            }
            return Ok(value);
        }
    }
    if buf.remaining() == 0 {
        Err(Error::UnexpectedEof)
    } else {
        Err(Error::VarintOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: u64, encoded: &[u8]) {
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);
        assert_eq!(buf, encoded);
        assert_eq!(encoded_len_varint(value), encoded.len());

        let mut slice = &encoded[..];
        assert_eq!(decode_varint(&mut slice).unwrap(), value);
        assert!(slice.is_empty());
    }

    #[test]
    fn round_trips_reference_values() {
        check(0, &[0x00]);
        check(1, &[0x01]);
        check(127, &[0x7F]);
        check(128, &[0x80, 0x01]);
        check(150, &[0x96, 0x01]); // spec scenario 1: field1 = 150.
        check(300, &[0xAC, 0x02]);
        check(
            u64::MAX,
            &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01],
        );
    }

    #[test]
    fn truncated_varint_is_unexpected_eof() {
        // spec scenario 6: `08 ff` -- second byte has continuation bit set
        // with nothing following.
        let mut slice = &[0xFFu8][..];
        assert_eq!(decode_varint(&mut slice), Err(Error::UnexpectedEof));
    }

    #[test]
    fn overlong_varint_overflows() {
        let bytes = [0xFFu8; 11];
        let mut slice = &bytes[..];
        assert_eq!(decode_varint(&mut slice), Err(Error::VarintOverflow));
    }

    quickcheck::quickcheck! {
        fn round_trip(value: u64) -> bool {
            let mut buf = Vec::new();
            encode_varint(value, &mut buf);
            assert_eq!(buf.len(), encoded_len_varint(value));
            let mut slice = &buf[..];
            decode_varint(&mut slice).unwrap() == value && slice.is_empty()
        }
    }
}
