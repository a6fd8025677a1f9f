//! Little-endian fixed-width encode/decode for FIXED32/FIXED64 and, via
//! bit-casting in the emitted code, FLOAT/DOUBLE.

use bytes::{Buf, BufMut};

use crate::Error;

#[inline]
pub fn encode_fixed32(value: u32, buf: &mut impl BufMut) {
    buf.put_u32_le(value);
}

#[inline]
pub fn encode_fixed64(value: u64, buf: &mut impl BufMut) {
    buf.put_u64_le(value);
}

#[inline]
pub fn decode_fixed32(buf: &mut impl Buf) -> Result<u32, Error> {
    if buf.remaining() < 4 {
        return Err(Error::UnexpectedEof);
    }
    Ok(buf.get_u32_le())
}

#[inline]
pub fn decode_fixed64(buf: &mut impl Buf) -> Result<u64, Error> {
    if buf.remaining() < 8 {
        return Err(Error::UnexpectedEof);
    }
    Ok(buf.get_u64_le())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_fixed32() {
        let mut buf = Vec::new();
        encode_fixed32(0x2a, &mut buf);
        assert_eq!(buf, [0x2a, 0x00, 0x00, 0x00]);
        let mut slice = &buf[..];
        assert_eq!(decode_fixed32(&mut slice).unwrap(), 0x2a);
    }

    #[test]
    fn round_trips_fixed64() {
        let mut buf = Vec::new();
        encode_fixed64(0x1122_3344_5566_7788, &mut buf);
        let mut slice = &buf[..];
        assert_eq!(decode_fixed64(&mut slice).unwrap(), 0x1122_3344_5566_7788);
    }

    #[test]
    fn truncated_fixed_is_unexpected_eof() {
        let bytes = [0u8; 3];
        let mut slice = &bytes[..];
        assert_eq!(decode_fixed32(&mut slice), Err(Error::UnexpectedEof));
    }

    #[test]
    fn float_bit_casts_to_fixed32() {
        let value: f32 = 3.5;
        let mut buf = Vec::new();
        encode_fixed32(value.to_bits(), &mut buf);
        let mut slice = &buf[..];
        let decoded = f32::from_bits(decode_fixed32(&mut slice).unwrap());
        assert_eq!(decoded, value);
    }
}
