//! Variable length integers
//!
//! Unsigned values are written 7 bits at a time, most significant group
//! first, with the high bit of every byte except the last acting as the
//! continuation flag. Signed values are zigzag mapped onto the unsigned
//! encoding so that small magnitudes of either sign stay short.

use crate::errors::ReadError;
use crate::Error;

/// Longest encoding of a `u64`: 64 bits in groups of 7
pub(crate) const MAX_VARINT_LEN: usize = 10;

#[inline]
pub(crate) fn read_uvarint(data: &[u8]) -> Result<(u64, &[u8]), ReadError> {
    let mut value: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        // another group would push set bits past the top of the u64
        if value >> 57 != 0 {
            return Err(ReadError::Overflow);
        }

        value = (value << 7) | u64::from(byte & 0x7f);
        if byte & 0x80 == 0 {
            return Ok((value, &data[i + 1..]));
        }
    }

    Err(ReadError::Eof)
}

#[inline]
pub(crate) fn read_svarint(data: &[u8]) -> Result<(i64, &[u8]), ReadError> {
    read_uvarint(data).map(|(x, rest)| (unzigzag(x), rest))
}

#[inline]
pub(crate) fn write_uvarint(out: &mut Vec<u8>, value: u64) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut pos = buf.len() - 1;
    let mut value = value;
    buf[pos] = (value & 0x7f) as u8;
    value >>= 7;
    while value != 0 {
        pos -= 1;
        buf[pos] = (value & 0x7f) as u8 | 0x80;
        value >>= 7;
    }
    out.extend_from_slice(&buf[pos..]);
}

#[inline]
pub(crate) fn write_svarint(out: &mut Vec<u8>, value: i64) {
    write_uvarint(out, zigzag(value))
}

/// Maps `v` to `2v` when non-negative and `-2v - 1` when negative
#[inline]
pub const fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag`]
#[inline]
pub const fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Decode an unsigned varint from the start of the data, returning the value
/// and the number of bytes consumed.
///
/// ```
/// assert_eq!(sbvj::decode_uvarint(&[0x82, 0x2c]).unwrap(), (300, 2));
/// ```
pub fn decode_uvarint(data: &[u8]) -> Result<(u64, usize), Error> {
    let (value, rest) = read_uvarint(data).map_err(|e| e.at(0))?;
    Ok((value, data.len() - rest.len()))
}

/// Encode an unsigned varint
///
/// ```
/// assert_eq!(sbvj::encode_uvarint(300), vec![0x82, 0x2c]);
/// assert_eq!(sbvj::encode_uvarint(0), vec![0x00]);
/// ```
pub fn encode_uvarint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    write_uvarint(&mut out, value);
    out
}

/// Decode a zigzag signed varint, returning the value and the number of bytes
/// consumed.
pub fn decode_svarint(data: &[u8]) -> Result<(i64, usize), Error> {
    let (value, rest) = read_svarint(data).map_err(|e| e.at(0))?;
    Ok((value, data.len() - rest.len()))
}

/// Encode a zigzag signed varint
///
/// ```
/// assert_eq!(sbvj::encode_svarint(-5), vec![0x09]);
/// ```
pub fn encode_svarint(value: i64) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LEN);
    write_svarint(&mut out, value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case(0, &[0x00])]
    #[case(1, &[0x01])]
    #[case(127, &[0x7f])]
    #[case(128, &[0x81, 0x00])]
    #[case(300, &[0x82, 0x2c])]
    #[case(16383, &[0xff, 0x7f])]
    #[case(16384, &[0x81, 0x80, 0x00])]
    #[case(u64::MAX, &[0x81, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f])]
    fn test_uvarint_bytes(#[case] value: u64, #[case] expected: &[u8]) {
        assert_eq!(encode_uvarint(value), expected);
        assert_eq!(decode_uvarint(expected).unwrap(), (value, expected.len()));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(-1, 1)]
    #[case(1, 2)]
    #[case(-2, 3)]
    #[case(-5, 9)]
    #[case(i64::MAX, u64::MAX - 1)]
    #[case(i64::MIN, u64::MAX)]
    fn test_zigzag(#[case] signed: i64, #[case] unsigned: u64) {
        assert_eq!(zigzag(signed), unsigned);
        assert_eq!(unzigzag(unsigned), signed);
    }

    #[test]
    fn test_svarint_negative_five() {
        assert_eq!(encode_svarint(-5), vec![0x09]);
        assert_eq!(decode_svarint(&[0x09]).unwrap(), (-5, 1));
    }

    #[test]
    fn test_decode_ignores_trailing_data() {
        assert_eq!(decode_uvarint(&[0x82, 0x2c, 0xff, 0xff]).unwrap(), (300, 2));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[0x80])]
    #[case(&[0xff, 0xff])]
    fn test_truncated(#[case] data: &[u8]) {
        let err = decode_uvarint(data).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TruncatedInput { offset: 0 }));
    }

    #[test]
    fn test_overflow() {
        let data = [0x82, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
        let err = decode_uvarint(&data).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Overflow { .. }));

        let data = [0xff; 11];
        let err = decode_uvarint(&data).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Overflow { .. }));
    }

    #[test]
    fn test_leading_zero_groups_accepted() {
        assert_eq!(decode_uvarint(&[0x80, 0x80, 0x05]).unwrap(), (5, 3));
    }

    #[quickcheck]
    fn uvarint_roundtrip(value: u64) -> bool {
        let encoded = encode_uvarint(value);
        decode_uvarint(&encoded).unwrap() == (value, encoded.len())
    }

    #[quickcheck]
    fn svarint_roundtrip(value: i64) -> bool {
        let encoded = encode_svarint(value);
        decode_svarint(&encoded).unwrap() == (value, encoded.len())
    }
}
