use crate::{
    varint::{write_svarint, write_uvarint},
    Variant, VariantMap, VariantTag,
};

#[inline]
pub(crate) fn write_string(out: &mut Vec<u8>, value: &str) {
    write_uvarint(out, value.len() as u64);
    out.extend_from_slice(value.as_bytes());
}

#[inline]
pub(crate) fn write_tag(out: &mut Vec<u8>, tag: VariantTag) {
    write_uvarint(out, u64::from(tag.value()));
}

/// Appends the tag and payload of a variant. Children are written depth
/// first in their stored order.
pub(crate) fn write_variant(out: &mut Vec<u8>, value: &Variant) {
    write_tag(out, value.tag());
    match value {
        Variant::Null => {}
        Variant::Float(x) => out.extend_from_slice(&x.to_be_bytes()),
        Variant::Bool(x) => out.push(u8::from(*x)),
        Variant::Integer(x) => write_svarint(out, *x),
        Variant::String(x) => write_string(out, x),
        Variant::List(x) => write_list(out, x),
        Variant::Map(x) => write_map(out, x),
    }
}

pub(crate) fn write_list(out: &mut Vec<u8>, values: &[Variant]) {
    write_uvarint(out, values.len() as u64);
    for value in values {
        write_variant(out, value);
    }
}

pub(crate) fn write_map(out: &mut Vec<u8>, map: &VariantMap) {
    write_uvarint(out, map.len() as u64);
    for (key, value) in map.iter() {
        write_string(out, key);
        write_variant(out, value);
    }
}

/// Encode a length prefixed string
///
/// ```
/// assert_eq!(sbvj::encode_string(""), vec![0x00]);
/// assert_eq!(sbvj::encode_string("hi"), vec![0x02, b'h', b'i']);
/// ```
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 1);
    write_string(&mut out, value);
    out
}

/// Encode a single tagged variant
pub fn encode_variant(value: &Variant) -> Vec<u8> {
    let mut out = Vec::new();
    write_variant(&mut out, value);
    out
}

impl Variant {
    /// Encodes the value with its tag
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_variant(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_variant;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_health_map_bytes() {
        let map: VariantMap = vec![("health", 8.5)].into_iter().collect();
        let actual = encode_variant(&Variant::Map(map));

        let mut expected = vec![0x07, 0x01, 0x06];
        expected.extend_from_slice(b"health");
        expected.push(0x02);
        expected.extend_from_slice(&[0x40, 0x21, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_scalar_bytes() {
        assert_eq!(encode_variant(&Variant::Null), vec![0x01]);
        assert_eq!(encode_variant(&Variant::Bool(true)), vec![0x03, 0x01]);
        assert_eq!(encode_variant(&Variant::Integer(-5)), vec![0x04, 0x09]);
        assert_eq!(encode_variant(&Variant::from("")), vec![0x05, 0x00]);
        assert_eq!(
            encode_variant(&Variant::List(vec![Variant::Null, Variant::Bool(false)])),
            vec![0x06, 0x02, 0x01, 0x03, 0x00]
        );
    }

    #[test]
    fn test_map_written_in_insertion_order() {
        let map: VariantMap = vec![("b", 1i64), ("a", 2i64)].into_iter().collect();
        assert_eq!(
            encode_variant(&Variant::Map(map)),
            vec![0x07, 0x02, 0x01, b'b', 0x04, 0x02, 0x01, b'a', 0x04, 0x04]
        );
    }

    #[test]
    fn test_multibyte_string_length_is_bytes() {
        assert_eq!(encode_string("å"), vec![0x02, 0xc3, 0xa5]);
    }

    #[derive(Debug, Clone)]
    struct ArbitraryVariant(Variant);

    fn arbitrary_variant(g: &mut Gen, depth: usize) -> Variant {
        let kinds: &[u8] = if depth == 0 {
            &[1, 2, 3, 4, 5]
        } else {
            &[1, 2, 3, 4, 5, 6, 7]
        };

        match *g.choose(kinds).unwrap() {
            1 => Variant::Null,
            2 => {
                // NaN is never equal to itself
                let x = f64::arbitrary(g);
                Variant::Float(if x.is_nan() { 0.0 } else { x })
            }
            3 => Variant::Bool(bool::arbitrary(g)),
            4 => Variant::Integer(i64::arbitrary(g)),
            5 => Variant::String(String::arbitrary(g)),
            6 => {
                let len = usize::arbitrary(g) % 4;
                Variant::List((0..len).map(|_| arbitrary_variant(g, depth - 1)).collect())
            }
            _ => {
                let len = usize::arbitrary(g) % 4;
                let mut map = VariantMap::new();
                for _ in 0..len {
                    map.insert(String::arbitrary(g), arbitrary_variant(g, depth - 1));
                }
                Variant::Map(map)
            }
        }
    }

    impl Arbitrary for ArbitraryVariant {
        fn arbitrary(g: &mut Gen) -> Self {
            ArbitraryVariant(arbitrary_variant(g, 3))
        }
    }

    #[quickcheck]
    fn variant_roundtrip(value: ArbitraryVariant) -> bool {
        let encoded = encode_variant(&value.0);
        decode_variant(&encoded).unwrap() == (value.0, encoded.len())
    }

    #[quickcheck]
    fn truncated_variant_never_decodes(value: ArbitraryVariant) -> bool {
        let encoded = encode_variant(&value.0);
        (0..encoded.len()).all(|end| decode_variant(&encoded[..end]).is_err())
    }
}
