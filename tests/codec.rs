use sbvj::{
    decode_color_directives, decode_string, decode_svarint, decode_uvarint, decode_variant,
    encode_color_directives, encode_string, encode_svarint, encode_uvarint, encode_variant,
    ErrorKind, Variant, VariantMap,
};

#[test]
fn uvarint_300() {
    assert_eq!(encode_uvarint(300), vec![0x82, 0x2c]);
    assert_eq!(decode_uvarint(&[0x82, 0x2c]).unwrap(), (300, 2));
}

#[test]
fn svarint_negative_five() {
    assert_eq!(encode_svarint(-5), vec![0x09]);
    assert_eq!(decode_svarint(&[0x09]).unwrap(), (-5, 1));
}

#[test]
fn health_mapping_bytes() {
    let mut map = VariantMap::new();
    map.insert("health", 8.5);
    let actual = encode_variant(&Variant::Map(map));

    let mut expected = vec![0x07, 0x01, 0x06];
    expected.extend_from_slice(b"health");
    expected.push(0x02);
    expected.extend_from_slice(&8.5f64.to_be_bytes());
    assert_eq!(actual, expected);
}

#[test]
fn directive_roundtrip() {
    let groups = decode_color_directives("?replace;body=ffaa00");
    assert_eq!(
        groups,
        vec![vec![("body".to_string(), "ffaa00".to_string())]]
    );
    assert_eq!(encode_color_directives(&groups), "?replace;body=ffaa00");
}

#[test]
fn empty_string_variant() {
    assert_eq!(
        decode_variant(&[0x05, 0x00]).unwrap(),
        (Variant::String(String::new()), 2)
    );
    assert_eq!(encode_string(""), vec![0x00]);
    assert_eq!(decode_string(&[0x00]).unwrap(), (String::new(), 1));
}

#[test]
fn lengths_are_not_zigzagged() {
    // a string of length 2 has the length byte 0x02, not zigzag(2) = 0x04
    assert_eq!(encode_string("ab")[0], 0x02);
    assert_eq!(encode_variant(&Variant::Integer(2)), vec![0x04, 0x04]);
}

#[test]
fn nested_containers_roundtrip() {
    let mut inner = VariantMap::new();
    inner.insert("name", "perfectlygenericitem");
    inner.insert("count", 1i64);
    inner.insert("data", VariantMap::new());

    let mut outer = VariantMap::new();
    outer.insert(
        "bag",
        Variant::List(vec![Variant::Map(inner), Variant::Null, Variant::Null]),
    );
    outer.insert("money", 1_000_000i64);
    outer.insert("ratio", -0.25);
    outer.insert("admin", false);
    let value = Variant::Map(outer);

    let encoded = encode_variant(&value);
    let (decoded, len) = decode_variant(&encoded).unwrap();
    assert_eq!(len, encoded.len());
    assert_eq!(decoded, value);
    assert_eq!(encode_variant(&decoded), encoded);
}

#[test]
fn unknown_tag_inside_list() {
    let err = decode_variant(&[0x06, 0x02, 0x01, 0x0a]).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::UnknownVariantTag { tag: 10, offset: 3 }
    ));
}
