#![no_main]
use libfuzzer_sys::fuzz_target;
use sbvj::{decode_variant, encode_variant, DecodeOptions, VariantReader};

fuzz_target!(|data: &[u8]| {
    let mut shallow = VariantReader::with_options(data, DecodeOptions::new().with_max_depth(4));
    let _ = shallow.read_variant();

    let Ok((value, _)) = decode_variant(data) else {
        return;
    };

    let encoded = encode_variant(&value);
    let (reparsed, len) = decode_variant(&encoded).unwrap();
    assert_eq!(len, encoded.len());
    assert_eq!(encode_variant(&reparsed), encoded);
});
