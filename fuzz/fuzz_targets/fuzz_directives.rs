#![no_main]
use libfuzzer_sys::fuzz_target;
use sbvj::{decode_color_directives, encode_color_directives};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let groups = decode_color_directives(text);
    let encoded = encode_color_directives(&groups);
    assert_eq!(decode_color_directives(&encoded), groups);
});
