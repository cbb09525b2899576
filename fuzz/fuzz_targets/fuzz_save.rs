#![no_main]
use libfuzzer_sys::fuzz_target;
use sbvj::{decode_save, encode_save};

fuzz_target!(|data: &[u8]| {
    let Ok(save) = decode_save(data) else {
        return;
    };

    // NaN floats never compare equal, so compare the bytes of a second pass
    let encoded = encode_save(&save);
    let reparsed = decode_save(&encoded).unwrap();
    assert_eq!(encode_save(&reparsed), encoded);
});
