#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any stream that decodes must re-encode, and the re-encoded stream
    // must decode to the same plane and palette.
    let limits = rawbmp::Limits {
        max_pixels: Some(1 << 20),
        max_alloc_bytes: Some(1 << 24),
        ..Default::default()
    };
    let Ok(decoded) = rawbmp::decode_with_limits(data, &limits, enough::Unstoppable) else {
        return;
    };
    let image = decoded.into_image();

    let bytes = rawbmp::encode(&image, enough::Unstoppable).expect("decoded image failed to encode");
    let again = rawbmp::decode(&bytes, enough::Unstoppable)
        .expect("re-encoded stream failed to decode")
        .into_image();

    assert_eq!(again.plane, image.plane, "roundtrip plane mismatch");
    assert_eq!(again.color_table, image.color_table, "roundtrip palette mismatch");
});
