#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic. Cap allocations so the
    // fuzzer spends time in the codec, not the allocator.
    let limits = rawbmp::Limits {
        max_pixels: Some(1 << 20),
        max_alloc_bytes: Some(1 << 24),
        ..Default::default()
    };
    let _ = rawbmp::decode_with_limits(data, &limits, enough::Unstoppable);
    let _ = rawbmp::BmpInfo::from_bytes(data);
});
