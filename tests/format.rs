//! Format validation: header rejection paths, color table sizing rules,
//! stride properties, and resource limits.

use rawbmp::*;

fn flat_plane(w: u32, h: u32, bpp: u16, value: u32) -> PixelPlane {
    PixelPlane::new(w, h, bpp, vec![value; (w * h) as usize]).unwrap()
}

fn gray_table(len: usize) -> ColorTable {
    ColorTable::new(
        (0..len)
            .map(|i| ColorEntry {
                blue: i as u8,
                green: i as u8,
                red: i as u8,
                reserved: 0,
            })
            .collect(),
    )
}

/// A valid encoded stream to corrupt in individual tests.
fn sample_bytes(bpp: u16, table: Option<ColorTable>) -> Vec<u8> {
    let image = BmpImage::from_plane(flat_plane(4, 3, bpp, 1), table).unwrap();
    encode(&image, Unstoppable).unwrap()
}

// ── Header rejection ─────────────────────────────────────────────────

#[test]
fn bad_signature_rejected() {
    let mut bytes = sample_bytes(24, None);
    bytes[0] = b'P';
    bytes[1] = b'X';
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::BadSignature
    ));
}

#[test]
fn bad_signature_wins_over_truncation_past_two_bytes() {
    // Anything after a wrong magic is never read, even when the rest of
    // the fixed header is missing.
    assert!(matches!(
        decode(b"XY", Unstoppable).unwrap_err(),
        BmpError::BadSignature
    ));
}

#[test]
fn truncated_header_rejected() {
    assert!(matches!(
        decode(b"", Unstoppable).unwrap_err(),
        BmpError::TruncatedHeader
    ));
    assert!(matches!(
        decode(b"B", Unstoppable).unwrap_err(),
        BmpError::TruncatedHeader
    ));
    let bytes = sample_bytes(24, None);
    assert!(matches!(
        decode(&bytes[..53], Unstoppable).unwrap_err(),
        BmpError::TruncatedHeader
    ));
}

#[test]
fn small_dib_variant_rejected() {
    let mut bytes = sample_bytes(24, None);
    bytes[0x0E..0x12].copy_from_slice(&12u32.to_le_bytes()); // BITMAPCOREHEADER
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::UnsupportedDibVariant(12)
    ));
}

#[test]
fn compression_rejected() {
    let mut bytes = sample_bytes(24, None);
    bytes[0x1E..0x22].copy_from_slice(&1u32.to_le_bytes()); // RLE8
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::CompressionUnsupported(1)
    ));
}

#[test]
fn odd_bit_depth_rejected() {
    for depth in [0u16, 3, 5, 12, 64] {
        let mut bytes = sample_bytes(24, None);
        bytes[0x1C..0x1E].copy_from_slice(&depth.to_le_bytes());
        assert!(
            matches!(
                decode(&bytes, Unstoppable).unwrap_err(),
                BmpError::UnsupportedBitDepth(d) if d == depth
            ),
            "depth {depth} should be rejected"
        );
    }
}

#[test]
fn non_positive_dimensions_rejected() {
    let mut bytes = sample_bytes(24, None);
    bytes[0x12..0x16].copy_from_slice(&0i32.to_le_bytes());
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::InvalidDimensions { width: 0, .. }
    ));

    let mut bytes = sample_bytes(24, None);
    bytes[0x16..0x1A].copy_from_slice(&(-3i32).to_le_bytes());
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::InvalidDimensions { height: -3, .. }
    ));
}

#[test]
fn wrong_plane_count_rejected() {
    let mut bytes = sample_bytes(24, None);
    bytes[0x1A..0x1C].copy_from_slice(&0u16.to_le_bytes());
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::InvalidColorPlanes(0)
    ));
}

#[test]
fn offset_inside_headers_rejected() {
    let mut bytes = sample_bytes(24, None);
    bytes[0x0A..0x0E].copy_from_slice(&53u32.to_le_bytes());
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::InvalidDataOffset { offset: 53, .. }
    ));
}

// ── Color table sizing ───────────────────────────────────────────────

#[test]
fn defaulted_palette_counts() {
    // Declared count 0 falls back to 2^depth, which these streams have
    // room for.
    for (bpp, expected) in [(1u16, 2usize), (4, 16), (8, 256)] {
        let mut bytes = sample_bytes(bpp, Some(gray_table(expected)));
        bytes[0x2E..0x32].copy_from_slice(&0u32.to_le_bytes());
        let decoded = decode(&bytes, Unstoppable).unwrap();
        let table = decoded.image.color_table.expect("table should decode");
        assert_eq!(table.entries.len(), expected, "{bpp} bpp default");
    }
}

#[test]
fn explicit_table_in_exact_space_decodes() {
    // 10 entries, offset leaving exactly 40 bytes.
    let bytes = sample_bytes(8, Some(gray_table(10)));
    assert_eq!(
        u32::from_le_bytes(bytes[0x0A..0x0E].try_into().unwrap()),
        54 + 40
    );
    let decoded = decode(&bytes, Unstoppable).unwrap();
    assert_eq!(decoded.image.color_table.unwrap().entries.len(), 10);
}

#[test]
fn explicit_table_overflow_rejected() {
    // Same explicit count, one byte less room before the pixel data.
    let mut bytes = sample_bytes(8, Some(gray_table(10)));
    bytes[0x0A..0x0E].copy_from_slice(&(54 + 39u32).to_le_bytes());
    assert!(matches!(
        decode(&bytes, Unstoppable).unwrap_err(),
        BmpError::ColorTableOverflow {
            needed: 40,
            available: 39,
        }
    ));
}

#[test]
fn defaulted_table_overflow_degrades_to_none() {
    // Declared count 0 and no room: no table, not an error.
    let bytes = sample_bytes(8, None);
    assert_eq!(
        u32::from_le_bytes(bytes[0x0A..0x0E].try_into().unwrap()),
        54
    );
    let decoded = decode(&bytes, Unstoppable).unwrap();
    assert!(decoded.image.color_table.is_none());
}

#[test]
fn high_depth_streams_never_carry_a_table() {
    for bpp in [24u16, 32] {
        let decoded = decode(&sample_bytes(bpp, None), Unstoppable).unwrap();
        assert!(decoded.image.color_table.is_none());
    }
}

// ── Pixel data consumption ───────────────────────────────────────────

#[test]
fn truncated_pixel_data_rejected() {
    // Dropping even a final padding byte must surface as EOF: padding is
    // consumed, not assumed.
    for bpp in [1u16, 4, 8, 24] {
        let bytes = sample_bytes(bpp, None);
        let err = decode(&bytes[..bytes.len() - 1], Unstoppable).unwrap_err();
        assert!(
            matches!(err, BmpError::UnexpectedEof),
            "{bpp} bpp: got {err:?}"
        );
    }
}

#[test]
fn nine_by_nine_1bpp_geometry() {
    // Each row is one 4-byte stride: 9 pixel bits, then two whole filler
    // bytes after the partial data byte.
    assert_eq!(row_stride(9, 1), 4);
    assert_eq!(row_padding(9, 1), 2);

    let plane = PixelPlane::new(9, 9, 1, (0..81).map(|i| i % 2).collect()).unwrap();
    let image = BmpImage::from_plane(plane, None).unwrap();
    let bytes = encode(&image, Unstoppable).unwrap();
    assert_eq!(bytes.len(), 54 + 9 * 4);

    let decoded = decode(&bytes, Unstoppable).unwrap().into_image();
    assert_eq!(decoded.plane.area(), 81);
    assert!(decoded.plane.pixels().iter().all(|&v| v <= 1));
    assert_eq!(decoded.plane.pixels(), image.plane.pixels());
}

#[test]
fn two_by_two_24bpp_consumes_two_filler_bytes_per_row() {
    assert_eq!(row_stride(2, 24), 8);
    assert_eq!(row_padding(2, 24), 2);

    let image = BmpImage::from_plane(flat_plane(2, 2, 24, 0x00AA55), None).unwrap();
    let bytes = encode(&image, Unstoppable).unwrap();
    assert_eq!(bytes.len(), 54 + 2 * 8);
    // Filler bytes are zero.
    assert_eq!(&bytes[54 + 6..54 + 8], &[0, 0]);
    assert_eq!(&bytes[62 + 6..62 + 8], &[0, 0]);
    assert!(decode(&bytes, Unstoppable).is_ok());
}

// ── Stride properties ────────────────────────────────────────────────

#[test]
fn stride_is_positive_multiple_of_four() {
    for bpp in SUPPORTED_BIT_DEPTHS {
        for w in 1..=64u32 {
            let stride = row_stride(w, bpp);
            let min_bytes = (w as usize * usize::from(bpp)).div_ceil(8);
            assert!(stride > 0);
            assert_eq!(stride % 4, 0, "stride({w}, {bpp})");
            assert!(stride >= min_bytes, "stride({w}, {bpp})");
            assert!(row_padding(w, bpp) <= 3, "padding({w}, {bpp})");
        }
    }
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_reject_large_images() {
    let bytes = sample_bytes(24, None);

    let limits = Limits {
        max_pixels: Some(4),
        ..Default::default()
    };
    match decode_with_limits(&bytes, &limits, Unstoppable).unwrap_err() {
        BmpError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let limits = Limits {
        max_alloc_bytes: Some(4 * 3 * 4 - 1),
        ..Default::default()
    };
    match decode_with_limits(&bytes, &limits, Unstoppable).unwrap_err() {
        BmpError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    // Generous limits pass through.
    let limits = Limits::default();
    assert!(decode_with_limits(&bytes, &limits, Unstoppable).is_ok());
}

// ── Probe ────────────────────────────────────────────────────────────

#[test]
fn probe_reads_shape_without_pixels() {
    let info = BmpInfo::from_bytes(&sample_bytes(8, Some(gray_table(16)))).unwrap();
    assert_eq!(info.width, 4);
    assert_eq!(info.height, 3);
    assert_eq!(info.bits_per_pixel, 8);
    assert!(info.has_color_table);

    let info = BmpInfo::from_bytes(&sample_bytes(24, None)).unwrap();
    assert_eq!(info.bits_per_pixel, 24);
    assert!(!info.has_color_table);
}

#[test]
fn probe_rejects_what_decode_rejects() {
    let mut bytes = sample_bytes(24, None);
    bytes[0x1E..0x22].copy_from_slice(&2u32.to_le_bytes());
    assert!(matches!(
        BmpInfo::from_bytes(&bytes).unwrap_err(),
        BmpError::CompressionUnsupported(2)
    ));
}

// ── Construction and encode validation ───────────────────────────────

#[test]
fn plane_construction_validates() {
    assert!(matches!(
        PixelPlane::new(2, 2, 24, vec![0; 3]).unwrap_err(),
        BmpError::PlaneSizeMismatch {
            expected: 4,
            actual: 3,
        }
    ));
    assert!(matches!(
        PixelPlane::new(2, 2, 5, vec![0; 4]).unwrap_err(),
        BmpError::UnsupportedBitDepth(5)
    ));
    assert!(matches!(
        PixelPlane::new(0, 2, 8, vec![]).unwrap_err(),
        BmpError::InvalidDimensions { .. }
    ));
}

#[test]
fn encode_rejects_dib_plane_disagreement() {
    let mut image = BmpImage::from_plane(flat_plane(4, 3, 8, 0), None).unwrap();
    image.dib_header.width = 5;
    assert!(matches!(
        encode(&image, Unstoppable).unwrap_err(),
        BmpError::PlaneMismatch { dib_width: 5, .. }
    ));
}
