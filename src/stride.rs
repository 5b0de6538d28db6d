//! Scanline stride math.
//!
//! Every BMP scanline occupies a multiple of 4 bytes regardless of bit
//! depth. Decode and encode call the same two functions so the bytes
//! consumed reading a row always equal the bytes produced writing it.

/// Padded byte width of one scanline: `ceil(width * bpp / 32) * 4`.
pub fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (width as usize * usize::from(bits_per_pixel)).div_ceil(32) * 4
}

/// Whole filler bytes between a row's pixel data and the stride boundary.
///
/// Counted in bits first: for depths below 8 the slack inside the row's
/// final data byte is not representable as padding and rides along with
/// that byte, so only the remaining whole bytes count.
pub fn row_padding(width: u32, bits_per_pixel: u16) -> usize {
    let data_bits = width as usize * usize::from(bits_per_pixel);
    (row_stride(width, bits_per_pixel) * 8 - data_bits) / 8
}
