//! Fixed-layout file header and DIB header: parse, validate, write.
//!
//! Validation runs in full before anything downstream allocates a buffer.
//! The one non-fatal check is the file-size field: it is unreliable in the
//! wild, so a mismatch becomes a [`DecodeWarning`] and the actual stream
//! length wins.

use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::{BmpError, DecodeWarning};

/// The `BM` magic that opens every supported stream.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// Byte length of the fixed file header.
pub const FILE_HEADER_LEN: usize = 14;

/// Byte length of the baseline BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: usize = 40;

/// Bit depths the codec accepts.
pub const SUPPORTED_BIT_DEPTHS: [u16; 7] = [1, 2, 4, 8, 16, 24, 32];

pub(crate) const FIXED_HEADERS_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// Position of the file-size field, backpatched last during encode.
pub(crate) const SIZE_FIELD_POS: usize = 0x02;

/// Position of the pixel-data-offset field, backpatched after the color
/// table is written.
pub(crate) const OFFSET_FIELD_POS: usize = 0x0A;

/// The 14-byte file header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Total stream length in bytes. After a decode this holds the actual
    /// length, not the field's declared value.
    pub file_size: u32,
    /// Reserved fields, kept verbatim and never interpreted.
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset from stream start to the first pixel byte.
    pub pixel_data_offset: u32,
}

/// The BITMAPINFOHEADER fields.
///
/// Files with a larger DIB (V4/V5) parse too; the bytes past the baseline
/// 40 are skipped and a re-encode produces a baseline header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DibHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Declared pixel data byte count. Advisory, never trusted.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    /// Declared palette entry count; 0 selects the depth default.
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl DibHeader {
    /// End of the header region, where a color table would begin.
    pub(crate) fn headers_end(&self) -> u64 {
        FILE_HEADER_LEN as u64 + u64::from(self.header_size)
    }
}

pub(crate) fn parse_headers(
    data: &[u8],
) -> Result<(FileHeader, DibHeader, Vec<DecodeWarning>), BmpError> {
    // Signature first; nothing else is read from a stream that fails it.
    if data.len() < SIGNATURE.len() {
        return Err(BmpError::TruncatedHeader);
    }
    if data[..2] != SIGNATURE {
        return Err(BmpError::BadSignature);
    }
    if data.len() < FIXED_HEADERS_LEN {
        return Err(BmpError::TruncatedHeader);
    }

    let mut bytes = Cursor::new(data);
    bytes.skip(SIGNATURE.len())?;

    let declared_size = bytes.get_u32_le()?;
    let reserved1 = bytes.get_u16_le()?;
    let reserved2 = bytes.get_u16_le()?;
    let pixel_data_offset = bytes.get_u32_le()?;

    let mut warnings = Vec::new();
    if declared_size as usize != data.len() {
        warnings.push(DecodeWarning::FileSizeMismatch {
            declared: declared_size,
            actual: data.len(),
        });
    }

    let header_size = bytes.get_u32_le()?;
    if header_size < INFO_HEADER_LEN as u32 {
        return Err(BmpError::UnsupportedDibVariant(header_size));
    }

    let width = bytes.get_i32_le()?;
    let height = bytes.get_i32_le()?;
    let planes = bytes.get_u16_le()?;
    let bits_per_pixel = bytes.get_u16_le()?;
    let compression = bytes.get_u32_le()?;
    let image_size = bytes.get_u32_le()?;
    let x_pixels_per_meter = bytes.get_i32_le()?;
    let y_pixels_per_meter = bytes.get_i32_le()?;
    let palette_colors = bytes.get_u32_le()?;
    let important_colors = bytes.get_u32_le()?;

    if compression != 0 {
        return Err(BmpError::CompressionUnsupported(compression));
    }
    if !SUPPORTED_BIT_DEPTHS.contains(&bits_per_pixel) {
        return Err(BmpError::UnsupportedBitDepth(bits_per_pixel));
    }
    // The format allows negative height as a top-down flag; this codec
    // treats anything non-positive as invalid.
    if width <= 0 || height <= 0 {
        return Err(BmpError::InvalidDimensions { width, height });
    }
    if planes != 1 {
        return Err(BmpError::InvalidColorPlanes(planes));
    }

    let dib = DibHeader {
        header_size,
        width,
        height,
        planes,
        bits_per_pixel,
        compression,
        image_size,
        x_pixels_per_meter,
        y_pixels_per_meter,
        palette_colors,
        important_colors,
    };

    let headers_end = dib.headers_end();
    if u64::from(pixel_data_offset) < headers_end {
        return Err(BmpError::InvalidDataOffset {
            offset: pixel_data_offset,
            headers_end,
        });
    }

    let file = FileHeader {
        // Trust the stream, not the field.
        file_size: data.len() as u32,
        reserved1,
        reserved2,
        pixel_data_offset,
    };

    Ok((file, dib, warnings))
}

/// Write the 14-byte file header and 40-byte DIB header.
///
/// The file-size and pixel-data-offset fields are written as zero
/// placeholders; the encode pipeline backpatches them once the color table
/// and pixel plane have been laid down.
pub(crate) fn write_headers(out: &mut Vec<u8>, file: &FileHeader, dib: &DibHeader) {
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&0u32.to_le_bytes()); // file size, backpatched
    out.extend_from_slice(&file.reserved1.to_le_bytes());
    out.extend_from_slice(&file.reserved2.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // pixel data offset, backpatched

    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes()); // always baseline
    out.extend_from_slice(&dib.width.to_le_bytes());
    out.extend_from_slice(&dib.height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&dib.bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&dib.image_size.to_le_bytes());
    out.extend_from_slice(&dib.x_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&dib.y_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&dib.palette_colors.to_le_bytes());
    out.extend_from_slice(&dib.important_colors.to_le_bytes());
}
