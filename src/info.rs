//! Header-only probe.

use crate::color_table;
use crate::error::BmpError;
use crate::header;

/// Shape of a BMP stream, read without touching pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    /// Whether the stream carries a color table the decoder would read.
    pub has_color_table: bool,
}

impl BmpInfo {
    /// Probe the fixed headers. Runs the same validation the full decode
    /// does, so a stream rejected here fails identically there.
    pub fn from_bytes(data: &[u8]) -> Result<BmpInfo, BmpError> {
        let (file, dib, _warnings) = header::parse_headers(data)?;
        let has_color_table = color_table::expected_entries(&file, &dib)?.is_some();
        Ok(BmpInfo {
            width: dib.width as u32,
            height: dib.height as u32,
            bits_per_pixel: dib.bits_per_pixel,
            has_color_table,
        })
    }
}
