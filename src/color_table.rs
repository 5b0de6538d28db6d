//! Indexed-color table: sizing, capacity validation, decode, encode.

use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::BmpError;
use crate::header::{DibHeader, FileHeader};

const ENTRY_LEN: usize = 4;

/// One packed palette entry, fields in on-disk byte order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    /// Fourth byte of the packed entry; alpha in some writers, zero in most.
    pub reserved: u8,
}

/// Ordered palette referenced by index for low-depth images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTable {
    pub entries: Vec<ColorEntry>,
}

impl ColorTable {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        Self { entries }
    }

    /// Bytes the table occupies on disk.
    pub fn byte_len(&self) -> usize {
        self.entries.len() * ENTRY_LEN
    }
}

/// Entry count and fit decision, shared by the decoder and the probe.
///
/// `Ok(None)` means the stream carries no table the decoder would read:
/// direct-color depths above 16 bpp, or a defaulted count that does not fit
/// in the space before the pixel data (graceful degrade). An explicit count
/// that does not fit is a hard error.
pub(crate) fn expected_entries(
    file: &FileHeader,
    dib: &DibHeader,
) -> Result<Option<u32>, BmpError> {
    if dib.bits_per_pixel > 16 {
        return Ok(None);
    }

    let count = if dib.palette_colors != 0 {
        dib.palette_colors
    } else {
        1u32 << dib.bits_per_pixel
    };

    let needed = u64::from(count) * ENTRY_LEN as u64;
    let available = u64::from(file.pixel_data_offset) - dib.headers_end();
    if needed > available {
        if dib.palette_colors == 0 {
            return Ok(None);
        }
        return Err(BmpError::ColorTableOverflow { needed, available });
    }
    Ok(Some(count))
}

pub(crate) fn decode_color_table(
    bytes: &mut Cursor<'_>,
    file: &FileHeader,
    dib: &DibHeader,
) -> Result<Option<ColorTable>, BmpError> {
    let Some(count) = expected_entries(file, dib)? else {
        return Ok(None);
    };

    let start = usize::try_from(dib.headers_end()).map_err(|_| BmpError::UnexpectedEof)?;
    bytes.set_position(start)?;
    // The fit check above bounds the table by the pixel-data offset, not by
    // the stream; confirm the bytes exist before reserving for them.
    if u64::from(count) * ENTRY_LEN as u64 > bytes.remaining() as u64 {
        return Err(BmpError::UnexpectedEof);
    }

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let [blue, green, red, reserved] = bytes.read_fixed_bytes::<4>()?;
        entries.push(ColorEntry {
            blue,
            green,
            red,
            reserved,
        });
    }
    Ok(Some(ColorTable { entries }))
}

/// Write each entry as 4 bytes in packed order, ascending index, no
/// padding between entries or after the last one.
pub(crate) fn encode_color_table(out: &mut Vec<u8>, table: &ColorTable) {
    for entry in &table.entries {
        out.extend_from_slice(&[entry.blue, entry.green, entry.red, entry.reserved]);
    }
}

#[cfg(feature = "rgb")]
impl From<ColorEntry> for rgb::alt::BGRA8 {
    fn from(e: ColorEntry) -> Self {
        Self {
            b: e.blue,
            g: e.green,
            r: e.red,
            a: e.reserved,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGRA8> for ColorEntry {
    fn from(c: rgb::alt::BGRA8) -> Self {
        Self {
            blue: c.b,
            green: c.g,
            red: c.r,
            reserved: c.a,
        }
    }
}
