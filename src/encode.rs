//! Encode pipeline: headers with forward references, color table, pixel
//! plane, then backpatch.
//!
//! The pixel-data offset is not known until the color table is down, and
//! the file size not until the plane is; both fields start as zero
//! placeholders and are patched in place, mirroring how the decoder walks
//! the same layout.

use alloc::vec::Vec;

use enough::Stop;

use crate::color_table::{self, ColorTable};
use crate::error::BmpError;
use crate::header::{self, OFFSET_FIELD_POS, SIZE_FIELD_POS};
use crate::image::BmpImage;
use crate::plane;
use crate::stride::row_stride;

/// Serialize an image to a BMP byte stream.
///
/// On error the partially built output is discarded; nothing guarantees a
/// well-formed prefix.
pub fn encode(image: &BmpImage, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    encode_inner(image, &stop)
}

fn encode_inner(image: &BmpImage, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let plane = &image.plane;
    let dib = &image.dib_header;

    if i64::from(dib.width) != i64::from(plane.width())
        || i64::from(dib.height) != i64::from(plane.height())
        || dib.bits_per_pixel != plane.bits_per_pixel()
    {
        return Err(BmpError::PlaneMismatch {
            dib_width: dib.width,
            dib_height: dib.height,
            dib_bpp: dib.bits_per_pixel,
            plane_width: plane.width(),
            plane_height: plane.height(),
            plane_bpp: plane.bits_per_pixel(),
        });
    }

    stop.check()?;

    let too_large = || BmpError::DimensionsTooLarge {
        width: plane.width(),
        height: plane.height(),
    };
    let pixel_bytes = row_stride(plane.width(), plane.bits_per_pixel())
        .checked_mul(plane.height() as usize)
        .ok_or_else(too_large)?;
    let table_bytes = image.color_table.as_ref().map_or(0, ColorTable::byte_len);
    let capacity = header::FIXED_HEADERS_LEN
        .checked_add(table_bytes)
        .and_then(|n| n.checked_add(pixel_bytes))
        .ok_or_else(too_large)?;

    let mut out = Vec::with_capacity(capacity);
    header::write_headers(&mut out, &image.file_header, dib);
    if let Some(table) = &image.color_table {
        color_table::encode_color_table(&mut out, table);
    }

    // The table is down, so the forward reference is now resolvable.
    let offset = u32::try_from(out.len()).map_err(|_| too_large())?;
    out[OFFSET_FIELD_POS..OFFSET_FIELD_POS + 4].copy_from_slice(&offset.to_le_bytes());

    plane::encode_plane(&mut out, plane, stop)?;

    // Final accumulated byte count becomes the file-size field.
    let file_size = u32::try_from(out.len()).map_err(|_| too_large())?;
    out[SIZE_FIELD_POS..SIZE_FIELD_POS + 4].copy_from_slice(&file_size.to_le_bytes());

    Ok(out)
}
