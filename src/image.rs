//! The assembled BMP entity.

use crate::color_table::ColorTable;
use crate::error::BmpError;
use crate::header::{DibHeader, FileHeader, FILE_HEADER_LEN, INFO_HEADER_LEN};
use crate::plane::PixelPlane;
use crate::stride::row_stride;

/// A fully materialized BMP: headers, optional palette, pixel plane.
///
/// Decoding populates every field stage by stage and never exposes a
/// partial image; callers can also assemble one directly (usually via
/// [`BmpImage::from_plane`]) and hand it to [`crate::encode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpImage {
    pub file_header: FileHeader,
    pub dib_header: DibHeader,
    pub color_table: Option<ColorTable>,
    pub plane: PixelPlane,
}

impl BmpImage {
    /// Build a self-consistent image around a pixel plane, ready to encode.
    ///
    /// Produces a baseline 40-byte DIB with computed pixel-data offset and
    /// sizes, zero resolution fields, and a palette count mirroring the
    /// supplied table's length. A color table only makes sense for indexed
    /// depths (16 bpp and below); the decoder ignores tables paired with
    /// higher depths.
    pub fn from_plane(
        plane: PixelPlane,
        color_table: Option<ColorTable>,
    ) -> Result<BmpImage, BmpError> {
        let too_large = || BmpError::DimensionsTooLarge {
            width: plane.width(),
            height: plane.height(),
        };

        let width = i32::try_from(plane.width()).map_err(|_| too_large())?;
        let height = i32::try_from(plane.height()).map_err(|_| too_large())?;

        let table_bytes = color_table.as_ref().map_or(0, ColorTable::byte_len);
        let pixel_bytes = row_stride(plane.width(), plane.bits_per_pixel())
            .checked_mul(plane.height() as usize)
            .ok_or_else(too_large)?;
        let offset = FILE_HEADER_LEN + INFO_HEADER_LEN + table_bytes;
        let file_size = offset.checked_add(pixel_bytes).ok_or_else(too_large)?;

        let offset = u32::try_from(offset).map_err(|_| too_large())?;
        let file_size = u32::try_from(file_size).map_err(|_| too_large())?;
        let image_size = u32::try_from(pixel_bytes).map_err(|_| too_large())?;

        let palette_colors = color_table
            .as_ref()
            .map_or(0, |t| t.entries.len() as u32);

        Ok(BmpImage {
            file_header: FileHeader {
                file_size,
                reserved1: 0,
                reserved2: 0,
                pixel_data_offset: offset,
            },
            dib_header: DibHeader {
                header_size: INFO_HEADER_LEN as u32,
                width,
                height,
                planes: 1,
                bits_per_pixel: plane.bits_per_pixel(),
                compression: 0,
                image_size,
                x_pixels_per_meter: 0,
                y_pixels_per_meter: 0,
                palette_colors,
                important_colors: 0,
            },
            color_table,
            plane,
        })
    }
}
