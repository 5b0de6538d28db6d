//! Decode pipeline: headers, then color table, then pixel plane.
//!
//! Strictly sequential and single-pass; any stage failure aborts the whole
//! decode and no partial [`BmpImage`] escapes.

use alloc::vec::Vec;

use enough::Stop;

use crate::color_table;
use crate::cursor::Cursor;
use crate::error::{BmpError, DecodeWarning};
use crate::header;
use crate::image::BmpImage;
use crate::limits::Limits;
use crate::plane;

/// A successful decode: the image plus any advisory conditions noticed
/// along the way.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub image: BmpImage,
    /// Non-fatal observations; display is the caller's concern.
    pub warnings: Vec<DecodeWarning>,
}

impl Decoded {
    pub fn into_image(self) -> BmpImage {
        self.image
    }
}

/// Decode a BMP byte stream.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Decoded, BmpError> {
    decode_inner(data, None, &stop)
}

/// Decode with resource limits, applied after header validation and before
/// any pixel buffer is allocated.
pub fn decode_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<Decoded, BmpError> {
    decode_inner(data, Some(limits), &stop)
}

fn decode_inner(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Decoded, BmpError> {
    let (file_header, dib_header, warnings) = header::parse_headers(data)?;

    // Dimensions were validated strictly positive.
    let width = dib_header.width as u32;
    let height = dib_header.height as u32;
    if let Some(limits) = limits {
        limits.check_dimensions(width, height)?;
        let out_bytes = u64::from(width) * u64::from(height) * 4;
        limits.check_alloc(out_bytes)?;
    }
    stop.check()?;

    let mut bytes = Cursor::new(data);
    let color_table = color_table::decode_color_table(&mut bytes, &file_header, &dib_header)?;
    let plane = plane::decode_plane(
        &mut bytes,
        file_header.pixel_data_offset,
        width,
        height,
        dib_header.bits_per_pixel,
        stop,
    )?;

    Ok(Decoded {
        image: BmpImage {
            file_header,
            dib_header,
            color_table,
            plane,
        },
        warnings,
    })
}
