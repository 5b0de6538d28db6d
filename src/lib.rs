//! # rawbmp
//!
//! Windows BMP decoder and encoder that keeps pixel values raw.
//!
//! Most BMP libraries hand back RGB(A) bytes: palettes expanded, channels
//! swizzled, rows flipped. This crate does none of that. Decoding yields
//! the headers, the palette (when the file carries one), and one scalar
//! per pixel holding exactly the bits the file stored: palette indices
//! for indexed depths, packed channel words for 16/24/32 bpp. Encoding is
//! the inverse and reproduces the on-disk layout byte for byte.
//!
//! ## Supported Input
//!
//! Uncompressed files with a BITMAPINFOHEADER (or larger) DIB at 1, 2, 4,
//! 8, 16, 24, or 32 bits per pixel, with or without an indexed color
//! table. Larger DIB variants (V4/V5) parse; their extra fields are
//! skipped and a re-encode produces a baseline 40-byte header.
//!
//! ## Non-Goals
//!
//! - RLE and embedded JPEG/PNG compression
//! - BITMAPCOREHEADER (pre-INFOHEADER) files
//! - Color-space and gamma handling
//! - Streaming decode (the whole plane is materialized)
//!
//! ## Row Order
//!
//! Rows come back in on-disk order. A positive DIB height conventionally
//! means bottom-up storage; the decoder does not reorder rows, so callers
//! wanting top-down presentation flip rows themselves.
//!
//! ## Usage
//!
//! ```
//! use rawbmp::{decode, encode, BmpImage, PixelPlane, Unstoppable};
//!
//! let plane = PixelPlane::new(2, 2, 24, vec![0xFF0000, 0x00FF00, 0x0000FF, 0xFFFFFF])?;
//! let image = BmpImage::from_plane(plane, None)?;
//! let bytes = encode(&image, Unstoppable)?;
//!
//! let decoded = decode(&bytes, Unstoppable)?;
//! assert!(decoded.warnings.is_empty());
//! assert_eq!(decoded.image, image);
//! # Ok::<(), rawbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color_table;
mod cursor;
mod decode;
mod encode;
mod error;
mod header;
mod image;
mod info;
mod limits;
mod plane;
mod stride;

// Re-exports
pub use color_table::{ColorEntry, ColorTable};
pub use decode::{Decoded, decode, decode_with_limits};
pub use encode::encode;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{BmpError, DecodeWarning};
pub use header::{
    DibHeader, FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, SIGNATURE, SUPPORTED_BIT_DEPTHS,
};
pub use image::BmpImage;
pub use info::BmpInfo;
pub use limits::Limits;
pub use plane::PixelPlane;
pub use stride::{row_padding, row_stride};
