use enough::StopReason;

use alloc::string::String;

/// Errors from BMP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("not a BMP stream: bad signature")]
    BadSignature,

    #[error("stream ends before the fixed headers do")]
    TruncatedHeader,

    #[error("DIB header size {0} is below the 40-byte BITMAPINFOHEADER")]
    UnsupportedDibVariant(u32),

    #[error("compression method {0} unsupported, only uncompressed pixel data is handled")]
    CompressionUnsupported(u32),

    #[error("bit depth {0} is not one of 1, 2, 4, 8, 16, 24, 32")]
    UnsupportedBitDepth(u16),

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("color planes field is {0}, expected 1")]
    InvalidColorPlanes(u16),

    #[error("pixel data offset {offset} lands inside the headers (which end at {headers_end})")]
    InvalidDataOffset { offset: u32, headers_end: u64 },

    #[error("color table needs {needed} bytes but only {available} precede the pixel data")]
    ColorTableOverflow { needed: u64, available: u64 },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("pixel buffer holds {actual} values, expected width*height = {expected}")]
    PlaneSizeMismatch { expected: usize, actual: usize },

    #[error(
        "DIB geometry {dib_width}x{dib_height} at {dib_bpp} bpp does not match \
         plane {plane_width}x{plane_height} at {plane_bpp} bpp"
    )]
    PlaneMismatch {
        dib_width: i32,
        dib_height: i32,
        dib_bpp: u16,
        plane_width: u32,
        plane_height: u32,
        plane_bpp: u16,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}

/// Non-fatal conditions noticed during a successful decode.
///
/// The codec never prints these; how (or whether) they are displayed is the
/// caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeWarning {
    /// The file header's size field disagrees with the actual stream length.
    /// The field is unreliable in practice; the decoder trusts the stream.
    #[error("file header lists {declared} bytes but the stream holds {actual}")]
    FileSizeMismatch { declared: u32, actual: usize },
}
