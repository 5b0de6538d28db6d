use crate::error::BmpError;

/// Decode-side resource limits.
///
/// All fields default to `None` (unlimited). Checks run after header
/// validation and before any pixel buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes the decoded pixel buffer may occupy.
    pub max_alloc_bytes: Option<u64>,
}

impl Limits {
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if self.max_width.is_some_and(|max| width > max) {
            return Err(BmpError::LimitExceeded(alloc::format!(
                "width {width} exceeds limit"
            )));
        }
        if self.max_height.is_some_and(|max| height > max) {
            return Err(BmpError::LimitExceeded(alloc::format!(
                "height {height} exceeds limit"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if self.max_pixels.is_some_and(|max| pixels > max) {
            return Err(BmpError::LimitExceeded(alloc::format!(
                "pixel count {pixels} exceeds limit"
            )));
        }
        Ok(())
    }

    pub(crate) fn check_alloc(&self, bytes: u64) -> Result<(), BmpError> {
        if self.max_alloc_bytes.is_some_and(|max| bytes > max) {
            return Err(BmpError::LimitExceeded(alloc::format!(
                "allocation of {bytes} bytes exceeds memory limit"
            )));
        }
        Ok(())
    }
}
