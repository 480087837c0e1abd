//! Caller-supplied bounds on what a decode may allocate.

use crate::bmp::header::PALETTE_ENTRY_SIZE;
use crate::error::BmpError;

/// Bounds applied while decoding, before any buffer is allocated.
///
/// `None` leaves a dimension unbounded; the default bounds nothing.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    /// Bound on the stored row count (`|height|`).
    pub max_height: Option<u64>,
    /// Bound on `width * rows`.
    pub max_pixels: Option<u64>,
    /// Bound on the bytes a decode allocates: the palette entries plus the
    /// padded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Geometry bounds, checked as soon as the headers are parsed.
    pub(crate) fn check_geometry(&self, width: u32, rows: u32) -> Result<(), BmpError> {
        let pixels = u64::from(width) * u64::from(rows);
        let bounds = [
            ("width", u64::from(width), self.max_width),
            ("row count", u64::from(rows), self.max_height),
            ("pixel count", pixels, self.max_pixels),
        ];
        for (what, value, max) in bounds {
            if let Some(max) = max
                && value > max
            {
                return Err(BmpError::LimitExceeded(format!(
                    "{what} {value} of a {width}x{rows} image exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }

    /// Memory bound over one decode: `palette_len` entries plus `rows` rows
    /// of `stride` bytes.
    pub(crate) fn check_allocation(
        &self,
        palette_len: usize,
        stride: usize,
        rows: u32,
    ) -> Result<(), BmpError> {
        let Some(max) = self.max_memory_bytes else {
            return Ok(());
        };
        let palette = (palette_len * PALETTE_ENTRY_SIZE) as u64;
        let pixels = (stride as u64).saturating_mul(u64::from(rows));
        let total = palette.saturating_add(pixels);
        if total > max {
            return Err(BmpError::LimitExceeded(format!(
                "decode needs {total} bytes ({palette} palette + {rows} rows of {stride}), limit is {max}"
            )));
        }
        Ok(())
    }
}
