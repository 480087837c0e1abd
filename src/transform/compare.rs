//! Pixel-exact comparison of two images.

use tracing::debug;

use crate::error::BmpError;
use crate::image::BmpImage;

/// Maximum number of differing coordinates [`compare`] records.
pub const MAX_RECORDED_DIFFERENCES: usize = 100;

/// A pixel position; `y` is counted from the visual top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

/// What differs between two images of equal geometry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Differences {
    /// The 8-bit palettes differ. Pixels were not scanned.
    pub palette_mismatch: bool,
    /// Differing pixel positions in scan order (row by row, top first).
    pub pixels: Vec<PixelCoord>,
    /// More differences exist than were recorded.
    pub capped: bool,
}

/// Outcome of [`compare`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Same,
    Different(Differences),
}

impl Comparison {
    pub fn is_same(&self) -> bool {
        matches!(self, Self::Same)
    }
}

/// Compare two images pixel by pixel, recording up to
/// [`MAX_RECORDED_DIFFERENCES`] differing positions.
///
/// Both images are normalized to top-down storage first, so images with
/// opposite row order but the same visual content compare equal.
pub fn compare(a: &mut BmpImage, b: &mut BmpImage) -> Result<Comparison, BmpError> {
    compare_with_cap(a, b, MAX_RECORDED_DIFFERENCES)
}

/// [`compare`] with a custom cap on recorded positions.
pub fn compare_with_cap(
    a: &mut BmpImage,
    b: &mut BmpImage,
    cap: usize,
) -> Result<Comparison, BmpError> {
    if a.bit_depth() != b.bit_depth() {
        return Err(BmpError::BitDepthMismatch {
            left: a.bit_depth(),
            right: b.bit_depth(),
        });
    }
    if a.width() != b.width() || a.height() != b.height() {
        return Err(BmpError::DimensionMismatch {
            left: (a.width(), a.height()),
            right: (b.width(), b.height()),
        });
    }

    a.normalize_to_top_down();
    b.normalize_to_top_down();

    if a.palette() != b.palette() {
        debug!("palettes differ");
        return Ok(Comparison::Different(Differences {
            palette_mismatch: true,
            ..Default::default()
        }));
    }

    let stride = a.row_stride();
    let row_bytes = a.row_bytes();
    let bpp = a.bit_depth().bytes_per_pixel();
    let mut diff = Differences::default();

    'scan: for (y, (row_a, row_b)) in a
        .buffer()
        .chunks_exact(stride)
        .zip(b.buffer().chunks_exact(stride))
        .enumerate()
    {
        let cells_a = row_a[..row_bytes].chunks_exact(bpp);
        let cells_b = row_b[..row_bytes].chunks_exact(bpp);
        for (x, (ca, cb)) in cells_a.zip(cells_b).enumerate() {
            if ca == cb {
                continue;
            }
            if diff.pixels.len() == cap {
                diff.capped = true;
                break 'scan;
            }
            diff.pixels.push(PixelCoord {
                x: x as u32,
                y: y as u32,
            });
        }
    }

    debug!(
        recorded = diff.pixels.len(),
        capped = diff.capped,
        "compared pixel data"
    );

    if diff.pixels.is_empty() && !diff.capped {
        Ok(Comparison::Same)
    } else {
        Ok(Comparison::Different(diff))
    }
}
