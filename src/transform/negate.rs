//! Color negation: every channel `c` becomes `255 - c`.

use crate::image::{BmpImage, PixelData};

/// Negate `image` in place.
///
/// 8-bit images are negated through their palette; the index buffer is left
/// alone. 24-bit images have every pixel's B, G and R bytes inverted, with
/// row padding untouched. Applying it twice restores the original.
pub fn negate(image: &mut BmpImage) {
    let stride = image.row_stride();
    let row_bytes = image.row_bytes();
    match image.data_mut() {
        PixelData::Indexed8 { palette, .. } => {
            palette.iter_mut().for_each(|entry| entry.invert());
        }
        PixelData::TrueColor24 { pixels } => {
            for row in pixels.chunks_exact_mut(stride) {
                for c in &mut row[..row_bytes] {
                    *c = 255 - *c;
                }
            }
        }
    }
}

impl BmpImage {
    /// See [`negate`].
    pub fn negate(&mut self) {
        negate(self);
    }
}
