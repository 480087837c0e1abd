//! Row-order normalization between bottom-up and top-down storage.

use tracing::debug;

use crate::image::BmpImage;
use crate::pixel::Orientation;

impl BmpImage {
    /// Store rows in `target` order, reversing the buffer in place if needed.
    ///
    /// Direction-setting, not a toggle: calling it with the current
    /// orientation does nothing.
    pub fn set_orientation(&mut self, target: Orientation) {
        if self.orientation() == target {
            return;
        }
        let stride = self.row_stride();
        reverse_rows(self.buffer_mut(), stride);
        self.set_orientation_tag(target);
        debug!(?target, rows = self.height(), "reversed row order");
    }

    /// Store rows top-down. No-op when already top-down.
    pub fn normalize_to_top_down(&mut self) {
        self.set_orientation(Orientation::TopDown);
    }
}

/// Convert `image` to top-down row order in place.
pub fn normalize_to_top_down(image: &mut BmpImage) {
    image.normalize_to_top_down();
}

/// Swap row `i` with row `rows - 1 - i` for every `i` in the top half.
fn reverse_rows(buf: &mut [u8], stride: usize) {
    let rows = buf.len() / stride;
    for i in 0..rows / 2 {
        let j = rows - 1 - i;
        let (head, tail) = buf.split_at_mut(j * stride);
        head[i * stride..(i + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }
}
