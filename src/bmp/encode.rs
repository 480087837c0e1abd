//! BMP encoder: uncompressed 8-bit indexed and 24-bit true-color.

use std::io::Write;

use tracing::debug;

use crate::error::BmpError;
use crate::image::BmpImage;

/// Encode an image to an in-memory BMP file.
pub(crate) fn encode_bmp(image: &BmpImage) -> Result<Vec<u8>, BmpError> {
    let file_size = checked_len(image)?;
    let mut out = Vec::new();
    out.try_reserve_exact(file_size)
        .map_err(|_| BmpError::AllocationFailed { bytes: file_size })?;
    write_bmp(image, &mut out)?;
    Ok(out)
}

/// Stream an image as a BMP file into `sink`.
pub(crate) fn write_bmp<W: Write>(image: &BmpImage, mut sink: W) -> Result<(), BmpError> {
    let file = image.file_header()?;
    let info = image.info_header()?;

    debug!(
        width = info.width,
        height = info.height,
        bits = info.bits_per_pixel,
        colors_used = info.colors_used,
        pixel_offset = file.pixel_offset,
        file_size = file.file_size,
        "encoding BMP"
    );

    sink.write_all(&file.to_bytes())?;
    sink.write_all(&info.to_bytes())?;
    if let Some(palette) = image.palette() {
        for entry in palette {
            sink.write_all(&entry.to_bytes())?;
        }
    }

    let stride = image.row_stride();
    let row_bytes = image.row_bytes();
    let padding = [0u8; 3];
    for row in image.buffer().chunks_exact(stride) {
        sink.write_all(&row[..row_bytes])?;
        sink.write_all(&padding[..stride - row_bytes])?;
    }
    sink.flush()?;
    Ok(())
}

fn checked_len(image: &BmpImage) -> Result<usize, BmpError> {
    image.encoded_len().ok_or(BmpError::DimensionsTooLarge {
        width: image.width(),
        height: image.height(),
    })
}
