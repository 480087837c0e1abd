//! BMP codec internals: header model, decoder and encoder.
//!
//! Use the top-level [`crate::decode`], [`crate::encode`], etc.

pub(crate) mod decode;
mod encode;
pub mod header;

pub use decode::Permissiveness;

use std::io::Write;

use crate::error::BmpError;
use crate::image::BmpImage;
use crate::info::ImageInfo;
use crate::limits::Limits;

/// Decode BMP data into an owned image.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: Permissiveness,
) -> Result<BmpImage, BmpError> {
    decode::decode_bmp(data, limits, permissiveness)
}

/// Probe headers only.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BmpError> {
    let h = decode::parse_headers(data, Permissiveness::Permissive)?;
    Ok(ImageInfo {
        width: h.width,
        height: h.rows,
        orientation: h.orientation,
        bit_depth: h.depth,
        palette_len: h.palette_len,
        pixel_offset: h.file.pixel_offset,
    })
}

/// Encode to BMP.
pub(crate) fn encode(image: &BmpImage) -> Result<Vec<u8>, BmpError> {
    encode::encode_bmp(image)
}

/// Encode to BMP, streaming into `sink`.
pub(crate) fn encode_to<W: Write>(image: &BmpImage, sink: W) -> Result<(), BmpError> {
    encode::write_bmp(image, sink)
}
