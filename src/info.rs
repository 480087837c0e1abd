use crate::error::BmpError;
use crate::pixel::{BitDepth, Orientation};

/// Image metadata read from the headers, without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    /// Row count.
    pub height: u32,
    pub orientation: Orientation,
    pub bit_depth: BitDepth,
    /// Palette entries (0 for 24-bit).
    pub palette_len: usize,
    pub pixel_offset: u32,
}

impl ImageInfo {
    /// Probe BMP headers. Validates magic, header size, bit depth and
    /// compression, but not the pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        crate::bmp::probe(data)
    }
}
