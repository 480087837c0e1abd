//! # zenbmp
//!
//! Uncompressed BMP codec for 8-bit palette-indexed and 24-bit true-color
//! images, with in-place color negation and pixel-exact comparison.
//!
//! ## Supported Formats
//!
//! - `BITMAPINFOHEADER` (40-byte) files only
//! - 8 bits per pixel with a palette of up to 256 entries
//! - 24 bits per pixel, B, G, R
//! - Bottom-up (positive height) and top-down (negative height) row order
//!
//! Decoding keeps the stored row order and row padding exactly as read;
//! [`BmpImage::normalize_to_top_down`] reorders rows on request. Encoding
//! recomputes every derived header field (offsets, sizes, palette count).
//!
//! ## Non-Goals
//!
//! - RLE, bitfield or embedded JPEG/PNG compression
//! - Bit depths other than 8 and 24
//! - Color management
//! - Streaming decode (the whole pixel buffer is held in memory)
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{Comparison, compare, decode, encode};
//!
//! # fn run(a: &[u8], b: &[u8]) -> Result<(), zenbmp::BmpError> {
//! let mut left = decode(a)?;
//! let mut right = decode(b)?;
//!
//! match compare(&mut left, &mut right)? {
//!     Comparison::Same => println!("same"),
//!     Comparison::Different(d) => println!("{} pixels differ", d.pixels.len()),
//! }
//!
//! left.negate();
//! let negated: Vec<u8> = encode(&left)?;
//! # let _ = negated;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod decode;
mod error;
mod image;
mod info;
mod limits;
mod orient;
mod pixel;
mod transform;

pub mod bmp;

#[cfg(feature = "cli")]
pub mod cli;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// Re-exports
pub use bmp::Permissiveness;
pub use bmp::header::{FileHeader, InfoHeader};
pub use decode::{DecodeRequest, decode_reader};
pub use error::{BmpError, ErrorKind};
pub use image::{BmpImage, PixelData};
pub use info::ImageInfo;
pub use limits::Limits;
pub use orient::normalize_to_top_down;
pub use pixel::{BitDepth, Orientation, PaletteEntry, row_stride};
pub use transform::{
    Comparison, Differences, MAX_RECORDED_DIFFERENCES, PixelCoord, compare, compare_with_cap,
    negate,
};

/// Decode BMP bytes with default settings.
pub fn decode(data: &[u8]) -> Result<BmpImage, BmpError> {
    DecodeRequest::new(data).decode()
}

/// Encode an image to BMP bytes.
pub fn encode(image: &BmpImage) -> Result<Vec<u8>, BmpError> {
    bmp::encode(image)
}

/// Encode an image as BMP into any writer.
pub fn encode_to<W: Write>(image: &BmpImage, sink: W) -> Result<(), BmpError> {
    bmp::encode_to(image, sink)
}

/// Read and decode a BMP file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<BmpImage, BmpError> {
    let data = std::fs::read(path)?;
    decode(&data)
}

/// Encode `image` and write it to `path`, replacing any existing file.
pub fn write_file<P: AsRef<Path>>(image: &BmpImage, path: P) -> Result<(), BmpError> {
    let file = File::create(path)?;
    encode_to(image, BufWriter::new(file))
}
