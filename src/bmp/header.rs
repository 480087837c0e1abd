//! Fixed-layout BMP headers: `BITMAPFILEHEADER` and `BITMAPINFOHEADER`.
//!
//! Both records are packed and little-endian. Fields are read and written at
//! explicit byte offsets rather than through any in-memory struct layout.

use crate::error::BmpError;
use crate::pixel::BitDepth;

/// Size of the file header on the wire.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the only supported info header (`BITMAPINFOHEADER`).
pub const INFO_HEADER_SIZE: usize = 40;
/// File header plus info header. Palettes and pixel data start no earlier.
pub const HEADERS_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// Bytes per palette entry (B, G, R, reserved).
pub const PALETTE_ENTRY_SIZE: usize = 4;
/// Palette capacity implied by 8 bits per pixel.
pub const MAX_PALETTE_ENTRIES: usize = 256;

pub const MAGIC: [u8; 2] = *b"BM";

fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

/// The 14-byte header at the start of every BMP file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FileHeader {
    pub magic: [u8; 2],
    /// Total file size in bytes, as declared.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset from the start of the file to the first pixel byte.
    pub pixel_offset: u32,
}

impl FileHeader {
    pub fn from_bytes(b: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            magic: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            pixel_offset: u32_at(b, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut b = [0u8; FILE_HEADER_SIZE];
        b[0..2].copy_from_slice(&self.magic);
        b[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        b[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        b[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        b[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        b
    }

    /// Magic must be exactly "BM" and the pixel data must not start inside
    /// the headers.
    pub fn validate(&self) -> Result<(), BmpError> {
        if self.magic != MAGIC {
            return Err(BmpError::UnrecognizedFormat(self.magic));
        }
        if (self.pixel_offset as usize) < HEADERS_SIZE {
            return Err(BmpError::InvalidHeader(format!(
                "pixel data offset {} is inside the {HEADERS_SIZE}-byte headers",
                self.pixel_offset
            )));
        }
        Ok(())
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive: bottom-up rows. Negative: top-down rows.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    pub fn from_bytes(b: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut b = [0u8; INFO_HEADER_SIZE];
        b[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        b[4..8].copy_from_slice(&self.width.to_le_bytes());
        b[8..12].copy_from_slice(&self.height.to_le_bytes());
        b[12..14].copy_from_slice(&self.planes.to_le_bytes());
        b[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        b[16..20].copy_from_slice(&self.compression.to_le_bytes());
        b[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        b[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        b[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        b[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        b[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        b
    }

    /// Check header size, bit depth, compression and dimensions.
    ///
    /// Returns the decoded bit depth on success.
    pub fn validate(&self) -> Result<BitDepth, BmpError> {
        if self.header_size as usize != INFO_HEADER_SIZE {
            return Err(BmpError::UnsupportedVariant(format!(
                "info header size {} (only {INFO_HEADER_SIZE}-byte BITMAPINFOHEADER is supported)",
                self.header_size
            )));
        }
        let depth = BitDepth::from_bits(self.bits_per_pixel).ok_or_else(|| {
            BmpError::UnsupportedVariant(format!(
                "BMP bit depth {} unsupported (only 8 and 24)",
                self.bits_per_pixel
            ))
        })?;
        if self.compression != 0 {
            return Err(BmpError::UnsupportedVariant(format!(
                "BMP compression {} unsupported (only uncompressed)",
                self.compression
            )));
        }
        if self.width <= 0 {
            return Err(BmpError::InvalidHeader(format!(
                "BMP width {} is not positive",
                self.width
            )));
        }
        if self.height == 0 {
            return Err(BmpError::InvalidHeader("BMP height is zero".into()));
        }
        Ok(depth)
    }

    /// Palette entries implied by this header: `colors_used`, or 256 when zero.
    pub fn palette_len(&self) -> usize {
        if self.colors_used == 0 {
            MAX_PALETTE_ENTRIES
        } else {
            self.colors_used as usize
        }
    }

    /// Number of stored rows (`|height|`).
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }
}
