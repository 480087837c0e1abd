#![allow(dead_code)]

use zenbmp::{BitDepth, BmpImage, Orientation, PaletteEntry, row_stride};

pub fn noise_pattern(len: usize, seed: u32) -> Vec<u8> {
    let mut out = vec![0u8; len];
    let mut state: u32 = seed | 1;
    for p in out.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    out
}

/// Build a 24-bit image from a per-pixel BGR function over visual
/// coordinates (`y` from the top). Padding bytes are zero.
pub fn true_color_from_fn(
    width: u32,
    height: u32,
    orientation: Orientation,
    f: impl Fn(u32, u32) -> [u8; 3],
) -> BmpImage {
    let stride = row_stride(width, BitDepth::TrueColor24).unwrap();
    let mut buf = vec![0u8; stride * height as usize];
    for y in 0..height {
        let row = match orientation {
            Orientation::TopDown => y,
            Orientation::BottomUp => height - 1 - y,
        } as usize;
        for x in 0..width {
            let off = row * stride + x as usize * 3;
            buf[off..off + 3].copy_from_slice(&f(x, y));
        }
    }
    BmpImage::true_color(width, height, orientation, buf).unwrap()
}

/// Build an 8-bit image from a per-pixel index function over visual
/// coordinates.
pub fn indexed_from_fn(
    width: u32,
    height: u32,
    orientation: Orientation,
    palette: Vec<PaletteEntry>,
    f: impl Fn(u32, u32) -> u8,
) -> BmpImage {
    let stride = row_stride(width, BitDepth::Indexed8).unwrap();
    let mut buf = vec![0u8; stride * height as usize];
    for y in 0..height {
        let row = match orientation {
            Orientation::TopDown => y,
            Orientation::BottomUp => height - 1 - y,
        } as usize;
        for x in 0..width {
            buf[row * stride + x as usize] = f(x, y);
        }
    }
    BmpImage::indexed(width, height, orientation, palette, buf).unwrap()
}

pub fn checker(x: u32, y: u32) -> [u8; 3] {
    if (x + y) % 2 == 0 {
        [200, 220, 240]
    } else {
        [10, 40, 70]
    }
}

/// 256-entry gray ramp with a nonzero reserved byte on every eighth entry.
pub fn gray_palette() -> Vec<PaletteEntry> {
    (0..=255u8)
        .map(|i| PaletteEntry {
            blue: i,
            green: i,
            red: i,
            reserved: if i % 8 == 0 { 1 } else { 0 },
        })
        .collect()
}

/// Hand-assembled BMP file. Fields are written at their wire offsets so tests
/// can corrupt any of them independently.
pub struct RawBmp {
    pub magic: [u8; 2],
    pub file_size: Option<u32>,
    pub pixel_offset: Option<u32>,
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits: u16,
    pub compression: u32,
    pub image_size: u32,
    pub colors_used: u32,
    pub palette: Vec<[u8; 4]>,
    /// Bytes between the palette and the pixel data.
    pub gap: usize,
    pub pixels: Vec<u8>,
}

impl RawBmp {
    /// A valid 24-bit bottom-up file with zeroed pixels.
    pub fn true_color(width: i32, height: i32) -> Self {
        let stride = (width as usize * 3 + 3) & !3;
        Self {
            magic: *b"BM",
            file_size: None,
            pixel_offset: None,
            header_size: 40,
            width,
            height,
            planes: 1,
            bits: 24,
            compression: 0,
            image_size: 0,
            colors_used: 0,
            palette: Vec::new(),
            gap: 0,
            pixels: vec![0; stride * height.unsigned_abs() as usize],
        }
    }

    /// A valid 8-bit bottom-up file with a `colors`-entry palette.
    pub fn indexed(width: i32, height: i32, colors: u32) -> Self {
        let stride = (width as usize + 3) & !3;
        let n = if colors == 0 { 256 } else { colors as usize };
        Self {
            bits: 8,
            colors_used: colors,
            palette: (0..n).map(|i| [i as u8, i as u8, i as u8, 0]).collect(),
            pixels: vec![0; stride * height.unsigned_abs() as usize],
            ..Self::true_color(width, height)
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let offset = 54 + self.palette.len() * 4 + self.gap;
        let total = offset + self.pixels.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&self.file_size.unwrap_or(total as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(
            &self.pixel_offset.unwrap_or(offset as u32).to_le_bytes(),
        );
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        for entry in &self.palette {
            out.extend_from_slice(entry);
        }
        out.extend(std::iter::repeat_n(0xEEu8, self.gap));
        out.extend_from_slice(&self.pixels);
        out
    }
}
