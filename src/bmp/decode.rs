//! BMP decoder for uncompressed 8-bit indexed and 24-bit true-color files.

use tracing::{debug, trace};

use super::header::{
    FILE_HEADER_SIZE, FileHeader, HEADERS_SIZE, INFO_HEADER_SIZE, InfoHeader, MAX_PALETTE_ENTRIES,
    PALETTE_ENTRY_SIZE,
};
use crate::error::BmpError;
use crate::image::{BmpImage, PixelData};
use crate::limits::Limits;
use crate::pixel::{BitDepth, Orientation, PaletteEntry, row_stride};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
///
/// Every level rejects bad magic, non-40-byte info headers, bit depths other
/// than 8 and 24, compression, and files whose declared size cannot hold the
/// pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Reject files that violate the format even in non-critical ways.
    /// Validates: file size field equals the input length, planes == 1,
    /// image size field is 0 or exact, pixel data directly follows the
    /// palette, every palette index is in range.
    Strict,

    /// Default behavior. Additionally rejects pixel data offsets that point
    /// into the palette, and palettes larger than 256 entries.
    #[default]
    Standard,

    /// Accept as much as possible. Oversized palettes are clamped to 256
    /// entries and the pixel data offset only needs to clear the headers.
    Permissive,
}

// ── Header-only parse ───────────────────────────────────────────────

/// Headers plus the layout facts derived from them.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParsedHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
    pub depth: BitDepth,
    pub width: u32,
    pub rows: u32,
    pub orientation: Orientation,
    /// Palette entries to read (zero for 24-bit).
    pub palette_len: usize,
}

/// Read and validate both fixed headers.
pub(crate) fn parse_headers(
    data: &[u8],
    permissiveness: Permissiveness,
) -> Result<ParsedHeaders, BmpError> {
    if data.len() < HEADERS_SIZE {
        // A wrong magic is reported as such even on tiny inputs.
        if data.len() >= 2 && data[..2] != *b"BM" {
            return Err(BmpError::UnrecognizedFormat([data[0], data[1]]));
        }
        return Err(BmpError::HeaderTruncated {
            needed: HEADERS_SIZE,
            actual: data.len(),
        });
    }

    let mut fh = [0u8; FILE_HEADER_SIZE];
    fh.copy_from_slice(&data[..FILE_HEADER_SIZE]);
    let file = FileHeader::from_bytes(&fh);
    if file.magic != *b"BM" {
        return Err(BmpError::UnrecognizedFormat(file.magic));
    }

    let mut ih = [0u8; INFO_HEADER_SIZE];
    ih.copy_from_slice(&data[FILE_HEADER_SIZE..HEADERS_SIZE]);
    let info = InfoHeader::from_bytes(&ih);
    let depth = info.validate()?;
    file.validate()?;

    let palette_len = match depth {
        BitDepth::TrueColor24 => 0,
        BitDepth::Indexed8 => {
            let n = info.palette_len();
            if n > MAX_PALETTE_ENTRIES {
                if permissiveness != Permissiveness::Permissive {
                    return Err(BmpError::InvalidHeader(format!(
                        "BMP palette count ({n}) exceeds max for 8-bit depth ({MAX_PALETTE_ENTRIES})"
                    )));
                }
                MAX_PALETTE_ENTRIES
            } else {
                n
            }
        }
    };

    if permissiveness == Permissiveness::Strict && info.planes != 1 {
        return Err(BmpError::InvalidHeader(format!(
            "BMP planes field is {}, expected 1",
            info.planes
        )));
    }

    debug!(
        width = info.width,
        height = info.height,
        bits = info.bits_per_pixel,
        palette_len,
        pixel_offset = file.pixel_offset,
        file_size = file.file_size,
        "parsed BMP headers"
    );

    Ok(ParsedHeaders {
        file,
        info,
        depth,
        width: info.width as u32,
        rows: info.rows(),
        orientation: Orientation::from_signed_height(info.height),
        palette_len,
    })
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a complete BMP file held in memory.
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: Permissiveness,
) -> Result<BmpImage, BmpError> {
    let h = parse_headers(data, permissiveness)?;
    let is_strict = permissiveness == Permissiveness::Strict;

    if let Some(limits) = limits {
        limits.check_geometry(h.width, h.rows)?;
    }

    let stride = row_stride(h.width, h.depth).ok_or(BmpError::DimensionsTooLarge {
        width: h.width,
        height: h.rows,
    })?;
    if let Some(limits) = limits {
        limits.check_allocation(h.palette_len, stride, h.rows)?;
    }
    let data_size = stride
        .checked_mul(h.rows as usize)
        .ok_or(BmpError::DimensionsTooLarge {
            width: h.width,
            height: h.rows,
        })?;

    // The declared file size must be able to hold the pixel data before any
    // buffer is sized from it.
    let pixel_offset = h.file.pixel_offset as usize;
    let required = pixel_offset as u64 + data_size as u64;
    if u64::from(h.file.file_size) < required {
        return Err(BmpError::SizeMismatch {
            declared: u64::from(h.file.file_size),
            required,
        });
    }

    let palette_end = HEADERS_SIZE + h.palette_len * PALETTE_ENTRY_SIZE;
    match permissiveness {
        Permissiveness::Strict if pixel_offset != palette_end => {
            return Err(BmpError::InvalidHeader(format!(
                "pixel data offset {pixel_offset} does not directly follow the palette (expected {palette_end})"
            )));
        }
        Permissiveness::Standard if pixel_offset < palette_end => {
            return Err(BmpError::InvalidHeader(format!(
                "pixel data offset {pixel_offset} overlaps the palette ending at {palette_end}"
            )));
        }
        _ => {}
    }

    if is_strict {
        if h.file.file_size as usize != data.len() {
            return Err(BmpError::InvalidHeader(format!(
                "BMP file size field ({}) doesn't match actual size ({})",
                h.file.file_size,
                data.len()
            )));
        }
        if h.info.image_size != 0 && h.info.image_size as usize != data_size {
            return Err(BmpError::InvalidHeader(format!(
                "BMP image data size field ({}) doesn't match expected ({data_size})",
                h.info.image_size
            )));
        }
    }

    let pixel_bytes = data
        .get(pixel_offset..)
        .and_then(|rest| rest.get(..data_size))
        .ok_or(BmpError::UnexpectedEof)?;

    let image_data = match h.depth {
        BitDepth::TrueColor24 => PixelData::TrueColor24 {
            pixels: copy_to_owned(pixel_bytes)?,
        },
        BitDepth::Indexed8 => {
            let palette = read_palette(data, h.palette_len)?;
            let indices = copy_to_owned(pixel_bytes)?;
            if is_strict {
                check_indices(&indices, stride, h.width as usize, palette.len())?;
            }
            PixelData::Indexed8 { palette, indices }
        }
    };

    Ok(BmpImage::new(h.width, h.rows, h.orientation, image_data)?.with_passthrough(&h.info))
}

/// Read `count` palette entries immediately after the info header.
fn read_palette(data: &[u8], count: usize) -> Result<Vec<PaletteEntry>, BmpError> {
    let bytes = data
        .get(HEADERS_SIZE..HEADERS_SIZE + count * PALETTE_ENTRY_SIZE)
        .ok_or(BmpError::UnexpectedEof)?;
    let mut palette = Vec::new();
    palette
        .try_reserve_exact(count)
        .map_err(|_| BmpError::AllocationFailed {
            bytes: count * PALETTE_ENTRY_SIZE,
        })?;
    for (i, chunk) in bytes.chunks_exact(PALETTE_ENTRY_SIZE).enumerate() {
        let entry = PaletteEntry::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        trace!(index = i, b = entry.blue, g = entry.green, r = entry.red, "palette entry");
        palette.push(entry);
    }
    Ok(palette)
}

/// Copy into an owned buffer, surfacing allocation failure as an error.
fn copy_to_owned(src: &[u8]) -> Result<Vec<u8>, BmpError> {
    let mut out = Vec::new();
    out.try_reserve_exact(src.len())
        .map_err(|_| BmpError::AllocationFailed { bytes: src.len() })?;
    out.extend_from_slice(src);
    Ok(out)
}

fn check_indices(
    indices: &[u8],
    stride: usize,
    width: usize,
    palette_len: usize,
) -> Result<(), BmpError> {
    for (row_idx, row) in indices.chunks_exact(stride).enumerate() {
        if let Some(x) = row[..width]
            .iter()
            .position(|&i| usize::from(i) >= palette_len)
        {
            return Err(BmpError::InvalidData(format!(
                "palette index {} at stored row {row_idx}, column {x} exceeds palette size {palette_len}",
                row[x]
            )));
        }
    }
    Ok(())
}
