//! In-memory raster: headers-semantic fields plus an owned pixel buffer.

use crate::bmp::header::{
    FileHeader, HEADERS_SIZE, INFO_HEADER_SIZE, InfoHeader, MAGIC, MAX_PALETTE_ENTRIES,
    PALETTE_ENTRY_SIZE,
};
use crate::error::BmpError;
use crate::pixel::{BitDepth, Orientation, PaletteEntry, row_stride};

/// Pixel storage, tagged by bit depth.
///
/// Both buffers hold `row_stride * rows` bytes in stored row order, padding
/// included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelData {
    /// 8-bit palette indices plus the palette they index into.
    Indexed8 {
        palette: Vec<PaletteEntry>,
        indices: Vec<u8>,
    },
    /// 24-bit B, G, R triples.
    TrueColor24 { pixels: Vec<u8> },
}

impl PixelData {
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            Self::Indexed8 { .. } => BitDepth::Indexed8,
            Self::TrueColor24 { .. } => BitDepth::TrueColor24,
        }
    }

    /// The raw pixel buffer (indices or BGR triples), padding included.
    pub fn buffer(&self) -> &[u8] {
        match self {
            Self::Indexed8 { indices, .. } => indices,
            Self::TrueColor24 { pixels } => pixels,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Indexed8 { indices, .. } => indices,
            Self::TrueColor24 { pixels } => pixels,
        }
    }

    /// The palette, for 8-bit data.
    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        match self {
            Self::Indexed8 { palette, .. } => Some(palette),
            Self::TrueColor24 { .. } => None,
        }
    }
}

/// A decoded (or directly constructed) 8-bit or 24-bit BMP image.
///
/// The buffer length always equals `row_stride() * height()`, and
/// [`orientation`](Self::orientation) always describes the order rows are
/// stored in. Constructors reject anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpImage {
    width: u32,
    rows: u32,
    orientation: Orientation,
    planes: u16,
    x_pixels_per_meter: i32,
    y_pixels_per_meter: i32,
    colors_important: u32,
    data: PixelData,
}

impl BmpImage {
    /// Build a 24-bit image from a padded BGR buffer.
    pub fn true_color(
        width: u32,
        height: u32,
        orientation: Orientation,
        pixels: Vec<u8>,
    ) -> Result<Self, BmpError> {
        Self::new(width, height, orientation, PixelData::TrueColor24 { pixels })
    }

    /// Build an 8-bit image from a palette of 1 to 256 entries and a padded
    /// index buffer.
    pub fn indexed(
        width: u32,
        height: u32,
        orientation: Orientation,
        palette: Vec<PaletteEntry>,
        indices: Vec<u8>,
    ) -> Result<Self, BmpError> {
        Self::new(
            width,
            height,
            orientation,
            PixelData::Indexed8 { palette, indices },
        )
    }

    /// Build an image from already-tagged pixel data.
    ///
    /// 8-bit data must carry a palette of 1 to 256 entries, the range a
    /// `colors_used` field can describe.
    pub fn new(
        width: u32,
        height: u32,
        orientation: Orientation,
        data: PixelData,
    ) -> Result<Self, BmpError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(BmpError::InvalidHeader(format!(
                "image dimensions {width}x{height} out of range"
            )));
        }
        let needed = row_stride(width, data.bit_depth())
            .and_then(|stride| stride.checked_mul(height as usize))
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        let actual = data.buffer().len();
        if actual != needed {
            return Err(BmpError::BufferSizeMismatch { needed, actual });
        }
        if let Some(palette) = data.palette()
            && !(1..=MAX_PALETTE_ENTRIES).contains(&palette.len())
        {
            return Err(BmpError::InvalidData(format!(
                "palette has {} entries (expected 1 to {MAX_PALETTE_ENTRIES})",
                palette.len()
            )));
        }
        Ok(Self {
            width,
            rows: height,
            orientation,
            planes: 1,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_important: 0,
            data,
        })
    }

    /// Carry the opaque pass-through fields of a decoded info header.
    pub(crate) fn with_passthrough(mut self, info: &InfoHeader) -> Self {
        self.planes = info.planes;
        self.x_pixels_per_meter = info.x_pixels_per_meter;
        self.y_pixels_per_meter = info.y_pixels_per_meter;
        self.colors_important = info.colors_important;
        self
    }

    /// Set the horizontal and vertical resolution, in pixels per meter.
    pub fn with_resolution(mut self, x: i32, y: i32) -> Self {
        self.x_pixels_per_meter = x;
        self.y_pixels_per_meter = y;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row count (the magnitude of the on-wire height).
    pub fn height(&self) -> u32 {
        self.rows
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The on-wire height: positive for bottom-up, negative for top-down.
    pub fn signed_height(&self) -> i32 {
        // rows <= i32::MAX is enforced at construction
        let rows = self.rows as i32;
        match self.orientation {
            Orientation::BottomUp => rows,
            Orientation::TopDown => -rows,
        }
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.data.bit_depth()
    }

    pub fn resolution(&self) -> (i32, i32) {
        (self.x_pixels_per_meter, self.y_pixels_per_meter)
    }

    /// Bytes per stored row, padding included.
    pub fn row_stride(&self) -> usize {
        // Checked when the image was built.
        (self.width as usize * self.bit_depth().bytes_per_pixel() + 3) & !3
    }

    /// Pixel bytes per row, padding excluded.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.bit_depth().bytes_per_pixel()
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Buffers may be rewritten in place but never resized.
    pub(crate) fn data_mut(&mut self) -> &mut PixelData {
        &mut self.data
    }

    pub fn into_data(self) -> PixelData {
        self.data
    }

    pub fn buffer(&self) -> &[u8] {
        self.data.buffer()
    }

    /// Mutable access to the pixel buffer. The length cannot change, so the
    /// geometry invariant holds.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.data.buffer_mut()
    }

    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        self.data.palette()
    }

    pub fn palette_mut(&mut self) -> Option<&mut [PaletteEntry]> {
        match &mut self.data {
            PixelData::Indexed8 { palette, .. } => Some(palette),
            PixelData::TrueColor24 { .. } => None,
        }
    }

    /// Stored row `index` (buffer order), padding included.
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        let stride = self.row_stride();
        let start = index.checked_mul(stride)?;
        let end = start.checked_add(stride)?;
        self.buffer().get(start..end)
    }

    /// Visual row `y` counted from the top, padding excluded.
    pub fn visual_row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.rows {
            return None;
        }
        let index = self
            .orientation
            .storage_row(y as usize, self.rows as usize);
        let row_bytes = self.row_bytes();
        self.row(index).map(|row| &row[..row_bytes])
    }

    /// Pixel cell at visual `(x, y)`, `y` counted from the top.
    ///
    /// One byte (palette index) for 8-bit images, B, G, R for 24-bit images.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let bpp = self.bit_depth().bytes_per_pixel();
        let start = x as usize * bpp;
        self.visual_row(y).map(|row| &row[start..start + bpp])
    }

    /// Mutable pixel cell at visual `(x, y)`.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.rows {
            return None;
        }
        let bpp = self.bit_depth().bytes_per_pixel();
        let index = self
            .orientation
            .storage_row(y as usize, self.rows as usize);
        let start = index * self.row_stride() + x as usize * bpp;
        self.buffer_mut().get_mut(start..start + bpp)
    }

    /// Stored 24-bit row `index` as typed BGR pixels, padding excluded.
    #[cfg(feature = "rgb")]
    pub fn row_bgr(&self, index: usize) -> Option<&[rgb::alt::BGR<u8>]> {
        use rgb::AsPixels as _;
        if self.bit_depth() != BitDepth::TrueColor24 {
            return None;
        }
        let row_bytes = self.row_bytes();
        self.row(index).map(|row| row[..row_bytes].as_pixels())
    }

    pub(crate) fn set_orientation_tag(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Palette size in bytes on the wire (zero for 24-bit).
    pub(crate) fn palette_bytes(&self) -> usize {
        self.palette().map_or(0, |p| p.len() * PALETTE_ENTRY_SIZE)
    }

    /// The info header an encode of this image writes.
    ///
    /// Fails with [`BmpError::DimensionsTooLarge`] when the pixel buffer does
    /// not fit the 32-bit image size field.
    pub fn info_header(&self) -> Result<InfoHeader, BmpError> {
        // at most 256 entries, enforced at construction
        let colors_used = self.palette().map_or(0, |p| p.len() as u32);
        Ok(InfoHeader {
            header_size: INFO_HEADER_SIZE as u32,
            width: self.width as i32,
            height: self.signed_height(),
            planes: self.planes,
            bits_per_pixel: self.bit_depth().bits(),
            compression: 0,
            image_size: self.wire_u32(self.buffer().len())?,
            x_pixels_per_meter: self.x_pixels_per_meter,
            y_pixels_per_meter: self.y_pixels_per_meter,
            colors_used,
            colors_important: self.colors_important,
        })
    }

    /// The file header an encode of this image writes.
    ///
    /// Fails with [`BmpError::DimensionsTooLarge`] when the whole file does
    /// not fit the 32-bit file size field.
    pub fn file_header(&self) -> Result<FileHeader, BmpError> {
        let pixel_offset = HEADERS_SIZE + self.palette_bytes();
        Ok(FileHeader {
            magic: MAGIC,
            file_size: self.wire_u32(pixel_offset.saturating_add(self.buffer().len()))?,
            reserved1: 0,
            reserved2: 0,
            pixel_offset: self.wire_u32(pixel_offset)?,
        })
    }

    fn wire_u32(&self, len: usize) -> Result<u32, BmpError> {
        u32::try_from(len).map_err(|_| BmpError::DimensionsTooLarge {
            width: self.width,
            height: self.rows,
        })
    }

    /// Total encoded size in bytes, or `None` if it does not fit the 32-bit
    /// file size field.
    pub fn encoded_len(&self) -> Option<usize> {
        let len = HEADERS_SIZE
            .checked_add(self.palette_bytes())?
            .checked_add(self.buffer().len())?;
        u32::try_from(len).ok()?;
        Some(len)
    }
}
