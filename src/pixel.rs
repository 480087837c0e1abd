/// Supported BMP bit depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 8 bits per pixel, one palette index per pixel.
    Indexed8,
    /// 24 bits per pixel, stored B, G, R.
    TrueColor24,
}

impl BitDepth {
    /// Map an on-wire bits-per-pixel value. `None` for anything but 8 or 24.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::Indexed8),
            24 => Some(Self::TrueColor24),
            _ => None,
        }
    }

    /// On-wire bits-per-pixel value.
    pub fn bits(&self) -> u16 {
        match self {
            Self::Indexed8 => 8,
            Self::TrueColor24 => 24,
        }
    }

    /// Bytes per pixel cell in the pixel buffer.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::TrueColor24 => 3,
        }
    }
}

/// Row order of a pixel buffer.
///
/// On the wire this is the sign of the height field: positive heights are
/// bottom-up, negative heights are top-down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Buffer row 0 is the visual bottom row.
    #[default]
    BottomUp,
    /// Buffer row 0 is the visual top row.
    TopDown,
}

impl Orientation {
    pub(crate) fn from_signed_height(height: i32) -> Self {
        if height < 0 {
            Self::TopDown
        } else {
            Self::BottomUp
        }
    }

    /// Index of the buffer row holding visual row `y` (counted from the top).
    pub(crate) fn storage_row(&self, y: usize, rows: usize) -> usize {
        match self {
            Self::TopDown => y,
            Self::BottomUp => rows - 1 - y,
        }
    }
}

/// One palette entry as stored on the wire: blue, green, red, reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    /// Ignored by readers; carried through unchanged.
    pub reserved: u8,
}

impl PaletteEntry {
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }

    pub(crate) fn from_bytes([blue, green, red, reserved]: [u8; 4]) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; 4] {
        [self.blue, self.green, self.red, self.reserved]
    }

    /// Replace each color channel `c` with `255 - c`. `reserved` is untouched.
    pub fn invert(&mut self) {
        self.blue = 255 - self.blue;
        self.green = 255 - self.green;
        self.red = 255 - self.red;
    }
}

#[cfg(feature = "rgb")]
impl From<PaletteEntry> for rgb::alt::BGRA<u8> {
    fn from(e: PaletteEntry) -> Self {
        rgb::alt::BGRA {
            b: e.blue,
            g: e.green,
            r: e.red,
            a: e.reserved,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGRA<u8>> for PaletteEntry {
    fn from(p: rgb::alt::BGRA<u8>) -> Self {
        Self {
            blue: p.b,
            green: p.g,
            red: p.r,
            reserved: p.a,
        }
    }
}

/// Bytes per stored row: `width * bytes_per_pixel` rounded up to a multiple of 4.
///
/// Returns `None` on overflow.
pub fn row_stride(width: u32, depth: BitDepth) -> Option<usize> {
    (width as usize)
        .checked_mul(depth.bytes_per_pixel())
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}
