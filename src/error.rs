use crate::pixel::BitDepth;

/// Errors from BMP decoding, encoding and comparison.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("input too short for BMP headers: need {needed} bytes, got {actual}")]
    HeaderTruncated { needed: usize, actual: usize },

    #[error("unrecognized format magic bytes {0:?} (expected \"BM\")")]
    UnrecognizedFormat([u8; 2]),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("declared file size {declared} is smaller than the {required} bytes the headers require")]
    SizeMismatch { declared: u64, required: u64 },

    #[error("buffer size mismatch: need {needed} bytes, got {actual}")]
    BufferSizeMismatch { needed: usize, actual: usize },

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("bit depth mismatch: {left:?} vs {right:?}")]
    BitDepthMismatch { left: BitDepth, right: BitDepth },

    #[error("dimension mismatch: {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },

    #[error("failed to allocate {bytes} bytes")]
    AllocationFailed { bytes: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Coarse classification of [`BmpError`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The byte source or sink failed, or ended early.
    Io,
    /// Malformed or unsupported header fields.
    Format,
    /// Declared sizes disagree with the sizes the headers imply.
    SizeMismatch,
    /// Two images cannot be compared because their geometry differs.
    DimensionMismatch,
    /// A buffer could not be acquired.
    Allocation,
    /// A caller-configured [`Limits`](crate::Limits) bound was exceeded.
    Limit,
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::UnexpectedEof => ErrorKind::Io,
            Self::HeaderTruncated { .. }
            | Self::UnrecognizedFormat(_)
            | Self::InvalidHeader(_)
            | Self::UnsupportedVariant(_)
            | Self::DimensionsTooLarge { .. }
            | Self::InvalidData(_) => ErrorKind::Format,
            Self::SizeMismatch { .. } | Self::BufferSizeMismatch { .. } => ErrorKind::SizeMismatch,
            Self::BitDepthMismatch { .. } | Self::DimensionMismatch { .. } => {
                ErrorKind::DimensionMismatch
            }
            Self::AllocationFailed { .. } => ErrorKind::Allocation,
            Self::LimitExceeded(_) => ErrorKind::Limit,
        }
    }
}
