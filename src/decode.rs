use std::io::Read;

use crate::bmp::Permissiveness;
use crate::error::BmpError;
use crate::image::BmpImage;
use crate::limits::Limits;

/// Decode configuration builder.
///
/// ```
/// use zenbmp::{DecodeRequest, Limits, Permissiveness};
///
/// # fn run(data: &[u8]) -> Result<(), zenbmp::BmpError> {
/// let limits = Limits { max_pixels: Some(64 * 1024 * 1024), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(Permissiveness::Strict)
///     .decode()?;
/// # let _ = image;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: Permissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    pub fn decode(self) -> Result<BmpImage, BmpError> {
        crate::bmp::decode(self.data, self.limits, self.permissiveness)
    }
}

/// Read a whole BMP file from `reader` and decode it with default settings.
pub fn decode_reader<R: Read>(mut reader: R) -> Result<BmpImage, BmpError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    DecodeRequest::new(&data).decode()
}
