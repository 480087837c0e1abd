//! Pixel transforms over decoded images.

mod compare;
mod negate;

pub use compare::{
    Comparison, Differences, MAX_RECORDED_DIFFERENCES, PixelCoord, compare, compare_with_cap,
};
pub use negate::negate;
