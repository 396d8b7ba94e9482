//! The image capability and the owned pixel buffer.
//!
//! Anything that can report a size and produce a sample per pixel is an
//! [`Image`]. [`ImageBuffer`] is the owned, row-major implementation;
//! lazy views elsewhere implement the same trait over a borrowed source.

mod buffer;
mod scalar;

pub use buffer::ImageBuffer;
pub use scalar::Scalar;

/// Read-only access to a rectangular grid of samples.
///
/// Coordinates run left to right (`x`) and top to bottom (`y`).
/// Implementations may panic when `sample` is called outside
/// `0..width() x 0..height()`; callers are expected to stay in range.
pub trait Image {
    /// The value type produced for each pixel.
    type Sample: Copy;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Sample at column `x`, row `y`.
    fn sample(&self, x: u32, y: u32) -> Self::Sample;
}

impl<I: Image + ?Sized> Image for &I {
    type Sample = I::Sample;

    #[inline]
    fn width(&self) -> u32 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> u32 {
        (**self).height()
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> Self::Sample {
        (**self).sample(x, y)
    }
}
