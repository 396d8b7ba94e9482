//! Lazy, read-only image views.
//!
//! Each view borrows its source for `'a` and computes samples on demand;
//! nothing is copied. Views implement [`Image`] themselves, so they nest:
//!
//! ```
//! use termgfx::{Image, ImageBuffer, Magnify, Rescale, Rotate90, Rotation};
//!
//! let mut image = ImageBuffer::<u8>::new(3, 2).unwrap();
//! image.set(2, 0, 255);
//!
//! let rotated = Rotate90::new(&image, Rotation::Deg180);
//! let big = Magnify::new(&rotated, 2).unwrap();
//! let indices = Rescale::new(&big, 0.0, 255.0, 101).unwrap();
//!
//! assert_eq!((indices.width(), indices.height()), (6, 4));
//! assert_eq!(indices.sample(0, 3), 100);
//! ```

use termgfx_raster::{Image, Scalar};

use crate::error::{GraphicsError, Result};
use crate::models::palette::MAX_PALETTE_SIZE;

/// Maps scalar samples in `[min, max]` onto palette indices `0..palette_size`.
///
/// `sample = round(clamp(palette_size * (v - min) / (max - min), 0, palette_size - 1))`,
/// so values at or below `min` give index 0 and values at or above `max`
/// give the last index.
#[derive(Debug)]
pub struct Rescale<'a, I: ?Sized> {
    source: &'a I,
    min: f64,
    max: f64,
    palette_size: usize,
}

impl<'a, I> Rescale<'a, I>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    /// # Errors
    ///
    /// - [`GraphicsError::InvalidRange`] if `min == max` or either bound is
    ///   not finite.
    /// - [`GraphicsError::InvalidArgument`] if `palette_size` is outside
    ///   `1..=256`.
    pub fn new(source: &'a I, min: f64, max: f64, palette_size: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(GraphicsError::InvalidRange { min, max });
        }
        if palette_size == 0 || palette_size > MAX_PALETTE_SIZE {
            return Err(GraphicsError::InvalidArgument(format!(
                "palette size {} outside 1..={}",
                palette_size, MAX_PALETTE_SIZE
            )));
        }
        Ok(Self {
            source,
            min,
            max,
            palette_size,
        })
    }
}

impl<I> Image for Rescale<'_, I>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    type Sample = u8;

    fn width(&self) -> u32 {
        self.source.width()
    }

    fn height(&self) -> u32 {
        self.source.height()
    }

    fn sample(&self, x: u32, y: u32) -> u8 {
        let n = self.palette_size as f64;
        let v = self.source.sample(x, y).to_f64();
        let scaled = n * (v - self.min) / (self.max - self.min);
        // NaN samples fall through clamp and cast to index 0
        scaled.clamp(0.0, n - 1.0).round() as u8
    }
}

/// Nearest-neighbour upsampling by an integer factor.
#[derive(Debug)]
pub struct Magnify<'a, I: ?Sized> {
    source: &'a I,
    factor: u32,
}

impl<'a, I: Image + ?Sized> Magnify<'a, I> {
    /// # Errors
    ///
    /// [`GraphicsError::InvalidArgument`] if `factor` is zero or the
    /// magnified size overflows `u32`.
    pub fn new(source: &'a I, factor: u32) -> Result<Self> {
        if factor == 0 {
            return Err(GraphicsError::InvalidArgument(
                "magnification factor must be at least 1".to_string(),
            ));
        }
        if source.width().checked_mul(factor).is_none()
            || source.height().checked_mul(factor).is_none()
        {
            return Err(GraphicsError::InvalidArgument(format!(
                "magnifying {}x{} by {} overflows",
                source.width(),
                source.height(),
                factor
            )));
        }
        Ok(Self { source, factor })
    }
}

impl<I: Image + ?Sized> Image for Magnify<'_, I> {
    type Sample = I::Sample;

    fn width(&self) -> u32 {
        self.source.width() * self.factor
    }

    fn height(&self) -> u32 {
        self.source.height() * self.factor
    }

    fn sample(&self, x: u32, y: u32) -> I::Sample {
        self.source.sample(x / self.factor, y / self.factor)
    }
}

/// Quarter-turn rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// # Errors
    ///
    /// [`GraphicsError::InvalidArgument`] for anything but 90, 180 or 270.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(GraphicsError::InvalidArgument(format!(
                "rotation angle {} is not one of 90, 180, 270",
                other
            ))),
        }
    }

    fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Rotation by a multiple of 90 degrees.
///
/// With row 0 at the top of the screen, `Deg90` turns the picture a
/// quarter clockwise. 90 and 270 degrees swap width and height. With
/// `w`/`h` the view's own dimensions, samples are taken from:
///
/// | angle | source pixel            |
/// |-------|-------------------------|
/// | 90    | `(y, w - 1 - x)`        |
/// | 180   | `(w - 1 - x, h - 1 - y)`|
/// | 270   | `(h - 1 - y, x)`        |
#[derive(Debug)]
pub struct Rotate90<'a, I: ?Sized> {
    source: &'a I,
    rotation: Rotation,
}

impl<'a, I: Image + ?Sized> Rotate90<'a, I> {
    pub fn new(source: &'a I, rotation: Rotation) -> Self {
        Self { source, rotation }
    }

    /// Rotate by an angle in degrees (90, 180 or 270).
    pub fn from_degrees(source: &'a I, degrees: i32) -> Result<Self> {
        Ok(Self::new(source, Rotation::from_degrees(degrees)?))
    }
}

impl<I: Image + ?Sized> Image for Rotate90<'_, I> {
    type Sample = I::Sample;

    fn width(&self) -> u32 {
        if self.rotation.swaps_axes() {
            self.source.height()
        } else {
            self.source.width()
        }
    }

    fn height(&self) -> u32 {
        if self.rotation.swaps_axes() {
            self.source.width()
        } else {
            self.source.height()
        }
    }

    fn sample(&self, x: u32, y: u32) -> I::Sample {
        let (w, h) = (self.width(), self.height());
        match self.rotation {
            Rotation::Deg90 => self.source.sample(y, w - 1 - x),
            Rotation::Deg180 => self.source.sample(w - 1 - x, h - 1 - y),
            Rotation::Deg270 => self.source.sample(h - 1 - y, x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgfx_raster::ImageBuffer;

    fn numbered(width: u32, height: u32) -> ImageBuffer<u16> {
        let data = (0..width * height).map(|i| i as u16).collect();
        ImageBuffer::from_vec(width, height, data).unwrap()
    }

    fn pixels<I: Image>(image: &I) -> Vec<I::Sample> {
        (0..image.height())
            .flat_map(|y| (0..image.width()).map(move |x| image.sample(x, y)))
            .collect()
    }

    #[test]
    fn test_rescale_clamps_to_palette() {
        let image = ImageBuffer::from_vec(4, 1, vec![-5.0f32, 0.0, 10.0, 25.0]).unwrap();
        let view = Rescale::new(&image, 0.0, 10.0, 8).unwrap();
        assert_eq!(pixels(&view), vec![0, 0, 7, 7]);
    }

    #[test]
    fn test_rescale_rounds_to_nearest() {
        let image = ImageBuffer::from_vec(3, 1, vec![0u8, 64, 128]).unwrap();
        let view = Rescale::new(&image, 0.0, 255.0, 101).unwrap();
        // 101 * 64 / 255 = 25.35, 101 * 128 / 255 = 50.7
        assert_eq!(pixels(&view), vec![0, 25, 51]);
    }

    #[test]
    fn test_rescale_rejects_degenerate_range() {
        let image = numbered(2, 2);
        assert!(matches!(
            Rescale::new(&image, 3.0, 3.0, 101),
            Err(GraphicsError::InvalidRange { .. })
        ));
        assert!(Rescale::new(&image, 0.0, f64::NAN, 101).is_err());
        assert!(matches!(
            Rescale::new(&image, 0.0, 1.0, 0),
            Err(GraphicsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_magnify_nearest_neighbour() {
        let image = numbered(3, 2);
        let view = Magnify::new(&image, 3).unwrap();
        assert_eq!((view.width(), view.height()), (9, 6));
        for y in 0..view.height() {
            for x in 0..view.width() {
                assert_eq!(view.sample(x, y), image.get(x / 3, y / 3));
            }
        }
    }

    #[test]
    fn test_magnify_rejects_zero() {
        let image = numbered(1, 1);
        assert!(Magnify::new(&image, 0).is_err());
        assert!(Magnify::new(&image, 1).is_ok());
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let image = numbered(5, 3);
        let r90 = Rotate90::new(&image, Rotation::Deg90);
        let r180 = Rotate90::new(&image, Rotation::Deg180);
        assert_eq!((r90.width(), r90.height()), (3, 5));
        assert_eq!((r180.width(), r180.height()), (5, 3));
    }

    #[test]
    fn test_rotate_index_mapping() {
        // 0 1 2
        // 3 4 5
        let image = numbered(3, 2);
        let r90 = Rotate90::new(&image, Rotation::Deg90);
        assert_eq!(pixels(&r90), vec![3, 0, 4, 1, 5, 2]);
        let r180 = Rotate90::new(&image, Rotation::Deg180);
        assert_eq!(pixels(&r180), vec![5, 4, 3, 2, 1, 0]);
        let r270 = Rotate90::new(&image, Rotation::Deg270);
        assert_eq!(pixels(&r270), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let image = numbered(7, 4);
        let r1 = Rotate90::new(&image, Rotation::Deg90);
        let r2 = Rotate90::new(&r1, Rotation::Deg90);
        let r3 = Rotate90::new(&r2, Rotation::Deg90);
        let r4 = Rotate90::new(&r3, Rotation::Deg90);
        assert_eq!((r4.width(), r4.height()), (7, 4));
        assert_eq!(pixels(&r4), pixels(&image));
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::Deg270);
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(GraphicsError::InvalidArgument(_))
        ));
        let image = numbered(2, 2);
        assert!(Rotate90::from_degrees(&image, 0).is_err());
    }
}
