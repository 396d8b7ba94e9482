//! Owned row-major pixel buffer.

use std::ops::{Index, IndexMut};

use super::Image;
use crate::error::RasterError;

/// A dense 2D image owning its samples in row-major order.
///
/// The sample at `(x, y)` lives at `x + width * y`. The buffer length is
/// always exactly `width * height`; it is never resized after
/// construction.
///
/// # Example
///
/// ```
/// use termgfx_raster::{Image, ImageBuffer};
///
/// let mut image = ImageBuffer::<u8>::new(4, 3).unwrap();
/// image.set(2, 1, 7);
///
/// assert_eq!(image.get(2, 1), 7);
/// assert_eq!(image.sample(0, 0), 0);
/// assert!(image.try_get(4, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer<T> {
    data: Vec<T>,
    width: u32,
    height: u32,
}

impl<T: Copy + Default> ImageBuffer<T> {
    /// Create a zero-initialised (`T::default()`) image.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidDimensions`] if either dimension is
    /// zero or the pixel count does not fit in memory indices.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            data: vec![T::default(); len],
            width,
            height,
        })
    }

    /// Wrap an existing row-major sample vector.
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self, RasterError> {
        let len = pixel_count(width, height)?;
        if data.len() != len {
            return Err(RasterError::BufferSizeMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Materialise any image (typically a lazy view) into an owned buffer.
    pub fn from_image<I>(image: &I) -> Result<Self, RasterError>
    where
        I: Image<Sample = T> + ?Sized,
    {
        let (width, height) = (image.width(), image.height());
        let mut data = Vec::with_capacity(pixel_count(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.push(image.sample(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Reset every sample to `T::default()`.
    pub fn clear(&mut self) {
        self.fill(T::default());
    }

    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|v| *v = value);
    }
}

impl<T: Copy> ImageBuffer<T> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> T {
        self.data[self.offset(x, y)]
    }

    /// Overwrite the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        let offset = self.offset(x, y);
        self.data[offset] = value;
    }

    /// Bounds-checked read returning an error instead of panicking.
    pub fn try_get(&self, x: u32, y: u32) -> Result<T, RasterError> {
        self.check(x, y)?;
        Ok(self.data[(x as usize) + (self.width as usize) * (y as usize)])
    }

    /// Bounds-checked write returning an error instead of panicking.
    pub fn try_set(&mut self, x: u32, y: u32, value: T) -> Result<(), RasterError> {
        self.check(x, y)?;
        self.data[(x as usize) + (self.width as usize) * (y as usize)] = value;
        Ok(())
    }

    /// All samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        (x as usize) + (self.width as usize) * (y as usize)
    }

    fn check(&self, x: u32, y: u32) -> Result<(), RasterError> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(RasterError::InvalidDimensions { width, height })
}

impl<T: Copy> Image for ImageBuffer<T> {
    type Sample = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> T {
        self.get(x, y)
    }
}

impl<T: Copy> Index<(u32, u32)> for ImageBuffer<T> {
    type Output = T;

    fn index(&self, (x, y): (u32, u32)) -> &T {
        &self.data[self.offset(x, y)]
    }
}

impl<T: Copy> IndexMut<(u32, u32)> for ImageBuffer<T> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
        let offset = self.offset(x, y);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        for (w, h) in [(1, 1), (3, 7), (16, 2)] {
            let image = ImageBuffer::<u16>::new(w, h).unwrap();
            assert_eq!(image.as_slice().len(), (w * h) as usize);
            assert!(image.as_slice().iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            ImageBuffer::<u8>::new(0, 5),
            Err(RasterError::InvalidDimensions {
                width: 0,
                height: 5
            })
        ));
        assert!(ImageBuffer::<u8>::new(5, 0).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let mut image = ImageBuffer::<u8>::new(3, 2).unwrap();
        image.set(1, 0, 1);
        image.set(0, 1, 2);
        image[(2, 1)] = 3;
        assert_eq!(image.as_slice(), &[0, 1, 0, 2, 0, 3]);
    }

    #[test]
    fn test_clear_after_writes() {
        let mut image = ImageBuffer::<f32>::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                image.set(x, y, (x * y) as f32 + 0.5);
            }
        }
        image.clear();
        assert!(image.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let image = ImageBuffer::<u8>::new(2, 2).unwrap();
        let _ = image.get(0, 2);
    }

    #[test]
    fn test_try_set_out_of_bounds() {
        let mut image = ImageBuffer::<u8>::new(2, 2).unwrap();
        let err = image.try_set(2, 0, 1).unwrap_err();
        assert!(matches!(err, RasterError::OutOfBounds { x: 2, y: 0, .. }));
        assert!(image.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_from_vec_length_checked() {
        let err = ImageBuffer::from_vec(2, 2, vec![1u8, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_image_copies_samples() {
        let source = ImageBuffer::from_vec(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let copy = ImageBuffer::from_image(&&source).unwrap();
        assert_eq!(copy, source);
    }
}
