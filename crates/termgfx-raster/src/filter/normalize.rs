//! Intensity range stretching.

use crate::error::RasterError;
use crate::image::{Image, ImageBuffer, Scalar};

/// Linearly stretch the sample range of `image` onto `0..=u16::MAX`.
///
/// The smallest sample maps to 0 and the largest to 65535. A flat image
/// (all samples equal) maps to all zeros.
pub fn normalize_to_u16<I>(image: &I) -> Result<ImageBuffer<u16>, RasterError>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    let (width, height) = (image.width(), image.height());
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for y in 0..height {
        for x in 0..width {
            let v = image.sample(x, y).to_f64();
            min = min.min(v);
            max = max.max(v);
        }
    }

    let mut output = ImageBuffer::new(width, height)?;
    let range = max - min;
    if range <= 0.0 {
        return Ok(output);
    }
    let scale = u16::MAX as f64 / range;
    for y in 0..height {
        for x in 0..width {
            let v = image.sample(x, y).to_f64();
            output.set(x, y, u16::from_f64((v - min) * scale));
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretch_to_full_range() {
        let image = ImageBuffer::from_vec(3, 1, vec![10u8, 20, 30]).unwrap();
        let out = normalize_to_u16(&image).unwrap();
        assert_eq!(out.as_slice(), &[0, 32768, 65535]);
    }

    #[test]
    fn test_flat_image_maps_to_zero() {
        let image = ImageBuffer::from_vec(2, 2, vec![7u8; 4]).unwrap();
        let out = normalize_to_u16(&image).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0));
    }
}
