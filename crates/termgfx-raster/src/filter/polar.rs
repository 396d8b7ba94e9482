//! Cartesian/polar resampling around the image centre.

use super::convolve::gaussian_blur;
use crate::error::RasterError;
use crate::image::{Image, ImageBuffer, Scalar};

/// Angular resolution of the polar image: one row per degree.
pub const ANGLE_STEPS: u32 = 360;

/// Resample into polar coordinates around the image centre.
///
/// The result has one column per unit radius (up to half the smaller image
/// side) and [`ANGLE_STEPS`] rows, one per degree. The polar image is
/// smoothed with a 5x5 Gaussian (sigma 1) to fill sampling gaps.
pub fn cartesian_to_polar<I>(image: &I) -> Result<ImageBuffer<I::Sample>, RasterError>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    let (width, height) = (image.width(), image.height());
    let radius = width.min(height) / 2;
    let mut polar = ImageBuffer::new(radius, ANGLE_STEPS)?;
    let (cx, cy) = ((width / 2) as i64, (height / 2) as i64);

    for r in 0..radius {
        for theta in 0..ANGLE_STEPS {
            if let Some((x, y)) = polar_point(cx, cy, r, theta, width, height) {
                polar.set(r, theta, image.sample(x, y));
            }
        }
    }

    gaussian_blur(&polar, 5, 1.0)
}

/// Map a polar image (radius columns, degree rows) back onto a
/// `width x height` Cartesian grid. Unvisited pixels stay zero.
pub fn polar_to_cartesian<I>(
    polar: &I,
    width: u32,
    height: u32,
) -> Result<ImageBuffer<I::Sample>, RasterError>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    let mut output = ImageBuffer::new(width, height)?;
    let (cx, cy) = ((width / 2) as i64, (height / 2) as i64);
    let steps = polar.height().min(ANGLE_STEPS);

    for r in 0..polar.width() {
        for theta in 0..steps {
            if let Some((x, y)) = polar_point(cx, cy, r, theta, width, height) {
                output.set(x, y, polar.sample(r, theta));
            }
        }
    }

    Ok(output)
}

fn polar_point(cx: i64, cy: i64, r: u32, theta: u32, width: u32, height: u32) -> Option<(u32, u32)> {
    let radians = (theta as f64).to_radians();
    // truncation toward zero, matching integer pixel addressing
    let x = cx + (r as f64 * radians.cos()) as i64;
    let y = cy + (r as f64 * radians.sin()) as i64;
    if (0..width as i64).contains(&x) && (0..height as i64).contains(&y) {
        Some((x as u32, y as u32))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_dimensions() {
        let image = ImageBuffer::<u8>::new(40, 30).unwrap();
        let polar = cartesian_to_polar(&image).unwrap();
        assert_eq!(polar.width(), 15);
        assert_eq!(polar.height(), ANGLE_STEPS);
    }

    #[test]
    fn test_flat_disc_survives_round_trip_at_centre() {
        let image = ImageBuffer::from_vec(32, 32, vec![120u8; 32 * 32]).unwrap();
        let polar = cartesian_to_polar(&image).unwrap();
        assert!(polar.as_slice().iter().all(|&v| v == 120));

        let back = polar_to_cartesian(&polar, 32, 32).unwrap();
        assert_eq!(back.get(16, 16), 120);
        assert_eq!(back.get(20, 16), 120);
        // corners lie outside the inscribed circle
        assert_eq!(back.get(0, 0), 0);
    }

    #[test]
    fn test_too_small_image_has_no_radius() {
        let image = ImageBuffer::<u8>::new(1, 5).unwrap();
        assert!(matches!(
            cartesian_to_polar(&image),
            Err(RasterError::InvalidDimensions { width: 0, .. })
        ));
    }
}
