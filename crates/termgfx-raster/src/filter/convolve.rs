//! Square convolution kernels and border padding.

use crate::error::RasterError;
use crate::image::{Image, ImageBuffer, Scalar};

/// How samples outside the image are synthesised during convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Outside samples are zero.
    #[default]
    Zero,
    /// Clamp to the nearest edge sample.
    Replicate,
    /// Mirror the image at its borders (edge sample repeated).
    Reflect,
    /// Wrap around to the opposite edge.
    Circular,
}

/// A square convolution kernel with an odd side length.
///
/// Weights are stored row-major; the centre weight sits at
/// `(size / 2, size / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from rows of weights.
    ///
    /// # Errors
    ///
    /// [`RasterError::InvalidKernel`] unless the rows form a non-empty
    /// square with an odd side length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, RasterError> {
        let size = rows.len();
        if size == 0 || size % 2 == 0 {
            return Err(RasterError::InvalidKernel(format!(
                "side length {} must be odd",
                size
            )));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(RasterError::InvalidKernel(format!(
                "row of length {} in a {}x{} kernel",
                row.len(),
                size,
                size
            )));
        }
        Ok(Self {
            size,
            weights: rows.iter().flatten().copied().collect(),
        })
    }

    /// Normalised 2D Gaussian of the given odd side length.
    pub fn gaussian(size: usize, sigma: f64) -> Result<Self, RasterError> {
        if size % 2 == 0 {
            return Err(RasterError::InvalidKernel(format!(
                "side length {} must be odd",
                size
            )));
        }
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(RasterError::InvalidKernel(format!(
                "sigma {} must be positive",
                sigma
            )));
        }
        let half = (size / 2) as i64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(size * size);
        for y in -half..=half {
            for x in -half..=half {
                let r2 = (x * x + y * y) as f64;
                weights.push((-r2 / two_sigma_sq).exp() / (std::f64::consts::PI * two_sigma_sq));
            }
        }
        let sum: f64 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= sum);
        Ok(Self { size, weights })
    }

    /// Horizontal-gradient Sobel operator.
    pub fn sobel_x() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical-gradient Sobel operator.
    pub fn sobel_y() -> Self {
        Self {
            size: 3,
            weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight at column `kx`, row `ky` of the kernel.
    #[inline]
    pub fn weight(&self, kx: usize, ky: usize) -> f64 {
        self.weights[kx + self.size * ky]
    }
}

/// Convolve `image` with `kernel`, synthesising border samples per `padding`.
///
/// Each output sample is the weighted sum rounded back into the sample
/// type (saturating for integer samples).
pub fn convolve<I>(
    image: &I,
    kernel: &Kernel,
    padding: Padding,
) -> Result<ImageBuffer<I::Sample>, RasterError>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    let (width, height) = (image.width() as i64, image.height() as i64);
    let mut output = ImageBuffer::new(image.width(), image.height())?;
    let half = (kernel.size() / 2) as i64;

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            for ky in -half..=half {
                for kx in -half..=half {
                    let value = padded(image, x + kx, y + ky, width, height, padding);
                    sum += value * kernel.weight((kx + half) as usize, (ky + half) as usize);
                }
            }
            output.set(x as u32, y as u32, I::Sample::from_f64(sum));
        }
    }

    Ok(output)
}

/// Gaussian smoothing with replicated borders.
pub fn gaussian_blur<I>(
    image: &I,
    kernel_size: usize,
    sigma: f64,
) -> Result<ImageBuffer<I::Sample>, RasterError>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    let kernel = Kernel::gaussian(kernel_size, sigma)?;
    convolve(image, &kernel, Padding::Replicate)
}

fn padded<I>(image: &I, x: i64, y: i64, width: i64, height: i64, padding: Padding) -> f64
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    if (0..width).contains(&x) && (0..height).contains(&y) {
        return image.sample(x as u32, y as u32).to_f64();
    }
    let (x, y) = match padding {
        Padding::Zero => return 0.0,
        Padding::Replicate => (x.clamp(0, width - 1), y.clamp(0, height - 1)),
        Padding::Reflect => (reflect(x, width), reflect(y, height)),
        Padding::Circular => (x.rem_euclid(width), y.rem_euclid(height)),
    };
    image.sample(x as u32, y as u32).to_f64()
}

fn reflect(v: i64, len: i64) -> i64 {
    let period = 2 * len;
    let m = v.rem_euclid(period);
    if m >= len {
        period - 1 - m
    } else {
        m
    }
}
