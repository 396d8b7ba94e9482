//! Error type for raster operations
//!
//! [`RasterError`] covers buffer construction, bounds-checked access,
//! filter parameter validation and run-length file persistence.

use std::fmt;
use std::io;

/// Error type for raster operations.
#[derive(Debug)]
pub enum RasterError {
    /// Width or height is zero, or `width * height` overflows
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
    /// A pixel buffer does not hold exactly `width * height` samples
    BufferSizeMismatch {
        /// Number of samples required by the dimensions
        expected: usize,
        /// Number of samples supplied
        actual: usize,
    },
    /// Pixel coordinates outside the image
    OutOfBounds {
        /// Column requested
        x: u32,
        /// Row requested
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
    /// Convolution kernel is not square with an odd side length
    InvalidKernel(String),
    /// Adaptive threshold block size must be at least 1
    InvalidBlockSize,
    /// Reading or writing a run-length file failed
    Io(io::Error),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {}x{}", width, height)
            }
            RasterError::BufferSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer size mismatch: expected {} samples, got {}",
                    expected, actual
                )
            }
            RasterError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "pixel ({}, {}) out of bounds for {}x{} image",
                    x, y, width, height
                )
            }
            RasterError::InvalidKernel(reason) => write!(f, "invalid kernel: {}", reason),
            RasterError::InvalidBlockSize => write!(f, "block size must be at least 1"),
            RasterError::Io(err) => write!(f, "run-length file error: {}", err),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RasterError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RasterError {
    fn from(err: io::Error) -> Self {
        RasterError::Io(err)
    }
}
