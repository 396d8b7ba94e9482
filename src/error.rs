use std::fmt;

use termgfx_raster::RasterError;
use thiserror::Error;

/// Plot axis, used to report which limit was already fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{axis} limits already set (maybe implicitly by previous calls)")]
    AxisAlreadySet { axis: Axis },

    #[error("Length mismatch: {x} x values but {y} y values")]
    LengthMismatch { x: usize, y: usize },

    #[error("Invalid range: [{min}, {max}] is empty or not finite")]
    InvalidRange { min: f64, max: f64 },

    #[error("Index error: {0}")]
    IndexError(String),

    #[error("Plot already shown; call reset() before drawing again")]
    AlreadyShown,

    #[error("PGM error: {0}")]
    Pgm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphicsError>;

impl From<RasterError> for GraphicsError {
    fn from(e: RasterError) -> Self {
        match e {
            RasterError::OutOfBounds { .. } => GraphicsError::IndexError(e.to_string()),
            RasterError::Io(io) => GraphicsError::Io(io),
            other => GraphicsError::InvalidArgument(other.to_string()),
        }
    }
}
