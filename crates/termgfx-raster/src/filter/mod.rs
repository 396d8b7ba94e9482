//! Stateless image-processing filters.
//!
//! Every function here reads any [`Image`](crate::Image) and returns a new
//! [`ImageBuffer`](crate::ImageBuffer); none of them hold state between
//! calls.

mod convolve;
mod normalize;
mod polar;
mod threshold;

pub use convolve::{convolve, gaussian_blur, Kernel, Padding};
pub use normalize::normalize_to_u16;
pub use polar::{cartesian_to_polar, polar_to_cartesian, ANGLE_STEPS};
pub use threshold::{adaptive_threshold, histogram, otsu_threshold, trimmed_histogram, GREY_LEVELS};
