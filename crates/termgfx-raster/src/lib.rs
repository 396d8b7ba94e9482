//! termgfx-raster: image buffers and simple raster filters
//!
//! This crate holds the pixel-level building blocks shared by the termgfx
//! renderer and the utilities around it:
//!
//! - [`Image`]: the read-only capability (`width`, `height`, `sample`)
//!   every image source implements, owned or lazy.
//! - [`ImageBuffer`]: the owned, row-major, zero-initialised pixel buffer.
//! - [`filter`]: stateless filters (Gaussian blur, arbitrary convolution
//!   with border padding, Otsu binarisation, polar resampling, range
//!   stretching).
//! - [`rle`]: a whole-image run-length codec with file persistence.
//!
//! ```
//! use termgfx_raster::filter::gaussian_blur;
//! use termgfx_raster::{Image, ImageBuffer};
//!
//! let mut image = ImageBuffer::<u8>::new(8, 8).unwrap();
//! image.set(4, 4, 255);
//!
//! let blurred = gaussian_blur(&image, 3, 1.0).unwrap();
//! assert!(blurred.sample(4, 4) < 255);
//! assert!(blurred.sample(3, 4) > 0);
//! ```

pub mod error;
pub mod filter;
pub mod image;
pub mod rle;

pub use error::RasterError;
pub use image::{Image, ImageBuffer, Scalar};
pub use rle::RunLength;
