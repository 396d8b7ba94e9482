//! termgfx - images and line plots in the terminal
//!
//! Renders palette-indexed images to terminals that understand DEC sixel
//! graphics (xterm, mlterm, WezTerm, iTerm2, mintty).
//!
//! - [`display`] / [`display_rescaled`] write any [`Image`] to stdout,
//!   optionally through the lazy [`Rescale`], [`Magnify`] and [`Rotate90`]
//!   views.
//! - [`Plot`] rasterises lines, grid and text into a canvas and shows it;
//!   [`plot`] returns a guard that shows it when dropped.
//! - [`pgm`] loads ASCII greyscale images.
//!
//! ```no_run
//! use termgfx::{display_rescaled, gray, ImageBuffer, Magnify};
//!
//! # fn main() -> termgfx::Result<()> {
//! let mut image = ImageBuffer::<f32>::new(64, 32)?;
//! for y in 0..32 {
//!     for x in 0..64 {
//!         image.set(x, y, (x + y) as f32);
//!     }
//! }
//! display_rescaled(&Magnify::new(&image, 4)?, 0.0, 94.0, &gray(101)?)?;
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod error;
pub mod models;
pub mod pgm;
pub mod plot;
pub mod rendering;

pub use display::{display, display_rescaled, display_rescaled_to, display_to, CLEAR, HOME};
pub use error::{Axis, GraphicsError, Result};
pub use models::{gray, hot, jet, ColourMap, GraphicsConfig, PaletteMap, PlotConfig, Rgb};
pub use plot::{plot, plot_with, LineStyle, Plot, PlotOptions, PlotState, ScopedPlot, TextStyle};
pub use rendering::{BitmapFont, Magnify, Rescale, Rotate90, Rotation, SixelEncoder};
pub use termgfx_raster::{Image, ImageBuffer, Scalar};
