//! Entry points writing images to the terminal.

use std::io::{self, Write};

use termgfx_raster::{Image, Scalar};

use crate::error::Result;
use crate::models::palette::PaletteMap;
use crate::rendering::{Rescale, SixelEncoder};

/// Move the cursor to the top-left corner, for redrawing in place.
pub const HOME: &str = "\x1b[H";

/// Clear the whole screen.
pub const CLEAR: &str = "\x1b[2J";

/// Display an indexed image on stdout.
///
/// Palette index 0 is treated as the terminal background and not painted;
/// see [`SixelEncoder::with_background`].
pub fn display<I>(image: &I, palette: &PaletteMap) -> Result<()>
where
    I: Image + ?Sized,
    I::Sample: TryInto<usize>,
{
    display_to(image, palette, &mut io::stdout().lock())
}

/// Display an indexed image on any writer.
pub fn display_to<I, W>(image: &I, palette: &PaletteMap, out: &mut W) -> Result<()>
where
    I: Image + ?Sized,
    I::Sample: TryInto<usize>,
    W: Write + ?Sized,
{
    SixelEncoder::new(palette).encode(image, out)
}

/// Display a scalar image on stdout, mapping `[min, max]` across `palette`.
///
/// Values at or below `min` take the first palette entry, values at or
/// above `max` the last.
///
/// Like [`display`], this leaves index 0 unpainted so those pixels show the
/// terminal background. For opaque output (dark ramp ends on a light
/// terminal, say) encode a [`Rescale`] view with
/// `SixelEncoder::new(palette).with_background(None)` instead.
pub fn display_rescaled<I>(image: &I, min: f64, max: f64, palette: &PaletteMap) -> Result<()>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
{
    display_rescaled_to(image, min, max, palette, &mut io::stdout().lock())
}

pub fn display_rescaled_to<I, W>(
    image: &I,
    min: f64,
    max: f64,
    palette: &PaletteMap,
    out: &mut W,
) -> Result<()>
where
    I: Image + ?Sized,
    I::Sample: Scalar,
    W: Write + ?Sized,
{
    let view = Rescale::new(image, min, max, palette.len())?;
    display_to(&view, palette, out)
}
