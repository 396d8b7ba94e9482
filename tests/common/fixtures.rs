//! Test fixtures.

use termgfx::{ImageBuffer, PaletteMap, Plot, PlotOptions, Rgb};

/// Black and white.
pub fn two_colour_palette() -> PaletteMap {
    PaletteMap::new(vec![Rgb::new(0, 0, 0), Rgb::new(100, 100, 100)]).unwrap()
}

/// An image with every sample set to `value`.
pub fn filled(width: u32, height: u32, value: u8) -> ImageBuffer<u8> {
    let mut image = ImageBuffer::new(width, height).unwrap();
    image.fill(value);
    image
}

/// A plot without label margins, so data coordinates map onto the whole
/// canvas.
pub fn bare_plot(width: u32, height: u32) -> Plot {
    let options = PlotOptions {
        axis_labels: false,
        ..PlotOptions::default()
    };
    Plot::with_options(width, height, options).unwrap()
}

/// A small ASCII PGM image: a 4x3 ramp with comments.
pub const RAMP_PGM: &str = "\
P2
# 4x3 ramp
4 3
255
0 85 170 255
0 85 170 255 # second row
0 85 170 255
";
