//! Sixel protocol encoder.
//!
//! Converts an indexed image plus a [`PaletteMap`] into the DEC sixel
//! byte stream understood by sixel-capable terminals (xterm, mlterm,
//! WezTerm, iTerm2, mintty).
//!
//! # Wire format
//!
//! ```text
//! ESC P 9 q                      introducer, 1:1 pixel aspect
//! #<i>;2;<r>;<g>;<b> ...         palette, RGB on a 0-100 scale, no separators
//! #<i><sixels>$#<j><sixels>...-  one band of 6 rows, '$' overlays the next
//! ...                            colour, '-' moves down to the next band
//! ESC \ LF                       terminator
//! ```
//!
//! Within a band each column contributes one sixel character per colour:
//! bit `b` of `ch - 63` is set when row `b` of the band holds that
//! colour. Runs of more than three identical characters are compacted to
//! `!<count><ch>`; shorter runs are written out literally.

use std::io::Write;

use termgfx_raster::Image;

use crate::error::{GraphicsError, Result};
use crate::models::palette::PaletteMap;

/// Device control string introducer for sixel data (aspect ratio 1:1).
pub const SIXEL_START: &str = "\x1bP9q";

/// String terminator closing the sixel data, plus a newline so following
/// text starts below the image.
pub const SIXEL_END: &str = "\x1b\\\n";

/// Rows covered by one sixel band.
pub const BAND_HEIGHT: u32 = 6;

/// Character offset of the empty sixel (`?`).
const SIXEL_BASE: u8 = 63;

/// Longest run written literally; longer runs use `!<count><ch>`.
const MAX_LITERAL_RUN: usize = 3;

/// Encodes indexed images against one palette.
///
/// By default palette index 0 is treated as the terminal background and
/// never painted, so pixels of index 0 show whatever the terminal
/// background is. Use [`SixelEncoder::with_background`] to change or
/// disable this.
///
/// # Example
///
/// ```
/// use termgfx::{ImageBuffer, PaletteMap, Rgb, SixelEncoder};
///
/// let palette = PaletteMap::new(vec![Rgb::new(0, 0, 0), Rgb::new(100, 100, 100)]).unwrap();
/// let mut image = ImageBuffer::<u8>::new(4, 4).unwrap();
/// image.set(2, 1, 1);
///
/// let encoded = SixelEncoder::new(&palette).encode_to_string(&image).unwrap();
/// assert_eq!(encoded, "\x1bP9q#0;2;0;0;0#1;2;100;100;100#1??A?-\x1b\\\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SixelEncoder<'p> {
    palette: &'p PaletteMap,
    background: Option<usize>,
}

impl<'p> SixelEncoder<'p> {
    pub fn new(palette: &'p PaletteMap) -> Self {
        Self {
            palette,
            background: Some(0),
        }
    }

    /// Set the palette index left unpainted, or `None` to paint every index.
    pub fn with_background(mut self, background: Option<usize>) -> Self {
        self.background = background;
        self
    }

    /// Encode `image` and write the complete sequence to `out`, then flush.
    ///
    /// The whole sequence is built and validated before anything is
    /// written, so an out-of-palette index leaves `out` untouched.
    pub fn encode<I, W>(&self, image: &I, out: &mut W) -> Result<()>
    where
        I: Image + ?Sized,
        I::Sample: TryInto<usize>,
        W: Write + ?Sized,
    {
        let encoded = self.encode_to_string(image)?;
        out.write_all(encoded.as_bytes())?;
        out.flush()?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            colours = self.palette.len(),
            bytes = encoded.len(),
            "Wrote sixel image"
        );
        Ok(())
    }

    /// Encode `image` into an in-memory sixel sequence.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::IndexError`] if any sample is not a valid index
    /// into the palette.
    pub fn encode_to_string<I>(&self, image: &I) -> Result<String>
    where
        I: Image + ?Sized,
        I::Sample: TryInto<usize>,
    {
        let width = image.width() as usize;
        let mut out = String::with_capacity(64 + width * image.height() as usize / 2);
        out.push_str(SIXEL_START);
        push_palette(&mut out, self.palette);

        let mut band = Vec::with_capacity(width * BAND_HEIGHT as usize);
        let mut present = vec![false; self.palette.len()];
        let mut y0 = 0;
        while y0 < image.height() {
            let rows = (image.height() - y0).min(BAND_HEIGHT);
            self.read_band(image, y0, rows, &mut band, &mut present)?;
            self.push_band(&mut out, &band, width, &present);
            y0 += rows;
        }

        out.push_str(SIXEL_END);
        Ok(out)
    }

    /// Collect the palette indices of rows `y0..y0 + rows`, column-major
    /// within the band (`band[x * rows + row]`), and mark which indices occur.
    fn read_band<I>(
        &self,
        image: &I,
        y0: u32,
        rows: u32,
        band: &mut Vec<usize>,
        present: &mut [bool],
    ) -> Result<()>
    where
        I: Image + ?Sized,
        I::Sample: TryInto<usize>,
    {
        band.clear();
        present.iter_mut().for_each(|p| *p = false);
        for x in 0..image.width() {
            for y in y0..y0 + rows {
                let index = image
                    .sample(x, y)
                    .try_into()
                    .ok()
                    .filter(|&i| i < present.len())
                    .ok_or_else(|| {
                        GraphicsError::IndexError(format!(
                            "sample at ({}, {}) is not an index into a palette of {} colours",
                            x,
                            y,
                            present.len()
                        ))
                    })?;
                present[index] = true;
                band.push(index);
            }
        }
        Ok(())
    }

    fn push_band(&self, out: &mut String, band: &[usize], width: usize, present: &[bool]) {
        let rows = if width == 0 { 0 } else { band.len() / width };
        let mut first = true;

        for colour in (0..present.len()).filter(|&i| present[i]) {
            if self.background == Some(colour) {
                continue;
            }
            if !first {
                out.push('$');
            }
            first = false;
            out.push('#');
            out.push_str(&colour.to_string());

            let masks = band.chunks(rows).map(|column| {
                column
                    .iter()
                    .enumerate()
                    .filter(|&(_, &index)| index == colour)
                    .fold(0u8, |mask, (row, _)| mask | (1 << row))
            });
            push_run_length(out, masks);
        }
        out.push('-');
    }
}

/// Palette definitions `#<i>;2;<r>;<g>;<b>`, concatenated.
fn push_palette(out: &mut String, palette: &PaletteMap) {
    for (i, c) in palette.entries().iter().enumerate() {
        out.push_str(&format!("#{};2;{};{};{}", i, c.r, c.g, c.b));
    }
}

/// Run-length encode a sequence of 6-bit sixel masks.
fn push_run_length(out: &mut String, masks: impl Iterator<Item = u8>) {
    let mut current: Option<(u8, usize)> = None;
    for mask in masks {
        current = match current {
            Some((value, run)) if value == mask => Some((value, run + 1)),
            Some((value, run)) => {
                push_run(out, value, run);
                Some((mask, 1))
            }
            None => Some((mask, 1)),
        };
    }
    if let Some((value, run)) = current {
        push_run(out, value, run);
    }
}

fn push_run(out: &mut String, mask: u8, run: usize) {
    let ch = char::from(SIXEL_BASE + mask);
    if run <= MAX_LITERAL_RUN {
        out.extend(std::iter::repeat(ch).take(run));
    } else {
        out.push('!');
        out.push_str(&run.to_string());
        out.push(ch);
    }
}
