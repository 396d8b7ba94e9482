//! Indexed colour palettes on the sixel 0-100 intensity scale.

use serde::Deserialize;

use crate::error::{GraphicsError, Result};

/// Largest number of entries a sixel palette may carry.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Highest channel intensity on the sixel colour scale.
pub const MAX_INTENSITY: u8 = 100;

/// One palette entry, each channel in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Swap foreground/background polarity: every channel becomes `100 - c`.
    pub fn inverted(self) -> Self {
        Self {
            r: MAX_INTENSITY - self.r,
            g: MAX_INTENSITY - self.g,
            b: MAX_INTENSITY - self.b,
        }
    }
}

/// An ordered list of colours addressed by palette index.
///
/// # Example
///
/// ```
/// use termgfx::{PaletteMap, Rgb};
///
/// let palette = PaletteMap::new(vec![Rgb::new(0, 0, 0), Rgb::new(100, 0, 0)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.get(1), Some(Rgb::new(100, 0, 0)));
///
/// let ramp = termgfx::gray(101).unwrap();
/// assert_eq!(ramp.get(50), Some(Rgb::new(50, 50, 50)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteMap {
    entries: Vec<Rgb>,
}

impl PaletteMap {
    /// # Errors
    ///
    /// [`GraphicsError::InvalidArgument`] if the list is empty, longer than
    /// [`MAX_PALETTE_SIZE`], or any channel exceeds [`MAX_INTENSITY`].
    pub fn new(entries: Vec<Rgb>) -> Result<Self> {
        check_size(entries.len())?;
        if let Some((index, _)) = entries.iter().enumerate().find(|(_, c)| {
            c.r > MAX_INTENSITY || c.g > MAX_INTENSITY || c.b > MAX_INTENSITY
        }) {
            return Err(GraphicsError::InvalidArgument(format!(
                "palette entry {} has a channel above {}",
                index, MAX_INTENSITY
            )));
        }
        Ok(Self { entries })
    }

    /// The eight-colour plot palette: black, white, yellow, magenta,
    /// cyan, red, green, blue.
    pub fn plot_default() -> Self {
        Self {
            entries: vec![
                Rgb::new(0, 0, 0),
                Rgb::new(100, 100, 100),
                Rgb::new(100, 100, 20),
                Rgb::new(100, 20, 100),
                Rgb::new(20, 100, 100),
                Rgb::new(100, 20, 20),
                Rgb::new(20, 100, 20),
                Rgb::new(20, 20, 100),
            ],
        }
    }

    /// The same palette with every entry inverted.
    pub fn inverted(&self) -> Self {
        Self {
            entries: self.entries.iter().map(|c| c.inverted()).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.entries.get(index).copied()
    }

    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }
}

impl Default for PaletteMap {
    /// 101-level greyscale, one level per intensity step.
    fn default() -> Self {
        Self {
            entries: (0..=MAX_INTENSITY).map(|v| Rgb::new(v, v, v)).collect(),
        }
    }
}

/// Named colour ramps for scalar images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColourMap {
    #[default]
    Gray,
    Hot,
    Jet,
}

impl ColourMap {
    pub fn build(self, size: usize) -> Result<PaletteMap> {
        match self {
            ColourMap::Gray => gray(size),
            ColourMap::Hot => hot(size),
            ColourMap::Jet => jet(size),
        }
    }
}

/// Linear greyscale ramp from black to white.
pub fn gray(size: usize) -> Result<PaletteMap> {
    ramp(size, |n, _| (n, n, n))
}

/// Black through red and yellow to white.
///
/// Red rises over the first third of the ramp, green over the second,
/// blue over the last.
pub fn hot(size: usize) -> Result<PaletteMap> {
    ramp(size, |n, total| (3.0 * n, 3.0 * n - total, 3.0 * n - 2.0 * total))
}

/// Blue through cyan, yellow and red.
///
/// Each channel is a triangle function of the index, peaking at 3/4,
/// 1/2 and 1/4 of the ramp for red, green and blue respectively.
pub fn jet(size: usize) -> Result<PaletteMap> {
    ramp(size, |n, total| {
        (
            1.5 * total - (4.0 * n - 3.0 * total).abs(),
            1.5 * total - (4.0 * n - 2.0 * total).abs(),
            1.5 * total - (4.0 * n - total).abs(),
        )
    })
}

/// Build a ramp of `size` entries. `channels(n, size)` returns raw channel
/// values on the `0..=size-1` scale; they are rescaled to `0..=100`,
/// clamped and rounded.
fn ramp(size: usize, channels: impl Fn(f64, f64) -> (f64, f64, f64)) -> Result<PaletteMap> {
    check_size(size)?;
    let top = (size - 1).max(1) as f64;
    let scale = |v: f64| -> u8 {
        let scaled = (MAX_INTENSITY as f64 / top) * v;
        scaled.clamp(0.0, MAX_INTENSITY as f64).round() as u8
    };
    let entries = (0..size)
        .map(|n| {
            let (r, g, b) = channels(n as f64, size as f64);
            Rgb::new(scale(r), scale(g), scale(b))
        })
        .collect();
    Ok(PaletteMap { entries })
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_PALETTE_SIZE {
        return Err(GraphicsError::InvalidArgument(format!(
            "palette size {} outside 1..={}",
            size, MAX_PALETTE_SIZE
        )));
    }
    Ok(())
}
