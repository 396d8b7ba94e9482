pub mod config;
pub mod palette;

pub use config::{GraphicsConfig, PlotConfig};
pub use palette::{gray, hot, jet, ColourMap, PaletteMap, Rgb, MAX_INTENSITY, MAX_PALETTE_SIZE};
