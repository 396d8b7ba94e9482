pub mod font;
pub mod sixel;
pub mod views;

pub use font::BitmapFont;
pub use sixel::{SixelEncoder, BAND_HEIGHT, SIXEL_END, SIXEL_START};
pub use views::{Magnify, Rescale, Rotate90, Rotation};
