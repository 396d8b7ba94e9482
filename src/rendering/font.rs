//! Fixed-size bitmap font for plot labels.
//!
//! Glyphs are stored as a flat bit raster: glyph `g` occupies bits
//! `w * h * g .. w * h * (g + 1)`, row-major, least significant bit
//! first. Only printable ASCII is covered; every other character renders
//! as the blank glyph.

use termgfx_raster::ImageBuffer;

use crate::error::{GraphicsError, Result};

const FIRST_PRINTABLE: char = ' ';
const LAST_PRINTABLE: char = '~';

/// An immutable glyph atlas with a fixed cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    width: u32,
    height: u32,
    bits: &'static [u8],
}

impl BitmapFont {
    /// GNU Unifont, 8x16 pixel cells.
    pub const fn unifont() -> Self {
        Self {
            width: 8,
            height: 16,
            bits: &UNIFONT_8X16,
        }
    }

    /// Look up a built-in font by cell height.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidArgument`] for sizes without a built-in font.
    pub fn for_size(size: u32) -> Result<Self> {
        match size {
            16 => Ok(Self::unifont()),
            other => Err(GraphicsError::InvalidArgument(format!(
                "font size {} not supported",
                other
            ))),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel width of `text` set in this font.
    pub fn text_width(&self, text: &str) -> u32 {
        self.width * text.chars().count() as u32
    }

    /// Glyph index for `c`: printable ASCII maps to `c - ' '`, anything
    /// else to the blank glyph 0.
    pub fn glyph_index(c: char) -> usize {
        if (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&c) {
            c as usize - FIRST_PRINTABLE as usize
        } else {
            0
        }
    }

    /// Whether pixel `(x, y)` of `glyph` is set. Coordinates outside the
    /// cell and glyphs past the end of the atlas read as unset.
    pub fn get(&self, glyph: usize, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let offset = self.width as usize * (y as usize + self.height as usize * glyph) + x as usize;
        self.bits
            .get(offset / 8)
            .is_some_and(|byte| byte & (1 << (offset % 8)) != 0)
    }

    /// Draw `c` with its top-left corner at `(x, y)`, setting lit pixels to
    /// `colour`. Pixels falling outside `canvas` are skipped.
    pub fn render<T: Copy>(&self, canvas: &mut ImageBuffer<T>, c: char, x: i32, y: i32, colour: T) {
        let glyph = Self::glyph_index(c);
        // i64 so cells near the ends of the i32 range clip instead of overflowing
        for j in 0..self.height {
            let py = y as i64 + j as i64;
            if py < 0 || py >= canvas.height() as i64 {
                continue;
            }
            for i in 0..self.width {
                let px = x as i64 + i as i64;
                if px < 0 || px >= canvas.width() as i64 {
                    continue;
                }
                if self.get(glyph, i, j) {
                    canvas.set(px as u32, py as u32, colour);
                }
            }
        }
    }

    /// Draw a string left to right starting at `(x, y)`.
    pub fn render_str<T: Copy>(
        &self,
        canvas: &mut ImageBuffer<T>,
        text: &str,
        x: i32,
        y: i32,
        colour: T,
    ) {
        for (n, c) in text.chars().enumerate() {
            let cell_x = x as i64 + n as i64 * self.width as i64;
            // everything further right is off canvas too
            let Ok(cell_x) = i32::try_from(cell_x) else {
                break;
            };
            self.render(canvas, c, cell_x, y, colour);
        }
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::unifont()
    }
}

/// Unifont glyphs for `' '..='~'`, one byte per 8-pixel row.
#[rustfmt::skip]
static UNIFONT_8X16: [u8; 95 * 16] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // ' '
    0, 0, 0, 8, 8, 8, 8, 8, 8, 8, 0, 8, 8, 0, 0, 0, // '!'
    0, 34, 34, 34, 34, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // '"'
    0, 0, 0, 36, 36, 36, 63, 18, 18, 63, 9, 9, 9, 0, 0, 0, // '#'
    0, 0, 0, 8, 62, 73, 9, 14, 56, 72, 73, 62, 8, 0, 0, 0, // '$'
    0, 0, 0, 70, 41, 41, 22, 8, 8, 52, 74, 74, 49, 0, 0, 0, // '%'
    0, 0, 0, 28, 34, 34, 20, 12, 74, 81, 33, 49, 78, 0, 0, 0, // '&'
    0, 12, 8, 8, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // '\''
    0, 0, 16, 8, 8, 4, 4, 4, 4, 4, 4, 8, 8, 16, 0, 0, // '('
    0, 0, 2, 4, 4, 8, 8, 8, 8, 8, 8, 4, 4, 2, 0, 0, // ')'
    0, 0, 0, 0, 0, 8, 73, 42, 28, 42, 73, 8, 0, 0, 0, 0, // '*'
    0, 0, 0, 0, 0, 8, 8, 8, 127, 8, 8, 8, 0, 0, 0, 0, // '+'
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 12, 8, 8, 4, 0, // ','
    0, 0, 0, 0, 0, 0, 0, 0, 30, 0, 0, 0, 0, 0, 0, 0, // '-'
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 12, 12, 0, 0, 0, // '.'
    0, 0, 0, 32, 32, 16, 8, 8, 4, 4, 2, 1, 1, 0, 0, 0, // '/'
    0, 0, 0, 12, 18, 33, 49, 41, 37, 35, 33, 18, 12, 0, 0, 0, // '0'
    0, 0, 0, 8, 12, 10, 8, 8, 8, 8, 8, 8, 62, 0, 0, 0, // '1'
    0, 0, 0, 30, 33, 33, 32, 24, 4, 2, 1, 1, 63, 0, 0, 0, // '2'
    0, 0, 0, 30, 33, 33, 32, 28, 32, 32, 33, 33, 30, 0, 0, 0, // '3'
    0, 0, 0, 16, 24, 20, 18, 17, 17, 63, 16, 16, 16, 0, 0, 0, // '4'
    0, 0, 0, 63, 1, 1, 1, 31, 32, 32, 32, 33, 30, 0, 0, 0, // '5'
    0, 0, 0, 28, 2, 1, 1, 31, 33, 33, 33, 33, 30, 0, 0, 0, // '6'
    0, 0, 0, 63, 32, 32, 16, 16, 16, 8, 8, 8, 8, 0, 0, 0, // '7'
    0, 0, 0, 30, 33, 33, 33, 30, 33, 33, 33, 33, 30, 0, 0, 0, // '8'
    0, 0, 0, 30, 33, 33, 33, 62, 32, 32, 32, 16, 14, 0, 0, 0, // '9'
    0, 0, 0, 0, 0, 12, 12, 0, 0, 0, 12, 12, 0, 0, 0, 0, // ':'
    0, 0, 0, 0, 0, 12, 12, 0, 0, 0, 12, 8, 8, 4, 0, 0, // ';'
    0, 0, 0, 0, 32, 16, 8, 4, 2, 4, 8, 16, 32, 0, 0, 0, // '<'
    0, 0, 0, 0, 0, 0, 63, 0, 0, 0, 63, 0, 0, 0, 0, 0, // '='
    0, 0, 0, 0, 1, 2, 4, 8, 16, 8, 4, 2, 1, 0, 0, 0, // '>'
    0, 0, 0, 30, 33, 33, 32, 16, 8, 8, 0, 8, 8, 0, 0, 0, // '?'
    0, 0, 0, 28, 34, 41, 53, 37, 37, 37, 57, 2, 60, 0, 0, 0, // '@'
    0, 0, 0, 12, 18, 18, 33, 33, 63, 33, 33, 33, 33, 0, 0, 0, // 'A'
    0, 0, 0, 31, 33, 33, 33, 31, 33, 33, 33, 33, 31, 0, 0, 0, // 'B'
    0, 0, 0, 30, 33, 33, 1, 1, 1, 1, 33, 33, 30, 0, 0, 0, // 'C'
    0, 0, 0, 15, 17, 33, 33, 33, 33, 33, 33, 17, 15, 0, 0, 0, // 'D'
    0, 0, 0, 63, 1, 1, 1, 31, 1, 1, 1, 1, 63, 0, 0, 0, // 'E'
    0, 0, 0, 63, 1, 1, 1, 31, 1, 1, 1, 1, 1, 0, 0, 0, // 'F'
    0, 0, 0, 30, 33, 33, 1, 1, 57, 33, 33, 49, 46, 0, 0, 0, // 'G'
    0, 0, 0, 33, 33, 33, 33, 63, 33, 33, 33, 33, 33, 0, 0, 0, // 'H'
    0, 0, 0, 62, 8, 8, 8, 8, 8, 8, 8, 8, 62, 0, 0, 0, // 'I'
    0, 0, 0, 124, 16, 16, 16, 16, 16, 16, 17, 17, 14, 0, 0, 0, // 'J'
    0, 0, 0, 33, 17, 9, 5, 3, 3, 5, 9, 17, 33, 0, 0, 0, // 'K'
    0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 63, 0, 0, 0, // 'L'
    0, 0, 0, 33, 33, 51, 51, 45, 45, 33, 33, 33, 33, 0, 0, 0, // 'M'
    0, 0, 0, 33, 35, 35, 37, 37, 41, 41, 49, 49, 33, 0, 0, 0, // 'N'
    0, 0, 0, 30, 33, 33, 33, 33, 33, 33, 33, 33, 30, 0, 0, 0, // 'O'
    0, 0, 0, 31, 33, 33, 33, 31, 1, 1, 1, 1, 1, 0, 0, 0, // 'P'
    0, 0, 0, 30, 33, 33, 33, 33, 33, 33, 45, 51, 30, 96, 0, 0, // 'Q'
    0, 0, 0, 31, 33, 33, 33, 31, 9, 17, 17, 33, 33, 0, 0, 0, // 'R'
    0, 0, 0, 30, 33, 33, 1, 6, 24, 32, 33, 33, 30, 0, 0, 0, // 'S'
    0, 0, 0, 127, 8, 8, 8, 8, 8, 8, 8, 8, 8, 0, 0, 0, // 'T'
    0, 0, 0, 33, 33, 33, 33, 33, 33, 33, 33, 33, 30, 0, 0, 0, // 'U'
    0, 0, 0, 65, 65, 65, 34, 34, 34, 20, 20, 8, 8, 0, 0, 0, // 'V'
    0, 0, 0, 33, 33, 33, 33, 45, 45, 51, 51, 33, 33, 0, 0, 0, // 'W'
    0, 0, 0, 33, 33, 18, 18, 12, 12, 18, 18, 33, 33, 0, 0, 0, // 'X'
    0, 0, 0, 65, 65, 34, 34, 20, 8, 8, 8, 8, 8, 0, 0, 0, // 'Y'
    0, 0, 0, 63, 32, 32, 16, 8, 4, 2, 1, 1, 63, 0, 0, 0, // 'Z'
    0, 0, 56, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 56, 0, 0, // '['
    0, 0, 0, 1, 1, 2, 4, 4, 8, 8, 16, 32, 32, 0, 0, 0, // '\\'
    0, 0, 7, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 7, 0, 0, // ']'
    0, 12, 18, 33, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // '^'
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 127, 0, 0, // '_'
    0, 8, 4, 4, 12, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // '`'
    0, 0, 0, 0, 0, 30, 33, 32, 62, 33, 33, 49, 46, 0, 0, 0, // 'a'
    0, 0, 1, 1, 1, 29, 35, 33, 33, 33, 33, 35, 29, 0, 0, 0, // 'b'
    0, 0, 0, 0, 0, 30, 33, 1, 1, 1, 1, 33, 30, 0, 0, 0, // 'c'
    0, 0, 32, 32, 32, 46, 49, 33, 33, 33, 33, 49, 46, 0, 0, 0, // 'd'
    0, 0, 0, 0, 0, 30, 33, 33, 63, 1, 1, 33, 30, 0, 0, 0, // 'e'
    0, 0, 24, 4, 4, 4, 31, 4, 4, 4, 4, 4, 4, 0, 0, 0, // 'f'
    0, 0, 0, 0, 32, 46, 17, 17, 17, 14, 2, 30, 33, 33, 30, 0, // 'g'
    0, 0, 1, 1, 1, 29, 35, 33, 33, 33, 33, 33, 33, 0, 0, 0, // 'h'
    0, 0, 8, 8, 0, 12, 8, 8, 8, 8, 8, 8, 62, 0, 0, 0, // 'i'
    0, 0, 16, 16, 0, 24, 16, 16, 16, 16, 16, 16, 16, 9, 6, 0, // 'j'
    0, 0, 1, 1, 1, 17, 9, 5, 3, 5, 9, 17, 33, 0, 0, 0, // 'k'
    0, 0, 12, 8, 8, 8, 8, 8, 8, 8, 8, 8, 62, 0, 0, 0, // 'l'
    0, 0, 0, 0, 0, 55, 73, 73, 73, 73, 73, 73, 73, 0, 0, 0, // 'm'
    0, 0, 0, 0, 0, 29, 35, 33, 33, 33, 33, 33, 33, 0, 0, 0, // 'n'
    0, 0, 0, 0, 0, 30, 33, 33, 33, 33, 33, 33, 30, 0, 0, 0, // 'o'
    0, 0, 0, 0, 0, 29, 35, 33, 33, 33, 33, 35, 29, 1, 1, 0, // 'p'
    0, 0, 0, 0, 0, 46, 49, 33, 33, 33, 33, 49, 46, 32, 32, 0, // 'q'
    0, 0, 0, 0, 0, 29, 35, 33, 1, 1, 1, 1, 1, 0, 0, 0, // 'r'
    0, 0, 0, 0, 0, 30, 33, 1, 6, 24, 32, 33, 30, 0, 0, 0, // 's'
    0, 0, 0, 4, 4, 4, 31, 4, 4, 4, 4, 4, 24, 0, 0, 0, // 't'
    0, 0, 0, 0, 0, 33, 33, 33, 33, 33, 33, 49, 46, 0, 0, 0, // 'u'
    0, 0, 0, 0, 0, 33, 33, 33, 18, 18, 18, 12, 12, 0, 0, 0, // 'v'
    0, 0, 0, 0, 0, 65, 73, 73, 73, 73, 73, 73, 54, 0, 0, 0, // 'w'
    0, 0, 0, 0, 0, 33, 33, 18, 12, 12, 18, 33, 33, 0, 0, 0, // 'x'
    0, 0, 0, 0, 0, 33, 33, 33, 33, 33, 50, 44, 32, 32, 30, 0, // 'y'
    0, 0, 0, 0, 0, 63, 32, 16, 8, 4, 2, 1, 63, 0, 0, 0, // 'z'
    0, 0, 24, 4, 4, 8, 8, 4, 2, 4, 8, 8, 4, 4, 24, 0, // '{'
    0, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 8, 0, // '|'
    0, 0, 6, 8, 8, 4, 4, 8, 16, 8, 4, 4, 8, 8, 6, 0, // '}'
    0, 0, 70, 73, 49, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(canvas: &ImageBuffer<u8>) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.get(x, y) != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_unifont_cell_size() {
        let font = BitmapFont::unifont();
        assert_eq!((font.width(), font.height()), (8, 16));
        assert_eq!(font.text_width("abc"), 24);
        assert_eq!(BitmapFont::for_size(16).unwrap(), font);
    }

    #[test]
    fn test_unsupported_size() {
        assert!(matches!(
            BitmapFont::for_size(12),
            Err(GraphicsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_glyph_index_table() {
        assert_eq!(BitmapFont::glyph_index(' '), 0);
        assert_eq!(BitmapFont::glyph_index('!'), 1);
        assert_eq!(BitmapFont::glyph_index('A'), 33);
        assert_eq!(BitmapFont::glyph_index('~'), 94);
        assert_eq!(BitmapFont::glyph_index('\n'), 0);
        assert_eq!(BitmapFont::glyph_index('é'), 0);
    }

    #[test]
    fn test_exclamation_mark_bits() {
        let font = BitmapFont::unifont();
        let glyph = BitmapFont::glyph_index('!');
        // column 3, rows 3-9 and 11-12
        let column: Vec<bool> = (0..16).map(|y| font.get(glyph, 3, y)).collect();
        let expected: Vec<bool> = (0..16)
            .map(|y| (3..=9).contains(&y) || (11..=12).contains(&y))
            .collect();
        assert_eq!(column, expected);
        assert!(!font.get(glyph, 2, 5));
        assert!(!font.get(glyph, 8, 5));
    }

    #[test]
    fn test_space_is_blank() {
        let font = BitmapFont::unifont();
        let mut canvas = ImageBuffer::<u8>::new(8, 16).unwrap();
        font.render(&mut canvas, ' ', 0, 0, 1);
        font.render(&mut canvas, '\t', 0, 0, 1);
        assert!(lit(&canvas).is_empty());
    }

    #[test]
    fn test_render_places_glyph() {
        let font = BitmapFont::unifont();
        let mut canvas = ImageBuffer::<u8>::new(20, 20).unwrap();
        font.render(&mut canvas, '!', 5, 2, 3);
        let pixels = lit(&canvas);
        assert_eq!(pixels.len(), 9);
        assert!(pixels.iter().all(|&(x, _)| x == 8));
        assert_eq!(pixels.first(), Some(&(8, 5)));
        assert_eq!(canvas.get(8, 5), 3);
    }

    #[test]
    fn test_render_clips_every_side() {
        let font = BitmapFont::unifont();
        let mut canvas = ImageBuffer::<u8>::new(4, 4).unwrap();
        font.render(&mut canvas, 'W', -20, -20, 1);
        font.render(&mut canvas, 'W', 100, 100, 1);
        font.render(&mut canvas, '!', 0, -4, 1);
        font.render(&mut canvas, '!', -3, 0, 1);
        assert_eq!(lit(&canvas), vec![(3, 0), (3, 1), (3, 2), (0, 3), (3, 3)]);
    }

    #[test]
    fn test_render_str_advances_by_cell_width() {
        let font = BitmapFont::unifont();
        let mut canvas = ImageBuffer::<u8>::new(16, 16).unwrap();
        font.render_str(&mut canvas, "!!", 0, 0, 1);
        assert_eq!(canvas.get(3, 5), 1);
        assert_eq!(canvas.get(11, 5), 1);
        assert_eq!(canvas.get(7, 5), 0);
    }

    #[test]
    fn test_render_near_coordinate_limits() {
        let font = BitmapFont::unifont();
        let mut canvas = ImageBuffer::<u8>::new(16, 16).unwrap();
        font.render(&mut canvas, 'W', i32::MAX - 2, 0, 1);
        font.render(&mut canvas, 'W', 0, i32::MAX - 2, 1);
        font.render(&mut canvas, 'W', i32::MIN, i32::MIN, 1);
        font.render_str(&mut canvas, "abc", i32::MAX - 2, 0, 1);
        assert!(lit(&canvas).is_empty());
    }
}
