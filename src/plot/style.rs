//! Drawing attributes for plot lines and labels.

/// Colour and dash pattern of a line.
///
/// With `dash > 0`, pixels whose position along the line's longer axis
/// satisfies `pos % dash >= dash_fraction * dash` are left out, so each
/// `dash`-pixel period is drawn for its first `dash_fraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub colour: u8,
    pub dash: u32,
    pub dash_fraction: f32,
}

impl LineStyle {
    /// A solid line in palette colour `colour`.
    pub fn solid(colour: u8) -> Self {
        Self {
            colour,
            ..Self::default()
        }
    }

    pub fn dashed(colour: u8, dash: u32, dash_fraction: f32) -> Self {
        Self {
            colour,
            dash,
            dash_fraction,
        }
    }

    pub(crate) fn skips(&self, pos: i32) -> bool {
        self.dash > 0
            && pos.rem_euclid(self.dash as i32) as f32 >= self.dash_fraction * self.dash as f32
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            colour: 2,
            dash: 0,
            dash_fraction: 0.5,
        }
    }
}

/// Placement and colour of a text label.
///
/// `(anchor_x, anchor_y)` is the point of the text's bounding box, in
/// fractions of its width and height, that lands on the data coordinate.
/// `(0.5, 0.5)` centres the text; `(1.0, 0.5)` right-aligns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub colour: u8,
}

impl TextStyle {
    pub fn anchored(anchor_x: f32, anchor_y: f32) -> Self {
        Self {
            anchor_x,
            anchor_y,
            ..Self::default()
        }
    }

    pub fn with_colour(mut self, colour: u8) -> Self {
        self.colour = colour;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            anchor_x: 0.5,
            anchor_y: 0.5,
            colour: 1,
        }
    }
}
