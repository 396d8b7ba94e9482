//! Line rasterisation onto the plot canvas.

use termgfx_raster::ImageBuffer;

use super::style::LineStyle;

/// The data area of the canvas, optionally with x and y swapped.
///
/// The data area starts `x_offset` pixels from the left edge and ends
/// `y_offset` pixels above the bottom edge. Transposing lets steep lines
/// be walked along their longer axis without copying the canvas.
pub(crate) struct CanvasView<'a> {
    canvas: &'a mut ImageBuffer<u8>,
    x_offset: u32,
    y_offset: u32,
    transposed: bool,
}

impl<'a> CanvasView<'a> {
    /// Offsets must be smaller than the canvas dimensions.
    pub(crate) fn new(
        canvas: &'a mut ImageBuffer<u8>,
        x_offset: u32,
        y_offset: u32,
        transposed: bool,
    ) -> Self {
        Self {
            canvas,
            x_offset,
            y_offset,
            transposed,
        }
    }

    fn data_width(&self) -> i32 {
        (self.canvas.width() - self.x_offset) as i32
    }

    fn data_height(&self) -> i32 {
        (self.canvas.height() - self.y_offset) as i32
    }

    pub(crate) fn width(&self) -> i32 {
        if self.transposed {
            self.data_height()
        } else {
            self.data_width()
        }
    }

    pub(crate) fn height(&self) -> i32 {
        if self.transposed {
            self.data_width()
        } else {
            self.data_height()
        }
    }

    /// `(x, y)` must lie inside `width() x height()`.
    fn set(&mut self, x: i32, y: i32, colour: u8) {
        let (cx, cy) = if self.transposed { (y, x) } else { (x, y) };
        self.canvas.set(cx as u32 + self.x_offset, cy as u32, colour);
    }
}

/// Draw a line walking the view's x axis from `x0` to `x1`.
///
/// The caller transposes steep lines so that `|x1 - x0| >= |y1 - y0|`.
/// Positions left of the view, past its right edge, or with a row outside
/// the view are skipped.
pub(crate) fn draw_line(
    view: &mut CanvasView<'_>,
    mut x0: f32,
    mut y0: f32,
    mut x1: f32,
    mut y1: f32,
    style: &LineStyle,
) {
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }
    let x_range = x1 - x0;
    let y_range = y1 - y0;

    let start = x0.round().max(0.0) as i32;
    let end = ((x1 + 1.0) as i32).min(view.width());
    for x in start..end {
        if style.skips(x) {
            continue;
        }
        let y = if x_range == 0.0 {
            y0
        } else {
            y0 + y_range * (x as f32 - x0) / x_range
        };
        let y = y.round() as i32;
        if y >= 0 && y < view.height() {
            view.set(x, y, style.colour);
        }
    }
}
