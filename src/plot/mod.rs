//! Line plots rendered into a palette-indexed canvas.
//!
//! A [`Plot`] owns an `ImageBuffer<u8>` of palette indices. Lines and
//! text are rasterised into it as they are added, in data coordinates
//! mapped through the x and y limits. [`Plot::show`] draws the grid and
//! hands the canvas to the sixel encoder.
//!
//! Axis limits are write-once: set them explicitly before drawing, or
//! let the first line infer them from its data.
//!
//! ```no_run
//! use termgfx::{plot, LineStyle};
//!
//! # fn main() -> termgfx::Result<()> {
//! let ys: Vec<f32> = (0..50).map(|i| (i as f32 / 5.0).sin()).collect();
//! plot(512, 256)?
//!     .set_ylim(-1.5, 1.5)?
//!     .add_series(&ys, LineStyle::solid(3))?;
//! // shown when the temporary guard is dropped
//! # Ok(())
//! # }
//! ```

mod axis;
mod raster;
mod scoped;
mod style;

use std::io::{self, Write};

use termgfx_raster::ImageBuffer;

use crate::error::{Axis, GraphicsError, Result};
use crate::models::palette::PaletteMap;
use crate::rendering::{BitmapFont, SixelEncoder};

use self::raster::CanvasView;

pub use self::axis::Limits;
pub use self::scoped::{plot, plot_with, ScopedPlot};
pub use self::style::{LineStyle, TextStyle};

/// Left margin, in glyph widths, reserved for y-axis labels.
const MARGIN_GLYPHS_X: u32 = 10;

/// Bottom margin, in glyph heights, reserved for x-axis labels.
const MARGIN_GLYPHS_Y: u32 = 2;

/// Palette index used for grid lines and their labels.
const GRID_COLOUR: u8 = 1;

const GRID_DASH: u32 = 10;
const GRID_DASH_FRACTION: f32 = 0.1;

/// Construction options for a [`Plot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotOptions {
    /// Invert the palette for terminals with a light background.
    pub white_background: bool,
    /// Fraction of the data span added on each side of inferred limits.
    pub expand_by: f32,
    /// Reserve margins for grid labels. Without them the whole canvas is
    /// data area and no labels are drawn.
    pub axis_labels: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            white_background: false,
            expand_by: 0.1,
            axis_labels: true,
        }
    }
}

/// Lifecycle of a [`Plot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotState {
    /// Nothing configured or drawn since construction or [`Plot::reset`].
    Fresh,
    /// Limits, grid or content have been added.
    Configuring,
    /// The grid has been drawn and the canvas encoded; the canvas is fixed
    /// until [`Plot::reset`].
    Finalized,
}

#[derive(Debug, Clone)]
pub struct Plot {
    canvas: ImageBuffer<u8>,
    palette: PaletteMap,
    font: BitmapFont,
    expand_by: f32,
    margin_x: u32,
    margin_y: u32,
    x_limits: Option<Limits>,
    y_limits: Option<Limits>,
    x_grid: Option<f32>,
    y_grid: Option<f32>,
    state: PlotState,
}

impl Plot {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_options(width, height, PlotOptions::default())
    }

    /// # Errors
    ///
    /// [`GraphicsError::InvalidArgument`] if the canvas is not larger than
    /// its label margins (80x32 pixels with labels, 0x0 without).
    pub fn with_options(width: u32, height: u32, options: PlotOptions) -> Result<Self> {
        let font = BitmapFont::unifont();
        let (margin_x, margin_y) = if options.axis_labels {
            (MARGIN_GLYPHS_X * font.width(), MARGIN_GLYPHS_Y * font.height())
        } else {
            (0, 0)
        };
        if width <= margin_x || height <= margin_y {
            return Err(GraphicsError::InvalidArgument(format!(
                "plot of {}x{} pixels leaves no data area inside {}x{} margins",
                width, height, margin_x, margin_y
            )));
        }

        let palette = if options.white_background {
            PaletteMap::plot_default().inverted()
        } else {
            PaletteMap::plot_default()
        };

        Ok(Self {
            canvas: ImageBuffer::new(width, height)?,
            palette,
            font,
            expand_by: options.expand_by,
            margin_x,
            margin_y,
            x_limits: None,
            y_limits: None,
            x_grid: None,
            y_grid: None,
            state: PlotState::Fresh,
        })
    }

    /// Clear the canvas, limits and grid, and return to [`PlotState::Fresh`].
    pub fn reset(&mut self) -> &mut Self {
        self.canvas.clear();
        self.x_limits = None;
        self.y_limits = None;
        self.x_grid = None;
        self.y_grid = None;
        self.state = PlotState::Fresh;
        self
    }

    /// Replace the palette used when the plot is shown.
    pub fn set_palette(&mut self, palette: PaletteMap) -> &mut Self {
        self.palette = palette;
        self
    }

    pub fn set_xlim(&mut self, min: f32, max: f32) -> Result<&mut Self> {
        self.set_xlim_expanded(min, max, 0.0)
    }

    pub fn set_ylim(&mut self, min: f32, max: f32) -> Result<&mut Self> {
        self.set_ylim_expanded(min, max, 0.0)
    }

    /// Set the x range to `[min, max]` widened by `frac * (max - min)` on
    /// each side.
    ///
    /// # Errors
    ///
    /// - [`GraphicsError::AxisAlreadySet`] if the x limits were already
    ///   set, explicitly or by an earlier line.
    /// - [`GraphicsError::InvalidRange`] if the range is empty or not finite.
    pub fn set_xlim_expanded(&mut self, min: f32, max: f32, frac: f32) -> Result<&mut Self> {
        if self.x_limits.is_some() {
            return Err(GraphicsError::AxisAlreadySet { axis: Axis::X });
        }
        self.check_open()?;
        let limits = axis::checked(axis::expand(min, max, frac))?;
        self.commit_limits(Some(limits), None);
        Ok(self)
    }

    pub fn set_ylim_expanded(&mut self, min: f32, max: f32, frac: f32) -> Result<&mut Self> {
        if self.y_limits.is_some() {
            return Err(GraphicsError::AxisAlreadySet { axis: Axis::Y });
        }
        self.check_open()?;
        let limits = axis::checked(axis::expand(min, max, frac))?;
        self.commit_limits(None, Some(limits));
        Ok(self)
    }

    /// Set the grid spacing on both axes. Grid lines sit on multiples of
    /// the interval, so one always passes through zero when it is in range.
    pub fn set_grid(&mut self, x_interval: f32, y_interval: f32) -> Result<&mut Self> {
        self.check_open()?;
        for interval in [x_interval, y_interval] {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(GraphicsError::InvalidArgument(format!(
                    "grid interval {} must be positive and finite",
                    interval
                )));
            }
        }
        self.x_grid = Some(x_interval);
        self.y_grid = Some(y_interval);
        self.state = PlotState::Configuring;
        Ok(self)
    }

    /// Draw a segment from `(x0, y0)` to `(x1, y1)`.
    ///
    /// Unset limits are inferred from the two endpoints.
    pub fn add_line(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        style: LineStyle,
    ) -> Result<&mut Self> {
        self.check_open()?;
        let x_limits = self.infer_unset(self.x_limits, [x0, x1], self.expand_by)?;
        let y_limits = self.infer_unset(self.y_limits, [y0, y1], self.expand_by)?;
        self.commit_limits(x_limits, y_limits);

        self.draw_segment(x0, y0, x1, y1, &style);
        self.state = PlotState::Configuring;
        Ok(self)
    }

    /// Plot `ys[i]` against `x = i`.
    ///
    /// Unset x limits become `(0, len - 1)` without expansion; unset y
    /// limits cover the data plus the configured expansion.
    pub fn add_series(&mut self, ys: &[f32], style: LineStyle) -> Result<&mut Self> {
        self.check_open()?;
        if ys.is_empty() {
            return Err(GraphicsError::InvalidArgument(
                "cannot plot an empty data series".to_string(),
            ));
        }
        let last = (ys.len() - 1) as f32;
        let x_limits = self.infer_unset(self.x_limits, [0.0, last], 0.0)?;
        let y_limits = self.infer_unset(self.y_limits, ys.iter().copied(), self.expand_by)?;
        self.commit_limits(x_limits, y_limits);

        for (n, pair) in ys.windows(2).enumerate() {
            self.draw_segment(n as f32, pair[0], (n + 1) as f32, pair[1], &style);
        }
        self.state = PlotState::Configuring;
        Ok(self)
    }

    /// Plot the polyline through `(xs[i], ys[i])`.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::LengthMismatch`] if the slices differ in length;
    /// nothing is drawn and no limits are set.
    pub fn add_series_xy(&mut self, xs: &[f32], ys: &[f32], style: LineStyle) -> Result<&mut Self> {
        if xs.len() != ys.len() {
            return Err(GraphicsError::LengthMismatch {
                x: xs.len(),
                y: ys.len(),
            });
        }
        self.check_open()?;
        if xs.is_empty() {
            return Err(GraphicsError::InvalidArgument(
                "cannot plot an empty data series".to_string(),
            ));
        }
        let x_limits = self.infer_unset(self.x_limits, xs.iter().copied(), self.expand_by)?;
        let y_limits = self.infer_unset(self.y_limits, ys.iter().copied(), self.expand_by)?;
        self.commit_limits(x_limits, y_limits);

        for (x, y) in xs.windows(2).zip(ys.windows(2)) {
            self.draw_segment(x[0], y[0], x[1], y[1], &style);
        }
        self.state = PlotState::Configuring;
        Ok(self)
    }

    /// Write `text` so that its `(anchor_x, anchor_y)` point lands on the
    /// data coordinate `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidArgument`] if either axis has no limits yet.
    pub fn add_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) -> Result<&mut Self> {
        self.check_open()?;
        if self.x_limits.is_none() || self.y_limits.is_none() {
            return Err(GraphicsError::InvalidArgument(
                "text needs both axis limits; set them or add a line first".to_string(),
            ));
        }
        self.draw_text(text, x, y, &style);
        self.state = PlotState::Configuring;
        Ok(self)
    }

    /// Draw the grid (first call only) and write the plot to stdout.
    pub fn show(&mut self) -> Result<&mut Self> {
        self.show_to(&mut io::stdout().lock())
    }

    /// Draw the grid (first call only) and write the plot to `out`.
    ///
    /// Later calls re-encode the same canvas.
    pub fn show_to<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<&mut Self> {
        if self.state != PlotState::Finalized {
            self.draw_grid();
            self.state = PlotState::Finalized;
            tracing::debug!(
                width = self.canvas.width(),
                height = self.canvas.height(),
                x_limits = ?self.x_limits,
                y_limits = ?self.y_limits,
                "Finalized plot"
            );
        }
        SixelEncoder::new(&self.palette).encode(&self.canvas, out)?;
        Ok(self)
    }

    pub fn canvas(&self) -> &ImageBuffer<u8> {
        &self.canvas
    }

    pub fn palette(&self) -> &PaletteMap {
        &self.palette
    }

    pub fn x_limits(&self) -> Option<Limits> {
        self.x_limits
    }

    pub fn y_limits(&self) -> Option<Limits> {
        self.y_limits
    }

    /// Grid intervals `(x, y)`.
    pub fn grid(&self) -> (Option<f32>, Option<f32>) {
        (self.x_grid, self.y_grid)
    }

    /// Label margins `(left, bottom)` in pixels.
    pub fn margins(&self) -> (u32, u32) {
        (self.margin_x, self.margin_y)
    }

    pub fn state(&self) -> PlotState {
        self.state
    }

    fn check_open(&self) -> Result<()> {
        if self.state == PlotState::Finalized {
            return Err(GraphicsError::AlreadyShown);
        }
        Ok(())
    }

    /// Limits to infer for an axis: `None` when already set.
    fn infer_unset(
        &self,
        current: Option<Limits>,
        values: impl IntoIterator<Item = f32>,
        frac: f32,
    ) -> Result<Option<Limits>> {
        match current {
            Some(_) => Ok(None),
            None => axis::infer(values, frac).map(Some),
        }
    }

    /// Store new limits; an axis without a grid interval gets one fifth of
    /// its range.
    fn commit_limits(&mut self, x: Option<Limits>, y: Option<Limits>) {
        if let Some((lo, hi)) = x {
            self.x_limits = Some((lo, hi));
            self.x_grid.get_or_insert((hi - lo) / 5.0);
        }
        if let Some((lo, hi)) = y {
            self.y_limits = Some((lo, hi));
            self.y_grid.get_or_insert((hi - lo) / 5.0);
        }
        if x.is_some() || y.is_some() {
            self.state = PlotState::Configuring;
        }
    }

    fn map_x(&self, x: f32, (lo, hi): Limits) -> f32 {
        (self.canvas.width() - self.margin_x) as f32 * (x - lo) / (hi - lo)
    }

    fn map_y(&self, y: f32, (lo, hi): Limits) -> f32 {
        (self.canvas.height() - self.margin_y) as f32 * (1.0 - (y - lo) / (hi - lo))
    }

    fn draw_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, style: &LineStyle) {
        let (Some(xl), Some(yl)) = (self.x_limits, self.y_limits) else {
            return;
        };
        let (mut px0, mut py0) = (self.map_x(x0, xl), self.map_y(y0, yl));
        let (mut px1, mut py1) = (self.map_x(x1, xl), self.map_y(y1, yl));
        // a missing sample breaks the line
        if ![px0, py0, px1, py1].iter().all(|v| v.is_finite()) {
            return;
        }

        // walk the longer axis
        let transposed = (px1 - px0).abs() < (py1 - py0).abs();
        if transposed {
            std::mem::swap(&mut px0, &mut py0);
            std::mem::swap(&mut px1, &mut py1);
        }
        let mut view = CanvasView::new(&mut self.canvas, self.margin_x, self.margin_y, transposed);
        raster::draw_line(&mut view, px0, py0, px1, py1, style);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let (Some(xl), Some(yl)) = (self.x_limits, self.y_limits) else {
            return;
        };
        let text_width = self.font.text_width(text) as f32;
        let pos_x = self.margin_x as f32 + self.map_x(x, xl) - style.anchor_x * text_width;
        let pos_y = self.map_y(y, yl) - (1.0 - style.anchor_y) * self.font.height() as f32;
        self.font.render_str(
            &mut self.canvas,
            text,
            pos_x.round() as i32,
            pos_y.round() as i32,
            style.colour,
        );
    }

    fn draw_grid(&mut self) {
        let (Some(xl), Some(yl)) = (self.x_limits, self.y_limits) else {
            return;
        };
        // at most one line per pixel of the data area
        let columns = (self.canvas.width() - self.margin_x) as usize;
        let rows = (self.canvas.height() - self.margin_y) as usize;
        if let Some(step) = self.x_grid {
            for x in axis::grid_values(xl, step, columns) {
                self.draw_segment(x, yl.0, x, yl.1, &grid_style(x));
                if self.margin_y > 0 {
                    let label = axis::format_label(x);
                    self.draw_text(&label, x, yl.0, &TextStyle::anchored(0.5, 1.5));
                }
            }
        }
        if let Some(step) = self.y_grid {
            for y in axis::grid_values(yl, step, rows) {
                self.draw_segment(xl.0, y, xl.1, y, &grid_style(y));
                if self.margin_x > 0 {
                    let label = format!("{} ", axis::format_label(y));
                    self.draw_text(&label, xl.0, y, &TextStyle::anchored(1.0, 0.5));
                }
            }
        }
    }
}

/// The grid line through zero is solid, the others dashed.
fn grid_style(value: f32) -> LineStyle {
    if value == 0.0 {
        LineStyle::solid(GRID_COLOUR)
    } else {
        LineStyle::dashed(GRID_COLOUR, GRID_DASH, GRID_DASH_FRACTION)
    }
}
