//! One-shot plots shown when their guard goes out of scope.

use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};

use super::{Plot, PlotOptions};
use crate::error::Result;

/// A [`Plot`] that is shown exactly once.
///
/// Call [`ScopedPlot::finish`] to show it and get the result. A guard
/// dropped without `finish` (including on an early `?` return) shows the
/// plot from its destructor and logs any error.
pub struct ScopedPlot<W: Write = Stdout> {
    plot: Plot,
    out: Option<W>,
}

impl ScopedPlot<Stdout> {
    pub fn new(plot: Plot) -> Self {
        Self::with_writer(plot, io::stdout())
    }
}

impl<W: Write> ScopedPlot<W> {
    pub fn with_writer(plot: Plot, out: W) -> Self {
        Self {
            plot,
            out: Some(out),
        }
    }

    /// Show the plot now and return the writer's outcome.
    pub fn finish(mut self) -> Result<()> {
        self.render()
    }

    fn render(&mut self) -> Result<()> {
        match self.out.take() {
            Some(mut out) => self.plot.show_to(&mut out).map(|_| ()),
            None => Ok(()),
        }
    }
}

impl<W: Write> Deref for ScopedPlot<W> {
    type Target = Plot;

    fn deref(&self) -> &Plot {
        &self.plot
    }
}

impl<W: Write> DerefMut for ScopedPlot<W> {
    fn deref_mut(&mut self) -> &mut Plot {
        &mut self.plot
    }
}

impl<W: Write> Drop for ScopedPlot<W> {
    fn drop(&mut self) {
        if let Err(e) = self.render() {
            tracing::warn!(%e, "Failed to show plot");
        }
    }
}

/// Start a plot on stdout that is shown when the returned guard is dropped.
///
/// ```no_run
/// # fn main() -> termgfx::Result<()> {
/// termgfx::plot(256, 128)?
///     .set_grid(2.0, 0.5)?
///     .add_series(&[0.0, 1.0, 4.0, 9.0], Default::default())?;
/// # Ok(())
/// # }
/// ```
pub fn plot(width: u32, height: u32) -> Result<ScopedPlot> {
    plot_with(width, height, PlotOptions::default())
}

pub fn plot_with(width: u32, height: u32, options: PlotOptions) -> Result<ScopedPlot> {
    Ok(ScopedPlot::new(Plot::with_options(width, height, options)?))
}
