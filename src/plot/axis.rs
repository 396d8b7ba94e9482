//! Axis limits, grid positions and grid labels.

use crate::error::{GraphicsError, Result};

/// A data-space `(min, max)` range.
pub type Limits = (f32, f32);

/// Widen `[min, max]` by `frac` of its span on each side.
pub(crate) fn expand(min: f32, max: f32, frac: f32) -> Limits {
    let delta = frac * (max - min);
    (min - delta, max + delta)
}

/// Validate an explicitly requested range.
pub(crate) fn checked(limits: Limits) -> Result<Limits> {
    let (min, max) = limits;
    if !min.is_finite() || !max.is_finite() || min == max {
        return Err(GraphicsError::InvalidRange {
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(limits)
}

/// Limits covering `values`, expanded by `frac`. A zero span is widened to
/// one unit centred on the value so the axis mapping stays defined.
pub(crate) fn infer(values: impl IntoIterator<Item = f32>, frac: f32) -> Result<Limits> {
    let (lo, hi) = values
        .into_iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return Err(GraphicsError::InvalidRange {
            min: lo as f64,
            max: hi as f64,
        });
    }
    if lo == hi {
        return Ok((lo - 0.5, hi + 0.5));
    }
    Ok(expand(lo, hi, frac))
}

/// Multiples of `step` in `[lo, hi)`.
pub(crate) fn grid_values(limits: Limits, step: f32, max_lines: usize) -> Vec<f32> {
    let (lo, hi) = limits;
    if !step.is_finite() || step <= 0.0 || !lo.is_finite() || !hi.is_finite() || max_lines == 0 {
        return Vec::new();
    }
    // coarsen to a multiple of the step so zero stays on the grid
    let count = ((hi as f64 - lo as f64) / step as f64).ceil();
    let step = if count > max_lines as f64 {
        (step as f64 * (count / max_lines as f64).ceil()) as f32
    } else {
        step
    };
    let first = (lo / step).ceil() as i64;
    (first..)
        .map(|k| k as f32 * step)
        .take_while(|&v| v < hi)
        .take(max_lines)
        .collect()
}

/// Format a grid value with three significant digits, like C's `%.3g`.
pub(crate) fn format_label(value: f32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let value = value as f64;
    let scientific = format!("{:.2e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..3).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (2 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
