//! Loader for ASCII greyscale PGM (`P2`) images.
//!
//! ```text
//! P2
//! # comment to end of line
//! <width> <height>
//! <maxval>
//! <width * height whitespace-separated samples, row-major>
//! ```

use std::path::Path;

use termgfx_raster::{ImageBuffer, Scalar};

use crate::error::{GraphicsError, Result};

const MAGIC: &str = "P2";

/// Largest `maxval` the format allows (exclusive).
const MAXVAL_LIMIT: u32 = 65536;

/// Sample types a PGM file can be loaded into.
pub trait PgmSample: Scalar {
    /// Largest `maxval` representable without loss.
    const MAX_VALUE: u32;
}

impl PgmSample for u8 {
    const MAX_VALUE: u32 = u8::MAX as u32;
}

impl PgmSample for u16 {
    const MAX_VALUE: u32 = u16::MAX as u32;
}

impl PgmSample for f32 {
    const MAX_VALUE: u32 = u32::MAX;
}

/// Load a `P2` file into an image of `T` samples.
pub fn load_pgm<T: PgmSample>(path: impl AsRef<Path>) -> Result<ImageBuffer<T>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let image = parse_pgm(&content)
        .map_err(|e| match e {
            GraphicsError::Pgm(msg) => GraphicsError::Pgm(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded PGM image"
    );
    Ok(image)
}

/// Parse the text of a `P2` file.
///
/// # Errors
///
/// [`GraphicsError::Pgm`] on a wrong magic number, non-positive
/// dimensions, `maxval` outside `1..65536` or too large for `T`, a
/// non-numeric token, a sample above `maxval`, or too few samples.
pub fn parse_pgm<T: PgmSample>(content: &str) -> Result<ImageBuffer<T>> {
    let mut tokens = content
        .lines()
        .map(|line| line.split_once('#').map_or(line, |(data, _)| data))
        .flat_map(str::split_whitespace);

    let magic = tokens.next().unwrap_or_default();
    if magic != MAGIC {
        return Err(pgm_error(format!("invalid magic number {:?}, expected P2", magic)));
    }

    let width = header_value(tokens.next(), "width")?;
    let height = header_value(tokens.next(), "height")?;
    let max_val = header_value(tokens.next(), "maxval")?;

    if width == 0 || height == 0 {
        return Err(pgm_error(format!("invalid dimensions {}x{}", width, height)));
    }
    if max_val == 0 || max_val >= MAXVAL_LIMIT {
        return Err(pgm_error(format!("invalid maxval {}", max_val)));
    }
    if max_val > T::MAX_VALUE {
        return Err(pgm_error(format!(
            "maxval {} exceeds the range of the sample type",
            max_val
        )));
    }

    let mut image = ImageBuffer::<T>::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let token = tokens.next().ok_or_else(|| {
                pgm_error(format!(
                    "expected {} samples, data ends at pixel ({}, {})",
                    width as u64 * height as u64,
                    x,
                    y
                ))
            })?;
            let value: u32 = token
                .parse()
                .map_err(|_| pgm_error(format!("invalid sample {:?} at ({}, {})", token, x, y)))?;
            if value > max_val {
                return Err(pgm_error(format!(
                    "sample {} at ({}, {}) exceeds maxval {}",
                    value, x, y, max_val
                )));
            }
            image.set(x, y, T::from_f64(value as f64));
        }
    }
    Ok(image)
}

fn header_value(token: Option<&str>, name: &str) -> Result<u32> {
    let token = token.ok_or_else(|| pgm_error(format!("header ends before {}", name)))?;
    token
        .parse()
        .map_err(|_| pgm_error(format!("invalid {} {:?}", name, token)))
}

fn pgm_error(msg: String) -> GraphicsError {
    GraphicsError::Pgm(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL: &str = "P2\n# a comment\n3 2 # trailing\n255\n0 1 2\n253 254 255\n";

    #[test]
    fn test_parse_small_image() {
        let image: ImageBuffer<u8> = parse_pgm(SMALL).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.as_slice(), &[0, 1, 2, 253, 254, 255]);
    }

    #[test]
    fn test_parse_into_float() {
        let image: ImageBuffer<f32> = parse_pgm("P2 2 1 1000 999 1").unwrap();
        assert_eq!(image.as_slice(), &[999.0, 1.0]);
    }

    #[test]
    fn test_rejects_binary_magic() {
        let err = parse_pgm::<u8>("P5 1 1 255 0").unwrap_err();
        assert!(matches!(err, GraphicsError::Pgm(_)));
        assert!(parse_pgm::<u8>("").is_err());
    }

    #[test]
    fn test_rejects_bad_header() {
        assert!(parse_pgm::<u8>("P2 0 4 255").is_err());
        assert!(parse_pgm::<u8>("P2 -1 4 255").is_err());
        assert!(parse_pgm::<u16>("P2 1 1 0 0").is_err());
        assert!(parse_pgm::<u16>("P2 1 1 65536 0").is_err());
        assert!(parse_pgm::<u8>("P2 1 1").is_err());
    }

    #[test]
    fn test_maxval_must_fit_sample_type() {
        let text = "P2 1 1 1023 1000";
        assert!(parse_pgm::<u8>(text).is_err());
        assert_eq!(parse_pgm::<u16>(text).unwrap().get(0, 0), 1000);
    }

    #[test]
    fn test_rejects_truncated_and_garbage_data() {
        assert!(parse_pgm::<u8>("P2 2 2 255 1 2 3").is_err());
        assert!(parse_pgm::<u8>("P2 1 1 255 x").is_err());
        assert!(parse_pgm::<u8>("P2 1 1 15 16").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.pgm");
        std::fs::write(&path, SMALL).unwrap();
        let image: ImageBuffer<u16> = load_pgm(&path).unwrap();
        assert_eq!(image.get(2, 1), 255);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pgm::<u8>(dir.path().join("missing.pgm")).unwrap_err();
        assert!(matches!(err, GraphicsError::Io(_)));
    }

    #[test]
    fn test_load_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pgm");
        std::fs::write(&path, "P2 1 1 255").unwrap();
        let msg = load_pgm::<u8>(&path).unwrap_err().to_string();
        assert!(msg.contains("bad.pgm"), "{msg}");
    }
}
