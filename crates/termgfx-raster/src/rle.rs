//! Whole-image run-length codec with file persistence.
//!
//! Runs are collected in row-major order across row boundaries. On disk a
//! run is the sample's little-endian bytes followed by a little-endian
//! `u32` repeat count; the file has no header.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::RasterError;
use crate::image::{Image, ImageBuffer, Scalar};

/// A run-length encoded image as `(sample, count)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLength<T> {
    runs: Vec<(T, u32)>,
}

impl<T: Scalar> RunLength<T> {
    pub fn encode<I>(image: &I) -> Self
    where
        I: Image<Sample = T> + ?Sized,
    {
        let mut runs: Vec<(T, u32)> = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                let value = image.sample(x, y);
                if let Some((last, count)) = runs.last_mut() {
                    if *last == value {
                        *count += 1;
                        continue;
                    }
                }
                runs.push((value, 1));
            }
        }
        Self { runs }
    }

    pub fn from_runs(runs: Vec<(T, u32)>) -> Self {
        Self { runs }
    }

    pub fn runs(&self) -> &[(T, u32)] {
        &self.runs
    }

    /// Expand into a `width x height` image.
    ///
    /// Samples beyond the image are dropped; a short stream leaves the
    /// remaining pixels zero.
    pub fn decode(&self, width: u32, height: u32) -> Result<ImageBuffer<T>, RasterError> {
        let mut image = ImageBuffer::new(width, height)?;
        let mut pixels = (0..height).flat_map(|y| (0..width).map(move |x| (x, y)));
        'runs: for &(value, count) in &self.runs {
            for _ in 0..count {
                match pixels.next() {
                    Some((x, y)) => image.set(x, y, value),
                    None => break 'runs,
                }
            }
        }
        Ok(image)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.runs.len() * (T::BYTES + 4));
        for &(value, count) in &self.runs {
            value.write_le(&mut out);
            out.extend_from_slice(&count.to_le_bytes());
        }
        out
    }

    /// Parse the on-disk record stream. A trailing partial record is an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RasterError> {
        let record = T::BYTES + 4;
        if bytes.len() % record != 0 {
            return Err(RasterError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{} bytes is not a whole number of {}-byte runs",
                    bytes.len(),
                    record
                ),
            )));
        }
        let runs = bytes
            .chunks_exact(record)
            .map(|chunk| {
                let value = T::read_le(&chunk[..T::BYTES]);
                let mut count = [0u8; 4];
                count.copy_from_slice(&chunk[T::BYTES..]);
                (value, u32::from_le_bytes(count))
            })
            .collect();
        Ok(Self { runs })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RasterError> {
        Self::from_bytes(&fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runs_cross_row_boundaries() {
        let image = ImageBuffer::from_vec(3, 2, vec![1u8, 1, 2, 2, 2, 2]).unwrap();
        let rle = RunLength::encode(&image);
        assert_eq!(rle.runs(), &[(1, 2), (2, 4)]);
    }

    #[test]
    fn test_decode_restores_image() {
        let image = ImageBuffer::from_vec(4, 2, vec![0u16, 0, 9, 9, 9, 3, 3, 0]).unwrap();
        let decoded = RunLength::encode(&image).decode(4, 2).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_truncates_and_pads() {
        let long = RunLength::from_runs(vec![(5u8, 10)]);
        assert_eq!(long.decode(2, 2).unwrap().as_slice(), &[5, 5, 5, 5]);

        let short = RunLength::from_runs(vec![(5u8, 1)]);
        assert_eq!(short.decode(2, 1).unwrap().as_slice(), &[5, 0]);
    }

    #[test]
    fn test_byte_layout() {
        let rle = RunLength::from_runs(vec![(0x0102u16, 3)]);
        assert_eq!(rle.to_bytes(), vec![0x02, 0x01, 3, 0, 0, 0]);
    }

    #[test]
    fn test_partial_record_rejected() {
        assert!(RunLength::<u8>::from_bytes(&[1, 2, 0]).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.rle");
        let image = ImageBuffer::from_vec(2, 2, vec![1.5f32, 1.5, -2.0, 0.0]).unwrap();

        let rle = RunLength::encode(&image);
        rle.save(&path).unwrap();
        let loaded = RunLength::<f32>::load(&path).unwrap();

        assert_eq!(loaded, rle);
        assert_eq!(loaded.decode(2, 2).unwrap(), image);
    }
}
