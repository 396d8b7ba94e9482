//! Grey-level histograms and Otsu binarisation.

use crate::error::RasterError;
use crate::image::{Image, ImageBuffer};

/// Number of grey levels in an 8-bit histogram.
pub const GREY_LEVELS: usize = 256;

/// Count occurrences of each 8-bit grey level.
pub fn histogram<I>(image: &I) -> Vec<u32>
where
    I: Image<Sample = u8> + ?Sized,
{
    let mut bins = vec![0u32; GREY_LEVELS];
    for y in 0..image.height() {
        for x in 0..image.width() {
            bins[image.sample(x, y) as usize] += 1;
        }
    }
    bins
}

/// Histogram with the first and last bins removed.
///
/// Pure black and pure white usually dominate scanned images (background,
/// saturated regions) and flatten everything else when plotted.
pub fn trimmed_histogram<I>(image: &I) -> Vec<u32>
where
    I: Image<Sample = u8> + ?Sized,
{
    let bins = histogram(image);
    bins[1..bins.len() - 1].to_vec()
}

/// Otsu's threshold: the bin index maximising between-class variance.
///
/// `total` is the number of samples the histogram was built from. Pixels
/// strictly above the returned level belong to the foreground.
pub fn otsu_threshold(histogram: &[u32], total: u64) -> usize {
    if total == 0 {
        return 0;
    }
    // class sizes are tracked as integer counts so the foreground weight
    // reaches exactly zero at the last populated bin
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut count_bg = 0u64;
    let mut sum_bg = 0.0;
    let mut best_variance = 0.0;
    let mut threshold = 0;

    for (t, &count) in histogram.iter().enumerate() {
        count_bg += count as u64;
        if count_bg == 0 {
            continue;
        }
        if count_bg >= total {
            break;
        }
        sum_bg += t as f64 * count as f64;
        let weight_bg = count_bg as f64 / total as f64;
        let weight_fg = 1.0 - weight_bg;
        let mean_bg = sum_bg / count_bg as f64;
        let mean_fg = (sum_all - sum_bg) / (total - count_bg) as f64;
        let variance = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);
        if variance > best_variance {
            best_variance = variance;
            threshold = t;
        }
    }

    threshold
}

/// Binarise with a per-pixel Otsu threshold over a local window.
///
/// The window spans `block_size / 2` pixels on each side of the target,
/// clamped to the image. Output samples are 255 above the local
/// threshold, 0 otherwise.
pub fn adaptive_threshold<I>(image: &I, block_size: u32) -> Result<ImageBuffer<u8>, RasterError>
where
    I: Image<Sample = u8> + ?Sized,
{
    if block_size == 0 {
        return Err(RasterError::InvalidBlockSize);
    }
    let (width, height) = (image.width(), image.height());
    let mut output = ImageBuffer::new(width, height)?;
    let half = block_size / 2;
    let mut local = vec![0u32; GREY_LEVELS];

    for y in 0..height {
        for x in 0..width {
            let (x1, x2) = (x.saturating_sub(half), (x + half).min(width - 1));
            let (y1, y2) = (y.saturating_sub(half), (y + half).min(height - 1));

            local.iter_mut().for_each(|c| *c = 0);
            for j in y1..=y2 {
                for i in x1..=x2 {
                    local[image.sample(i, j) as usize] += 1;
                }
            }
            let count = ((x2 - x1 + 1) * (y2 - y1 + 1)) as u64;
            let level = otsu_threshold(&local, count);
            let value = if image.sample(x, y) as usize > level { 255 } else { 0 };
            output.set(x, y, value);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_pixel() {
        let image = ImageBuffer::from_vec(3, 2, vec![0u8, 5, 5, 255, 5, 0]).unwrap();
        let bins = histogram(&image);
        assert_eq!(bins.len(), 256);
        assert_eq!(bins[0], 2);
        assert_eq!(bins[5], 3);
        assert_eq!(bins[255], 1);
        assert_eq!(bins.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_trimmed_histogram_drops_extremes() {
        let image = ImageBuffer::from_vec(3, 1, vec![0u8, 1, 255]).unwrap();
        let bins = trimmed_histogram(&image);
        assert_eq!(bins.len(), 254);
        assert_eq!(bins[0], 1);
        assert_eq!(bins.iter().sum::<u32>(), 1);
    }

    #[test]
    fn test_otsu_separates_bimodal_histogram() {
        let mut bins = vec![0u32; 256];
        bins[40] = 50;
        bins[200] = 50;
        let t = otsu_threshold(&bins, 100);
        assert!((40..200).contains(&t), "threshold {t} not between the modes");
    }

    #[test]
    fn test_otsu_empty_histogram() {
        assert_eq!(otsu_threshold(&[0; 256], 0), 0);
    }

    #[test]
    fn test_adaptive_threshold_binarises_halves() {
        let data = (0..64).map(|i| if i % 8 < 4 { 30u8 } else { 220 }).collect();
        let image = ImageBuffer::from_vec(8, 8, data).unwrap();
        let binary = adaptive_threshold(&image, 8).unwrap();
        assert_eq!(binary.get(0, 0), 0);
        assert_eq!(binary.get(3, 4), 0);
        assert_eq!(binary.get(4, 4), 255);
        assert_eq!(binary.get(7, 7), 255);
    }

    #[test]
    fn test_adaptive_threshold_rejects_zero_block() {
        let image = ImageBuffer::<u8>::new(2, 2).unwrap();
        assert!(matches!(
            adaptive_threshold(&image, 0),
            Err(RasterError::InvalidBlockSize)
        ));
    }
}
