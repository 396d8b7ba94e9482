use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use termgfx::pgm::load_pgm;
use termgfx::{
    display_rescaled, plot_with, ColourMap, GraphicsConfig, Image, ImageBuffer, LineStyle,
    Magnify, PaletteMap, Rotate90, TextStyle,
};
use termgfx_raster::filter::{
    adaptive_threshold, cartesian_to_polar, convolve, gaussian_blur, normalize_to_u16,
    trimmed_histogram, Kernel, Padding,
};

#[derive(Parser)]
#[command(name = "termgfx")]
#[command(about = "Show images and plots in sixel-capable terminals")]
struct Cli {
    /// YAML configuration file (default: $TERMGFX_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a PGM image
    Show {
        /// ASCII PGM (P2) file
        file: PathBuf,

        /// Value shown as the first palette colour (default: image minimum)
        #[arg(long)]
        min: Option<f64>,

        /// Value shown as the last palette colour (default: image maximum)
        #[arg(long)]
        max: Option<f64>,

        /// Colour ramp (default from config)
        #[arg(long, value_enum)]
        colourmap: Option<ColourMap>,

        /// Integer magnification factor
        #[arg(long, default_value_t = 1)]
        magnify: u32,

        /// Rotation in degrees: 90, 180 or 270
        #[arg(long)]
        rotate: Option<i32>,
    },
    /// Plot the grey-level histogram of a PGM image
    Histogram {
        /// ASCII PGM (P2) file with 8-bit samples
        file: PathBuf,
    },
    /// Run an image filter and display the result
    Filter {
        /// ASCII PGM (P2) file
        file: PathBuf,

        #[arg(value_enum)]
        filter: FilterKind,

        /// Gaussian kernel size (odd)
        #[arg(long, default_value_t = 5)]
        size: usize,

        /// Gaussian standard deviation
        #[arg(long, default_value_t = 2.0)]
        sigma: f64,

        /// Adaptive threshold block size
        #[arg(long, default_value_t = 32)]
        block: u32,
    },
    /// Plot a few demonstration data sets
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterKind {
    Gaussian,
    Sobel,
    Threshold,
    Polar,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with sixel data on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "termgfx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = load_config(cli.config);

    match cli.command {
        Some(Commands::Show {
            file,
            min,
            max,
            colourmap,
            magnify,
            rotate,
        }) => run_show_command(&config, &file, min, max, colourmap, magnify, rotate),
        Some(Commands::Histogram { file }) => run_histogram_command(&config, &file),
        Some(Commands::Filter {
            file,
            filter,
            size,
            sigma,
            block,
        }) => run_filter_command(&config, &file, filter, size, sigma, block),
        Some(Commands::Demo) => run_demo_command(&config),
        None => {
            println!("termgfx: show images and plots in sixel-capable terminals");
            println!();
            println!("Try `termgfx demo`, or `termgfx --help` for all commands.");
            Ok(())
        }
    }
}

/// Resolve the config file and apply environment overrides.
fn load_config(path: Option<PathBuf>) -> GraphicsConfig {
    let path = path.or_else(|| std::env::var_os("TERMGFX_CONFIG").map(PathBuf::from));
    let mut config = match path {
        Some(path) => GraphicsConfig::load(&path),
        None => GraphicsConfig::default(),
    };
    if std::env::var_os("WHITEBG").is_some() {
        config.white_background = true;
    }
    config
}

fn colour_palette(config: &GraphicsConfig, colourmap: Option<ColourMap>) -> anyhow::Result<PaletteMap> {
    let colourmap = colourmap.unwrap_or(config.colourmap);
    Ok(colourmap.build(config.colourmap_size as usize)?)
}

fn load_image(file: &Path) -> anyhow::Result<ImageBuffer<f32>> {
    load_pgm(file).with_context(|| format!("Failed to load {}", file.display()))
}

fn sample_range<I: Image<Sample = f32> + ?Sized>(image: &I) -> (f64, f64) {
    let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let v = image.sample(x, y);
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if lo < hi {
        (lo as f64, hi as f64)
    } else {
        (lo as f64, lo as f64 + 1.0)
    }
}

fn run_show_command(
    config: &GraphicsConfig,
    file: &Path,
    min: Option<f64>,
    max: Option<f64>,
    colourmap: Option<ColourMap>,
    magnify: u32,
    rotate: Option<i32>,
) -> anyhow::Result<()> {
    let image = load_image(file)?;
    let palette = colour_palette(config, colourmap)?;
    let (lo, hi) = sample_range(&image);

    println!(
        "Showing image \"{}\", size: {} x {}",
        file.display(),
        image.width(),
        image.height()
    );

    let rotated;
    let source: &dyn Image<Sample = f32> = match rotate {
        Some(degrees) => {
            rotated = Rotate90::from_degrees(&image, degrees)?;
            &rotated
        }
        None => &image,
    };
    let magnified;
    let source: &dyn Image<Sample = f32> = if magnify != 1 {
        magnified = Magnify::new(source, magnify)?;
        &magnified
    } else {
        source
    };

    display_rescaled(source, min.unwrap_or(lo), max.unwrap_or(hi), &palette)?;
    Ok(())
}

fn run_histogram_command(config: &GraphicsConfig, file: &Path) -> anyhow::Result<()> {
    let image: ImageBuffer<u8> =
        load_pgm(file).with_context(|| format!("Failed to load {}", file.display()))?;
    let bins = trimmed_histogram(&image);
    let peak = bins.iter().copied().max().unwrap_or(0).max(1);

    println!("Grey-level histogram of \"{}\":", file.display());
    let mut plot = plot_with(config.plot.width, config.plot.height, config.plot_options())?;
    plot.set_xlim(1.0, 255.0)?.set_ylim(0.0, peak as f32)?;
    // bins start at grey level 1
    for (i, &count) in bins.iter().enumerate().filter(|&(_, &count)| count > 0) {
        let x = (i + 1) as f32;
        plot.add_line(x, 0.0, x, count as f32, LineStyle::solid(2))?;
    }
    plot.finish()?;
    Ok(())
}

fn run_filter_command(
    config: &GraphicsConfig,
    file: &Path,
    filter: FilterKind,
    size: usize,
    sigma: f64,
    block: u32,
) -> anyhow::Result<()> {
    let palette = colour_palette(config, None)?;
    match filter {
        FilterKind::Gaussian => {
            let image = load_image(file)?;
            let (lo, hi) = sample_range(&image);
            let blurred = gaussian_blur(&image, size, sigma)?;
            display_rescaled(&blurred, lo, hi, &palette)?;
        }
        FilterKind::Sobel => {
            let image = load_image(file)?;
            let gx = convolve(&image, &Kernel::sobel_x(), Padding::Replicate)?;
            let gy = convolve(&image, &Kernel::sobel_y(), Padding::Replicate)?;
            let magnitude = ImageBuffer::from_vec(
                image.width(),
                image.height(),
                gx.as_slice()
                    .iter()
                    .zip(gy.as_slice())
                    .map(|(x, y)| x.hypot(*y))
                    .collect(),
            )?;
            let stretched = normalize_to_u16(&magnitude)?;
            display_rescaled(&stretched, 0.0, u16::MAX as f64, &palette)?;
        }
        FilterKind::Threshold => {
            let image: ImageBuffer<u8> =
                load_pgm(file).with_context(|| format!("Failed to load {}", file.display()))?;
            let binary = adaptive_threshold(&image, block)?;
            display_rescaled(&binary, 0.0, 255.0, &palette)?;
        }
        FilterKind::Polar => {
            let image = load_image(file)?;
            let polar = cartesian_to_polar(&image)?;
            let stretched = normalize_to_u16(&polar)?;
            display_rescaled(&stretched, 0.0, u16::MAX as f64, &palette)?;
        }
    }
    Ok(())
}

/// Normally distributed samples via the Box-Muller transform.
fn normal_samples(rng: &mut impl Rng, count: usize, mean: f32, std_dev: f32) -> Vec<f32> {
    (0..count)
        .map(|_| {
            let u1: f32 = 1.0 - rng.gen::<f32>();
            let u2: f32 = rng.gen();
            let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
            mean + std_dev * z
        })
        .collect()
}

fn run_demo_command(config: &GraphicsConfig) -> anyhow::Result<()> {
    let options = config.plot_options();
    let (width, height) = (config.plot.width, config.plot.height);

    let decay: Vec<f32> = (0..50)
        .map(|n| {
            let n = n as f32;
            (-0.1 * n).exp() - 1.5 * (-0.4 * n).exp()
        })
        .collect();
    println!("A simple one-line plot:");
    let mut plot = plot_with(width, height, options)?;
    plot.add_series(&decay, LineStyle::default())?;
    plot.finish()?;

    let ys: Vec<f32> = (0..50)
        .map(|n| (0.2 * n as f32).sin() + 0.3 * (0.33 * n as f32).cos())
        .collect();
    let xs: Vec<f32> = (0..50)
        .map(|n| 20.0 + 10.0 * (0.41 * n as f32).cos() + 5.0 * (0.21 * n as f32).sin())
        .collect();
    println!("Plotting arbitrary lines:");
    let mut plot = plot_with(768, height, options)?;
    plot.add_series(&ys, LineStyle::dashed(4, 10, 0.5))?
        .add_series_xy(&xs, &ys, LineStyle::solid(3))?
        .add_text(
            "sinusoids",
            (ys.len() - 1) as f32 / 2.0,
            1.2,
            TextStyle::anchored(0.5, 0.0).with_colour(6),
        )?;
    plot.finish()?;

    let noise = normal_samples(&mut rand::thread_rng(), 256, 5.0, 2.0);
    println!("Plotting Normally distributed random variables:");
    let mut plot = plot_with(768, height, options)?;
    plot.set_ylim(-1.0, 11.0)?
        .set_grid(50.0, 2.0)?
        .add_series(&noise, LineStyle::solid(2))?;
    plot.finish()?;

    Ok(())
}
