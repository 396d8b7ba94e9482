//! End-to-end tests of plots rendered to an in-memory writer.

mod common;

use common::{assert_sixel_chars, assert_sixel_frame, bands, bare_plot};
use pretty_assertions::assert_eq;
use termgfx::{
    Axis, GraphicsError, LineStyle, Plot, PlotState, ScopedPlot, SixelEncoder, TextStyle,
};

fn close(a: (f32, f32), b: (f32, f32)) -> bool {
    (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5
}

fn show(plot: &mut Plot) -> String {
    let mut sink = Vec::new();
    plot.show_to(&mut sink).unwrap();
    String::from_utf8(sink).unwrap()
}

#[test]
fn test_horizontal_line_bytes() {
    let mut plot = bare_plot(30, 12);
    plot.set_xlim(0.0, 30.0)
        .unwrap()
        .set_ylim(0.0, 12.0)
        .unwrap()
        .set_grid(1000.0, 1000.0)
        .unwrap()
        .add_line(0.0, 6.0, 30.0, 6.0, LineStyle::solid(2))
        .unwrap();
    let out = show(&mut plot);

    assert_sixel_frame(&out, 8);
    // the solid x = 0 grid line covers column 0; y = 0 falls just below the canvas
    assert_eq!(bands(&out), vec!["#1~!29?", "#1~!29?$#2?!29@"]);
}

#[test]
fn test_inferred_limits() {
    let mut plot = bare_plot(100, 50);
    plot.add_series_xy(&[0.0, 10.0], &[0.0, 5.0], LineStyle::default())
        .unwrap();
    assert!(close(plot.x_limits().unwrap(), (-1.0, 11.0)));
    assert!(close(plot.y_limits().unwrap(), (-0.5, 5.5)));

    let mut plot = bare_plot(100, 50);
    plot.add_series(&[2.0, 4.0, 3.0, 1.0], LineStyle::default())
        .unwrap();
    assert_eq!(plot.x_limits(), Some((0.0, 3.0)));
    assert!(close(plot.y_limits().unwrap(), (0.7, 4.3)));
}

#[test]
fn test_limits_are_write_once() {
    let mut plot = bare_plot(100, 50);
    plot.add_line(0.0, 0.0, 1.0, 1.0, LineStyle::default())
        .unwrap();
    let err = plot.set_ylim(-5.0, 5.0).unwrap_err();
    assert!(matches!(err, GraphicsError::AxisAlreadySet { axis: Axis::Y }));
}

#[test]
fn test_mismatched_series_is_rejected() {
    let mut plot = bare_plot(100, 50);
    let err = plot
        .add_series_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0], LineStyle::default())
        .unwrap_err();
    assert!(matches!(err, GraphicsError::LengthMismatch { x: 3, y: 2 }));
    assert_eq!(plot.state(), PlotState::Fresh);
    assert_eq!(plot.x_limits(), None);
}

#[test]
fn test_invalid_explicit_range() {
    let mut plot = bare_plot(100, 50);
    assert!(matches!(
        plot.set_xlim(1.0, 1.0),
        Err(GraphicsError::InvalidRange { .. })
    ));
    assert!(matches!(
        plot.set_ylim(0.0, f32::NAN),
        Err(GraphicsError::InvalidRange { .. })
    ));
    assert_eq!(plot.state(), PlotState::Fresh);
}

#[test]
fn test_show_finalizes_and_reencodes() {
    let mut plot = Plot::new(200, 100).unwrap();
    plot.add_series(&[0.0, 1.0, 0.5], LineStyle::dashed(3, 4, 0.5))
        .unwrap()
        .add_text("peak", 1.0, 1.0, TextStyle::anchored(0.5, 0.0))
        .unwrap();

    let first = show(&mut plot);
    assert_eq!(plot.state(), PlotState::Finalized);
    assert_sixel_chars(&first);
    assert_eq!(first.matches(termgfx::rendering::SIXEL_START).count(), 1);

    assert!(matches!(
        plot.add_series(&[1.0, 2.0], LineStyle::default()),
        Err(GraphicsError::AlreadyShown)
    ));
    assert_eq!(show(&mut plot), first);
}

#[test]
fn test_show_matches_direct_encoding() {
    let mut plot = Plot::new(160, 80).unwrap();
    plot.add_series(&[3.0, 1.0, 4.0, 1.0, 5.0], LineStyle::default())
        .unwrap();
    let out = show(&mut plot);
    let expected = SixelEncoder::new(plot.palette())
        .encode_to_string(plot.canvas())
        .unwrap();
    assert_eq!(out, expected);
}

#[test]
fn test_reset_allows_new_plot() {
    let mut plot = bare_plot(40, 20);
    plot.set_xlim(0.0, 1.0).unwrap().set_ylim(0.0, 1.0).unwrap();
    show(&mut plot);

    plot.reset();
    assert_eq!(plot.state(), PlotState::Fresh);
    assert!(plot.canvas().as_slice().iter().all(|&v| v == 0));
    plot.set_xlim(-1.0, 1.0).unwrap();
    assert_eq!(plot.state(), PlotState::Configuring);
}

#[test]
fn test_scoped_plot_shows_on_drop() {
    let mut sink = Vec::new();
    {
        let mut scoped = ScopedPlot::with_writer(bare_plot(40, 20), &mut sink);
        scoped
            .set_grid(0.5, 0.5)
            .unwrap()
            .add_series(&[0.0, 1.0], LineStyle::default())
            .unwrap();
    }
    let out = String::from_utf8(sink).unwrap();
    assert_sixel_frame(&out, 8);
    assert_eq!(bands(&out).len(), 4);
}

#[test]
fn test_scoped_plot_finish_reports_errors() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let scoped = ScopedPlot::with_writer(bare_plot(40, 20), Broken);
    assert!(matches!(scoped.finish(), Err(GraphicsError::Io(_))));
}
