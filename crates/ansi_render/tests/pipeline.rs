use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use ansi_render::{
    print_with_width, render_with_width, AnsiError, AnsiRenderer, Dimensions, FixedWidth,
    LayoutPolicy, PixelGrid, RenderOptions, TerminalSize, FULL_BLOCK, RESET,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Provider that fails like a redirected stdout and records whether it was asked.
#[derive(Default)]
struct NoTerminal {
    queried: Cell<usize>,
}

impl TerminalSize for NoTerminal {
    fn columns(&self) -> Result<u32, AnsiError> {
        self.queried.set(self.queried.get() + 1);
        Err(AnsiError::TerminalSize(std::io::Error::other("not a tty")))
    }
}

fn write_png(dir: &TempDir, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).unwrap();
    path
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([(x * 7) as u8, (y * 5) as u8, 90]))
}

#[test]
fn solid_red_square_renders_two_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "red.png", &RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])));

    let text = render_with_width(&path, 4).unwrap();

    let cell = format!("\x1b[38;2;255;0;0m{FULL_BLOCK}");
    let line = format!("{}{RESET}", cell.repeat(4));
    assert_eq!(text, format!("{line}\n{line}\n"));
}

#[test]
fn transparent_png_renders_black() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clear.png");
    RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0])).save(&path).unwrap();

    let text = render_with_width(&path, 2).unwrap();

    let cell = format!("\x1b[38;2;0;0;0m{FULL_BLOCK}");
    assert_eq!(text, format!("{}{RESET}\n", cell.repeat(2)));
}

#[test]
fn half_transparent_red_is_dimmed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fade.png");
    RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 128])).save(&path).unwrap();

    let text = render_with_width(&path, 4).unwrap();
    assert!(text.starts_with("\x1b[38;2;128;0;0m"), "{text:?}");
}

#[test]
fn written_output_matches_text() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "g.png", &gradient(12, 8));
    let output = AnsiRenderer::new(FixedWidth(6))
        .render_path(&path, &RenderOptions::default())
        .unwrap();

    let mut buffer = Vec::new();
    output.write_to(&mut buffer).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), output.to_text());
    assert_eq!(output.to_text().lines().count(), 2);
}

#[test]
fn print_with_width_reports_errors_before_writing() {
    let err = print_with_width(Path::new("missing/picture.bmp"), 10).unwrap_err();
    assert!(matches!(err, AnsiError::UnsupportedFormat { .. }));

    let err = print_with_width(Path::new("missing/picture.png"), 0).unwrap_err();
    assert!(matches!(err, AnsiError::Open { .. }));
}

#[test]
fn fixed_width_never_queries_terminal() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "g.png", &gradient(30, 20));
    let terminal = NoTerminal::default();

    let output = AnsiRenderer::new(terminal).render_path(&path, &RenderOptions::with_width(15));

    let output = output.unwrap();
    assert_eq!(output.dimensions, Dimensions::new(15, 10));
    assert_eq!(output.lines.len(), 5);
}

#[test]
fn terminal_failure_is_surfaced() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "g.png", &gradient(8, 8));
    let renderer = AnsiRenderer::new(NoTerminal::default());

    let err = renderer.render_path(&path, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, AnsiError::TerminalSize(_)));
}

#[test]
fn terminal_width_drives_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "g.png", &gradient(40, 30));
    let renderer = AnsiRenderer::new(FixedWidth(20));

    let output = renderer.render_path(&path, &RenderOptions::default()).unwrap();
    assert_eq!(output.dimensions, Dimensions::new(20, 15));
    assert_eq!(output.lines.len(), 7);
    for line in &output.lines {
        assert_eq!(line.as_str().matches(FULL_BLOCK).count(), 20);
        assert_eq!(line.as_str().matches(RESET).count(), 1);
        assert!(line.as_str().ends_with(RESET));
    }
}

#[test]
fn max_width_caps_terminal_width() {
    let renderer = AnsiRenderer::new(FixedWidth(200));
    let grid = PixelGrid::from_fn(50, 50, |_, _| [0, 0, 0]);
    let options = RenderOptions { layout: LayoutPolicy::Terminal, max_width: Some(10) };

    let output = renderer.render_grid(&grid, &options).unwrap();
    assert_eq!(output.dimensions, Dimensions::new(10, 10));
}

#[test]
fn same_width_keeps_decoded_dimensions() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "odd.png", &gradient(13, 9));

    let output = AnsiRenderer::new(FixedWidth(13))
        .render_path(&path, &RenderOptions::default())
        .unwrap();
    assert_eq!(output.dimensions, Dimensions::new(13, 9));
    assert_eq!(output.lines.len(), 4);
}

#[test]
fn jpeg_input_is_supported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("photo.JPEG");
    gradient(32, 16).save_with_format(&path, image::ImageFormat::Jpeg).unwrap();

    let output = AnsiRenderer::new(FixedWidth(16))
        .render_path(&path, &RenderOptions::default())
        .unwrap();
    assert_eq!(output.dimensions, Dimensions::new(16, 8));
    assert_eq!(output.lines.len(), 4);
}

#[test]
fn gif_is_rejected_without_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    fs::write(&path, b"GIF89a").unwrap();

    let err = render_with_width(&path, 10).unwrap_err();
    assert!(matches!(
        err,
        AnsiError::UnsupportedFormat { ref extension, .. } if extension == "gif"
    ));
    assert!(err.to_string().contains("anim.gif"));
}

#[test]
fn zero_width_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "g.png", &gradient(4, 4));

    let err = render_with_width(&path, 0).unwrap_err();
    assert!(matches!(err, AnsiError::InvalidWidth { width: 0 }));
}

#[test]
fn narrow_width_on_wide_image_is_degenerate() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "strip.png", &gradient(64, 2));

    let err = render_with_width(&path, 8).unwrap_err();
    assert!(matches!(err, AnsiError::DegenerateHeight { width: 8, .. }));
}

#[test]
fn single_row_result_renders_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "strip.png", &gradient(8, 2));

    assert_eq!(render_with_width(&path, 4).unwrap(), "");
}

#[test]
fn errors_name_the_offending_path() {
    let err = render_with_width(Path::new("/nonexistent/dir/picture.png"), 10).unwrap_err();
    assert!(matches!(err, AnsiError::Open { .. }));
    assert!(err.to_string().contains("picture.png"));
}
