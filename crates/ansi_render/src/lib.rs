mod blocks;
mod image_pipeline;
mod output;
mod terminal;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use blocks::{
    color::{ColorSample, RESET},
    line::{RenderLine, FULL_BLOCK},
    mapping::BlockMapper,
};
pub use image_pipeline::{
    grid::{Bounds, Dimensions, PixelGrid},
    loader::{load_image, ImageKind},
    resize::{resize_to_width, target_dimensions, LayoutPolicy},
};
pub use output::{assemble, write_lines};
pub use terminal::{FixedWidth, StdoutTerminal, TerminalSize};

#[derive(Debug, thiserror::Error)]
pub enum AnsiError {
    #[error("failed to query terminal size: {0}")]
    TerminalSize(#[source] io::Error),
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "unsupported image format {extension:?} for {} (only PNG or JPEG supported)",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid target width: {width}")]
    InvalidWidth { width: u32 },
    #[error(
        "target width {width} scales a {}x{} image to zero rows",
        .original.width,
        .original.height
    )]
    DegenerateHeight { width: u32, original: Dimensions },
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub layout: LayoutPolicy,
    /// Upper bound applied after the layout resolves a column count.
    pub max_width: Option<u32>,
}

impl RenderOptions {
    pub fn with_width(width: u32) -> Self {
        Self { layout: LayoutPolicy::FixedColumns(width), ..Self::default() }
    }
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub lines: Vec<RenderLine>,
    /// Size of the resampled image the lines were mapped from.
    pub dimensions: Dimensions,
}

impl RenderOutput {
    pub fn to_text(&self) -> String {
        assemble(&self.lines)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), AnsiError> {
        write_lines(&self.lines, writer).map_err(AnsiError::Output)
    }

    pub fn print(&self) -> Result<(), AnsiError> {
        output::print_lines(&self.lines).map_err(AnsiError::Output)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnsiRenderer<T = StdoutTerminal> {
    terminal: T,
}

impl<T: TerminalSize> AnsiRenderer<T> {
    pub fn new(terminal: T) -> Self {
        Self { terminal }
    }

    pub fn render_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: &RenderOptions,
    ) -> Result<RenderOutput, AnsiError> {
        let width = self.target_width(options)?;
        let grid = load_image(path.as_ref())?;
        render_at_width(&grid, width)
    }

    pub fn render_grid(
        &self,
        grid: &PixelGrid,
        options: &RenderOptions,
    ) -> Result<RenderOutput, AnsiError> {
        let width = self.target_width(options)?;
        render_at_width(grid, width)
    }

    fn target_width(&self, options: &RenderOptions) -> Result<u32, AnsiError> {
        let width = options.layout.resolve(&self.terminal)?;
        Ok(match options.max_width {
            Some(max) => width.min(max),
            None => width,
        })
    }
}

fn render_at_width(grid: &PixelGrid, width: u32) -> Result<RenderOutput, AnsiError> {
    if grid.is_empty() {
        return Err(AnsiError::EmptyImage { width: grid.width(), height: grid.height() });
    }

    let resized = resize_to_width(grid, width)?;
    let lines = BlockMapper::new().map(&resized);
    Ok(RenderOutput { lines, dimensions: resized.dimensions() })
}

/// Render `path` at the width of the terminal on standard output.
pub fn render<P: AsRef<Path>>(path: P) -> Result<String, AnsiError> {
    AnsiRenderer::new(StdoutTerminal)
        .render_path(path, &RenderOptions::default())
        .map(|out| out.to_text())
}

/// Render `path` at the terminal width and write it to standard output.
pub fn render_and_print<P: AsRef<Path>>(path: P) -> Result<(), AnsiError> {
    AnsiRenderer::new(StdoutTerminal).render_path(path, &RenderOptions::default())?.print()
}

/// Render `path` at `width` columns without consulting the terminal.
pub fn render_with_width<P: AsRef<Path>>(path: P, width: u32) -> Result<String, AnsiError> {
    AnsiRenderer::new(StdoutTerminal)
        .render_path(path, &RenderOptions::with_width(width))
        .map(|out| out.to_text())
}

pub fn print_with_width<P: AsRef<Path>>(path: P, width: u32) -> Result<(), AnsiError> {
    AnsiRenderer::new(StdoutTerminal).render_path(path, &RenderOptions::with_width(width))?.print()
}
