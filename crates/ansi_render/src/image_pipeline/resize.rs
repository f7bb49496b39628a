use image::imageops::{self, FilterType};
use log::debug;

use super::grid::{Dimensions, PixelGrid};
use crate::terminal::TerminalSize;
use crate::AnsiError;

/// Filter used for every resize. Cubic resampling keeps small terminal widths
/// from aliasing the way nearest-neighbour sampling would.
pub const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Where the output column count comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutPolicy {
    /// Ask the terminal size provider for its current width.
    #[default]
    Terminal,
    /// Use a fixed column count; the terminal is never queried.
    FixedColumns(u32),
}

impl LayoutPolicy {
    pub fn resolve<T: TerminalSize + ?Sized>(&self, terminal: &T) -> Result<u32, AnsiError> {
        match *self {
            LayoutPolicy::Terminal => terminal.columns(),
            LayoutPolicy::FixedColumns(columns) => Ok(columns),
        }
    }
}

/// Dimensions of `source` scaled to `target_width` columns, preserving the
/// aspect ratio with a floored height.
pub fn target_dimensions(source: Dimensions, target_width: u32) -> Result<Dimensions, AnsiError> {
    if target_width == 0 {
        return Err(AnsiError::InvalidWidth { width: target_width });
    }

    if source.is_empty() {
        return Err(AnsiError::EmptyImage { width: source.width, height: source.height });
    }

    let height = u64::from(source.height) * u64::from(target_width) / u64::from(source.width);
    if height == 0 {
        return Err(AnsiError::DegenerateHeight { width: target_width, original: source });
    }

    let height =
        u32::try_from(height).map_err(|_| AnsiError::InvalidWidth { width: target_width })?;
    Ok(Dimensions::new(target_width, height))
}

pub fn resize_to_width(grid: &PixelGrid, target_width: u32) -> Result<PixelGrid, AnsiError> {
    let source = grid.dimensions();
    let target = target_dimensions(source, target_width)?;

    if target == source {
        debug!("image already {}x{}, skipping resample", source.width, source.height);
        return Ok(grid.clone());
    }

    debug!(
        "resizing {}x{} to {}x{}",
        source.width, source.height, target.width, target.height
    );
    let resized = imageops::resize(grid.buffer(), target.width, target.height, RESAMPLE_FILTER);
    Ok(PixelGrid::new(resized))
}
