use log::debug;

use super::color::ColorSample;
use super::line::{LineBuilder, RenderLine};
use crate::image_pipeline::grid::PixelGrid;

/// Turns pairs of pixel rows into colored full-block lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockMapper;

impl BlockMapper {
    pub fn new() -> Self {
        Self
    }

    /// One line per two source rows. A trailing odd row is dropped, so grids
    /// shorter than two rows produce nothing.
    pub fn map(&self, grid: &PixelGrid) -> Vec<RenderLine> {
        let bounds = grid.bounds();
        let mut lines = Vec::with_capacity((bounds.height() / 2) as usize);

        for y in (bounds.min_y..bounds.max_y.saturating_sub(1)).step_by(2) {
            let mut line = LineBuilder::with_columns(bounds.width());
            for x in bounds.columns() {
                line.push(ColorSample::average(grid.rgb(x, y), grid.rgb(x, y + 1)));
            }
            lines.push(line.finish());
        }

        debug!("mapped {}x{} grid to {} lines", bounds.width(), bounds.height(), lines.len());
        lines
    }
}
