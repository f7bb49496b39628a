use std::fmt::{self, Write};

use super::color::{ColorSample, RESET};

/// Glyph drawn for every cell.
pub const FULL_BLOCK: char = '█';

// Longest foreground escape plus the three UTF-8 bytes of the glyph.
const MAX_CELL_BYTES: usize = "\x1b[38;2;255;255;255m".len() + 3;

/// One fully formatted output row, terminated by a single [`RESET`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderLine {
    text: String,
    glyphs: usize,
}

impl RenderLine {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub(crate) struct LineBuilder {
    text: String,
    glyphs: usize,
}

impl LineBuilder {
    pub fn with_columns(columns: u32) -> Self {
        let capacity = columns as usize * MAX_CELL_BYTES + RESET.len();
        Self { text: String::with_capacity(capacity), glyphs: 0 }
    }

    /// Color state carries over between cells, so every cell just switches the
    /// foreground and draws.
    pub fn push(&mut self, color: ColorSample) {
        // Formatting into a String cannot fail.
        let _ = write!(self.text, "{}{}", color.foreground(), FULL_BLOCK);
        self.glyphs += 1;
    }

    pub fn finish(mut self) -> RenderLine {
        self.text.push_str(RESET);
        RenderLine { text: self.text, glyphs: self.glyphs }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reset_is_appended_once() {
        let mut line = LineBuilder::with_columns(2);
        line.push(ColorSample::new(1, 2, 3));
        line.push(ColorSample::new(4, 5, 6));
        let line = line.finish();

        assert_eq!(line.as_str(), "\x1b[38;2;1;2;3m█\x1b[38;2;4;5;6m█\x1b[0m");
        assert_eq!(line.glyph_count(), 2);
        assert_eq!(line.as_str().matches(RESET).count(), 1);
    }

    #[test]
    fn empty_line_is_just_reset() {
        let line = LineBuilder::with_columns(0).finish();
        assert_eq!(line.into_string(), RESET);
    }
}
