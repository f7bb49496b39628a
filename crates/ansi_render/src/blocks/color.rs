use std::fmt;

/// Restores default terminal attributes.
pub const RESET: &str = "\x1b[0m";

/// 8-bit RGB color for one output cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSample {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Average two vertically adjacent 16-bit pixels down to 8 bits per channel.
    ///
    /// `(a + b) / 2 / 256` folds into a single truncating `/ 512`.
    pub fn average(top: [u16; 3], bottom: [u16; 3]) -> Self {
        let channel = |i: usize| ((u32::from(top[i]) + u32::from(bottom[i])) / 512) as u8;
        Self::new(channel(0), channel(1), channel(2))
    }

    /// Truecolor foreground escape, `ESC[38;2;R;G;Bm`.
    pub fn foreground(self) -> Foreground {
        Foreground(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Foreground(ColorSample);

impl fmt::Display for Foreground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ColorSample { r, g, b } = self.0;
        write!(f, "\x1b[38;2;{r};{g};{b}m")
    }
}
