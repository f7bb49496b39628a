use std::io::{self, BufWriter, Write};

use crate::blocks::line::RenderLine;

/// Join lines into one string, each followed by a newline.
pub fn assemble(lines: &[RenderLine]) -> String {
    let capacity = lines.iter().map(|line| line.as_str().len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for line in lines {
        text.push_str(line.as_str());
        text.push('\n');
    }
    text
}

pub fn write_lines<W: Write>(lines: &[RenderLine], mut writer: W) -> io::Result<()> {
    for line in lines {
        writer.write_all(line.as_str().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

pub fn print_lines(lines: &[RenderLine]) -> io::Result<()> {
    let stdout = io::stdout();
    write_lines(lines, BufWriter::new(stdout.lock()))
}
