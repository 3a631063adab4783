//! ANSI terminal implementation of the render sink.

use std::io::{self, Write};

use pi_delivery::RenderSink;

/// Renders to any [`Write`] using ANSI cursor positioning.
///
/// Column moves use the cursor-horizontal-absolute sequence (`CSI n G`,
/// 1-based on the wire, zero-based at the trait boundary). Every operation
/// flushes so digits appear as they arrive.
pub struct AnsiSink<W> {
    out: W,
}

impl<W: Write> AnsiSink<W> {
    /// Wrap an output stream.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSink for AnsiSink<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn move_to_column(&mut self, column: usize) -> io::Result<()> {
        write!(self.out, "\x1b[{}G", column + 1)?;
        self.out.flush()
    }
}
