//! # Terminal Renderer
//!
//! Plain line output for the terminal front end. One line per display update:
//!
//! ```text
//! [Light] 12*3 = …
//! [Light] = 36
//! ```

use anyhow::Result;
use std::io::Write;

pub struct TerminalRenderer<W: Write> {
    writer: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Print the display pair tagged with the theme label
    pub fn render_display(
        &mut self,
        theme_label: &str,
        expression: &str,
        result: &str,
    ) -> Result<()> {
        if expression.is_empty() {
            writeln!(self.writer, "[{theme_label}] = {result}")?;
        } else {
            writeln!(self.writer, "[{theme_label}] {expression} = {result}")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Print a front-end message that is not part of the display
    pub fn render_message(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "! {message}")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
