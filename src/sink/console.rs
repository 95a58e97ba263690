use super::{Sink, SinkError};
use std::io::Write;

/// Writes rendered text to standard output.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
