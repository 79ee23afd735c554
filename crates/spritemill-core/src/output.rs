//! Envelope output for stage results.
//!
//! Writes the uniform `{success, tool, …}` envelope as JSON, pretty-printed
//! by default so a host process or a human can read it off stdout.

use serde::Serialize;
use std::io::{self, Write};

/// A writer that serializes stage envelopes to JSON.
pub struct EnvelopeWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> EnvelopeWriter<W> {
    /// Create a new envelope writer.
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    /// Write one envelope, followed by a newline.
    pub fn write<T: Serialize>(&mut self, envelope: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, envelope).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, envelope).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
