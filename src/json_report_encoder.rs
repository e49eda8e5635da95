use std::io::Write;

use crate::align::Alignment;
use crate::report_encoder::ReportEncoder;
use crate::{Error, Result};

/// A `ReportEncoder` that writes alignments as a single JSON array.
///
/// Design:
/// - We stream output directly to a `Write` implementation to avoid
///   buffering all alignments in memory.
/// - The encoder is stateful so we can emit a well-formed JSON array
///   incrementally.
///
/// Example output:
/// ```json
/// [
///   { "verse_key": "GEN_1:1", "start_word": 0, "end_word": 3, "score": 100, "estimated": false }
/// ]
/// ```
pub struct JsonReportEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Whether the next element will be the first element in the array.
    /// This lets us correctly place commas between elements.
    first: bool,

    /// Whether the encoder has been closed.
    /// Once closed, no further writes are allowed.
    closed: bool,
}

impl<W: Write> JsonReportEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    ///
    /// The JSON array is opened lazily on the first write or on close.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    /// Write the opening `[` of the JSON array if we have not already done so.
    ///
    /// Deferring the opening bracket means empty output still results in
    /// valid JSON (`[]`).
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> ReportEncoder for JsonReportEncoder<W> {
    /// Serialize a single alignment and append it to the JSON array.
    fn write_alignment(&mut self, alignment: &Alignment) -> Result<()> {
        if self.closed {
            return Err(Error::msg(
                "cannot write alignment: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        // Write a comma before every element except the first.
        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, alignment)?;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Finalize the JSON array and flush the underlying writer.
    ///
    /// This method is idempotent; after closing, no further alignments may
    /// be written.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Ensure we still output a valid JSON array even if no alignments
        // were written.
        self.start_if_needed()?;

        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
