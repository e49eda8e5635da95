use crate::align::Alignment;
use crate::error::Result;

/// A streaming sink for alignment records.
///
/// Encoders receive alignments one at a time, in verse order, and must be
/// closed once all records are written.
pub trait ReportEncoder {
    fn write_alignment(&mut self, alignment: &Alignment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
