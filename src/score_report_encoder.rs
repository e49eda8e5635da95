use std::io::Write;

use crate::align::Alignment;
use crate::report_encoder::ReportEncoder;
use crate::{Error, Result};

/// A `ReportEncoder` that writes one `"<verseKey>: <score>"` line per verse.
///
/// This is the artifact reviewed after a batch run to spot verses whose
/// alignment quality needs manual attention.
pub struct ScoreReportEncoder<W: Write> {
    w: W,
    closed: bool,
}

impl<W: Write> ScoreReportEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> ReportEncoder for ScoreReportEncoder<W> {
    fn write_alignment(&mut self, alignment: &Alignment) -> Result<()> {
        if self.closed {
            return Err(Error::msg(
                "cannot write alignment: encoder is already closed",
            ));
        }

        writeln!(&mut self.w, "{}: {}", alignment.verse_key, alignment.score)?;
        self.w.flush()?;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}

/// Write the low-score review report: a header plus one line per verse
/// scoring below `threshold`.
pub fn write_low_score_report<W: Write>(
    mut w: W,
    alignments: &[Alignment],
    threshold: u8,
) -> Result<()> {
    writeln!(w, "Verses with scores below {threshold}:")?;
    writeln!(w)?;
    for alignment in alignments {
        if alignment.score < threshold {
            writeln!(w, "{}: {}", alignment.verse_key, alignment.score)?;
        }
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(key: &str, score: u8) -> Alignment {
        Alignment {
            verse_key: key.to_string(),
            start_word: 0,
            end_word: 1,
            score,
            estimated: score == 0,
        }
    }

    #[test]
    fn writes_one_line_per_verse() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = ScoreReportEncoder::new(&mut out);
        enc.write_alignment(&aligned("GEN_1:1", 100))?;
        enc.write_alignment(&aligned("GEN_1:2", 73))?;
        enc.close()?;

        assert_eq!(std::str::from_utf8(&out)?, "GEN_1:1: 100\nGEN_1:2: 73\n");
        Ok(())
    }

    #[test]
    fn write_after_close_errors() {
        let mut out = Vec::new();
        let mut enc = ScoreReportEncoder::new(&mut out);
        enc.close().unwrap();
        assert!(enc.write_alignment(&aligned("GEN_1:1", 1)).is_err());
    }

    #[test]
    fn low_score_report_filters_by_threshold() -> anyhow::Result<()> {
        let alignments = vec![
            aligned("GEN_1:1", 100),
            aligned("GEN_1:2", 42),
            aligned("GEN_1:3", 89),
        ];
        let mut out = Vec::new();
        write_low_score_report(&mut out, &alignments, 90)?;

        let report = std::str::from_utf8(&out)?;
        assert!(report.starts_with("Verses with scores below 90:\n\n"));
        assert!(report.contains("GEN_1:2: 42\n"));
        assert!(report.contains("GEN_1:3: 89\n"));
        assert!(!report.contains("GEN_1:1"));
        Ok(())
    }
}
