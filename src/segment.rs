//! Millisecond span construction from word-index alignments.
//!
//! This is the downstream consumer of the alignment contract: word-index
//! ranges become `[start_ms, end_ms]` spans ready for audio slicing. Audio
//! itself is out of scope; callers hand spans to whatever cutter they use.
//!
//! Boundary and size violations here are warnings, not failures: the
//! affected verse is skipped and processing continues. Partial success is
//! the expected mode.

use serde::Serialize;
use tracing::warn;

use crate::align::Alignment;
use crate::opts::SpanOpts;
use crate::words::TimedWord;

/// The audio span assigned to one verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseSpan {
    pub verse_key: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Convert alignments into clamped millisecond spans.
///
/// `start_ms` is the start of the first aligned word; `end_ms` is the end of
/// the last aligned word plus `opts.end_buffer_ms`, clamped to
/// `[0, total_duration_ms]`. Alignments with out-of-range indices, empty
/// ranges, or spans shorter than `opts.min_span_ms` are skipped with a
/// warning.
pub fn build_spans(
    alignments: &[Alignment],
    words: &[TimedWord],
    total_duration_ms: u64,
    opts: &SpanOpts,
) -> Vec<VerseSpan> {
    let mut spans = Vec::with_capacity(alignments.len());

    for alignment in alignments {
        if alignment.start_word >= alignment.end_word || alignment.end_word > words.len() {
            warn!(
                verse_key = %alignment.verse_key,
                start_word = alignment.start_word,
                end_word = alignment.end_word,
                word_count = words.len(),
                "skipping verse with empty or out-of-range word span"
            );
            continue;
        }

        let start_ms = words[alignment.start_word].start_ms.min(total_duration_ms);
        let end_ms = (words[alignment.end_word - 1].end_ms + opts.end_buffer_ms)
            .min(total_duration_ms);

        if start_ms >= end_ms || end_ms - start_ms < opts.min_span_ms {
            warn!(
                verse_key = %alignment.verse_key,
                start_ms,
                end_ms,
                "skipping verse with degenerate span"
            );
            continue;
        }

        spans.push(VerseSpan {
            verse_key: alignment.verse_key.clone(),
            start_ms,
            end_ms,
        });
    }

    spans
}
