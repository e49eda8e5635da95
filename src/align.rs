//! The alignment engine.
//!
//! Maps an ordered verse sequence onto an ordered, imperfect, timestamped
//! word sequence. Verse lengths and reading speed are not uniform, so a
//! naive proportional split is unreliable; a full edit-distance pass over
//! the whole transcript is unnecessary because verses are read in order.
//! The strategy here is a position-predicted, locally-refined sliding
//! window search:
//!
//! 1. Estimate each verse's word range proportionally from its share of the
//!    total verse character count.
//! 2. Extend the estimate outward into a search window (configurable, with
//!    extra slack for the first verse to absorb lead-in silence).
//! 3. Exhaustively score every (start, end) word pair inside the window
//!    against the normalized verse text and keep the best.
//! 4. When nothing scores above zero, fall back to the proportional
//!    estimate with score 0 — a soft failure surfaced through the
//!    `estimated` flag, never an error.
//!
//! The per-verse loop is inherently sequential: the cumulative character
//! counter that positions verse *i+1* depends on verse *i* having been
//! processed. Independent runs (one per chapter or book) share no state and
//! can be parallelized freely by callers.
//!
//! The engine does not force verse ranges to be non-overlapping or
//! monotonic across verses; each verse's search is independent within its
//! window, and downstream consumers use the score and `estimated` fields to
//! judge quality.

use serde::Serialize;
use tracing::debug;

use crate::opts::AlignOpts;
use crate::similarity;
use crate::verses::VerseEntry;
use crate::words::TimedWord;

/// The alignment of one verse to a contiguous word range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    /// Canonical verse key this alignment belongs to.
    pub verse_key: String,
    /// First aligned word index.
    pub start_word: usize,
    /// One past the last aligned word index.
    pub end_word: usize,
    /// Similarity between the aligned span and the verse text, 0–100.
    pub score: u8,
    /// True when no candidate scored above zero and the range is the raw
    /// proportional estimate rather than a match.
    pub estimated: bool,
}

/// Per-verse search diagnostics, kept alongside the alignment for reporting
/// and visualization. Not part of the alignment contract.
#[derive(Debug, Clone, Serialize)]
pub struct VerseTrace {
    pub verse_key: String,
    /// Normalized verse text the span was scored against.
    pub verse_text: String,
    pub expected_start: usize,
    pub expected_end: usize,
    pub window_start: usize,
    pub window_end: usize,
    pub best_start: usize,
    pub best_end: usize,
    pub score: u8,
}

/// Align each verse to its best-matching word range.
///
/// Deterministic: identical inputs always produce identical output. An
/// empty `words` sequence is a caller precondition violation; the engine
/// degrades to all-estimated empty ranges rather than panicking.
pub fn align(verses: &[VerseEntry], words: &[TimedWord], opts: &AlignOpts) -> Vec<Alignment> {
    align_with_trace(verses, words, opts).0
}

/// Like [`align`], additionally returning per-verse search diagnostics.
pub fn align_with_trace(
    verses: &[VerseEntry],
    words: &[TimedWord],
    opts: &AlignOpts,
) -> (Vec<Alignment>, Vec<VerseTrace>) {
    let total_words = words.len();
    let normalized: Vec<String> = verses
        .iter()
        .map(|verse| similarity::normalize(&verse.text))
        .collect();
    let total_chars: usize = normalized.iter().map(|text| text.chars().count()).sum();

    debug!(
        verse_count = verses.len(),
        total_words,
        total_chars,
        extension_percent = opts.extension_percent,
        "starting alignment"
    );

    let mut alignments = Vec::with_capacity(verses.len());
    let mut traces = Vec::with_capacity(verses.len());
    let mut cumulative_chars = 0usize;

    for (verse_index, verse) in verses.iter().enumerate() {
        let verse_text = &normalized[verse_index];
        let verse_chars = verse_text.chars().count();

        // Proportional estimate assuming uniform reading speed.
        let (expected_start, expected_end) = if total_chars == 0 {
            (0, 0)
        } else {
            let start_ratio = cumulative_chars as f64 / total_chars as f64;
            let end_ratio = (cumulative_chars + verse_chars) as f64 / total_chars as f64;
            (
                (start_ratio * total_words as f64) as usize,
                (end_ratio * total_words as f64) as usize,
            )
        };

        let window_size = expected_end.saturating_sub(expected_start);
        let mut extension = window_size * opts.extension_percent as usize / 100;
        if verse_index == 0 {
            // Recordings open with announcements and silence; give the first
            // verse twice the slack.
            extension *= 2;
        }

        let mut window_start = expected_start.saturating_sub(extension);
        let mut window_end = (expected_end + extension).min(total_words);

        // When the window touches an array boundary, reallocate the excess
        // to the opposite side so the width is preserved where possible.
        if window_start == 0 {
            window_end = (window_end + expected_start).min(total_words);
        }
        if window_end == total_words {
            window_start = window_start.saturating_sub(window_end - expected_end);
        }

        let mut best_score = 0u8;
        let mut best_start = window_start;
        let mut best_end = (window_start + window_size).min(window_end);

        for start in window_start..window_end {
            // Build the candidate span incrementally so each additional end
            // index costs one push, not a re-join.
            let mut candidate = String::new();
            for end in (start + 1)..=window_end {
                if !candidate.is_empty() {
                    candidate.push(' ');
                }
                candidate.push_str(&words[end - 1].text);

                let score = similarity::ratio(&candidate, verse_text);
                if score > best_score {
                    best_score = score;
                    best_start = start;
                    best_end = end;
                }
            }
        }

        let estimated = best_score == 0;
        if estimated {
            // Degenerate window (or nothing in common at all): fall back to
            // the proportional estimate. Soft failure, surfaced via score.
            best_start = expected_start.min(total_words);
            best_end = expected_end.min(total_words).max(best_start);
        }

        debug!(
            verse_key = %verse.key,
            expected_start,
            expected_end,
            window_start,
            window_end,
            best_start,
            best_end,
            score = best_score,
            estimated,
            "aligned verse"
        );

        alignments.push(Alignment {
            verse_key: verse.key.clone(),
            start_word: best_start,
            end_word: best_end,
            score: best_score,
            estimated,
        });
        traces.push(VerseTrace {
            verse_key: verse.key.clone(),
            verse_text: verse_text.clone(),
            expected_start,
            expected_end,
            window_start,
            window_end,
            best_start,
            best_end,
            score: best_score,
        });

        cumulative_chars += verse_chars;
    }

    (alignments, traces)
}
