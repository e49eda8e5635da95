use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single timestamped word produced by an ASR collaborator.
///
/// The core treats the word sequence as an immutable oracle: ordered by
/// non-decreasing `start_ms`, with `start_ms <= end_ms` per word, tokens
/// already lowercased. It is never validated, retried, or repaired here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimedWord {
    /// Normalized lowercase token text.
    pub text: String,
    /// Start offset in the source recording, milliseconds.
    pub start_ms: u64,
    /// End offset in the source recording, milliseconds.
    pub end_ms: u64,
}

impl TimedWord {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }
}

/// Read a timed-word transcript from a JSON array.
///
/// This is the serialized form used to hand transcripts between pipeline
/// stages and test fixtures.
pub fn words_from_json<R: Read>(reader: R) -> Result<Vec<TimedWord>> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_transcript_round_trips() {
        let words = vec![
            TimedWord::new("in", 0, 500),
            TimedWord::new("the", 500, 1000),
            TimedWord::new("beginning", 1000, 1500),
        ];
        let json = serde_json::to_string(&words).unwrap();
        let parsed = words_from_json(json.as_bytes()).unwrap();
        assert_eq!(parsed, words);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(words_from_json("not json".as_bytes()).is_err());
    }
}
