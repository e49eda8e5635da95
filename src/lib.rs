//! `versealign` — locate the audio span for each scripture verse inside a
//! long, continuously-recorded narration.
//!
//! This crate provides:
//! - Scripture reference parsing ("1 Cor 16:1-17:1" → canonical coordinates)
//! - Verse index construction over pluggable verse-text sources
//! - A position-predicted, fuzzy-windowed alignment engine mapping verses
//!   onto a timestamped word transcript
//! - Segment building (word-index ranges → millisecond spans)
//! - Pluggable report encoders (JSON, score lines) and a debugging
//!   visualization
//!
//! The library is designed to be used by both CLI tools and batch pipelines,
//! with an emphasis on a pure, deterministic core and minimal surprises.
//! Transcription itself is out of scope: callers supply the timestamped word
//! sequence produced by whatever recognizer they use.

// Crate-wide error and result types.
pub mod error;
pub use error::{Error, Result};

// Static scripture metadata and reference parsing.
pub mod books;
pub mod reference;

// Verse-text sources and index construction.
pub mod source;
pub mod verses;

// Transcript word data structures.
pub mod words;

// The alignment core: text normalization, similarity scoring, windowed search.
pub mod align;
pub mod opts;
pub mod similarity;

// Downstream of alignment: millisecond span building.
pub mod segment;

// Report selection and encoder interfaces.
pub mod output_type;
pub mod report_encoder;

// Report encoders that serialize alignments into various formats.
pub mod json_report_encoder;
pub mod score_report_encoder;

// Human-readable alignment visualization for debugging.
pub mod visualize;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;
