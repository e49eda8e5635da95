//! Library-level configuration for the alignment engine and span builder.
//!
//! These structs represent *library-level configuration*, not CLI flags
//! directly. The CLI is responsible for mapping user input into these types
//! so that:
//! - the library remains reusable outside of a CLI context
//! - other frontends (batch jobs, tests, services) can construct options
//!   programmatically

/// Options that control the alignment search.
#[derive(Debug, Clone)]
pub struct AlignOpts {
    /// How far the search window extends beyond the proportional estimate,
    /// as a percentage of the window's own size.
    ///
    /// 100 doubles the window on each side; noisy recordings benefit from
    /// values up to 300. The first verse always receives double the
    /// extension to absorb lead-in silence at the start of a recording.
    ///
    /// This is the dominant cost knob: the in-window search is quadratic in
    /// window size, so large extensions trade run time for drift tolerance.
    pub extension_percent: u32,
}

impl Default for AlignOpts {
    fn default() -> Self {
        Self {
            extension_percent: 100,
        }
    }
}

/// Options that control millisecond span construction.
#[derive(Debug, Clone)]
pub struct SpanOpts {
    /// Padding added after the last aligned word, milliseconds.
    ///
    /// Narrators trail off; a little tail keeps the final syllable intact.
    pub end_buffer_ms: u64,

    /// Spans shorter than this are treated as alignment anomalies and
    /// skipped, milliseconds.
    pub min_span_ms: u64,
}

impl Default for SpanOpts {
    fn default() -> Self {
        Self {
            end_buffer_ms: 500,
            min_span_ms: 100,
        }
    }
}
