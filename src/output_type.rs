/// The supported output formats for encoded alignment records.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of output formats
///   across the CLI and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps format
///   selection explicit and discoverable.
///
/// Integration notes:
/// - `ValueEnum` (under the `cli` feature) allows this enum to be used
///   directly as a CLI flag with `clap`.
/// - Each variant maps to a concrete `ReportEncoder` implementation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Output alignments as a JSON array.
    Json,

    /// Output one `"<verseKey>: <score>"` line per verse.
    Scores,
}
