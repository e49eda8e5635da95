use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use versealign::align::align_with_trace;
use versealign::json_report_encoder::JsonReportEncoder;
use versealign::logging;
use versealign::opts::AlignOpts;
use versealign::output_type::OutputType;
use versealign::reference::RefRange;
use versealign::report_encoder::ReportEncoder;
use versealign::score_report_encoder::{ScoreReportEncoder, write_low_score_report};
use versealign::source::VerseTable;
use versealign::verses::build_index;
use versealign::visualize::{DEFAULT_CONTEXT_SIZE, write_visualization};
use versealign::words::words_from_json;

fn main() -> Result<()> {
    logging::init();
    let params = Params::parse();

    let range = match &params.end_ref {
        Some(end_ref) => RefRange::between(&params.start_ref, end_ref)?,
        None => versealign::reference::parse(&params.start_ref)?,
    };

    let table = match params.source_type {
        SourceType::Flat => {
            let vref = params
                .vref_path
                .as_ref()
                .context("--vref is required for the flat source type")?;
            VerseTable::from_flat_files(vref, &params.bible_path)?
        }
        SourceType::Usfm => {
            if !params.bible_path.is_dir() {
                bail!(
                    "USFM source path is not a directory: '{}'",
                    params.bible_path.display()
                );
            }
            VerseTable::from_usfm_dir(&params.bible_path)?
        }
    };

    let verses = build_index(&range, &table)?;

    let transcript = File::open(&params.transcript_path).with_context(|| {
        format!(
            "failed to open transcript '{}'",
            params.transcript_path.display()
        )
    })?;
    let words = words_from_json(BufReader::new(transcript))?;

    let opts = AlignOpts {
        extension_percent: params.extension_percent,
    };
    let (alignments, traces) = align_with_trace(&verses, &words, &opts);

    let stdout = io::stdout();
    let writer = BufWriter::new(stdout.lock());

    let mut encoder: Box<dyn ReportEncoder> = match params.output_type {
        OutputType::Json => Box::new(JsonReportEncoder::new(writer)),
        OutputType::Scores => Box::new(ScoreReportEncoder::new(writer)),
    };
    for alignment in &alignments {
        encoder.write_alignment(alignment)?;
    }
    encoder.close()?;

    if let Some(path) = &params.visualization_path {
        let out = File::create(path)
            .with_context(|| format!("failed to create visualization '{}'", path.display()))?;
        write_visualization(BufWriter::new(out), &traces, &words, DEFAULT_CONTEXT_SIZE)?;
    }

    if let Some(path) = &params.low_score_report_path {
        let out = File::create(path)
            .with_context(|| format!("failed to create low-score report '{}'", path.display()))?;
        write_low_score_report(
            BufWriter::new(out),
            &alignments,
            params.low_score_threshold,
        )?;
    }

    Ok(())
}

/// Where verse text comes from.
#[derive(Debug, Clone, ValueEnum)]
enum SourceType {
    /// A verse-reference list file plus a parallel text file (eBible layout).
    Flat,

    /// A directory of USFM chapter documents.
    Usfm,
}

#[derive(Parser, Debug)]
#[command(name = "versealign")]
#[command(about = "Aligns scripture verses to a timestamped narration transcript")]
struct Params {
    /// Start reference, e.g. "gen 1:1" or "1 cor 16:1-17:1".
    #[arg(short = 's', long = "start-ref")]
    start_ref: String,

    /// End reference; defaults to the start reference's end.
    #[arg(short = 'e', long = "end-ref")]
    end_ref: Option<String>,

    /// Verse text location: a text file (flat) or a directory (usfm).
    #[arg(short = 'b', long = "bible")]
    bible_path: PathBuf,

    /// Verse-reference list file (required for the flat source type).
    #[arg(long = "vref")]
    vref_path: Option<PathBuf>,

    #[arg(long = "source-type", value_enum, default_value_t = SourceType::Flat)]
    source_type: SourceType,

    /// Timed-word transcript as a JSON array.
    #[arg(short = 't', long = "transcript")]
    transcript_path: PathBuf,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Json
    )]
    output_type: OutputType,

    /// Search window extension percentage.
    #[arg(long = "extension-percent", default_value_t = 100)]
    extension_percent: u32,

    /// Write the alignment visualization to this file.
    #[arg(long = "visualization")]
    visualization_path: Option<PathBuf>,

    /// Write the low-score review report to this file.
    #[arg(long = "low-score-report")]
    low_score_report_path: Option<PathBuf>,

    /// Scores below this value land in the low-score report.
    #[arg(long = "low-score-threshold", default_value_t = 90)]
    low_score_threshold: u8,
}
