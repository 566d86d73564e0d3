//! boxlayout - Rebuild words, lines, paragraphs and math blocks from glyph boxes
//!
//! Reads one box table per input (or the sidecar table of a page image),
//! runs the layout pipeline and writes a text or JSON report.

use anyhow::{Context, Result, bail};
use boxlayout_core::api::analyze_path;
use boxlayout_core::converter::{JsonConverter, TextConverter};
use boxlayout_core::input::resolve_table_path;
use boxlayout_core::layout::{BandMerge, LayoutParams};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

/// Output type for the report.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputType {
    /// Plain text summary (default)
    #[default]
    Text,
    /// JSON report
    Json,
}

/// Band merge strategy.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum BandMergeArg {
    /// Keep absorbing bands until none overlap
    Cascade,
    /// Join the first overlapping band only
    FirstMatch,
}

impl From<BandMergeArg> for BandMerge {
    fn from(arg: BandMergeArg) -> Self {
        match arg {
            BandMergeArg::Cascade => BandMerge::Cascade,
            BandMergeArg::FirstMatch => BandMerge::FirstMatch,
        }
    }
}

/// Rebuild the text layout of a page from the bounding boxes of its glyphs.
#[derive(Parser, Debug)]
#[command(name = "boxlayout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Box tables (.csv) or page images with a sidecar table
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Layout options ===
    /// JSON file with layout parameters; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Smallest gap between adjacent letters of one word
    #[arg(long = "min-gap", allow_hyphen_values = true)]
    min_gap: Option<i32>,

    /// Largest gap between adjacent letters of one word
    #[arg(long = "max-gap")]
    max_gap: Option<i32>,

    /// Line break threshold, relative to the mean word width
    #[arg(long = "line-gap-factor")]
    line_gap_factor: Option<f64>,

    /// How letters are merged into height bands
    #[arg(long = "band-merge", value_enum)]
    band_merge: Option<BandMergeArg>,

    /// Only union segments into final blocks they overlap horizontally
    #[arg(long = "match-by-overlap", action = ArgAction::SetTrue)]
    match_by_overlap: bool,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// List every band with its segments in text output
    #[arg(short = 'b', long = "show-bands", action = ArgAction::SetTrue)]
    show_bands: bool,
}

/// Infer output type from file extension.
fn infer_output_type(path: &str) -> Option<OutputType> {
    if path.to_lowercase().ends_with(".json") {
        Some(OutputType::Json)
    } else {
        None
    }
}

/// Build LayoutParams from the config file and command line overrides.
fn build_params(args: &Args) -> Result<LayoutParams> {
    let mut params = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LayoutParams::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => LayoutParams::default(),
    };

    if let Some(gap) = args.min_gap {
        params.min_adjacent_gap = gap;
    }
    if let Some(gap) = args.max_gap {
        params.max_adjacent_gap = gap;
    }
    if let Some(factor) = args.line_gap_factor {
        params.line_gap_factor = factor;
    }
    if let Some(mode) = args.band_merge {
        params.band_merge = mode.into();
    }
    if args.match_by_overlap {
        params.match_by_overlap = true;
    }

    params.validate().context("invalid layout parameters")?;
    Ok(params)
}

fn init_logging(debug: bool) -> Result<()> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")?;
    Ok(())
}

/// Box table behind an input path, which must exist. A page image itself
/// need not exist as long as its sidecar table does.
fn existing_table(path: &Path) -> Result<PathBuf> {
    let table = resolve_table_path(path);
    if !table.exists() {
        bail!(
            "box table not found for {}: {}",
            path.display(),
            table.display()
        );
    }
    Ok(table)
}

fn process_file<W: Write>(
    path: &Path,
    output: &mut W,
    args: &Args,
    params: &LayoutParams,
    output_type: OutputType,
) -> Result<()> {
    let analysis = analyze_path(path, params)
        .with_context(|| format!("failed to analyze {}", path.display()))?;
    let name = path.display().to_string();

    match output_type {
        OutputType::Text => {
            TextConverter::new(output, args.show_bands).receive_analysis(&name, &analysis)?
        }
        OutputType::Json => JsonConverter::new(output).receive_analysis(&name, &analysis)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let params = build_params(&args)?;
    debug!(?params, "layout parameters");

    // Determine output type (may be inferred from output filename)
    let output_type = if args.output_type == OutputType::Text && args.outfile != "-" {
        infer_output_type(&args.outfile).unwrap_or(args.output_type)
    } else {
        args.output_type
    };

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        existing_table(path)?;
        process_file(path, &mut output, &args, &params, output_type)?;
    }

    output.flush().context("failed to flush output")?;
    info!(files = args.files.len(), "done");
    Ok(())
}
