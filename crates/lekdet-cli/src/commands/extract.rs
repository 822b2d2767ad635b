//! Extract command - candidate numbers from a piece of text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use lekdet_core::{Candidate, PatternExtractor};

use super::{csv_string, emit, GlobalOpts, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Text to analyse instead of a file
    #[arg(short, long, conflicts_with = "input")]
    text: Option<String>,

    /// Article title prepended to the text
    #[arg(long)]
    title: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Override the per-article candidate cap
    #[arg(long)]
    max_candidates: Option<usize>,
}

pub async fn run(args: ExtractArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let config = opts.load_config()?;

    let body = match (&args.text, &args.input) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let extractor = PatternExtractor::new().with_max_candidates(
        args.max_candidates
            .unwrap_or(config.extraction.max_candidates),
    );
    let candidates = extractor.extract_article(args.title.as_deref().unwrap_or(""), &body);
    info!("Found {} candidates", candidates.len());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&candidates)?,
        OutputFormat::Csv => format_csv(&candidates)?,
        OutputFormat::Text => format_text(&candidates),
    };

    emit(&output, args.output.as_deref())
}

fn format_csv(candidates: &[Candidate]) -> anyhow::Result<String> {
    csv_string(
        &["number", "method", "confidence", "reasoning"],
        candidates.iter().map(|c| {
            [
                c.number.to_string(),
                c.method.to_string(),
                c.confidence.to_string(),
                c.reasoning.clone(),
            ]
        }),
    )
}

fn format_text(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "No numbers found.".to_string();
    }

    candidates
        .iter()
        .map(|c| format!("{}  {:>3}%  {}", c.number, c.confidence, c.reasoning))
        .collect::<Vec<_>>()
        .join("\n")
}
