//! Matches command - classify stored candidates against draws and record hits.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use lekdet_core::matching::RecordReport;
use lekdet_core::{
    collect_matches, record_matches, ArticleStore, Match, MatchSummary, WindowJoiner,
};

use super::{csv_string, emit, load_draws, GlobalOpts, OutputFormat};

/// Arguments for the matches command.
#[derive(Args)]
pub struct MatchesArgs {
    /// Draws file (JSON array or CSV with date,lastThree,firstPrize)
    #[arg(short, long, required = true)]
    draws: PathBuf,

    /// Classify only, do not write to the store
    #[arg(long)]
    dry_run: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct MatchesOutput<'a> {
    summary: &'a MatchSummary,
    recorded: &'a RecordReport,
    matches: &'a [Match],
}

pub async fn run(args: MatchesArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let draws = load_draws(&args.draws)?;
    let mut store = opts.load_store()?;

    let joiner = WindowJoiner::new(config.window.window_days);
    let found = collect_matches(&joiner, &draws, store.articles());

    let recorded = if args.dry_run {
        RecordReport::default()
    } else {
        let report = record_matches(&mut store, &found);
        opts.save_store(&store)?;
        report
    };

    let summary = MatchSummary::new(store.matches(), store.count_candidates());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&MatchesOutput {
            summary: &summary,
            recorded: &recorded,
            matches: &found,
        })?,
        OutputFormat::Csv => csv_string(
            &["draw_date", "last_three", "number", "kind", "article_id", "published_at"],
            found.iter().map(|m| {
                [
                    m.draw_date.to_string(),
                    m.last_three.to_string(),
                    m.candidate_number.to_string(),
                    m.kind.to_string(),
                    m.article_id.to_string(),
                    m.article_published_at.to_rfc3339(),
                ]
            }),
        )?,
        OutputFormat::Text => format_text(&found, &recorded, &summary, args.dry_run),
    };

    emit(&output, args.output.as_deref())
}

fn format_text(found: &[Match], recorded: &RecordReport, summary: &MatchSummary, dry_run: bool) -> String {
    let mut output = String::new();

    for m in found {
        output.push_str(&format!(
            "{}  {}  {} {:<7}  article {}\n",
            m.draw_date, m.last_three, m.candidate_number, m.kind.to_string(), m.article_id
        ));
    }
    if found.is_empty() {
        output.push_str("No matches.\n");
    }

    output.push('\n');
    if !dry_run {
        output.push_str(&format!(
            "{} Recorded {} new matches ({} already known, {} failed)\n",
            style("✓").green(),
            recorded.recorded,
            recorded.duplicates,
            recorded.failed
        ));
    }
    output.push_str(&format!(
        "Stored matches: {} exact, {} partial; accuracy {:.2}%\n",
        summary.exact_matches, summary.partial_matches, summary.accuracy
    ));

    output
}
