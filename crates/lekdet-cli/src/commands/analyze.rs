//! Analyze command - pre-draw windows against historical draws.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use lekdet_core::{ArticleStore, DrawAnalysis, HistorySummary, WindowJoiner};

use super::{csv_string, emit, load_draws, GlobalOpts, OutputFormat};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Draws file (JSON array or CSV with date,lastThree,firstPrize)
    #[arg(short, long, required = true)]
    draws: PathBuf,

    /// Number of most recent draws to analyse
    #[arg(short, long)]
    limit: Option<usize>,

    /// Analyse every draw in the file
    #[arg(long, conflicts_with = "limit")]
    all: bool,

    /// Ranked numbers shown per draw
    #[arg(short, long)]
    top: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    summary: &'a HistorySummary,
    draws: &'a [DrawAnalysis],
}

pub async fn run(args: AnalyzeArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let draws = load_draws(&args.draws)?;
    let store = opts.load_store()?;

    let limit = if args.all {
        None
    } else {
        Some(args.limit.unwrap_or(config.window.history_draws))
    };
    let top = args.top.unwrap_or(config.window.top_n);

    let joiner = WindowJoiner::new(config.window.window_days);
    let mut analyses = joiner.analyze_history(&draws, store.articles(), limit);
    let summary = HistorySummary::from_analyses(&analyses);
    info!(
        "Analysed {} draws, {} hits",
        summary.draws, summary.hits
    );

    let output = match args.format {
        OutputFormat::Json => {
            for analysis in &mut analyses {
                analysis.ranked_candidates.truncate(top);
            }
            serde_json::to_string_pretty(&AnalyzeOutput {
                summary: &summary,
                draws: &analyses,
            })?
        }
        OutputFormat::Csv => format_csv(&analyses, top)?,
        OutputFormat::Text => format_text(&analyses, &summary, top),
    };

    emit(&output, args.output.as_deref())
}

fn top_numbers(analysis: &DrawAnalysis, top: usize) -> String {
    analysis
        .top(top)
        .iter()
        .map(|c| format!("{}({})", c.number, c.frequency))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_csv(analyses: &[DrawAnalysis], top: usize) -> anyhow::Result<String> {
    csv_string(
        &[
            "draw_date",
            "last_three",
            "news_count",
            "candidates",
            "has_match",
            "match_rank",
            "top_numbers",
        ],
        analyses.iter().map(|a| {
            [
                a.draw_date.to_string(),
                a.last_three.to_string(),
                a.news_count.to_string(),
                a.ranked_candidates.len().to_string(),
                a.has_match.to_string(),
                a.match_rank().map(|r| r.to_string()).unwrap_or_default(),
                top_numbers(a, top),
            ]
        }),
    )
}

fn format_text(analyses: &[DrawAnalysis], summary: &HistorySummary, top: usize) -> String {
    let mut output = String::new();

    for analysis in analyses {
        let verdict = match analysis.match_rank() {
            Some(rank) => style(format!("hit #{}", rank)).green().to_string(),
            None => style("miss".to_string()).dim().to_string(),
        };
        output.push_str(&format!(
            "{}  {}  {:>3} news  {}\n",
            analysis.draw_date, analysis.last_three, analysis.news_count, verdict
        ));
        if !analysis.ranked_candidates.is_empty() {
            output.push_str(&format!("    {}\n", top_numbers(analysis, top)));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Draws: {}  with news: {}  hits: {}  match rate: {:.1}%\n",
        summary.draws, summary.draws_with_news, summary.hits, summary.match_rate
    ));
    if let Some(rank) = summary.mean_hit_rank {
        output.push_str(&format!("Mean hit rank: {:.1}\n", rank));
    }

    output
}
