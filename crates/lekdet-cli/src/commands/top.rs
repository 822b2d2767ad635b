//! Top command - most mentioned numbers and most drawn last-three values.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use lekdet_core::window::last_three_frequency;
use lekdet_core::{ArticleStore, LotteryNumber};

use super::{csv_string, emit, load_draws, GlobalOpts, OutputFormat};

/// Arguments for the top command.
#[derive(Args)]
pub struct TopArgs {
    /// How many numbers to list
    #[arg(short, long)]
    limit: Option<usize>,

    /// Draws file; adds the most drawn last-three values
    #[arg(short, long)]
    draws: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopOutput {
    total_articles: usize,
    total_candidates: usize,
    mentioned: Vec<Ranked>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drawn: Option<Vec<Ranked>>,
}

#[derive(Serialize)]
struct Ranked {
    number: LotteryNumber,
    count: usize,
}

fn ranked(list: Vec<(LotteryNumber, usize)>) -> Vec<Ranked> {
    list.into_iter()
        .map(|(number, count)| Ranked { number, count })
        .collect()
}

pub async fn run(args: TopArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let store = opts.load_store()?;
    let limit = args.limit.unwrap_or(config.window.top_n);

    let drawn = match &args.draws {
        Some(path) => {
            let mut frequency = last_three_frequency(&load_draws(path)?);
            frequency.truncate(limit);
            Some(ranked(frequency))
        }
        None => None,
    };

    let top = TopOutput {
        total_articles: store.articles().len(),
        total_candidates: store.count_candidates(),
        mentioned: ranked(store.number_frequency(limit)),
        drawn,
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&top)?,
        OutputFormat::Csv => {
            let rows = top
                .mentioned
                .iter()
                .map(|r| ("mentioned", r))
                .chain(top.drawn.iter().flatten().map(|r| ("drawn", r)))
                .map(|(list, r)| [list.to_string(), r.number.to_string(), r.count.to_string()]);
            csv_string(&["list", "number", "count"], rows)?
        }
        OutputFormat::Text => format_text(&top),
    };

    emit(&output, args.output.as_deref())
}

fn format_text(top: &TopOutput) -> String {
    let mut output = format!(
        "{} articles, {} numbers\n\nMost mentioned:\n",
        top.total_articles, top.total_candidates
    );
    for (i, r) in top.mentioned.iter().enumerate() {
        output.push_str(&format!("{:>3}. {}  x{}\n", i + 1, r.number, r.count));
    }

    if let Some(drawn) = &top.drawn {
        output.push_str("\nMost drawn last three:\n");
        for (i, r) in drawn.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}  x{}\n", i + 1, r.number, r.count));
        }
    }

    output
}
