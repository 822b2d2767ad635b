//! Upcoming command - rank the numbers in the window of the next draw.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;
use console::style;

use lekdet_core::{ArticleStore, DrawCalendar, UpcomingDraw, WindowJoiner};

use super::{csv_string, emit, load_draws, GlobalOpts, OutputFormat};

/// Arguments for the upcoming command.
#[derive(Args)]
pub struct UpcomingArgs {
    /// Draw date to project (default: next draw from the calendar)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Draws file whose dates override the day-of-month rule
    #[arg(short, long)]
    draws: Option<PathBuf>,

    /// Ranked numbers shown
    #[arg(short, long)]
    top: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: UpcomingArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let store = opts.load_store()?;
    let now = Utc::now();

    let draw_date = match args.date {
        Some(date) => date,
        None => {
            let mut calendar = DrawCalendar::new(config.window.draw_days.clone());
            if let Some(path) = &args.draws {
                calendar = calendar.with_scheduled(load_draws(path)?.into_iter().map(|d| d.draw_date));
            }
            calendar
                .next_draw_after(now)
                .ok_or_else(|| anyhow::anyhow!("No upcoming draw date; check window.draw_days"))?
        }
    };

    let joiner = WindowJoiner::new(config.window.window_days);
    let mut upcoming = joiner.analyze_upcoming(draw_date, now, store.articles());
    upcoming
        .ranked_candidates
        .truncate(args.top.unwrap_or(config.window.top_n));

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&upcoming)?,
        OutputFormat::Csv => csv_string(
            &["rank", "number", "frequency"],
            upcoming.ranked_candidates.iter().enumerate().map(|(i, c)| {
                [(i + 1).to_string(), c.number.to_string(), c.frequency.to_string()]
            }),
        )?,
        OutputFormat::Text => format_text(&upcoming),
    };

    emit(&output, args.output.as_deref())
}

fn format_text(upcoming: &UpcomingDraw) -> String {
    let mut output = format!(
        "Next draw: {}\nWindow: {} - {}  ({} news so far)\n\n",
        style(upcoming.draw_date).bold(),
        upcoming.window_start.date_naive(),
        upcoming.window_end.date_naive(),
        upcoming.news_count
    );

    if upcoming.ranked_candidates.is_empty() {
        output.push_str("No numbers in the window yet.\n");
    }
    for (i, c) in upcoming.ranked_candidates.iter().enumerate() {
        output.push_str(&format!("{:>3}. {}  x{}\n", i + 1, c.number, c.frequency));
    }

    output
}
