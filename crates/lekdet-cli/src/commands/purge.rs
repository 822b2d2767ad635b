//! Purge command - drop articles past the retention horizon.

use chrono::Utc;
use clap::Args;
use console::style;

use lekdet_core::{retention_cutoff, ArticleStore};

use super::GlobalOpts;

/// Arguments for the purge command.
#[derive(Args)]
pub struct PurgeArgs {
    /// Retention in days (default: retention.retention_days)
    #[arg(long)]
    days: Option<u32>,
}

pub async fn run(args: PurgeArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let config = opts.load_config()?;
    let mut store = opts.load_store()?;

    let days = args.days.unwrap_or(config.retention.retention_days);
    let cutoff = retention_cutoff(Utc::now(), days);
    let report = store.purge_before(cutoff);
    opts.save_store(&store)?;

    println!(
        "{} Purged {} articles, {} numbers and {} matches ingested before {}",
        style("✓").green(),
        report.articles,
        report.candidates,
        report.matches,
        cutoff.format("%Y-%m-%d %H:%M")
    );

    Ok(())
}
