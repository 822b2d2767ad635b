//! Ingest command - load scraped article files into the store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use lekdet_core::{
    DisabledAnalyzer, IngestReport, Ingestor, MemoryStore, ScrapedArticle, SupplementalAnalyzer,
};

use crate::gemini::GeminiAnalyzer;

use super::GlobalOpts;

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// JSON files or glob pattern (each file holds one record or an array)
    #[arg(required = true)]
    input: String,

    /// Call the supplemental analyzer even if disabled in the config
    #[arg(long)]
    analyze: bool,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: IngestArgs, opts: &GlobalOpts<'_>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = opts.load_config()?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut records = Vec::new();
    let mut unreadable = 0;
    for path in &files {
        match read_records(path) {
            Ok(batch) => records.extend(batch),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                unreadable += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let mut store = opts.load_store()?;
    let ingestor = Ingestor::from_config(&config);

    let report = if args.analyze || config.analyzer.enabled {
        let analyzer = GeminiAnalyzer::from_config(&config.analyzer)?;
        if !analyzer.is_enabled() {
            warn!(
                "Analyzer requested but {} is not set",
                config.analyzer.api_key_env
            );
        }
        ingest_with(&ingestor, &mut store, &analyzer, records).await
    } else {
        ingest_with(&ingestor, &mut store, &DisabledAnalyzer, records).await
    };

    opts.save_store(&store)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} Ingested {} files in {:?}",
        style("✓").green(),
        files.len() - unreadable,
        start.elapsed()
    );
    println!(
        "   {} saved, {} duplicates, {} uncategorized, {} failed",
        style(report.saved).green(),
        report.duplicates,
        report.uncategorized,
        style(report.failed).red()
    );
    println!("   {} numbers extracted", report.numbers);
    if unreadable > 0 {
        println!("   {} unreadable files", style(unreadable).red());
    }

    Ok(())
}

async fn ingest_with<A: SupplementalAnalyzer>(
    ingestor: &Ingestor,
    store: &mut MemoryStore,
    analyzer: &A,
    records: Vec<ScrapedArticle>,
) -> IngestReport {
    ingestor.ingest(store, analyzer, records, Utc::now()).await
}

fn read_records(path: &Path) -> anyhow::Result<Vec<ScrapedArticle>> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let records = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(records)
}
