//! Subcommands and the helpers they share.

pub mod analyze;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod matches;
pub mod purge;
pub mod top;
pub mod upcoming;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use console::style;
use tracing::debug;

use lekdet_core::models::draw::parse_draws_json;
use lekdet_core::{LekdetConfig, LotteryDraw, MemoryStore};

/// Options shared by every subcommand.
pub struct GlobalOpts<'a> {
    pub config: Option<&'a str>,
    pub store: Option<&'a str>,
}

impl GlobalOpts<'_> {
    /// Configuration from `--config`, else the default file, else defaults.
    pub fn load_config(&self) -> anyhow::Result<LekdetConfig> {
        let path = config::config_path(self.config);
        if !(self.config.is_some() || path.exists()) {
            return Ok(LekdetConfig::default());
        }

        debug!("Loading config from {}", path.display());
        let config = LekdetConfig::from_file(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn store_path(&self) -> PathBuf {
        match self.store {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("lekdet")
                .join("store.json"),
        }
    }

    pub fn load_store(&self) -> anyhow::Result<MemoryStore> {
        let path = self.store_path();
        MemoryStore::load(&path).with_context(|| format!("Failed to load store {}", path.display()))
    }

    pub fn save_store(&self, store: &MemoryStore) -> anyhow::Result<()> {
        let path = self.store_path();
        store
            .save(&path)
            .with_context(|| format!("Failed to save store {}", path.display()))
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Load draws from a JSON array or a CSV file with `date,lastThree,firstPrize`.
pub fn load_draws(path: &Path) -> anyhow::Result<Vec<LotteryDraw>> {
    if !path.exists() {
        anyhow::bail!("Draws file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let draws = match extension.as_str() {
        "csv" => {
            let mut reader = csv::Reader::from_path(path)?;
            let mut draws = Vec::new();
            for (index, row) in reader.deserialize::<LotteryDraw>().enumerate() {
                let mut draw = row.with_context(|| format!("Bad row {} in {}", index + 1, path.display()))?;
                draw.validate()?;
                if draw.id == 0 {
                    draw.id = index as u64 + 1;
                }
                draws.push(draw);
            }
            draws
        }
        _ => parse_draws_json(&fs::read_to_string(path)?)?,
    };

    debug!("Loaded {} draws from {}", draws.len(), path.display());
    Ok(draws)
}

/// Print `content` or write it to `output`.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content.trim_end());
    }
    Ok(())
}

/// Render rows as CSV with a header.
pub fn csv_string<I, R>(header: &[&str], rows: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}
