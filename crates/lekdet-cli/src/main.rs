//! CLI for mining Thai news for lottery numbers.

mod commands;
mod gemini;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{analyze, config, extract, ingest, matches, purge, top, upcoming, GlobalOpts};

/// lekdet - Extract lottery numbers from Thai news and check them against draws
#[derive(Parser)]
#[command(name = "lekdet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the article store
    #[arg(short, long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract candidate numbers from text
    Extract(extract::ExtractArgs),

    /// Ingest scraped articles into the store
    Ingest(ingest::IngestArgs),

    /// Compare pre-draw windows with past draws
    Analyze(analyze::AnalyzeArgs),

    /// Rank numbers for the next draw
    Upcoming(upcoming::UpcomingArgs),

    /// Classify and record matches against draws
    Matches(matches::MatchesArgs),

    /// Show the most mentioned and most drawn numbers
    Top(top::TopArgs),

    /// Delete articles past the retention horizon
    Purge(purge::PurgeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let opts = GlobalOpts {
        config: cli.config.as_deref(),
        store: cli.store.as_deref(),
    };

    match cli.command {
        Commands::Extract(args) => extract::run(args, &opts).await,
        Commands::Ingest(args) => ingest::run(args, &opts).await,
        Commands::Analyze(args) => analyze::run(args, &opts).await,
        Commands::Upcoming(args) => upcoming::run(args, &opts).await,
        Commands::Matches(args) => matches::run(args, &opts).await,
        Commands::Top(args) => top::run(args, &opts).await,
        Commands::Purge(args) => purge::run(args, &opts).await,
        Commands::Config(args) => config::run(args, opts.config).await,
    }
}
