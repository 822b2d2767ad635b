//! Core library for Thai news lottery-number mining.
//!
//! This crate provides:
//! - Rule-based extraction of 3-digit numbers from Thai news text (plates,
//!   house numbers, kilometer markers, dates, ages, casualty counts, flights)
//! - The supplemental analyzer contract and reply validation
//! - Keyword categorization of articles
//! - Pre-draw window joining of articles to lottery draws, with frequency
//!   ranking and hit statistics
//! - Exact and partial match classification
//! - An article store with JSON snapshots and the ingest pipeline

pub mod analyzer;
pub mod categorize;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod matching;
pub mod models;
pub mod store;
pub mod window;

pub use analyzer::{analyze_or_empty, AnalyzedNumber, DisabledAnalyzer, SupplementalAnalyzer};
pub use categorize::CategoryPolicy;
pub use error::{AnalyzerError, LekdetError, Result, StoreError};
pub use extract::{PatternExtractor, MAX_CANDIDATES};
pub use ingest::{IngestReport, Ingestor};
pub use matching::{collect_matches, record_matches, Match, MatchKind, MatchRecorder, MatchSummary};
pub use models::{
    Article, Candidate, ExtractionMethod, LekdetConfig, LotteryDraw, LotteryNumber, NewsCategory,
    NewsSource, ScrapedArticle,
};
pub use store::{retention_cutoff, ArticleStore, MemoryStore, PurgeReport};
pub use window::{DrawAnalysis, DrawCalendar, HistorySummary, UpcomingDraw, WindowJoiner};
