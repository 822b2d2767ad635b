//! Ingest pipeline: scraped records in, stored articles with candidates out.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyzer::{analyze_or_empty, SupplementalAnalyzer};
use crate::categorize::CategoryPolicy;
use crate::extract::PatternExtractor;
use crate::models::{LekdetConfig, ScrapedArticle};
use crate::store::ArticleStore;

/// Counts for one ingest run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Records received.
    pub scraped: usize,
    /// Articles created.
    pub saved: usize,
    /// Records whose url was already stored.
    pub duplicates: usize,
    /// Records with no category and no keyword hit.
    pub uncategorized: usize,
    /// Records the store rejected.
    pub failed: usize,
    /// Candidates attached across all saved articles.
    pub numbers: usize,
}

/// Categorizes, extracts and stores scraped articles.
#[derive(Default)]
pub struct Ingestor {
    extractor: PatternExtractor,
    policy: CategoryPolicy,
}

impl Ingestor {
    pub fn new(extractor: PatternExtractor, policy: CategoryPolicy) -> Self {
        Self { extractor, policy }
    }

    pub fn from_config(config: &LekdetConfig) -> Self {
        Self::new(
            PatternExtractor::new().with_max_candidates(config.extraction.max_candidates),
            CategoryPolicy::default(),
        )
    }

    /// Ingest `records` in order.
    ///
    /// A record that fails never stops the run; it is logged and counted.
    pub async fn ingest<S, A>(
        &self,
        store: &mut S,
        analyzer: &A,
        records: Vec<ScrapedArticle>,
        now: DateTime<Utc>,
    ) -> IngestReport
    where
        S: ArticleStore,
        A: SupplementalAnalyzer,
    {
        let mut report = IngestReport {
            scraped: records.len(),
            ..Default::default()
        };

        for record in records {
            if store.find_by_url(&record.url).is_some() {
                debug!("Skipping known article {}", record.url);
                report.duplicates += 1;
                continue;
            }

            let Some(category) = record
                .category
                .or_else(|| self.policy.categorize(&record.title, &record.body))
            else {
                debug!("No category for {}", record.url);
                report.uncategorized += 1;
                continue;
            };

            let candidates = self.extractor.extract_article(&record.title, &record.body);
            let direct = candidates.len();
            let (title, body) = (record.title.clone(), record.body.clone());
            let url = record.url.clone();

            let id = match store.create(record, category, candidates, now) {
                Ok(id) => id,
                Err(e) => {
                    warn!("Failed to store {}: {}", url, e);
                    report.failed += 1;
                    continue;
                }
            };
            report.saved += 1;
            report.numbers += direct;

            let extra = analyze_or_empty(analyzer, &title, &body).await;
            if extra.is_empty() {
                continue;
            }
            match store.attach_candidates(id, extra) {
                Ok(added) => report.numbers += added,
                Err(e) => warn!("Failed to attach analyzer numbers to {}: {}", url, e),
            }
        }

        info!(
            "Ingested {} of {} records ({} duplicates, {} uncategorized, {} failed), {} numbers",
            report.saved,
            report.scraped,
            report.duplicates,
            report.uncategorized,
            report.failed,
            report.numbers
        );
        report
    }
}
