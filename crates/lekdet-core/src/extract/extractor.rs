//! Pattern extractor folding the rule pipeline into scored candidates.

use std::collections::HashSet;

use tracing::trace;

use crate::models::{Candidate, ExtractionMethod, LotteryNumber};

use super::rules::{default_rules, CandidateRule, RuleHit, RuleKind};

/// Maximum candidates kept per document.
pub const MAX_CANDIDATES: usize = 10;

/// Candidates collected for one document.
///
/// A number is accepted once; later hits for the same number, from any rule,
/// are dropped. Nothing is accepted once `limit` candidates are held.
#[derive(Debug, Clone)]
pub struct CandidateAccumulator {
    seen: HashSet<LotteryNumber>,
    candidates: Vec<Candidate>,
    limit: usize,
}

impl CandidateAccumulator {
    pub fn new(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            candidates: Vec::new(),
            limit,
        }
    }

    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Offer one rule hit.
    pub fn offer(mut self, kind: RuleKind, hit: RuleHit) -> Self {
        if self.is_full() || !self.seen.insert(hit.number.clone()) {
            return self;
        }

        self.candidates.push(Candidate::new(
            hit.number,
            ExtractionMethod::Direct,
            format!("{}: {}", kind.label(), hit.detail),
            kind.confidence().into(),
        ));
        self
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}

/// Deterministic extractor applying the rules in priority order.
pub struct PatternExtractor {
    rules: Vec<Box<dyn CandidateRule>>,
    max_candidates: usize,
}

impl PatternExtractor {
    /// Create an extractor with the default rules and cap.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            max_candidates: MAX_CANDIDATES,
        }
    }

    /// Replace the rule list; order is priority.
    pub fn with_rules(mut self, rules: Vec<Box<dyn CandidateRule>>) -> Self {
        self.rules = rules;
        self
    }

    /// Set the per-document cap. Values above [`MAX_CANDIDATES`] are clamped.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.min(MAX_CANDIDATES);
        self
    }

    /// Extract candidates from free text.
    ///
    /// Output is in discovery order: rule priority, then position in text.
    pub fn extract(&self, text: &str) -> Vec<Candidate> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let accumulator = self.rules.iter().fold(
            CandidateAccumulator::new(self.max_candidates),
            |acc, rule| {
                if acc.is_full() {
                    return acc;
                }
                let kind = rule.kind();
                rule.find(text)
                    .into_iter()
                    .fold(acc, |acc, hit| acc.offer(kind, hit))
            },
        );

        trace!("Extracted {} candidates", accumulator.len());
        accumulator.into_candidates()
    }

    /// Extract from an article title and body.
    pub fn extract_article(&self, title: &str, body: &str) -> Vec<Candidate> {
        self.extract(&format!("{} {}", title, body))
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}
