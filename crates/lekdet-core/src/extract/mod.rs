//! Number extraction from news text.

mod extractor;
pub mod normalize;
pub mod rules;

pub use extractor::{CandidateAccumulator, PatternExtractor, MAX_CANDIDATES};
pub use rules::{CandidateRule, RuleHit, RuleKind};
