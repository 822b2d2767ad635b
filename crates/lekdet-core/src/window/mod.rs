//! Pre-draw windowing: which news counted towards which draw.

pub mod calendar;
pub mod frequency;
pub mod joiner;
pub mod stats;

pub use calendar::DrawCalendar;
pub use frequency::FrequencyTable;
pub use joiner::{
    days_before, AttributionWindow, DrawAnalysis, RankedCandidate, UpcomingDraw, WindowJoiner,
    DEFAULT_WINDOW_DAYS,
};
pub use stats::{last_three_frequency, HistorySummary};
