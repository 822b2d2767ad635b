//! Data models shared by the extraction and matching engines.

pub mod article;
pub mod candidate;
pub mod config;
pub mod draw;

pub use article::{Article, NewsCategory, NewsSource, ScrapedArticle};
pub use candidate::{Candidate, ExtractionMethod, LotteryNumber};
pub use config::LekdetConfig;
pub use draw::LotteryDraw;
