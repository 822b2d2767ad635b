//! End-to-end: ingest articles, then join them to a draw.

use chrono::{DateTime, TimeZone, Utc};
use lekdet_core::{
    collect_matches, ArticleStore, Candidate, DisabledAnalyzer, ExtractionMethod, HistorySummary,
    Ingestor, LotteryDraw, LotteryNumber, MatchKind, MemoryStore, NewsCategory, NewsSource,
    ScrapedArticle, WindowJoiner,
};
use pretty_assertions::assert_eq;

fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()
}

fn number(s: &str) -> LotteryNumber {
    LotteryNumber::parse(s).unwrap()
}

fn store_with(articles: &[(&str, DateTime<Utc>, &str)]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for (url, published_at, mentioned) in articles {
        let scraped = ScrapedArticle {
            title: format!("ข่าว {}", url),
            body: String::new(),
            url: url.to_string(),
            image_url: None,
            published_at: *published_at,
            source: NewsSource::Thairath,
            category: Some(NewsCategory::Accident),
        };
        let candidates = vec![Candidate::new(number(mentioned), ExtractionMethod::Direct, "test", 80)];
        store
            .create(scraped, NewsCategory::Accident, candidates, *published_at)
            .unwrap();
    }
    store
}

#[test]
fn test_draw_window_ranking() {
    let store = store_with(&[
        ("a1", at(12, 10, 0), "438"),
        ("a2", at(12, 16, 0), "438"),
        ("a3", at(12, 1, 0), "200"),
    ]);
    let draw = LotteryDraw::new(1, "2024-12-16".parse().unwrap(), "163438").unwrap();

    let analysis = WindowJoiner::default().analyze_draw(&draw, store.articles());
    let ranked: Vec<(&str, usize, bool)> = analysis
        .ranked_candidates
        .iter()
        .map(|c| (c.number.as_str(), c.frequency, c.is_match))
        .collect();

    assert_eq!(analysis.window_start, at(12, 1, 0));
    assert_eq!(analysis.window_end, at(12, 16, 0));
    assert_eq!(analysis.news_count, 2);
    assert_eq!(ranked, vec![("438", 1, true), ("200", 1, false)]);
    assert!(analysis.has_match);

    let matches = collect_matches(&WindowJoiner::default(), &[draw], store.articles());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::Exact);
}

#[tokio::test]
async fn test_ingest_then_history() {
    let mut store = MemoryStore::new();
    let records = vec![
        ScrapedArticle {
            title: "อุบัติเหตุรถชน".to_string(),
            body: "รถเก๋งทะเบียน กข 1438 ชนท้ายรถบรรทุก".to_string(),
            url: "https://example.com/crash".to_string(),
            image_url: None,
            published_at: at(12, 5, 8),
            source: NewsSource::Khaosod,
            category: None,
        },
        ScrapedArticle {
            title: "หลวงพ่อให้โชค".to_string(),
            body: "ชาวบ้านแห่ขอหวย เลขธูป 384".to_string(),
            url: "https://example.com/lucky".to_string(),
            image_url: None,
            published_at: at(12, 20, 8),
            source: NewsSource::Matichon,
            category: None,
        },
    ];

    let report = Ingestor::default()
        .ingest(&mut store, &DisabledAnalyzer, records, at(12, 21, 0))
        .await;
    assert_eq!(report.saved, 2);

    let draws = vec![
        LotteryDraw::new(1, "2024-12-16".parse().unwrap(), "163438").unwrap(),
        LotteryDraw::new(2, "2025-01-01".parse().unwrap(), "730209").unwrap(),
    ];
    let analyses = WindowJoiner::default().analyze_history(&draws, store.articles(), None);

    assert_eq!(analyses[0].draw_date.to_string(), "2025-01-01");
    assert_eq!(analyses[0].news_count, 1);
    assert!(!analyses[0].has_match);
    assert!(analyses[1].has_match);

    let summary = HistorySummary::from_analyses(&analyses);
    assert_eq!(summary.hits, 1);
    assert_eq!(summary.draws_with_news, 2);
}
