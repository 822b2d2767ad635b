//! Supplemental (AI) analysis contract.
//!
//! The analyzer is an optional collaborator: the ingest pipeline calls it
//! only when it reports itself enabled, and any failure counts as zero
//! additional candidates. Its numbers are merged with `method = ai_analyzed`
//! under the same per-article dedup as direct extraction.

use std::future::Future;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AnalyzerError;
use crate::extract::normalize::to_three_digits;
use crate::models::{Candidate, ExtractionMethod, LotteryNumber};

/// A number proposed by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedNumber {
    pub number: LotteryNumber,
    pub reasoning: String,
    pub confidence: u8,
}

impl AnalyzedNumber {
    pub fn into_candidate(self) -> Candidate {
        Candidate::new(
            self.number,
            ExtractionMethod::AiAnalyzed,
            self.reasoning,
            self.confidence.into(),
        )
    }
}

/// Secondary candidate producer.
pub trait SupplementalAnalyzer {
    /// Whether the analyzer should be called at all.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Propose numbers for an article.
    fn analyze(
        &self,
        title: &str,
        body: &str,
    ) -> impl Future<Output = Result<Vec<AnalyzedNumber>, AnalyzerError>> + Send;
}

/// Analyzer used when the capability is switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAnalyzer;

impl SupplementalAnalyzer for DisabledAnalyzer {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn analyze(&self, _title: &str, _body: &str) -> Result<Vec<AnalyzedNumber>, AnalyzerError> {
        Ok(Vec::new())
    }
}

/// Run the analyzer and convert its output to candidates, failing open.
pub async fn analyze_or_empty<A: SupplementalAnalyzer>(
    analyzer: &A,
    title: &str,
    body: &str,
) -> Vec<Candidate> {
    if !analyzer.is_enabled() {
        return Vec::new();
    }

    match analyzer.analyze(title, body).await {
        Ok(numbers) => numbers.into_iter().map(AnalyzedNumber::into_candidate).collect(),
        Err(e) => {
            warn!("Supplemental analysis failed: {}", e);
            Vec::new()
        }
    }
}

/// Prompt asking a text model for 3-digit numbers in a Thai news story.
///
/// The prompt is in Thai, like the stories it is paired with.
pub fn build_prompt(title: &str, body: &str) -> String {
    format!(
        "คุณเป็นผู้เชี่ยวชาญด้านการวิเคราะห์ตัวเลขจากข่าวไทย\n\
         \n\
         วิเคราะห์ข่าวต่อไปนี้และหาตัวเลข 3 หลักที่มีความสำคัญ:\n\
         \n\
         หัวข้อ: {title}\n\
         \n\
         เนื้อหา: {body}\n\
         \n\
         กฎการวิเคราะห์:\n\
         1. หาตัวเลขที่ปรากฏในข่าวโดยตรง เช่น วันที่ เลขทะเบียน เลขที่บ้าน หมายเลขเที่ยวบิน\n\
         2. วิเคราะห์ตัวเลขที่เกี่ยวข้องกับเหตุการณ์ เช่น อายุผู้เสียชีวิต จำนวนผู้บาดเจ็บ\n\
         3. หากเป็นวันที่ ให้แปลงเป็น 3 หลัก เช่น 15 มกราคม = 015 หรือ 151\n\
         4. ให้ตัวเลข 3 หลักเท่านั้น (000-999)\n\
         5. หากไม่พบตัวเลขที่เกี่ยวข้อง ให้ตอบ []\n\
         \n\
         ตอบในรูปแบบ JSON array เท่านั้น:\n\
         [{{\"number\": \"123\", \"reasoning\": \"เหตุผลที่เลือกเลขนี้\", \"confidence\": 80}}]\n\
         \n\
         หากไม่มีตัวเลข ให้ตอบ: []"
    )
}

/// Parse an analyzer reply.
///
/// The first `[` through the last `]` must be a JSON array. Each element is
/// validated on its own and dropped if its number is not 0-999 or its
/// confidence is outside 0-100.
pub fn parse_response(text: &str) -> Result<Vec<AnalyzedNumber>, AnalyzerError> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Err(AnalyzerError::MalformedResponse("no JSON array in reply".to_string()));
    };
    if end < start {
        return Err(AnalyzerError::MalformedResponse("no JSON array in reply".to_string()));
    }

    let items: Vec<Value> = serde_json::from_str(&text[start..=end])
        .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

    let total = items.len();
    let numbers: Vec<AnalyzedNumber> = items.iter().filter_map(validate_item).collect();
    if numbers.len() < total {
        debug!("Dropped {} invalid analyzer items", total - numbers.len());
    }

    Ok(numbers)
}

fn validate_item(item: &Value) -> Option<AnalyzedNumber> {
    let number = match item.get("number")? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.chars().count() > 3 {
                return None;
            }
            to_three_digits(s)?
        }
        Value::Number(n) => LotteryNumber::from_value(u32::try_from(n.as_u64()?).ok()?)?,
        _ => return None,
    };

    let confidence = item.get("confidence")?.as_f64()?.round();
    if !(0.0..=100.0).contains(&confidence) {
        return None;
    }

    let reasoning = item
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(AnalyzedNumber {
        number,
        reasoning,
        confidence: confidence as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingAnalyzer;

    impl SupplementalAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _title: &str, _body: &str) -> Result<Vec<AnalyzedNumber>, AnalyzerError> {
            Err(AnalyzerError::Request("timeout".to_string()))
        }
    }

    struct FixedAnalyzer(&'static str);

    impl SupplementalAnalyzer for FixedAnalyzer {
        async fn analyze(&self, _title: &str, _body: &str) -> Result<Vec<AnalyzedNumber>, AnalyzerError> {
            parse_response(self.0)
        }
    }

    #[test]
    fn test_parse_response_in_prose() {
        let reply = "Here you go:\n```json\n[\n  {\"number\": \"151\", \"reasoning\": \"15 มกราคม\", \"confidence\": 80},\n  {\"number\": 7, \"reasoning\": \"ดับ 7 ราย\", \"confidence\": 65}\n]\n```";
        let numbers = parse_response(reply).unwrap();

        assert_eq!(numbers.len(), 2);
        assert_eq!(numbers[0].number.as_str(), "151");
        assert_eq!(numbers[0].confidence, 80);
        assert_eq!(numbers[1].number.as_str(), "007");
    }

    #[test]
    fn test_parse_response_filters_bad_items() {
        let reply = r#"[
            {"number": "1234", "reasoning": "too long", "confidence": 80},
            {"number": "abc", "reasoning": "not a number", "confidence": 80},
            {"number": 1000, "reasoning": "out of range", "confidence": 80},
            {"number": "42", "reasoning": "bad confidence", "confidence": 150},
            {"number": "42", "reasoning": "no confidence"},
            {"number": "42", "reasoning": "ok", "confidence": 55}
        ]"#;
        let numbers = parse_response(reply).unwrap();

        assert_eq!(
            numbers,
            vec![AnalyzedNumber {
                number: LotteryNumber::parse("042").unwrap(),
                reasoning: "ok".to_string(),
                confidence: 55,
            }]
        );
    }

    #[test]
    fn test_parse_response_empty_array() {
        assert!(parse_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_malformed() {
        assert!(parse_response("no numbers here").is_err());
        assert!(parse_response("[{\"number\": ").is_err());
        assert!(parse_response("] [").is_err());
    }

    #[test]
    fn test_prompt_contains_article() {
        let prompt = build_prompt("หัวข้อข่าว", "เนื้อหา");
        assert!(prompt.contains("หัวข้อ: หัวข้อข่าว\n"));
        assert!(prompt.contains("เนื้อหา: เนื้อหา\n"));
        assert!(prompt.contains("15 มกราคม = 015 หรือ 151"));
        assert!(prompt.ends_with("ให้ตอบ: []"));
    }

    #[tokio::test]
    async fn test_failure_yields_no_candidates() {
        assert!(analyze_or_empty(&FailingAnalyzer, "t", "b").await.is_empty());
        assert!(analyze_or_empty(&DisabledAnalyzer, "t", "b").await.is_empty());
    }

    #[tokio::test]
    async fn test_candidates_are_tagged_ai() {
        let analyzer = FixedAnalyzer(r#"[{"number": "438", "reasoning": "x", "confidence": 90}]"#);
        let candidates = analyze_or_empty(&analyzer, "t", "b").await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].method, ExtractionMethod::AiAnalyzed);
        assert_eq!(candidates[0].confidence, 90);
    }
}
