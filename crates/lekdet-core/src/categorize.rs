//! Keyword categorization shared by every news source.

use crate::models::NewsCategory;

/// Ordered keyword-to-category table; the first category with a keyword
/// present in the text wins.
#[derive(Debug, Clone)]
pub struct CategoryPolicy {
    table: Vec<(NewsCategory, Vec<String>)>,
}

impl CategoryPolicy {
    /// Build a policy from an ordered table.
    pub fn new(table: Vec<(NewsCategory, Vec<String>)>) -> Self {
        Self { table }
    }

    /// The built-in Thai keyword table.
    pub fn thai_default() -> Self {
        let entry = |category, words: &[&str]| {
            (category, words.iter().map(|w| w.to_string()).collect())
        };

        Self::new(vec![
            entry(
                NewsCategory::LuckyNumber,
                &[
                    "เลขเด็ด", "หวย", "ลอตเตอรี่", "สลากกินแบ่ง", "เลขท้าย", "งวดนี้",
                    "เลขดัง", "เลขมงคล", "ให้โชค", "ต้นตะเคียน", "ไอ้ไข่", "ขอหวย",
                    "เลขธูป", "น้ำมนต์", "ปู่ศรีสุทโธ",
                ],
            ),
            entry(
                NewsCategory::Royal,
                &[
                    "พระราชวงศ์", "สมเด็จ", "พระบาทสมเด็จ", "กรมสมเด็จ", "พระบรม",
                    "เจ้าฟ้า", "พระองค์", "ทรง", "เสด็จ", "พระราชดำรัส", "พระราชพิธี",
                ],
            ),
            entry(
                NewsCategory::Accident,
                &[
                    "อุบัติเหตุ", "รถชน", "รถพลิกคว่ำ", "ไฟไหม้", "จมน้ำ", "ตกตึก",
                    "ระเบิด", "เครื่องบินตก", "เรือล่ม", "ดับ", "เสียชีวิต", "บาดเจ็บ",
                    "สังเวย",
                ],
            ),
            entry(
                NewsCategory::Religion,
                &[
                    "พระ", "วัด", "พุทธ", "ศาสนา", "สงฆ์", "บุญ", "กฐิน", "ผ้าป่า",
                    "เจ้าอาวาส", "หลวงพ่อ", "หลวงปู่", "พระธาตุ", "มหาเจดีย์",
                    "วิปัสสนา", "ธรรมะ", "นิพพาน",
                ],
            ),
            entry(
                NewsCategory::Politics,
                &[
                    "นายกรัฐมนตรี", "รัฐบาล", "รัฐสภา", "สภาผู้แทน", "วุฒิสภา", "พรรค",
                    "เลือกตั้ง", "รัฐมนตรี", "ครม.", "คณะรัฐมนตรี", "กกต.", "ส.ส.",
                    "ส.ว.", "ฝ่ายค้าน", "อภิปราย", "งบประมาณ", "ทำเนียบ",
                ],
            ),
        ])
    }

    /// Categorize an article by title and body.
    pub fn categorize(&self, title: &str, body: &str) -> Option<NewsCategory> {
        let text = format!("{} {}", title, body).to_lowercase();

        self.table
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|keyword| text.contains(&keyword.to_lowercase()))
            })
            .map(|(category, _)| *category)
    }
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::thai_default()
    }
}
