//! プロジェクトレコードの型定義
//!
//! - RawProjectRecord: カタログJSONをそのまま受ける入力型
//! - ProjectRecord: デフォルト補完済みの不変レコード
//! - ProjectId: ビューカウンタと共有する正規キー

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// プロジェクトID（正の整数）
///
/// ビューカウンタのキーは常に `ProjectId::key()` の10進文字列に正規化される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct ProjectId(u32);

impl ProjectId {
    /// 正の整数からIDを生成（0以下・範囲外はNone）
    pub fn new(raw: i64) -> Option<Self> {
        u32::try_from(raw).ok().filter(|v| *v > 0).map(Self)
    }

    /// ストレージのキー文字列からIDを復元
    ///
    /// 先頭の空白・`+` 記号・先頭ゼロを許容し、数字以降の文字は無視する。
    /// `"07"` と `"7"` と `" 7"` は同じIDになる。
    pub fn from_key(key: &str) -> Option<Self> {
        parse_leading_int(key).and_then(Self::new)
    }

    /// 正規化されたキー文字列
    pub fn key(self) -> String {
        self.0.to_string()
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for ProjectId {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        Self::new(raw).ok_or_else(|| Error::InvalidId(raw.to_string()))
    }
}

impl From<ProjectId> for u32 {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文字列先頭の整数部分を読み取る
///
/// 先頭空白をスキップし、符号の後に続く数字だけを解釈する。
/// 数字が1つもない場合やi64に収まらない場合はNone。
pub(crate) fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// カテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    DataAnalysis,
    Visualization,
    Web,
    ComputerVision,
    DeepLearning,
    Ai,
    /// 未知のタグ（表示・絞り込みではそのまま扱う）
    Other(String),
}

impl Category {
    /// 既知のカテゴリ一覧（フィルタタグの表示順）
    pub const KNOWN: [Category; 6] = [
        Category::DataAnalysis,
        Category::Visualization,
        Category::Web,
        Category::ComputerVision,
        Category::DeepLearning,
        Category::Ai,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "data-analysis" => Category::DataAnalysis,
            "visualization" => Category::Visualization,
            "web" => Category::Web,
            "cv" => Category::ComputerVision,
            "dl" => Category::DeepLearning,
            "ai" => Category::Ai,
            _ => Category::Other(tag.trim().to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Category::DataAnalysis => "data-analysis",
            Category::Visualization => "visualization",
            Category::Web => "web",
            Category::ComputerVision => "cv",
            Category::DeepLearning => "dl",
            Category::Ai => "ai",
            Category::Other(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Category::from_tag(&tag)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.tag().to_string()
    }
}

/// 進捗ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Backlog,
    Ongoing,
    Doing,
    #[default]
    Done,
}

impl Status {
    /// 大文字小文字・前後の空白を無視して解釈
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "backlog" => Some(Status::Backlog),
            "ongoing" => Some(Status::Ongoing),
            "doing" => Some(Status::Doing),
            "done" => Some(Status::Done),
            _ => None,
        }
    }

    /// 未指定・未知の値は Done
    pub fn from_raw(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::Ongoing => "ongoing",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }
}

/// カタログJSONの1エントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProjectRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub full_description: String,
    pub tasks: String,
    pub technologies: Vec<String>,
    pub category: String,
    pub status: Option<String>,
    pub date: String,
    pub hours: Option<i64>,
    pub difficulty: Option<String>,
    pub features: Option<Vec<String>>,
    pub results: Option<Vec<String>>,
    pub metrics: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub repo: Option<String>,
}

/// プロジェクトレコード（不変）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub full_description: String,
    pub tasks: String,
    pub technologies: Vec<String>,
    pub category: Category,
    pub status: Status,
    pub date: NaiveDate,
    /// 0 または未指定は None（バッジ非表示）
    pub hours: Option<u32>,
    /// 空文字は None
    pub difficulty: Option<String>,
    pub features: Vec<String>,
    pub results: Vec<String>,
    pub metrics: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub repo: Option<String>,
}

impl ProjectRecord {
    pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

    /// 入力レコードからデフォルトを補完して生成
    ///
    /// IDと日付だけは必須で、不正ならエラーを返す。
    pub fn from_raw(raw: RawProjectRecord) -> Result<Self> {
        let id = ProjectId::try_from(raw.id)?;
        let date = NaiveDate::parse_from_str(raw.date.trim(), Self::DATE_FORMAT).map_err(|e| {
            Error::InvalidRecord(format!("id {}: date '{}' ({})", id, raw.date, e))
        })?;

        Ok(Self {
            id,
            title: raw.title,
            description: raw.description,
            full_description: raw.full_description,
            tasks: raw.tasks,
            technologies: raw.technologies,
            category: Category::from_tag(&raw.category),
            status: Status::from_raw(raw.status.as_deref()),
            date,
            hours: raw
                .hours
                .filter(|h| *h > 0)
                .and_then(|h| u32::try_from(h).ok()),
            difficulty: non_blank(raw.difficulty),
            features: raw.features.unwrap_or_default(),
            results: raw.results.unwrap_or_default(),
            metrics: non_blank(raw.metrics),
            image: non_blank(raw.image),
            link: non_blank(raw.link),
            repo: non_blank(raw.repo),
        })
    }

    /// 技術タグを小文字化した一覧（絞り込み用）
    pub fn technology_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.technologies.iter().map(|t| t.to_lowercase())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // ProjectId テスト
    // =============================================

    #[test]
    fn test_project_id_new() {
        assert_eq!(ProjectId::new(9).map(ProjectId::get), Some(9));
        assert!(ProjectId::new(0).is_none());
        assert!(ProjectId::new(-3).is_none());
        assert!(ProjectId::new(i64::from(u32::MAX) + 1).is_none());
    }

    #[test]
    fn test_project_id_from_key_equivalents() {
        let expected = ProjectId::new(7);
        assert_eq!(ProjectId::from_key("7"), expected);
        assert_eq!(ProjectId::from_key("07"), expected);
        assert_eq!(ProjectId::from_key(" 7"), expected);
        assert_eq!(ProjectId::from_key("+7"), expected);
        assert_eq!(ProjectId::from_key("7abc"), expected);
    }

    #[test]
    fn test_project_id_from_key_rejects() {
        assert!(ProjectId::from_key("").is_none());
        assert!(ProjectId::from_key("abc").is_none());
        assert!(ProjectId::from_key("-1").is_none());
        assert!(ProjectId::from_key("0").is_none());
        assert!(ProjectId::from_key("00").is_none());
    }

    #[test]
    fn test_project_id_key_roundtrip() {
        let id = ProjectId::new(42).unwrap();
        assert_eq!(id.key(), "42");
        assert_eq!(ProjectId::from_key(&id.key()), Some(id));
    }

    #[test]
    fn test_project_id_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<ProjectId>("0").is_err());
        assert!(serde_json::from_str::<ProjectId>("12").is_ok());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12px"), Some(12));
        assert_eq!(parse_leading_int("  -5"), Some(-5));
        assert_eq!(parse_leading_int("x12"), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    // =============================================
    // Category / Status テスト
    // =============================================

    #[test]
    fn test_category_from_tag() {
        assert_eq!(Category::from_tag("cv"), Category::ComputerVision);
        assert_eq!(Category::from_tag(" Data-Analysis "), Category::DataAnalysis);
        assert_eq!(Category::from_tag("robotics"), Category::Other("robotics".to_string()));
        assert_eq!(Category::from_tag("robotics").tag(), "robotics");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(Status::parse(" Backlog "), Some(Status::Backlog));
        assert_eq!(Status::parse("DOING"), Some(Status::Doing));
        assert_eq!(Status::parse("paused"), None);
    }

    #[test]
    fn test_status_defaults_to_done() {
        assert_eq!(Status::from_raw(None), Status::Done);
        assert_eq!(Status::from_raw(Some("unknown")), Status::Done);
        assert_eq!(Status::from_raw(Some("ongoing")), Status::Ongoing);
    }

    // =============================================
    // ProjectRecord テスト
    // =============================================

    #[test]
    fn test_from_raw_fills_defaults() {
        let json = r#"{
            "id": 5,
            "title": "Dashboard",
            "technologies": ["SQL"],
            "category": "visualization",
            "date": "2025-10-02",
            "hours": 0,
            "difficulty": "  ",
            "image": "",
            "link": "https://example.com"
        }"#;

        let raw: RawProjectRecord = serde_json::from_str(json).expect("デシリアライズ失敗");
        let record = ProjectRecord::from_raw(raw).expect("変換失敗");

        assert_eq!(record.id.get(), 5);
        assert_eq!(record.status, Status::Done);
        assert_eq!(record.hours, None);
        assert_eq!(record.difficulty, None);
        assert_eq!(record.image, None);
        assert_eq!(record.link.as_deref(), Some("https://example.com"));
        assert!(record.features.is_empty());
        assert!(record.results.is_empty());
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 10, 2).unwrap());
    }

    #[test]
    fn test_from_raw_rejects_invalid_id() {
        let raw = RawProjectRecord {
            id: 0,
            date: "2025-01-01".to_string(),
            ..Default::default()
        };
        assert!(matches!(ProjectRecord::from_raw(raw), Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_from_raw_rejects_invalid_date() {
        let raw = RawProjectRecord {
            id: 1,
            date: "01.01.2025".to_string(),
            ..Default::default()
        };
        assert!(matches!(ProjectRecord::from_raw(raw), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_technology_tokens_lowercase() {
        let raw = RawProjectRecord {
            id: 1,
            date: "2025-01-01".to_string(),
            technologies: vec!["PostgreSQL".to_string(), "OpenCV".to_string()],
            ..Default::default()
        };
        let record = ProjectRecord::from_raw(raw).unwrap();
        let tokens: Vec<String> = record.technology_tokens().collect();
        assert_eq!(tokens, vec!["postgresql", "opencv"]);
    }
}
