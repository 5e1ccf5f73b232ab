//! プロジェクトカタログ
//!
//! 起動時に一度だけ読み込まれる不変のレコード一覧。
//! 組み込みデータは `data/projects.json` をコンパイル時に取り込む。

use crate::error::Result;
use crate::types::{ProjectId, ProjectRecord, RawProjectRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

const BUILTIN_CATALOG: &str = include_str!("../data/projects.json");

/// 技術フィルタのタグ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnologyTag {
    /// 表示名（最初に出現した表記）
    pub label: String,
    /// 絞り込みトークン（小文字）
    pub token: String,
}

/// カタログ検証で見つかった問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub id: ProjectId,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Self { records }
    }

    /// 組み込みカタログ
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// JSON配列から読み込み
    ///
    /// 不正なレコードは警告を出して読み飛ばす。JSON自体が壊れている場合のみエラー。
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawProjectRecord> = serde_json::from_str(json)?;
        let records: Vec<ProjectRecord> = raw
            .into_iter()
            .filter_map(|raw| match ProjectRecord::from_raw(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping invalid project record");
                    None
                }
            })
            .collect();
        tracing::debug!(count = records.len(), "catalog loaded");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: ProjectId) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// 全プロジェクトの工数合計
    pub fn total_hours(&self) -> u32 {
        self.records.iter().filter_map(|r| r.hours).sum()
    }

    /// 技術タグ一覧（大文字小文字を無視してソート・重複排除）
    pub fn technologies(&self) -> Vec<TechnologyTag> {
        let mut seen = HashSet::new();
        let mut tags: Vec<TechnologyTag> = self
            .records
            .iter()
            .flat_map(|r| r.technologies.iter())
            .filter_map(|label| {
                let token = label.trim().to_lowercase();
                if token.is_empty() || !seen.insert(token.clone()) {
                    return None;
                }
                Some(TechnologyTag {
                    label: label.trim().to_string(),
                    token,
                })
            })
            .collect();

        tags.sort_by(|a, b| a.token.cmp(&b.token));
        tags
    }

    /// 必須項目と重複IDを検証
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut id_counts: HashMap<ProjectId, usize> = HashMap::new();

        for record in &self.records {
            *id_counts.entry(record.id).or_default() += 1;

            let mut missing = |field: &str| {
                issues.push(ValidationIssue {
                    id: record.id,
                    message: format!("missing required field: {}", field),
                })
            };
            if record.title.trim().is_empty() {
                missing("title");
            }
            if record.description.trim().is_empty() {
                missing("description");
            }
            if record.technologies.is_empty() {
                missing("technologies");
            }
            if record.category.tag().is_empty() {
                missing("category");
            }
        }

        let mut duplicates: Vec<ProjectId> = id_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect();
        duplicates.sort();
        for id in duplicates {
            issues.push(ValidationIssue {
                id,
                message: "duplicate project id".to_string(),
            });
        }

        issues
    }
}
