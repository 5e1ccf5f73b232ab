//! プロジェクト詳細モーダル
//!
//! 開くたびに閲覧数を1つ増やし、表示中の全カウンタ用に最新のスナップショットを返す。

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::labels::{category_label, difficulty_label, status_label};
use crate::render::DISPLAY_DATE_FORMAT;
use crate::types::{ProjectId, ProjectRecord};
use crate::views::{KeyValueStore, ViewCounter, ViewCounts};
use serde::Serialize;

/// 詳細表示用ビューモデル
///
/// テキストはエスケープしていない。テキストノードとして描画すること。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub id: ProjectId,
    pub title: String,
    pub full_description: String,
    pub tasks: String,
    pub category: String,
    pub difficulty: String,
    pub status: &'static str,
    pub date: String,
    pub hours: Option<u32>,
    pub technologies: Vec<String>,
    /// 空ならNone（セクション非表示）
    pub features: Option<Vec<String>>,
    pub results: Option<Vec<String>>,
    pub metrics: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    /// リンクと同じURLならNone
    pub repo: Option<String>,
    pub views: u64,
}

impl ProjectDetail {
    pub fn new(record: &ProjectRecord, views: u64) -> Self {
        let non_empty = |items: &[String]| (!items.is_empty()).then(|| items.to_vec());

        Self {
            id: record.id,
            title: record.title.clone(),
            full_description: record.full_description.clone(),
            tasks: record.tasks.clone(),
            category: category_label(&record.category).to_string(),
            difficulty: difficulty_label(record.difficulty.as_deref()),
            status: status_label(record.status),
            date: record.date.format(DISPLAY_DATE_FORMAT).to_string(),
            hours: record.hours,
            technologies: record.technologies.clone(),
            features: non_empty(&record.features),
            results: non_empty(&record.results),
            metrics: metrics_text(record),
            image: record.image.clone(),
            link: record.link.clone(),
            repo: record
                .repo
                .clone()
                .filter(|repo| record.link.as_deref() != Some(repo.as_str())),
            views,
        }
    }

    pub fn tech_count(&self) -> usize {
        self.technologies.len()
    }
}

/// 成果セクションの本文
///
/// 明示された値があればそれを使い、なければ成果の件数から生成する。
/// どちらもなければNone。
pub fn metrics_text(record: &ProjectRecord) -> Option<String> {
    if let Some(metrics) = &record.metrics {
        return Some(metrics.clone());
    }
    if record.results.is_empty() {
        return None;
    }
    Some(format!(
        "Проект включает {} ключевых результата, демонстрирующих измеримое воздействие на бизнес-процессы и пользовательский опыт.",
        record.results.len()
    ))
}

/// 詳細を開いた結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedProject {
    pub detail: ProjectDetail,
    /// 表示中カウンタ更新用の正規化済みスナップショット
    pub counts: ViewCounts,
}

pub struct ModalPresenter<'a, S> {
    catalog: &'a Catalog,
    views: &'a ViewCounter<S>,
}

impl<'a, S: KeyValueStore> ModalPresenter<'a, S> {
    pub fn new(catalog: &'a Catalog, views: &'a ViewCounter<S>) -> Self {
        Self { catalog, views }
    }

    /// 詳細を開く
    ///
    /// 不正なID・存在しないIDはエラーを返し、閲覧数は変化しない。
    pub fn open(&self, raw_id: i64) -> Result<OpenedProject> {
        let id = ProjectId::new(raw_id).ok_or_else(|| Error::InvalidId(raw_id.to_string()))?;
        let record = self.catalog.find(id).ok_or(Error::ProjectNotFound(raw_id))?;

        let views = self.views.increment(id);
        tracing::info!(%id, title = %record.title, views, "project opened");

        Ok(OpenedProject {
            detail: ProjectDetail::new(record, views),
            counts: self.views.snapshot(),
        })
    }
}
