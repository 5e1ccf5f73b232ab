//! カード表示用のビューモデル組み立て
//!
//! DOMには依存しない。テキストはすべてHTMLエスケープ済みで渡す。

use crate::filter::{paginate, Page};
use crate::labels::status_label;
use crate::types::{ProjectId, ProjectRecord};
use crate::views::{KeyValueStore, ViewCounter, ViewCounts};
use serde::Serialize;

/// カードに並べる技術バッジの上限
pub const CARD_TECH_LIMIT: usize = 3;

/// 表示日付の形式（ru-RU）
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// HTML特殊文字をエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// プロジェクトカード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// 先頭3件のみ
    pub technologies: Vec<String>,
    /// 表示しきれなかった技術の数
    pub tech_overflow: usize,
    pub date: String,
    pub status_label: &'static str,
    /// CSSクラス（`status-backlog` など）
    pub status_class: String,
    pub hours: Option<u32>,
    pub views: u64,
}

impl ProjectCard {
    pub fn new(record: &ProjectRecord, views: u64) -> Self {
        let technologies: Vec<String> = record
            .technologies
            .iter()
            .take(CARD_TECH_LIMIT)
            .map(|t| escape_html(t))
            .collect();

        Self {
            id: record.id,
            title: escape_html(&record.title),
            description: escape_html(&record.description),
            tech_overflow: record.technologies.len().saturating_sub(CARD_TECH_LIMIT),
            technologies,
            date: record.date.format(DISPLAY_DATE_FORMAT).to_string(),
            status_label: status_label(record.status),
            status_class: format!("status-{}", record.status.as_str()),
            hours: record.hours,
            views,
        }
    }

    /// 工数バッジの文言（工数なしならNone）
    pub fn hours_badge(&self) -> Option<String> {
        self.hours.map(|h| format!("{} ч", h))
    }

    /// 「+N」バッジ（あふれなしならNone）
    pub fn overflow_badge(&self) -> Option<String> {
        (self.tech_overflow > 0).then(|| format!("+{}", self.tech_overflow))
    }
}

/// ページング状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// 絞り込み後の総件数
    pub total: usize,
    /// 表示済み件数
    pub shown: usize,
    pub has_more: bool,
}

impl PageSummary {
    pub fn from_page(page: &Page<'_>) -> Self {
        Self {
            total: page.total,
            shown: page.shown(),
            has_more: page.has_more(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.shown)
    }

    /// 「さらに表示」ボタンの文言
    pub fn load_more_label(&self) -> Option<String> {
        self.has_more
            .then(|| format!("Показать еще ({} из {})", self.remaining(), self.total))
    }

    /// ページ情報の文言
    pub fn page_info(&self) -> String {
        format!("Показано {} из {} проектов", self.shown, self.total)
    }
}

/// 1ページ分の表示データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub cards: Vec<ProjectCard>,
    pub summary: PageSummary,
}

impl PageView {
    /// ページと閲覧数スナップショットから組み立て
    pub fn from_page(page: &Page<'_>, counts: &ViewCounts) -> Self {
        Self {
            cards: page
                .items
                .iter()
                .map(|record| ProjectCard::new(record, counts.get(record.id)))
                .collect(),
            summary: PageSummary::from_page(page),
        }
    }
}

/// 閲覧数を合わせてカードを作る
pub struct CatalogRenderer<'a, S> {
    views: &'a ViewCounter<S>,
}

impl<'a, S: KeyValueStore> CatalogRenderer<'a, S> {
    pub fn new(views: &'a ViewCounter<S>) -> Self {
        Self { views }
    }

    /// 絞り込み済みリストの指定ページを組み立てる
    ///
    /// 閲覧数は正規化してから一括で読む。
    pub fn build_page(&self, filtered: &[&ProjectRecord], page: usize, page_size: usize) -> PageView {
        let page = paginate(filtered, page, page_size);
        PageView::from_page(&page, &self.views.snapshot())
    }
}
