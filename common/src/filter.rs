//! カタログ絞り込みとページング
//!
//! カテゴリ・ステータス・技術タグの3条件で絞り込み、日付の新しい順に並べる。
//! ページカーソルはフィルタ変更のたびに1へ戻り、「さらに表示」でのみ進む。

use crate::catalog::Catalog;
use crate::types::{Category, ProjectRecord, Status};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// 「すべて」を表すトークン
pub const ALL: &str = "all";

/// カテゴリ条件
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Is(Category),
}

impl CategoryFilter {
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Is(Category::from_tag(token))
        }
    }

    pub fn token(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Is(category) => category.tag(),
        }
    }

    fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Is(selected) => selected == category,
        }
    }
}

/// ステータス条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StatusFilter {
    #[default]
    All,
    Is(Status),
}

impl StatusFilter {
    /// 未知のステータスはNone
    pub fn from_token(token: &str) -> Option<Self> {
        if token.trim().eq_ignore_ascii_case(ALL) {
            Some(StatusFilter::All)
        } else {
            Status::parse(token).map(StatusFilter::Is)
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            StatusFilter::All => ALL,
            StatusFilter::Is(status) => status.as_str(),
        }
    }

    fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Is(selected) => *selected == status,
        }
    }
}

/// 現在の絞り込み条件とページカーソル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    /// 小文字化済みの技術トークン（空なら制限なし）
    pub technologies: BTreeSet<String>,
    /// 1始まり
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            status: StatusFilter::All,
            technologies: BTreeSet::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// いずれかの条件が有効か
    pub fn is_active(&self) -> bool {
        self.category != CategoryFilter::All
            || self.status != StatusFilter::All
            || !self.technologies.is_empty()
    }

    /// 3条件すべてを満たすか
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        if !self.category.matches(&record.category) {
            return false;
        }
        if !self.status.matches(record.status) {
            return false;
        }
        if self.technologies.is_empty() {
            return true;
        }
        self.technologies
            .iter()
            .any(|selected| record.technology_tokens().any(|tech| tech.contains(selected.as_str())))
    }
}

/// フィルタ変更コマンド
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "dimension", content = "value", rename_all = "lowercase")]
pub enum FilterCommand {
    /// カテゴリを丸ごと置き換え
    Category(String),
    /// ステータスを丸ごと置き換え
    Status(String),
    /// 技術トークンを切り替え（`all` で全解除）
    Technology(String),
}

impl FilterCommand {
    /// 状態に適用する。どのコマンドでもページは1に戻る。
    pub fn apply(&self, state: &mut FilterState) {
        match self {
            FilterCommand::Category(token) => {
                state.category = CategoryFilter::from_token(token);
            }
            FilterCommand::Status(token) => match StatusFilter::from_token(token) {
                Some(status) => state.status = status,
                None => tracing::warn!(status = %token, "unknown status filter ignored"),
            },
            FilterCommand::Technology(token) => {
                let token = token.trim().to_lowercase();
                if token.is_empty() || token == ALL {
                    state.technologies.clear();
                } else if !state.technologies.remove(&token) {
                    state.technologies.insert(token);
                }
            }
        }
        state.page = 1;
    }
}

/// ページ切り出し結果
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a ProjectRecord>,
    pub page: usize,
    pub page_size: usize,
    /// 絞り込み後の総件数
    pub total: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    /// このページまでに表示済みの件数
    pub fn shown(&self) -> usize {
        self.page.saturating_mul(self.page_size).min(self.total)
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 総ページ数
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// `[(page-1)*size, page*size)` を切り出す
pub fn paginate<'a>(filtered: &[&'a ProjectRecord], page: usize, page_size: usize) -> Page<'a> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = filtered.len();
    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = page.saturating_mul(page_size).min(total);

    Page {
        items: filtered[start..end].to_vec(),
        page,
        page_size,
        total,
        total_pages: total_pages(total, page_size),
    }
}

/// 絞り込み + 日付降順（同日は入力順を維持）
pub fn filter_projects<'a>(records: &'a [ProjectRecord], state: &FilterState) -> Vec<&'a ProjectRecord> {
    let mut filtered: Vec<&ProjectRecord> = records.iter().filter(|r| state.matches(r)).collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// 件数サマリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub filtered: usize,
    pub total: usize,
    pub shown: usize,
}

impl FilterStats {
    /// フィルタ統計の表示文言
    pub fn message(&self) -> String {
        if self.filtered == 0 {
            "Проекты не найдены".to_string()
        } else if self.filtered == self.total && self.shown >= self.filtered {
            format!("Всего проектов: {}", self.total)
        } else if self.shown >= self.filtered {
            format!("Найдено: {} из {}", self.filtered, self.total)
        } else {
            format!("Показано: {} из {} (всего: {})", self.shown, self.filtered, self.total)
        }
    }
}

/// フィルタ状態を保持し、表示対象を導出する
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    catalog: Arc<Catalog>,
    state: FilterState,
    page_size: usize,
}

impl CatalogFilter {
    pub fn new(catalog: Arc<Catalog>, page_size: usize) -> Self {
        Self {
            catalog,
            state: FilterState::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filter_projects(&self) -> Vec<&ProjectRecord> {
        filter_projects(self.catalog.records(), &self.state)
    }

    pub fn set_filter(&mut self, command: &FilterCommand) {
        command.apply(&mut self.state);
        tracing::debug!(?command, "filter changed");
    }

    /// 現在のページ
    pub fn current_page(&self) -> Page<'_> {
        let filtered = self.filter_projects();
        paginate(&filtered, self.state.page, self.page_size)
    }

    /// 次のページへ進み、新しく表示される分だけ返す
    ///
    /// 最終ページにいる場合は何もせずNone。
    pub fn load_more(&mut self) -> Option<Page<'_>> {
        let total = self.filter_projects().len();
        if self.state.page >= total_pages(total, self.page_size) {
            return None;
        }

        self.state.page += 1;
        let filtered = self.filter_projects();
        Some(paginate(&filtered, self.state.page, self.page_size))
    }

    pub fn stats(&self) -> FilterStats {
        let filtered = self.filter_projects().len();
        FilterStats {
            filtered,
            total: self.catalog.len(),
            shown: self.state.page.saturating_mul(self.page_size).min(filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_filter(page_size: usize) -> CatalogFilter {
        CatalogFilter::new(Arc::new(Catalog::builtin().unwrap()), page_size)
    }

    fn ids(records: &[&ProjectRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id.get()).collect()
    }

    // =============================================
    // filter_projects テスト
    // =============================================

    #[test]
    fn test_no_filter_returns_full_catalog_sorted() {
        let filter = builtin_filter(12);
        let all = filter.filter_projects();
        assert_eq!(all.len(), 18);
        assert!(all.windows(2).all(|w| w[0].date >= w[1].date));
        // 2026-02-09 が最新
        assert_eq!(all[0].id.get(), 17);
        assert!(!filter.state().is_active());
    }

    #[test]
    fn test_category_cv() {
        let mut filter = builtin_filter(12);
        filter.set_filter(&FilterCommand::Category("cv".into()));
        filter.set_filter(&FilterCommand::Status("all".into()));

        assert_eq!(ids(&filter.filter_projects()), vec![15, 12, 11, 10]);
    }

    #[test]
    fn test_status_filter_case_insensitive() {
        let mut filter = builtin_filter(12);
        filter.set_filter(&FilterCommand::Status(" OnGoing ".into()));
        assert_eq!(ids(&filter.filter_projects()), vec![11]);
    }

    #[test]
    fn test_unknown_status_keeps_previous() {
        let mut filter = builtin_filter(12);
        filter.set_filter(&FilterCommand::Status("backlog".into()));
        filter.set_filter(&FilterCommand::Status("paused".into()));
        assert_eq!(filter.state().status, StatusFilter::Is(Status::Backlog));
    }

    #[test]
    fn test_technology_union_substring() {
        let mut filter = builtin_filter(12);
        filter.set_filter(&FilterCommand::Technology("Python".into()));
        filter.set_filter(&FilterCommand::Technology("SQL".into()));

        let result = filter.filter_projects();
        assert!(!result.is_empty());
        for record in &result {
            assert!(record
                .technology_tokens()
                .any(|t| t.contains("python") || t.contains("sql")));
        }
        // PostgreSQL のみの id 4 も部分一致で含まれる
        assert!(ids(&result).contains(&4));
        // Excel の id 3 は含まれない
        assert!(!ids(&result).contains(&3));
    }

    #[test]
    fn test_empty_result_is_distinguishable() {
        let mut filter = builtin_filter(12);
        filter.set_filter(&FilterCommand::Category("web".into()));
        filter.set_filter(&FilterCommand::Status("backlog".into()));

        assert!(filter.filter_projects().is_empty());
        assert!(filter.state().is_active());
        assert_eq!(filter.stats().message(), "Проекты не найдены");
    }

    #[test]
    fn test_stable_sort_on_equal_dates() {
        let json = r#"[
            {"id": 1, "date": "2025-01-01"},
            {"id": 2, "date": "2025-03-01"},
            {"id": 3, "date": "2025-01-01"},
            {"id": 4, "date": "2025-03-01"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let sorted = filter_projects(catalog.records(), &FilterState::default());
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_empty_catalog() {
        let filter = CatalogFilter::new(Arc::new(Catalog::default()), 12);
        let page = filter.current_page();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_more());
    }

    // =============================================
    // FilterCommand テスト
    // =============================================

    #[test]
    fn test_technology_toggle_and_all() {
        let mut state = FilterState::default();
        FilterCommand::Technology("Python".into()).apply(&mut state);
        FilterCommand::Technology("SQL".into()).apply(&mut state);
        assert_eq!(state.technologies.len(), 2);

        FilterCommand::Technology("python".into()).apply(&mut state);
        assert_eq!(state.technologies.iter().collect::<Vec<_>>(), vec!["sql"]);

        // 最後の技術を外すと「すべて」に戻る
        FilterCommand::Technology("sql".into()).apply(&mut state);
        assert!(state.technologies.is_empty());

        FilterCommand::Technology("docker".into()).apply(&mut state);
        FilterCommand::Technology("all".into()).apply(&mut state);
        assert!(state.technologies.is_empty());
    }

    #[test]
    fn test_every_command_resets_page() {
        let mut filter = builtin_filter(5);
        assert!(filter.load_more().is_some());
        assert_eq!(filter.state().page, 2);

        filter.set_filter(&FilterCommand::Category("all".into()));
        assert_eq!(filter.state().page, 1);
    }

    // =============================================
    // paginate / load_more テスト
    // =============================================

    #[test]
    fn test_paginate_slices() {
        let filter = builtin_filter(12);
        let all = filter.filter_projects();

        let first = paginate(&all, 1, 12);
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.total, 18);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_more());

        let second = paginate(&all, 2, 12);
        assert_eq!(second.items.len(), 6);
        assert!(!second.has_more());

        let beyond = paginate(&all, 5, 12);
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn test_load_more_reveals_rest_then_stops() {
        let mut filter = builtin_filter(12);
        let first = filter.current_page();
        assert_eq!(first.items.len(), 12);
        assert!(first.has_more());

        let more = filter.load_more().expect("2ページ目があるはず");
        assert_eq!(more.items.len(), 6);
        assert_eq!(more.shown(), 18);
        assert!(!more.has_more());

        assert!(filter.load_more().is_none());
        assert_eq!(filter.state().page, 2);
    }

    #[test]
    fn test_huge_page_cursor_is_empty_page() {
        let mut filter = builtin_filter(12);
        let all = filter.filter_projects();

        let page = paginate(&all, usize::MAX, 12);
        assert!(page.items.is_empty());
        assert_eq!(page.shown(), 18);
        assert!(!page.has_more());

        filter.state.page = usize::MAX;
        assert_eq!(filter.stats().shown, 18);
        assert!(filter.load_more().is_none());
    }

    #[test]
    fn test_page_size_larger_than_total() {
        let filter = builtin_filter(100);
        let page = filter.current_page();
        assert_eq!(page.items.len(), 18);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more());
    }

    // =============================================
    // FilterStats テスト
    // =============================================

    #[test]
    fn test_stats_messages() {
        let all = FilterStats { filtered: 18, total: 18, shown: 18 };
        assert_eq!(all.message(), "Всего проектов: 18");

        let found = FilterStats { filtered: 4, total: 18, shown: 4 };
        assert_eq!(found.message(), "Найдено: 4 из 18");

        let partial = FilterStats { filtered: 18, total: 18, shown: 12 };
        assert_eq!(partial.message(), "Показано: 12 из 18 (всего: 18)");
    }
}
