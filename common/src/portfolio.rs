//! ポートフォリオのファサード
//!
//! 絞り込み・ページング・閲覧数・詳細表示・再描画スケジュールを1つにまとめる。
//! プレゼンテーション層（WASM・CLI）はこの型だけを扱う。

use crate::catalog::{Catalog, TechnologyTag};
use crate::config::SiteConfig;
use crate::consent::ConsentStore;
use crate::error::Result;
use crate::filter::{CatalogFilter, FilterCommand, FilterState, FilterStats};
use crate::modal::{ModalPresenter, OpenedProject};
use crate::render::{CatalogRenderer, PageSummary, PageView, ProjectCard};
use crate::schedule::{Clock, RenderScheduler};
use crate::types::{ProjectId, ProjectRecord};
use crate::views::{KeyValueStore, ViewCounter, ViewCounts};
use std::sync::Arc;

pub struct Portfolio<S, C> {
    filter: CatalogFilter,
    views: ViewCounter<S>,
    consent: ConsentStore<S>,
    scheduler: RenderScheduler,
    clock: C,
    config: SiteConfig,
}

impl<S: KeyValueStore + Clone, C: Clock> Portfolio<S, C> {
    pub fn new(catalog: Catalog, store: S, clock: C, config: SiteConfig) -> Self {
        for issue in catalog.validate() {
            tracing::warn!(id = %issue.id, message = %issue.message, "catalog issue");
        }

        Self {
            filter: CatalogFilter::new(Arc::new(catalog), config.projects_per_page),
            views: ViewCounter::with_key(store.clone(), &config.views_storage_key),
            consent: ConsentStore::with_key(store, &config.consent_storage_key),
            scheduler: RenderScheduler::new(config.debounce_ms),
            clock,
            config,
        }
    }
}

impl<S: KeyValueStore, C: Clock> Portfolio<S, C> {
    pub fn catalog(&self) -> &Catalog {
        self.filter.catalog()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn state(&self) -> &FilterState {
        self.filter.state()
    }

    pub fn views(&self) -> &ViewCounter<S> {
        &self.views
    }

    pub fn consent(&self) -> &ConsentStore<S> {
        &self.consent
    }

    pub fn technologies(&self) -> Vec<TechnologyTag> {
        self.catalog().technologies()
    }

    /// 現在の条件で絞り込んだ全件（日付降順）
    pub fn filter_projects(&self) -> Vec<&ProjectRecord> {
        self.filter.filter_projects()
    }

    /// 現在のページ
    pub fn get_page(&self) -> PageView {
        let filtered = self.filter.filter_projects();
        CatalogRenderer::new(&self.views).build_page(&filtered, self.state().page, self.filter.page_size())
    }

    /// 1ページ目から現在のページまでに表示済みのカード
    pub fn visible_cards(&self) -> PageView {
        let page = self.filter.current_page();
        let counts = self.views.snapshot();
        let filtered = self.filter.filter_projects();

        PageView {
            cards: filtered
                .iter()
                .take(page.shown())
                .map(|record| ProjectCard::new(record, counts.get(record.id)))
                .collect(),
            summary: PageSummary::from_page(&page),
        }
    }

    /// 次のページ分だけを返す（最終ページならNone）
    pub fn load_more(&mut self) -> Option<PageView> {
        let counts = self.views.snapshot();
        let page = self.filter.load_more()?;
        Some(PageView::from_page(&page, &counts))
    }

    pub fn stats(&self) -> FilterStats {
        self.filter.stats()
    }

    /// 閲覧数（不正なIDは0）
    pub fn get_view_count(&self, raw_id: i64) -> u64 {
        ProjectId::new(raw_id).map(|id| self.views.get(id)).unwrap_or(0)
    }

    /// 詳細を開き、閲覧数を1増やす
    pub fn open_project(&self, raw_id: i64) -> Result<OpenedProject> {
        ModalPresenter::new(self.catalog(), &self.views).open(raw_id)
    }

    /// 表示中カウンタ更新用のスナップショット
    pub fn refresh_counts(&self) -> ViewCounts {
        self.views.snapshot()
    }

    /// フィルタ変更を予約する（適用は `flush`）
    pub fn set_filter(&mut self, command: FilterCommand) {
        self.scheduler.enqueue(command, self.clock.now_ms());
    }

    /// 次に `flush` すべき時刻
    pub fn next_flush_at(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// 待ち時間を過ぎていれば予約済みの変更をまとめて適用する
    ///
    /// 適用した場合はtrue（再描画が必要）。
    pub fn flush(&mut self) -> bool {
        match self.scheduler.poll(self.clock.now_ms()) {
            Some(commands) => {
                self.apply(&commands);
                true
            }
            None => false,
        }
    }

    /// 待ち時間を無視して即座に適用する
    pub fn flush_now(&mut self) -> bool {
        let commands = self.scheduler.drain();
        if commands.is_empty() {
            return false;
        }
        self.apply(&commands);
        true
    }

    fn apply(&mut self, commands: &[FilterCommand]) {
        for command in commands {
            self.filter.set_filter(command);
        }
        tracing::debug!(applied = commands.len(), state = ?self.filter.state(), "filters applied");
    }
}
