//! メインアプリケーションコンポーネント

use crate::api::analytics::{load_analytics, track_event};
use crate::api::stats::refresh_stats;
use crate::browser::{BrowserClock, BrowserStore};
use crate::components::{
    consent_banner::ConsentBanner, filter_bar::FilterBar, header::Header, pagination::Pagination,
    project_grid::ProjectGrid, project_modal::ProjectModal,
};
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use portfolio_common::{AnalyticsEvent, Catalog, FilterCommand, Portfolio, ProjectDetail, ProjectId, SiteConfig, SiteStats};
use wasm_bindgen::JsCast;

type WebPortfolio = Portfolio<BrowserStore, BrowserClock>;

/// ページに埋め込まれた設定を読む
///
/// `<script id="site-config" type="application/json">` が無い・壊れている場合はデフォルト。
fn load_site_config() -> SiteConfig {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("site-config"))
        .and_then(|e| e.text_content());

    match json {
        Some(json) => SiteConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid site config, using defaults");
            SiteConfig::default()
        }),
        None => SiteConfig::default(),
    }
}

fn load_catalog() -> Catalog {
    Catalog::builtin().unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load catalog");
        Catalog::default()
    })
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = load_site_config();
    let portfolio: WebPortfolio = Portfolio::new(load_catalog(), BrowserStore, BrowserClock, config.clone());

    // 正規化してから最初の描画を行う
    let initial_counts = portfolio.views().normalize();
    let initial_page = portfolio.visible_cards();
    let initial_stats = portfolio.stats();
    let initial_state = portfolio.state().clone();
    let technologies = portfolio.technologies();
    let total_projects = portfolio.catalog().len();
    let total_hours = portfolio.catalog().total_hours();
    let ask_consent = portfolio.consent().load().should_ask();
    let tracking_allowed = portfolio.consent().load().allows_tracking();

    let portfolio = StoredValue::new_local(portfolio);
    let pending_render = StoredValue::new_local(None::<Timeout>);

    let (page_view, set_page_view) = signal(initial_page);
    let (filter_stats, set_filter_stats) = signal(initial_stats);
    let (filter_state, set_filter_state) = signal(initial_state);
    let (counts, set_counts) = signal(initial_counts);
    let (detail, set_detail) = signal(None::<ProjectDetail>);
    let (consent_visible, set_consent_visible) = signal(ask_consent);
    let (site_stats, set_site_stats) = signal(None::<SiteStats>);

    let filters_active = Signal::derive(move || filter_state.with(|s| s.is_active()));

    let rerender = move || {
        portfolio.with_value(|p| {
            set_page_view.set(p.visible_cards());
            set_filter_stats.set(p.stats());
            set_filter_state.set(p.state().clone());
            set_counts.set(p.refresh_counts());
        });
    };

    let track = move |event: AnalyticsEvent| {
        let consent = portfolio.with_value(|p| p.consent().load());
        if let Err(e) = track_event(consent, &event) {
            tracing::warn!(error = ?e, "analytics event failed");
        }
    };

    // フィルタ変更: 連続クリックは最後の1回の後にまとめて描画
    let on_command = move |command: FilterCommand| {
        tracing::debug!(?command, "filter command");
        track(AnalyticsEvent::filter(&command));
        let delay = portfolio.with_value(|p| p.config().debounce_ms);
        portfolio.update_value(|p| p.set_filter(command));

        let timeout = Timeout::new(delay.min(u32::MAX as u64) as u32, move || {
            let applied = portfolio.try_update_value(|p| p.flush_now()).unwrap_or(false);
            if applied {
                rerender();
            }
        });
        // 古いタイマーはdropで取り消される
        pending_render.set_value(Some(timeout));
    };

    let on_load_more = move |_: ()| {
        let next = portfolio.try_update_value(|p| p.load_more()).flatten();
        match next {
            Some(next) => {
                set_page_view.update(|view| {
                    view.cards.extend(next.cards);
                    view.summary = next.summary;
                });
                portfolio.with_value(|p| set_filter_stats.set(p.stats()));
            }
            None => tracing::debug!("no more pages"),
        }
    };

    let on_open = move |id: ProjectId| {
        let opened = portfolio.with_value(|p| p.open_project(i64::from(id.get())));
        match opened {
            Ok(opened) => {
                track(AnalyticsEvent::modal_opened(&opened.detail.title));
                set_counts.set(opened.counts);
                set_detail.set(Some(opened.detail));
            }
            Err(e) => tracing::warn!(%id, error = %e, "failed to open project"),
        }
    };

    let close_modal = move || {
        set_detail.set(None);
        track(AnalyticsEvent::modal_closed());
    };
    let on_close = move |_: ()| close_modal();

    let on_accept = {
        let analytics_id = config.analytics_id.clone();
        move |_: ()| {
            if let Err(e) = portfolio.with_value(|p| p.consent().accept()) {
                tracing::warn!(error = %e, "failed to store consent");
            }
            set_consent_visible.set(false);
            if let Some(id) = &analytics_id {
                if let Err(e) = load_analytics(id) {
                    tracing::warn!(error = ?e, "failed to load analytics");
                }
            }
        }
    };

    let on_decline = move |_: ()| {
        if let Err(e) = portfolio.with_value(|p| p.consent().decline()) {
            tracing::warn!(error = %e, "failed to store consent");
        }
        set_consent_visible.set(false);
    };

    if tracking_allowed {
        if let Some(id) = &config.analytics_id {
            if let Err(e) = load_analytics(id) {
                tracing::warn!(error = ?e, "failed to load analytics");
            }
        }
    }

    // 他タブでの閲覧数更新・フォーカス復帰・Escキー
    if let Some(window) = web_sys::window() {
        let views_key = config.views_storage_key.clone();
        EventListener::new(&window, "storage", move |event| {
            let key = event.dyn_ref::<web_sys::StorageEvent>().and_then(|e| e.key());
            if key.as_deref().map_or(true, |k| k == views_key) {
                portfolio.with_value(|p| set_counts.set(p.refresh_counts()));
            }
        })
        .forget();

        EventListener::new(&window, "focus", move |_| {
            portfolio.with_value(|p| set_counts.set(p.refresh_counts()));
        })
        .forget();

        EventListener::new(&window, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<web_sys::KeyboardEvent>()
                .is_some_and(|e| e.key() == "Escape");
            if is_escape && detail.with_untracked(|d| d.is_some()) {
                close_modal();
            }
        })
        .forget();
    }

    if config.stats_enabled() {
        let endpoint = config.stats_endpoint.clone();
        refresh_stats(endpoint.clone(), move |stats| set_site_stats.set(Some(stats)));

        let period = config.stats_refresh_ms.min(u32::MAX as u64) as u32;
        if period > 0 {
            Interval::new(period, move || {
                refresh_stats(endpoint.clone(), move |stats| set_site_stats.set(Some(stats)));
            })
            .forget();
        }
    }

    view! {
        <div class="app">
            <Header total_projects=total_projects total_hours=total_hours site_stats=site_stats />
            <main class="container">
                <FilterBar state=filter_state technologies=technologies on_command=on_command />
                <ProjectGrid page=page_view counts=counts filters_active=filters_active on_open=on_open />
                <Pagination page=page_view stats=filter_stats on_load_more=on_load_more />
            </main>
            <ProjectModal detail=detail on_close=on_close />
            <ConsentBanner visible=consent_visible on_accept=on_accept on_decline=on_decline />
        </div>
    }
}
