//! プロジェクトカード一覧コンポーネント
//!
//! カードの文字列はエスケープ済みなので `inner_html` で埋め込む。
//! 閲覧数はカードの値ではなく `counts` から読み、他タブの更新にも追従する。

use leptos::prelude::*;
use portfolio_common::{PageView, ProjectCard, ProjectId, ViewCounts};

#[component]
pub fn ProjectGrid<F>(
    page: ReadSignal<PageView>,
    counts: ReadSignal<ViewCounts>,
    filters_active: Signal<bool>,
    on_open: F,
) -> impl IntoView
where
    F: Fn(ProjectId) + 'static + Clone + Send + Sync,
{
    view! {
        <Show
            when=move || page.with(|p| !p.cards.is_empty())
            fallback=move || view! {
                <div class="no-results">
                    <p>"Проекты не найдены"</p>
                    {move || filters_active.get().then(|| view! {
                        <p class="text-muted">"Попробуйте изменить параметры фильтрации"</p>
                    })}
                </div>
            }
        >
            <div class="projects-grid">
                <For
                    each=move || page.get().cards
                    key=|card| card.id
                    children={
                        let on_open = on_open.clone();
                        move |card| {
                            let on_open = on_open.clone();
                            view! { <CardView card=card counts=counts on_open=on_open /> }
                        }
                    }
                />
            </div>
        </Show>
    }
}

#[component]
fn CardView<F>(card: ProjectCard, counts: ReadSignal<ViewCounts>, on_open: F) -> impl IntoView
where
    F: Fn(ProjectId) + 'static + Clone + Send + Sync,
{
    let id = card.id;
    let on_click = {
        let on_open = on_open.clone();
        move |_: leptos::ev::MouseEvent| on_open(id)
    };
    let on_key = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" || ev.key() == " " {
            ev.prevent_default();
            on_open(id);
        }
    };

    let hours = card.hours_badge().map(|badge| view! {
        <div class="project-hours-mini" title="Человеко-часы"><span>{badge}</span></div>
    });
    let overflow = card.overflow_badge().map(|badge| view! {
        <span class="tech-badge-mini">{badge}</span>
    });
    let techs = card
        .technologies
        .iter()
        .map(|tech| view! { <span class="tech-badge-mini" inner_html=tech.clone()></span> })
        .collect_view();

    view! {
        <div
            class=format!("project-card-compact {}", card.status_class)
            data-project-id=id.key()
            role="button"
            tabindex="0"
            on:click=on_click
            on:keydown=on_key
        >
            <div class="project-header-mini">
                <h3 class="project-title-mini" inner_html=card.title.clone()></h3>
                <div class="project-meta-header">
                    <div class=format!("project-status-mini {}", card.status_class) title=card.status_label>
                        <span>{card.status_label}</span>
                    </div>
                    {hours}
                </div>
            </div>
            <div class="project-tech-mini">{techs}{overflow}</div>
            <div class="project-preview-mini" inner_html=card.description.clone()></div>
            <div class="project-meta-mini">
                <div class="project-date-mini">{card.date.clone()}</div>
                <div class="project-id-views-group">
                    <div class="project-id-badge" title="Project ID">{format!("No. {}", id)}</div>
                    <div class="project-views-mini" title="Количество просмотров">
                        <span data-views-count=id.key()>{move || counts.with(|c| c.get(id))}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}
