//! プロジェクト詳細モーダル

use leptos::prelude::*;
use portfolio_common::ProjectDetail;

#[component]
pub fn ProjectModal<F>(detail: ReadSignal<Option<ProjectDetail>>, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    move || {
        let on_close = on_close.clone();
        detail.get().map(|d| {
            let close_overlay = on_close.clone();
            let close_button = on_close.clone();

            let list_section = |heading: &'static str, class: &'static str, items: Option<Vec<String>>| {
                items.map(|items| view! {
                    <section class=format!("modal-section {}", class)>
                        <h3>{heading}</h3>
                        <ul>
                            {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                        </ul>
                    </section>
                })
            };
            let features = list_section("Функциональность", "modal-features", d.features.clone());
            let results = list_section("Результаты", "modal-results", d.results.clone());

            let metrics = d.metrics.clone().map(|text| view! {
                <section class="modal-section modal-metrics">
                    <h3>"Метрики"</h3>
                    <p>{text}</p>
                </section>
            });
            let image = d.image.clone().map(|src| view! {
                <img class="project-modal-image" src=src alt=d.title.clone() loading="lazy" />
            });
            let hours = d.hours.map(|h| view! { <span class="modal-hours">{format!("{} ч", h)}</span> });
            let link = d.link.clone().map(|href| view! {
                <a class="btn btn-primary" href=href target="_blank" rel="noopener noreferrer">"Открыть проект"</a>
            });
            let repo = d.repo.clone().map(|href| view! {
                <a
                    class="btn btn-secondary"
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                    aria-label=format!("View source code for {}", d.title)
                >
                    "Исходный код"
                </a>
            });
            let technologies = d
                .technologies
                .iter()
                .map(|tech| view! { <span class="tech-badge-mini">{tech.clone()}</span> })
                .collect_view();

            view! {
                <div class="modal-overlay active" on:click=move |_| close_overlay(())>
                    <div
                        class="project-modal"
                        role="dialog"
                        aria-modal="true"
                        aria-labelledby="project-modal-title"
                        on:click=|ev| ev.stop_propagation()
                    >
                        <button class="modal-close" aria-label="Закрыть" on:click=move |_| close_button(())>
                            "×"
                        </button>
                        <h2 id="project-modal-title">{d.title.clone()}</h2>
                        <div class="modal-meta">
                            <span class="modal-category">{d.category.clone()}</span>
                            <span class="modal-difficulty">{format!("Сложность: {}", d.difficulty)}</span>
                            <span class="modal-status">{d.status}</span>
                            <span class="modal-date">{d.date.clone()}</span>
                            {hours}
                            <span class="modal-views">{format!("Просмотры: {}", d.views)}</span>
                        </div>
                        {image}
                        <section class="modal-section">
                            <h3>"Описание"</h3>
                            <p>{d.full_description.clone()}</p>
                        </section>
                        <section class="modal-section">
                            <h3>"Задачи"</h3>
                            <p>{d.tasks.clone()}</p>
                        </section>
                        {features}
                        {results}
                        {metrics}
                        <section class="modal-section">
                            <h3>{format!("Технологии ({})", d.tech_count())}</h3>
                            <div class="project-tech-mini">{technologies}</div>
                        </section>
                        <div class="modal-actions">{link}{repo}</div>
                    </div>
                </div>
            }
        })
    }
}
