//! ヘッダーコンポーネント

use leptos::prelude::*;
use portfolio_common::SiteStats;

#[component]
pub fn Header(
    total_projects: usize,
    total_hours: u32,
    site_stats: ReadSignal<Option<SiteStats>>,
) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Портфолио проектов"</h1>
            <div class="header-stats">
                <span class="header-stat">{format!("Проектов: {}", total_projects)}</span>
                <span class="header-stat">{format!("Человеко-часов: {}", total_hours)}</span>
                {move || site_stats.get().map(|stats| view! {
                    <span class="header-stat" title="Посетители">
                        {stats.total_users.map(|u| format!("Посетители: {}", u))}
                    </span>
                    <span class="header-stat" title="Просмотры">
                        {stats.views().map(|v| format!("Просмотры: {}", v))}
                    </span>
                })}
            </div>
        </header>
    }
}
