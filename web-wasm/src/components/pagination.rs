//! 「さらに表示」とページ情報

use leptos::prelude::*;
use portfolio_common::{FilterStats, PageView};

#[component]
pub fn Pagination<F>(
    page: ReadSignal<PageView>,
    stats: ReadSignal<FilterStats>,
    on_load_more: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let summary = move || page.with(|p| p.summary);

    view! {
        <div class="filter-stats" aria-live="polite">{move || stats.get().message()}</div>
        <div class="pagination">
            {move || summary().load_more_label().map(|label| {
                let on_load_more = on_load_more.clone();
                view! {
                    <button
                        class="load-more-btn"
                        aria-label=move || format!("Загрузить еще {} проектов", summary().remaining())
                        on:click=move |_| on_load_more(())
                    >
                        {label}
                    </button>
                }
            })}
            <Show when=move || { summary().total > 0 }>
                <div class="page-info">{move || summary().page_info()}</div>
            </Show>
        </div>
    }
}
