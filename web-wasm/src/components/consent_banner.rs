//! アナリティクス同意バナー

use leptos::prelude::*;

#[component]
pub fn ConsentBanner<FA, FD>(visible: ReadSignal<bool>, on_accept: FA, on_decline: FD) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
    FD: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || visible.get()>
            <div class="consent-banner" role="dialog" aria-live="polite">
                <p>"Сайт использует аналитику для улучшения контента. Разрешить сбор обезличенной статистики?"</p>
                <div class="consent-actions">
                    <button
                        class="btn btn-primary btn-small"
                        on:click={
                            let on_accept = on_accept.clone();
                            move |_| on_accept(())
                        }
                    >
                        "Принять"
                    </button>
                    <button
                        class="btn btn-secondary btn-small"
                        on:click={
                            let on_decline = on_decline.clone();
                            move |_| on_decline(())
                        }
                    >
                        "Отклонить"
                    </button>
                </div>
            </div>
        </Show>
    }
}
