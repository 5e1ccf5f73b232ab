//! フィルタバーコンポーネント

use leptos::prelude::*;
use portfolio_common::filter::ALL;
use portfolio_common::labels::{category_label, status_label};
use portfolio_common::{Category, CategoryFilter, FilterCommand, FilterState, Status, StatusFilter, TechnologyTag};

const STATUSES: [Status; 4] = [Status::Backlog, Status::Ongoing, Status::Doing, Status::Done];

fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

#[component]
pub fn FilterBar<F>(
    state: ReadSignal<FilterState>,
    technologies: Vec<TechnologyTag>,
    on_command: F,
) -> impl IntoView
where
    F: Fn(FilterCommand) + 'static + Clone + Send + Sync,
{
    let category_button = {
        let on_command = on_command.clone();
        move |token: String, label: String| {
            let on_command = on_command.clone();
            let selected = CategoryFilter::from_token(&token);
            let is_active = Memo::new(move |_| state.with(|s| s.category == selected));
            view! {
                <button
                    class=move || active_class("filter-btn", is_active.get())
                    aria-pressed=move || is_active.get().to_string()
                    on:click=move |_| on_command(FilterCommand::Category(token.clone()))
                >
                    {label}
                </button>
            }
        }
    };

    let status_button = {
        let on_command = on_command.clone();
        move |token: &'static str, label: &'static str| {
            let on_command = on_command.clone();
            let is_active = Memo::new(move |_| state.with(|s| Some(s.status) == StatusFilter::from_token(token)));
            view! {
                <button
                    class=move || active_class("status-btn", is_active.get())
                    aria-pressed=move || is_active.get().to_string()
                    on:click=move |_| on_command(FilterCommand::Status(token.to_string()))
                >
                    {label}
                </button>
            }
        }
    };

    let tech_tags = technologies
        .into_iter()
        .map(|tag| {
            let on_command = on_command.clone();
            let token = tag.token.clone();
            let is_active = {
                let token = token.clone();
                Memo::new(move |_| state.with(|s| s.technologies.contains(&token)))
            };
            view! {
                <button
                    class=move || active_class("tech-tag", is_active.get())
                    data-tech=tag.token.clone()
                    aria-label=format!("Filter by {}", tag.label)
                    aria-pressed=move || is_active.get().to_string()
                    on:click=move |_| on_command(FilterCommand::Technology(token.clone()))
                >
                    {tag.label.clone()}
                </button>
            }
        })
        .collect_view();

    let clear_techs = {
        let on_command = on_command.clone();
        move |_: leptos::ev::MouseEvent| on_command(FilterCommand::Technology(ALL.to_string()))
    };

    let categories = std::iter::once((ALL.to_string(), "Все".to_string()))
        .chain(Category::KNOWN.iter().map(|c| (c.tag().to_string(), category_label(c).to_string())))
        .map(|(token, label)| category_button(token, label))
        .collect_view();

    let statuses = std::iter::once((ALL, "Все"))
        .chain(STATUSES.iter().map(|s| (s.as_str(), status_label(*s))))
        .map(|(token, label)| status_button(token, label))
        .collect_view();

    view! {
        <section class="filters">
            <div class="filter-group" role="group" aria-label="Категория">{categories}</div>
            <div class="filter-group" role="group" aria-label="Статус">{statuses}</div>
            <div class="tech-filter" role="group" aria-label="Технологии">
                <button
                    class=move || active_class("tech-tag", state.with(|s| s.technologies.is_empty()))
                    on:click=clear_techs
                >
                    "Все технологии"
                </button>
                {tech_tags}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_class() {
        assert_eq!(active_class("filter-btn", true), "filter-btn active");
        assert_eq!(active_class("filter-btn", false), "filter-btn");
    }
}
