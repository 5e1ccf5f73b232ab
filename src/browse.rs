//! 対話式ブラウズ
//!
//! カテゴリ → ステータス → プロジェクトの順に選び、詳細を開く。
//! プロジェクト一覧の末尾で「さらに表示」を選ぶと次のページを読み込む。

use crate::display::{format_detail, plain};
use crate::error::Result;
use portfolio_common::{labels, Category, Clock, FilterCommand, KeyValueStore, Portfolio, ProjectId};
use dialoguer::{Confirm, Select};

/// 選択肢の値と表示名
fn category_choices() -> Vec<(String, String)> {
    let mut choices = vec![("all".to_string(), "Все".to_string())];
    choices.extend(
        Category::KNOWN
            .iter()
            .map(|c| (c.tag().to_string(), labels::category_label(c).to_string())),
    );
    choices
}

const STATUS_CHOICES: [(&str, &str); 5] = [
    ("all", "Все"),
    ("backlog", "Backlog"),
    ("ongoing", "Ongoing"),
    ("doing", "Doing"),
    ("done", "Done"),
];

enum Pick {
    Project(ProjectId),
    LoadMore,
    Back,
}

pub fn run_interactive_browse<S: KeyValueStore, C: Clock>(portfolio: &mut Portfolio<S, C>) -> Result<()> {
    loop {
        let categories = category_choices();
        let names: Vec<&str> = categories.iter().map(|(_, label)| label.as_str()).collect();
        let category = Select::new()
            .with_prompt("Категория")
            .items(&names)
            .default(0)
            .interact()?;

        let status_labels: Vec<&str> = STATUS_CHOICES.iter().map(|(_, label)| *label).collect();
        let status = Select::new()
            .with_prompt("Статус")
            .items(&status_labels)
            .default(0)
            .interact()?;

        portfolio.set_filter(FilterCommand::Category(categories[category].0.clone()));
        portfolio.set_filter(FilterCommand::Status(STATUS_CHOICES[status].0.to_string()));
        portfolio.flush_now();

        browse_projects(portfolio)?;

        if !Confirm::new().with_prompt("Продолжить?").default(true).interact()? {
            return Ok(());
        }
    }
}

fn browse_projects<S: KeyValueStore, C: Clock>(portfolio: &mut Portfolio<S, C>) -> Result<()> {
    loop {
        let view = portfolio.visible_cards();
        println!("{}", portfolio.stats().message());
        if view.cards.is_empty() {
            return Ok(());
        }

        let mut picks: Vec<Pick> = Vec::new();
        let mut items: Vec<String> = Vec::new();
        for card in &view.cards {
            picks.push(Pick::Project(card.id));
            items.push(format!("No. {:<3} {}  👁 {}", card.id, plain(&card.title), card.views));
        }
        if let Some(label) = view.summary.load_more_label() {
            picks.push(Pick::LoadMore);
            items.push(label);
        }
        picks.push(Pick::Back);
        items.push("← Назад".to_string());

        let selected = Select::new()
            .with_prompt(view.summary.page_info())
            .items(&items)
            .default(0)
            .interact()?;

        match picks.get(selected) {
            Some(Pick::Project(id)) => {
                let opened = portfolio.open_project(i64::from(id.get()))?;
                println!("\n{}", format_detail(&opened.detail));
            }
            Some(Pick::LoadMore) => {
                portfolio.load_more();
            }
            Some(Pick::Back) | None => return Ok(()),
        }
    }
}
