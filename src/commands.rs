//! サブコマンドの実装
//!
//! 出力先を引数で受け取り、テストから結果を検証できるようにしている。

use crate::clock::SystemClock;
use crate::config::Config;
use crate::display::{format_card, format_detail, format_summary};
use crate::error::{PortfolioError, Result};
use crate::file_store::FileStore;
use portfolio_common::{
    labels, Category, Clock, FilterCommand, KeyValueStore, Portfolio, ProjectId, Status,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Write;

pub type CliPortfolio = Portfolio<FileStore, SystemClock>;

/// 設定からポートフォリオを組み立てる
pub fn open_portfolio(config: &Config) -> Result<CliPortfolio> {
    let catalog = config.load_catalog()?;
    let store = FileStore::new(config.store_path()?);
    tracing::debug!(store = %store.path().display(), "using view store");
    Ok(Portfolio::new(catalog, store, SystemClock, config.site.clone()))
}

/// `list` の絞り込み条件
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub category: String,
    pub status: String,
    pub technologies: Vec<String>,
    pub pages: usize,
}

impl ListOptions {
    fn commands(&self) -> Vec<FilterCommand> {
        let mut commands = vec![
            FilterCommand::Category(self.category.clone()),
            FilterCommand::Status(self.status.clone()),
        ];
        commands.extend(self.technologies.iter().cloned().map(FilterCommand::Technology));
        commands
    }
}

pub fn list<S, C, W>(portfolio: &mut Portfolio<S, C>, options: &ListOptions, json: bool, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    for command in options.commands() {
        portfolio.set_filter(command);
    }
    portfolio.flush_now();

    for _ in 1..options.pages.max(1) {
        if portfolio.load_more().is_none() {
            break;
        }
    }

    let view = portfolio.visible_cards();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        return Ok(());
    }

    for card in &view.cards {
        writeln!(out, "{}", format_card(card))?;
    }
    write!(out, "{}", format_summary(&portfolio.stats(), &view.summary))?;
    Ok(())
}

pub fn open<S, C, W>(portfolio: &Portfolio<S, C>, id: i64, json: bool, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    let opened = portfolio.open_project(id).map_err(|e| {
        if e.is_not_found() {
            PortfolioError::ProjectNotFound(id)
        } else {
            e.into()
        }
    })?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&opened.detail)?)?;
    } else {
        write!(out, "{}", format_detail(&opened.detail))?;
    }
    Ok(())
}

pub fn views<S, C, W>(portfolio: &Portfolio<S, C>, normalize: bool, json: bool, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    let counts: BTreeMap<ProjectId, u64> = if normalize {
        portfolio.refresh_counts().iter().collect()
    } else {
        portfolio
            .catalog()
            .records()
            .iter()
            .map(|r| (r.id, portfolio.get_view_count(i64::from(r.id.get()))))
            .filter(|(_, count)| *count > 0)
            .collect()
    };

    if json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(id, count)| (id.key(), json!(count)))
            .collect();
        writeln!(out, "{}", serde_json::Value::Object(map))?;
        return Ok(());
    }

    if normalize {
        writeln!(out, "✔ 閲覧数ストアを正規化しました")?;
    }
    if counts.is_empty() {
        writeln!(out, "閲覧履歴はありません")?;
        return Ok(());
    }
    for (id, count) in &counts {
        let title = portfolio
            .catalog()
            .find(*id)
            .map(|r| r.title.as_str())
            .unwrap_or("(カタログにないID)");
        writeln!(out, "No. {:<3} {:>5}  {}", id, count, title)?;
    }
    writeln!(out, "合計: {}", counts.values().sum::<u64>())?;
    Ok(())
}

pub fn techs<S, C, W>(portfolio: &Portfolio<S, C>, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    for tag in portfolio.technologies() {
        writeln!(out, "{:<28} {}", tag.label, tag.token)?;
    }
    Ok(())
}

pub fn stats<S, C, W>(portfolio: &Portfolio<S, C>, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    let catalog = portfolio.catalog();
    writeln!(out, "プロジェクト数: {}", catalog.len())?;
    writeln!(out, "総工数: {} ч", catalog.total_hours())?;
    writeln!(out, "総閲覧数: {}", portfolio.refresh_counts().total())?;
    writeln!(out, "技術タグ: {}", catalog.technologies().len())?;

    writeln!(out, "\nカテゴリ別:")?;
    for category in Category::KNOWN.iter() {
        let count = catalog.records().iter().filter(|r| &r.category == category).count();
        if count > 0 {
            writeln!(out, "  {:<26} {}", labels::category_label(category), count)?;
        }
    }

    writeln!(out, "\nステータス別:")?;
    for status in [Status::Backlog, Status::Ongoing, Status::Doing, Status::Done] {
        let count = catalog.records().iter().filter(|r| r.status == status).count();
        if count > 0 {
            writeln!(out, "  {:<26} {}", labels::status_label(status), count)?;
        }
    }
    Ok(())
}

pub fn validate<S, C, W>(portfolio: &Portfolio<S, C>, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    let issues = portfolio.catalog().validate();
    if issues.is_empty() {
        writeln!(out, "✔ {}件のプロジェクトに問題はありません", portfolio.catalog().len())?;
        return Ok(());
    }

    for issue in &issues {
        writeln!(out, "✗ No. {}: {}", issue.id, issue.message)?;
    }
    Err(PortfolioError::InvalidCatalog(issues.len()))
}

pub fn show_config<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "設定:")?;
    writeln!(out, "  設定ファイル: {}", Config::config_path()?.display())?;
    writeln!(out, "  閲覧数ストア: {}", config.store_path()?.display())?;
    writeln!(
        out,
        "  カタログ: {}",
        config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "組み込み".into())
    )?;
    writeln!(out, "  1ページの件数: {}", config.site.projects_per_page)?;
    writeln!(out, "  デバウンス: {}ms", config.site.debounce_ms)?;
    writeln!(
        out,
        "  統計API: {}",
        if config.site.stats_enabled() { config.site.stats_endpoint.as_str() } else { "無効" }
    )?;
    Ok(())
}
