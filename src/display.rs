//! 端末向けの整形
//!
//! カードのテキストはHTMLエスケープ済みなので、表示前に戻す。

use portfolio_common::{FilterStats, PageSummary, ProjectCard, ProjectDetail};

/// `escape_html` の逆変換
pub fn plain(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn format_card(card: &ProjectCard) -> String {
    let mut out = String::new();

    let hours = card.hours_badge().map(|h| format!("  ⏱ {}", h)).unwrap_or_default();
    out.push_str(&format!("No. {:<3} [{}] {}{}  👁 {}\n", card.id, card.status_label, card.date, hours, card.views));
    out.push_str(&format!("  {}\n", plain(&card.title)));

    let mut techs: Vec<String> = card.technologies.iter().map(|t| plain(t)).collect();
    if let Some(overflow) = card.overflow_badge() {
        techs.push(overflow);
    }
    if !techs.is_empty() {
        out.push_str(&format!("  {}\n", techs.join(", ")));
    }

    let description = plain(&card.description);
    if !description.is_empty() {
        out.push_str(&format!("  {}\n", description));
    }
    out
}

pub fn format_summary(stats: &FilterStats, summary: &PageSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", stats.message()));
    if summary.total > 0 {
        out.push_str(&format!("{}\n", summary.page_info()));
    }
    if let Some(label) = summary.load_more_label() {
        out.push_str(&format!("→ {}  (--pages で続きを表示)\n", label));
    }
    out
}

pub fn format_detail(detail: &ProjectDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!("━━━ No. {} {} ━━━\n", detail.id, detail.title));
    out.push_str(&format!("カテゴリ: {}\n", detail.category));
    out.push_str(&format!("難易度:   {}\n", detail.difficulty));
    out.push_str(&format!("状態:     {}\n", detail.status));
    out.push_str(&format!("日付:     {}\n", detail.date));
    if let Some(hours) = detail.hours {
        out.push_str(&format!("工数:     {} ч\n", hours));
    }
    out.push_str(&format!("閲覧数:   {}\n", detail.views));
    out.push_str(&format!("技術 ({}): {}\n", detail.tech_count(), detail.technologies.join(", ")));

    if !detail.full_description.is_empty() {
        out.push_str(&format!("\n{}\n", detail.full_description));
    }
    if !detail.tasks.is_empty() {
        out.push_str(&format!("\nЗадачи:\n{}\n", detail.tasks));
    }

    let sections = [("Возможности", &detail.features), ("Результаты", &detail.results)];
    for (heading, items) in sections {
        if let Some(items) = items {
            out.push_str(&format!("\n{}:\n", heading));
            for item in items {
                out.push_str(&format!("  • {}\n", item));
            }
        }
    }

    if let Some(metrics) = &detail.metrics {
        out.push_str(&format!("\n{}\n", metrics));
    }
    if let Some(link) = &detail.link {
        out.push_str(&format!("\nリンク: {}\n", link));
    }
    if let Some(repo) = &detail.repo {
        out.push_str(&format!("リポジトリ: {}\n", repo));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_common::{Catalog, ProjectCard};

    #[test]
    fn test_plain_reverses_escape() {
        let source = r#"<a href="x">A & 'B'</a>"#;
        assert_eq!(plain(&portfolio_common::escape_html(source)), source);
    }

    #[test]
    fn test_format_card() {
        let catalog = Catalog::builtin().unwrap();
        let record = catalog.find(portfolio_common::ProjectId::new(8).unwrap()).unwrap();
        let text = format_card(&ProjectCard::new(record, 2));

        assert!(text.starts_with("No. 8"));
        assert!(text.contains("[Done]"));
        assert!(text.contains("19.10.2025"));
        assert!(text.contains("40 ч"));
        assert!(text.contains("VK, API, PostgreSQL, +5"));
        assert!(text.contains("👁 2"));
    }

    #[test]
    fn test_format_summary_has_more() {
        let stats = FilterStats { filtered: 18, total: 18, shown: 12 };
        let summary = PageSummary { total: 18, shown: 12, has_more: true };
        let text = format_summary(&stats, &summary);
        assert!(text.contains("Показано: 12 из 18 (всего: 18)"));
        assert!(text.contains("Показать еще (6 из 18)"));
    }
}
