//! アナリティクスに送るUIイベント
//!
//! 送信するかどうかは同意状態で決まる（`AnalyticsConsent::allows_tracking`）。

use crate::filter::FilterCommand;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub category: &'static str,
    pub action: &'static str,
    pub label: String,
}

impl AnalyticsEvent {
    /// フィルタ操作
    pub fn filter(command: &FilterCommand) -> Self {
        let (action, value) = match command {
            FilterCommand::Category(value) => ("category_filter", value),
            FilterCommand::Status(value) => ("status_filter", value),
            FilterCommand::Technology(value) => ("tech_filter", value),
        };
        Self {
            category: "Filters",
            action,
            label: value.clone(),
        }
    }

    pub fn modal_opened(title: &str) -> Self {
        Self {
            category: "Projects",
            action: "open_modal",
            label: title.to_string(),
        }
    }

    pub fn modal_closed() -> Self {
        Self {
            category: "Projects",
            action: "close_modal",
            label: String::new(),
        }
    }
}
