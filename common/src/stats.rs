//! サイト訪問統計（外部APIの応答）

use serde::{Deserialize, Serialize};

/// 統計APIの応答。欠けている項目は表示しない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteStats {
    pub total_users: Option<u64>,
    pub sessions: Option<u64>,
    pub pageviews: Option<u64>,
}

impl SiteStats {
    /// 閲覧数（ページビューがなければセッション数）
    pub fn views(&self) -> Option<u64> {
        self.pageviews.or(self.sessions)
    }
}
