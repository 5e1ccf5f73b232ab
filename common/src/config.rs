//! サイト設定

use crate::consent::CONSENT_STORAGE_KEY;
use crate::error::{Error, Result};
use crate::views::VIEWS_STORAGE_KEY;
use serde::{Deserialize, Serialize};

/// サイト全体の設定（未指定の項目はデフォルト値）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// 1ページあたりの表示件数
    pub projects_per_page: usize,
    /// フィルタ変更から再描画までの待ち時間
    pub debounce_ms: u64,
    pub views_storage_key: String,
    pub consent_storage_key: String,
    /// 統計APIのURL（空なら無効）
    pub stats_endpoint: String,
    pub stats_refresh_ms: u64,
    /// Google Analytics の測定ID
    pub analytics_id: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            projects_per_page: 12,
            debounce_ms: 150,
            views_storage_key: VIEWS_STORAGE_KEY.to_string(),
            consent_storage_key: CONSENT_STORAGE_KEY.to_string(),
            stats_endpoint: String::new(),
            stats_refresh_ms: 300_000,
            analytics_id: None,
        }
    }
}

impl SiteConfig {
    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn stats_enabled(&self) -> bool {
        !self.stats_endpoint.trim().is_empty()
    }

    /// 値の検証（ページサイズ0・空の保存キーはエラー）
    pub fn validate(self) -> Result<Self> {
        if self.projects_per_page == 0 {
            return Err(Error::Config("projects_per_page must be positive".into()));
        }
        if self.views_storage_key.trim().is_empty() || self.consent_storage_key.trim().is_empty() {
            return Err(Error::Config("storage keys must not be empty".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.projects_per_page, 12);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.views_storage_key, "portfolio_project_views");
        assert_eq!(config.consent_storage_key, "analyticsConsent");
        assert!(!config.stats_enabled());
    }

    #[test]
    fn test_from_json_partial() {
        let config = SiteConfig::from_json(r#"{"projects_per_page": 6, "stats_endpoint": "https://example.com/stats"}"#)
            .expect("設定読み込み失敗");
        assert_eq!(config.projects_per_page, 6);
        assert_eq!(config.debounce_ms, 150);
        assert!(config.stats_enabled());
    }

    #[test]
    fn test_from_json_rejects_zero_page_size() {
        let err = SiteConfig::from_json(r#"{"projects_per_page": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[cfg(not(feature = "wasm"))]
    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("portfolio-site-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"debounce_ms": 300}"#).unwrap();
        let config = SiteConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.debounce_ms, 300);
    }
}
