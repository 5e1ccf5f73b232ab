use crate::error::{PortfolioError, Result};
use portfolio_common::SiteConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "views.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// サイト設定（ページサイズ・保存キーなど）
    pub site: SiteConfig,
    /// 閲覧数ストアのファイル（未指定なら設定ディレクトリ内）
    pub store_path: Option<PathBuf>,
    /// カタログJSON（未指定なら組み込みカタログ）
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let mut config: Config = serde_json::from_str(&content)?;
            config.site = config.site.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PortfolioError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("portfolio"))
    }

    /// 閲覧数ストアのパス
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(STORE_FILE_NAME)),
        }
    }

    /// 設定のカタログ（なければ組み込み）を読み込む
    pub fn load_catalog(&self) -> Result<portfolio_common::Catalog> {
        match &self.catalog_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(portfolio_common::Catalog::from_json(&content)?)
            }
            None => Ok(portfolio_common::Catalog::builtin()?),
        }
    }

    pub fn set_store_path(&mut self, path: PathBuf) -> Result<()> {
        self.store_path = Some(path);
        self.save()
    }
}
