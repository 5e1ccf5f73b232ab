use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("プロジェクトが見つかりません: {0}")]
    ProjectNotFound(i64),

    #[error("カタログ検証エラー: {0}件の問題")]
    InvalidCatalog(usize),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(portfolio_common::Error),
}

impl From<portfolio_common::Error> for PortfolioError {
    fn from(err: portfolio_common::Error) -> Self {
        match err {
            portfolio_common::Error::ProjectNotFound(id) => PortfolioError::ProjectNotFound(id),
            portfolio_common::Error::Config(message) => PortfolioError::Config(message),
            other => PortfolioError::Core(other),
        }
    }
}

impl From<dialoguer::Error> for PortfolioError {
    fn from(err: dialoguer::Error) -> Self {
        PortfolioError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
