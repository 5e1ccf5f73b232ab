//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    #[error("Invalid project id: {0}")]
    InvalidId(String),

    #[error("Invalid project record: {0}")]
    InvalidRecord(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// 「見つからない」系のエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProjectNotFound(_) | Error::InvalidId(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_storage() {
        let error = Error::Storage("quota exceeded".to_string());
        assert_eq!(format!("{}", error), "Storage error: quota exceeded");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = Error::ProjectNotFound(999);
        assert_eq!(format!("{}", error), "Project not found: 999");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
