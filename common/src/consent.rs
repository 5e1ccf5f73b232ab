//! アナリティクス同意状態

use crate::error::Result;
use crate::views::KeyValueStore;
use serde::Serialize;

/// 同意状態の保存キー
pub const CONSENT_STORAGE_KEY: &str = "analyticsConsent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsConsent {
    Accepted,
    Declined,
    /// 未回答（バナーを表示する）
    Ask,
}

impl AnalyticsConsent {
    /// 保存値から復元（未知の値は未回答扱い）
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("accepted") => AnalyticsConsent::Accepted,
            Some("declined") => AnalyticsConsent::Declined,
            _ => AnalyticsConsent::Ask,
        }
    }

    pub fn should_ask(self) -> bool {
        self == AnalyticsConsent::Ask
    }

    pub fn allows_tracking(self) -> bool {
        self == AnalyticsConsent::Accepted
    }
}

pub struct ConsentStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ConsentStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, CONSENT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// 現在の同意状態（読み込み失敗時は未回答）
    pub fn load(&self) -> AnalyticsConsent {
        match self.store.read(&self.key) {
            Ok(value) => AnalyticsConsent::from_stored(value.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read analytics consent");
                AnalyticsConsent::Ask
            }
        }
    }

    pub fn accept(&self) -> Result<()> {
        self.store.write(&self.key, "accepted")?;
        tracing::info!("analytics consent accepted");
        Ok(())
    }

    pub fn decline(&self) -> Result<()> {
        self.store.write(&self.key, "declined")?;
        tracing::info!("analytics consent declined");
        Ok(())
    }

    /// 回答を取り消して未回答に戻す
    pub fn reset(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{FailingStore, MemoryStore};

    #[test]
    fn test_consent_defaults_to_ask() {
        let consent = ConsentStore::new(MemoryStore::new());
        assert_eq!(consent.load(), AnalyticsConsent::Ask);
        assert!(consent.load().should_ask());
    }

    #[test]
    fn test_consent_accept_decline_reset() {
        let store = MemoryStore::new();
        let consent = ConsentStore::new(&store);

        consent.accept().expect("保存失敗");
        assert_eq!(consent.load(), AnalyticsConsent::Accepted);
        assert!(consent.load().allows_tracking());
        assert_eq!(store.read(CONSENT_STORAGE_KEY).unwrap().as_deref(), Some("accepted"));

        consent.decline().unwrap();
        assert_eq!(consent.load(), AnalyticsConsent::Declined);
        assert!(!consent.load().should_ask());

        consent.reset().unwrap();
        assert_eq!(consent.load(), AnalyticsConsent::Ask);
    }

    #[test]
    fn test_consent_unknown_value() {
        assert_eq!(AnalyticsConsent::from_stored(Some("maybe")), AnalyticsConsent::Ask);
    }

    #[test]
    fn test_consent_store_failures() {
        let consent = ConsentStore::new(FailingStore::new());
        assert_eq!(consent.load(), AnalyticsConsent::Ask);
        assert!(consent.accept().is_err());
        assert!(consent.reset().is_err());
    }
}
