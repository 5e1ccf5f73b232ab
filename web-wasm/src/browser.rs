//! ブラウザのストレージ・時計

use portfolio_common::{Clock, Error, KeyValueStore, Result};
use wasm_bindgen::JsValue;

/// `window.localStorage` を使うストア
///
/// ストレージが使えない環境（プライベートモード等）ではエラーを返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn js_error(context: &str, err: JsValue) -> Error {
    Error::Storage(format!("{}: {:?}", context, err))
}

fn local_storage() -> Result<web_sys::Storage> {
    let window = web_sys::window().ok_or_else(|| Error::Storage("window is not available".into()))?;
    window
        .local_storage()
        .map_err(|e| js_error("localStorage", e))?
        .ok_or_else(|| Error::Storage("localStorage is not available".into()))
}

impl KeyValueStore for BrowserStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        local_storage()?.get_item(key).map_err(|e| js_error("getItem", e))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        local_storage()?.set_item(key, value).map_err(|e| js_error("setItem", e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        local_storage()?.remove_item(key).map_err(|e| js_error("removeItem", e))
    }
}

/// `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use portfolio_common::{ProjectId, ViewCounter};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_browser_store_persists_view_counts() {
        let counter = ViewCounter::with_key(BrowserStore, "portfolioViewsTest");
        let _ = BrowserStore.remove("portfolioViewsTest");
        let id = ProjectId::new(5).expect("valid id");

        assert_eq!(counter.increment(id), 1);
        assert_eq!(counter.increment(id), 2);
        assert_eq!(
            BrowserStore.read("portfolioViewsTest").expect("read").as_deref(),
            Some("{\"5\":2}")
        );

        BrowserStore.remove("portfolioViewsTest").expect("remove");
    }

    #[wasm_bindgen_test]
    fn wasm_browser_clock_is_positive() {
        assert!(BrowserClock.now_ms() > 0);
    }
}
