//! サイト訪問統計の取得
//!
//! 失敗しても画面には何も出さない（ログのみ）。

use portfolio_common::SiteStats;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, RequestMode, Response};

/// 統計APIを呼び出す
pub async fn fetch_stats(endpoint: &str) -> Result<SiteStats, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_cache(RequestCache::NoStore);

    let request = Request::new_with_str_and_init(endpoint, &opts)?;
    request.headers().set("Accept", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("stats API error: {} {}", resp.status(), resp.status_text())));
    }

    let json = JsFuture::from(resp.json()?).await?;
    let stats: SiteStats = serde_wasm_bindgen::from_value(json)?;
    Ok(stats)
}

/// 取得して結果をコールバックに渡す（失敗時は呼ばない）
pub fn refresh_stats<F>(endpoint: String, on_loaded: F)
where
    F: FnOnce(SiteStats) + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_stats(&endpoint).await {
            Ok(stats) => {
                tracing::debug!(?stats, "site stats loaded");
                on_loaded(stats);
            }
            Err(e) => tracing::warn!(error = ?e, "site stats request failed"),
        }
    });
}
