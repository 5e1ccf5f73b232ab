//! Google アナリティクスのタグ読み込み
//!
//! タグの読み込み・イベント送信とも同意済みの場合だけ行う。

use portfolio_common::{AnalyticsConsent, AnalyticsEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const GTAG_URL: &str = "https://www.googletagmanager.com/gtag/js";
const LOADER_ID: &str = "gtag-loader";

/// gtag.js と初期化スクリプトを `<head>` に追加する（二重読み込みはしない）
pub fn load_analytics(measurement_id: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;

    if document.get_element_by_id(LOADER_ID).is_some() {
        return Ok(());
    }
    let head = document.head().ok_or_else(|| JsValue::from_str("<head> is missing"))?;

    let loader = document.create_element("script")?;
    loader.set_id(LOADER_ID);
    loader.set_attribute("async", "")?;
    loader.set_attribute("src", &format!("{}?id={}", GTAG_URL, measurement_id))?;
    head.append_child(&loader)?;

    let init = document.create_element("script")?;
    init.set_text_content(Some(&format!(
        "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config','{}');",
        measurement_id
    )));
    head.append_child(&init)?;

    tracing::info!(measurement_id, "analytics loaded");
    Ok(())
}

/// `gtag('event', ...)` を送る
///
/// 同意済みでない場合・gtag が未読み込みの場合は何もしない。
pub fn track_event(consent: AnalyticsConsent, event: &AnalyticsEvent) -> Result<(), JsValue> {
    if !consent.allows_tracking() {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let gtag = js_sys::Reflect::get(&window, &JsValue::from_str("gtag"))?;
    let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() else {
        return Ok(());
    };

    let params = js_sys::Object::new();
    js_sys::Reflect::set(&params, &JsValue::from_str("event_category"), &JsValue::from_str(event.category))?;
    js_sys::Reflect::set(&params, &JsValue::from_str("event_label"), &JsValue::from_str(&event.label))?;
    gtag.call3(&JsValue::NULL, &JsValue::from_str("event"), &JsValue::from_str(event.action), &params)?;

    tracing::debug!(category = event.category, action = event.action, "analytics event sent");
    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_track_event_without_consent_or_gtag_is_noop() {
        let event = AnalyticsEvent::modal_closed();
        assert!(track_event(AnalyticsConsent::Declined, &event).is_ok());
        assert!(track_event(AnalyticsConsent::Ask, &event).is_ok());
        // gtag 未読み込み
        assert!(track_event(AnalyticsConsent::Accepted, &event).is_ok());
    }
}
