//! UIコンポーネント

pub mod about;
pub mod header;
pub mod history;
pub mod results;
pub mod sidebar;
pub mod upload_media;

use wasm_bindgen::JsValue;

/// ISO-8601タイムスタンプをロケール表記に整形する。パースできなければそのまま返す
pub(crate) fn format_timestamp(iso: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }
    String::from(date.to_locale_string("en-US", &JsValue::UNDEFINED))
}
