//! EcoScout検出バックエンドのHTTPクライアント
//!
//! fetch APIで以下のエンドポイントを叩く:
//! - POST   /upload       メディア送信、DetectionRecordを返す
//! - GET    /history      全レコードの取得（バックエンド順）
//! - DELETE /history      ID配列による一括削除
//! - GET    /report/{id}  レポートの取得（新しい閲覧コンテキストで開く）
//!
//! 非2xx応答は{"detail": ...}のメッセージをそのまま操作者に見せる。
//! 自動リトライはしない。再試行は常に操作者が同じ操作をやり直す

use ecoscout_common::{DetectionRecord, Error, Result};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

const API_BASE_URL: &str = "http://localhost:8000";

/// FastAPIのエラーペイロード
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn js_err(value: JsValue) -> Error {
    Error::Backend(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

/// リクエストを送信し、非2xxはdetailメッセージのエラーに変換する。
/// detailが取れないときはfallbackの文言を操作者に見せる
async fn send(request: &Request, fallback: &str) -> Result<Response> {
    let window = web_sys::window().ok_or_else(|| Error::Backend("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_err)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| Error::Backend("unexpected fetch response".to_string()))?;

    if !resp.ok() {
        let detail = error_detail(&resp).await;
        return Err(Error::Backend(
            detail.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    Ok(resp)
}

/// 非2xx応答のボディから{"detail": ...}を取り出す。取れなければNone
async fn error_detail(resp: &Response) -> Option<String> {
    let promise = resp.json().ok()?;
    let value = JsFuture::from(promise).await.ok()?;
    let body: ErrorBody = serde_wasm_bindgen::from_value(value).ok()?;
    body.detail
}

async fn json_body<T>(resp: &Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let promise = resp.json().map_err(js_err)?;
    let value = JsFuture::from(promise).await.map_err(js_err)?;
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| Error::Backend(format!("unexpected response shape: {e}")))
}

/// メディアをmultipartで送信し、検出レコードを受け取る。
/// Content-Typeはブラウザがboundary付きで設定する
pub async fn upload_media(file: &File) -> Result<DetectionRecord> {
    let form = FormData::new().map_err(js_err)?;
    form.append_with_blob("file", file).map_err(js_err)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let url = format!("{API_BASE_URL}/upload");
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;

    let resp = send(&request, "Upload failed. Please try again.").await?;
    json_body(&resp).await
}

/// 全履歴を取得する。並びはバックエンドの返却順のまま
pub async fn fetch_history() -> Result<Vec<DetectionRecord>> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = format!("{API_BASE_URL}/history");
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;

    let resp = send(&request, "Failed to fetch history.").await?;
    json_body(&resp).await
}

/// 選択IDの一括削除。バッチ全体で成功か失敗かのどちらかになる
pub async fn delete_records(ids: &[String]) -> Result<()> {
    let body = serde_json::to_string(ids)?;

    let opts = RequestInit::new();
    opts.set_method("DELETE");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let url = format!("{API_BASE_URL}/history");
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    send(&request, "Failed to delete records.").await?;
    Ok(())
}

pub fn report_url(id: &str) -> String {
    format!("{API_BASE_URL}/report/{id}")
}

/// レポートを新しい閲覧コンテキストで開く。
/// 各レポートは独立で、失敗してもログを残すだけにする
pub fn open_report(id: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(&report_url(id), "_blank") {
            gloo::console::error!("Failed to open report:", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_url() {
        assert_eq!(report_url("3f1c2a"), "http://localhost:8000/report/3f1c2a");
    }

    #[test]
    fn test_error_body_deserialize() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Could not open video file"}"#).expect("パース失敗");
        assert_eq!(body.detail.as_deref(), Some("Could not open video file"));

        let empty: ErrorBody = serde_json::from_str("{}").expect("パース失敗");
        assert!(empty.detail.is_none());
    }
}
