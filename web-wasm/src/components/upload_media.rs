//! メディアアップロードコンポーネント
//!
//! ドラッグ&ドロップまたはピッカーで1ファイルを受け付け、画像なら
//! プレビューを導出し、バックエンドへ送信する。クライアント側での
//! 形式・サイズ検証はしない。受理可否はバックエンドの応答に委ねる。
//! セッションの状態遷移はecoscout_common::UploadSessionが持ち、
//! 実ファイルハンドルはリアクティブに扱わずここで保持する

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement};

use crate::api;
use ecoscout_common::{DetectionRecord, Error, MediaKind, UploadSession};

#[component]
pub fn UploadMedia<F>(on_upload_success: F) -> impl IntoView
where
    F: Fn(DetectionRecord) + 'static + Clone + Send + Sync,
{
    let (session, set_session) = signal(UploadSession::new());
    let (is_dragover, set_is_dragover) = signal(false);
    // 実ファイルハンドル。イベントハンドラ内でのみ触る
    let file_handle = StoredValue::new_local(None::<File>);

    let select_file = move |file: File| {
        let kind = MediaKind::from_mime(&file.type_());
        let mut epoch = 0;
        set_session.update(|s| epoch = s.select(file.name(), kind));
        if kind == MediaKind::Image {
            derive_preview(&file, epoch, set_session);
        }
        file_handle.set_value(Some(file));
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if let Some(dt) = ev.data_transfer() {
            if let Some(files) = dt.files() {
                if let Some(file) = files.get(0) {
                    select_file(file);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログを開く
    let open_picker = move |_| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(element) = document.create_element("input") else {
            return;
        };
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            return;
        };
        input.set_type("file");
        input.set_accept("image/*,video/*");

        let input_clone = input.clone();
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(files) = input_clone.files() {
                if let Some(file) = files.get(0) {
                    select_file(file);
                }
            }
        }) as Box<dyn FnMut(_)>);
        input.set_onchange(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
        input.click();
    };

    let on_clear = move |ev: leptos::ev::MouseEvent| {
        // ドロップゾーンのクリック（ピッカー起動）まで届かせない
        ev.stop_propagation();
        file_handle.set_value(None);
        set_session.update(|s| s.clear());
    };

    let on_submit = move |_| {
        let mut gate: ecoscout_common::Result<()> = Err(Error::SubmissionInFlight);
        set_session.update(|s| gate = s.begin_submit());
        // 進行中の二重submitはno-op、検証エラーはセッションが文言を保持済み
        if gate.is_err() {
            return;
        }

        let Some(file) = file_handle.get_value() else {
            // ハンドル欠落はセッションと矛盾した状態。検証エラーに落とす
            set_session.update(|s| s.finish_submit(Err(Error::NoFileSelected.to_string())));
            return;
        };

        let on_upload_success = on_upload_success.clone();
        spawn_local(async move {
            match api::upload_media(&file).await {
                Ok(record) => {
                    file_handle.set_value(None);
                    set_session.update(|s| s.finish_submit(Ok(())));
                    on_upload_success(record);
                }
                Err(err) => {
                    gloo::console::error!(format!("Upload failed: {err}"));
                    set_session.update(|s| s.finish_submit(Err(err.to_string())));
                }
            }
        });
    };

    let has_file = move || session.with(|s| s.has_file());
    let file_name = move || session.with(|s| s.file_name().unwrap_or_default().to_string());
    let preview = move || session.with(|s| s.preview().map(str::to_string));
    let error_message = move || session.with(|s| s.last_error().map(str::to_string));
    let submitting = move || session.with(|s| s.is_submitting());

    view! {
        <div class="upload-container">
            <div
                class=move || {
                    let mut classes = vec!["drop-zone"];
                    if has_file() {
                        classes.push("has-file");
                    }
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=open_picker
            >
                <Show
                    when=has_file
                    fallback=|| view! {
                        <div class="upload-prompt">
                            <h3>"Drag & Drop or Click to Upload"</h3>
                            <p class="text-muted">"Supports JPG, PNG, MP4"</p>
                        </div>
                    }
                >
                    <div class="file-preview">
                        <div class="preview-content">
                            {move || match preview() {
                                Some(data_url) => view! {
                                    <img src=data_url alt="Preview" class="image-preview" />
                                }
                                .into_any(),
                                None => view! {
                                    <div class="video-placeholder">
                                        <p>{file_name()}</p>
                                    </div>
                                }
                                .into_any(),
                            }}
                        </div>
                        <div class="file-info">
                            <span class="file-name">{file_name}</span>
                            <button class="remove-btn" on:click=on_clear>
                                "✕"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>

            <Show when=move || error_message().is_some()>
                <div class="error-message">
                    <span>{move || error_message().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="upload-actions">
                <button
                    class="upload-btn"
                    disabled=move || !has_file() || submitting()
                    on:click=on_submit
                >
                    {move || if submitting() { "Processing..." } else { "Run Detection" }}
                </button>
            </div>
        </div>
    }
}

/// 画像プレビューをData URLとして非同期に導出する。
/// 導出中に選択が替わった場合は世代番号の照合で結果が捨てられる
fn derive_preview(file: &File, epoch: u64, set_session: WriteSignal<UploadSession>) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            gloo::console::error!("Failed to create FileReader:", e);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                set_session.update(|s| {
                    s.set_preview(epoch, data_url);
                });
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(file) {
        gloo::console::error!("Failed to read file:", e);
    }
}
