//! 検出履歴ビュー
//!
//! ビュー表示のたびに/historyを取得し、複数選択つきのグリッドで表示する。
//! キャッシュと選択の整合はecoscout_common::HistoryStateが守る。
//! 削除は確認ダイアログを挟んだ一括リクエスト1回で、成功時だけ
//! キャッシュから除去する。レポート取得は選択IDごとに独立して開く

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::format_timestamp;
use ecoscout_common::{DetectionRecord, HistoryState};

#[component]
pub fn HistoryView<F>(on_view_record: F) -> impl IntoView
where
    F: Fn(DetectionRecord) + 'static + Clone + Send + Sync,
{
    let (history, set_history) = signal(HistoryState::new());
    let (loading, set_loading) = signal(true);
    let (action_error, set_action_error) = signal(None::<String>);

    let reload = move || {
        set_loading.set(true);
        set_action_error.set(None);
        let mut token = 0;
        set_history.update(|h| token = h.begin_load());
        spawn_local(async move {
            match api::fetch_history().await {
                Ok(records) => {
                    // 古いトークンの応答はapply_loadが捨てる
                    set_history.update(|h| {
                        h.apply_load(token, records);
                    });
                }
                Err(err) => {
                    gloo::console::error!(format!("Failed to fetch history: {err}"));
                    set_action_error.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // ビュー表示時にロード
    reload();

    let on_toggle_all = move |_| {
        set_history.update(|h| h.toggle_select_all());
    };

    let on_delete = move |_| {
        let count = history.with_untracked(|h| h.selected_count());
        if count == 0 {
            return;
        }
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!(
                    "Are you sure you want to delete {count} records?"
                ))
                .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let ids = history.with_untracked(|h| h.selected_ids());
        spawn_local(async move {
            match api::delete_records(&ids).await {
                Ok(()) => {
                    set_action_error.set(None);
                    set_history.update(|h| {
                        h.remove_selected();
                    });
                }
                Err(err) => {
                    // 失敗時はキャッシュも選択もそのまま
                    gloo::console::error!(format!("Failed to delete records: {err}"));
                    set_action_error.set(Some(err.to_string()));
                }
            }
        });
    };

    let on_export = move |_| {
        // 各レポートは独立に開く。1件の失敗が他を妨げない。選択は残す
        for id in history.with_untracked(|h| h.selected_ids()) {
            api::open_report(&id);
        }
    };

    let selected_count = move || history.with(|h| h.selected_count());
    let records = move || history.with(|h| h.records().to_vec());
    let on_view_record = StoredValue::new(on_view_record);

    view! {
        <div class="history-container">
            <div class="history-header">
                <h3>"Detection History"</h3>
                <div class="history-actions">
                    <button
                        class="download-btn"
                        disabled=move || selected_count() == 0
                        on:click=on_export
                    >
                        {move || format!("Download Selected ({})", selected_count())}
                    </button>
                    <button
                        class="delete-btn"
                        disabled=move || selected_count() == 0
                        on:click=on_delete
                    >
                        {move || format!("Delete Selected ({})", selected_count())}
                    </button>
                </div>
            </div>

            <Show when=move || action_error.get().is_some()>
                <div class="error-message">
                    <span>{move || action_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading history..."</div> }
            >
                <Show
                    when=move || !history.with(|h| h.is_empty())
                    fallback=|| view! {
                        <div class="history-empty">
                            <p>"No detection history found."</p>
                        </div>
                    }
                >
                    <div class="history-grid">
                        <div class="grid-header">
                            <div class="col-select" on:click=on_toggle_all>
                                <input
                                    type="checkbox"
                                    prop:checked=move || history.with(|h| h.all_selected())
                                />
                            </div>
                            <div class="col-preview">"Preview"</div>
                            <div class="col-date">"Date"</div>
                            <div class="col-violations">"Violations"</div>
                            <div class="col-actions">"Actions"</div>
                        </div>

                        <div class="grid-body">
                            <For
                                each=records
                                key=|record| record.id.clone()
                                children={
                                    move |record: DetectionRecord| {
                                        let on_view_record = on_view_record.get_value();
                                        view! {
                                            <HistoryRow
                                                record=record
                                                history=history
                                                set_history=set_history
                                                on_view_record=on_view_record
                                            />
                                        }
                                    }
                                }
                            />
                        </div>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn HistoryRow<F>(
    record: DetectionRecord,
    history: ReadSignal<HistoryState>,
    set_history: WriteSignal<HistoryState>,
    on_view_record: F,
) -> impl IntoView
where
    F: Fn(DetectionRecord) + 'static + Clone + Send + Sync,
{
    let is_selected = {
        let id = record.id.clone();
        move || history.with(|h| h.is_selected(&id))
    };
    let is_selected_class = is_selected.clone();

    let on_toggle = {
        let id = record.id.clone();
        move |_| {
            let id = id.clone();
            set_history.update(|h| h.toggle_select(&id));
        }
    };

    let report_id = record.id.clone();
    let date_label = format_timestamp(&record.timestamp);
    let preview_url = record.annotated_image_url.clone();

    let tags = if record.detections.is_empty() {
        view! { <span class="no-violation">"No Violations"</span> }.into_any()
    } else {
        view! {
            <div class="tags">
                {record
                    .detections
                    .iter()
                    .map(|d| {
                        view! {
                            <span class=format!("tag {}", d.style_key())>
                                {d.violation_type.clone()}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    let view_record = record.clone();
    let on_view = move |_| on_view_record(view_record.clone());

    view! {
        <div class=move || {
            if is_selected_class() {
                "grid-row selected"
            } else {
                "grid-row"
            }
        }>
            <div class="col-select" on:click=on_toggle>
                <input type="checkbox" prop:checked=is_selected />
            </div>
            <div class="col-preview">
                {preview_url
                    .map(|url| view! { <img src=url alt="Preview" /> }.into_any())
                    .unwrap_or_else(|| {
                        view! { <div class="preview-placeholder">"Video"</div> }.into_any()
                    })}
            </div>
            <div class="col-date">
                <span>{date_label}</span>
            </div>
            <div class="col-violations">{tags}</div>
            <div class="col-actions">
                <button class="view-btn" on:click=on_view>
                    "View"
                </button>
                <button
                    class="icon-btn"
                    title="Download PDF"
                    on:click=move |_| api::open_report(&report_id)
                >
                    "PDF"
                </button>
            </div>
        </div>
    }
}
