//! 検出結果ビュー
//!
//! 表示中レコードをpresenterでビューモデルに変換して描画する。
//! レコードなしはプレースホルダ（エラーではない）

use leptos::prelude::*;

use crate::api;
use crate::components::format_timestamp;
use ecoscout_common::{present, DetectionRecord, DetectionView, MediaView, ResultView};

#[component]
pub fn Results(record: ReadSignal<Option<DetectionRecord>>) -> impl IntoView {
    let result_view = move || record.with(|r| r.as_ref().map(present));

    view! {
        <Show
            when=move || result_view().is_some()
            fallback=|| view! {
                <div class="results-empty">
                    <div class="empty-state">
                        <h3>"No Results Yet"</h3>
                        <p>"Upload an image or video to see detection results here."</p>
                    </div>
                </div>
            }
        >
            {move || result_view().map(render_result)}
        </Show>
    }
}

fn render_result(result: ResultView) -> impl IntoView {
    let report_id = result.record_id.clone();
    let timestamp = format_timestamp(&result.timestamp);

    // 動画が画像より優先される判断はpresenter側で済んでいる
    let media = match &result.media {
        MediaView::Video(url) => view! {
            <video controls=true src=url.clone() class="result-video" />
        }
        .into_any(),
        MediaView::Image(url) => view! {
            <img src=url.clone() alt="Annotated Detection" />
        }
        .into_any(),
        MediaView::Empty => view! {
            <div class="media-missing">
                <p>"No annotated media available."</p>
            </div>
        }
        .into_any(),
    };

    let detections = if result.is_clean() {
        view! {
            <div class="no-detections">
                <p>"No violations or objects detected."</p>
            </div>
        }
        .into_any()
    } else {
        view! {
            <div class="detections-list">
                {result
                    .detections
                    .into_iter()
                    .map(render_detection)
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="results-container">
            <div class="results-header">
                <h3>"Detection Analysis"</h3>
                <div class="header-actions">
                    <button
                        class="download-btn"
                        on:click=move |_| api::open_report(&report_id)
                    >
                        "Download Report"
                    </button>
                    <span class="timestamp">{timestamp}</span>
                </div>
            </div>

            <div class="results-grid">
                <div class="image-section">
                    <h4>"Annotated Output"</h4>
                    <div class="annotated-media-wrapper">{media}</div>
                    <p class="file-ref">"Source: " {result.source_file}</p>
                </div>

                <div class="data-section">
                    <h4>"Detected Violations & Objects"</h4>
                    {detections}
                </div>
            </div>
        </div>
    }
}

fn render_detection(det: DetectionView) -> impl IntoView {
    view! {
        <div class=format!("detection-card {}", det.style_key)>
            <div class="card-header">
                <span class="violation-type">{det.label}</span>
                <span class="confidence-badge">{format!("{}% Conf.", det.confidence)}</span>
            </div>
            <div class="card-details">
                {det.plate.map(|plate| view! {
                    <div class="plate-info">
                        <span class="plate-number">{plate.number}</span>
                        <span class="ocr-conf">{format!("(OCR: {}%)", plate.ocr_confidence)}</span>
                    </div>
                })}
                {det.is_violation.then(|| view! {
                    <div class="violation-alert">
                        <span>"Violation Detected"</span>
                    </div>
                })}
            </div>
        </div>
    }
}
