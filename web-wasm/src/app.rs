//! アプリケーションシェル
//!
//! activeViewと表示中レコードをここで保持する。ビューの切り替えは
//! 操作者のナビゲーション、アップロード成功、履歴のView操作の3経路のみ。
//! 表示中レコードはセッション最新結果か履歴エントリへのビューであって、
//! シェルが所有するデータではない

use leptos::prelude::*;

use crate::components::{
    about::About, header::Header, history::HistoryView, results::Results, sidebar::Sidebar,
    upload_media::UploadMedia,
};
use crate::theme::Theme;
use ecoscout_common::DetectionRecord;

/// コンソールのビュー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Dashboard,
    Upload,
    Results,
    History,
    About,
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (active_view, set_active_view) = signal(ActiveView::Dashboard);
    let (displayed_record, set_displayed_record) = signal(None::<DetectionRecord>);
    let (theme, set_theme) = signal(Theme::load());

    // テーマ変更の入口はここだけ
    let on_toggle_theme = move |_| {
        let next = theme.get_untracked().toggled();
        next.store();
        set_theme.set(next);
    };

    // アップロード成功と履歴のViewはどちらも結果ビューへ遷移する
    let show_record = move |record: DetectionRecord| {
        set_displayed_record.set(Some(record));
        set_active_view.set(ActiveView::Results);
    };

    view! {
        <div class=move || format!("app-container {}", theme.get().class_name())>
            <Sidebar active_view=active_view set_active_view=set_active_view />
            <div class="main-content">
                <Header theme=theme on_toggle_theme=on_toggle_theme />
                <div class="content-area">
                    {move || match active_view.get() {
                        ActiveView::Dashboard => view! {
                            <Dashboard set_active_view=set_active_view />
                        }
                        .into_any(),
                        ActiveView::Upload => view! {
                            <div class="upload-view">
                                <h2>"Upload Media"</h2>
                                <p class="subtitle">
                                    "Upload images or videos for automated violation detection."
                                </p>
                                <UploadMedia on_upload_success=show_record />
                            </div>
                        }
                        .into_any(),
                        ActiveView::Results => view! {
                            <div class="results-view">
                                <h2>"Detection Results"</h2>
                                <Results record=displayed_record />
                            </div>
                        }
                        .into_any(),
                        ActiveView::History => view! {
                            <div class="history-view">
                                <h2>"Detection History"</h2>
                                <HistoryView on_view_record=show_record />
                            </div>
                        }
                        .into_any(),
                        ActiveView::About => view! { <About /> }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

/// ダッシュボード（情報表示のみ）
#[component]
fn Dashboard(set_active_view: WriteSignal<ActiveView>) -> impl IntoView {
    view! {
        <div class="dashboard-view">
            <div class="welcome-card">
                <h2>"Welcome to EcoScout"</h2>
                <p>"Smart Vehicle Littering & Smoke Emission Detection System"</p>
                <button
                    class="cta-btn"
                    on:click=move |_| set_active_view.set(ActiveView::Upload)
                >
                    "Start Detection"
                </button>
            </div>
            <div class="stats-grid">
                <div class="stat-card">
                    <h3>"System Status"</h3>
                    <p class="status-ok">"Operational"</p>
                </div>
                <div class="stat-card">
                    <h3>"Model"</h3>
                    <p>"YOLOv8 + EasyOCR"</p>
                </div>
                <div class="stat-card">
                    <h3>"Active Session"</h3>
                    <p>"Localhost"</p>
                </div>
            </div>
        </div>
    }
}
