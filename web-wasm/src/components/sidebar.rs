//! サイドバーナビゲーション

use leptos::prelude::*;

use crate::app::ActiveView;

const MENU_ITEMS: [(ActiveView, &str); 5] = [
    (ActiveView::Dashboard, "Dashboard"),
    (ActiveView::Upload, "Upload Media"),
    (ActiveView::Results, "Detection Results"),
    (ActiveView::History, "History"),
    (ActiveView::About, "About Us"),
];

#[component]
pub fn Sidebar(
    active_view: ReadSignal<ActiveView>,
    set_active_view: WriteSignal<ActiveView>,
) -> impl IntoView {
    view! {
        <div class="sidebar">
            <div class="sidebar-header">
                <h2>"EcoScout"</h2>
            </div>
            <nav class="sidebar-nav">
                {MENU_ITEMS
                    .into_iter()
                    .map(|(item, label)| {
                        view! {
                            <button
                                class=move || {
                                    if active_view.get() == item {
                                        "nav-item active"
                                    } else {
                                        "nav-item"
                                    }
                                }
                                on:click=move |_| set_active_view.set(item)
                            >
                                <span>{label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <div class="sidebar-footer">
                <p>"© 2025 EcoScout System"</p>
            </div>
        </div>
    }
}
