//! ヘッダーコンポーネント

use leptos::prelude::*;

use crate::theme::Theme;

#[component]
pub fn Header<F>(theme: ReadSignal<Theme>, on_toggle_theme: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <header class="header">
            <h1>"Smart Vehicle Violation Detection"</h1>
            <div class="header-actions">
                <span class="status-badge">"System Online"</span>
                <button
                    class="theme-toggle"
                    on:click={
                        let on_toggle_theme = on_toggle_theme.clone();
                        move |_| on_toggle_theme(())
                    }
                >
                    {move || match theme.get() {
                        Theme::Dark => "Light Mode",
                        Theme::Light => "Dark Mode",
                    }}
                </button>
            </div>
        </header>
    }
}
