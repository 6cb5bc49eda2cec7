//! Navigation Bar Component
//!
//! Page tabs, theme toggle and session controls.

use leptos::prelude::*;

use crate::app::Page;
use crate::context::use_app_context;
use crate::session::Theme;

#[component]
pub fn NavBar(page: RwSignal<Page>) -> impl IntoView {
    let ctx = use_app_context();
    let demo = ctx.config.is_demo();
    let theme = ctx.theme;
    let session = ctx.session;
    let theme_ctx = ctx.clone();

    view! {
        <nav class="nav-bar">
            <span class="brand">"Realty CRM"</span>
            {Page::TABS.iter().map(|tab| {
                let title = tab.title();
                let (current, target) = (tab.clone(), tab.clone());
                view! {
                    <button
                        class=move || if page.with(Page::tab) == current { "nav-tab active" } else { "nav-tab" }
                        on:click=move |_| page.set(target.clone())
                    >
                        {title}
                    </button>
                }
            }).collect_view()}
            <span class="nav-spacer"></span>
            {demo.then(|| view! { <span class="demo-badge">"Demonstração"</span> })}
            <button class="theme-btn" on:click=move |_| theme_ctx.toggle_theme()>
                {move || match theme.get() {
                    Theme::Light => "☾",
                    Theme::Dark => "☀",
                }}
            </button>
            <Show when=move || session.with(|s| s.access_token.is_some())>
                {
                    let ctx = ctx.clone();
                    view! {
                        <button class="sign-out-btn" on:click=move |_| ctx.sign_out()>"Sair"</button>
                    }
                }
            </Show>
        </nav>
    }
}
