//! Delete Confirm Button Component

use leptos::prelude::*;

/// Inline two-step delete: the first click asks, the second confirms.
///
/// Clicks never reach the surrounding row, which opens the edit form.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let asking = RwSignal::new(false);

    view! {
        <Show
            when=move || asking.get()
            fallback=move || {
                let class = button_class.clone();
                view! {
                    <button
                        class=class
                        title="Excluir"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            asking.set(true);
                        }
                    >
                        "×"
                    </button>
                }
            }
        >
            <span class="delete-confirm" on:click=|ev| ev.stop_propagation()>
                <span class="delete-confirm-text">"Excluir?"</span>
                <button class="confirm-btn" on:click=move |_| {
                    asking.set(false);
                    on_confirm.run(());
                }>"Sim"</button>
                <button class="cancel-btn" on:click=move |_| asking.set(false)>"Não"</button>
            </span>
        </Show>
    }
}
