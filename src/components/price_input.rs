//! Price Input Component
//!
//! Text field for BRL amounts. Keystrokes are sanitized as they arrive and
//! the field flags text that does not parse as a positive amount.

use crm_core::price::{parse_price, sanitize_price_input};
use leptos::prelude::*;

#[component]
pub fn PriceInput(
    value: RwSignal<String>,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let invalid = move || value.with(|text| parse_price(text).is_invalid());

    view! {
        <span class="price-input">
            <span class="currency-prefix">"R$"</span>
            <input
                type="text"
                inputmode="decimal"
                class=move || if invalid() { format!("{class} invalid") } else { class.clone() }
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(sanitize_price_input(&event_target_value(&ev)))
            />
        </span>
        <Show when=invalid>
            <span class="field-error">"Valor inválido"</span>
        </Show>
    }
}
