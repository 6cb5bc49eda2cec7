//! Board Filters Component
//!
//! Search box plus broker and origin selects above the board and the
//! leads table.

use crm_core::domain::LeadOrigin;
use crm_core::filter::LeadFilter;
use crm_core::labels::CodeLabel;
use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardFilters(filter: RwSignal<LeadFilter>) -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="board-filters">
            <input
                type="search"
                class="filter-search"
                placeholder="Buscar por nome, e-mail ou telefone..."
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.search = value);
                }
            />
            <select
                class="filter-broker"
                prop:value=move || filter.with(|f| f.broker_id.clone().unwrap_or_default())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.broker_id = (!value.is_empty()).then_some(value));
                }
            >
                <option value="">"Todos os corretores"</option>
                <For
                    each=move || store.brokers().get()
                    key=|broker| broker.id.clone()
                    children=move |broker| view! { <option value=broker.id>{broker.name}</option> }
                />
            </select>
            <select
                class="filter-origin"
                prop:value=move || filter.with(|f| f.origin.map(|o| o.code().to_string()).unwrap_or_default())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.origin = LeadOrigin::from_code(&value));
                }
            >
                <option value="">"Todas as origens"</option>
                {LeadOrigin::ALL.iter().map(|origin| view! {
                    <option value=origin.code()>{origin.label()}</option>
                }).collect_view()}
            </select>
            <Show when=move || filter.with(LeadFilter::is_active)>
                <button class="filter-clear" on:click=move |_| filter.update(LeadFilter::clear)>
                    "Limpar filtros"
                </button>
            </Show>
        </div>
    }
}
