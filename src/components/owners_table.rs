//! Owners Table Component

use crm_core::filter::OwnerFilter;
use leptos::prelude::*;

use crate::app::Page;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn OwnersTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let filter = RwSignal::new(OwnerFilter::default());

    let rows = move || {
        let filter = filter.get();
        store
            .owners()
            .with(|owners| owners.iter().filter(|o| filter.matches(o)).cloned().collect::<Vec<_>>())
    };

    let property_count = move |owner_id: &str| {
        store
            .properties()
            .with(|properties| properties.iter().filter(|p| p.owner_id.as_deref() == Some(owner_id)).count())
    };

    view! {
        <div class="owners-page">
            <input
                type="search"
                class="filter-search"
                placeholder="Buscar proprietário..."
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.search = value);
                }
            />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Nome"</th>
                        <th>"Telefone"</th>
                        <th>"E-mail"</th>
                        <th>"CPF/CNPJ"</th>
                        <th>"Status"</th>
                        <th>"Imóveis"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|owner| owner.id.clone()
                        children=move |owner| {
                            let id = owner.id.clone();
                            let profile_id = owner.id.clone();
                            let ctx = ctx.clone();
                            view! {
                                <tr on:click=move |_| ctx.navigate(Page::OwnerProfile(profile_id.clone()))>
                                    <td><a class="link">{owner.name}</a></td>
                                    <td>{owner.phone}</td>
                                    <td>{owner.email.unwrap_or_default()}</td>
                                    <td>{owner.cpf_cnpj.unwrap_or_default()}</td>
                                    <td>{owner.status.label().to_string()}</td>
                                    <td>{move || property_count(&id)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
