//! Property Profile Page

use crm_core::domain::Property;
use crm_core::price::format_brl;
use leptos::prelude::*;

use crate::app::Page;
use crate::components::PropertyForm;
use crate::context::use_app_context;
use crate::store::{store_update_property, use_app_store, AppStateStoreFields};

#[component]
pub fn PropertyProfile(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(false);

    let property = Memo::new(move |_| store.properties().with(|all| all.iter().find(|p| p.id == id).cloned()));
    let back = ctx.clone();

    view! {
        <div class="profile-page">
            <button class="back-btn" on:click=move |_| back.navigate(Page::Properties)>"← Imóveis"</button>
            {move || match property.get() {
                None => view! { <p class="empty-state">"Imóvel não encontrado"</p> }.into_any(),
                Some(property) => view! {
                    <PropertyDetails property=property.clone() editing=editing />
                    <Show when=move || editing.get()>
                        <div class="modal-backdrop" on:click=move |_| editing.set(false)>
                            <div class="modal" on:click=|ev| ev.stop_propagation()>
                                <h2>"Editar Imóvel"</h2>
                                <PropertyForm
                                    property=property.clone()
                                    on_saved=move |saved: Property| {
                                        store_update_property(&store, saved);
                                        editing.set(false);
                                    }
                                    on_cancel=move |_| editing.set(false)
                                />
                            </div>
                        </div>
                    </Show>
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn PropertyDetails(property: Property, editing: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let owner = property.owner_id.clone().and_then(|owner_id| {
        store
            .owners()
            .with_untracked(|owners| owners.iter().find(|o| o.id == owner_id).map(|o| (o.id.clone(), o.name.clone())))
    });

    view! {
        <header class="profile-header">
            <h2>{property.title.clone()}</h2>
            <span class="status-pill" data-status=property.status.code().to_string()>{property.status.label().to_string()}</span>
            <p class="profile-subtitle">{format!("{} · {}", property.property_type.label(), property.location())}</p>
            <button class="edit-btn" on:click=move |_| editing.set(true)>"Editar"</button>
        </header>
        <section class="profile-card">
            <h3>"Informações"</h3>
            <dl>
                {property.description.clone().map(|text| view! { <dt>"Descrição"</dt><dd>{text}</dd> })}
                <dt>"Preço"</dt>
                <dd class="price">{format_brl(property.price)}</dd>
                <dt>"Endereço"</dt>
                <dd>{property.address.clone()}</dd>
                <dt>"Cidade"</dt>
                <dd>{property.location()}</dd>
                {property.zip_code.clone().map(|zip| view! { <dt>"CEP"</dt><dd>{zip}</dd> })}
                {property.bedrooms.map(|n| view! { <dt>"Quartos"</dt><dd>{n}</dd> })}
                {property.bathrooms.map(|n| view! { <dt>"Banheiros"</dt><dd>{n}</dd> })}
                {property.area.map(|a| view! { <dt>"Área"</dt><dd>{format!("{a}m²")}</dd> })}
                <dt>"Proprietário"</dt>
                <dd>
                    {match owner {
                        Some((owner_id, name)) => view! {
                            <a class="link" on:click=move |_| ctx.navigate(Page::OwnerProfile(owner_id.clone()))>{name}</a>
                        }.into_any(),
                        None => view! { <span>"Não informado"</span> }.into_any(),
                    }}
                </dd>
            </dl>
        </section>
    }
}
