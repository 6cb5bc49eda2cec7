//! Properties Table Component
//!
//! Property listing with inline asking-price editing.

use crm_core::domain::Property;
use crm_core::price::{format_brl, parse_price};
use crm_core::repository::PropertyRepository;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::Page;
use crate::components::PriceInput;
use crate::context::use_app_context;
use crate::store::{store_update_property, use_app_store, AppStateStoreFields};

#[component]
pub fn PropertiesTable() -> impl IntoView {
    let store = use_app_store();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Imóvel"</th>
                    <th>"Tipo"</th>
                    <th>"Status"</th>
                    <th>"Localização"</th>
                    <th>"Detalhes"</th>
                    <th>"Preço"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || store.properties().get()
                    key=|property| (property.id.clone(), property.price.map(f64::to_bits))
                    children=move |property| view! { <PropertyRow property=property /> }
                />
            </tbody>
        </table>
    }
}

fn details(property: &Property) -> String {
    let mut parts = Vec::new();
    if let Some(bedrooms) = property.bedrooms {
        parts.push(format!("{bedrooms} dorm."));
    }
    if let Some(bathrooms) = property.bathrooms {
        parts.push(format!("{bathrooms} banh."));
    }
    if let Some(area) = property.area {
        parts.push(format!("{area} m²"));
    }
    parts.join(" · ")
}

#[component]
fn PropertyRow(property: Property) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(false);
    let draft = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let id = property.id.clone();
    let profile_id = property.id.clone();
    let price = property.price;
    let nav = ctx.clone();

    let save = move |_: web_sys::MouseEvent| {
        let value = match parse_price(&draft.get_untracked()).into_field("Preço") {
            Ok(value) => value,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let ctx = ctx.clone();
        let id = id.clone();
        spawn_local(async move {
            match ctx.backend().update_property_price(&id, value).await {
                Ok(updated) => {
                    editing.set(false);
                    error.set(None);
                    store_update_property(&store, updated);
                }
                Err(e) => {
                    log::error!("failed to update price of {id}: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let start_edit = move |_: web_sys::MouseEvent| {
        draft.set(price.map(|p| format!("{p:.2}").replace('.', ",")).unwrap_or_default());
        error.set(None);
        editing.set(true);
    };

    view! {
        <tr>
            <td>
                <a class="link" on:click=move |_| nav.navigate(Page::PropertyProfile(profile_id.clone()))>
                    {property.title.clone()}
                </a>
            </td>
            <td>{property.property_type.label().to_string()}</td>
            <td>{property.status.label().to_string()}</td>
            <td>{property.location()}</td>
            <td>{details(&property)}</td>
            <td>
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <span class="price">{format_brl(price)}</span>
                        <button class="edit-btn" on:click=start_edit>"Editar"</button>
                    }
                >
                    <PriceInput value=draft />
                    <button class="confirm-btn" on:click=save.clone()>"✓"</button>
                    <button class="cancel-btn" on:click=move |_| editing.set(false)>"✗"</button>
                </Show>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            </td>
        </tr>
    }
}
