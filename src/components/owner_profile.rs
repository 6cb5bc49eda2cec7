//! Owner Profile Page
//!
//! Owner details with edit dialog, timestamped notes, the owner's
//! properties and a form to register a new one.

use chrono::Local;
use crm_core::domain::{append_note, Owner, OwnerDraft, OwnerUpdate, Property};
use crm_core::price::format_brl;
use crm_core::repository::{OwnerRepository, PropertyRepository};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::Page;
use crate::components::{CodedSelect, PropertyForm};
use crate::context::use_app_context;
use crate::store::{store_update_owner, use_app_store, AppStateStoreFields};

fn count_label(count: usize) -> String {
    match count {
        1 => "1 imóvel cadastrado".to_string(),
        n => format!("{n} imóveis cadastrados"),
    }
}

#[component]
pub fn OwnerProfile(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let owner_id = id.clone();
    let owner = Memo::new(move |_| store.owners().with(|owners| owners.iter().find(|o| o.id == owner_id).cloned()));

    // Fetched separately so the list follows the backend's owner filter
    let properties = RwSignal::new(Vec::<Property>::new());
    let list_ctx = ctx.clone();
    let list_id = id.clone();
    Effect::new(move |_| {
        list_ctx.reload_trigger.track();
        let backend = list_ctx.backend();
        let owner_id = list_id.clone();
        spawn_local(async move {
            match backend.list_properties_for_owner(&owner_id).await {
                Ok(rows) => {
                    properties.try_set(rows);
                }
                Err(e) => log::error!("failed to load properties of {owner_id}: {e}"),
            }
        });
    });

    let editing = RwSignal::new(false);
    let back = ctx.clone();

    view! {
        <div class="profile-page">
            <button class="back-btn" on:click=move |_| back.navigate(Page::Owners)>"← Proprietários"</button>
            {move || match owner.get() {
                None => view! { <p class="empty-state">"Proprietário não encontrado"</p> }.into_any(),
                Some(owner) => view! {
                    <OwnerDetails owner=owner.clone() count=Signal::derive(move || properties.with(Vec::len)) editing=editing />
                    <Show when=move || editing.get()>
                        <OwnerEditDialog owner=owner.clone() editing=editing />
                    </Show>
                }.into_any(),
            }}
            <section class="profile-card">
                <h2>{move || format!("Imóveis ({})", properties.with(Vec::len))}</h2>
                <Show
                    when=move || properties.with(|p| !p.is_empty())
                    fallback=|| view! { <p class="empty-state">"Nenhum imóvel cadastrado"</p> }
                >
                    <For
                        each=move || properties.get()
                        key=|property| property.id.clone()
                        children=move |property| view! { <OwnerPropertyRow property=property /> }
                    />
                </Show>
            </section>
            <OwnerActions owner_id=id />
        </div>
    }
}

#[component]
fn OwnerDetails(owner: Owner, count: Signal<usize>, editing: RwSignal<bool>) -> impl IntoView {
    view! {
        <header class="profile-header">
            <h2>{owner.name.clone()}</h2>
            <span class="status-pill" data-status=owner.status.code().to_string()>{owner.status.label().to_string()}</span>
            <p class="profile-subtitle">{move || count_label(count.get())}</p>
            <button class="edit-btn" on:click=move |_| editing.set(true)>"Editar"</button>
        </header>
        <section class="profile-card">
            <h3>"Informações"</h3>
            <dl>
                <dt>"E-mail"</dt>
                <dd>{owner.email.clone().unwrap_or_else(|| "Não informado".to_string())}</dd>
                <dt>"Telefone"</dt>
                <dd>{owner.phone.clone()}</dd>
                {owner.address.clone().map(|address| view! { <dt>"Endereço"</dt><dd>{address}</dd> })}
                {owner.cpf_cnpj.clone().map(|doc| view! { <dt>"CPF/CNPJ"</dt><dd>{doc}</dd> })}
                {owner.notes.clone().map(|notes| view! { <dt>"Observações"</dt><dd class="notes">{notes}</dd> })}
            </dl>
        </section>
    }
}

#[component]
fn OwnerPropertyRow(property: Property) -> impl IntoView {
    let ctx = use_app_context();
    let id = property.id.clone();
    let mut details = Vec::new();
    if let Some(bedrooms) = property.bedrooms {
        details.push(format!("{bedrooms} quartos"));
    }
    if let Some(bathrooms) = property.bathrooms {
        details.push(format!("{bathrooms} banheiros"));
    }
    if let Some(area) = property.area {
        details.push(format!("{area}m²"));
    }

    view! {
        <div class="property-row" on:click=move |_| ctx.navigate(Page::PropertyProfile(id.clone()))>
            <div class="property-row-header">
                <strong>{property.title.clone()}</strong>
                <span>{property.property_type.label().to_string()}</span>
                <span class="status-pill" data-status=property.status.code().to_string()>{property.status.label().to_string()}</span>
            </div>
            {property.price.map(|price| view! { <p class="price">{format_brl(Some(price))}</p> })}
            <p class="location">{format!("{}, {}", property.address, property.location())}</p>
            {(!details.is_empty()).then(|| view! { <p class="details">{details.join(" · ")}</p> })}
        </div>
    }
}

#[component]
fn OwnerEditDialog(owner: Owner, editing: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let initial = OwnerDraft::from_owner(&owner);

    let name = RwSignal::new(initial.name);
    let phone = RwSignal::new(initial.phone);
    let email = RwSignal::new(initial.email);
    let cpf_cnpj = RwSignal::new(initial.cpf_cnpj);
    let address = RwSignal::new(initial.address);
    let status = RwSignal::new(initial.status);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = OwnerDraft {
            name: name.get_untracked(),
            phone: phone.get_untracked(),
            email: email.get_untracked(),
            cpf_cnpj: cpf_cnpj.get_untracked(),
            address: address.get_untracked(),
            status: status.get_untracked(),
        };
        let update = match draft.to_update(&owner) {
            Ok(update) => update,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let ctx = ctx.clone();
        let id = owner.id.clone();
        spawn_local(async move {
            match ctx.backend().update_owner(&id, &update).await {
                Ok(saved) => {
                    log::info!("updated owner {id}");
                    store_update_owner(&store, saved);
                    editing.set(false);
                }
                Err(e) => {
                    log::error!("failed to update owner {id}: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let field = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <label>
                {label}
                <input type="text" prop:value=move || value.get() on:input=move |ev| value.set(event_target_value(&ev)) />
            </label>
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| editing.set(false)>
            <form class="owner-form modal" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
                <h2>"Editar Proprietário"</h2>
                {field("Nome *", name)}
                {field("Telefone *", phone)}
                {field("E-mail", email)}
                {field("CPF/CNPJ", cpf_cnpj)}
                {field("Endereço", address)}
                <label>
                    "Status"
                    <CodedSelect value=status />
                </label>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="form-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| editing.set(false)>"Cancelar"</button>
                    <button type="submit" class="primary-btn">"Salvar"</button>
                </div>
            </form>
        </div>
    }
}

/// Which action tab is open
#[derive(Clone, Copy, PartialEq, Eq)]
enum OwnerTab {
    Note,
    Property,
}

#[component]
fn OwnerActions(owner_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let tab = RwSignal::new(OwnerTab::Note);
    let note = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let note_owner = owner_id.clone();
    let save_note = move |_: web_sys::MouseEvent| {
        let existing = store
            .owners()
            .with_untracked(|owners| owners.iter().find(|o| o.id == note_owner).and_then(|o| o.notes.clone()));
        let Some(notes) = append_note(existing.as_deref(), &note.get_untracked(), &Local::now()) else {
            return;
        };
        let ctx = ctx.clone();
        let id = note_owner.clone();
        spawn_local(async move {
            match ctx.backend().update_owner(&id, &OwnerUpdate::notes(notes)).await {
                Ok(saved) => {
                    store_update_owner(&store, saved);
                    note.set(String::new());
                    error.set(None);
                }
                Err(e) => {
                    log::error!("failed to add note to owner {id}: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <section class="profile-card">
            <h3>"Ações"</h3>
            <div class="tab-list">
                <button class=move || if tab.get() == OwnerTab::Note { "tab active" } else { "tab" } on:click=move |_| tab.set(OwnerTab::Note)>
                    "Nova Nota"
                </button>
                <button class=move || if tab.get() == OwnerTab::Property { "tab active" } else { "tab" } on:click=move |_| tab.set(OwnerTab::Property)>
                    "Adicionar Imóvel"
                </button>
            </div>
            <Show when=move || tab.get() == OwnerTab::Note>
                <label>
                    "Adicionar Nota"
                    <textarea rows="4" placeholder="Digite sua nota aqui..." prop:value=move || note.get() on:input=move |ev| note.set(event_target_value(&ev))></textarea>
                </label>
                <button class="primary-btn" on:click=save_note.clone()>"Salvar Nota"</button>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            </Show>
            <Show when=move || tab.get() == OwnerTab::Property>
                <PropertyForm owner_id=owner_id.clone() on_saved=move |saved: Property| log::debug!("registered {}", saved.id) />
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "0 imóveis cadastrados");
        assert_eq!(count_label(1), "1 imóvel cadastrado");
        assert_eq!(count_label(3), "3 imóveis cadastrados");
    }
}
