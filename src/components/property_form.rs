//! Property Form Component
//!
//! Full property form, used to register a property for an owner and to edit
//! an existing one from its profile.

use crm_core::domain::{NewProperty, Property, PropertyDraft, PropertyUpdate};
use crm_core::repository::PropertyRepository;
use crm_core::DomainResult;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CodedSelect, PriceInput};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

enum Save {
    Create(NewProperty),
    Update(String, PropertyUpdate),
}

/// `property` is edited in place when given; otherwise a new property is
/// created for `owner_id`.
#[component]
pub fn PropertyForm(
    #[prop(optional)] property: Option<Property>,
    #[prop(optional, into)] owner_id: Option<String>,
    #[prop(into)] on_saved: Callback<Property>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_edit = property.is_some();
    let initial = match (&property, owner_id.as_deref()) {
        (Some(property), _) => PropertyDraft::from_property(property),
        (None, Some(owner)) => PropertyDraft::for_owner(owner),
        (None, None) => PropertyDraft::default(),
    };
    let blank = initial.clone();

    let title = RwSignal::new(initial.title);
    let description = RwSignal::new(initial.description);
    let property_type = RwSignal::new(initial.property_type);
    let status = RwSignal::new(initial.status);
    let price = RwSignal::new(initial.price);
    let address = RwSignal::new(initial.address);
    let city = RwSignal::new(initial.city);
    let state = RwSignal::new(initial.state);
    let zip_code = RwSignal::new(initial.zip_code);
    let bedrooms = RwSignal::new(initial.bedrooms);
    let bathrooms = RwSignal::new(initial.bathrooms);
    let area = RwSignal::new(initial.area);
    let owner = RwSignal::new(initial.owner_id);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let reset = move || {
        let blank = blank.clone();
        title.set(blank.title);
        description.set(blank.description);
        property_type.set(blank.property_type);
        status.set(blank.status);
        price.set(blank.price);
        address.set(blank.address);
        city.set(blank.city);
        state.set(blank.state);
        zip_code.set(blank.zip_code);
        bedrooms.set(blank.bedrooms);
        bathrooms.set(blank.bathrooms);
        area.set(blank.area);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let draft = PropertyDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            property_type: property_type.get_untracked(),
            status: status.get_untracked(),
            price: price.get_untracked(),
            address: address.get_untracked(),
            city: city.get_untracked(),
            state: state.get_untracked(),
            zip_code: zip_code.get_untracked(),
            bedrooms: bedrooms.get_untracked(),
            bathrooms: bathrooms.get_untracked(),
            area: area.get_untracked(),
            owner_id: owner.get_untracked(),
        };
        let payload = match &property {
            Some(original) => draft
                .to_update(original)
                .map(|update| Save::Update(original.id.clone(), update)),
            None => draft.to_new().map(Save::Create),
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        error.set(None);
        saving.set(true);
        let ctx = ctx.clone();
        let reset = reset.clone();
        spawn_local(async move {
            let backend = ctx.backend();
            let result: DomainResult<Property> = match payload {
                Save::Update(id, update) => backend.update_property(&id, &update).await,
                Save::Create(new_property) => backend.create_property(&new_property).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    log::info!("saved property {}", saved.id);
                    if !is_edit {
                        reset();
                    }
                    ctx.reload();
                    on_saved.run(saved);
                }
                Err(e) => {
                    log::error!("failed to save property: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let text_field = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <label>
                {label}
                <input type="text" prop:value=move || value.get() on:input=move |ev| value.set(event_target_value(&ev)) />
            </label>
        }
    };

    view! {
        <form class="property-form" on:submit=on_submit>
            <h3>"Informações Básicas"</h3>
            {text_field("Título *", title)}
            <label>
                "Tipo *"
                <CodedSelect value=property_type />
            </label>
            <label>
                "Descrição"
                <textarea rows="3" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
            </label>
            <label>
                "Status *"
                <CodedSelect value=status />
            </label>
            <label>
                "Preço"
                <PriceInput value=price placeholder="350.000,00" />
            </label>

            <h3>"Localização"</h3>
            {text_field("Endereço *", address)}
            {text_field("Cidade *", city)}
            <label>
                "Estado *"
                <input type="text" maxlength="2" placeholder="SP" prop:value=move || state.get() on:input=move |ev| state.set(event_target_value(&ev)) />
            </label>
            {text_field("CEP", zip_code)}

            <h3>"Detalhes"</h3>
            {text_field("Quartos", bedrooms)}
            {text_field("Banheiros", bathrooms)}
            {text_field("Área (m²)", area)}
            {is_edit.then(|| view! {
                <label>
                    "Proprietário"
                    <select prop:value=move || owner.get() on:change=move |ev| owner.set(event_target_value(&ev))>
                        <option value="">"Nenhum"</option>
                        <For
                            each=move || store.owners().get()
                            key=|owner| owner.id.clone()
                            children=move |owner| view! { <option value=owner.id>{owner.name}</option> }
                        />
                    </select>
                </label>
            })}

            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <div class="form-actions">
                {on_cancel.map(|cancel| view! {
                    <button type="button" class="cancel-btn" on:click=move |_| cancel.run(())>"Cancelar"</button>
                })}
                <button type="submit" class="primary-btn" disabled=move || saving.get()>
                    {move || match (saving.get(), is_edit) {
                        (true, _) => "Salvando...",
                        (false, true) => "Salvar alterações",
                        (false, false) => "Cadastrar Imóvel",
                    }}
                </button>
            </div>
        </form>
    }
}
