//! Lead Form Component
//!
//! Modal form for creating a lead or editing an existing one. Status and
//! origin are only written back when the user picks a different value.

use crm_core::domain::{Lead, LeadDraft, LeadUpdate, NewLead};
use crm_core::repository::LeadRepository;
use crm_core::DomainResult;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CodedSelect, PriceInput};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

enum Save {
    Create(NewLead),
    Update(String, LeadUpdate),
}

#[component]
pub fn LeadForm(lead: Option<Lead>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_edit = lead.is_some();
    let initial = lead.as_ref().map(LeadDraft::from_lead).unwrap_or_default();

    let name = RwSignal::new(initial.name);
    let phone = RwSignal::new(initial.phone);
    let email = RwSignal::new(initial.email);
    let status = RwSignal::new(initial.status);
    let origin = RwSignal::new(initial.origin);
    let budget = RwSignal::new(initial.budget);
    let broker_id = RwSignal::new(initial.broker_id);
    let tags = RwSignal::new(initial.tags);
    let notes = RwSignal::new(initial.notes);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let draft = LeadDraft {
            name: name.get_untracked(),
            phone: phone.get_untracked(),
            email: email.get_untracked(),
            status: status.get_untracked(),
            origin: origin.get_untracked(),
            budget: budget.get_untracked(),
            broker_id: broker_id.get_untracked(),
            tags: tags.get_untracked(),
            notes: notes.get_untracked(),
        };
        let payload = match &lead {
            Some(original) => draft.to_update(original).map(|update| Save::Update(original.id.clone(), update)),
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
        spawn_local(async move {
            let backend = ctx.backend();
            let result: DomainResult<Lead> = match payload {
                Save::Update(id, update) => backend.update_lead(&id, &update).await,
                Save::Create(new_lead) => backend.create_lead(&new_lead).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    log::info!("saved lead {}", saved.id);
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => {
                    log::error!("failed to save lead: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <form class="lead-form modal" on:submit=on_submit on:click=|ev| ev.stop_propagation()>
                <h2>{if is_edit { "Editar Lead" } else { "Novo Lead" }}</h2>
                <label>
                    "Nome"
                    <input type="text" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Telefone"
                    <input type="tel" prop:value=move || phone.get() on:input=move |ev| phone.set(event_target_value(&ev)) />
                </label>
                <label>
                    "E-mail"
                    <input type="email" prop:value=move || email.get() on:input=move |ev| email.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Status"
                    <CodedSelect value=status />
                </label>
                <label>
                    "Origem"
                    <CodedSelect value=origin />
                </label>
                <label>
                    "Orçamento"
                    <PriceInput value=budget placeholder="350.000,00" />
                </label>
                <label>
                    "Corretor"
                    <select prop:value=move || broker_id.get() on:change=move |ev| broker_id.set(event_target_value(&ev))>
                        <option value="">"Sem corretor"</option>
                        <For
                            each=move || store.brokers().get()
                            key=|broker| broker.id.clone()
                            children=move |broker| view! { <option value=broker.id>{broker.name}</option> }
                        />
                    </select>
                </label>
                <label>
                    "Tags"
                    <input type="text" placeholder="separadas por vírgula" prop:value=move || tags.get() on:input=move |ev| tags.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Observações"
                    <textarea prop:value=move || notes.get() on:input=move |ev| notes.set(event_target_value(&ev))></textarea>
                </label>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="form-actions">
                    <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button type="submit" class="primary-btn" disabled=move || saving.get()>
                        {move || if saving.get() { "Salvando..." } else { "Salvar" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
