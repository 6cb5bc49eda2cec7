//! Leads Table Component

use crm_core::domain::Lead;
use crm_core::filter::LeadFilter;
use crm_core::price::format_brl;
use crm_core::repository::LeadRepository;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::Page;
use crate::components::{BoardFilters, DeleteConfirmButton, LeadForm};
use crate::context::use_app_context;
use crate::store::{broker_name, store_remove_lead, use_app_store, AppStateStoreFields};

#[component]
pub fn LeadsTable() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let filter = RwSignal::new(LeadFilter::default());
    let editing = RwSignal::new(None::<Option<Lead>>);

    let rows = move || {
        let filter = filter.get();
        store
            .leads()
            .with(|leads| filter.apply(leads).into_iter().cloned().collect::<Vec<_>>())
    };

    let nav = ctx.clone();
    let open_profile = Callback::new(move |lead_id: String| nav.navigate(Page::LeadProfile(lead_id)));

    let delete = Callback::new(move |lead_id: String| {
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.backend().delete_lead(&lead_id).await {
                Ok(()) => {
                    store_remove_lead(&store, &lead_id);
                    ctx.reload();
                }
                Err(e) => log::error!("failed to delete lead {lead_id}: {e}"),
            }
        });
    });

    view! {
        <div class="leads-page">
            <div class="pipeline-toolbar">
                <BoardFilters filter=filter />
                <button class="primary-btn" on:click=move |_| editing.set(Some(None))>"Novo Lead"</button>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Nome"</th>
                        <th>"Telefone"</th>
                        <th>"E-mail"</th>
                        <th>"Status"</th>
                        <th>"Origem"</th>
                        <th>"Orçamento"</th>
                        <th>"Corretor"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|lead| (lead.id.clone(), lead.updated_at)
                        children=move |lead| {
                            let id = lead.id.clone();
                            let profile_id = lead.id.clone();
                            let broker = broker_name(&store, lead.assigned_broker_id.as_deref()).unwrap_or_default();
                            let open = lead.clone();
                            view! {
                                <tr on:click=move |_| editing.set(Some(Some(open.clone())))>
                                    <td>
                                        <a class="link" on:click=move |ev| {
                                            ev.stop_propagation();
                                            open_profile.run(profile_id.clone());
                                        }>{lead.name}</a>
                                    </td>
                                    <td>{lead.phone}</td>
                                    <td>{lead.email.unwrap_or_default()}</td>
                                    <td>
                                        <span class="status-pill" data-status=lead.status.code().to_string()>
                                            {lead.status.label().to_string()}
                                        </span>
                                    </td>
                                    <td>{lead.origin.label().to_string()}</td>
                                    <td>{format_brl(lead.budget)}</td>
                                    <td>{broker}</td>
                                    <td>
                                        <DeleteConfirmButton
                                            button_class="delete-btn"
                                            on_confirm=move |_| delete.run(id.clone())
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            {move || editing.get().map(|lead| view! {
                <LeadForm lead=lead on_close=move |_| editing.set(None) />
            })}
        </div>
    }
}
