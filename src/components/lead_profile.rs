//! Lead Profile Page
//!
//! Lead details, the properties the lead is interested in, an activity
//! timeline and actions for notes and scheduling.

use chrono::{Local, Utc};
use crm_core::domain::{append_note, EventDraft, Lead, LeadUpdate, NewLeadProperty, Property};
use crm_core::price::format_brl;
use crm_core::repository::{EventRepository, LeadPropertyRepository, LeadRepository};
use crm_core::timeline::{lead_timeline, TimelineKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::Page;
use crate::components::LeadForm;
use crate::context::use_app_context;
use crate::store::{broker_name, store_update_lead, use_app_store, AppStateStoreFields};

fn timeline_class(kind: TimelineKind) -> &'static str {
    match kind {
        TimelineKind::Created => "timeline-entry created",
        TimelineKind::Updated => "timeline-entry updated",
        TimelineKind::PastEvent => "timeline-entry past",
        TimelineKind::UpcomingEvent => "timeline-entry upcoming",
    }
}

#[component]
pub fn LeadProfile(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let editing = RwSignal::new(false);

    let lead_id = id.clone();
    let lead = Memo::new(move |_| store.leads().with(|leads| leads.iter().find(|l| l.id == lead_id).cloned()));
    let back = ctx.clone();

    view! {
        <div class="profile-page">
            <button class="back-btn" on:click=move |_| back.navigate(Page::Leads)>"← Leads"</button>
            {move || match lead.get() {
                None => view! { <p class="empty-state">"Lead não encontrado"</p> }.into_any(),
                Some(lead) => view! {
                    <LeadDetails lead=lead.clone() editing=editing />
                    <LeadTimeline lead=lead.clone() />
                    <Show when=move || editing.get()>
                        <LeadForm lead=Some(lead.clone()) on_close=move |_| editing.set(false) />
                    </Show>
                }.into_any(),
            }}
            <InterestedProperties lead_id=id.clone() />
            <LeadActions lead_id=id />
        </div>
    }
}

#[component]
fn LeadDetails(lead: Lead, editing: RwSignal<bool>) -> impl IntoView {
    let store = use_app_store();
    let broker = broker_name(&store, lead.assigned_broker_id.as_deref());
    let subtitle = match &broker {
        Some(name) => format!("{} · {}", lead.status.label(), name),
        None => lead.status.label().to_string(),
    };

    view! {
        <header class="profile-header">
            <h2>{lead.name.clone()}</h2>
            {lead.tags.iter().map(|tag| view! { <span class="tag">{tag.clone()}</span> }).collect_view()}
            <p class="profile-subtitle">{subtitle}</p>
            <button class="edit-btn" on:click=move |_| editing.set(true)>"Editar"</button>
        </header>
        <section class="profile-card">
            <h3>"Informações"</h3>
            <dl>
                <dt>"E-mail"</dt>
                <dd>{lead.email.clone().unwrap_or_else(|| "Não informado".to_string())}</dd>
                <dt>"Telefone"</dt>
                <dd>{lead.phone.clone()}</dd>
                <dt>"Origem"</dt>
                <dd>{lead.origin.label().to_string()}</dd>
                <dt>"Orçamento"</dt>
                <dd>{format_brl(lead.budget)}</dd>
                <dt>"Corretor Responsável"</dt>
                <dd>{broker.unwrap_or_else(|| "Sem corretor".to_string())}</dd>
                {lead.notes.clone().map(|notes| view! { <dt>"Observações"</dt><dd class="notes">{notes}</dd> })}
            </dl>
        </section>
    }
}

#[component]
fn LeadTimeline(lead: Lead) -> impl IntoView {
    let store = use_app_store();
    let entries = move || store.events().with(|events| lead_timeline(&lead, events, Utc::now()));

    view! {
        <section class="profile-card">
            <h3>"Histórico"</h3>
            <ol class="timeline">
                {move || entries().into_iter().map(|entry| view! {
                    <li class=timeline_class(entry.kind)>
                        <div class="timeline-header">
                            <strong>{entry.title}</strong>
                            <span class="timeline-date">
                                {entry.at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()}
                            </span>
                        </div>
                        {entry.description.map(|text| view! { <p>{text}</p> })}
                    </li>
                }).collect_view()}
            </ol>
        </section>
    }
}

#[component]
fn InterestedProperties(lead_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let linked = RwSignal::new(Vec::<Property>::new());
    let picked = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    // bumped after a link change to refetch this list only
    let refresh = RwSignal::new(0u32);

    let load_ctx = ctx.clone();
    let load_id = lead_id.clone();
    Effect::new(move |_| {
        refresh.track();
        load_ctx.reload_trigger.track();
        let backend = load_ctx.backend();
        let lead_id = load_id.clone();
        spawn_local(async move {
            match backend.lead_properties(&lead_id).await {
                Ok(rows) => {
                    linked.try_set(rows);
                }
                Err(e) => log::error!("failed to load properties of lead {lead_id}: {e}"),
            }
        });
    });

    let candidates = move || {
        linked.with(|linked| {
            store.properties().with(|all| {
                all.iter()
                    .filter(|p| !linked.iter().any(|l| l.id == p.id))
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    };

    let link_ctx = ctx.clone();
    let link_lead = lead_id.clone();
    let link = move |_: web_sys::MouseEvent| {
        let property_id = picked.get_untracked();
        if property_id.is_empty() {
            return;
        }
        let ctx = link_ctx.clone();
        let link = NewLeadProperty {
            lead_id: link_lead.clone(),
            property_id,
        };
        spawn_local(async move {
            match ctx.backend().link_property(&link).await {
                Ok(_) => {
                    picked.set(String::new());
                    error.set(None);
                    refresh.update(|n| *n += 1);
                }
                Err(e) => {
                    log::error!("failed to link {} to {}: {e}", link.property_id, link.lead_id);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let unlink = Callback::new(move |property_id: String| {
        let ctx = ctx.clone();
        let lead_id = lead_id.clone();
        spawn_local(async move {
            match ctx.backend().unlink_property(&lead_id, &property_id).await {
                Ok(()) => refresh.update(|n| *n += 1),
                Err(e) => {
                    log::error!("failed to unlink {property_id} from {lead_id}: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <section class="profile-card">
            <h3>"Imóveis de Interesse"</h3>
            <Show
                when=move || linked.with(|l| !l.is_empty())
                fallback=|| view! { <p class="empty-state">"Nenhum imóvel vinculado"</p> }
            >
                <For
                    each=move || linked.get()
                    key=|property| property.id.clone()
                    children=move |property| {
                        let ctx = use_app_context();
                        let (open_id, remove_id) = (property.id.clone(), property.id.clone());
                        view! {
                            <div class="linked-property">
                                <a class="link" on:click=move |_| ctx.navigate(Page::PropertyProfile(open_id.clone()))>
                                    {property.title.clone()}
                                </a>
                                <span class="price">{format_brl(property.price)}</span>
                                <button class="delete-btn" on:click=move |_| unlink.run(remove_id.clone())>"Remover"</button>
                            </div>
                        }
                    }
                />
            </Show>
            <div class="link-property">
                <select prop:value=move || picked.get() on:change=move |ev| picked.set(event_target_value(&ev))>
                    <option value="">"Vincular imóvel..."</option>
                    {move || candidates().into_iter().map(|p| view! { <option value=p.id>{p.title}</option> }).collect_view()}
                </select>
                <button class="primary-btn" on:click=link>"Vincular"</button>
            </div>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </section>
    }
}

/// Which action tab is open
#[derive(Clone, Copy, PartialEq, Eq)]
enum LeadTab {
    Note,
    Task,
}

#[component]
fn LeadActions(lead_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let tab = RwSignal::new(LeadTab::Note);
    let note = RwSignal::new(String::new());
    let task_title = RwSignal::new(String::new());
    let task_start = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let note_ctx = ctx.clone();
    let note_lead = lead_id.clone();
    let save_note = move |_: web_sys::MouseEvent| {
        let existing = store
            .leads()
            .with_untracked(|leads| leads.iter().find(|l| l.id == note_lead).and_then(|l| l.notes.clone()));
        let Some(notes) = append_note(existing.as_deref(), &note.get_untracked(), &Local::now()) else {
            return;
        };
        let ctx = note_ctx.clone();
        let id = note_lead.clone();
        spawn_local(async move {
            let update = LeadUpdate {
                notes: Some(Some(notes)),
                ..Default::default()
            };
            match ctx.backend().update_lead(&id, &update).await {
                Ok(saved) => {
                    store_update_lead(&store, saved);
                    note.set(String::new());
                    error.set(None);
                }
                Err(e) => {
                    log::error!("failed to add note to lead {id}: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let schedule = move |_: web_sys::MouseEvent| {
        let draft = EventDraft {
            title: task_title.get_untracked(),
            start: task_start.get_untracked(),
            ..Default::default()
        };
        let broker = store.leads().with_untracked(|leads| {
            leads
                .iter()
                .find(|l| l.id == lead_id)
                .and_then(|l| l.assigned_broker_id.clone())
        });
        let event = match draft.to_new(&Local, Some(&lead_id), broker.as_deref()) {
            Ok(event) => event,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.backend().create_event(&event).await {
                Ok(created) => {
                    log::info!("scheduled {} for lead {:?}", created.id, created.lead_id);
                    task_title.set(String::new());
                    task_start.set(String::new());
                    error.set(None);
                    ctx.reload();
                }
                Err(e) => {
                    log::error!("failed to schedule event: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <section class="profile-card">
            <h3>"Ações"</h3>
            <div class="tab-list">
                <button class=move || if tab.get() == LeadTab::Note { "tab active" } else { "tab" } on:click=move |_| tab.set(LeadTab::Note)>
                    "Nova Nota"
                </button>
                <button class=move || if tab.get() == LeadTab::Task { "tab active" } else { "tab" } on:click=move |_| tab.set(LeadTab::Task)>
                    "Agendar Tarefa"
                </button>
            </div>
            <Show when=move || tab.get() == LeadTab::Note>
                <label>
                    "Adicionar Nota"
                    <textarea rows="4" placeholder="Digite sua nota aqui..." prop:value=move || note.get() on:input=move |ev| note.set(event_target_value(&ev))></textarea>
                </label>
                <button class="primary-btn" on:click=save_note.clone()>"Salvar Nota"</button>
            </Show>
            <Show when=move || tab.get() == LeadTab::Task>
                <label>
                    "Título da Tarefa"
                    <input type="text" placeholder="Ex: Ligar para o cliente" prop:value=move || task_title.get() on:input=move |ev| task_title.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Data e Hora"
                    <input type="datetime-local" prop:value=move || task_start.get() on:input=move |ev| task_start.set(event_target_value(&ev)) />
                </label>
                <button class="primary-btn" on:click=schedule.clone()>"Agendar Tarefa"</button>
            </Show>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </section>
    }
}
