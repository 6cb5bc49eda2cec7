//! Dashboard Page Component

use chrono::{Duration, Utc};
use crm_core::price::format_brl;
use crm_core::reports::DashboardStats;
use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

const RECENT_LEADS: usize = 5;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_app_store();

    let stats = Memo::new(move |_| {
        store
            .leads()
            .with(|leads| store.events().with(|events| DashboardStats::compute(leads, events, Utc::now())))
    });

    let upcoming = move || {
        let now = Utc::now();
        let week_end = now + Duration::days(7);
        store.events().with(|events| {
            events
                .iter()
                .filter(|e| e.start_time >= now && e.start_time < week_end)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let lead_name = move |lead_id: Option<String>| {
        let id = lead_id?;
        store
            .leads()
            .with(|leads| leads.iter().find(|l| l.id == id).map(|l| l.name.clone()))
    };

    view! {
        <div class="dashboard-page">
            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-label">"Leads Ativos"</span>
                    <span class="stat-value">{move || stats.with(|s| s.active_leads)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Taxa de Conversão"</span>
                    <span class="stat-value">{move || format!("{}%", stats.with(|s| s.conversion_rate))}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Visitas Agendadas"</span>
                    <span class="stat-value">{move || stats.with(|s| s.visits_scheduled)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Vendas no Mês"</span>
                    <span class="stat-value">{move || stats.with(|s| s.closed_this_month)}</span>
                </div>
            </div>

            <section class="dashboard-section">
                <h2>"Próximos Compromissos"</h2>
                {move || {
                    let events = upcoming();
                    if events.is_empty() {
                        return view! { <p class="empty">"Nenhum compromisso nos próximos 7 dias"</p> }.into_any();
                    }
                    view! {
                        <ul class="event-list">
                            {events.into_iter().map(|event| {
                                let who = lead_name(event.lead_id.clone());
                                view! {
                                    <li>
                                        <span class="event-time">{event.start_time.format("%d/%m %H:%M").to_string()}</span>
                                        <span class="event-title">{event.title}</span>
                                        {who.map(|name| view! { <span class="event-lead">{name}</span> })}
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </section>

            <section class="dashboard-section">
                <h2>"Leads Recentes"</h2>
                <ul class="recent-leads">
                    {move || store.leads().with(|leads| {
                        leads.iter().take(RECENT_LEADS).map(|lead| view! {
                            <li>
                                <span class="lead-name">{lead.name.clone()}</span>
                                <span class="status-pill">{lead.status.label().to_string()}</span>
                                <span class="lead-budget">{format_brl(lead.budget)}</span>
                            </li>
                        }).collect_view()
                    })}
                </ul>
            </section>
        </div>
    }
}
