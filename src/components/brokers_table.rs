//! Brokers Table Component

use crm_core::domain::LeadStatus;
use crm_core::filter::BrokerFilter;
use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BrokersTable() -> impl IntoView {
    let store = use_app_store();
    let filter = RwSignal::new(BrokerFilter::default());

    let rows = move || {
        let filter = filter.get();
        store
            .brokers()
            .with(|brokers| brokers.iter().filter(|b| filter.matches(b)).cloned().collect::<Vec<_>>())
    };

    // open leads per broker
    let pipeline_count = move |broker_id: &str| {
        store.leads().with(|leads| {
            leads
                .iter()
                .filter(|lead| lead.assigned_broker_id.as_deref() == Some(broker_id))
                .filter(|lead| lead.stage().is_some_and(|s| s.is_open()))
                .count()
        })
    };
    let closed_count = move |broker_id: &str| {
        store.leads().with(|leads| {
            leads
                .iter()
                .filter(|lead| lead.assigned_broker_id.as_deref() == Some(broker_id) && lead.status.is(LeadStatus::Closed))
                .count()
        })
    };

    view! {
        <div class="brokers-page">
            <input
                type="search"
                class="filter-search"
                placeholder="Buscar corretor..."
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.search = value);
                }
            />
            <table class="data-table">
                <thead>
                    <tr>
                        <th></th>
                        <th>"Nome"</th>
                        <th>"E-mail"</th>
                        <th>"Telefone"</th>
                        <th>"Status"</th>
                        <th>"Comissão"</th>
                        <th>"Em andamento"</th>
                        <th>"Vendas"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|broker| broker.id.clone()
                        children=move |broker| {
                            let id = broker.id.clone();
                            let closed_id = id.clone();
                            let initials = broker.initials();
                            view! {
                                <tr>
                                    <td><span class="avatar">{initials}</span></td>
                                    <td>{broker.name}</td>
                                    <td>{broker.email}</td>
                                    <td>{broker.phone.unwrap_or_default()}</td>
                                    <td>{broker.status.label().to_string()}</td>
                                    <td>{broker.commission_rate.map(|rate| format!("{rate}%")).unwrap_or_default()}</td>
                                    <td>{move || pipeline_count(&id)}</td>
                                    <td>{move || closed_count(&closed_id)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
