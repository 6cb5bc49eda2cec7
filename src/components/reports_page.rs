//! Reports Page Component
//!
//! Sales funnel, origin breakdown, broker ranking and performance per week
//! or month, computed from the loaded leads.

use chrono::Utc;
use crm_core::labels::CodeLabel;
use crm_core::price::{format_brl, format_brl_compact};
use crm_core::reports::{
    broker_ranking, origin_breakdown, period_performance, sales_funnel, ReportPeriod, ReportSummary,
};
use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ReportsPage() -> impl IntoView {
    let store = use_app_store();
    let period = RwSignal::new(ReportPeriod::default());

    let buckets = Memo::new(move |_| {
        let period = period.get();
        store.leads().with(|leads| period_performance(leads, period, Utc::now()))
    });
    let summary = Memo::new(move |_| buckets.with(|b| ReportSummary::from_periods(b)));

    view! {
        <div class="reports-page">
            <div class="reports-toolbar">
                <select
                    prop:value=move || period.get().code().to_string()
                    on:change=move |ev| period.set(ReportPeriod::from_code(&event_target_value(&ev)).unwrap_or_default())
                >
                    {ReportPeriod::ALL.iter().map(|p| view! { <option value=p.code()>{p.label()}</option> }).collect_view()}
                </select>
            </div>

            <div class="stat-cards">
                <div class="stat-card">
                    <span class="stat-label">"Receita Total"</span>
                    <span class="stat-value">{move || format_brl_compact(summary.with(|s| s.total_revenue))}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Negócios Fechados"</span>
                    <span class="stat-value">{move || summary.with(|s| s.total_deals)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Total de Leads"</span>
                    <span class="stat-value">{move || summary.with(|s| s.total_leads)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Taxa de Conversão"</span>
                    <span class="stat-value">{move || format!("{}%", summary.with(|s| s.conversion_rate))}</span>
                </div>
            </div>

            <section class="report-section">
                <h2>{move || if period.get() == ReportPeriod::Weekly { "Desempenho Semanal" } else { "Desempenho Mensal" }}</h2>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{move || if period.get() == ReportPeriod::Weekly { "Semana" } else { "Mês" }}</th>
                            <th>"Leads"</th><th>"Vendas"</th><th>"Receita"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || buckets.get().into_iter().map(|m| view! {
                            <tr>
                                <td>{m.label}</td>
                                <td>{m.leads}</td>
                                <td>{m.deals}</td>
                                <td>{format_brl(Some(m.revenue))}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </section>

            <section class="report-section">
                <h2>"Funil de Vendas"</h2>
                {move || store.leads().with(|leads| sales_funnel(leads)).into_iter().map(|stage| view! {
                    <div class="funnel-row">
                        <span class="funnel-label">{stage.status.label()}</span>
                        <span class="funnel-bar" style=format!("width: {}%; background: {}", stage.conversion, stage.status.board_color())></span>
                        <span class="funnel-value">{format!("{} ({}%)", stage.count, stage.conversion)}</span>
                    </div>
                }).collect_view()}
            </section>

            <section class="report-section">
                <h2>"Origem dos Leads"</h2>
                <ul class="origin-list">
                    {move || store.leads().with(|leads| origin_breakdown(leads)).into_iter().map(|share| view! {
                        <li>{format!("{} {}% ({})", share.origin.label(), share.percent, share.count)}</li>
                    }).collect_view()}
                </ul>
            </section>

            <section class="report-section">
                <h2>"Ranking de Corretores"</h2>
                <ol class="broker-ranking">
                    {move || {
                        let ranking = store.leads().with(|leads| store.brokers().with(|brokers| broker_ranking(leads, brokers)));
                        ranking.into_iter().map(|broker| view! {
                            <li>
                                <span class="broker-name">{broker.name}</span>
                                <span class="broker-deals">{format!("{} vendas", broker.deals)}</span>
                                <span class="broker-revenue">{format_brl_compact(broker.revenue)}</span>
                            </li>
                        }).collect_view()
                    }}
                </ol>
            </section>
        </div>
    }
}
