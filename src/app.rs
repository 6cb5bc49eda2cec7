//! Realty CRM Frontend App
//!
//! Main application component: navigation bar plus the active page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crm_core::repository::{BrokerRepository, EventRepository, LeadRepository, OwnerRepository, PropertyRepository};
use crate::commands;
use crate::components::{
    BrokersTable, DashboardPage, KanbanBoard, LeadProfile, LeadsTable, NavBar, OwnerProfile, OwnersTable,
    PropertiesTable, PropertyProfile, ReportsPage,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::session::{Session, Theme};
use crate::store::{AppState, AppStateStoreFields};

/// Pages; the profile variants carry the id of the record shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Pipeline,
    Leads,
    Properties,
    Brokers,
    Owners,
    Reports,
    LeadProfile(String),
    OwnerProfile(String),
    PropertyProfile(String),
}

impl Page {
    /// Navigation tabs, in order
    pub const TABS: [Page; 7] = [
        Page::Dashboard,
        Page::Pipeline,
        Page::Leads,
        Page::Properties,
        Page::Brokers,
        Page::Owners,
        Page::Reports,
    ];

    /// Tab highlighted while this page is open
    pub fn tab(&self) -> Page {
        match self {
            Page::LeadProfile(_) => Page::Leads,
            Page::OwnerProfile(_) => Page::Owners,
            Page::PropertyProfile(_) => Page::Properties,
            other => other.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.tab() {
            Page::Dashboard => "Dashboard",
            Page::Pipeline => "Pipeline",
            Page::Leads => "Leads",
            Page::Properties => "Imóveis",
            Page::Brokers => "Corretores",
            Page::Owners => "Proprietários",
            _ => "Relatórios",
        }
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session = Session::restore();
    let theme = Theme::restore();
    theme.apply();

    let backend = commands::connect(&config, &session);
    let ctx = AppContext::new(config, session, theme, backend);
    let store = Store::new(AppState::default());
    provide_context(ctx.clone());
    provide_context(store);

    let page = ctx.page;

    // Refetch everything whenever a reload is requested
    let reload_trigger = ctx.reload_trigger;
    let loader = ctx.clone();
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let backend = loader.backend();
        log::debug!("loading data, trigger={trigger}");
        spawn_local(async move {
            let mut errors = Vec::new();
            match backend.list_leads().await {
                Ok(leads) => {
                    log::debug!("loaded {} leads", leads.len());
                    *store.leads().write() = leads;
                }
                Err(e) => errors.push(format!("leads: {e}")),
            }
            match backend.list_brokers().await {
                Ok(brokers) => *store.brokers().write() = brokers,
                Err(e) => errors.push(format!("brokers: {e}")),
            }
            match backend.list_owners().await {
                Ok(owners) => *store.owners().write() = owners,
                Err(e) => errors.push(format!("owners: {e}")),
            }
            match backend.list_properties().await {
                Ok(properties) => *store.properties().write() = properties,
                Err(e) => errors.push(format!("properties: {e}")),
            }
            match backend.list_events().await {
                Ok(events) => *store.events().write() = events,
                Err(e) => errors.push(format!("events: {e}")),
            }
            for error in &errors {
                log::error!("failed to load {error}");
            }
            *store.load_error().write() = (!errors.is_empty()).then(|| errors.join("; "));
        });
    });

    view! {
        <div class="app-layout">
            <NavBar page=page />
            <main class="main-content">
                <h1>{move || page.with(Page::title)}</h1>
                {move || store.load_error().get().map(|error| view! {
                    <p class="load-error">"Falha ao carregar dados: " {error}</p>
                })}
                {move || match page.get() {
                    Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Page::Pipeline => view! { <KanbanBoard /> }.into_any(),
                    Page::Leads => view! { <LeadsTable /> }.into_any(),
                    Page::Properties => view! { <PropertiesTable /> }.into_any(),
                    Page::Brokers => view! { <BrokersTable /> }.into_any(),
                    Page::Owners => view! { <OwnersTable /> }.into_any(),
                    Page::Reports => view! { <ReportsPage /> }.into_any(),
                    Page::LeadProfile(id) => view! { <LeadProfile id=id /> }.into_any(),
                    Page::OwnerProfile(id) => view! { <OwnerProfile id=id /> }.into_any(),
                    Page::PropertyProfile(id) => view! { <PropertyProfile id=id /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_highlight_their_list_tab() {
        assert_eq!(Page::LeadProfile("L1".into()).tab(), Page::Leads);
        assert_eq!(Page::OwnerProfile("o-1".into()).tab(), Page::Owners);
        assert_eq!(Page::PropertyProfile("p-1".into()).title(), "Imóveis");
        assert_eq!(Page::Reports.tab(), Page::Reports);
        assert!(Page::TABS.iter().all(|tab| tab.tab() == *tab));
    }
}
