//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use crm_core::domain::{Broker, CalendarEvent, Lead, Owner, Property};
use leptos::prelude::*;
use reactive_stores::Store;

/// Everything fetched from the backend, refreshed on every reload
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Newest first
    pub leads: Vec<Lead>,
    pub brokers: Vec<Broker>,
    pub owners: Vec<Owner>,
    pub properties: Vec<Property>,
    /// Earliest first
    pub events: Vec<CalendarEvent>,
    /// Last load failure shown in the header
    pub load_error: Option<String>,
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Replace a lead in the store by ID
pub fn store_update_lead(store: &AppStore, updated: Lead) {
    if let Some(lead) = store.leads().write().iter_mut().find(|lead| lead.id == updated.id) {
        *lead = updated;
    }
}

pub fn store_remove_lead(store: &AppStore, lead_id: &str) {
    store.leads().write().retain(|lead| lead.id != lead_id);
}

pub fn store_update_property(store: &AppStore, updated: Property) {
    if let Some(property) = store.properties().write().iter_mut().find(|p| p.id == updated.id) {
        *property = updated;
    }
}

pub fn store_update_owner(store: &AppStore, updated: Owner) {
    if let Some(owner) = store.owners().write().iter_mut().find(|o| o.id == updated.id) {
        *owner = updated;
    }
}

/// Display name of a broker, if known
pub fn broker_name(store: &AppStore, broker_id: Option<&str>) -> Option<String> {
    let id = broker_id?;
    store
        .brokers()
        .read()
        .iter()
        .find(|b| b.id == id)
        .map(|b| b.name.clone())
}
