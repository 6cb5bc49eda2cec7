//! In-Memory Repository
//!
//! Backs demo mode (no backend configured) and the repository tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::seed;
use super::traits::{
    BrokerRepository, EventRepository, LeadPropertyRepository, LeadRepository, LeadStatusUpdater, OwnerRepository,
    PropertyRepository,
};
use crate::domain::{
    Broker, CalendarEvent, DomainError, DomainResult, Entity, Lead, LeadProperty, LeadStatus, LeadUpdate, NewEvent,
    NewLead, NewLeadProperty, NewProperty, Owner, OwnerUpdate, Property, PropertyUpdate,
};

/// One table of rows keyed by entity id
struct Table<T> {
    rows: Mutex<Vec<T>>,
}

impl<T: Entity> Table<T> {
    fn new(rows: Vec<T>) -> Self {
        Self { rows: Mutex::new(rows) }
    }

    async fn all(&self) -> Vec<T> {
        self.rows.lock().await.clone()
    }

    async fn filtered<P>(&self, keep: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.lock().await.iter().filter(|row| keep(row)).cloned().collect()
    }

    async fn contains(&self, id: &str) -> bool {
        self.rows.lock().await.iter().any(|row| row.id() == id)
    }

    async fn find(&self, id: &str) -> Option<T> {
        self.rows.lock().await.iter().find(|row| row.id() == id).cloned()
    }

    async fn insert(&self, row: T) -> T {
        self.rows.lock().await.push(row.clone());
        row
    }

    async fn modify<F>(&self, id: &str, f: F) -> DomainResult<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        f(row);
        Ok(row.clone())
    }

    async fn remove(&self, id: &str) -> DomainResult<()> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(DomainError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Repository holding every table in memory
pub struct InMemoryRepository {
    leads: Table<Lead>,
    brokers: Table<Broker>,
    owners: Table<Owner>,
    properties: Table<Property>,
    lead_properties: Table<LeadProperty>,
    events: Table<CalendarEvent>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Empty store
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    pub fn with_data(
        leads: Vec<Lead>,
        brokers: Vec<Broker>,
        owners: Vec<Owner>,
        properties: Vec<Property>,
        events: Vec<CalendarEvent>,
    ) -> Self {
        Self {
            leads: Table::new(leads),
            brokers: Table::new(brokers),
            owners: Table::new(owners),
            properties: Table::new(properties),
            lead_properties: Table::new(Vec::new()),
            events: Table::new(events),
        }
    }

    /// Attach lead/property links
    pub fn with_links(mut self, links: Vec<LeadProperty>) -> Self {
        self.lead_properties = Table::new(links);
        self
    }

    /// Store with only leads
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self::with_data(leads, Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Seeded sample brokerage for demo mode
    pub fn demo() -> Self {
        let data = seed::demo_data(chrono::Utc::now());
        Self::with_data(data.leads, data.brokers, data.owners, data.properties, data.events).with_links(data.links)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[async_trait(?Send)]
impl LeadRepository for InMemoryRepository {
    async fn list_leads(&self) -> DomainResult<Vec<Lead>> {
        let mut leads = self.leads.all().await;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn get_lead(&self, id: &str) -> DomainResult<Option<Lead>> {
        Ok(self.leads.find(id).await)
    }

    async fn create_lead(&self, lead: &NewLead) -> DomainResult<Lead> {
        if lead.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("name is required".to_string()));
        }
        Ok(self.leads.insert(lead.clone().into_lead(new_id())).await)
    }

    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> DomainResult<Lead> {
        self.leads.modify(id, |lead| lead.apply(update)).await
    }

    async fn delete_lead(&self, id: &str) -> DomainResult<()> {
        self.leads.remove(id).await
    }
}

#[async_trait(?Send)]
impl LeadStatusUpdater for InMemoryRepository {
    async fn update_lead_status(&self, id: &str, status: LeadStatus) -> DomainResult<Lead> {
        self.update_lead(id, &LeadUpdate::status(status)).await
    }
}

#[async_trait(?Send)]
impl BrokerRepository for InMemoryRepository {
    async fn list_brokers(&self) -> DomainResult<Vec<Broker>> {
        Ok(self.brokers.all().await)
    }
}

#[async_trait(?Send)]
impl OwnerRepository for InMemoryRepository {
    async fn list_owners(&self) -> DomainResult<Vec<Owner>> {
        let mut owners = self.owners.all().await;
        owners.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(owners)
    }

    async fn update_owner(&self, id: &str, update: &OwnerUpdate) -> DomainResult<Owner> {
        self.owners.modify(id, |owner| owner.apply(update)).await
    }
}

#[async_trait(?Send)]
impl PropertyRepository for InMemoryRepository {
    /// Rows are kept in insertion order, so newest first is that order reversed
    async fn list_properties(&self) -> DomainResult<Vec<Property>> {
        let mut properties = self.properties.all().await;
        properties.reverse();
        Ok(properties)
    }

    async fn list_properties_for_owner(&self, owner_id: &str) -> DomainResult<Vec<Property>> {
        let mut properties = self
            .properties
            .filtered(|p| p.owner_id.as_deref() == Some(owner_id))
            .await;
        properties.reverse();
        Ok(properties)
    }

    async fn create_property(&self, property: &NewProperty) -> DomainResult<Property> {
        if property.title.trim().is_empty() {
            return Err(DomainError::InvalidInput("title is required".to_string()));
        }
        if let Some(owner_id) = &property.owner_id {
            if !self.owners.contains(owner_id).await {
                return Err(DomainError::NotFound(owner_id.clone()));
            }
        }
        Ok(self.properties.insert(property.clone().into_property(new_id())).await)
    }

    async fn update_property(&self, id: &str, update: &PropertyUpdate) -> DomainResult<Property> {
        self.properties.modify(id, |property| property.apply(update)).await
    }
}

#[async_trait(?Send)]
impl LeadPropertyRepository for InMemoryRepository {
    async fn lead_properties(&self, lead_id: &str) -> DomainResult<Vec<Property>> {
        let links = self.lead_properties.filtered(|link| link.lead_id == lead_id).await;
        let properties = self.properties.all().await;
        Ok(links
            .iter()
            .filter_map(|link| properties.iter().find(|p| p.id == link.property_id).cloned())
            .collect())
    }

    /// Linking twice returns the existing link
    async fn link_property(&self, link: &NewLeadProperty) -> DomainResult<LeadProperty> {
        if !self.leads.contains(&link.lead_id).await {
            return Err(DomainError::NotFound(link.lead_id.clone()));
        }
        if !self.properties.contains(&link.property_id).await {
            return Err(DomainError::NotFound(link.property_id.clone()));
        }
        let existing = self
            .lead_properties
            .filtered(|l| l.lead_id == link.lead_id && l.property_id == link.property_id)
            .await;
        if let Some(found) = existing.into_iter().next() {
            return Ok(found);
        }
        Ok(self.lead_properties.insert(link.clone().into_link(new_id())).await)
    }

    async fn unlink_property(&self, lead_id: &str, property_id: &str) -> DomainResult<()> {
        let links = self
            .lead_properties
            .filtered(|l| l.lead_id == lead_id && l.property_id == property_id)
            .await;
        if links.is_empty() {
            return Err(DomainError::NotFound(format!("{lead_id}/{property_id}")));
        }
        for link in links {
            self.lead_properties.remove(&link.id).await?;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl EventRepository for InMemoryRepository {
    async fn list_events(&self) -> DomainResult<Vec<CalendarEvent>> {
        let mut events = self.events.all().await;
        events.sort_by_key(|e| e.start_time);
        Ok(events)
    }

    async fn create_event(&self, event: &NewEvent) -> DomainResult<CalendarEvent> {
        if event.title.trim().is_empty() {
            return Err(DomainError::InvalidInput("title is required".to_string()));
        }
        if event.end_time < event.start_time {
            return Err(DomainError::InvalidInput("event ends before it starts".to_string()));
        }
        Ok(self.events.insert(event.clone().into_event(new_id())).await)
    }
}
