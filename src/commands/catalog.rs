//! Broker, Owner, Property and Calendar Commands

use async_trait::async_trait;
use crm_core::domain::{
    Broker, CalendarEvent, LeadProperty, NewEvent, NewLeadProperty, NewProperty, Owner, OwnerUpdate, Property,
    PropertyUpdate,
};
use crm_core::repository::{
    BrokerRepository, EventRepository, LeadPropertyRepository, OwnerRepository, PropertyRepository,
};
use crm_core::DomainResult;
use serde::Deserialize;

use super::tables::{BROKERS, EVENTS, LEAD_PROPERTIES, OWNERS, PROPERTIES};
use super::RestClient;

/// Link row with its property embedded through the `property_id` key
#[derive(Deserialize)]
struct LinkedProperty {
    property: Option<Property>,
}

#[async_trait(?Send)]
impl BrokerRepository for RestClient {
    async fn list_brokers(&self) -> DomainResult<Vec<Broker>> {
        self.select(BROKERS, "select=*&order=name.asc").await
    }
}

#[async_trait(?Send)]
impl OwnerRepository for RestClient {
    async fn list_owners(&self) -> DomainResult<Vec<Owner>> {
        self.select(OWNERS, "select=*&order=name.asc").await
    }

    async fn update_owner(&self, id: &str, update: &OwnerUpdate) -> DomainResult<Owner> {
        self.update(OWNERS, id, update).await
    }
}

#[async_trait(?Send)]
impl PropertyRepository for RestClient {
    async fn list_properties(&self) -> DomainResult<Vec<Property>> {
        self.select(PROPERTIES, "select=*&order=created_at.desc").await
    }

    async fn list_properties_for_owner(&self, owner_id: &str) -> DomainResult<Vec<Property>> {
        self.select(PROPERTIES, &format!("select=*&owner_id=eq.{owner_id}&order=created_at.desc"))
            .await
    }

    async fn create_property(&self, property: &NewProperty) -> DomainResult<Property> {
        self.insert(PROPERTIES, property).await
    }

    async fn update_property(&self, id: &str, update: &PropertyUpdate) -> DomainResult<Property> {
        self.update(PROPERTIES, id, update).await
    }
}

#[async_trait(?Send)]
impl LeadPropertyRepository for RestClient {
    async fn lead_properties(&self, lead_id: &str) -> DomainResult<Vec<Property>> {
        let rows: Vec<LinkedProperty> = self
            .select(LEAD_PROPERTIES, &format!("select=property:property_id(*)&lead_id=eq.{lead_id}"))
            .await?;
        Ok(rows.into_iter().filter_map(|row| row.property).collect())
    }

    async fn link_property(&self, link: &NewLeadProperty) -> DomainResult<LeadProperty> {
        self.insert(LEAD_PROPERTIES, link).await
    }

    async fn unlink_property(&self, lead_id: &str, property_id: &str) -> DomainResult<()> {
        self.delete_where(LEAD_PROPERTIES, &format!("lead_id=eq.{lead_id}&property_id=eq.{property_id}"))
            .await
    }
}

#[async_trait(?Send)]
impl EventRepository for RestClient {
    async fn list_events(&self) -> DomainResult<Vec<CalendarEvent>> {
        self.select(EVENTS, "select=*&order=start_time.asc").await
    }

    async fn create_event(&self, event: &NewEvent) -> DomainResult<CalendarEvent> {
        self.insert(EVENTS, event).await
    }
}
