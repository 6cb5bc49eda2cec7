//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access. The hosted REST backend and the
//! in-memory store both implement them.
//!
//! Futures are `?Send`: in the browser every request future holds JS values.

use async_trait::async_trait;

use crate::domain::{
    Broker, CalendarEvent, DomainResult, Lead, LeadProperty, LeadStatus, LeadUpdate, NewEvent, NewLead, NewLeadProperty,
    NewProperty, Owner, OwnerUpdate, Property, PropertyUpdate,
};

/// CRUD over leads
#[async_trait(?Send)]
pub trait LeadRepository {
    /// All leads, newest first
    async fn list_leads(&self) -> DomainResult<Vec<Lead>>;

    async fn get_lead(&self, id: &str) -> DomainResult<Option<Lead>>;

    async fn create_lead(&self, lead: &NewLead) -> DomainResult<Lead>;

    /// Apply a partial update and return the stored row
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> DomainResult<Lead>;

    async fn delete_lead(&self, id: &str) -> DomainResult<()>;
}

/// The single write the Kanban board performs
#[async_trait(?Send)]
pub trait LeadStatusUpdater {
    async fn update_lead_status(&self, id: &str, status: LeadStatus) -> DomainResult<Lead>;
}

#[async_trait(?Send)]
pub trait BrokerRepository {
    async fn list_brokers(&self) -> DomainResult<Vec<Broker>>;
}

#[async_trait(?Send)]
pub trait OwnerRepository {
    /// All owners by name
    async fn list_owners(&self) -> DomainResult<Vec<Owner>>;

    async fn update_owner(&self, id: &str, update: &OwnerUpdate) -> DomainResult<Owner>;
}

#[async_trait(?Send)]
pub trait PropertyRepository {
    /// All properties, newest first
    async fn list_properties(&self) -> DomainResult<Vec<Property>>;

    /// Properties of one owner, newest first
    async fn list_properties_for_owner(&self, owner_id: &str) -> DomainResult<Vec<Property>>;

    async fn create_property(&self, property: &NewProperty) -> DomainResult<Property>;

    async fn update_property(&self, id: &str, update: &PropertyUpdate) -> DomainResult<Property>;

    /// Set or clear the asking price
    async fn update_property_price(&self, id: &str, price: Option<f64>) -> DomainResult<Property> {
        self.update_property(id, &PropertyUpdate::price(price)).await
    }
}

/// Which properties a lead is interested in
#[async_trait(?Send)]
pub trait LeadPropertyRepository {
    /// Properties linked to `lead_id`, in link order
    async fn lead_properties(&self, lead_id: &str) -> DomainResult<Vec<Property>>;

    async fn link_property(&self, link: &NewLeadProperty) -> DomainResult<LeadProperty>;

    async fn unlink_property(&self, lead_id: &str, property_id: &str) -> DomainResult<()>;
}

#[async_trait(?Send)]
pub trait EventRepository {
    /// All events, earliest first
    async fn list_events(&self) -> DomainResult<Vec<CalendarEvent>>;

    async fn create_event(&self, event: &NewEvent) -> DomainResult<CalendarEvent>;
}

/// Everything the dashboard needs from a backend
pub trait CrmRepository:
    LeadRepository
    + LeadStatusUpdater
    + BrokerRepository
    + OwnerRepository
    + PropertyRepository
    + LeadPropertyRepository
    + EventRepository
{
}

impl<T> CrmRepository for T where
    T: LeadRepository
        + LeadStatusUpdater
        + BrokerRepository
        + OwnerRepository
        + PropertyRepository
        + LeadPropertyRepository
        + EventRepository
{
}
