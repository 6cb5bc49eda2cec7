//! Lead Commands

use async_trait::async_trait;
use crm_core::domain::{Lead, LeadStatus, LeadUpdate, NewLead};
use crm_core::repository::{LeadRepository, LeadStatusUpdater};
use crm_core::DomainResult;

use super::tables::LEADS;
use super::RestClient;

#[async_trait(?Send)]
impl LeadRepository for RestClient {
    async fn list_leads(&self) -> DomainResult<Vec<Lead>> {
        self.select(LEADS, "select=*&order=created_at.desc").await
    }

    async fn get_lead(&self, id: &str) -> DomainResult<Option<Lead>> {
        let rows: Vec<Lead> = self.select(LEADS, &format!("select=*&id=eq.{id}")).await?;
        Ok(rows.into_iter().next())
    }

    async fn create_lead(&self, lead: &NewLead) -> DomainResult<Lead> {
        self.insert(LEADS, lead).await
    }

    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> DomainResult<Lead> {
        self.update(LEADS, id, update).await
    }

    async fn delete_lead(&self, id: &str) -> DomainResult<()> {
        self.delete(LEADS, id).await
    }
}

#[async_trait(?Send)]
impl LeadStatusUpdater for RestClient {
    async fn update_lead_status(&self, id: &str, status: LeadStatus) -> DomainResult<Lead> {
        self.update(LEADS, id, &LeadUpdate::status(status)).await
    }
}
