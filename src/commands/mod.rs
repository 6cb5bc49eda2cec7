//! Backend Commands
//!
//! REST client for the hosted backend, organized by domain. Tables follow
//! PostgREST conventions: filters in the query string (`id=eq.<id>`) and
//! `Prefer: return=representation` to get written rows back.

mod catalog;
mod leads;

/// Table names on the hosted backend
pub(crate) mod tables {
    pub const LEADS: &str = "leads";
    pub const BROKERS: &str = "brokers";
    pub const OWNERS: &str = "owners";
    pub const PROPERTIES: &str = "properties";
    pub const LEAD_PROPERTIES: &str = "lead_properties";
    pub const EVENTS: &str = "events";
}

use std::sync::Arc;

use crm_core::repository::{CrmRepository, InMemoryRepository};
use crm_core::{DomainError, DomainResult};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::session::Session;

/// Shared handle to whichever backend is active
pub type Backend = Arc<dyn CrmRepository + Send + Sync>;

/// Pick the backend for this build: REST when a URL is configured,
/// otherwise the seeded in-memory store.
pub fn connect(config: &AppConfig, session: &Session) -> Backend {
    match &config.api_url {
        Some(url) => {
            log::info!("using REST backend at {url}");
            Arc::new(RestClient::new(url, &config.api_key, session.bearer(&config.api_key)))
        }
        None => {
            log::info!("no backend configured, running on demo data");
            Arc::new(InMemoryRepository::demo())
        }
    }
}

/// Table client for the hosted backend
pub struct RestClient {
    base_url: String,
    api_key: String,
    bearer: String,
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str, bearer: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bearer: bearer.to_string(),
        }
    }

    fn url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{}?{}", self.base_url, table, query)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.bearer))
    }

    async fn send(request: Request) -> DomainResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Backend(format!("Failed to send request: {e}")))?;
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Backend(format!("{} {}: {}", response.status(), response.status_text(), body)));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> DomainResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Decode(format!("Failed to parse response: {e}")))
    }

    /// `GET /rest/v1/<table>?<query>`
    pub(crate) async fn select<T: DeserializeOwned>(&self, table: &str, query: &str) -> DomainResult<Vec<T>> {
        let request = self
            .authorize(Request::get(&self.url(table, query)))
            .build()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Self::decode(Self::send(request).await?).await
    }

    /// Write `body` with `method` and return the affected rows
    async fn write<B, T>(&self, builder: RequestBuilder, body: &B) -> DomainResult<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(builder)
            .header("Prefer", "return=representation")
            .json(body)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize request: {e}")))?;
        Self::decode(Self::send(request).await?).await
    }

    /// `POST /rest/v1/<table>`
    pub(crate) async fn insert<B: Serialize, T: DeserializeOwned>(&self, table: &str, body: &B) -> DomainResult<T> {
        let rows = self.write(Request::post(&self.url(table, "select=*")), body).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DomainError::Backend(format!("insert into {table} returned no row")))
    }

    /// `PATCH /rest/v1/<table>?id=eq.<id>`
    pub(crate) async fn update<B: Serialize, T: DeserializeOwned>(&self, table: &str, id: &str, body: &B) -> DomainResult<T> {
        let rows = self.write(Request::patch(&self.url(table, &format!("id=eq.{id}"))), body).await?;
        rows.into_iter().next().ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    /// `DELETE /rest/v1/<table>?id=eq.<id>`
    pub(crate) async fn delete(&self, table: &str, id: &str) -> DomainResult<()> {
        self.delete_where(table, &format!("id=eq.{id}")).await
    }

    /// `DELETE /rest/v1/<table>?<filter>`
    pub(crate) async fn delete_where(&self, table: &str, filter: &str) -> DomainResult<()> {
        let request = self
            .authorize(Request::delete(&self.url(table, filter)))
            .build()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Self::send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestClient {
        RestClient::new("https://crm.supabase.co/", "anon", "token")
    }

    #[test]
    fn test_table_urls() {
        let client = client();
        let cases = [
            (tables::LEADS, "https://crm.supabase.co/rest/v1/leads?select=*"),
            (tables::BROKERS, "https://crm.supabase.co/rest/v1/brokers?select=*"),
            (tables::OWNERS, "https://crm.supabase.co/rest/v1/owners?select=*"),
            (tables::PROPERTIES, "https://crm.supabase.co/rest/v1/properties?select=*"),
            (tables::LEAD_PROPERTIES, "https://crm.supabase.co/rest/v1/lead_properties?select=*"),
            (tables::EVENTS, "https://crm.supabase.co/rest/v1/events?select=*"),
        ];
        for (table, expected) in cases {
            assert_eq!(client.url(table, "select=*"), expected);
        }
    }

    #[test]
    fn test_filters_are_kept_verbatim() {
        assert_eq!(
            client().url(tables::EVENTS, "select=*&order=start_time.asc"),
            "https://crm.supabase.co/rest/v1/events?select=*&order=start_time.asc"
        );
        assert_eq!(
            client().url(tables::LEAD_PROPERTIES, "lead_id=eq.L1&property_id=eq.p-1"),
            "https://crm.supabase.co/rest/v1/lead_properties?lead_id=eq.L1&property_id=eq.p-1"
        );
    }
}
