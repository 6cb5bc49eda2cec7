//! Realty CRM Core
//!
//! Layered like the rest of the app:
//! - domain: entities and the closed code enumerations
//! - labels: code <-> display label mapping
//! - price: free-form price parsing and BRL formatting
//! - kanban: pipeline board derivation and drop resolution
//! - filter / reports: list filtering and sales aggregation
//! - timeline: lead activity history
//! - repository: data access abstractions and an in-memory implementation

pub mod domain;
pub mod filter;
pub mod kanban;
pub mod labels;
pub mod price;
pub mod reports;
pub mod repository;
pub mod timeline;

pub use domain::{DomainError, DomainResult};
