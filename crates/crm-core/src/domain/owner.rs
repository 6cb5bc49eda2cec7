//! Owner Entity

use serde::{Deserialize, Serialize};

use super::codes::OwnerStatus;
use super::entity::{DomainError, DomainResult, Entity};
use super::lead::optional_text;
use crate::labels::Coded;

/// A property owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cpf_cnpj: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: Coded<OwnerStatus>,
}

impl Owner {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            email: None,
            cpf_cnpj: None,
            address: None,
            notes: None,
            status: OwnerStatus::Active.into(),
        }
    }
}

impl Entity for Owner {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct OwnerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf_cnpj: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OwnerStatus>,
}

impl OwnerUpdate {
    pub fn notes(notes: String) -> Self {
        Self {
            notes: Some(Some(notes)),
            ..Default::default()
        }
    }
}

impl Owner {
    pub fn apply(&mut self, update: &OwnerUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(cpf_cnpj) = &update.cpf_cnpj {
            self.cpf_cnpj = cpf_cnpj.clone();
        }
        if let Some(address) = &update.address {
            self.address = address.clone();
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
        if let Some(status) = update.status {
            self.status = status.into();
        }
    }
}

/// Raw contents of the owner edit form
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub cpf_cnpj: String,
    pub address: String,
    pub status: Coded<OwnerStatus>,
}

impl OwnerDraft {
    pub fn from_owner(owner: &Owner) -> Self {
        Self {
            name: owner.name.clone(),
            phone: owner.phone.clone(),
            email: owner.email.clone().unwrap_or_default(),
            cpf_cnpj: owner.cpf_cnpj.clone().unwrap_or_default(),
            address: owner.address.clone().unwrap_or_default(),
            status: owner.status.clone(),
        }
    }

    pub fn to_update(&self, original: &Owner) -> DomainResult<OwnerUpdate> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(DomainError::InvalidInput("Nome e telefone são obrigatórios".to_string()));
        }
        Ok(OwnerUpdate {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            email: Some(optional_text(&self.email)),
            cpf_cnpj: Some(optional_text(&self.cpf_cnpj)),
            address: Some(optional_text(&self.address)),
            notes: None,
            status: self.status.changed_from(&original.status),
        })
    }
}
