//! Lead Entity
//!
//! A prospective customer moving through the sales pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::codes::{LeadOrigin, LeadStatus};
use super::entity::{DomainError, DomainResult, Entity};
use crate::labels::{CodeLabel, Coded};
use crate::price::{parse_price, price_text};

/// A lead as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    /// Pipeline stage code; only ever changed through [`LeadUpdate`]
    pub status: Coded<LeadStatus>,
    pub origin: Coded<LeadOrigin>,
    #[serde(default)]
    pub budget: Option<f64>,
    /// Free-text tags (`null` in storage reads as empty)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_broker_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Create a lead with default origin and no optional fields
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>, status: LeadStatus) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: phone.into(),
            status: status.into(),
            origin: LeadOrigin::default().into(),
            budget: None,
            tags: Vec::new(),
            notes: None,
            assigned_broker_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Known pipeline stage, `None` for codes this build does not know
    pub fn stage(&self) -> Option<LeadStatus> {
        self.status.known()
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &LeadUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = phone.clone();
        }
        if let Some(status) = update.status {
            self.status = status.into();
        }
        if let Some(origin) = update.origin {
            self.origin = origin.into();
        }
        if let Some(budget) = update.budget {
            self.budget = budget;
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
        if let Some(broker) = &update.assigned_broker_id {
            self.assigned_broker_id = broker.clone();
        }
        self.updated_at = Utc::now();
    }
}

impl Entity for Lead {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for a new lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewLead {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub status: LeadStatus,
    pub origin: LeadOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_broker_id: Option<String>,
}

impl NewLead {
    /// Materialize into a stored lead with the given id
    pub fn into_lead(self, id: impl Into<String>) -> Lead {
        let mut lead = Lead::new(id, self.name, self.phone, self.status);
        lead.email = self.email;
        lead.origin = self.origin.into();
        lead.budget = self.budget;
        lead.tags = self.tags;
        lead.notes = self.notes;
        lead.assigned_broker_id = self.assigned_broker_id;
        lead
    }
}

/// Partial update payload; `None` leaves a field untouched.
///
/// Nullable columns use `Option<Option<_>>` so a field can be cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<LeadOrigin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_broker_id: Option<Option<String>>,
}

impl LeadUpdate {
    /// Update that only moves the lead to another stage
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Text of an optional form field, `None` when blank
pub fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Comma-separated tag input
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw contents of the lead form.
///
/// Status and origin stay [`Coded`] so a code this build does not know is
/// carried through an edit untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub status: Coded<LeadStatus>,
    pub origin: Coded<LeadOrigin>,
    pub budget: String,
    pub broker_id: String,
    pub tags: String,
    pub notes: String,
}

impl Default for LeadDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            status: LeadStatus::DEFAULT.into(),
            origin: LeadOrigin::DEFAULT.into(),
            budget: String::new(),
            broker_id: String::new(),
            tags: String::new(),
            notes: String::new(),
        }
    }
}

impl LeadDraft {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone().unwrap_or_default(),
            status: lead.status.clone(),
            origin: lead.origin.clone(),
            budget: price_text(lead.budget),
            broker_id: lead.assigned_broker_id.clone().unwrap_or_default(),
            tags: lead.tags.join(", "),
            notes: lead.notes.clone().unwrap_or_default(),
        }
    }

    fn required(&self) -> DomainResult<(String, String)> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(DomainError::InvalidInput("Nome e telefone são obrigatórios".to_string()));
        }
        Ok((name.to_string(), phone.to_string()))
    }

    /// Insert payload; unknown codes fall back to the defaults
    pub fn to_new(&self) -> DomainResult<NewLead> {
        let (name, phone) = self.required()?;
        Ok(NewLead {
            name,
            email: optional_text(&self.email),
            phone,
            status: self.status.known().unwrap_or(LeadStatus::DEFAULT),
            origin: self.origin.known().unwrap_or(LeadOrigin::DEFAULT),
            budget: parse_price(&self.budget).into_field("Orçamento")?,
            tags: split_tags(&self.tags),
            notes: optional_text(&self.notes),
            assigned_broker_id: optional_text(&self.broker_id),
        })
    }

    /// Update payload for an edit of `original`. Status and origin are only
    /// sent when the user picked a different known value.
    pub fn to_update(&self, original: &Lead) -> DomainResult<LeadUpdate> {
        let (name, phone) = self.required()?;
        Ok(LeadUpdate {
            name: Some(name),
            email: Some(optional_text(&self.email)),
            phone: Some(phone),
            status: self.status.changed_from(&original.status),
            origin: self.origin.changed_from(&original.origin),
            budget: Some(parse_price(&self.budget).into_field("Orçamento")?),
            tags: Some(split_tags(&self.tags)),
            notes: Some(optional_text(&self.notes)),
            assigned_broker_id: Some(optional_text(&self.broker_id)),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_creation() {
        let lead = Lead::new("L1", "João Silva", "(11) 98765-4321", LeadStatus::New);
        assert_eq!(lead.id(), "L1");
        assert_eq!(lead.stage(), Some(LeadStatus::New));
        assert!(lead.tags.is_empty());
    }

    #[test]
    fn test_deserialize_backend_row() {
        let json = r#"{
            "id": "7f1c",
            "name": "Maria Santos",
            "email": null,
            "phone": "(11) 97654-3210",
            "status": "proposta",
            "origin": "telefone",
            "budget": 450000.0,
            "tags": null,
            "notes": "Prefere zona sul",
            "assigned_broker_id": null,
            "created_at": "2025-11-09T13:45:00.123456+00:00",
            "updated_at": "2025-11-10T08:00:00+00:00"
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.stage(), Some(LeadStatus::VisitScheduled));
        assert_eq!(lead.origin.known(), Some(LeadOrigin::Phone));
        assert!(lead.tags.is_empty());
        assert_eq!(lead.budget, Some(450000.0));
    }

    #[test]
    fn test_status_update_payload() {
        let json = serde_json::to_value(LeadUpdate::status(LeadStatus::Negotiating)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "negociacao" }));
    }

    #[test]
    fn test_clearing_nullable_field() {
        let update = LeadUpdate {
            budget: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({ "budget": null }));

        let mut lead = Lead::new("L1", "A", "1", LeadStatus::New);
        lead.budget = Some(10.0);
        lead.apply(&update);
        assert_eq!(lead.budget, None);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(" apartamento, zona sul ,,"), ["apartamento", "zona sul"]);
        assert!(split_tags("").is_empty());
    }

    fn archived_lead() -> Lead {
        let json = r#"{
            "id": "L7",
            "name": "Ana",
            "phone": "(11) 90000-0000",
            "status": "arquivado",
            "origin": "tiktok",
            "created_at": "2025-11-09T13:45:00+00:00",
            "updated_at": "2025-11-09T13:45:00+00:00"
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_untouched_edit_keeps_unknown_codes() {
        let mut lead = archived_lead();
        let update = LeadDraft::from_lead(&lead).to_update(&lead).unwrap();
        assert_eq!(update.status, None);
        assert_eq!(update.origin, None);

        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("status").is_none());
        assert!(body.get("origin").is_none());

        lead.apply(&update);
        assert_eq!(lead.status.code(), "arquivado");
        assert_eq!(lead.origin.code(), "tiktok");
    }

    #[test]
    fn test_picked_codes_are_sent() {
        let lead = archived_lead();
        let mut draft = LeadDraft::from_lead(&lead);
        draft.status = LeadStatus::Contacted.into();
        let update = draft.to_update(&lead).unwrap();
        assert_eq!(update.status, Some(LeadStatus::Contacted));
        assert_eq!(update.origin, None);

        // re-selecting the loaded known value is not a change
        let known = Lead::new("L1", "A", "1", LeadStatus::Qualified);
        let update = LeadDraft::from_lead(&known).to_update(&known).unwrap();
        assert_eq!(update.status, None);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = LeadDraft {
            name: "Ana".to_string(),
            ..Default::default()
        };
        assert!(matches!(draft.to_new(), Err(DomainError::InvalidInput(_))));

        draft.phone = "(11) 9".to_string();
        draft.budget = "abc".to_string();
        assert!(matches!(draft.to_new(), Err(DomainError::InvalidInput(_))));

        draft.budget = "1.500,00".to_string();
        draft.tags = "vip, urgente".to_string();
        let new_lead = draft.to_new().unwrap();
        assert_eq!(new_lead.budget, Some(1500.0));
        assert_eq!(new_lead.status, LeadStatus::New);
        assert_eq!(new_lead.tags, ["vip", "urgente"]);
        assert_eq!(new_lead.email, None);
    }
}
