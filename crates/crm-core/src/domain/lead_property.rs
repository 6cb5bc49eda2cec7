//! Lead Interest Link
//!
//! Join row recording that a lead is interested in a property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadProperty {
    pub id: String,
    pub lead_id: String,
    pub property_id: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for LeadProperty {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for a link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLeadProperty {
    pub lead_id: String,
    pub property_id: String,
}

impl NewLeadProperty {
    pub fn into_link(self, id: impl Into<String>) -> LeadProperty {
        LeadProperty {
            id: id.into(),
            lead_id: self.lead_id,
            property_id: self.property_id,
            created_at: Utc::now(),
        }
    }
}
