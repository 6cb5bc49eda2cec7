//! Broker Entity

use serde::{Deserialize, Serialize};

use super::codes::BrokerStatus;
use super::entity::Entity;
use crate::labels::Coded;

/// A sales agent leads can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broker {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: Coded<BrokerStatus>,
    /// Commission in percent
    #[serde(default)]
    pub commission_rate: Option<f64>,
}

impl Broker {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            status: BrokerStatus::Active.into(),
            commission_rate: None,
        }
    }

    /// Up to two initials for the card avatar
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Entity for Broker {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(Broker::new("b1", "ana costa silva", "a@x").initials(), "AC");
        assert_eq!(Broker::new("b2", "Pedro", "p@x").initials(), "P");
    }
}
