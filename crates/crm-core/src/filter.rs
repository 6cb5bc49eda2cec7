//! List Filters
//!
//! Search and select filters shared by the board and the list pages.

use crate::domain::{Broker, Lead, LeadOrigin, Owner};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Filter applied to the lead list before the board is built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    pub search: String,
    pub broker_id: Option<String>,
    pub origin: Option<LeadOrigin>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        self.matches_search(lead) && self.matches_broker(lead) && self.matches_origin(lead)
    }

    /// Name and email ignore case, phone is a plain substring match
    fn matches_search(&self, lead: &Lead) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        contains_ci(&lead.name, &lower)
            || lead.email.as_deref().is_some_and(|email| contains_ci(email, &lower))
            || lead.phone.contains(term)
    }

    fn matches_broker(&self, lead: &Lead) -> bool {
        match &self.broker_id {
            Some(id) => lead.assigned_broker_id.as_deref() == Some(id.as_str()),
            None => true,
        }
    }

    fn matches_origin(&self, lead: &Lead) -> bool {
        match self.origin {
            Some(origin) => lead.origin.is(origin),
            None => true,
        }
    }

    /// Leads passing the filter, order kept
    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|lead| self.matches(lead)).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.broker_id.is_some() || self.origin.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Name/email search for the brokers page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrokerFilter {
    pub search: String,
}

impl BrokerFilter {
    pub fn matches(&self, broker: &Broker) -> bool {
        let term = self.search.trim().to_lowercase();
        term.is_empty() || contains_ci(&broker.name, &term) || contains_ci(&broker.email, &term)
    }
}

/// Name/email search for the owners page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnerFilter {
    pub search: String,
}

impl OwnerFilter {
    pub fn matches(&self, owner: &Owner) -> bool {
        let term = self.search.trim().to_lowercase();
        term.is_empty()
            || contains_ci(&owner.name, &term)
            || owner.email.as_deref().is_some_and(|email| contains_ci(email, &term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadStatus;

    fn leads() -> Vec<Lead> {
        let mut joao = Lead::new("L1", "João Silva", "(11) 98765-4321", LeadStatus::New);
        joao.email = Some("Joao@Email.com".to_string());
        joao.origin = LeadOrigin::SocialMedia.into();
        joao.assigned_broker_id = Some("b-ana".to_string());

        let mut maria = Lead::new("L2", "Maria Santos", "(21) 97654-3210", LeadStatus::Qualified);
        maria.origin = LeadOrigin::Referral.into();
        maria.assigned_broker_id = Some("b-carlos".to_string());

        vec![joao, maria]
    }

    fn ids(matched: Vec<&Lead>) -> Vec<&str> {
        matched.into_iter().map(|lead| lead.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = LeadFilter::default();
        assert!(!filter.is_active());
        assert_eq!(ids(filter.apply(&leads())), ["L1", "L2"]);
    }

    #[test]
    fn test_search_name_and_email_ignore_case() {
        let leads = leads();
        let mut filter = LeadFilter {
            search: "SANTOS".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&leads)), ["L2"]);

        filter.search = "joao@email".to_string();
        assert_eq!(ids(filter.apply(&leads)), ["L1"]);
    }

    #[test]
    fn test_search_by_phone() {
        let filter = LeadFilter {
            search: "(21)".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&leads())), ["L2"]);
    }

    #[test]
    fn test_broker_and_origin_filters() {
        let leads = leads();
        let mut filter = LeadFilter {
            broker_id: Some("b-ana".to_string()),
            ..Default::default()
        };
        assert!(filter.is_active());
        assert_eq!(ids(filter.apply(&leads)), ["L1"]);

        filter.broker_id = None;
        filter.origin = Some(LeadOrigin::Referral);
        assert_eq!(ids(filter.apply(&leads)), ["L2"]);

        filter.origin = Some(LeadOrigin::Event);
        assert!(filter.apply(&leads).is_empty());

        filter.clear();
        assert_eq!(filter, LeadFilter::default());
    }

    #[test]
    fn test_broker_and_owner_search() {
        let broker = Broker::new("b1", "Ana Costa", "ana@imobiliaria.com");
        assert!(BrokerFilter { search: "costa".into() }.matches(&broker));
        assert!(BrokerFilter { search: "IMOBILIARIA".into() }.matches(&broker));
        assert!(!BrokerFilter { search: "carlos".into() }.matches(&broker));

        let owner = Owner::new("o1", "Helena Prado", "(11) 93333-2222");
        assert!(OwnerFilter::default().matches(&owner));
        assert!(OwnerFilter { search: "prado".into() }.matches(&owner));
        assert!(!OwnerFilter { search: "helena@".into() }.matches(&owner));
    }
}
