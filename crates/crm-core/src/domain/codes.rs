//! Coded Fields
//!
//! Closed enumerations for every value the backend stores as a code.
//! Serde uses the stored code; labels live in the [`CodeLabel`] impls.

use serde::{Deserialize, Serialize};

use crate::labels::CodeLabel;

/// Pipeline stage of a lead, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    #[serde(rename = "novo")]
    New,
    #[serde(rename = "contato")]
    Contacted,
    #[serde(rename = "qualificado")]
    Qualified,
    #[serde(rename = "proposta")]
    VisitScheduled,
    #[serde(rename = "negociacao")]
    Negotiating,
    #[serde(rename = "fechado")]
    Closed,
    #[serde(rename = "perdido")]
    Lost,
}

impl LeadStatus {
    /// Column accent colour on the Kanban board
    pub fn board_color(&self) -> &'static str {
        match self {
            LeadStatus::New => "#8B7355",
            LeadStatus::Contacted => "#6B8E23",
            LeadStatus::Qualified => "#4682B4",
            LeadStatus::VisitScheduled => "#CD853F",
            LeadStatus::Negotiating => "#9370DB",
            LeadStatus::Closed => "#556B2F",
            LeadStatus::Lost => "#8B4513",
        }
    }

    /// Position in the pipeline (0 = new)
    pub fn stage_index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Still being worked (neither won nor lost)
    pub fn is_open(&self) -> bool {
        !matches!(self, LeadStatus::Closed | LeadStatus::Lost)
    }
}

impl CodeLabel for LeadStatus {
    const ALL: &'static [Self] = &[
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::VisitScheduled,
        LeadStatus::Negotiating,
        LeadStatus::Closed,
        LeadStatus::Lost,
    ];
    const DEFAULT: Self = LeadStatus::New;

    fn code(&self) -> &'static str {
        match self {
            LeadStatus::New => "novo",
            LeadStatus::Contacted => "contato",
            LeadStatus::Qualified => "qualificado",
            LeadStatus::VisitScheduled => "proposta",
            LeadStatus::Negotiating => "negociacao",
            LeadStatus::Closed => "fechado",
            LeadStatus::Lost => "perdido",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "Novo Lead",
            LeadStatus::Contacted => "Em Atendimento",
            LeadStatus::Qualified => "Qualificado",
            LeadStatus::VisitScheduled => "Visita Agendada",
            LeadStatus::Negotiating => "Em Negociação",
            LeadStatus::Closed => "Venda",
            LeadStatus::Lost => "Perdido",
        }
    }
}

/// Where a lead came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadOrigin {
    #[serde(rename = "website")]
    Website,
    #[serde(rename = "indicacao")]
    Referral,
    #[serde(rename = "redes_sociais")]
    SocialMedia,
    #[serde(rename = "telefone")]
    Phone,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "evento")]
    Event,
    #[default]
    #[serde(rename = "outro")]
    Other,
}

impl CodeLabel for LeadOrigin {
    const ALL: &'static [Self] = &[
        LeadOrigin::Website,
        LeadOrigin::Referral,
        LeadOrigin::SocialMedia,
        LeadOrigin::Phone,
        LeadOrigin::Email,
        LeadOrigin::Event,
        LeadOrigin::Other,
    ];
    const DEFAULT: Self = LeadOrigin::Other;

    fn code(&self) -> &'static str {
        match self {
            LeadOrigin::Website => "website",
            LeadOrigin::Referral => "indicacao",
            LeadOrigin::SocialMedia => "redes_sociais",
            LeadOrigin::Phone => "telefone",
            LeadOrigin::Email => "email",
            LeadOrigin::Event => "evento",
            LeadOrigin::Other => "outro",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LeadOrigin::Website => "Site",
            LeadOrigin::Referral => "Indicação",
            LeadOrigin::SocialMedia => "Facebook Ads",
            LeadOrigin::Phone => "WhatsApp",
            LeadOrigin::Email => "E-mail",
            LeadOrigin::Event => "Evento",
            LeadOrigin::Other => "Outro",
        }
    }

    fn label_alias(label: &str) -> Option<Self> {
        match label {
            "Instagram" | "Redes Sociais" => Some(LeadOrigin::SocialMedia),
            "Google Ads" => Some(LeadOrigin::Website),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrokerStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "inativo")]
    Inactive,
    #[serde(rename = "ferias")]
    OnVacation,
}

impl CodeLabel for BrokerStatus {
    const ALL: &'static [Self] = &[BrokerStatus::Active, BrokerStatus::Inactive, BrokerStatus::OnVacation];
    const DEFAULT: Self = BrokerStatus::Active;

    fn code(&self) -> &'static str {
        match self {
            BrokerStatus::Active => "ativo",
            BrokerStatus::Inactive => "inativo",
            BrokerStatus::OnVacation => "ferias",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BrokerStatus::Active => "Ativo",
            BrokerStatus::Inactive => "Inativo",
            BrokerStatus::OnVacation => "Férias",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OwnerStatus {
    #[default]
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "inativo")]
    Inactive,
}

impl CodeLabel for OwnerStatus {
    const ALL: &'static [Self] = &[OwnerStatus::Active, OwnerStatus::Inactive];
    const DEFAULT: Self = OwnerStatus::Active;

    fn code(&self) -> &'static str {
        match self {
            OwnerStatus::Active => "ativo",
            OwnerStatus::Inactive => "inativo",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OwnerStatus::Active => "Ativo",
            OwnerStatus::Inactive => "Inativo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PropertyStatus {
    #[default]
    #[serde(rename = "disponivel")]
    Available,
    #[serde(rename = "reservado")]
    Reserved,
    #[serde(rename = "vendido")]
    Sold,
    #[serde(rename = "alugado")]
    Rented,
}

impl CodeLabel for PropertyStatus {
    const ALL: &'static [Self] = &[
        PropertyStatus::Available,
        PropertyStatus::Reserved,
        PropertyStatus::Sold,
        PropertyStatus::Rented,
    ];
    const DEFAULT: Self = PropertyStatus::Available;

    fn code(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "disponivel",
            PropertyStatus::Reserved => "reservado",
            PropertyStatus::Sold => "vendido",
            PropertyStatus::Rented => "alugado",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "Disponível",
            PropertyStatus::Reserved => "Reservado",
            PropertyStatus::Sold => "Vendido",
            PropertyStatus::Rented => "Alugado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PropertyType {
    #[serde(rename = "apartamento")]
    Apartment,
    #[serde(rename = "casa")]
    House,
    #[serde(rename = "terreno")]
    Land,
    #[serde(rename = "comercial")]
    Commercial,
    #[serde(rename = "rural")]
    Rural,
    #[default]
    #[serde(rename = "outro")]
    Other,
}

impl CodeLabel for PropertyType {
    const ALL: &'static [Self] = &[
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Land,
        PropertyType::Commercial,
        PropertyType::Rural,
        PropertyType::Other,
    ];
    const DEFAULT: Self = PropertyType::Other;

    fn code(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartamento",
            PropertyType::House => "casa",
            PropertyType::Land => "terreno",
            PropertyType::Commercial => "comercial",
            PropertyType::Rural => "rural",
            PropertyType::Other => "outro",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartamento",
            PropertyType::House => "Casa",
            PropertyType::Land => "Terreno",
            PropertyType::Commercial => "Comercial",
            PropertyType::Rural => "Rural",
            PropertyType::Other => "Outro",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_stored_codes() {
        assert_eq!(serde_json::to_string(&LeadStatus::VisitScheduled).unwrap(), "\"proposta\"");
        assert_eq!(serde_json::to_string(&LeadOrigin::SocialMedia).unwrap(), "\"redes_sociais\"");
        for status in LeadStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
        }
    }

    #[test]
    fn test_pipeline_order() {
        assert_eq!(LeadStatus::New.stage_index(), 0);
        assert_eq!(LeadStatus::Lost.stage_index(), 6);
        assert!(LeadStatus::Qualified < LeadStatus::Negotiating);
        assert!(LeadStatus::Negotiating.is_open());
        assert!(!LeadStatus::Closed.is_open());
    }
}
