//! Code <-> Label Mapping
//!
//! Stored values are stable codes (`novo`, `redes_sociais`, ...); the UI shows
//! Portuguese labels. Every coded field is a closed enum implementing
//! [`CodeLabel`], so forward mapping is exhaustive at compile time.
//! [`Coded`] is the only place an unknown code can exist: values read back
//! from the backend that this build does not know about.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::domain::{LeadOrigin, LeadStatus};

/// Bidirectional code/label table for a closed enumeration.
pub trait CodeLabel: Sized + Copy + PartialEq + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];
    /// Result of a reverse lookup that matched nothing.
    const DEFAULT: Self;

    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;

    /// Extra labels accepted on reverse lookup (legacy form values).
    fn label_alias(_label: &str) -> Option<Self> {
        None
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    /// Exact label match, then aliases, then [`CodeLabel::DEFAULT`].
    fn from_label(label: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label() == label)
            .or_else(|| Self::label_alias(label))
            .unwrap_or(Self::DEFAULT)
    }

    /// All labels in display order, for select inputs.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.label()).collect()
    }
}

/// A coded value as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Coded<T> {
    Known(T),
    Unknown(String),
}

impl<T: CodeLabel> Coded<T> {
    pub fn from_raw(raw: &str) -> Self {
        match T::from_code(raw) {
            Some(v) => Coded::Known(v),
            None => Coded::Unknown(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Coded::Known(v) => Some(*v),
            Coded::Unknown(_) => None,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Coded::Known(v) => v.code(),
            Coded::Unknown(raw) => raw,
        }
    }

    /// Display label; an unknown code is shown as-is.
    pub fn label(&self) -> &str {
        match self {
            Coded::Known(v) => v.label(),
            Coded::Unknown(raw) => raw,
        }
    }

    pub fn is(&self, value: T) -> bool {
        self.known() == Some(value)
    }

    /// The value to write back after a form edit: `None` when the field was
    /// left as loaded, so an unknown stored code is never overwritten.
    pub fn changed_from(&self, original: &Coded<T>) -> Option<T> {
        if self == original {
            return None;
        }
        self.known()
    }
}

impl<T: CodeLabel> From<T> for Coded<T> {
    fn from(value: T) -> Self {
        Coded::Known(value)
    }
}

impl<T: CodeLabel> fmt::Display for Coded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<T: CodeLabel> Serialize for Coded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de, T: CodeLabel> Deserialize<'de> for Coded<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Coded::from_raw(&raw))
    }
}

/// Label for a raw lead status code; unknown codes come back unchanged.
pub fn status_code_to_label(code: &str) -> String {
    Coded::<LeadStatus>::from_raw(code).label().to_string()
}

/// Code for a lead status label; unknown labels map to `novo`.
pub fn status_label_to_code(label: &str) -> &'static str {
    LeadStatus::from_label(label).code()
}

/// Label for a raw lead origin code; unknown codes come back unchanged.
pub fn origin_code_to_label(code: &str) -> String {
    Coded::<LeadOrigin>::from_raw(code).label().to_string()
}

/// Code for a lead origin label; unknown labels map to `outro`.
pub fn origin_label_to_code(label: &str) -> &'static str {
    LeadOrigin::from_label(label).code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BrokerStatus, OwnerStatus, PropertyStatus, PropertyType};

    fn assert_round_trip<T: CodeLabel + std::fmt::Debug>() {
        for value in T::ALL {
            assert!(!value.label().is_empty());
            assert_eq!(T::from_label(value.label()), *value);
            assert_eq!(T::from_code(value.code()), Some(*value));
        }
    }

    #[test]
    fn test_every_table_round_trips() {
        assert_round_trip::<LeadStatus>();
        assert_round_trip::<LeadOrigin>();
        assert_round_trip::<BrokerStatus>();
        assert_round_trip::<OwnerStatus>();
        assert_round_trip::<PropertyStatus>();
        assert_round_trip::<PropertyType>();
    }

    #[test]
    fn test_status_strings_round_trip() {
        for status in LeadStatus::ALL {
            let label = status_code_to_label(status.code());
            assert_eq!(status_label_to_code(&label), status.code());
        }
    }

    #[test]
    fn test_unknown_code_is_shown_raw() {
        assert_eq!(status_code_to_label("unknown_code"), "unknown_code");
        assert_eq!(origin_code_to_label("tiktok"), "tiktok");
    }

    #[test]
    fn test_unknown_label_falls_back_to_default() {
        assert_eq!(status_label_to_code("Arquivado"), "novo");
        assert_eq!(origin_label_to_code("Outdoor"), "outro");
        assert_eq!(PropertyType::from_label("Galpão"), PropertyType::Other);
    }

    #[test]
    fn test_origin_legacy_labels() {
        assert_eq!(origin_label_to_code("Instagram"), "redes_sociais");
        assert_eq!(origin_label_to_code("Google Ads"), "website");
    }

    #[test]
    fn test_changed_from() {
        let stored: Coded<LeadStatus> = Coded::from_raw("arquivado");
        assert_eq!(stored.changed_from(&stored), None);
        assert_eq!(Coded::from(LeadStatus::Lost).changed_from(&stored), Some(LeadStatus::Lost));
        let known = Coded::from(LeadStatus::New);
        assert_eq!(known.changed_from(&known), None);
    }

    #[test]
    fn test_coded_serde_keeps_unknown_codes() {
        let known: Coded<LeadStatus> = serde_json::from_str("\"negociacao\"").unwrap();
        assert_eq!(known, Coded::Known(LeadStatus::Negotiating));
        assert_eq!(known.label(), "Em Negociação");

        let unknown: Coded<LeadStatus> = serde_json::from_str("\"arquivado\"").unwrap();
        assert_eq!(unknown.known(), None);
        assert_eq!(unknown.label(), "arquivado");
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"arquivado\"");
    }
}
