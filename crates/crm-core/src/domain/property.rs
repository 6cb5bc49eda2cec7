//! Property Entity

use serde::{Deserialize, Serialize};

use super::codes::{PropertyStatus, PropertyType};
use super::entity::{DomainError, DomainResult, Entity};
use super::lead::optional_text;
use crate::labels::{CodeLabel, Coded};
use crate::price::{leading_decimal, parse_price, price_text};

/// A listed property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub property_type: Coded<PropertyType>,
    pub status: Coded<PropertyStatus>,
    #[serde(default)]
    pub price: Option<f64>,
    pub address: String,
    pub city: String,
    /// Two-letter state code, stored upper-case
    pub state: String,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    /// Square metres
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl Property {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: &str,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            property_type: PropertyType::default().into(),
            status: PropertyStatus::default().into(),
            price: None,
            address: address.into(),
            city: city.into(),
            state: state.trim().to_uppercase(),
            zip_code: None,
            bedrooms: None,
            bathrooms: None,
            area: None,
            owner_id: None,
        }
    }

    /// "City - ST" line for tables
    pub fn location(&self) -> String {
        format!("{} - {}", self.city, self.state)
    }
}

impl Entity for Property {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for a property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProperty {
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub price: Option<f64>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<f64>,
    pub owner_id: Option<String>,
}

impl NewProperty {
    pub fn into_property(self, id: impl Into<String>) -> Property {
        let mut property = Property::new(id, self.title, self.address, self.city, &self.state);
        property.description = self.description;
        property.property_type = self.property_type.into();
        property.status = self.status.into();
        property.price = self.price;
        property.zip_code = self.zip_code;
        property.bedrooms = self.bedrooms;
        property.bathrooms = self.bathrooms;
        property.area = self.area;
        property.owner_id = self.owner_id;
        property
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PropertyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Option<String>>,
}

impl PropertyUpdate {
    /// Update that only sets or clears the asking price
    pub fn price(price: Option<f64>) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }
}

impl Property {
    pub fn apply(&mut self, update: &PropertyUpdate) {
        let PropertyUpdate {
            title,
            description,
            property_type,
            status,
            price,
            address,
            city,
            state,
            zip_code,
            bedrooms,
            bathrooms,
            area,
            owner_id,
        } = update.clone();
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = property_type {
            self.property_type = v.into();
        }
        if let Some(v) = status {
            self.status = v.into();
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = address {
            self.address = v;
        }
        if let Some(v) = city {
            self.city = v;
        }
        if let Some(v) = state {
            self.state = v.trim().to_uppercase();
        }
        if let Some(v) = zip_code {
            self.zip_code = v;
        }
        if let Some(v) = bedrooms {
            self.bedrooms = v;
        }
        if let Some(v) = bathrooms {
            self.bathrooms = v;
        }
        if let Some(v) = area {
            self.area = v;
        }
        if let Some(v) = owner_id {
            self.owner_id = v;
        }
    }
}

/// Leading integer of a count field; blank, zero or non-numeric reads as none
fn count_field(text: &str) -> Option<u32> {
    let digits: String = text.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok().filter(|n| *n > 0)
}

/// Square metres, decimal comma accepted
fn area_field(text: &str) -> Option<f64> {
    leading_decimal(&text.trim().replacen(',', ".", 1)).filter(|a| *a > 0.0)
}

/// Raw contents of the property form
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub property_type: Coded<PropertyType>,
    pub status: Coded<PropertyStatus>,
    pub price: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub owner_id: String,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            property_type: PropertyType::Apartment.into(),
            status: PropertyStatus::DEFAULT.into(),
            price: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            bedrooms: String::new(),
            bathrooms: String::new(),
            area: String::new(),
            owner_id: String::new(),
        }
    }
}

/// Validated fields shared by insert and update
struct PropertyFields {
    title: String,
    description: Option<String>,
    price: Option<f64>,
    address: String,
    city: String,
    state: String,
    zip_code: Option<String>,
    bedrooms: Option<u32>,
    bathrooms: Option<u32>,
    area: Option<f64>,
    owner_id: Option<String>,
}

impl PropertyDraft {
    pub fn from_property(property: &Property) -> Self {
        let count = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        Self {
            title: property.title.clone(),
            description: property.description.clone().unwrap_or_default(),
            property_type: property.property_type.clone(),
            status: property.status.clone(),
            price: price_text(property.price),
            address: property.address.clone(),
            city: property.city.clone(),
            state: property.state.clone(),
            zip_code: property.zip_code.clone().unwrap_or_default(),
            bedrooms: count(property.bedrooms),
            bathrooms: count(property.bathrooms),
            area: property.area.map(|a| a.to_string().replace('.', ",")).unwrap_or_default(),
            owner_id: property.owner_id.clone().unwrap_or_default(),
        }
    }

    /// Draft for a new property of `owner_id`
    pub fn for_owner(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            ..Default::default()
        }
    }

    fn fields(&self) -> DomainResult<PropertyFields> {
        let required = [&self.title, &self.address, &self.city, &self.state];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DomainError::InvalidInput("Preencha todos os campos obrigatórios".to_string()));
        }
        Ok(PropertyFields {
            title: self.title.trim().to_string(),
            description: optional_text(&self.description),
            price: parse_price(&self.price).into_field("Preço")?,
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_uppercase(),
            zip_code: optional_text(&self.zip_code),
            bedrooms: count_field(&self.bedrooms),
            bathrooms: count_field(&self.bathrooms),
            area: area_field(&self.area),
            owner_id: optional_text(&self.owner_id),
        })
    }

    /// Insert payload; unknown codes fall back to the defaults
    pub fn to_new(&self) -> DomainResult<NewProperty> {
        let f = self.fields()?;
        Ok(NewProperty {
            title: f.title,
            description: f.description,
            property_type: self.property_type.known().unwrap_or(PropertyType::DEFAULT),
            status: self.status.known().unwrap_or(PropertyStatus::DEFAULT),
            price: f.price,
            address: f.address,
            city: f.city,
            state: f.state,
            zip_code: f.zip_code,
            bedrooms: f.bedrooms,
            bathrooms: f.bathrooms,
            area: f.area,
            owner_id: f.owner_id,
        })
    }

    /// Full update of `original`; coded fields are sent only when changed
    pub fn to_update(&self, original: &Property) -> DomainResult<PropertyUpdate> {
        let f = self.fields()?;
        Ok(PropertyUpdate {
            title: Some(f.title),
            description: Some(f.description),
            property_type: self.property_type.changed_from(&original.property_type),
            status: self.status.changed_from(&original.status),
            price: Some(f.price),
            address: Some(f.address),
            city: Some(f.city),
            state: Some(f.state),
            zip_code: Some(f.zip_code),
            bedrooms: Some(f.bedrooms),
            bathrooms: Some(f.bathrooms),
            area: Some(f.area),
            owner_id: Some(f.owner_id),
        })
    }
}
