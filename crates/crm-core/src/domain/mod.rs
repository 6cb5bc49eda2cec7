//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! No I/O happens here.

mod broker;
mod codes;
mod entity;
mod event;
mod lead;
mod lead_property;
mod note;
mod owner;
mod property;

pub use broker::Broker;
pub use codes::{BrokerStatus, LeadOrigin, LeadStatus, OwnerStatus, PropertyStatus, PropertyType};
pub use entity::{DomainError, DomainResult, Entity};
pub use event::{next_event_for, CalendarEvent, EventDraft, NewEvent};
pub use lead::{optional_text, split_tags, Lead, LeadDraft, LeadUpdate, NewLead};
pub use lead_property::{LeadProperty, NewLeadProperty};
pub use note::append_note;
pub use owner::{Owner, OwnerDraft, OwnerUpdate};
pub use property::{NewProperty, Property, PropertyDraft, PropertyUpdate};
