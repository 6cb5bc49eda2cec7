//! Calendar Event Entity

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::lead::optional_text;

/// A scheduled visit, call or meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub broker_id: Option<String>,
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start_time,
            end_time,
            lead_id: None,
            property_id: None,
            broker_id: None,
        }
    }

    pub fn is_for_lead(&self, lead_id: &str) -> bool {
        self.lead_id.as_deref() == Some(lead_id)
    }
}

impl Entity for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Insert payload for an event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub lead_id: Option<String>,
    pub property_id: Option<String>,
    pub broker_id: Option<String>,
}

impl NewEvent {
    pub fn into_event(self, id: impl Into<String>) -> CalendarEvent {
        let mut event = CalendarEvent::new(id, self.title, self.start_time, self.end_time);
        event.description = self.description;
        event.lead_id = self.lead_id;
        event.property_id = self.property_id;
        event.broker_id = self.broker_id;
        event
    }
}

/// Format of a `datetime-local` input value
const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Raw contents of the schedule form
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// `datetime-local` value in the user's zone
    pub start: String,
    pub duration_minutes: i64,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start: String::new(),
            duration_minutes: 60,
        }
    }
}

impl EventDraft {
    /// Event for `lead_id`, reading the start time in `zone`
    pub fn to_new<Tz: TimeZone>(&self, zone: &Tz, lead_id: Option<&str>, broker_id: Option<&str>) -> DomainResult<NewEvent> {
        let title = self.title.trim();
        if title.is_empty() || self.start.trim().is_empty() {
            return Err(DomainError::InvalidInput("Título e data são obrigatórios".to_string()));
        }
        let naive = NaiveDateTime::parse_from_str(self.start.trim(), LOCAL_INPUT_FORMAT)
            .map_err(|_| DomainError::InvalidInput(format!("Data inválida: {}", self.start)))?;
        let start_time = zone
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| DomainError::InvalidInput(format!("Data inválida: {}", self.start)))?
            .with_timezone(&Utc);
        Ok(NewEvent {
            title: title.to_string(),
            description: optional_text(&self.description),
            start_time,
            end_time: start_time + Duration::minutes(self.duration_minutes.max(0)),
            lead_id: lead_id.map(str::to_string),
            property_id: None,
            broker_id: broker_id.map(str::to_string),
        })
    }
}

/// Earliest event for `lead_id` starting at or after `now`
pub fn next_event_for<'a>(events: &'a [CalendarEvent], lead_id: &str, now: DateTime<Utc>) -> Option<&'a CalendarEvent> {
    events
        .iter()
        .filter(|e| e.is_for_lead(lead_id) && e.start_time >= now)
        .min_by_key(|e| e.start_time)
}
