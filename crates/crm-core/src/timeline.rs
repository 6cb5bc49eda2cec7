//! Lead Timeline
//!
//! Activity history shown on the lead profile, assembled from the lead's
//! own timestamps and its calendar events. Newest entry first.

use chrono::{DateTime, Utc};

use crate::domain::{CalendarEvent, Lead};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    Created,
    Updated,
    /// Event already started
    PastEvent,
    UpcomingEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub at: DateTime<Utc>,
    pub kind: TimelineKind,
    pub title: String,
    pub description: Option<String>,
}

pub fn lead_timeline(lead: &Lead, events: &[CalendarEvent], now: DateTime<Utc>) -> Vec<TimelineEntry> {
    let mut entries = vec![TimelineEntry {
        at: lead.created_at,
        kind: TimelineKind::Created,
        title: "Lead criado".to_string(),
        description: Some(format!("Origem: {}", lead.origin.label())),
    }];
    if lead.updated_at > lead.created_at {
        entries.push(TimelineEntry {
            at: lead.updated_at,
            kind: TimelineKind::Updated,
            title: "Lead atualizado".to_string(),
            description: Some(format!("Status: {}", lead.status.label())),
        });
    }
    entries.extend(events.iter().filter(|e| e.is_for_lead(&lead.id)).map(|event| TimelineEntry {
        at: event.start_time,
        kind: if event.start_time < now {
            TimelineKind::PastEvent
        } else {
            TimelineKind::UpcomingEvent
        },
        title: event.title.clone(),
        description: event.description.clone(),
    }));
    entries.sort_by(|a, b| b.at.cmp(&a.at));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadStatus;
    use chrono::Duration;

    #[test]
    fn test_timeline_newest_first() {
        let now = Utc::now();
        let mut lead = Lead::new("L1", "Ana", "1", LeadStatus::Negotiating);
        lead.created_at = now - Duration::days(10);
        lead.updated_at = now - Duration::days(2);

        let mut call = CalendarEvent::new("e1", "Ligação", now - Duration::days(5), now - Duration::days(5));
        call.lead_id = Some("L1".into());
        let mut visit = CalendarEvent::new("e2", "Visita", now + Duration::days(1), now + Duration::days(1));
        visit.lead_id = Some("L1".into());
        let other = CalendarEvent::new("e3", "Outro", now, now);

        let timeline = lead_timeline(&lead, &[call, visit, other], now);
        let kinds: Vec<TimelineKind> = timeline.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                TimelineKind::UpcomingEvent,
                TimelineKind::Updated,
                TimelineKind::PastEvent,
                TimelineKind::Created
            ]
        );
        assert_eq!(timeline[1].description.as_deref(), Some("Status: Em Negociação"));
    }

    #[test]
    fn test_untouched_lead_has_only_creation() {
        let lead = Lead::new("L1", "Ana", "1", LeadStatus::New);
        let timeline = lead_timeline(&lead, &[], Utc::now());
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].kind, TimelineKind::Created);
    }
}
