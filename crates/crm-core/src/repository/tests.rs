//! Repository Integration Tests
//!
//! Board and CRUD scenarios against the in-memory repository.

use async_trait::async_trait;
use tokio::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};

use crate::domain::{
    DomainError, DomainResult, Lead, LeadStatus, LeadUpdate, NewEvent, NewLead, NewLeadProperty, OwnerUpdate,
    PropertyDraft, PropertyStatus,
};
use crate::kanban::{commit_status_change, BoardTarget, DropDecision, KanbanBoard, StatusChange};
use crate::repository::{
    BrokerRepository, EventRepository, InMemoryRepository, LeadPropertyRepository, LeadRepository, LeadStatusUpdater,
    OwnerRepository, PropertyRepository,
};

fn setup_board_repo() -> InMemoryRepository {
    InMemoryRepository::with_leads(vec![
        Lead::new("L1", "João Silva", "(11) 98765-4321", LeadStatus::New),
        Lead::new("L2", "Maria Santos", "(11) 97654-3210", LeadStatus::Negotiating),
        Lead::new("L3", "Pedro Costa", "(11) 96543-2109", LeadStatus::Closed),
    ])
}

/// Wraps a repository and records every status write
struct RecordingUpdater {
    inner: InMemoryRepository,
    calls: Mutex<Vec<(String, LeadStatus)>>,
}

#[async_trait(?Send)]
impl LeadStatusUpdater for RecordingUpdater {
    async fn update_lead_status(&self, id: &str, status: LeadStatus) -> DomainResult<Lead> {
        self.calls.lock().await.push((id.to_string(), status));
        self.inner.update_lead_status(id, status).await
    }
}

struct FailingUpdater {
    attempts: Mutex<usize>,
}

#[async_trait(?Send)]
impl LeadStatusUpdater for FailingUpdater {
    async fn update_lead_status(&self, _id: &str, _status: LeadStatus) -> DomainResult<Lead> {
        *self.attempts.lock().await += 1;
        Err(DomainError::Backend("503 Service Unavailable".to_string()))
    }
}

/// Resolve a drop against the current board and persist it if it moves
async fn drop_card(updater: &RecordingUpdater, lead_id: &str, target: Option<BoardTarget>) -> DropDecision {
    let leads = updater.inner.list_leads().await.expect("List failed");
    let board = KanbanBoard::from_leads(&leads);
    let card = board.pick(lead_id).expect("Card not on board");
    let decision = board.decide_drop(&card, target.as_ref());
    if let DropDecision::Move(change) = &decision {
        commit_status_change(updater, change).await.expect("Commit failed");
    }
    decision
}

fn recording() -> RecordingUpdater {
    RecordingUpdater {
        inner: setup_board_repo(),
        calls: Mutex::new(Vec::new()),
    }
}

#[tokio::test]
async fn test_drop_on_other_column_updates_once() {
    let updater = recording();

    let decision = drop_card(&updater, "L1", Some(BoardTarget::Column("negociacao".into()))).await;
    assert!(matches!(decision, DropDecision::Move(_)));
    assert_eq!(*updater.calls.lock().await, [("L1".to_string(), LeadStatus::Negotiating)]);

    let leads = updater.inner.list_leads().await.unwrap();
    let board = KanbanBoard::from_leads(&leads);
    let holding: Vec<&str> = board
        .columns()
        .iter()
        .filter(|c| c.contains("L1"))
        .map(|c| c.title())
        .collect();
    assert_eq!(holding, ["Em Negociação"]);
}

#[tokio::test]
async fn test_drop_on_card_moves_to_its_column() {
    let updater = recording();

    drop_card(&updater, "L1", Some(BoardTarget::Card("L3".into()))).await;
    assert_eq!(*updater.calls.lock().await, [("L1".to_string(), LeadStatus::Closed)]);
    let lead = updater.inner.get_lead("L1").await.unwrap().unwrap();
    assert_eq!(lead.stage(), Some(LeadStatus::Closed));
}

#[tokio::test]
async fn test_same_column_and_cancelled_drops_do_not_write() {
    let updater = recording();

    let same = drop_card(&updater, "L2", Some(BoardTarget::Column("negociacao".into()))).await;
    assert_eq!(same, DropDecision::NoChange);
    let nowhere = drop_card(&updater, "L2", None).await;
    assert_eq!(nowhere, DropDecision::Cancelled);
    let unknown = drop_card(&updater, "L2", Some(BoardTarget::Card("ghost".into()))).await;
    assert_eq!(unknown, DropDecision::Cancelled);

    assert!(updater.calls.lock().await.is_empty());
    let lead = updater.inner.get_lead("L2").await.unwrap().unwrap();
    assert_eq!(lead.stage(), Some(LeadStatus::Negotiating));
}

#[tokio::test]
async fn test_failed_commit_is_not_retried() {
    let updater = FailingUpdater { attempts: Mutex::new(0) };
    let change = StatusChange {
        lead_id: "L1".into(),
        from: LeadStatus::New,
        to: LeadStatus::Contacted,
    };

    let result = commit_status_change(&updater, &change).await;
    assert!(matches!(result, Err(DomainError::Backend(_))));
    assert_eq!(*updater.attempts.lock().await, 1);
}

#[tokio::test]
async fn test_commit_unknown_lead_is_not_found() {
    let repo = setup_board_repo();
    let change = StatusChange {
        lead_id: "missing".into(),
        from: LeadStatus::New,
        to: LeadStatus::Lost,
    };
    let result = commit_status_change(&repo, &change).await;
    assert_eq!(result, Err(DomainError::NotFound("missing".to_string())));
}

#[tokio::test]
async fn test_create_lead() {
    let repo = InMemoryRepository::new();

    let created = repo
        .create_lead(&NewLead {
            name: "Ana Paula".to_string(),
            phone: "(11) 90000-1111".to_string(),
            budget: Some(350_000.0),
            ..Default::default()
        })
        .await
        .expect("Failed to create");

    assert!(!created.id.is_empty());
    assert_eq!(created.stage(), Some(LeadStatus::New));
    assert_eq!(repo.list_leads().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_lead_requires_name() {
    let repo = InMemoryRepository::new();
    let result = repo
        .create_lead(&NewLead {
            name: "  ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn test_list_newest_first() {
    let mut old = Lead::new("old", "Old", "1", LeadStatus::New);
    old.created_at = old.created_at - Duration::days(3);
    let fresh = Lead::new("fresh", "Fresh", "2", LeadStatus::New);
    let repo = InMemoryRepository::with_leads(vec![old, fresh]);

    let ids: Vec<String> = repo.list_leads().await.unwrap().into_iter().map(|l| l.id).collect();
    assert_eq!(ids, ["fresh", "old"]);
}

#[tokio::test]
async fn test_update_and_delete_lead() {
    let repo = setup_board_repo();

    let update = LeadUpdate {
        notes: Some(Some("Retornar sexta".to_string())),
        budget: Some(Some(600_000.0)),
        ..Default::default()
    };
    let updated = repo.update_lead("L1", &update).await.expect("Update failed");
    assert_eq!(updated.notes.as_deref(), Some("Retornar sexta"));
    assert_eq!(updated.budget, Some(600_000.0));

    repo.delete_lead("L1").await.expect("Delete failed");
    assert!(repo.get_lead("L1").await.unwrap().is_none());
    assert_eq!(repo.delete_lead("L1").await, Err(DomainError::NotFound("L1".to_string())));
}

#[tokio::test]
async fn test_update_property_price() {
    let repo = InMemoryRepository::demo();

    let property = repo.update_property_price("p-terreno", Some(215_000.0)).await.unwrap();
    assert_eq!(property.price, Some(215_000.0));
    let cleared = repo.update_property_price("p-terreno", None).await.unwrap();
    assert_eq!(cleared.price, None);
    assert!(repo.update_property_price("nope", None).await.is_err());
}

#[tokio::test]
async fn test_demo_data_is_consistent() {
    let repo = InMemoryRepository::demo();
    let leads = repo.list_leads().await.unwrap();
    let brokers = repo.list_brokers().await.unwrap();
    let events = repo.list_events().await.unwrap();

    assert!(leads.iter().all(|l| l.stage().is_some()));
    for lead in &leads {
        if let Some(broker) = &lead.assigned_broker_id {
            assert!(brokers.iter().any(|b| &b.id == broker), "unknown broker {broker}");
        }
    }
    assert!(events.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    assert_eq!(repo.lead_properties("L2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_owner() {
    let repo = InMemoryRepository::demo();

    let update = OwnerUpdate {
        email: Some(Some("marcos@exemplo.com".to_string())),
        ..OwnerUpdate::notes("17/10/2026 10:00: Quer vender até dezembro".to_string())
    };
    let owner = repo.update_owner("o-marcos", &update).await.expect("Update failed");
    assert_eq!(owner.email.as_deref(), Some("marcos@exemplo.com"));
    assert!(owner.notes.as_deref().unwrap().contains("dezembro"));
    assert_eq!(owner.name, "Marcos Vieira");

    assert_eq!(
        repo.update_owner("o-ghost", &update).await,
        Err(DomainError::NotFound("o-ghost".to_string()))
    );
}

#[tokio::test]
async fn test_create_property_for_owner() {
    let repo = InMemoryRepository::demo();
    let before = repo.list_properties_for_owner("o-marcos").await.unwrap();

    let mut draft = PropertyDraft::for_owner("o-marcos");
    draft.title = "Sala Comercial Centro".to_string();
    draft.address = "Rua XV de Novembro, 300".to_string();
    draft.city = "Campinas".to_string();
    draft.state = "sp".to_string();
    draft.price = "420.000,00".to_string();
    let created = repo.create_property(&draft.to_new().unwrap()).await.expect("Create failed");

    assert_eq!(created.state, "SP");
    assert_eq!(created.price, Some(420_000.0));
    let after = repo.list_properties_for_owner("o-marcos").await.unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0].id, created.id);
    assert!(after.iter().all(|p| p.owner_id.as_deref() == Some("o-marcos")));
}

#[tokio::test]
async fn test_create_property_for_unknown_owner() {
    let repo = InMemoryRepository::demo();
    let mut draft = PropertyDraft::for_owner("o-ghost");
    draft.title = "Casa".to_string();
    draft.address = "Rua A, 1".to_string();
    draft.city = "Santos".to_string();
    draft.state = "SP".to_string();

    let result = repo.create_property(&draft.to_new().unwrap()).await;
    assert_eq!(result, Err(DomainError::NotFound("o-ghost".to_string())));
}

#[tokio::test]
async fn test_update_property_from_draft() {
    let repo = InMemoryRepository::demo();
    let original = repo
        .list_properties()
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.id == "p-casa")
        .expect("seeded property");

    let mut draft = PropertyDraft::from_property(&original);
    draft.status = PropertyStatus::Sold.into();
    draft.bedrooms = "5".to_string();
    let updated = repo
        .update_property("p-casa", &draft.to_update(&original).unwrap())
        .await
        .expect("Update failed");

    assert_eq!(updated.status.known(), Some(PropertyStatus::Sold));
    assert_eq!(updated.bedrooms, Some(5));
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.price, original.price);
}

#[tokio::test]
async fn test_link_and_unlink_lead_property() {
    let repo = InMemoryRepository::demo();
    let ids = |props: Vec<crate::domain::Property>| props.into_iter().map(|p| p.id).collect::<Vec<_>>();

    assert_eq!(ids(repo.lead_properties("L4").await.unwrap()), ["p-casa", "p-apto"]);
    assert!(repo.lead_properties("L3").await.unwrap().is_empty());

    let link = NewLeadProperty {
        lead_id: "L3".to_string(),
        property_id: "p-terreno".to_string(),
    };
    let first = repo.link_property(&link).await.expect("Link failed");
    let again = repo.link_property(&link).await.expect("Relink failed");
    assert_eq!(first.id, again.id);
    assert_eq!(ids(repo.lead_properties("L3").await.unwrap()), ["p-terreno"]);

    repo.unlink_property("L3", "p-terreno").await.expect("Unlink failed");
    assert!(repo.lead_properties("L3").await.unwrap().is_empty());
    assert!(matches!(
        repo.unlink_property("L3", "p-terreno").await,
        Err(DomainError::NotFound(_))
    ));

    let dangling = NewLeadProperty {
        lead_id: "L3".to_string(),
        property_id: "p-ghost".to_string(),
    };
    assert_eq!(
        repo.link_property(&dangling).await,
        Err(DomainError::NotFound("p-ghost".to_string()))
    );
}

#[tokio::test]
async fn test_create_event_is_listed_in_order() {
    let repo = InMemoryRepository::new();
    let at = Utc.with_ymd_and_hms(2026, 10, 20, 14, 0, 0).unwrap();
    let event = |title: &str, start| NewEvent {
        title: title.to_string(),
        description: None,
        start_time: start,
        end_time: start + Duration::hours(1),
        lead_id: Some("L1".to_string()),
        property_id: None,
        broker_id: None,
    };

    repo.create_event(&event("Visita", at)).await.expect("Create failed");
    repo.create_event(&event("Ligação", at - Duration::days(1))).await.expect("Create failed");

    let titles: Vec<String> = repo.list_events().await.unwrap().into_iter().map(|e| e.title).collect();
    assert_eq!(titles, ["Ligação", "Visita"]);

    let backwards = NewEvent {
        end_time: at - Duration::hours(1),
        ..event("Errado", at)
    };
    assert!(matches!(repo.create_event(&backwards).await, Err(DomainError::InvalidInput(_))));
    assert!(matches!(repo.create_event(&event(" ", at)).await, Err(DomainError::InvalidInput(_))));
}
