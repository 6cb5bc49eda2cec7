//! Kanban Pipeline Board
//!
//! Columns are a projection of the lead list: one per known stage, rebuilt
//! on every render. A drop resolves to a destination stage; only a move to a
//! different stage produces a [`StatusChange`], which is persisted with a
//! single status update and never rolled back locally. The next reload of
//! the lead list is what settles the board.

use crate::domain::{DomainResult, Lead, LeadStatus};
use crate::labels::CodeLabel;
use crate::repository::LeadStatusUpdater;

/// What the pointer was released over, as reported by the DOM
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoardTarget {
    /// A column drop area, by column id (the stage code)
    Column(String),
    /// Another card, by lead id
    Card(String),
}

impl BoardTarget {
    pub fn raw_id(&self) -> &str {
        match self {
            BoardTarget::Column(id) | BoardTarget::Card(id) => id,
        }
    }
}

/// One stage of the board
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub status: LeadStatus,
    pub leads: Vec<Lead>,
}

impl BoardColumn {
    /// DOM id of the column
    pub fn id(&self) -> &'static str {
        self.status.code()
    }

    pub fn title(&self) -> &'static str {
        self.status.label()
    }

    pub fn color(&self) -> &'static str {
        self.status.board_color()
    }

    pub fn contains(&self, lead_id: &str) -> bool {
        self.leads.iter().any(|lead| lead.id == lead_id)
    }
}

/// The card picked up by a drag, with the stage it was in at press time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedCard {
    pub lead_id: String,
    pub from: LeadStatus,
}

impl DraggedCard {
    pub fn new(lead_id: impl Into<String>, from: LeadStatus) -> Self {
        Self {
            lead_id: lead_id.into(),
            from,
        }
    }
}

/// A move of one lead between stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub lead_id: String,
    pub from: LeadStatus,
    pub to: LeadStatus,
}

/// Outcome of releasing a dragged card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropDecision {
    /// Nothing resolvable under the pointer
    Cancelled,
    /// Dropped back into its own column; reordering is not persisted
    NoChange,
    Move(StatusChange),
}

/// Board derived from a lead list
#[derive(Debug, Clone, PartialEq)]
pub struct KanbanBoard {
    columns: Vec<BoardColumn>,
}

impl KanbanBoard {
    /// Group leads by stage, keeping their input order inside each column.
    ///
    /// Leads whose status code is unknown to this build get no column.
    pub fn from_leads<'a, I>(leads: I) -> Self
    where
        I: IntoIterator<Item = &'a Lead>,
    {
        let mut columns: Vec<BoardColumn> = LeadStatus::ALL
            .iter()
            .map(|status| BoardColumn {
                status: *status,
                leads: Vec::new(),
            })
            .collect();

        for lead in leads {
            if let Some(stage) = lead.stage() {
                columns[stage.stage_index()].leads.push(lead.clone());
            }
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    pub fn column(&self, status: LeadStatus) -> &BoardColumn {
        &self.columns[status.stage_index()]
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.leads.len()).sum()
    }

    /// Stage of the column currently holding `lead_id`
    pub fn column_of(&self, lead_id: &str) -> Option<LeadStatus> {
        self.columns.iter().find(|c| c.contains(lead_id)).map(|c| c.status)
    }

    /// Destination stage for a release target: a known column id first,
    /// then the column of the card with that id.
    pub fn resolve_destination(&self, target: &BoardTarget) -> Option<LeadStatus> {
        let id = target.raw_id();
        LeadStatus::from_code(id).or_else(|| self.column_of(id))
    }

    /// Pick up `lead_id` from the column currently holding it
    pub fn pick(&self, lead_id: &str) -> Option<DraggedCard> {
        self.column_of(lead_id).map(|from| DraggedCard::new(lead_id, from))
    }

    /// Decide what releasing `card` over `target` means.
    ///
    /// The source stage is the one captured when the card was picked up,
    /// so a reload landing mid-drag does not change the comparison.
    pub fn decide_drop(&self, card: &DraggedCard, target: Option<&BoardTarget>) -> DropDecision {
        let lead_id = card.lead_id.as_str();
        let Some(to) = target.and_then(|t| self.resolve_destination(t)) else {
            log::debug!("drop of {lead_id} cancelled: no target");
            return DropDecision::Cancelled;
        };
        if self.column_of(lead_id).is_none() {
            log::debug!("drop of {lead_id} cancelled: card not on board");
            return DropDecision::Cancelled;
        }
        if card.from == to {
            return DropDecision::NoChange;
        }
        DropDecision::Move(StatusChange {
            lead_id: lead_id.to_string(),
            from: card.from,
            to,
        })
    }
}

/// Persist a move with exactly one status update.
///
/// A failure is logged and returned; the board is not rolled back and the
/// request is not retried.
pub async fn commit_status_change<U>(updater: &U, change: &StatusChange) -> DomainResult<Lead>
where
    U: LeadStatusUpdater + ?Sized,
{
    log::debug!(
        "moving lead {} from {} to {}",
        change.lead_id,
        change.from.code(),
        change.to.code()
    );
    updater
        .update_lead_status(&change.lead_id, change.to)
        .await
        .inspect_err(|e| log::error!("failed to update status of lead {}: {}", change.lead_id, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(id: &str, status: LeadStatus) -> Lead {
        Lead::new(id, format!("Lead {id}"), "(11) 90000-0000", status)
    }

    fn card(board: &KanbanBoard, id: &str) -> DraggedCard {
        board.pick(id).unwrap_or_else(|| DraggedCard::new(id, LeadStatus::New))
    }

    fn board() -> KanbanBoard {
        let leads = vec![
            lead("L1", LeadStatus::New),
            lead("L2", LeadStatus::New),
            lead("L3", LeadStatus::Negotiating),
            lead("L4", LeadStatus::Closed),
        ];
        KanbanBoard::from_leads(&leads)
    }

    #[test]
    fn test_one_column_per_stage_in_order() {
        let board = board();
        let ids: Vec<_> = board.columns().iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["novo", "contato", "qualificado", "proposta", "negociacao", "fechado", "perdido"]);
        assert_eq!(board.column(LeadStatus::New).leads.len(), 2);
        assert_eq!(board.column(LeadStatus::New).title(), "Novo Lead");
        assert_eq!(board.total(), 4);
    }

    #[test]
    fn test_unknown_status_gets_no_column() {
        let mut odd = lead("L9", LeadStatus::New);
        odd.status = crate::labels::Coded::Unknown("arquivado".to_string());
        let board = KanbanBoard::from_leads(&[odd, lead("L1", LeadStatus::Qualified)]);
        assert_eq!(board.total(), 1);
        assert_eq!(board.column_of("L9"), None);
    }

    #[test]
    fn test_resolve_column_then_card() {
        let board = board();
        assert_eq!(
            board.resolve_destination(&BoardTarget::Column("negociacao".into())),
            Some(LeadStatus::Negotiating)
        );
        assert_eq!(board.resolve_destination(&BoardTarget::Card("L4".into())), Some(LeadStatus::Closed));
        assert_eq!(board.resolve_destination(&BoardTarget::Card("missing".into())), None);
    }

    #[test]
    fn test_drop_on_own_column_or_sibling_is_no_change() {
        let board = board();
        let l1 = card(&board, "L1");
        assert_eq!(
            board.decide_drop(&l1, Some(&BoardTarget::Column("novo".into()))),
            DropDecision::NoChange
        );
        assert_eq!(board.decide_drop(&l1, Some(&BoardTarget::Card("L2".into()))), DropDecision::NoChange);
    }

    #[test]
    fn test_drop_on_other_column_moves() {
        let board = board();
        let decision = board.decide_drop(&card(&board, "L1"), Some(&BoardTarget::Card("L3".into())));
        assert_eq!(
            decision,
            DropDecision::Move(StatusChange {
                lead_id: "L1".into(),
                from: LeadStatus::New,
                to: LeadStatus::Negotiating,
            })
        );
    }

    #[test]
    fn test_unresolved_drop_is_cancelled() {
        let board = board();
        let l1 = card(&board, "L1");
        assert_eq!(board.decide_drop(&l1, None), DropDecision::Cancelled);
        assert_eq!(
            board.decide_drop(&l1, Some(&BoardTarget::Column("sidebar".into()))),
            DropDecision::Cancelled
        );
        assert!(board.pick("ghost").is_none());
        assert_eq!(
            board.decide_drop(&DraggedCard::new("ghost", LeadStatus::New), Some(&BoardTarget::Column("fechado".into()))),
            DropDecision::Cancelled
        );
    }

    #[test]
    fn test_source_stage_is_taken_at_pick_time() {
        let before = board();
        let picked = before.pick("L1").unwrap();
        assert_eq!(picked.from, LeadStatus::New);

        // a reload lands mid-drag with L1 already in the target column
        let after = KanbanBoard::from_leads(&[lead("L1", LeadStatus::Negotiating), lead("L3", LeadStatus::Negotiating)]);
        let decision = after.decide_drop(&picked, Some(&BoardTarget::Column("negociacao".into())));
        assert_eq!(
            decision,
            DropDecision::Move(StatusChange {
                lead_id: "L1".into(),
                from: LeadStatus::New,
                to: LeadStatus::Negotiating,
            })
        );
    }
}
