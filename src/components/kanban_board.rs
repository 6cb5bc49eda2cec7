//! Kanban Board Component
//!
//! Pipeline board with one column per stage. Columns are rebuilt from the
//! filtered lead list on every change; a drop between columns moves the card
//! in the store right away, persists the new status once and then reloads.
//! Clicking a card opens the lead profile.

use crm_core::domain::LeadUpdate;
use crm_core::filter::LeadFilter;
use crm_core::kanban::{commit_status_change, BoardColumn, BoardTarget, DraggedCard, DropDecision, KanbanBoard as Board};
use crm_core::labels::CodeLabel;
use crm_core::price::format_brl_compact;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_handlers, make_on_mouseenter, make_on_mouseleave, DndState, DragOutcome};

use crate::app::Page;
use crate::components::{BoardFilters, LeadCard, LeadForm};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = DndState::<DraggedCard, BoardTarget>::new();
    let filter = RwSignal::new(LeadFilter::default());
    let creating = RwSignal::new(false);

    let board = Memo::new(move |_| {
        let filter = filter.get();
        store.leads().with(|leads| Board::from_leads(filter.apply(leads)))
    });

    let nav = ctx.clone();
    bind_global_handlers(dnd, move |outcome| {
        let decision = match outcome {
            DragOutcome::Dropped { item, target } => board.with_untracked(|b| b.decide_drop(&item, Some(&target))),
            DragOutcome::Cancelled(item) => board.with_untracked(|b| b.decide_drop(&item, None)),
            DragOutcome::Click(_) | DragOutcome::Idle => return,
        };
        let DropDecision::Move(change) = decision else {
            return;
        };

        // Optimistic move; the reload below settles the real state
        let update = LeadUpdate::status(change.to);
        store
            .leads()
            .write()
            .iter_mut()
            .filter(|lead| lead.id == change.lead_id)
            .for_each(|lead| lead.apply(&update));

        let ctx = ctx.clone();
        spawn_local(async move {
            let backend = ctx.backend();
            // failure is already logged; no rollback or retry
            let _ = commit_status_change(backend.as_ref(), &change).await;
            ctx.reload();
        });
    });

    let on_open = Callback::new(move |lead_id: String| nav.navigate(Page::LeadProfile(lead_id)));

    view! {
        <div class="pipeline-page">
            <div class="pipeline-toolbar">
                <BoardFilters filter=filter />
                <button class="primary-btn" on:click=move |_| creating.set(true)>"Novo Lead"</button>
            </div>
            <p class="pipeline-summary">
                {move || format!("{} leads no funil", board.with(Board::total))}
            </p>
            <div class="kanban-board">
                {move || board.with(|b| {
                    b.columns()
                        .iter()
                        .map(|column| view! { <PipelineColumn column=column.clone() dnd=dnd on_open=on_open /> })
                        .collect_view()
                })}
            </div>
            <Show when=move || creating.get()>
                <LeadForm lead=None on_close=move |_| creating.set(false) />
            </Show>
        </div>
    }
}

#[component]
fn PipelineColumn(
    column: BoardColumn,
    dnd: DndState<DraggedCard, BoardTarget>,
    on_open: Callback<String>,
) -> impl IntoView {
    let BoardColumn { status, leads } = column;
    let target = BoardTarget::Column(status.code().to_string());
    let on_mouseenter = make_on_mouseenter(dnd, target.clone());
    let on_mouseleave = make_on_mouseleave(dnd);
    let is_target = move || dnd.over().is_some_and(|over| over == target);

    let total: f64 = leads.iter().filter_map(|lead| lead.budget).sum();
    let count = leads.len();

    view! {
        <section
            class=move || if is_target() { "kanban-column drop-target" } else { "kanban-column" }
            data-column-id=status.code()
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <header class="kanban-column-header" style=format!("border-top-color: {}", status.board_color())>
                <span class="column-title">{status.label()}</span>
                <span class="column-count">{count}</span>
            </header>
            <div class="column-total">{format_brl_compact(total)}</div>
            <div class="kanban-cards">
                {leads.into_iter().map(|lead| view! {
                    <LeadCard lead=lead stage=status dnd=dnd on_open=on_open />
                }).collect_view()}
                {(count == 0).then(|| view! {
                    <p class="column-empty">{format!("Nenhum lead em {}", status.label())}</p>
                })}
            </div>
        </section>
    }
}
