//! Lead Card Component
//!
//! A draggable card on the Kanban board. Cards are also drop targets: a
//! card dropped onto another card lands in that card's column. The press
//! records the column the card is rendered in as the move's source.

use chrono::Utc;
use crm_core::domain::{next_event_for, Lead, LeadStatus};
use crm_core::kanban::{BoardTarget, DraggedCard};
use crm_core::price::format_brl;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_item_mouseenter, make_on_mousedown, DndState};

use crate::store::{broker_name, use_app_store, AppStateStoreFields};

#[component]
pub fn LeadCard(
    lead: Lead,
    /// Column the card is rendered in
    stage: LeadStatus,
    dnd: DndState<DraggedCard, BoardTarget>,
    #[prop(into)] on_open: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();
    let id = lead.id.clone();

    let card = DraggedCard::new(id.clone(), stage);
    let on_mousedown = make_on_mousedown(dnd, card.clone());
    let on_mouseenter = make_on_item_mouseenter(dnd, card.clone(), BoardTarget::Card(id.clone()));

    let is_dragging = move || dnd.is_dragging_item(&card);
    let hover_id = id.clone();
    let is_target = move || dnd.over().is_some_and(|t| t == BoardTarget::Card(hover_id.clone()));

    let broker = broker_name(&store, lead.assigned_broker_id.as_deref());
    let event_lead = id.clone();
    let next_event = move || {
        store.events().with(|events| {
            next_event_for(events, &event_lead, Utc::now())
                .map(|e| format!("{} · {}", e.title, e.start_time.format("%d/%m %H:%M")))
        })
    };

    let open_id = id.clone();
    let on_click = move |_| {
        if !dnd.drag_just_ended() {
            on_open.run(open_id.clone());
        }
    };

    view! {
        <div
            class=move || {
                let mut class = String::from("lead-card");
                if is_dragging() { class.push_str(" dragging"); }
                if is_target() { class.push_str(" drop-target"); }
                class
            }
            data-lead-id=id
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:click=on_click
        >
            <div class="lead-card-header">
                <span class="lead-name">{lead.name.clone()}</span>
                <span class="lead-origin">{lead.origin.label().to_string()}</span>
            </div>
            <div class="lead-contact">
                <span>{lead.phone.clone()}</span>
                {lead.email.clone().map(|email| view! { <span class="lead-email">{email}</span> })}
            </div>
            {lead.budget.map(|budget| view! {
                <div class="lead-budget">{format_brl(Some(budget))}</div>
            })}
            {(!lead.tags.is_empty()).then(|| view! {
                <div class="lead-tags">
                    {lead.tags.iter().map(|tag| view! { <span class="tag">{tag.clone()}</span> }).collect_view()}
                </div>
            })}
            {broker.map(|name| view! { <div class="lead-broker">{name}</div> })}
            {move || next_event().map(|text| view! { <div class="lead-next-event">{text}</div> })}
        </div>
    }
}
