//! Leptos DragDrop Utilities
//!
//! Mouse-event drag and drop for Leptos. The gesture itself lives in
//! [`DragMachine`]; this module wires it to DOM events and signals.
//!
//! The document listeners are installed once per page and fan out through
//! [`registry`]. A board's handler is removed when its reactive scope is
//! cleaned up, and it only touches signals through `try_*` accessors.

mod machine;
pub mod registry;

pub use machine::{DragMachine, DragOutcome, DragPhase, DEFAULT_THRESHOLD_PX};
pub use registry::DocumentEvent;

use std::cell::Cell;

use leptos::prelude::*;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::JsCast;

/// How long the click that follows a drop is swallowed
const CLICK_SUPPRESS_MS: i32 = 100;

/// Reactive drag state shared by every draggable and drop target of a view
pub struct DndState<I: 'static, T: 'static> {
    pub machine: RwSignal<DragMachine<I, T>>,
    /// Set briefly after a drop so click handlers can ignore the trailing click
    pub just_ended: RwSignal<bool>,
}

impl<I: 'static, T: 'static> Clone for DndState<I, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: 'static, T: 'static> Copy for DndState<I, T> {}

impl<I, T> DndState<I, T>
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            machine: RwSignal::new(DragMachine::with_threshold(threshold)),
            just_ended: RwSignal::new(false),
        }
    }

    /// Item being dragged (tracked)
    pub fn dragging(&self) -> Option<I> {
        self.machine.with(|m| m.dragging().cloned())
    }

    /// Candidate drop target (tracked)
    pub fn over(&self) -> Option<T> {
        self.machine.with(|m| m.over().cloned())
    }

    pub fn is_dragging_item(&self, item: &I) -> bool {
        self.machine.with(|m| m.dragging() == Some(item))
    }

    pub fn drag_just_ended(&self) -> bool {
        self.just_ended.get_untracked()
    }
}

impl<I, T> Default for DndState<I, T>
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn suppress_trailing_click(flag: RwSignal<bool>) {
    flag.set(true);
    if let Some(win) = web_sys::window() {
        let cb = Closure::once_into_js(move || {
            flag.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), CLICK_SUPPRESS_MS);
    }
}

fn is_form_control(ev: &web_sys::MouseEvent) -> bool {
    ev.target().is_some_and(|target| {
        target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
    })
}

/// Mousedown on a draggable: arm a pending drag at the pointer position.
/// Presses on inputs, buttons and selects inside the card are left alone.
pub fn make_on_mousedown<I, T>(dnd: DndState<I, T>, item: I) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_form_control(&ev) {
            return;
        }
        let (x, y) = (ev.client_x(), ev.client_y());
        let item = item.clone();
        dnd.machine.try_update_untracked(|m| m.press(item, x, y));
    }
}

/// Mouseenter on a drop target
pub fn make_on_mouseenter<I, T>(dnd: DndState<I, T>, target: T) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.machine.with_untracked(DragMachine::is_dragging) {
            let target = target.clone();
            dnd.machine.update(|m| m.hover(target));
        }
    }
}

/// Mouseenter on a draggable that is also a drop target; ignores the
/// dragged item itself.
pub fn make_on_item_mouseenter<I, T>(
    dnd: DndState<I, T>,
    item: I,
    target: T,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        let over_other = dnd
            .machine
            .with_untracked(|m| m.dragging().is_some_and(|dragging| *dragging != item));
        if over_other {
            let target = target.clone();
            dnd.machine.update(|m| m.hover(target));
        }
    }
}

pub fn make_on_mouseleave<I, T>(dnd: DndState<I, T>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.machine.with_untracked(|m| m.over().is_some()) {
            dnd.machine.update(DragMachine::leave);
        }
    }
}

thread_local! {
    static LISTENERS_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Listeners stay for the page lifetime; there is one set per document
fn add_document_listener<C: ?Sized + WasmClosure>(event: &str, closure: Closure<C>) {
    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn install_document_listeners() {
    if LISTENERS_INSTALLED.with(|installed| installed.replace(true)) {
        return;
    }
    add_document_listener("mousemove", Closure::<dyn FnMut(web_sys::MouseEvent)>::new(|ev: web_sys::MouseEvent| {
        registry::dispatch(&DocumentEvent::Move {
            x: ev.client_x(),
            y: ev.client_y(),
        });
    }));
    add_document_listener("mouseup", Closure::<dyn FnMut(web_sys::MouseEvent)>::new(|_ev: web_sys::MouseEvent| {
        registry::dispatch(&DocumentEvent::Release);
    }));
    add_document_listener("keydown", Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(|ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            registry::dispatch(&DocumentEvent::Escape);
        }
    }));
}

/// Route document mousemove, mouseup and Escape to this drag state.
///
/// `on_release` receives every finished gesture; the machine is already
/// idle when it runs. The handler is dropped with the calling scope.
pub fn bind_global_handlers<I, T, F>(dnd: DndState<I, T>, on_release: F)
where
    I: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(DragOutcome<I, T>) + 'static,
{
    install_document_listeners();

    let finish = move |outcome: DragOutcome<I, T>| {
        if matches!(outcome, DragOutcome::Dropped { .. } | DragOutcome::Cancelled(_)) {
            suppress_trailing_click(dnd.just_ended);
        }
        on_release(outcome);
    };

    let id = registry::register(move |event| {
        let idle = || dnd.machine.try_with_untracked(DragMachine::is_idle).unwrap_or(true);
        match *event {
            DocumentEvent::Move { x, y } => {
                let started = dnd.machine.try_update_untracked(|m| m.move_to(x, y)).unwrap_or(false);
                if started {
                    dnd.machine.notify();
                }
            }
            DocumentEvent::Release => {
                if idle() {
                    return;
                }
                if let Some(outcome) = dnd.machine.try_update(DragMachine::release) {
                    finish(outcome);
                }
            }
            DocumentEvent::Escape => {
                if idle() {
                    return;
                }
                if let Some(outcome) = dnd.machine.try_update(DragMachine::cancel) {
                    finish(outcome);
                }
            }
        }
    });
    on_cleanup(move || registry::unregister(id));
}
