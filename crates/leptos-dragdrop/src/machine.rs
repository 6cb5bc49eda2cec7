//! Drag Gesture State Machine
//!
//! Pure pointer bookkeeping, no DOM access. A press arms a pending drag;
//! the drag only starts once the pointer has moved further than the
//! threshold from the press point, so a press and release in place is a
//! click. One gesture at a time: a press is ignored unless idle.

/// Straight-line distance in CSS pixels the pointer must exceed to start a drag
pub const DEFAULT_THRESHOLD_PX: f64 = 8.0;

/// Where the gesture currently is
#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase<I, T> {
    Idle,
    /// Pressed, not yet moved past the threshold
    Pending { item: I, origin: (i32, i32) },
    /// Picked up; `over` is the candidate drop target, if any
    Dragging { item: I, over: Option<T> },
}

/// How a gesture ended
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome<I, T> {
    /// Nothing was pressed
    Idle,
    /// Released without passing the threshold
    Click(I),
    /// Released outside any target, or aborted
    Cancelled(I),
    Dropped { item: I, target: T },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragMachine<I, T> {
    phase: DragPhase<I, T>,
    threshold: f64,
}

impl<I, T> Default for DragMachine<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T> DragMachine<I, T> {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            threshold,
        }
    }

    pub fn phase(&self) -> &DragPhase<I, T> {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Item being dragged (not merely pressed)
    pub fn dragging(&self) -> Option<&I> {
        match &self.phase {
            DragPhase::Dragging { item, .. } => Some(item),
            _ => None,
        }
    }

    /// Current candidate drop target
    pub fn over(&self) -> Option<&T> {
        match &self.phase {
            DragPhase::Dragging { over, .. } => over.as_ref(),
            _ => None,
        }
    }

    /// Arm a drag on `item`. Returns false if a gesture is already active.
    pub fn press(&mut self, item: I, x: i32, y: i32) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = DragPhase::Pending { item, origin: (x, y) };
        true
    }

    /// Track pointer movement. Returns true when this move starts the drag.
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        let DragPhase::Pending { origin, .. } = &self.phase else {
            return false;
        };
        let dx = f64::from(x - origin.0);
        let dy = f64::from(y - origin.1);
        if dx.hypot(dy) <= self.threshold {
            return false;
        }
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        if let DragPhase::Pending { item, .. } = phase {
            self.phase = DragPhase::Dragging { item, over: None };
        }
        true
    }

    /// Pointer entered a target; ignored unless dragging
    pub fn hover(&mut self, target: T) {
        if let DragPhase::Dragging { over, .. } = &mut self.phase {
            *over = Some(target);
        }
    }

    /// Pointer left the current target
    pub fn leave(&mut self) {
        if let DragPhase::Dragging { over, .. } = &mut self.phase {
            *over = None;
        }
    }

    /// Finish the gesture; the machine is idle afterwards
    pub fn release(&mut self) -> DragOutcome<I, T> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Idle => DragOutcome::Idle,
            DragPhase::Pending { item, .. } => DragOutcome::Click(item),
            DragPhase::Dragging { item, over: Some(target) } => DragOutcome::Dropped { item, target },
            DragPhase::Dragging { item, over: None } => DragOutcome::Cancelled(item),
        }
    }

    /// Abort whatever is in progress
    pub fn cancel(&mut self) -> DragOutcome<I, T> {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging { item, .. } => DragOutcome::Cancelled(item),
            _ => DragOutcome::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Machine = DragMachine<&'static str, &'static str>;

    #[test]
    fn test_release_in_place_is_click() {
        let mut m = Machine::new();
        assert!(m.press("L1", 100, 100));
        assert!(!m.move_to(104, 104));
        assert!(!m.is_dragging());
        assert_eq!(m.release(), DragOutcome::Click("L1"));
        assert!(m.is_idle());
    }

    #[test]
    fn test_threshold_is_euclidean_and_strict() {
        let mut m = Machine::new();
        m.press("L1", 0, 0);
        // 6,6 is 8.49 px away although neither axis passes 8
        assert!(m.move_to(6, 6));
        assert_eq!(m.dragging(), Some(&"L1"));

        let mut m = Machine::new();
        m.press("L1", 0, 0);
        assert!(!m.move_to(8, 0));
        assert!(m.move_to(9, 0));
    }

    #[test]
    fn test_drop_on_hovered_target() {
        let mut m = Machine::new();
        m.press("L1", 0, 0);
        m.move_to(20, 0);
        assert!(!m.move_to(40, 0));
        m.hover("negociacao");
        assert_eq!(m.over(), Some(&"negociacao"));
        assert_eq!(
            m.release(),
            DragOutcome::Dropped {
                item: "L1",
                target: "negociacao"
            }
        );
        assert!(m.is_idle());
    }

    #[test]
    fn test_release_after_leave_is_cancelled() {
        let mut m = Machine::new();
        m.press("L1", 0, 0);
        m.move_to(0, 30);
        m.hover("contato");
        m.leave();
        assert_eq!(m.release(), DragOutcome::Cancelled("L1"));
    }

    #[test]
    fn test_hover_ignored_unless_dragging() {
        let mut m = Machine::new();
        m.hover("novo");
        m.press("L1", 0, 0);
        m.hover("novo");
        assert_eq!(m.over(), None);
        assert_eq!(m.release(), DragOutcome::Click("L1"));
    }

    #[test]
    fn test_one_gesture_at_a_time() {
        let mut m = Machine::new();
        assert!(m.press("L1", 0, 0));
        m.move_to(50, 50);
        assert!(!m.press("L2", 10, 10));
        assert_eq!(m.dragging(), Some(&"L1"));
    }

    #[test]
    fn test_cancel() {
        let mut m = Machine::new();
        assert_eq!(m.cancel(), DragOutcome::Idle);
        m.press("L1", 0, 0);
        m.move_to(50, 0);
        m.hover("fechado");
        assert_eq!(m.cancel(), DragOutcome::Cancelled("L1"));
        assert_eq!(m.release(), DragOutcome::Idle);
    }
}
