//! Pane events and per-kind handler lists.
//!
//! Handlers are kept sorted by ascending priority when they are added, so a
//! dispatch only walks a ready-made list. Ties keep registration order.

use std::rc::Rc;

use super::paint::Painter;
use crate::reactive::Owner;
use crate::types::{EventStatus, Modifiers, MouseButtons, Point};

/// Dispatch priorities. Lower runs first.
pub mod priority {
    /// Background fills of the pane itself.
    pub const BACKGROUND: i32 = 1;
    /// Logic of the view attached to the pane.
    pub const VIEW: i32 = 2;
}

// =============================================================================
// Event types
// =============================================================================

/// Press or release of a single button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub x: f32,
    pub y: f32,
    pub button: MouseButtons,
    pub modifiers: Modifiers,
}

/// Pointer motion with one or more buttons held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

/// Wheel or trackpad scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub x: f32,
    pub y: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

/// Pointer input delivered through the pane tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(ButtonEvent),
    Release(ButtonEvent),
    Drag(DragEvent),
    Scroll(ScrollEvent),
}

impl PointerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PointerEvent::Press(_) => EventKind::Press,
            PointerEvent::Release(_) => EventKind::Release,
            PointerEvent::Drag(_) => EventKind::Drag,
            PointerEvent::Scroll(_) => EventKind::Scroll,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Press(e) | PointerEvent::Release(e) => Point::new(e.x, e.y),
            PointerEvent::Drag(e) => Point::new(e.x, e.y),
            PointerEvent::Scroll(e) => Point::new(e.x, e.y),
        }
    }
}

/// Everything a pane can dispatch.
pub enum PaneEvent<'a> {
    /// Paint pass; handlers draw through the painter.
    Draw(&'a mut dyn Painter),
    Pointer(PointerEvent),
}

impl PaneEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            PaneEvent::Draw(_) => EventKind::Draw,
            PaneEvent::Pointer(p) => p.kind(),
        }
    }

    /// Reborrow this event for delivery to another pane.
    pub fn forward(&mut self) -> PaneEvent<'_> {
        match self {
            PaneEvent::Draw(painter) => PaneEvent::Draw(&mut **painter),
            PaneEvent::Pointer(p) => PaneEvent::Pointer(*p),
        }
    }
}

/// Event kinds, one handler list each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Draw,
    Press,
    Release,
    Drag,
    Scroll,
}

impl EventKind {
    pub const POINTER: [EventKind; 4] = [
        EventKind::Press,
        EventKind::Release,
        EventKind::Drag,
        EventKind::Scroll,
    ];

    const fn index(self) -> usize {
        match self {
            EventKind::Draw => 0,
            EventKind::Press => 1,
            EventKind::Release => 2,
            EventKind::Drag => 3,
            EventKind::Scroll => 4,
        }
    }
}

// =============================================================================
// Handler lists
// =============================================================================

/// Event handler. Return `Handled` to stop propagation.
pub type Handler = Rc<dyn Fn(&mut PaneEvent<'_>) -> EventStatus>;

struct Entry {
    priority: i32,
    owner: Owner,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct Handlers {
    lists: [Vec<Entry>; 5],
}

impl Handlers {
    pub(crate) fn insert(&mut self, kind: EventKind, priority: i32, owner: Owner, handler: Handler) {
        let list = &mut self.lists[kind.index()];
        let at = list.partition_point(|e| e.priority <= priority);
        list.insert(
            at,
            Entry {
                priority,
                owner,
                handler,
            },
        );
    }

    pub(crate) fn remove_owner(&mut self, owner: Owner) {
        for list in &mut self.lists {
            list.retain(|e| e.owner != owner);
        }
    }

    /// Handlers of one kind in dispatch order.
    pub(crate) fn snapshot(&self, kind: EventKind) -> Vec<Handler> {
        self.lists[kind.index()]
            .iter()
            .map(|e| Rc::clone(&e.handler))
            .collect()
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.lists[kind.index()].len()
    }
}
