//! Pane - a rectangular area owned by one view.
//!
//! A pane has two nested boxes. The allocated box is the space the parent
//! layout granted; the active box is the part the attached view actually uses
//! (it starts out equal to the allocated box and is kept inside it by the
//! view). Pointer hit-testing and the active background fill use the active
//! box.
//!
//! # API
//!
//! - `alloc_box` / `active_box` / `pointer` - reactive state, each a [`Slot`]
//! - `contains(x, y)` - half-open hit test on the active box
//! - `subscribe(kind, priority, owner, f)` - add an event handler
//! - `dispatch(event)` - deliver an event in priority order
//! - `swap_background(slot)` - rebind the active fill color to another slot

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::event::{priority, EventKind, Handlers, PaneEvent};
use super::paint::{Fill, Fills, Painter};
use crate::reactive::{Owner, Slot};
use crate::types::{EventStatus, Point, Rect, Rgba};

struct PaneInner {
    owner: Owner,
    alloc_box: Slot<Rect>,
    active_box: Slot<Rect>,
    pointer: Slot<Option<Point>>,
    alloc_background: RefCell<Slot<Option<Rgba>>>,
    background: RefCell<Slot<Option<Rgba>>>,
    fills: Cell<Fills>,
    handlers: RefCell<Handlers>,
}

impl PaneInner {
    fn refresh_fills(&self) {
        let alloc_color = self.alloc_background.borrow().get();
        let color = self.background.borrow().get();
        self.fills.set(Fills {
            alloc: alloc_color.map(|color| Fill {
                rect: self.alloc_box.get(),
                color,
            }),
            active: color.map(|color| Fill {
                rect: self.active_box.get(),
                color,
            }),
        });
    }

    fn paint_background(&self, painter: &mut dyn Painter) {
        let fills = self.fills.get();
        for fill in [fills.alloc, fills.active].into_iter().flatten() {
            painter.fill_rect(fill.rect, fill.color);
        }
    }
}

/// Handle to a pane. Cloning yields another handle to the same pane.
#[derive(Clone)]
pub struct Pane {
    inner: Rc<PaneInner>,
}

impl Pane {
    /// Create a pane whose allocated and active boxes are both `rect`.
    pub fn new(rect: Rect) -> Self {
        Self::with_background(rect, None)
    }

    pub fn with_background(rect: Rect, background: Option<Rgba>) -> Self {
        let pane = Self {
            inner: Rc::new(PaneInner {
                owner: Owner::new(),
                alloc_box: Slot::new(rect),
                active_box: Slot::new(rect),
                pointer: Slot::new(None),
                alloc_background: RefCell::new(Slot::new(None)),
                background: RefCell::new(Slot::new(background)),
                fills: Cell::new(Fills::default()),
                handlers: RefCell::new(Handlers::default()),
            }),
        };

        let owner = pane.inner.owner;
        pane.inner.active_box.observe_owned(owner, pane.fill_refresher());
        pane.inner.alloc_box.observe_owned(owner, pane.fill_refresher());
        pane.inner
            .background
            .borrow()
            .observe_owned(owner, pane.fill_refresher());
        pane.inner
            .alloc_background
            .borrow()
            .observe_owned(owner, pane.fill_refresher());

        let weak = Rc::downgrade(&pane.inner);
        pane.subscribe(EventKind::Draw, priority::BACKGROUND, owner, move |event| {
            if let (PaneEvent::Draw(painter), Some(inner)) = (event, weak.upgrade()) {
                inner.paint_background(&mut **painter);
            }
            EventStatus::Unhandled
        });

        pane.inner.refresh_fills();
        pane
    }

    fn fill_refresher<T: 'static>(&self) -> impl Fn(&T) + 'static {
        let weak: Weak<PaneInner> = Rc::downgrade(&self.inner);
        move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.refresh_fills();
            }
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn alloc_box(&self) -> Rect {
        self.inner.alloc_box.get()
    }

    pub fn set_alloc_box(&self, rect: Rect) {
        self.inner.alloc_box.set(rect);
    }

    pub fn alloc_box_slot(&self) -> &Slot<Rect> {
        &self.inner.alloc_box
    }

    pub fn active_box(&self) -> Rect {
        self.inner.active_box.get()
    }

    pub fn set_active_box(&self, rect: Rect) {
        self.inner.active_box.set(rect);
    }

    pub fn active_box_slot(&self) -> &Slot<Rect> {
        &self.inner.active_box
    }

    /// Width of the active box.
    pub fn width(&self) -> f32 {
        self.active_box().width()
    }

    /// Height of the active box.
    pub fn height(&self) -> f32 {
        self.active_box().height()
    }

    /// Half-open hit test against the active box.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.inner.active_box.with(|rect| rect.contains(x, y))
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Pointer position while it is over this pane, `None` otherwise.
    pub fn pointer(&self) -> Option<Point> {
        self.inner.pointer.get()
    }

    pub fn set_pointer(&self, pointer: Option<Point>) {
        self.inner.pointer.set(pointer);
    }

    pub fn pointer_slot(&self) -> &Slot<Option<Point>> {
        &self.inner.pointer
    }

    // =========================================================================
    // Background
    // =========================================================================

    /// Color filling the active box.
    pub fn background(&self) -> Option<Rgba> {
        self.inner.background.borrow().get()
    }

    /// Write through to whichever slot currently backs the active fill.
    pub fn set_background(&self, color: Option<Rgba>) {
        let slot = self.inner.background.borrow().clone();
        slot.set(color);
    }

    pub fn background_slot(&self) -> Slot<Option<Rgba>> {
        self.inner.background.borrow().clone()
    }

    /// Rebind the active fill color to `slot`, dropping the old binding.
    pub fn swap_background(&self, slot: Slot<Option<Rgba>>) {
        self.swap(&self.inner.background, slot);
    }

    /// Color filling the allocated box.
    pub fn alloc_background(&self) -> Option<Rgba> {
        self.inner.alloc_background.borrow().get()
    }

    pub fn set_alloc_background(&self, color: Option<Rgba>) {
        let slot = self.inner.alloc_background.borrow().clone();
        slot.set(color);
    }

    /// Rebind the allocated-box fill color to `slot`.
    pub fn swap_alloc_background(&self, slot: Slot<Option<Rgba>>) {
        self.swap(&self.inner.alloc_background, slot);
    }

    fn swap(&self, cell: &RefCell<Slot<Option<Rgba>>>, slot: Slot<Option<Rgba>>) {
        let owner = self.inner.owner;
        cell.borrow().remove_owner(owner);
        slot.observe_owned(owner, self.fill_refresher());
        *cell.borrow_mut() = slot;
        self.inner.refresh_fills();
    }

    /// Current fill shapes for the allocated and active boxes.
    pub fn fills(&self) -> Fills {
        self.inner.fills.get()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Add a handler for one event kind. Lower priorities run first; equal
    /// priorities run in registration order.
    pub fn subscribe<F>(&self, kind: EventKind, priority: i32, owner: Owner, handler: F)
    where
        F: Fn(&mut PaneEvent<'_>) -> EventStatus + 'static,
    {
        self.inner
            .handlers
            .borrow_mut()
            .insert(kind, priority, owner, Rc::new(handler));
    }

    /// Remove every handler registered by `owner`.
    pub fn unsubscribe(&self, owner: Owner) {
        self.inner.handlers.borrow_mut().remove_owner(owner);
    }

    /// Remove every slot listener registered by `owner` on this pane.
    pub fn remove_observer(&self, owner: Owner) {
        self.inner.alloc_box.remove_owner(owner);
        self.inner.active_box.remove_owner(owner);
        self.inner.pointer.remove_owner(owner);
        self.inner.background.borrow().remove_owner(owner);
        self.inner.alloc_background.borrow().remove_owner(owner);
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.inner.handlers.borrow().count(kind)
    }

    /// Deliver `event` to the handlers of its kind, in priority order.
    ///
    /// Stops at the first handler that returns `Handled` and reports it.
    pub fn dispatch(&self, event: &mut PaneEvent<'_>) -> EventStatus {
        let handlers = self.inner.handlers.borrow().snapshot(event.kind());
        for handler in handlers {
            if handler(event).is_handled() {
                return EventStatus::Handled;
            }
        }
        EventStatus::Unhandled
    }

    /// Run a paint pass on this pane.
    pub fn draw(&self, painter: &mut dyn Painter) -> EventStatus {
        self.dispatch(&mut PaneEvent::Draw(painter))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.alloc_box();
        let c = self.active_box();
        write!(
            f,
            "Pane({}, {}, {}, {} | {}, {}, {}, {})",
            a.x0, a.y0, a.x1, a.y1, c.x0, c.y0, c.x1, c.y1
        )
    }
}

impl fmt::Debug for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
