//! Layout Module - container views and the root adapter.
//!
//! A layout is a view that owns a fixed list of child views. On attach it
//! creates one pane per child, partitions its own active box among them and
//! routes draw and pointer events from its pane down to theirs.
//!
//! # Variants
//!
//! - stack - contiguous slots along one axis ([`View::hstack`], [`View::vstack`])
//! - layers - every child gets the whole area, last child on top
//!   ([`View::layers`])
//!
//! # Reactivity
//!
//! Each child's derived size, flex and visibility are observed by the parent.
//! Any change recomputes the parent's content size (which feeds its own
//! derived size and so propagates up the tree) and re-runs the partition.

mod layers;
mod root;
mod stack;

pub(crate) use layers::Layers;
pub use root::Root;
pub(crate) use stack::Stack;

use std::cell::{Cell, RefCell};

use tracing::trace;

use crate::pane::{priority, EventKind, Painter, Pane, PaneEvent, PointerEvent};
use crate::types::{EventStatus, MouseButtons, Point, Rect};
use crate::view::View;

// =============================================================================
// Layout interface
// =============================================================================

/// Per-variant behavior of a container view.
pub(crate) trait Layout {
    fn children(&self) -> &Children;

    /// Content size from the visible children's derived sizes.
    fn content_size(&self) -> (f32, f32);

    /// Assign allocated boxes to the child panes within `area`.
    fn partition(&self, area: Rect);

    /// Pick the child pane that should see the pointer at `point`.
    fn hover_target(&self, point: Point) -> Option<usize>;

    /// Deliver a pointer event to the children.
    fn route(&self, event: &PointerEvent) -> EventStatus;
}

/// Wire a freshly built layout view to its children.
pub(crate) fn wire(view: &View, layout: &dyn Layout) {
    let owner = view.owner();
    for child in layout.children().views() {
        child
            .derived_width_slot()
            .observe_owned(owner, view.listener(View::children_changed));
        child
            .derived_height_slot()
            .observe_owned(owner, view.listener(View::children_changed));
        child
            .flex_width_slot()
            .observe_owned(owner, view.listener(View::relayout));
        child
            .flex_height_slot()
            .observe_owned(owner, view.listener(View::relayout));
        child
            .hidden_slot()
            .observe_owned(owner, view.listener(View::children_changed));
    }
}

/// Create child panes on `pane`, hook up event routing and run the first
/// partition.
pub(crate) fn attach(view: &View, layout: &dyn Layout, pane: &Pane) {
    let owner = view.owner();
    layout.children().attach(pane.active_box());

    pane.active_box_slot()
        .observe_owned(owner, view.listener(View::relayout));

    let weak = view.downgrade();
    pane.pointer_slot()
        .observe_owned(owner, move |point: &Option<Point>| {
            if let Some(view) = View::upgrade(&weak) {
                if let Some(layout) = view.layout() {
                    hover(layout, *point);
                }
            }
        });

    let weak = view.downgrade();
    pane.subscribe(EventKind::Draw, priority::VIEW, owner, move |event| {
        if let (PaneEvent::Draw(painter), Some(view)) = (event, View::upgrade(&weak)) {
            if let Some(layout) = view.layout() {
                layout.children().draw(&mut **painter);
            }
        }
        EventStatus::Unhandled
    });

    for kind in EventKind::POINTER {
        let weak = view.downgrade();
        pane.subscribe(kind, priority::VIEW, owner, move |event| {
            let PaneEvent::Pointer(pointer) = event else {
                return EventStatus::Unhandled;
            };
            View::upgrade(&weak)
                .and_then(|view| view.layout().map(|layout| layout.route(pointer)))
                .unwrap_or_default()
        });
    }

    view.relayout();
}

fn hover(layout: &dyn Layout, point: Option<Point>) {
    let children = layout.children();
    let target = point.and_then(|p| layout.hover_target(p));
    children.set_mouseover(target, point);
}

// =============================================================================
// Children
// =============================================================================

/// Pointer routing state of a layout, as indices into its child list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Routing {
    pub(crate) mouseover: Option<usize>,
    pub(crate) dragging: Option<usize>,
    pub(crate) drag_buttons: MouseButtons,
}

/// Child views of a layout and the panes it created for them.
pub(crate) struct Children {
    views: Vec<View>,
    panes: RefCell<Vec<Pane>>,
    routing: Cell<Routing>,
}

impl Children {
    pub(crate) fn new(views: Vec<View>) -> Self {
        Self {
            views,
            panes: RefCell::new(Vec::new()),
            routing: Cell::new(Routing::default()),
        }
    }

    pub(crate) fn views(&self) -> &[View] {
        &self.views
    }

    /// Snapshot of the child panes. Empty while detached.
    pub(crate) fn panes(&self) -> Vec<Pane> {
        self.panes.borrow().clone()
    }

    pub(crate) fn routing(&self) -> Routing {
        self.routing.get()
    }

    pub(crate) fn set_routing(&self, routing: Routing) {
        self.routing.set(routing);
    }

    /// Visible children in list order, with their index.
    pub(crate) fn visible(&self) -> impl DoubleEndedIterator<Item = (usize, &View)> + '_ {
        self.views.iter().enumerate().filter(|(_, v)| !v.hidden())
    }

    pub(crate) fn is_visible(&self, index: usize) -> bool {
        self.views.get(index).is_some_and(|v| !v.hidden())
    }

    fn attach(&self, area: Rect) {
        let panes: Vec<Pane> = self.views.iter().map(|_| Pane::new(area)).collect();
        *self.panes.borrow_mut() = panes.clone();
        self.routing.set(Routing::default());
        for (view, pane) in self.views.iter().zip(&panes) {
            view.attach(pane);
        }
    }

    /// Detach every child and drop their panes.
    pub(crate) fn detach(&self) {
        for view in &self.views {
            view.detach();
        }
        self.panes.borrow_mut().clear();
        self.routing.set(Routing::default());
    }

    fn draw(&self, painter: &mut dyn Painter) {
        for (i, pane) in self.panes().iter().enumerate() {
            if self.is_visible(i) {
                pane.draw(painter);
            }
        }
    }

    /// Hand the pointer to `target`, taking it away from the previous child.
    fn set_mouseover(&self, target: Option<usize>, point: Option<Point>) {
        let panes = self.panes();
        let mut routing = self.routing.get();
        if let Some(prev) = routing.mouseover {
            if Some(prev) != target {
                if let Some(pane) = panes.get(prev) {
                    pane.set_pointer(None);
                }
            }
        }
        routing.mouseover = target;
        self.routing.set(routing);
        if let Some(pane) = target.and_then(|i| panes.get(i)) {
            pane.set_pointer(point);
        }
    }

    /// Drop hover and drag targets that point at hidden children.
    pub(crate) fn forget_hidden(&self) {
        let mut routing = self.routing.get();
        if let Some(i) = routing.mouseover.filter(|&i| !self.is_visible(i)) {
            if let Some(pane) = self.panes().get(i) {
                pane.set_pointer(None);
            }
            routing.mouseover = None;
        }
        if routing.dragging.is_some_and(|i| !self.is_visible(i)) {
            routing.dragging = None;
            routing.drag_buttons = MouseButtons::empty();
        }
        self.routing.set(routing);
    }

    /// Deliver `event` to child `index`.
    pub(crate) fn dispatch(&self, index: usize, event: &PointerEvent) -> EventStatus {
        let Some(pane) = self.panes.borrow().get(index).cloned() else {
            return EventStatus::Unhandled;
        };
        trace!(child = index, kind = ?event.kind(), "route");
        pane.dispatch(&mut PaneEvent::Pointer(*event))
    }
}
