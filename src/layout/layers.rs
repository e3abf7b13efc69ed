//! Layers - children stacked on top of each other over the same area.
//!
//! Paint order is list order, so the last child is on top. Pointer events go
//! front to back: the topmost visible child containing the point gets the
//! event first, and the next one down only sees it if it was not handled.

use tracing::trace;

use super::{Children, Layout};
use crate::pane::PointerEvent;
use crate::types::{EventStatus, MouseButtons, Point, Rect};
use crate::view::{Defaults, View, ViewConfig, ViewKind};

pub(crate) struct Layers {
    children: Children,
}

impl Layers {
    fn new(views: Vec<View>) -> Self {
        Self {
            children: Children::new(views),
        }
    }

    /// Visible children containing `point`, topmost first.
    fn hits(&self, point: Point) -> Vec<usize> {
        let panes = self.children.panes();
        self.children
            .visible()
            .rev()
            .map(|(i, _)| i)
            .filter(|&i| panes.get(i).is_some_and(|p| p.contains(point.x, point.y)))
            .collect()
    }
}

impl Layout for Layers {
    fn children(&self) -> &Children {
        &self.children
    }

    fn content_size(&self) -> (f32, f32) {
        self.children
            .visible()
            .fold((0.0_f32, 0.0_f32), |(w, h), (_, v)| {
                (w.max(v.derived_width()), h.max(v.derived_height()))
            })
    }

    fn partition(&self, area: Rect) {
        trace!(%area, "partition");
        for pane in self.children.panes() {
            pane.set_alloc_box(area);
        }
    }

    fn hover_target(&self, point: Point) -> Option<usize> {
        self.hits(point).first().copied()
    }

    fn route(&self, event: &PointerEvent) -> EventStatus {
        let mut routing = self.children.routing();
        match event {
            PointerEvent::Drag(_) => {
                if let Some(index) = routing.dragging {
                    return self.children.dispatch(index, event);
                }
            }
            PointerEvent::Release(e) => {
                if routing.drag_buttons.intersects(e.button) {
                    routing.dragging = None;
                    routing.drag_buttons = MouseButtons::empty();
                    self.children.set_routing(routing);
                }
            }
            PointerEvent::Press(_) | PointerEvent::Scroll(_) => {}
        }

        for index in self.hits(event.position()) {
            if self.children.dispatch(index, event).is_handled() {
                if let PointerEvent::Press(e) = event {
                    let mut routing = self.children.routing();
                    routing.dragging = Some(index);
                    routing.drag_buttons = e.button;
                    self.children.set_routing(routing);
                }
                return EventStatus::Handled;
            }
        }
        EventStatus::Unhandled
    }
}

impl View {
    /// Children sharing one area, the last one on top.
    pub fn layers(children: Vec<View>) -> Self {
        Self::layers_with(ViewConfig::new(), children)
    }

    pub fn layers_with(config: ViewConfig, children: Vec<View>) -> Self {
        let kind = ViewKind::Layers(Layers::new(children));
        Self::build("LayersLayout", kind, config, Defaults::FILL)
    }
}
