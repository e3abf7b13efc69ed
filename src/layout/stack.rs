//! Stack - children laid out in contiguous slots along one axis.
//!
//! Horizontal stacks fill left to right, vertical stacks top to bottom.
//!
//! # Partition
//!
//! Extra space (span minus content) is shared equally between the visible
//! children that flex on the stacking axis. When there is no extra space, or
//! for non-flex children, each child gets exactly its derived size, clipped
//! at the far edge of the span. Earlier children are never shrunk to make
//! room for later ones.

use tracing::trace;

use super::{Children, Layout};
use crate::pane::PointerEvent;
use crate::types::{Axis, EventStatus, MouseButtons, Point, Rect};
use crate::view::{Defaults, View, ViewConfig, ViewKind};

pub(crate) struct Stack {
    axis: Axis,
    children: Children,
}

impl Stack {
    fn new(axis: Axis, views: Vec<View>) -> Self {
        Self {
            axis,
            children: Children::new(views),
        }
    }

    fn along(&self, view: &View) -> (f32, bool) {
        match self.axis {
            Axis::Horizontal => (view.derived_width(), view.flex_width()),
            Axis::Vertical => (view.derived_height(), view.flex_height()),
        }
    }

    /// Child under `point`: the current mouseover child while the point stays
    /// inside it, otherwise the first visible child containing it.
    fn child_at(&self, point: Point) -> Option<usize> {
        let panes = self.children.panes();
        let hit = |i: usize| {
            self.children.is_visible(i)
                && panes.get(i).is_some_and(|p| p.contains(point.x, point.y))
        };
        if let Some(i) = self.children.routing().mouseover {
            if hit(i) {
                return Some(i);
            }
        }
        (0..panes.len()).find(|&i| hit(i))
    }
}

impl Layout for Stack {
    fn children(&self) -> &Children {
        &self.children
    }

    fn content_size(&self) -> (f32, f32) {
        let mut width = 0.0_f32;
        let mut height = 0.0_f32;
        for (_, view) in self.children.visible() {
            match self.axis {
                Axis::Horizontal => {
                    width += view.derived_width();
                    height = height.max(view.derived_height());
                }
                Axis::Vertical => {
                    width = width.max(view.derived_width());
                    height += view.derived_height();
                }
            }
        }
        (width, height)
    }

    fn partition(&self, area: Rect) {
        let panes = self.children.panes();
        if panes.is_empty() {
            return;
        }

        let axis = self.axis;
        let (start, end) = area.span(axis);
        let (content, flex_count) = self
            .children
            .visible()
            .map(|(_, v)| self.along(v))
            .fold((0.0_f32, 0_usize), |(sum, n), (size, flex)| {
                (sum + size, n + usize::from(flex))
            });
        let extra_total = (end - start) - content;
        let extra = extra_total / flex_count.max(1) as f32;
        trace!(?axis, %area, content, extra_total, flex_count, "partition");

        let mut cursor = match axis {
            Axis::Horizontal => start,
            Axis::Vertical => end,
        };
        for (view, pane) in self.children.views().iter().zip(&panes) {
            if view.hidden() {
                pane.set_alloc_box(area.with_span(axis, cursor, cursor));
                continue;
            }
            let (size, flex) = self.along(view);
            let grow = flex && extra_total > 0.0;
            let next = match (axis, grow) {
                (Axis::Horizontal, true) => cursor + size + extra,
                (Axis::Horizontal, false) => (cursor + size).min(end),
                (Axis::Vertical, true) => cursor - size - extra,
                (Axis::Vertical, false) => (cursor - size).max(start),
            };
            let (lo, hi) = match axis {
                Axis::Horizontal => (cursor, next),
                Axis::Vertical => (next, cursor),
            };
            pane.set_alloc_box(area.with_span(axis, lo, hi));
            cursor = next;
        }
    }

    fn hover_target(&self, point: Point) -> Option<usize> {
        self.child_at(point)
    }

    fn route(&self, event: &PointerEvent) -> EventStatus {
        let mut routing = self.children.routing();
        let under = self.child_at(event.position());
        let target = match event {
            PointerEvent::Press(e) => {
                routing.dragging = under;
                routing.drag_buttons = e.button;
                under
            }
            PointerEvent::Drag(e) => {
                if routing.dragging.is_none() {
                    routing.dragging = under;
                    routing.drag_buttons = e.buttons;
                }
                routing.dragging
            }
            PointerEvent::Release(e) => {
                if routing.drag_buttons.intersects(e.button) {
                    routing.dragging = None;
                    routing.drag_buttons = MouseButtons::empty();
                }
                under
            }
            PointerEvent::Scroll(_) => under,
        };
        self.children.set_routing(routing);
        match target {
            Some(index) => self.children.dispatch(index, event),
            None => EventStatus::Unhandled,
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl View {
    /// Children side by side, left to right.
    pub fn hstack(children: Vec<View>) -> Self {
        Self::hstack_with(ViewConfig::new(), children)
    }

    pub fn hstack_with(config: ViewConfig, children: Vec<View>) -> Self {
        let kind = ViewKind::Stack(Stack::new(Axis::Horizontal, children));
        Self::build("HorizontalLayout", kind, config, Defaults::FILL)
    }

    /// Children on top of each other, first child at the top.
    pub fn vstack(children: Vec<View>) -> Self {
        Self::vstack_with(ViewConfig::new(), children)
    }

    pub fn vstack_with(config: ViewConfig, children: Vec<View>) -> Self {
        let kind = ViewKind::Stack(Stack::new(Axis::Vertical, children));
        Self::build("VerticalLayout", kind, config, Defaults::FILL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::{ButtonEvent, DragEvent, Pane, PaneEvent};
    use crate::types::Modifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fixed(width: f32, height: f32) -> View {
        View::new(
            ViewConfig::new()
                .min_size(width, height)
                .flex_width(false)
                .flex_height(false),
        )
    }

    fn alloc(view: &View) -> Rect {
        view.pane().map(|p| p.alloc_box()).unwrap_or_default()
    }

    fn button(x: f32, y: f32, button: MouseButtons) -> ButtonEvent {
        ButtonEvent {
            x,
            y,
            button,
            modifiers: Modifiers::empty(),
        }
    }

    fn drag(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Drag(DragEvent {
            x,
            y,
            dx: 1.0,
            dy: 0.0,
            buttons: MouseButtons::LEFT,
            modifiers: Modifiers::empty(),
        })
    }

    fn log_pointer(view: &View, name: &'static str, log: &Rc<RefCell<Vec<(&'static str, &'static str)>>>) {
        let log = log.clone();
        view.on_pointer(move |event| {
            let kind = match event {
                PointerEvent::Press(_) => "press",
                PointerEvent::Release(_) => "release",
                PointerEvent::Drag(_) => "drag",
                PointerEvent::Scroll(_) => "scroll",
            };
            log.borrow_mut().push((name, kind));
            EventStatus::Handled
        });
    }

    #[test]
    fn test_content_size_tracks_children() {
        let a = fixed(200.0, 100.0);
        let b = fixed(100.0, 150.0);
        let stack = View::hstack(vec![a.clone(), b.clone()]);
        assert_eq!(stack.derived_width(), 300.0);
        assert_eq!(stack.derived_height(), 150.0);

        b.set_min_height(Some(50.0));
        assert_eq!(stack.derived_height(), 100.0);

        a.set_hidden(true);
        assert_eq!(stack.derived_width(), 100.0);
        assert_eq!(stack.derived_height(), 50.0);
    }

    #[test]
    fn test_empty_stack() {
        let stack = View::vstack(vec![]);
        assert_eq!(stack.derived_width(), 0.0);
        assert_eq!(stack.derived_height(), 0.0);
        stack.attach(&Pane::new(Rect::from_size(10.0, 10.0)));
        assert!(stack.children().is_empty());
    }

    #[test]
    fn test_extra_space_shared_between_flex_children() {
        let a = View::new(ViewConfig::new().min_width(10.0));
        let b = fixed(20.0, 10.0);
        let c = View::new(ViewConfig::new().min_width(30.0));
        let stack = View::hstack(vec![a.clone(), b.clone(), c.clone()]);
        stack.attach(&Pane::new(Rect::from_size(100.0, 10.0)));

        assert_eq!(alloc(&a), Rect::new(0.0, 0.0, 30.0, 10.0));
        assert_eq!(alloc(&b), Rect::new(30.0, 0.0, 50.0, 10.0));
        assert_eq!(alloc(&c), Rect::new(50.0, 0.0, 100.0, 10.0));
    }

    #[test]
    fn test_hidden_child_collapses_at_cursor() {
        let a = fixed(10.0, 10.0);
        let b = fixed(20.0, 10.0);
        let c = fixed(30.0, 10.0);
        let stack = View::hstack(vec![a.clone(), b.clone(), c.clone()]);
        stack.attach(&Pane::new(Rect::from_size(100.0, 10.0)));
        assert_eq!(alloc(&c), Rect::new(30.0, 0.0, 60.0, 10.0));

        b.set_hidden(true);
        assert_eq!(alloc(&b), Rect::new(10.0, 0.0, 10.0, 10.0));
        assert_eq!(alloc(&c), Rect::new(10.0, 0.0, 40.0, 10.0));
        assert!(!b.pane().is_some_and(|p| p.contains(10.0, 5.0)));

        b.set_hidden(false);
        assert_eq!(alloc(&b), Rect::new(10.0, 0.0, 30.0, 10.0));
        assert_eq!(alloc(&c), Rect::new(30.0, 0.0, 60.0, 10.0));
    }

    #[test]
    fn test_flex_toggle_repartitions() {
        let a = fixed(10.0, 10.0);
        let b = fixed(10.0, 10.0);
        let stack = View::hstack(vec![a.clone(), b.clone()]);
        stack.attach(&Pane::new(Rect::from_size(100.0, 10.0)));
        assert_eq!(alloc(&b), Rect::new(10.0, 0.0, 20.0, 10.0));

        b.set_flex_width(true);
        assert_eq!(alloc(&b), Rect::new(10.0, 0.0, 100.0, 10.0));
    }

    #[test]
    fn test_resize_repartitions() {
        let a = View::new(ViewConfig::new().min_height(10.0));
        let b = fixed(10.0, 10.0);
        let stack = View::vstack(vec![a.clone(), b.clone()]);
        let pane = Pane::new(Rect::from_size(50.0, 100.0));
        stack.attach(&pane);
        assert_eq!(alloc(&a), Rect::new(0.0, 10.0, 50.0, 100.0));
        assert_eq!(alloc(&b), Rect::new(0.0, 0.0, 50.0, 10.0));

        pane.set_alloc_box(Rect::from_size(50.0, 40.0));
        assert_eq!(alloc(&a), Rect::new(0.0, 10.0, 50.0, 40.0));
        assert_eq!(alloc(&b), Rect::new(0.0, 0.0, 50.0, 10.0));
    }

    #[test]
    fn test_hover_moves_pointer_between_children() {
        let a = fixed(50.0, 10.0);
        let b = fixed(50.0, 10.0);
        let stack = View::hstack(vec![a.clone(), b.clone()]);
        let pane = Pane::new(Rect::from_size(100.0, 10.0));
        stack.attach(&pane);
        let pointer = |v: &View| v.pane().and_then(|p| p.pointer());

        pane.set_pointer(Some(Point::new(10.0, 5.0)));
        assert_eq!(pointer(&a), Some(Point::new(10.0, 5.0)));
        assert_eq!(pointer(&b), None);

        pane.set_pointer(Some(Point::new(60.0, 5.0)));
        assert_eq!(pointer(&a), None);
        assert_eq!(pointer(&b), Some(Point::new(60.0, 5.0)));

        pane.set_pointer(None);
        assert_eq!(pointer(&b), None);
        if let ViewKind::Stack(s) = &stack.inner.kind {
            assert_eq!(s.children.routing().mouseover, None);
        }
    }

    #[test]
    fn test_drag_capture_follows_pressed_child() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = fixed(50.0, 10.0);
        let b = fixed(50.0, 10.0);
        log_pointer(&a, "a", &log);
        log_pointer(&b, "b", &log);
        let stack = View::hstack(vec![a, b]);
        let pane = Pane::new(Rect::from_size(100.0, 10.0));
        stack.attach(&pane);

        let send = |event: PointerEvent| pane.dispatch(&mut PaneEvent::Pointer(event));
        send(PointerEvent::Press(button(10.0, 5.0, MouseButtons::LEFT)));
        send(drag(70.0, 5.0));
        send(PointerEvent::Release(button(70.0, 5.0, MouseButtons::RIGHT)));
        send(drag(80.0, 5.0));
        send(PointerEvent::Release(button(80.0, 5.0, MouseButtons::LEFT)));
        send(drag(90.0, 5.0));

        assert_eq!(
            *log.borrow(),
            vec![
                ("a", "press"),
                ("a", "drag"),
                ("b", "release"),
                ("a", "drag"),
                ("b", "release"),
                ("b", "drag"),
            ]
        );
    }

    #[test]
    fn test_hiding_child_drops_its_hover_and_capture() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = fixed(50.0, 10.0);
        let b = fixed(50.0, 10.0);
        log_pointer(&a, "a", &log);
        log_pointer(&b, "b", &log);
        let stack = View::hstack(vec![a.clone(), b.clone()]);
        let pane = Pane::new(Rect::from_size(100.0, 10.0));
        stack.attach(&pane);

        pane.set_pointer(Some(Point::new(10.0, 5.0)));
        let send = |event: PointerEvent| pane.dispatch(&mut PaneEvent::Pointer(event));
        send(PointerEvent::Press(button(10.0, 5.0, MouseButtons::LEFT)));

        a.set_hidden(true);
        assert_eq!(a.pane().and_then(|p| p.pointer()), None);
        if let ViewKind::Stack(s) = &stack.inner.kind {
            assert_eq!(s.children.routing().mouseover, None);
            assert_eq!(s.children.routing().dragging, None);
        }

        // b has moved into the freed slot
        assert_eq!(alloc(&b), Rect::new(0.0, 0.0, 50.0, 10.0));
        send(drag(20.0, 5.0));
        assert_eq!(*log.borrow(), vec![("a", "press"), ("b", "drag")]);
    }

    #[test]
    fn test_press_outside_children_is_unhandled() {
        let a = fixed(50.0, 10.0);
        log_pointer(&a, "a", &Rc::new(RefCell::new(Vec::new())));
        let stack = View::hstack(vec![a]);
        let pane = Pane::new(Rect::from_size(100.0, 10.0));
        stack.attach(&pane);

        let status = pane.dispatch(&mut PaneEvent::Pointer(PointerEvent::Press(button(
            75.0,
            5.0,
            MouseButtons::LEFT,
        ))));
        assert_eq!(status, EventStatus::Unhandled);
    }

    #[test]
    fn test_detach_drops_child_panes() {
        let a = fixed(50.0, 10.0);
        let stack = View::hstack(vec![a.clone()]);
        let pane = Pane::new(Rect::from_size(100.0, 10.0));
        stack.attach(&pane);
        assert!(a.pane().is_some());

        stack.detach();
        assert!(a.pane().is_none());
        // content wiring survives detach
        a.set_min_width(Some(70.0));
        assert_eq!(stack.derived_width(), 70.0);
    }
}
