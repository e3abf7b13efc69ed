//! Root - the top of a view tree, sized to the host window.

use std::cell::RefCell;

use tracing::debug;

use crate::host::{HostEvent, WindowEvents};
use crate::pane::{ButtonEvent, DragEvent, Painter, Pane, PaneEvent, PointerEvent, ScrollEvent};
use crate::types::{EventStatus, Modifiers, MouseButtons, Point, Rect};
use crate::view::View;

/// Owns the window-sized pane and the view attached to it.
pub struct Root {
    pane: Pane,
    child: RefCell<Option<View>>,
}

impl Root {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pane: Pane::new(Rect::from_size(width, height)),
            child: RefCell::new(None),
        }
    }

    pub fn pane(&self) -> &Pane {
        &self.pane
    }

    pub fn child(&self) -> Option<View> {
        self.child.borrow().clone()
    }

    /// Attach `view` to the window, detaching the current child.
    pub fn set_child(&self, view: View) {
        if let Some(old) = self.take_child() {
            debug!(view = old.name(), "root child replaced");
        }
        view.attach(&self.pane);
        *self.child.borrow_mut() = Some(view);
    }

    /// Detach and return the current child.
    pub fn take_child(&self) -> Option<View> {
        let view = self.child.borrow_mut().take()?;
        view.detach();
        Some(view)
    }

    /// Route one queued host event.
    pub fn handle(&self, event: &HostEvent) -> EventStatus {
        event.deliver(self)
    }

    fn dispatch(&self, event: PointerEvent) -> EventStatus {
        self.pane.dispatch(&mut PaneEvent::Pointer(event))
    }
}

impl WindowEvents for Root {
    fn on_resize(&self, width: f32, height: f32) {
        debug!(width, height, "resize");
        self.pane.set_alloc_box(Rect::from_size(width, height));
    }

    fn on_draw(&self, painter: &mut dyn Painter) {
        if self.child().is_some_and(|c| c.hidden()) {
            return;
        }
        self.pane.draw(painter);
    }

    fn on_mouse_enter(&self, x: f32, y: f32) {
        self.pane.set_pointer(Some(Point::new(x, y)));
    }

    fn on_mouse_leave(&self, _x: f32, _y: f32) {
        self.pane.set_pointer(None);
    }

    fn on_mouse_motion(&self, x: f32, y: f32, _dx: f32, _dy: f32) {
        self.pane.set_pointer(Some(Point::new(x, y)));
    }

    fn on_mouse_press(
        &self,
        x: f32,
        y: f32,
        button: MouseButtons,
        modifiers: Modifiers,
    ) -> EventStatus {
        self.dispatch(PointerEvent::Press(ButtonEvent {
            x,
            y,
            button,
            modifiers,
        }))
    }

    fn on_mouse_release(
        &self,
        x: f32,
        y: f32,
        button: MouseButtons,
        modifiers: Modifiers,
    ) -> EventStatus {
        self.dispatch(PointerEvent::Release(ButtonEvent {
            x,
            y,
            button,
            modifiers,
        }))
    }

    fn on_mouse_drag(
        &self,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        buttons: MouseButtons,
        modifiers: Modifiers,
    ) -> EventStatus {
        self.pane.set_pointer(Some(Point::new(x, y)));
        self.dispatch(PointerEvent::Drag(DragEvent {
            x,
            y,
            dx,
            dy,
            buttons,
            modifiers,
        }))
    }

    fn on_mouse_scroll(&self, x: f32, y: f32, scroll_x: f32, scroll_y: f32) -> EventStatus {
        self.dispatch(PointerEvent::Scroll(ScrollEvent {
            x,
            y,
            scroll_x,
            scroll_y,
        }))
    }
}

impl Drop for Root {
    fn drop(&mut self) {
        if let Some(view) = self.child.get_mut().take() {
            view.detach();
        }
    }
}
