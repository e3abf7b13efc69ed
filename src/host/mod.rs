//! Host Module - the windowing side of the engine.
//!
//! A host (window system, terminal) reports resizes, paint requests and
//! pointer input. Coordinates are always bottom-left origin.
//!
//! # API
//!
//! - [`WindowEvents`] - callbacks a host drives; implemented by [`Root`](crate::layout::Root)
//! - [`HostEvent`] - the same callbacks as queueable values
//! - [`TerminalEvents`] - crossterm input translated into host events

mod terminal;

pub use terminal::{disable_mouse, enable_mouse, TerminalEvents};

use crate::pane::Painter;
use crate::types::{EventStatus, Modifiers, MouseButtons};

/// Callbacks from a host window.
///
/// Pointer callbacks report whether the tree handled the event.
pub trait WindowEvents {
    fn on_resize(&self, width: f32, height: f32);

    fn on_draw(&self, painter: &mut dyn Painter);

    fn on_mouse_enter(&self, x: f32, y: f32);

    fn on_mouse_leave(&self, x: f32, y: f32);

    fn on_mouse_motion(&self, x: f32, y: f32, dx: f32, dy: f32);

    fn on_mouse_press(
        &self,
        x: f32,
        y: f32,
        button: MouseButtons,
        modifiers: Modifiers,
    ) -> EventStatus;

    fn on_mouse_release(
        &self,
        x: f32,
        y: f32,
        button: MouseButtons,
        modifiers: Modifiers,
    ) -> EventStatus;

    fn on_mouse_drag(
        &self,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        buttons: MouseButtons,
        modifiers: Modifiers,
    ) -> EventStatus;

    fn on_mouse_scroll(&self, x: f32, y: f32, scroll_x: f32, scroll_y: f32) -> EventStatus;
}

/// One host callback as a value. Paint requests are not queued; call
/// [`WindowEvents::on_draw`] directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Resize {
        width: f32,
        height: f32,
    },
    MouseEnter {
        x: f32,
        y: f32,
    },
    MouseLeave {
        x: f32,
        y: f32,
    },
    MouseMotion {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
    },
    MousePress {
        x: f32,
        y: f32,
        button: MouseButtons,
        modifiers: Modifiers,
    },
    MouseRelease {
        x: f32,
        y: f32,
        button: MouseButtons,
        modifiers: Modifiers,
    },
    MouseDrag {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        buttons: MouseButtons,
        modifiers: Modifiers,
    },
    MouseScroll {
        x: f32,
        y: f32,
        scroll_x: f32,
        scroll_y: f32,
    },
}

impl HostEvent {
    /// Invoke the matching callback on `target`.
    ///
    /// Non-pointer events report `Unhandled`.
    pub fn deliver(&self, target: &impl WindowEvents) -> EventStatus {
        match *self {
            HostEvent::Resize { width, height } => {
                target.on_resize(width, height);
                EventStatus::Unhandled
            }
            HostEvent::MouseEnter { x, y } => {
                target.on_mouse_enter(x, y);
                EventStatus::Unhandled
            }
            HostEvent::MouseLeave { x, y } => {
                target.on_mouse_leave(x, y);
                EventStatus::Unhandled
            }
            HostEvent::MouseMotion { x, y, dx, dy } => {
                target.on_mouse_motion(x, y, dx, dy);
                EventStatus::Unhandled
            }
            HostEvent::MousePress {
                x,
                y,
                button,
                modifiers,
            } => target.on_mouse_press(x, y, button, modifiers),
            HostEvent::MouseRelease {
                x,
                y,
                button,
                modifiers,
            } => target.on_mouse_release(x, y, button, modifiers),
            HostEvent::MouseDrag {
                x,
                y,
                dx,
                dy,
                buttons,
                modifiers,
            } => target.on_mouse_drag(x, y, dx, dy, buttons, modifiers),
            HostEvent::MouseScroll {
                x,
                y,
                scroll_x,
                scroll_y,
            } => target.on_mouse_scroll(x, y, scroll_x, scroll_y),
        }
    }
}
