//! Terminal host - crossterm input as host events.
//!
//! Cells map to unit squares. Terminal rows count down from the top, so rows
//! are flipped to put the origin at the bottom-left.
//!
//! # Example
//!
//! ```ignore
//! use paneflow::host::TerminalEvents;
//! use paneflow::layout::Root;
//! use std::time::Duration;
//!
//! let mut input = TerminalEvents::from_terminal()?;
//! loop {
//!     for event in input.poll(Duration::from_millis(16))? {
//!         root.handle(&event);
//!     }
//! }
//! ```

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;

use super::HostEvent;
use crate::types::{Modifiers, MouseButtons};

/// Stateful translator from crossterm events to [`HostEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct TerminalEvents {
    height: u16,
    last: Option<(f32, f32)>,
}

impl TerminalEvents {
    /// Translator for a terminal `height` rows tall.
    pub fn new(height: u16) -> Self {
        Self { height, last: None }
    }

    /// Translator sized to the current terminal.
    pub fn from_terminal() -> io::Result<Self> {
        let (_, height) = crossterm::terminal::size()?;
        Ok(Self::new(height))
    }

    /// Wait up to `timeout` for input and translate it.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Vec<HostEvent>> {
        if poll(timeout)? {
            Ok(self.translate(&read()?))
        } else {
            Ok(Vec::new())
        }
    }

    /// Translate one crossterm event. Keyboard and paste input yield nothing.
    pub fn translate(&mut self, event: &CrosstermEvent) -> Vec<HostEvent> {
        match event {
            CrosstermEvent::Resize(width, height) => {
                self.height = *height;
                vec![HostEvent::Resize {
                    width: f32::from(*width),
                    height: f32::from(*height),
                }]
            }
            CrosstermEvent::Mouse(mouse) => self.translate_mouse(mouse),
            CrosstermEvent::FocusLost => match self.last.take() {
                Some((x, y)) => vec![HostEvent::MouseLeave { x, y }],
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn translate_mouse(&mut self, mouse: &CrosstermMouseEvent) -> Vec<HostEvent> {
        let x = f32::from(mouse.column);
        let y = f32::from(self.height.saturating_sub(1).saturating_sub(mouse.row));
        let modifiers = convert_modifiers(mouse.modifiers);

        let mut events = Vec::with_capacity(2);
        let (dx, dy) = match self.last {
            Some((lx, ly)) => (x - lx, y - ly),
            None => {
                events.push(HostEvent::MouseEnter { x, y });
                (0.0, 0.0)
            }
        };
        self.last = Some((x, y));

        events.push(match mouse.kind {
            MouseEventKind::Moved => HostEvent::MouseMotion { x, y, dx, dy },
            MouseEventKind::Down(button) => HostEvent::MousePress {
                x,
                y,
                button: convert_mouse_button(button),
                modifiers,
            },
            MouseEventKind::Up(button) => HostEvent::MouseRelease {
                x,
                y,
                button: convert_mouse_button(button),
                modifiers,
            },
            MouseEventKind::Drag(button) => HostEvent::MouseDrag {
                x,
                y,
                dx,
                dy,
                buttons: convert_mouse_button(button),
                modifiers,
            },
            MouseEventKind::ScrollUp => scroll(x, y, 0.0, 1.0),
            MouseEventKind::ScrollDown => scroll(x, y, 0.0, -1.0),
            MouseEventKind::ScrollLeft => scroll(x, y, -1.0, 0.0),
            MouseEventKind::ScrollRight => scroll(x, y, 1.0, 0.0),
        });
        events
    }
}

fn scroll(x: f32, y: f32, scroll_x: f32, scroll_y: f32) -> HostEvent {
    HostEvent::MouseScroll {
        x,
        y,
        scroll_x,
        scroll_y,
    }
}

fn convert_mouse_button(button: CrosstermMouseButton) -> MouseButtons {
    match button {
        CrosstermMouseButton::Left => MouseButtons::LEFT,
        CrosstermMouseButton::Right => MouseButtons::RIGHT,
        CrosstermMouseButton::Middle => MouseButtons::MIDDLE,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(
        Modifiers::META,
        mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    );
    out
}

// =============================================================================
// Mouse capture
// =============================================================================

/// Ask the terminal to report mouse events.
pub fn enable_mouse() -> io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

pub fn disable_mouse() -> io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}
