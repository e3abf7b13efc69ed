//! Panes, event dispatch and the rendering contract.
//!
//! - [`Pane`] - allocated/active boxes, fills, pointer, handler lists
//! - [`PaneEvent`] / [`PointerEvent`] - what a pane dispatches
//! - [`Painter`] / [`DrawList`] - where paint passes go

mod event;
mod paint;
#[allow(clippy::module_inception)]
mod pane;

pub use event::{
    priority, ButtonEvent, DragEvent, EventKind, Handler, PaneEvent, PointerEvent, ScrollEvent,
};
pub use paint::{DrawCommand, DrawList, Fill, Fills, ImageData, Painter};
pub use pane::Pane;
