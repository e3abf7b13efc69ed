//! # paneflow
//!
//! Reactive box layout and pointer routing for widget trees.
//!
//! ## Architecture
//!
//! Every piece of layout state lives in a reactive [`Slot`]. Setting a slot
//! synchronously runs its listeners, so one resize or attribute change
//! cascades through sizing, alignment and partitioning before `set` returns:
//!
//! ```text
//! min/content size → derived size → parent content size → partition
//!                         ↓                                    ↓
//!                   active box  ←──────── alignment ←──── alloc box
//! ```
//!
//! A [`View`] carries sizing and alignment attributes and drives the active
//! box of the [`Pane`] it is attached to. Layout views (stacks, layers) own
//! their children, create one pane per child and route draw and pointer
//! events down the tree. A [`Root`] sits on top and adapts host window
//! callbacks.
//!
//! Coordinates are bottom-left origin. Everything is single-threaded.
//!
//! ## Modules
//!
//! - [`types`] - geometry, colors, alignment, input flags
//! - [`reactive`] - `Slot` and `Prop`
//! - [`pane`] - panes, events, the painter contract
//! - [`view`] - views, sizing, alignment, configuration
//! - [`layout`] - stacks, layers, the root adapter
//! - [`host`] - host callbacks and crossterm input
//!
//! ## Example
//!
//! ```
//! use paneflow::{DrawList, Root, View, ViewConfig, WindowEvents};
//! use paneflow::types::{Rect, Rgba};
//!
//! let sidebar = View::new(ViewConfig::new().min_width(100.0).flex_width(false));
//! let content = View::new(ViewConfig::new().background(Rgba::GRAY));
//!
//! let root = Root::new(400.0, 300.0);
//! root.set_child(View::hstack(vec![sidebar.clone(), content.clone()]));
//!
//! assert_eq!(sidebar.pane().unwrap().alloc_box(), Rect::new(0.0, 0.0, 100.0, 300.0));
//! assert_eq!(content.pane().unwrap().alloc_box(), Rect::new(100.0, 0.0, 400.0, 300.0));
//!
//! let mut list = DrawList::new();
//! root.on_draw(&mut list);
//! assert_eq!(list.len(), 1);
//! ```

pub mod error;
pub mod host;
pub mod layout;
pub mod pane;
pub mod reactive;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use host::{HostEvent, TerminalEvents, WindowEvents};
pub use layout::Root;
pub use pane::{
    DrawCommand, DrawList, EventKind, ImageData, Painter, Pane, PaneEvent, PointerEvent,
};
pub use reactive::{Owner, Prop, Slot};
pub use types::{
    Align, Axis, EventStatus, HAlign, Modifiers, MouseButtons, Point, Rect, Rgba, VAlign,
};
pub use view::{calc_axis, View, ViewConfig, ViewStyle};
