//! View Module - sizing, alignment and pane attachment.
//!
//! # API
//!
//! - [`View`] - leaf and container views
//! - [`ViewConfig`] / [`ViewStyle`] - construction-time attributes
//! - [`calc_axis`] - one-axis alignment of a size within a span

mod align;
mod config;
mod image;
#[allow(clippy::module_inception)]
mod view;

pub use align::calc_axis;
pub use config::{ViewConfig, ViewStyle};
pub use view::View;

pub(crate) use view::{Defaults, ViewKind};
