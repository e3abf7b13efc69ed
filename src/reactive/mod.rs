//! Reactive primitives.
//!
//! - [`Slot`] - equality-gated observable value, the only primitive used for
//!   live recomputation in this crate
//! - [`Owner`] - tag for bulk listener removal
//! - [`Prop`] - literal-or-slot value accepted by view constructors

mod prop;
mod slot;

pub use prop::Prop;
pub use slot::{ListenerId, Owner, Slot};
