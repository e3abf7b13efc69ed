//! Prop - construction-time attribute values.
//!
//! A view attribute can be given either as a literal or as an existing
//! [`Slot`]. Passing a slot binds the attribute live: whoever holds the slot
//! can drive the view from outside.

use super::Slot;
use crate::types::Rgba;

/// A literal value or a slot to share.
#[derive(Debug, Clone)]
pub enum Prop<T> {
    /// Plain value, wrapped in a fresh slot when the view is built.
    Value(T),
    /// Existing slot, used as-is by the view.
    Slot(Slot<T>),
}

impl<T: Clone + PartialEq + 'static> Prop<T> {
    /// Current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            Prop::Value(v) => v.clone(),
            Prop::Slot(s) => s.get(),
        }
    }

    /// Turn into the slot the view will own or share.
    pub fn into_slot(self) -> Slot<T> {
        match self {
            Prop::Value(v) => Slot::new(v),
            Prop::Slot(s) => s,
        }
    }
}

impl<T: Default> Default for Prop<T> {
    fn default() -> Self {
        Prop::Value(T::default())
    }
}

impl<T> From<T> for Prop<T> {
    fn from(value: T) -> Self {
        Prop::Value(value)
    }
}

impl<T> From<Slot<T>> for Prop<T> {
    fn from(slot: Slot<T>) -> Self {
        Prop::Slot(slot)
    }
}

impl From<f32> for Prop<Option<f32>> {
    fn from(value: f32) -> Self {
        Prop::Value(Some(value))
    }
}

impl From<Rgba> for Prop<Option<Rgba>> {
    fn from(value: Rgba) -> Self {
        Prop::Value(Some(value))
    }
}
