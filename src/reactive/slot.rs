//! Slot - a single observable value.
//!
//! A `Slot<T>` holds one value and an ordered list of listeners. `set` only
//! notifies when the new value differs from the current one. Notification is
//! synchronous: every listener has run by the time `set` returns, and a
//! listener may itself call `set` on any slot, including this one.
//!
//! Wiring must be acyclic. Two slots whose listeners set each other recurse
//! without bound.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// Owner tags
// =============================================================================

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identity tag attached to listeners and handlers.
///
/// Every view and pane carries one, so that everything it registered on a
/// slot can be removed in one call on detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Owner(u64);

impl Owner {
    /// Allocate a fresh, process-unique owner tag.
    pub fn new() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one registered listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// =============================================================================
// Slot
// =============================================================================

type Callback<T> = Rc<dyn Fn(&T)>;

struct Listener<T> {
    id: ListenerId,
    owner: Option<Owner>,
    callback: Callback<T>,
}

struct SlotInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<Listener<T>>>,
    next_id: Cell<u64>,
}

/// A reactive cell. Cloning yields another handle to the same cell.
pub struct Slot<T> {
    inner: Rc<SlotInner<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Slot<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SlotInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value` and notify listeners, unless it equals the current value.
    pub fn set(&self, value: T) {
        if *self.inner.value.borrow() == value {
            return;
        }
        *self.inner.value.borrow_mut() = value;

        // Snapshot so listeners may (un)register while we iterate.
        let pending: Vec<(ListenerId, Callback<T>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|l| (l.id, Rc::clone(&l.callback)))
            .collect();

        for (id, callback) in pending {
            if !self.is_registered(id) {
                continue;
            }
            let current = self.get();
            callback(&current);
        }
    }

    /// Append a listener. It is not called with the current value.
    pub fn observe(&self, callback: impl Fn(&T) + 'static) -> ListenerId {
        self.push(None, Rc::new(callback))
    }

    /// Append a listener tagged with `owner`, removable via [`Slot::remove_owner`].
    pub fn observe_owned(&self, owner: Owner, callback: impl Fn(&T) + 'static) -> ListenerId {
        self.push(Some(owner), Rc::new(callback))
    }

    /// Remove one listener. Returns false if it was already gone.
    pub fn unobserve(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }

    /// Remove every listener registered by `owner`. Returns how many went.
    pub fn remove_owner(&self, owner: Owner) -> usize {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.owner != Some(owner));
        before - listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// True if both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn push(&self, owner: Option<Owner>, callback: Callback<T>) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push(Listener {
            id,
            owner,
            callback,
        });
        id
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow().iter().any(|l| l.id == id)
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("value", &*self.inner.value.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}
