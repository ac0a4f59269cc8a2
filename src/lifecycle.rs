//! Per-type lifecycle record: instance slot, override stack and creation lock.
//!
//! A [`SingletonCell`] is the whole mutable state one type owns: the base
//! slot filled by explicit assignment or lazy construction, the stack of
//! temporary overrides layered above it, and the lock that serializes lazy
//! construction. Cells are `const`-constructible so each type can keep its
//! cell in a plain `static`; the [`crate::impl_singleton!`] macro generates
//! exactly that.
//!
//! The cell can also be used standalone, without the [`crate::Singleton`]
//! trait, by passing an explicit factory to [`SingletonCell::get_or_construct`].

use std::any::type_name;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{LifecycleEvent, SingletonError};

/// Type alias for the user-supplied observer callback.
///
/// The callback receives a reference to a [`LifecycleEvent`] on every state
/// transition of the cell it is attached to. It must be thread-safe because
/// the cell itself is shared across threads.
pub type LifecycleObserver = dyn Fn(&LifecycleEvent) + Send + Sync + 'static;

/// Derived ownership mode of a cell.
///
/// The mode is never stored; it is recomputed from the slot and the stack on
/// every call, so it can never drift out of sync with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleMode {
    /// No base instance and no overrides.
    Unset,
    /// A base instance is in place and no overrides are stacked.
    BaseSet,
    /// `n >= 1` overrides are stacked; the base slot underneath is untouched.
    Stacked(usize),
}

/// Base slot and override stack, guarded together by one mutex.
struct SlotState<T> {
    base: Option<Arc<T>>,
    stack: Vec<Arc<T>>,
}

/// Lifecycle record for one type.
///
/// Holds at most one base instance plus an ordered stack of overrides. The
/// current instance is the stack top when the stack is non-empty, otherwise
/// the base. All operations are safe under arbitrary thread interleaving.
pub struct SingletonCell<T> {
    /// Slot and stack consistency lock. Held only for pointer-sized critical
    /// sections, never across a factory call or an observer callback.
    state: Mutex<SlotState<T>>,
    /// Serializes the slow path of [`get_or_construct`](Self::get_or_construct)
    /// so the factory runs at most once per lazy-construction event. No other
    /// operation touches this lock.
    creation: Mutex<()>,
    /// Optional observer invoked on every state transition.
    observer: Mutex<Option<Arc<LifecycleObserver>>>,
}

impl<T> SingletonCell<T> {
    /// Creates an empty cell, suitable for a `static`.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                base: None,
                stack: Vec::new(),
            }),
            creation: Mutex::new(()),
            observer: Mutex::new(None),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SlotState<T>> {
        // Poisoning only occurs if a thread panicked while holding the lock;
        // the state is a pair of plain collections, safe to keep using.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the currently visible instance: the stack top if any override
    /// is active, else the base instance, else `None`. Never constructs.
    pub fn current(&self) -> Option<Arc<T>> {
        let state = self.lock_state();
        state.stack.last().cloned().or_else(|| state.base.clone())
    }

    /// True when a base instance or an override is in place.
    ///
    /// A pure probe: it never constructs and never acquires the creation
    /// lock, so it cannot block behind a slow factory.
    pub fn is_set(&self) -> bool {
        let state = self.lock_state();
        !state.stack.is_empty() || state.base.is_some()
    }

    /// Number of stacked overrides; 0 whenever no push is outstanding.
    pub fn stack_depth(&self) -> usize {
        self.lock_state().stack.len()
    }

    /// Recomputes the ownership mode from the slot and the stack.
    pub fn mode(&self) -> LifecycleMode {
        let state = self.lock_state();
        match state.stack.len() {
            0 if state.base.is_some() => LifecycleMode::BaseSet,
            0 => LifecycleMode::Unset,
            n => LifecycleMode::Stacked(n),
        }
    }

    /// Returns the current instance, lazily constructing the base via
    /// `factory` when nothing is set yet.
    ///
    /// Double-checked: the fast path is a single `state` round-trip and runs
    /// neither the factory nor the observer. The slow path serializes on the
    /// creation lock, re-checks (another thread may have finished
    /// constructing while this one waited), and constructs at most once
    /// until the base is explicitly cleared. Under N concurrent first calls
    /// the factory runs exactly once and all N callers observe the same
    /// `Arc`.
    ///
    /// The factory runs outside the `state` lock, so probes and stack
    /// operations on the same type are not blocked by a slow constructor.
    pub fn get_or_construct(&self, factory: impl FnOnce() -> T) -> Arc<T> {
        if let Some(existing) = self.current() {
            return existing;
        }

        let _creating = self
            .creation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = self.current() {
            return existing;
        }

        let fresh = Arc::new(factory());
        let current = {
            let mut state = self.lock_state();
            // A concurrent explicit assignment wins the slot; a concurrent
            // push wins visibility.
            let base = state.base.get_or_insert(fresh).clone();
            state.stack.last().cloned().unwrap_or(base)
        };
        debug!(type_name = type_name::<T>(), "lazily constructed base instance");
        self.emit(&LifecycleEvent::Construct {
            type_name: type_name::<T>(),
        });
        current
    }

    /// Assigns the base instance.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::PushPop`] while any override is stacked; explicit
    ///   assignment is forbidden under an active stack so that code relying
    ///   on push/pop is not silently overridden.
    /// - [`SingletonError::AlreadySet`] when a base instance is already in
    ///   place; re-assignment requires an explicit [`clear_base`](Self::clear_base).
    pub fn set_base(&self, value: Arc<T>) -> Result<(), SingletonError> {
        {
            let mut state = self.lock_state();
            if !state.stack.is_empty() {
                return Err(SingletonError::PushPop {
                    type_name: type_name::<T>(),
                });
            }
            if state.base.is_some() {
                return Err(SingletonError::AlreadySet {
                    type_name: type_name::<T>(),
                });
            }
            state.base = Some(value);
        }
        debug!(type_name = type_name::<T>(), "base instance assigned");
        self.emit(&LifecycleEvent::Set {
            type_name: type_name::<T>(),
        });
        Ok(())
    }

    /// Clears the base instance.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::PushPop`] while any override is stacked.
    /// - [`SingletonError::NotSet`] when no base instance is in place.
    pub fn clear_base(&self) -> Result<(), SingletonError> {
        {
            let mut state = self.lock_state();
            if !state.stack.is_empty() {
                return Err(SingletonError::PushPop {
                    type_name: type_name::<T>(),
                });
            }
            if state.base.take().is_none() {
                return Err(SingletonError::NotSet {
                    type_name: type_name::<T>(),
                });
            }
        }
        debug!(type_name = type_name::<T>(), "base instance cleared");
        self.emit(&LifecycleEvent::Clear {
            type_name: type_name::<T>(),
        });
        Ok(())
    }

    /// Layers an override above the base slot. Legal from any mode; the base
    /// slot is left exactly as it was.
    pub fn push(&self, value: Arc<T>) {
        let depth = {
            let mut state = self.lock_state();
            state.stack.push(value);
            state.stack.len()
        };
        debug!(type_name = type_name::<T>(), depth, "pushed override");
        self.emit(&LifecycleEvent::Push {
            type_name: type_name::<T>(),
            depth,
        });
    }

    /// Removes and discards the top override. Popping back to an empty stack
    /// exposes the base slot exactly as it was before any push.
    ///
    /// # Errors
    ///
    /// [`SingletonError::PushPop`] when the stack is empty.
    pub fn pop(&self) -> Result<(), SingletonError> {
        let depth = {
            let mut state = self.lock_state();
            if state.stack.pop().is_none() {
                return Err(SingletonError::PushPop {
                    type_name: type_name::<T>(),
                });
            }
            state.stack.len()
        };
        debug!(type_name = type_name::<T>(), depth, "popped override");
        self.emit(&LifecycleEvent::Pop {
            type_name: type_name::<T>(),
            depth,
        });
        Ok(())
    }

    /// Sets an observer invoked with a [`LifecycleEvent`] on every state
    /// transition of this cell.
    ///
    /// [`LifecycleEvent::Construct`] is emitted while the creation lock is
    /// still held, so the callback must NOT call
    /// [`get_or_construct`](Self::get_or_construct) on the same cell; that
    /// would deadlock. Probes (`is_set`, `stack_depth`, `mode`, `current`)
    /// never emit.
    pub fn set_observer(&self, callback: impl Fn(&LifecycleEvent) + Send + Sync + 'static) {
        let mut guard = self.observer.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clears the observer. Later transitions emit nothing.
    pub fn clear_observer(&self) {
        let mut guard = self.observer.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Convenience wrapper to emit an event using the current observer.
    ///
    /// The observer lock is released before the callback runs, so callbacks
    /// may themselves probe the cell.
    fn emit(&self, event: &LifecycleEvent) {
        let callback = {
            let guard = self.observer.lock().unwrap_or_else(PoisonError::into_inner);
            guard.clone()
        };
        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl<T> Default for SingletonCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Widget(u32);

    #[test]
    fn test_mode_tracks_slot_and_stack() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        assert_eq!(cell.mode(), LifecycleMode::Unset);

        cell.set_base(Arc::new(Widget(1))).unwrap();
        assert_eq!(cell.mode(), LifecycleMode::BaseSet);

        cell.push(Arc::new(Widget(2)));
        cell.push(Arc::new(Widget(3)));
        assert_eq!(cell.mode(), LifecycleMode::Stacked(2));

        cell.pop().unwrap();
        cell.pop().unwrap();
        assert_eq!(cell.mode(), LifecycleMode::BaseSet);

        cell.clear_base().unwrap();
        assert_eq!(cell.mode(), LifecycleMode::Unset);
    }

    #[test]
    fn test_stack_top_shadows_base() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        let base = Arc::new(Widget(10));
        cell.set_base(base.clone()).unwrap();

        let over = Arc::new(Widget(20));
        cell.push(over.clone());
        assert!(Arc::ptr_eq(&cell.current().unwrap(), &over));

        cell.pop().unwrap();
        assert!(Arc::ptr_eq(&cell.current().unwrap(), &base));
    }

    #[test]
    fn test_pop_to_empty_exposes_unset_base() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        cell.push(Arc::new(Widget(7)));
        assert!(cell.is_set());

        cell.pop().unwrap();
        assert!(!cell.is_set());
        assert_eq!(cell.current().map(|w| w.0), None);
    }

    #[test]
    fn test_set_errors() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        cell.set_base(Arc::new(Widget(1))).unwrap();
        assert_eq!(
            cell.set_base(Arc::new(Widget(2))),
            Err(SingletonError::AlreadySet {
                type_name: type_name::<Widget>()
            })
        );

        cell.push(Arc::new(Widget(3)));
        assert_eq!(
            cell.set_base(Arc::new(Widget(4))),
            Err(SingletonError::PushPop {
                type_name: type_name::<Widget>()
            })
        );
    }

    #[test]
    fn test_clear_errors() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        assert_eq!(
            cell.clear_base(),
            Err(SingletonError::NotSet {
                type_name: type_name::<Widget>()
            })
        );

        cell.set_base(Arc::new(Widget(1))).unwrap();
        cell.push(Arc::new(Widget(2)));
        assert_eq!(
            cell.clear_base(),
            Err(SingletonError::PushPop {
                type_name: type_name::<Widget>()
            })
        );
    }

    #[test]
    fn test_get_or_construct_runs_factory_once() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        let first = cell.get_or_construct(|| Widget(42));
        assert_eq!(first.0, 42);

        // Second call takes the fast path; a firing factory would panic.
        let second = cell.get_or_construct(|| panic!("factory must not rerun"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_or_construct_prefers_existing_override() {
        let cell: SingletonCell<Widget> = SingletonCell::new();
        let over = Arc::new(Widget(5));
        cell.push(over.clone());

        let seen = cell.get_or_construct(|| panic!("override is current"));
        assert!(Arc::ptr_eq(&seen, &over));
    }
}
