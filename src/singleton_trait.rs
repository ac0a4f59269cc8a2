//! Core trait defining the per-type singleton lifecycle.
//!
//! This module provides the [`Singleton`] trait with default implementations
//! for every lifecycle operation, requiring only two things from the
//! implementor: access to the type's static [`SingletonCell`] and a
//! no-argument factory. The [`crate::impl_singleton!`] macro generates both.
//!
//! State belongs to the type, not to any instance of it, so all operations
//! are associated functions: `Config::get_singleton()`, not
//! `config.get_singleton()`.

use std::sync::Arc;

use crate::{LifecycleEvent, SingletonCell, SingletonError};

/// Per-type singleton lifecycle operations.
///
/// Three ownership modes coexist per type: lazy auto-construction
/// ([`get_singleton`](Self::get_singleton) on an unset type), explicit
/// assignment ([`set_singleton`](Self::set_singleton)), and a push/pop
/// override stack ([`push_singleton`](Self::push_singleton) /
/// [`pop_singleton`](Self::pop_singleton)) for scoped temporary replacement
/// that never mutates the base instance underneath.
///
/// # Examples
///
/// ```rust
/// use singleton_lifecycle::{impl_singleton, Singleton};
///
/// #[derive(Default)]
/// struct Config {
///     verbose: bool,
/// }
///
/// impl_singleton!(Config);
///
/// // Lazily constructed on first access, shared afterwards.
/// let config = Config::get_singleton();
/// assert!(!config.verbose);
/// assert!(Config::has_singleton());
/// ```
pub trait Singleton: Sized + Send + Sync + 'static {
    /// Access the type's lifecycle cell.
    ///
    /// This method must be implemented to provide the static state record
    /// the default methods operate on.
    fn lifecycle() -> &'static SingletonCell<Self>;

    /// No-argument factory producing a default instance.
    ///
    /// Invoked at most once per lazy-construction event inside
    /// [`get_singleton`](Self::get_singleton), and once per
    /// [`push_default_singleton`](Self::push_default_singleton) call.
    fn create_default() -> Self;

    /// Returns the current instance, constructing a default one first if
    /// nothing is set. Never fails.
    ///
    /// The returned `Arc` is the stored instance itself, not a copy; every
    /// caller observes the same allocation. After the first construction,
    /// calls take a lock-free-of-construction fast path that runs neither
    /// [`create_default`](Self::create_default) nor the observer.
    fn get_singleton() -> Arc<Self> {
        Self::lifecycle().get_or_construct(Self::create_default)
    }

    /// Assigns the base instance, taking ownership of `value`.
    ///
    /// # Errors
    ///
    /// [`SingletonError::PushPop`] while overrides are stacked,
    /// [`SingletonError::AlreadySet`] when a base instance already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use singleton_lifecycle::{impl_singleton, Singleton, SingletonError};
    ///
    /// #[derive(Default)]
    /// struct Flags(u8);
    /// impl_singleton!(Flags);
    ///
    /// Flags::set_singleton(Flags(3)).unwrap();
    /// assert_eq!(Flags::get_singleton().0, 3);
    ///
    /// // Re-assignment requires an explicit clear first.
    /// assert!(matches!(
    ///     Flags::set_singleton(Flags(4)),
    ///     Err(SingletonError::AlreadySet { .. })
    /// ));
    /// ```
    fn set_singleton(value: Self) -> Result<(), SingletonError> {
        Self::set_singleton_arc(Arc::new(value))
    }

    /// Assigns an `Arc`-wrapped base instance.
    ///
    /// More efficient than [`set_singleton`](Self::set_singleton) when you
    /// already hold an `Arc`, and lets the caller keep a handle to the exact
    /// stored instance.
    ///
    /// # Errors
    ///
    /// Same as [`set_singleton`](Self::set_singleton).
    fn set_singleton_arc(value: Arc<Self>) -> Result<(), SingletonError> {
        Self::lifecycle().set_base(value)
    }

    /// Clears the base instance, returning the type to the unset mode.
    ///
    /// # Errors
    ///
    /// [`SingletonError::PushPop`] while overrides are stacked,
    /// [`SingletonError::NotSet`] when nothing is set.
    fn clear_singleton() -> Result<(), SingletonError> {
        Self::lifecycle().clear_base()
    }

    /// True when a base instance or an override is in place.
    ///
    /// A pure probe: never constructs, never acquires the creation lock,
    /// never emits an event.
    fn has_singleton() -> bool {
        Self::lifecycle().is_set()
    }

    /// Layers an override above the base slot, taking ownership of `value`.
    /// Legal from any mode; the base slot is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use singleton_lifecycle::{impl_singleton, Singleton};
    ///
    /// struct Clock(&'static str);
    /// impl_singleton!(Clock, || Clock("system"));
    ///
    /// Clock::push_singleton(Clock("frozen"));
    /// assert_eq!(Clock::get_singleton().0, "frozen");
    ///
    /// Clock::pop_singleton().unwrap();
    /// assert_eq!(Clock::get_singleton().0, "system");
    /// ```
    fn push_singleton(value: Self) {
        Self::push_singleton_arc(Arc::new(value));
    }

    /// Layers an `Arc`-wrapped override above the base slot.
    fn push_singleton_arc(value: Arc<Self>) {
        Self::lifecycle().push(value);
    }

    /// Layers a freshly constructed default instance above the base slot.
    ///
    /// Calls [`create_default`](Self::create_default) directly: no creation
    /// lock is taken and the construction instrumentation point does not
    /// fire, since this is an explicit operation, not the lazy fallback.
    fn push_default_singleton() {
        Self::push_singleton(Self::create_default());
    }

    /// Removes and discards the top override. Once the stack empties, the
    /// base slot is exposed exactly as it was before any push.
    ///
    /// # Errors
    ///
    /// [`SingletonError::PushPop`] when no override is stacked.
    fn pop_singleton() -> Result<(), SingletonError> {
        Self::lifecycle().pop()
    }

    /// Number of unmatched pushes; 0 whenever no override is active.
    fn singleton_stack_depth() -> usize {
        Self::lifecycle().stack_depth()
    }

    /// Attaches an observer invoked with a [`LifecycleEvent`] on every state
    /// transition of this type's cell.
    ///
    /// # Safety Restrictions
    ///
    /// [`LifecycleEvent::Construct`] is delivered while the creation lock is
    /// held, so the callback must not call
    /// [`get_singleton`](Self::get_singleton) on the same type; that would
    /// deadlock. Probing operations are safe to call from the callback.
    fn set_lifecycle_observer(callback: impl Fn(&LifecycleEvent) + Send + Sync + 'static) {
        Self::lifecycle().set_observer(callback);
    }

    /// Detaches the observer. Later transitions emit nothing.
    fn clear_lifecycle_observer() {
        Self::lifecycle().clear_observer();
    }
}
