//! # Singleton Lifecycle
//!
//! A thread-safe, per-type singleton lifecycle manager with three coexisting
//! ownership modes: lazy auto-construction, explicit assignment, and a
//! push/pop override stack for scoped temporary replacement (typically test
//! isolation) that never mutates the base instance underneath.
//!
//! State is associated with the type, not with any instance of it: each type
//! owns one static [`SingletonCell`] holding its base slot, its override
//! stack and the lock that serializes lazy construction. Cells of different
//! types never share a lock, so a slow constructor in one type cannot stall
//! another.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_lifecycle::{impl_singleton, Singleton};
//!
//! #[derive(Default)]
//! struct Config {
//!     verbose: bool,
//! }
//!
//! impl_singleton!(Config);
//!
//! // First access constructs the default instance, exactly once.
//! let config = Config::get_singleton();
//! assert!(!config.verbose);
//!
//! // Later accesses take the fast path and return the same instance.
//! assert!(std::sync::Arc::ptr_eq(&config, &Config::get_singleton()));
//! ```
//!
//! ## Scoped Overrides
//!
//! ```rust
//! use singleton_lifecycle::{impl_singleton, Singleton};
//!
//! struct Clock(&'static str);
//! impl_singleton!(Clock, || Clock("system"));
//!
//! Clock::push_singleton(Clock("frozen"));
//! assert_eq!(Clock::get_singleton().0, "frozen");
//!
//! Clock::pop_singleton().unwrap();
//! assert_eq!(Clock::get_singleton().0, "system");
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: all operations are safe under arbitrary interleaving;
//!   concurrent first-time gets run the factory exactly once
//! - **Double-checked construction**: repeated reads after the first pay no
//!   creation-lock cost and never re-run the factory
//! - **Scoped overrides**: push/pop layers replacements above the base slot
//!   without touching it; explicit assignment is rejected while a stack is
//!   active
//! - **Observable**: an optional per-type observer receives a
//!   [`LifecycleEvent`] on every state transition, including the exact
//!   construction boundary
//!
//! ## Main Items
//!
//! - [`Singleton`] - per-type lifecycle operations and the factory hook
//! - [`impl_singleton!`] - wire a type to its static cell
//! - [`SingletonCell`] - the underlying record, usable without the trait
//! - [`SingletonError`] - typed usage errors
//! - [`LifecycleEvent`] - observer events

mod lifecycle;
mod lifecycle_error;
mod lifecycle_event;
mod macros;
mod singleton_trait;

// Re-export the main public API
pub use lifecycle::{LifecycleMode, LifecycleObserver, SingletonCell};
pub use lifecycle_error::SingletonError;
pub use lifecycle_event::LifecycleEvent;
pub use singleton_trait::Singleton;
