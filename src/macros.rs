//! Macro wiring a type to its static lifecycle cell.
//!
//! Implementing [`crate::Singleton`] by hand means writing the same static
//! cell accessor every time; this module generates it.

/// Implements [`Singleton`](crate::Singleton) for a type with a single macro
/// invocation.
///
/// The macro generates:
/// - a module-private `static` [`SingletonCell`](crate::SingletonCell) owned
///   by the type
/// - the `lifecycle()` accessor returning it
/// - the `create_default()` factory
///
/// With one argument the factory is the type's [`Default`] implementation;
/// a second argument supplies a custom zero-argument factory (a closure or a
/// function path).
///
/// # Examples
///
/// ```rust
/// use singleton_lifecycle::{impl_singleton, Singleton};
///
/// #[derive(Default)]
/// struct Metrics {
///     samples: Vec<u64>,
/// }
///
/// // Factory is `Metrics::default`.
/// impl_singleton!(Metrics);
///
/// assert!(Metrics::get_singleton().samples.is_empty());
/// ```
///
/// # Custom Factory
///
/// ```rust
/// use singleton_lifecycle::{impl_singleton, Singleton};
///
/// struct Paths {
///     root: String,
/// }
///
/// impl_singleton!(Paths, || Paths {
///     root: "/var/lib/app".to_string(),
/// });
///
/// assert_eq!(Paths::get_singleton().root, "/var/lib/app");
/// ```
///
/// # Per-Type Isolation
///
/// Each invocation generates its own static, so every type's slot, stack
/// and creation lock are completely independent:
///
/// ```rust
/// use singleton_lifecycle::{impl_singleton, Singleton};
///
/// #[derive(Default)]
/// struct Database(u8);
/// #[derive(Default)]
/// struct Cache(u8);
///
/// impl_singleton!(Database);
/// impl_singleton!(Cache);
///
/// Database::set_singleton(Database(1)).unwrap();
///
/// // No interference between types.
/// assert!(Database::has_singleton());
/// assert!(!Cache::has_singleton());
/// ```
#[macro_export]
macro_rules! impl_singleton {
    ($ty:ty) => {
        $crate::impl_singleton!($ty, <$ty as ::core::default::Default>::default);
    };
    ($ty:ty, $factory:expr) => {
        impl $crate::Singleton for $ty {
            fn lifecycle() -> &'static $crate::SingletonCell<Self> {
                // One cell per type, created with the program and never torn
                // down; the slot and stack inside start empty.
                static CELL: $crate::SingletonCell<$ty> = $crate::SingletonCell::new();
                &CELL
            }

            fn create_default() -> Self {
                ($factory)()
            }
        }
    };
}
