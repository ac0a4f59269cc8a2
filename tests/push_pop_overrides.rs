//! Integration tests for the override stack: push, pop, depth bookkeeping
//! and the protocol errors that guard the base slot while a stack is active.
//!
//! Each test uses its own singleton type, so the tests are free to run in
//! parallel; nothing is shared between them.

use pretty_assertions::assert_eq;
use singleton_lifecycle::{impl_singleton, Singleton, SingletonError};
use std::sync::{Arc, Mutex};

#[test]
fn test_push_shadows_and_pop_restores() {
    #[derive(Default)]
    struct Session(u32);
    impl_singleton!(Session);

    let base = Arc::new(Session(1));
    Session::set_singleton_arc(base.clone()).unwrap();

    let replacement = Arc::new(Session(2));
    Session::push_singleton_arc(replacement.clone());

    assert!(Arc::ptr_eq(&Session::get_singleton(), &replacement));
    assert_eq!(Session::singleton_stack_depth(), 1);

    Session::pop_singleton().unwrap();

    // The base slot was never touched by the push.
    assert!(Arc::ptr_eq(&Session::get_singleton(), &base));
    assert_eq!(Session::singleton_stack_depth(), 0);
}

#[test]
fn test_nested_pushes_unwind_in_order() {
    #[derive(Default)]
    struct Layer(u32);
    impl_singleton!(Layer);

    Layer::set_singleton(Layer(0)).unwrap();
    Layer::push_singleton(Layer(1));
    Layer::push_singleton(Layer(2));
    Layer::push_singleton(Layer(3));

    assert_eq!(Layer::singleton_stack_depth(), 3);
    assert_eq!(Layer::get_singleton().0, 3);

    Layer::pop_singleton().unwrap();
    assert_eq!(Layer::get_singleton().0, 2);

    Layer::pop_singleton().unwrap();
    assert_eq!(Layer::get_singleton().0, 1);

    Layer::pop_singleton().unwrap();
    assert_eq!(Layer::get_singleton().0, 0);
    assert_eq!(Layer::singleton_stack_depth(), 0);
}

#[test]
fn test_depth_counts_unmatched_pushes() {
    #[derive(Default)]
    struct Depth;
    impl_singleton!(Depth);

    Depth::push_default_singleton();
    assert_eq!(Depth::singleton_stack_depth(), 1);

    Depth::push_default_singleton();
    assert_eq!(Depth::singleton_stack_depth(), 2);

    Depth::pop_singleton().unwrap();
    assert_eq!(Depth::singleton_stack_depth(), 1);

    Depth::pop_singleton().unwrap();
    assert_eq!(Depth::singleton_stack_depth(), 0);

    assert!(matches!(
        Depth::pop_singleton(),
        Err(SingletonError::PushPop { .. })
    ));
}

#[test]
fn test_set_and_clear_rejected_while_stacked() {
    #[derive(Default)]
    struct Guarded(u32);
    impl_singleton!(Guarded);

    Guarded::push_default_singleton();

    // Both fail regardless of the base slot state underneath.
    assert!(matches!(
        Guarded::set_singleton(Guarded(9)),
        Err(SingletonError::PushPop { .. })
    ));
    assert!(matches!(
        Guarded::clear_singleton(),
        Err(SingletonError::PushPop { .. })
    ));

    Guarded::pop_singleton().unwrap();

    // With the stack gone and no base, clear reports NotSet instead.
    assert!(matches!(
        Guarded::clear_singleton(),
        Err(SingletonError::NotSet { .. })
    ));
}

#[test]
fn test_pop_to_empty_over_unset_base() {
    #[derive(Default)]
    struct Transient;
    impl_singleton!(Transient);

    Transient::push_default_singleton();
    assert!(Transient::has_singleton());

    Transient::pop_singleton().unwrap();
    assert!(!Transient::has_singleton());
}

/// The full interleaved scenario: lazy construction, mutation through the
/// shared handle, rejected assignment, a push/pop round-trip and the
/// protocol errors along the way.
#[test]
fn test_interleaved_lifecycle_scenario() {
    struct Counter {
        value: Mutex<i32>,
    }

    impl_singleton!(Counter, || Counter {
        value: Mutex::new(0),
    });

    fn current_value() -> i32 {
        *Counter::get_singleton().value.lock().unwrap()
    }

    // Default is constructed automatically on first get.
    assert_eq!(current_value(), 0);

    // Mutating through the shared handle is visible to every later get.
    let default_handle = Counter::get_singleton();
    *default_handle.value.lock().unwrap() = 10;
    assert_eq!(current_value(), 10);

    // Assignment after auto-construction is rejected, base untouched.
    assert!(matches!(
        Counter::set_singleton(Counter { value: Mutex::new(999) }),
        Err(SingletonError::AlreadySet { .. })
    ));
    assert_eq!(current_value(), 10);

    // Push a replacement and observe it.
    Counter::push_singleton(Counter { value: Mutex::new(2000) });
    assert_eq!(current_value(), 2000);
    assert_eq!(Counter::singleton_stack_depth(), 1);

    // Assignment is rejected while the stack is active.
    assert!(matches!(
        Counter::set_singleton(Counter { value: Mutex::new(10) }),
        Err(SingletonError::PushPop { .. })
    ));

    // Pop restores the mutated default, the very same allocation.
    Counter::pop_singleton().unwrap();
    assert_eq!(current_value(), 10);
    assert!(Arc::ptr_eq(&default_handle, &Counter::get_singleton()));
    assert_eq!(Counter::singleton_stack_depth(), 0);

    // The auto-constructed base is not part of the stack.
    assert!(matches!(
        Counter::pop_singleton(),
        Err(SingletonError::PushPop { .. })
    ));
}
