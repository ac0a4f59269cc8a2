//! Observer and tracing example for singleton-lifecycle.
//!
//! Demonstrates the two observability layers:
//! - the per-type **observer callback**, which receives a `LifecycleEvent`
//!   on every state transition (the `construct` event marks the exact lazy
//!   construction boundary: slow path only, never the fast path)
//! - the `tracing` debug logs the crate emits on every transition, rendered
//!   here with a `tracing-subscriber` fmt layer
//!
//! Run with: `RUST_LOG=debug cargo run --example observer_tracing`

use singleton_lifecycle::{impl_singleton, LifecycleEvent, Singleton};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Telemetry {
    sink: &'static str,
}

impl_singleton!(Telemetry, || Telemetry { sink: "stdout" });

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    println!("=== singleton-lifecycle: Observer & Tracing ===\n");

    // -------------------------------------------------------------------------
    // 1. Attach an observer
    // -------------------------------------------------------------------------
    println!("1. Attaching an observer...");

    Telemetry::set_lifecycle_observer(|event: &LifecycleEvent| {
        println!("   [observer] {}", event);
    });

    // -------------------------------------------------------------------------
    // 2. First get fires the construct event (slow path)
    // -------------------------------------------------------------------------
    println!("\n2. First get_singleton()...");

    let telemetry = Telemetry::get_singleton();
    println!("   sink = {}", telemetry.sink);

    // -------------------------------------------------------------------------
    // 3. Second get is silent (fast path)
    // -------------------------------------------------------------------------
    println!("\n3. Second get_singleton() (no observer output expected)...");

    let _ = Telemetry::get_singleton();

    // -------------------------------------------------------------------------
    // 4. Every explicit transition is observed
    // -------------------------------------------------------------------------
    println!("\n4. Push, pop, clear...");

    Telemetry::push_singleton(Telemetry { sink: "memory" });
    Telemetry::pop_singleton().unwrap();
    Telemetry::clear_singleton().unwrap();

    // -------------------------------------------------------------------------
    // 5. Detach the observer
    // -------------------------------------------------------------------------
    println!("\n5. Detaching (transitions go quiet)...");

    Telemetry::clear_lifecycle_observer();
    Telemetry::push_default_singleton();
    Telemetry::pop_singleton().unwrap();

    println!("\n=== Example Complete ===");
}
