//! Basic usage example for singleton-lifecycle.
//!
//! Demonstrates:
//! - Wiring a type to its lifecycle with `impl_singleton!`
//! - Lazy construction on first `get_singleton()` (returns `Arc<T>`)
//! - Explicit assignment with `set_singleton()` and its usage errors
//! - Probing with `has_singleton()` without triggering construction
//!
//! Run with: `cargo run --example basic_usage`

use singleton_lifecycle::{impl_singleton, Singleton};
use std::sync::Arc;

// Custom struct to demonstrate lazy construction with a custom factory
#[derive(Debug)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

impl_singleton!(AppConfig, || AppConfig {
    name: "MyApp".to_string(),
    version: 1,
    debug_mode: false,
});

// A second type with explicit assignment instead of lazy construction
#[derive(Debug, Default)]
struct FeatureFlags {
    experimental_ui: bool,
}

impl_singleton!(FeatureFlags);

fn main() {
    println!("=== singleton-lifecycle: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Probe before construction
    // -------------------------------------------------------------------------
    println!("1. Probing before anything is set...");

    println!("   AppConfig::has_singleton()    = {}", AppConfig::has_singleton());
    println!("   FeatureFlags::has_singleton() = {}", FeatureFlags::has_singleton());

    // -------------------------------------------------------------------------
    // 2. Lazy construction on first get
    // -------------------------------------------------------------------------
    println!("\n2. First get_singleton() constructs the default...");

    let config: Arc<AppConfig> = AppConfig::get_singleton();
    println!(
        "   AppConfig = {} v{} (debug_mode: {})",
        config.name, config.version, config.debug_mode
    );
    println!("   has_singleton() is now {}", AppConfig::has_singleton());

    // -------------------------------------------------------------------------
    // 3. Later gets return the same instance
    // -------------------------------------------------------------------------
    println!("\n3. Later gets share the same allocation...");

    let again = AppConfig::get_singleton();
    println!("   same instance: {}", Arc::ptr_eq(&config, &again));

    // -------------------------------------------------------------------------
    // 4. Explicit assignment
    // -------------------------------------------------------------------------
    println!("\n4. Assigning FeatureFlags explicitly...");

    FeatureFlags::set_singleton(FeatureFlags {
        experimental_ui: true,
    })
    .unwrap();
    println!(
        "   FeatureFlags {{ experimental_ui: {} }}",
        FeatureFlags::get_singleton().experimental_ui
    );

    // -------------------------------------------------------------------------
    // 5. Usage errors are typed and synchronous
    // -------------------------------------------------------------------------
    println!("\n5. Misuse surfaces as typed errors...");

    match FeatureFlags::set_singleton(FeatureFlags::default()) {
        Ok(()) => println!("   unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    match AppConfig::set_singleton(AppConfig::create_default()) {
        Ok(()) => println!("   unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 6. Clearing returns a type to the unset mode
    // -------------------------------------------------------------------------
    println!("\n6. Clearing FeatureFlags...");

    FeatureFlags::clear_singleton().unwrap();
    println!("   has_singleton() = {}", FeatureFlags::has_singleton());

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Example Complete ===");
    println!("AppConfig keeps its lazily constructed instance; FeatureFlags is unset again.");
}
