//! Scoped override example for singleton-lifecycle.
//!
//! Demonstrates the **push/pop override stack**, the pattern this crate was
//! built for: temporarily replacing a singleton (for a test, a simulation, a
//! dry run) and getting the untouched original back afterwards.
//!
//! - `push_singleton()` layers a replacement above the base slot
//! - `pop_singleton()` discards the top layer and exposes what was below
//! - `set_singleton()` / `clear_singleton()` are rejected while a stack is
//!   active, so scoped code cannot be silently overridden
//!
//! Run with: `cargo run --example scoped_override`

use singleton_lifecycle::{impl_singleton, Singleton};
use std::sync::Arc;

/// A mailer service; the real one talks to the network, the fake records.
struct Mailer {
    transport: &'static str,
}

impl Mailer {
    fn send(&self, to: &str) {
        println!("   [{}] sending mail to {}", self.transport, to);
    }
}

impl_singleton!(Mailer, || Mailer { transport: "smtp" });

/// Application code: resolves the mailer through the lifecycle, so it sees
/// whatever layer is currently on top.
fn notify_user(user: &str) {
    Mailer::get_singleton().send(user);
}

fn main() {
    println!("=== singleton-lifecycle: Scoped Override ===\n");

    // -------------------------------------------------------------------------
    // 1. Normal operation uses the lazily constructed base
    // -------------------------------------------------------------------------
    println!("1. Normal operation...");

    notify_user("alice@example.com");
    let base: Arc<Mailer> = Mailer::get_singleton();

    // -------------------------------------------------------------------------
    // 2. Push a fake for a scoped block
    // -------------------------------------------------------------------------
    println!("\n2. Pushing a fake transport...");

    Mailer::push_singleton(Mailer { transport: "memory" });
    println!("   stack depth = {}", Mailer::singleton_stack_depth());

    notify_user("bob@example.com");

    // -------------------------------------------------------------------------
    // 3. Explicit assignment is rejected while the override is active
    // -------------------------------------------------------------------------
    println!("\n3. set_singleton() under an active stack...");

    match Mailer::set_singleton(Mailer { transport: "rogue" }) {
        Ok(()) => println!("   unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // 4. Overrides nest
    // -------------------------------------------------------------------------
    println!("\n4. Nesting a second override...");

    Mailer::push_singleton(Mailer { transport: "null" });
    notify_user("carol@example.com");
    println!("   stack depth = {}", Mailer::singleton_stack_depth());

    // -------------------------------------------------------------------------
    // 5. Pop back down to the untouched base
    // -------------------------------------------------------------------------
    println!("\n5. Popping back down...");

    Mailer::pop_singleton().unwrap();
    notify_user("dave@example.com");

    Mailer::pop_singleton().unwrap();
    notify_user("erin@example.com");

    println!(
        "   base survived untouched: {}",
        Arc::ptr_eq(&base, &Mailer::get_singleton())
    );

    // -------------------------------------------------------------------------
    // 6. Popping an empty stack is an error
    // -------------------------------------------------------------------------
    println!("\n6. One pop too many...");

    match Mailer::pop_singleton() {
        Ok(()) => println!("   unexpected success"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n=== Example Complete ===");
}
