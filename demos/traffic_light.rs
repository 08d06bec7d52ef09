//! Traffic Light Service
//!
//! This demo runs a cyclic machine through a service.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - Context assignment on entry
//! - Subscribing to committed states
//! - Unknown events leave the state alone
//!
//! Run with: cargo run --example traffic_light

use serde_json::json;
use xfsm::builder::{MachineBuilder, StateNodeBuilder};
use xfsm::core::Callable;
use xfsm::{assign, FsmError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Traffic Light Service ===\n");

    let machine = MachineBuilder::new()
        .initial("green")
        .context(json!({"cycles": 0}))
        .state(
            "green",
            StateNodeBuilder::new()
                .entry(assign! { cycles => |ctx, _| ctx["cycles"].as_i64().unwrap_or(0) + 1 })
                .exit("announce_change")
                .on("NEXT", "yellow"),
        )
        .state(
            "yellow",
            StateNodeBuilder::new()
                .exit("announce_change")
                .on("NEXT", "red"),
        )
        .state("red", StateNodeBuilder::new().on("NEXT", "green"))
        .action(
            "announce_change",
            Callable::effect(|ctx, event| {
                println!("  leaving on {} (cycle {})", event["type"], ctx["cycles"]);
            }),
        )
        .build_machine()?;

    let mut service = machine.interpret();
    let subscription = service.subscribe(|state| {
        println!("  -> {}", state.value);
        Ok(())
    });

    service.start()?;
    for _ in 0..4 {
        service.send("NEXT")?;
    }

    println!("\nUnknown events do not move the light:");
    let result = service.send("BOGUS")?;
    println!("  BOGUS -> {:?}", result);

    subscription.unsubscribe();
    service.send("NEXT")?;
    println!(
        "\nAfter unsubscribing, the light silently moved to {}",
        service.state().map_or("?", |s| s.value.as_str())
    );

    println!("Context: {}", service.context());

    // Plain strings and `{type}` objects are the only valid events.
    match service.send(json!(42)) {
        Err(FsmError::Input(err)) => println!("Rejected event: {err}"),
        other => println!("Unexpected: {other:?}"),
    }

    service.stop();
    println!("\nStatus: {}", service.status());
    println!("\n=== Demo Complete ===");
    Ok(())
}
