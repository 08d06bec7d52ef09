//! Machines From JSON
//!
//! This demo loads a turnstile from a JSON config and attaches the guard
//! and actions by name.
//!
//! Key concepts:
//! - Declarative configs with named guards and actions
//! - Guarded candidate lists
//! - Targetless transitions
//! - Pure `transition` next to a running service
//!
//! Run with: cargo run --example json_config

use serde_json::json;
use xfsm::config;
use xfsm::core::Callable;

const TURNSTILE: &str = r#"{
    "initial": "locked",
    "context": {"opened": 0},
    "states": {
        "locked": {
            "on": {
                "COIN": [
                    {"target": "unlocked", "cond": "enough"},
                    {"actions": "ask_for_more"}
                ],
                "PUSH": {"actions": "beep"}
            }
        },
        "unlocked": {
            "entry": {"type": "assign", "assignment": {"opened": 1}},
            "on": {
                "PUSH": {"target": "locked", "actions": "count_pass"}
            }
        }
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Turnstile From JSON ===\n");

    let machine = config::from_json_str(TURNSTILE)?
        .action(
            "enough",
            Callable::from_fn(|_, event| event["value"].as_i64().unwrap_or(0) >= 50),
        )
        .action(
            "ask_for_more",
            Callable::effect(|_, event| println!("  {} cents is not enough", event["value"])),
        )
        .action("beep", Callable::effect(|_, _| println!("  *beep*")))
        .action("count_pass", Callable::effect(|_, _| println!("  welcome")))
        .build_machine()?;

    let preview = machine.transition("locked", json!({"type": "COIN", "value": 50}))?;
    println!(
        "Preview of a 50 cent coin: {:?}\n",
        preview.map(|s| s.value)
    );

    let mut service = machine.interpret();
    service.start()?;

    for event in [
        json!("PUSH"),
        json!({"type": "COIN", "value": 25}),
        json!({"type": "COIN", "value": 50}),
        json!("PUSH"),
    ] {
        let result = service.send(event.clone())?;
        println!(
            "{} -> {:?}, context {}",
            event,
            result,
            service.context()
        );
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
