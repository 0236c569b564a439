//! Change Feed Demo
//!
//! Feeds a burst of rapid document edits through a debounced observable,
//! the way an editor would coalesce keystrokes into autosaves. Shows
//! trailing and leading windows side by side, plus the deprecation
//! side-channel.

use reverb_core::{
    DebounceConfig, EventLog, MemoryDiagnostics, Registry, Settings, Timers,
};
use std::rc::Rc;

#[derive(Debug, Clone)]
struct Change {
    document: String,
    revision: u64,
}

fn main() {
    println!("=== Reverb Change Feed Demo ===\n");

    let timers = Timers::new();
    let diagnostics = MemoryDiagnostics::new();
    let mut registry: Registry<Change> =
        Registry::with_diagnostics(timers.clone(), Rc::new(diagnostics.clone()));

    // The feed owner records every change; observables only read it
    let log = EventLog::new();
    log.push(Change {
        document: "notes.md".into(),
        revision: 0,
    });

    // Autosave: trailing window, fires once the typing burst goes quiet
    let autosave = registry
        .create(
            log.clone(),
            Settings::new().with_debounce(DebounceConfig::trailing(250)),
        )
        .expect("create autosave observable")
        .id();

    registry
        .expose(autosave)
        .expect("expose autosave")
        .react(|handle, change| {
            println!(
                "  autosave: {} at revision {}",
                change.document, change.revision
            );
            if let Some(origin) = handle.first() {
                println!("            (feed opened at revision {})", origin.revision);
            }
        });

    // Status bar: leading window, reacts to the first change immediately
    // and ignores the rest of the burst
    let status = registry
        .create(
            log.clone(),
            Settings::new().with_debounce(DebounceConfig::leading(250)),
        )
        .expect("create status observable")
        .id();

    registry
        .expose(status)
        .expect("expose status")
        .react(|_, change| {
            println!("  status:   editing {}...", change.document);
        });

    println!("typing burst, one keystroke every 50ms:");
    for revision in 1..=8 {
        let change = Change {
            document: "notes.md".into(),
            revision,
        };
        log.push(change.clone());
        registry.update(autosave, change.clone()).expect("route change");
        registry.update(status, change).expect("route change");
        timers.advance(50);
    }

    println!("pause, 250ms of quiet:");
    timers.advance(250);

    println!("\none more edit after the pause:");
    let change = Change {
        document: "notes.md".into(),
        revision: 9,
    };
    log.push(change.clone());
    registry.update(autosave, change.clone()).expect("route change");
    registry.update(status, change).expect("route change");
    timers.advance(250);

    // Legacy consumer registering through the deprecated path
    registry
        .expose(autosave)
        .expect("expose autosave")
        .reject(|_, _| {});

    println!("\ndiagnostics collected:");
    for warning in diagnostics.warnings() {
        println!("  warn: {}", warning);
    }
}
