//! Console button pad.
//!
//! Demonstrates:
//! - Building a Remote with a channel sink
//! - Adding buttons by hand and from presets
//! - Pressing buttons while the connection reconnects in the background
//! - Printing display payloads pushed by the remote
//!
//! Usage:
//!   cargo run --example console_pad
//!   cargo run --example console_pad -- 127.0.0.1:8000/socket
//!   cargo run --example console_pad -- --debug
//!
//! Commands typed on stdin:
//!   list                    show the buttons
//!   add <command>           add a button, label derived from the command
//!   add <label> = <command> add a button with an explicit label
//!   preset <name>           add "navigation" or "multiple windows"
//!   rm <n> [<n> ...]        remove buttons by position
//!   <n>                     press button n
//!   quit                    close the connection and exit

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use replpad::{ButtonRegistry, ChannelSink, Preset, Remote, RemoteHandle, Result, Signal};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Args
// ============================================================================

#[derive(Debug, Clone)]
struct Args {
    debug: bool,
    endpoint: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self {
            debug: args.iter().any(|a| a == "--debug"),
            endpoint: args.into_iter().find(|a| !a.starts_with("--")),
        }
    }
}

fn init_logging(debug: bool) {
    let filter = if debug { "replpad=debug" } else { "replpad=info" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== replpad console ===\n");

    let (sink, mut signals) = ChannelSink::new();
    let mut builder = Remote::builder().sink(Arc::new(sink));
    if let Some(endpoint) = args.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let remote = builder.build()?;

    println!("Endpoint: {}", remote.context().endpoint());
    println!("Reconnect delay: {:?}\n", remote.context().reconnect_delay());

    let handle = remote.spawn()?;
    let mut buttons = remote.button_registry();
    buttons.add_preset(Preset::Navigation);

    // ========================================================================
    // Signal Printer
    // ========================================================================

    tokio::spawn(async move {
        while let Some(signal) = signals.recv().await {
            match signal {
                Signal::ConnectivityChanged(true) => println!("[status] connected"),
                Signal::ConnectivityChanged(false) => println!("[status] disconnected"),
                Signal::DisplayReceived(payload) => println!("[display] {payload}"),
                Signal::ButtonsChanged => {}
            }
        }
    });

    // ========================================================================
    // Command Loop
    // ========================================================================

    print_buttons(&buttons);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line == "quit" {
            break;
        }
        handle_line(line, &mut buttons, &handle).await;
    }

    println!("\n[Cleanup] Closing connection...");
    handle.shutdown().await;
    println!("          ✓ Done");

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

async fn handle_line(line: &str, buttons: &mut ButtonRegistry, handle: &RemoteHandle) {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    match word {
        "" => {}
        "list" => print_buttons(buttons),
        "add" => match rest.split_once(" = ") {
            Some((label, command)) => {
                buttons.add(Some(label), command);
            }
            None => {
                buttons.add(None, rest);
            }
        },
        "preset" => match buttons.add_preset_named(rest) {
            Ok(added) => println!("    ✓ {added} button(s) added"),
            Err(e) => println!("    ✗ {e}"),
        },
        "rm" => {
            let selected = rest.split_whitespace().filter_map(|n| n.parse().ok());
            let removed = buttons.remove_selected(selected);
            println!("    ✓ {removed} button(s) removed");
        }
        _ => match word.parse::<usize>() {
            Ok(index) => {
                if let Err(e) = handle.press(buttons, index).await {
                    println!("    ✗ {e}");
                }
            }
            Err(_) => println!("    ? unknown command: {word}"),
        },
    }
}

fn print_buttons(buttons: &ButtonRegistry) {
    if buttons.is_empty() {
        println!("(no buttons)");
        return;
    }

    for (index, button) in buttons.iter().enumerate() {
        println!("  [{index:>2}] {:<20}  {}", button.label(), button.command());
    }
}
