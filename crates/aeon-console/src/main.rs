//! AEON console.
//!
//! Usage:
//!   cargo run -p aeon-console
//!
//! Responder, mutation seed and model path come from the environment (see `AeonConfig`).
//! `RUST_LOG=debug` shows protocol matching and discarded feedback.

use std::io::{self, BufRead, Write};

use aeon_console::{render_response, Command, Reply, Session};
use aeon_core::AeonConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[aeon] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AeonConfig::from_env();
    let mut session = Session::from_config(&config)?;

    println!("Welcome to AEON. Enter your emotional state and intent.");
    println!("Responder: {} (type 'help' for commands)", session.kind());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("aeon> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.execute(command) {
            Ok(Reply::Response(response)) => println!("{}", render_response(&response)),
            Ok(Reply::Text(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) => {
                tracing::warn!(error = %e, "command failed");
                println!("{}", e);
            }
        }
    }

    tracing::info!("session closed");
    Ok(())
}
