//! Customer Registry CLI
//!
//! Command-line interface for managing customer records kept in a flat file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- list
//! cargo run -- add standard --name "Ana Perez" --email ana@example.com \
//!     --phone +56912345678 --address "Calle 1" --points 120
//! cargo run -- update ana@example.com phone=0987654321 loyalty_points=200
//! cargo run -- import incoming.csv
//! cargo run -- --store other/customers.csv report
//! ```
//!
//! Each invocation loads the store file, runs one command and, when records
//! changed, writes the store file back.
//!
//! # Logging
//!
//! Audit entries and diagnostics go to stderr through `tracing`. The filter
//! is read from `RUST_LOG` and defaults to `info,customer_registry=debug`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (validation failure, record not found, file not readable, etc.)

use customer_registry::cli;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,customer_registry=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
