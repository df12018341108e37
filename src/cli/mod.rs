// CLI module
// Command-line interface, argument parsing and the command runner

mod args;

pub use args::{CliArgs, Command, CustomerKindArg, NewCustomerArgs};

use crate::core::audit::TracingAuditSink;
use crate::core::customer_store::CustomerStore;
use crate::io::backup::create_backup;
use crate::io::report::render_corporate_invoice;
use crate::types::{Customer, ImportStats, RegistryError, StandardProfile};
use chrono::Local;
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// --help), clap displays an error message or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Execute one command against the store file
///
/// The store file is loaded first (a missing file means an empty registry).
/// Commands that change records export the store afterwards, creating its
/// directory if needed. When the load skipped rows, the store file is copied
/// to a timestamped backup before it is overwritten. Human-readable output
/// goes to `output`.
///
/// # Errors
///
/// Whatever the store operation or the output writer returns.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), RegistryError> {
    let config = args.to_config();
    let mut store = CustomerStore::with_tracing(&config.store_path);

    let loaded = store.load()?;
    if skipped_rows(&loaded) {
        tracing::warn!(%loaded, "store file has rows that could not be loaded");
    }

    match &args.command {
        Command::List => {
            let customers = store.list();
            if customers.is_empty() {
                writeln!(output, "No customers registered")?;
            }
            for customer in customers {
                writeln!(output, "{}\n", customer.render_info())?;
            }
        }
        Command::Find { query } => match store.find(query) {
            Some(customer) => writeln!(output, "{}", customer.render_info())?,
            None => writeln!(output, "No customer matches '{query}'")?,
        },
        Command::Add { kind, details } => {
            let customer = details.build((*kind).into())?;
            let summary = customer.to_string();
            store.add(customer)?;
            persist(&store, &loaded)?;
            writeln!(output, "Added {summary}")?;
        }
        Command::Update { email, assignments } => {
            let applied = store.update(email, assignments.iter().map(|(k, v)| (k, v)))?;
            persist(&store, &loaded)?;
            if applied.is_empty() {
                writeln!(output, "No applicable fields for {email}")?;
            } else {
                let names: Vec<&str> = applied.iter().map(|field| field.name()).collect();
                writeln!(output, "Updated {email}: {}", names.join(", "))?;
            }
        }
        Command::Delete { email } => {
            let removed = store.delete(email)?;
            persist(&store, &loaded)?;
            writeln!(output, "Deleted {removed}")?;
        }
        Command::Redeem { email, points } => {
            let balance = store.with_customer_mut(email, |customer| {
                let standard = standard_profile(customer)?;
                standard.redeem_points(*points)?;
                Ok(standard.loyalty_points())
            })?;
            persist(&store, &loaded)?;
            writeln!(output, "Redeemed {points} points, balance {balance}")?;
        }
        Command::Accumulate { email, points } => {
            let balance = store.with_customer_mut(email, |customer| {
                let standard = standard_profile(customer)?;
                standard.accumulate_points(*points)?;
                Ok(standard.loyalty_points())
            })?;
            persist(&store, &loaded)?;
            writeln!(output, "Added {points} points, balance {balance}")?;
        }
        Command::Import { path } => {
            let stats = store.import_from_file(path)?;
            persist(&store, &loaded)?;
            writeln!(output, "Import finished: {stats}")?;
        }
        Command::Export => {
            persist(&store, &loaded)?;
            writeln!(
                output,
                "Exported {} customers to {}",
                store.len(),
                store.store_path().display()
            )?;
        }
        Command::Report => {
            ensure_parent_dir(&config.report_path)?;
            let report = store.write_report(&config.report_path)?;
            write!(output, "{report}")?;
        }
        Command::Invoice {
            email,
            number,
            amount,
            description,
        } => {
            let customer = store
                .find(email)
                .ok_or_else(|| RegistryError::not_found(email))?;
            let invoice = render_corporate_invoice(
                customer,
                number,
                *amount,
                description,
                Local::now().naive_local(),
            )?;
            write!(output, "{invoice}")?;
        }
    }

    Ok(())
}

fn standard_profile(customer: &mut Customer) -> Result<&mut StandardProfile, RegistryError> {
    let email = customer.email().to_string();
    customer.as_standard_mut().ok_or_else(|| {
        RegistryError::data_invalid(
            "loyalty_points",
            format!("{email} is not a standard customer"),
        )
    })
}

fn skipped_rows(loaded: &ImportStats) -> bool {
    loaded.errors > 0 || loaded.duplicates > 0
}

/// Export the store, keeping the previous file as a backup when its load
/// skipped rows
fn persist(
    store: &CustomerStore<TracingAuditSink>,
    loaded: &ImportStats,
) -> Result<(), RegistryError> {
    ensure_parent_dir(store.store_path())?;
    if skipped_rows(loaded) {
        if let Some(backup) = create_backup(store.store_path(), Local::now().naive_local())? {
            tracing::warn!(backup = %backup.display(), "previous store file kept as backup");
        }
    }
    store.export_to_file()
}

fn ensure_parent_dir(path: &Path) -> Result<(), RegistryError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}
