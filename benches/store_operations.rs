//! Benchmark suite for store operations
//!
//! Measures the scan-based operations of the customer store using the divan
//! benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Datasets
//!
//! Records are generated in memory: a mix of standard, premium and corporate
//! customers with unique emails. Imports read a flat file written to a
//! temporary directory from the same records.

use customer_registry::core::validation::{check_character, validate_national_id};
use customer_registry::{Contact, Customer, CustomerStore, MemoryAuditSink};
use rust_decimal::Decimal;
use tempfile::TempDir;

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn main() {
    divan::main();
}

fn generate(count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            let contact = Contact::new(
                &format!("Customer {i}"),
                &format!("customer{i}@example.com"),
                "+56912345678",
                "Calle 1",
            )
            .expect("valid contact");
            match i % 3 {
                0 => Customer::standard(contact, (i * 7 % 1000) as u64),
                1 => Customer::premium(contact, Decimal::new((i % 1000) as i64, 1), None)
                    .expect("valid premium"),
                _ => {
                    let body = format!("{}", 10_000_000 + i);
                    let id = format!("{body}-{}", check_character(&body));
                    Customer::corporate(contact, "Company", &id, "Contact")
                        .expect("valid corporate")
                }
            }
        })
        .collect()
}

fn populated(count: usize) -> CustomerStore<MemoryAuditSink> {
    let mut store = CustomerStore::new("unused.csv", MemoryAuditSink::new());
    for customer in generate(count) {
        store.add(customer).expect("unique email");
    }
    store
}

/// National ID checksum validation
#[divan::bench]
fn national_id_validation() {
    validate_national_id(divan::black_box("12.345.678-5")).expect("valid id");
}

/// Adding records one by one (each add scans for duplicates)
#[divan::bench(args = SIZES)]
fn add_records(bencher: divan::Bencher, count: usize) {
    bencher
        .with_inputs(|| generate(count))
        .bench_values(|customers| {
            let mut store = CustomerStore::new("unused.csv", MemoryAuditSink::new());
            for customer in customers {
                store.add(customer).expect("unique email");
            }
            store
        });
}

/// Lookup of the last inserted record by email
#[divan::bench(args = SIZES)]
fn find_last_by_email(bencher: divan::Bencher, count: usize) {
    let store = populated(count);
    let email = format!("customer{}@example.com", count - 1);

    bencher.bench(|| {
        store.audit_sink().clear();
        store.find(divan::black_box(&email)).is_some()
    });
}

/// Statistics over the whole store
#[divan::bench(args = SIZES)]
fn statistics(bencher: divan::Bencher, count: usize) {
    let store = populated(count);
    bencher.bench(|| store.statistics());
}

/// Import of an exported store into an empty one
#[divan::bench(args = SIZES)]
fn import_exported_file(bencher: divan::Bencher, count: usize) {
    let dir = TempDir::new().expect("temp dir");
    let source = dir.path().join("source.csv");
    let mut exporter = CustomerStore::new(&source, MemoryAuditSink::new());
    for customer in generate(count) {
        exporter.add(customer).expect("unique email");
    }
    exporter.export_to_file().expect("export");

    bencher.bench(|| {
        let mut store = CustomerStore::new(dir.path().join("target.csv"), MemoryAuditSink::new());
        store.import_from_file(&source).expect("import")
    });
}
