//! End-to-end integration tests
//!
//! These tests drive the complete import/export pipeline using predefined
//! CSV fixtures. Each fixture test:
//! 1. Imports input.csv from a fixture directory into an empty store
//! 2. Exports the store to a temporary file
//! 3. Compares the exported file with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Every customer variant
//! - Rows rejected by validation
//! - Duplicate emails
//! - Normalization (case, whitespace, short rows, ID separators)
//!
//! The remaining tests exercise the store's public surface the way a caller
//! would: audit trail, backups, reports and variant behaviors.

#[cfg(test)]
mod tests {
    use customer_registry::core::audit::AuditCategory;
    use customer_registry::io::render_corporate_invoice;
    use customer_registry::{
        CustomerStore, ImportStats, MemoryAuditSink, RegistryError, Statistics,
    };
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn empty_store(dir: &TempDir) -> CustomerStore<MemoryAuditSink> {
        CustomerStore::new(dir.path().join("customers.csv"), MemoryAuditSink::new())
    }

    /// Import a fixture's input.csv into an empty store and compare the
    /// exported file with expected.csv
    ///
    /// # Arguments
    ///
    /// * `fixture_name` - Name of the fixture directory (e.g., "all_variants")
    ///
    /// # Returns
    ///
    /// The import statistics
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read or the export differs from
    /// expected.csv
    fn run_test_fixture(fixture_name: &str) -> ImportStats {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = empty_store(&dir);

        let stats = store
            .import_from_file(Path::new(&input_path))
            .unwrap_or_else(|e| panic!("Failed to import fixture: {}", e));
        store
            .export_to_file()
            .unwrap_or_else(|e| panic!("Failed to export store: {}", e));

        let actual_output = fs::read_to_string(store.store_path())
            .unwrap_or_else(|e| panic!("Failed to read exported file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );

        stats
    }

    #[rstest]
    #[case("all_variants", 4, 4, 0, 0)]
    #[case("invalid_rows", 3, 2, 0, 1)]
    #[case("duplicates", 4, 2, 2, 0)]
    #[case("normalization", 4, 4, 0, 0)]
    #[case("rejected_fields", 6, 1, 0, 5)]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] total: usize,
        #[case] succeeded: usize,
        #[case] duplicates: usize,
        #[case] errors: usize,
    ) {
        let stats = run_test_fixture(fixture);
        assert_eq!(
            stats,
            ImportStats {
                total,
                succeeded,
                duplicates,
                errors
            }
        );
    }

    #[test]
    fn test_export_reimport_is_stable() {
        let dir = TempDir::new().unwrap();
        let mut first = empty_store(&dir);
        first
            .import_from_file(Path::new("tests/fixtures/all_variants/input.csv"))
            .unwrap();
        first.export_to_file().unwrap();

        let other = TempDir::new().unwrap();
        let mut second = empty_store(&other);
        let stats = second.import_from_file(first.store_path()).unwrap();

        assert_eq!(stats.succeeded, 4);
        assert_eq!(second.list(), first.list());
        assert_eq!(second.statistics(), first.statistics());
    }

    #[test]
    fn test_audit_trail_for_import_with_bad_row() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);

        store
            .import_from_file(Path::new("tests/fixtures/invalid_rows/input.csv"))
            .unwrap();

        let sink = store.audit_sink();
        assert_eq!(sink.count(AuditCategory::Error), 1);
        assert_eq!(sink.count(AuditCategory::Import), 1);
        let last = sink.entries().pop().unwrap();
        assert_eq!(last.category, AuditCategory::Import);
        assert!(last.message.contains("total=3, succeeded=2, duplicates=0, errors=1"));
    }

    #[test]
    fn test_second_import_backs_up_and_counts_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let input = Path::new("tests/fixtures/all_variants/input.csv");

        store.import_from_file(input).unwrap();
        store.export_to_file().unwrap();
        let stats = store.import_from_file(input).unwrap();

        assert_eq!(
            stats,
            ImportStats {
                total: 4,
                succeeded: 0,
                duplicates: 4,
                errors: 0
            }
        );
        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("customers_backup_")
            })
            .count();
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_statistics_and_report_from_fixture() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        store
            .import_from_file(Path::new("tests/fixtures/all_variants/input.csv"))
            .unwrap();

        let stats = store.statistics();
        assert_eq!(
            stats,
            Statistics {
                total: 4,
                base: 1,
                standard: 1,
                premium: 1,
                corporate: 1,
                max_loyalty_points: 120,
                max_loyalty_points_holder: "Ana Perez".to_string(),
                max_discount: Decimal::new(155, 1),
                max_discount_holder: "Luis Soto".to_string(),
            }
        );

        let report_path = dir.path().join("summary.txt");
        let report = store.write_report(&report_path).unwrap();
        assert!(report.contains("Standard customer with most points: Ana Perez\n  (Points: 120)"));
        assert!(report.contains("Premium customer with highest discount: Luis Soto\n  (Discount: 15.5%)"));
    }

    #[test]
    fn test_corporate_invoice_from_imported_record() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        store
            .import_from_file(Path::new("tests/fixtures/all_variants/input.csv"))
            .unwrap();

        let acme = store.find("acme").unwrap();
        let issued = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let invoice =
            render_corporate_invoice(acme, "A-100", Decimal::new(98765432, 2), "Consulting", issued)
                .unwrap();

        assert!(invoice.contains("Date: 2024-01-02 03:04:05"));
        assert!(invoice.contains("  Company ID: 12.345.678-5"));
        assert!(invoice.contains("  Address: Av. Norte 100, Of. 5"));
        assert!(invoice.contains("  Total Amount: $987,654.32"));
    }

    #[test]
    fn test_premium_discount_and_standard_points_through_store() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        store
            .import_from_file(Path::new("tests/fixtures/all_variants/input.csv"))
            .unwrap();

        let discounted = store
            .find("luis@example.com")
            .and_then(|c| c.as_premium())
            .map(|p| p.apply_discount(Decimal::ONE_THOUSAND));
        assert_eq!(discounted, Some(Decimal::new(845, 0)));

        let result = store.with_customer_mut("ana@example.com", |c| {
            c.as_standard_mut()
                .ok_or_else(|| RegistryError::data_invalid("loyalty_points", "not standard"))?
                .redeem_points(500)
        });
        assert_eq!(result, Err(RegistryError::redemption_failure(120, 500)));
    }
}
