//! Plain-text renderers
//!
//! - [`render_report`] turns a [`Statistics`] snapshot into the summary report
//! - [`render_corporate_invoice`] renders an invoice for a corporate customer
//!
//! Both take the timestamp to print so output is reproducible in tests.

use crate::core::validation::check_positive;
use crate::types::{Customer, RegistryError, Statistics};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn rule() -> String {
    "=".repeat(50)
}

/// Render the statistics report
///
/// Sections, in order: title, timestamp, general counts, per-variant counts,
/// the loyalty points leader and the discount leader.
pub fn render_report(stats: &Statistics, generated_at: NaiveDateTime) -> String {
    let line = rule();
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "{line}");
    let _ = writeln!(out, "CUSTOMER REGISTRY REPORT");
    let _ = writeln!(out, "{line}");
    let _ = writeln!(out, "Generated: {}", generated_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out);
    let _ = writeln!(out, "GENERAL STATISTICS:");
    let _ = writeln!(out, "{line}");
    let _ = writeln!(out, "Total Customers: {}", stats.total);
    let _ = writeln!(out);
    let _ = writeln!(out, "Base Customers: {}", stats.base);
    let _ = writeln!(out, "Standard Customers: {}", stats.standard);
    let _ = writeln!(out, "Premium Customers: {}", stats.premium);
    let _ = writeln!(out, "Corporate Customers: {}", stats.corporate);
    let _ = writeln!(out);
    let _ = writeln!(out, "ADVANCED STATISTICS:");
    let _ = writeln!(out, "{line}");
    let _ = writeln!(
        out,
        "Standard customer with most points: {}",
        stats.max_loyalty_points_holder
    );
    let _ = writeln!(out, "  (Points: {})", stats.max_loyalty_points);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Premium customer with highest discount: {}",
        stats.max_discount_holder
    );
    let _ = writeln!(out, "  (Discount: {}%)", stats.max_discount);
    let _ = writeln!(out);
    let _ = writeln!(out, "{line}");

    out
}

/// Render an invoice for a corporate customer
///
/// A blank description prints as "No description".
///
/// # Errors
///
/// `DataInvalid` when the customer is not corporate or the amount is not
/// positive.
pub fn render_corporate_invoice(
    customer: &Customer,
    number: &str,
    amount: Decimal,
    description: &str,
    issued_at: NaiveDateTime,
) -> Result<String, RegistryError> {
    let tax = customer.tax_profile().ok_or_else(|| {
        RegistryError::data_invalid(
            "customer",
            format!("{} is not a corporate customer", customer.email()),
        )
    })?;
    check_positive(amount, "amount", false)?;

    let description = match description.trim() {
        "" => "No description",
        text => text,
    };

    let line = rule();
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{line}");
    let _ = writeln!(out, "CORPORATE INVOICE");
    let _ = writeln!(out, "{line}");
    let _ = writeln!(out, "Date: {}", issued_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "Invoice Number: {number}");
    let _ = writeln!(out);
    let _ = writeln!(out, "COMPANY:");
    let _ = writeln!(out, "  Name: {}", tax.company_name);
    let _ = writeln!(out, "  Company ID: {}", tax.company_id);
    let _ = writeln!(out, "  Contact: {}", tax.primary_contact);
    let _ = writeln!(out, "  Email: {}", tax.email);
    let _ = writeln!(out, "  Phone: {}", tax.phone);
    let _ = writeln!(out, "  Address: {}", tax.address);
    let _ = writeln!(out);
    let _ = writeln!(out, "DETAILS:");
    let _ = writeln!(out, "  Description: {description}");
    let _ = writeln!(out, "  Total Amount: {}", format_amount(amount));
    let _ = writeln!(out, "{line}");

    Ok(out)
}

/// Format a currency amount as `$1,234.50`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Contact, NO_HOLDER};
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::str::FromStr;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn contact() -> Contact {
        Contact::new("Acme", "billing@acme.cl", "+56922223333", "Av. Norte 100").unwrap()
    }

    #[test]
    fn test_render_report_empty_statistics() {
        let report = render_report(&Statistics::default(), generated_at());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=".repeat(50));
        assert_eq!(lines[1], "CUSTOMER REGISTRY REPORT");
        assert_eq!(lines[3], "Generated: 2024-06-01 14:30:00");
        assert!(report.contains("Total Customers: 0\n"));
        assert!(report.contains(&format!(
            "Standard customer with most points: {NO_HOLDER}\n  (Points: 0)\n"
        )));
        assert!(report.contains(&format!(
            "Premium customer with highest discount: {NO_HOLDER}\n  (Discount: 0%)\n"
        )));
        assert!(report.ends_with(&format!("\n{}\n", "=".repeat(50))));
    }

    #[test]
    fn test_render_report_section_order() {
        let stats = Statistics {
            total: 4,
            base: 1,
            standard: 1,
            premium: 1,
            corporate: 1,
            max_loyalty_points: 300,
            max_loyalty_points_holder: "Ana".to_string(),
            max_discount: Decimal::new(155, 1),
            max_discount_holder: "Luis".to_string(),
        };

        let report = render_report(&stats, generated_at());
        let order = [
            "Generated:",
            "Total Customers: 4",
            "Base Customers: 1",
            "Standard Customers: 1",
            "Premium Customers: 1",
            "Corporate Customers: 1",
            "most points: Ana",
            "(Points: 300)",
            "highest discount: Luis",
            "(Discount: 15.5%)",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| report.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[rstest]
    #[case::plain("1234.5", "$1,234.50")]
    #[case::small("7", "$7.00")]
    #[case::millions("1234567.891", "$1,234,567.89")]
    #[case::round_half_up("0.125", "$0.13")]
    #[case::three_digits("999.999", "$1,000.00")]
    #[case::negative("-2500", "-$2,500.00")]
    fn test_format_amount(#[case] amount: &str, #[case] expected: &str) {
        assert_eq!(format_amount(Decimal::from_str(amount).unwrap()), expected);
    }

    #[test]
    fn test_render_corporate_invoice() {
        let customer = Customer::corporate(contact(), "Acme SpA", "12345678-5", "Eva Soto").unwrap();

        let invoice = render_corporate_invoice(
            &customer,
            "F-001",
            Decimal::new(123450, 2),
            "  ",
            generated_at(),
        )
        .unwrap();

        assert!(invoice.starts_with(&format!("\n{}\nCORPORATE INVOICE\n", "=".repeat(50))));
        assert!(invoice.contains("Invoice Number: F-001\n"));
        assert!(invoice.contains("  Company ID: 12.345.678-5\n"));
        assert!(invoice.contains("  Contact: Eva Soto\n"));
        assert!(invoice.contains("  Description: No description\n"));
        assert!(invoice.contains("  Total Amount: $1,234.50\n"));
    }

    #[rstest]
    #[case::standard(Customer::standard(contact(), 10), Decimal::ONE_HUNDRED)]
    #[case::base(Customer::base(contact()), Decimal::ONE_HUNDRED)]
    #[case::zero_amount(
        Customer::corporate(contact(), "Acme SpA", "12345678-5", "Eva").unwrap(),
        Decimal::ZERO
    )]
    fn test_render_corporate_invoice_rejects(#[case] customer: Customer, #[case] amount: Decimal) {
        let result = render_corporate_invoice(&customer, "1", amount, "", generated_at());
        assert!(matches!(result, Err(RegistryError::DataInvalid { .. })));
    }
}
