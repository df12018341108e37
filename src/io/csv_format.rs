//! Flat-file format for customer records
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to customers and back
//! - Store serialization
//!
//! The format has a fixed header and eight columns:
//!
//! ```text
//! type,name,email,phone,address,extra1,extra2,extra3
//! ```
//!
//! The three `extra` slots carry variant fields:
//!
//! | type          | extra1          | extra2          | extra3          |
//! |---------------|-----------------|-----------------|-----------------|
//! | `Regular`     | loyalty points  |                 |                 |
//! | `Premium`     | discount        | membership date |                 |
//! | `Corporativo` | company name    | company ID      | primary contact |
//! | blank/other   |                 |                 |                 |
//!
//! All functions are pure (no file handling) for easy testing.

use crate::core::validation::{
    parse_date, parse_loyalty_points, validate_number_in_range, DATE_FORMAT,
};
use crate::types::{
    Contact, Customer, CustomerKind, CustomerType, RegistryError, DEFAULT_PREMIUM_DISCOUNT,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;

/// Header row written before any record
pub const HEADERS: [&str; 8] = [
    "type", "name", "email", "phone", "address", "extra1", "extra2", "extra3",
];

/// One row of the flat file
///
/// Every column is kept as text; missing trailing columns deserialize as
/// blanks.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub customer_type: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub extra1: String,
    pub extra2: String,
    pub extra3: String,
}

impl CsvRecord {
    /// Columns in header order
    pub fn fields(&self) -> [&str; 8] {
        [
            self.customer_type.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
            self.extra1.as_str(),
            self.extra2.as_str(),
            self.extra3.as_str(),
        ]
    }
}

/// Convert a customer into its flat-file row
pub fn customer_to_record(customer: &Customer) -> CsvRecord {
    let mut record = CsvRecord {
        customer_type: customer.customer_type().tag().to_string(),
        name: customer.name().to_string(),
        email: customer.email().to_string(),
        phone: customer.phone().to_string(),
        address: customer.address().to_string(),
        ..CsvRecord::default()
    };

    match customer.kind() {
        CustomerKind::Base => {}
        CustomerKind::Standard(standard) => {
            record.extra1 = standard.loyalty_points().to_string();
        }
        CustomerKind::Premium(premium) => {
            record.extra1 = premium.exclusive_discount().to_string();
            record.extra2 = premium.membership_since().format(DATE_FORMAT).to_string();
        }
        CustomerKind::Corporate(corporate) => {
            record.extra1 = corporate.company_name().to_string();
            record.extra2 = corporate.company_id().to_string();
            record.extra3 = corporate.primary_contact().to_string();
        }
    }

    record
}

/// Rebuild a customer from a flat-file row
///
/// The common fields are validated first, then the variant fields picked by
/// the `type` column. Blank extras take their defaults: 0 points for a
/// standard customer, a 10.0% discount and today's date for a premium one.
///
/// # Errors
///
/// Whatever validator rejects the row first.
pub fn convert_csv_record(record: &CsvRecord) -> Result<Customer, RegistryError> {
    let contact = Contact::new(
        record.name.trim(),
        record.email.trim(),
        record.phone.trim(),
        record.address.trim(),
    )?;

    let extra1 = record.extra1.trim();
    let extra2 = record.extra2.trim();
    let extra3 = record.extra3.trim();

    match CustomerType::from_tag(&record.customer_type) {
        CustomerType::Base => Ok(Customer::base(contact)),
        CustomerType::Standard => {
            let points = if extra1.is_empty() {
                0
            } else {
                parse_loyalty_points(extra1, "loyalty_points")?
            };
            Ok(Customer::standard(contact, points))
        }
        CustomerType::Premium => {
            let discount = if extra1.is_empty() {
                DEFAULT_PREMIUM_DISCOUNT
            } else {
                validate_number_in_range(
                    extra1,
                    "exclusive_discount",
                    Decimal::ZERO,
                    Decimal::ONE_HUNDRED,
                )?
            };
            let since = if extra2.is_empty() {
                None
            } else {
                Some(parse_date(extra2, "membership_since")?)
            };
            Customer::premium(contact, discount, since)
        }
        CustomerType::Corporate => Customer::corporate(contact, extra1, extra2, extra3),
    }
}

/// Write customers in the flat-file format
///
/// The header row is always written, even for an empty slice. Records keep
/// the order they are given in.
///
/// # Errors
///
/// `Csv` or `Io` when the output cannot be written.
pub fn write_customers_csv(
    customers: &[Customer],
    output: &mut dyn Write,
) -> Result<(), RegistryError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(HEADERS)?;

    for customer in customers {
        writer.write_record(customer_to_record(customer).fields())?;
    }

    writer.flush()?;

    Ok(())
}
