use crate::core::config::{RegistryConfig, DEFAULT_REPORT_PATH, DEFAULT_STORE_PATH};
use crate::core::validation::parse_date;
use crate::types::{Contact, Customer, CustomerType, RegistryError, DEFAULT_PREMIUM_DISCOUNT};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Manage customer records kept in a flat file
#[derive(Parser, Debug)]
#[command(name = "customer-registry")]
#[command(about = "Manage customer records kept in a flat file", long_about = None)]
pub struct CliArgs {
    /// Store file the registry loads on start and exports after changes
    #[arg(
        long = "store",
        value_name = "PATH",
        default_value = DEFAULT_STORE_PATH,
        global = true,
        help = "Path to the customer store file"
    )]
    pub store: PathBuf,

    /// Destination of the statistics report
    #[arg(
        long = "report",
        value_name = "PATH",
        default_value = DEFAULT_REPORT_PATH,
        global = true,
        help = "Path the report command writes to"
    )]
    pub report: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// One registry operation
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show every customer
    List,

    /// Look a customer up by email or part of the name
    Find { query: String },

    /// Register a new customer
    Add {
        #[arg(value_enum)]
        kind: CustomerKindArg,

        #[command(flatten)]
        details: NewCustomerArgs,
    },

    /// Change fields of a customer, given as FIELD=VALUE pairs
    Update {
        email: String,

        #[arg(value_name = "FIELD=VALUE", required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },

    /// Remove a customer
    Delete { email: String },

    /// Redeem loyalty points of a standard customer
    Redeem { email: String, points: u64 },

    /// Credit loyalty points to a standard customer
    Accumulate { email: String, points: u64 },

    /// Import customers from another flat file
    Import { path: PathBuf },

    /// Write the store file
    Export,

    /// Write the statistics report
    Report,

    /// Print an invoice for a corporate customer
    Invoice {
        email: String,
        number: String,
        amount: Decimal,

        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Customer variant accepted by `add`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CustomerKindArg {
    Base,
    Standard,
    Premium,
    Corporate,
}

impl From<CustomerKindArg> for CustomerType {
    fn from(kind: CustomerKindArg) -> Self {
        match kind {
            CustomerKindArg::Base => CustomerType::Base,
            CustomerKindArg::Standard => CustomerType::Standard,
            CustomerKindArg::Premium => CustomerType::Premium,
            CustomerKindArg::Corporate => CustomerType::Corporate,
        }
    }
}

/// Fields of a new customer
///
/// Variant fields that do not apply to the chosen kind are ignored.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct NewCustomerArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: String,

    /// Starting loyalty points (standard)
    #[arg(long)]
    pub points: Option<u64>,

    /// Exclusive discount percentage (premium, default 10.0)
    #[arg(long)]
    pub discount: Option<Decimal>,

    /// Membership start as YYYY-MM-DD (premium, default today)
    #[arg(long)]
    pub since: Option<String>,

    /// Company name (corporate)
    #[arg(long)]
    pub company: Option<String>,

    /// Company national ID (corporate)
    #[arg(long = "company-id")]
    pub company_id: Option<String>,

    /// Primary contact person (corporate)
    #[arg(long)]
    pub contact: Option<String>,
}

impl NewCustomerArgs {
    /// Build and validate the customer these arguments describe
    pub fn build(&self, kind: CustomerType) -> Result<Customer, RegistryError> {
        let contact = Contact::new(&self.name, &self.email, &self.phone, &self.address)?;

        match kind {
            CustomerType::Base => Ok(Customer::base(contact)),
            CustomerType::Standard => Ok(Customer::standard(contact, self.points.unwrap_or(0))),
            CustomerType::Premium => {
                let since = self
                    .since
                    .as_deref()
                    .map(|text| parse_date(text, "membership_since"))
                    .transpose()?;
                Customer::premium(
                    contact,
                    self.discount.unwrap_or(DEFAULT_PREMIUM_DISCOUNT),
                    since,
                )
            }
            CustomerType::Corporate => Customer::corporate(
                contact,
                self.company.as_deref().unwrap_or_default(),
                self.company_id.as_deref().unwrap_or_default(),
                self.contact.as_deref().unwrap_or_default(),
            ),
        }
    }
}

/// Split `FIELD=VALUE` at the first `=`
fn parse_assignment(text: &str) -> Result<(String, String), String> {
    let (field, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{text}'"))?;
    Ok((field.trim().to_string(), value.to_string()))
}

impl CliArgs {
    /// File locations selected on the command line
    pub fn to_config(&self) -> RegistryConfig {
        RegistryConfig::new(self.store.clone(), self.report.clone())
    }
}
