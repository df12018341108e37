//! Customer entity and its variants
//!
//! A [`Customer`] is the common contact record plus exactly one
//! [`CustomerKind`]. The variants add their own fields and behavior:
//!
//! - **Standard**: loyalty points that can be accumulated and redeemed
//! - **Premium**: an exclusive discount in `[0, 100]` and a membership date
//! - **Corporate**: company name, company national ID and a primary contact
//!
//! Every constructor validates its input and fails on the first violation, so
//! no partially-built record is ever observable. Setters re-run the same
//! validator before mutating; a rejected value leaves the field unchanged.

use crate::core::validation::{
    check_in_range, format_national_id, normalize_national_id, validate_email,
    validate_national_id, validate_non_empty_text, validate_phone, DATE_FORMAT,
};
use crate::types::RegistryError;
use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;

/// Default discount for new premium customers (10.0%)
pub const DEFAULT_PREMIUM_DISCOUNT: Decimal = Decimal::from_parts(100, 0, 0, false, 1);

/// Variant tag of a customer
///
/// The tag is what the flat-file `type` column carries. Unknown or blank tags
/// read back as [`CustomerType::Base`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerType {
    /// Plain customer with no extra fields
    Base,
    /// Customer collecting loyalty points
    Standard,
    /// Customer with an exclusive discount
    Premium,
    /// Company customer
    Corporate,
}

impl CustomerType {
    /// Tag written to the `type` column
    pub fn tag(self) -> &'static str {
        match self {
            CustomerType::Base => "",
            CustomerType::Standard => "Regular",
            CustomerType::Premium => "Premium",
            CustomerType::Corporate => "Corporativo",
        }
    }

    /// Parse a `type` column value, falling back to `Base`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "Regular" => CustomerType::Standard,
            "Premium" => CustomerType::Premium,
            "Corporativo" => CustomerType::Corporate,
            _ => CustomerType::Base,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            CustomerType::Base => "Customer",
            CustomerType::Standard => "Standard",
            CustomerType::Premium => "Premium",
            CustomerType::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Common, validated contact fields shared by every variant
///
/// The email is stored lowercased and acts as the identity key in a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    name: String,
    email: String,
    phone: String,
    address: String,
}

impl Contact {
    /// Validate and build the common fields
    ///
    /// Validation order is name, email, phone, address; the first failure
    /// wins.
    ///
    /// # Errors
    ///
    /// - `DataInvalid` for a blank name or address
    /// - `InvalidEmail` / `InvalidPhone` for malformed contact data
    pub fn new(name: &str, email: &str, phone: &str, address: &str) -> Result<Self, RegistryError> {
        let (name, email, phone, address) = (name.trim(), email.trim(), phone.trim(), address.trim());
        validate_non_empty_text(name, "name")?;
        validate_email(email)?;
        validate_phone(phone)?;
        validate_non_empty_text(address, "address")?;

        Ok(Contact {
            name: name.to_string(),
            email: email.to_lowercase(),
            phone: phone.to_string(),
            address: address.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_name(&mut self, value: &str) -> Result<(), RegistryError> {
        let value = value.trim();
        validate_non_empty_text(value, "name")?;
        self.name = value.to_string();
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> Result<(), RegistryError> {
        let value = value.trim();
        validate_email(value)?;
        self.email = value.to_lowercase();
        Ok(())
    }

    pub fn set_phone(&mut self, value: &str) -> Result<(), RegistryError> {
        let value = value.trim();
        validate_phone(value)?;
        self.phone = value.to_string();
        Ok(())
    }

    pub fn set_address(&mut self, value: &str) -> Result<(), RegistryError> {
        let value = value.trim();
        validate_non_empty_text(value, "address")?;
        self.address = value.to_string();
        Ok(())
    }

    fn render(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nAddress: {}",
            self.name, self.email, self.phone, self.address
        )
    }
}

/// Loyalty data of a standard customer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StandardProfile {
    loyalty_points: u64,
}

impl StandardProfile {
    pub fn loyalty_points(&self) -> u64 {
        self.loyalty_points
    }

    pub fn set_loyalty_points(&mut self, points: u64) {
        self.loyalty_points = points;
    }

    /// Add `amount` points to the running total
    ///
    /// # Errors
    ///
    /// `DataInvalid` when `amount` is zero or the total would overflow.
    pub fn accumulate_points(&mut self, amount: u64) -> Result<(), RegistryError> {
        if amount == 0 {
            return Err(RegistryError::data_invalid("points", "must be a number > 0"));
        }

        self.loyalty_points = self
            .loyalty_points
            .checked_add(amount)
            .ok_or_else(|| RegistryError::data_invalid("points", "total would overflow"))?;

        Ok(())
    }

    /// Subtract `amount` points from the running total
    ///
    /// # Errors
    ///
    /// - `DataInvalid` when `amount` is zero
    /// - `RedemptionFailure` when `amount` exceeds the available points; the
    ///   total is left untouched
    pub fn redeem_points(&mut self, amount: u64) -> Result<(), RegistryError> {
        if amount == 0 {
            return Err(RegistryError::data_invalid("points", "must be a number > 0"));
        }

        if amount > self.loyalty_points {
            return Err(RegistryError::redemption_failure(
                self.loyalty_points,
                amount,
            ));
        }

        self.loyalty_points -= amount;
        Ok(())
    }
}

/// Discount data of a premium customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumProfile {
    exclusive_discount: Decimal,
    membership_since: NaiveDate,
}

impl PremiumProfile {
    /// Exclusive discount in percent
    pub fn exclusive_discount(&self) -> Decimal {
        self.exclusive_discount
    }

    pub fn membership_since(&self) -> NaiveDate {
        self.membership_since
    }

    pub fn set_exclusive_discount(&mut self, discount: Decimal) -> Result<(), RegistryError> {
        self.exclusive_discount = check_discount(discount)?;
        Ok(())
    }

    pub fn set_membership_since(&mut self, date: NaiveDate) {
        self.membership_since = date;
    }

    /// Whole months between the membership date and `today`, floored at 0
    pub fn tenure_months_at(&self, today: NaiveDate) -> u32 {
        let years = i64::from(today.year()) - i64::from(self.membership_since.year());
        let months = i64::from(today.month()) - i64::from(self.membership_since.month());

        u32::try_from((years * 12 + months).max(0)).unwrap_or(u32::MAX)
    }

    /// Membership tenure in months as of the local current date
    pub fn tenure_months(&self) -> u32 {
        self.tenure_months_at(Local::now().date_naive())
    }

    /// `amount` reduced by the exclusive discount
    pub fn apply_discount(&self, amount: Decimal) -> Decimal {
        amount * (Decimal::ONE - self.exclusive_discount / Decimal::ONE_HUNDRED)
    }

    /// Benefits a premium customer enjoys, as display lines
    pub fn benefits(&self, today: NaiveDate) -> Vec<String> {
        vec![
            format!("Exclusive discount of {}%", self.exclusive_discount),
            "Priority support 24/7".to_string(),
            "Free shipping on every purchase".to_string(),
            "Access to exclusive products".to_string(),
            "Personal advisory".to_string(),
            format!("Member for {} months", self.tenure_months_at(today)),
        ]
    }
}

/// Company data of a corporate customer
///
/// The company ID is kept normalized: no dots or spaces, uppercase check
/// character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorporateProfile {
    company_name: String,
    company_id: String,
    primary_contact: String,
}

impl CorporateProfile {
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Normalized company ID, e.g. `12345678-5`
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    /// Company ID rendered with dot grouping, e.g. `12.345.678-5`
    pub fn formatted_company_id(&self) -> String {
        format_national_id(&self.company_id)
    }

    pub fn primary_contact(&self) -> &str {
        &self.primary_contact
    }

    pub fn set_company_name(&mut self, value: &str) -> Result<(), RegistryError> {
        let value = value.trim();
        validate_non_empty_text(value, "company_name")?;
        self.company_name = value.to_string();
        Ok(())
    }

    pub fn set_company_id(&mut self, value: &str) -> Result<(), RegistryError> {
        validate_national_id(value)?;
        self.company_id = normalize_national_id(value);
        Ok(())
    }

    pub fn set_primary_contact(&mut self, value: &str) -> Result<(), RegistryError> {
        let value = value.trim();
        validate_non_empty_text(value, "primary_contact")?;
        self.primary_contact = value.to_string();
        Ok(())
    }
}

/// Variant part of a customer
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerKind {
    Base,
    Standard(StandardProfile),
    Premium(PremiumProfile),
    Corporate(CorporateProfile),
}

/// Tax-relevant data of a corporate customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxProfile {
    pub company_name: String,
    /// Dot-grouped company ID
    pub company_id: String,
    pub primary_contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A customer record: common contact fields plus one variant
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    contact: Contact,
    kind: CustomerKind,
}

impl Customer {
    /// Customer with no variant-specific fields
    pub fn base(contact: Contact) -> Self {
        Customer {
            contact,
            kind: CustomerKind::Base,
        }
    }

    /// Standard customer starting at `loyalty_points`
    pub fn standard(contact: Contact, loyalty_points: u64) -> Self {
        Customer {
            contact,
            kind: CustomerKind::Standard(StandardProfile { loyalty_points }),
        }
    }

    /// Premium customer
    ///
    /// A missing `membership_since` defaults to the local current date.
    ///
    /// # Errors
    ///
    /// `DataInvalid` when the discount lies outside `[0, 100]`.
    pub fn premium(
        contact: Contact,
        exclusive_discount: Decimal,
        membership_since: Option<NaiveDate>,
    ) -> Result<Self, RegistryError> {
        let exclusive_discount = check_discount(exclusive_discount)?;
        let membership_since = membership_since.unwrap_or_else(|| Local::now().date_naive());

        Ok(Customer {
            contact,
            kind: CustomerKind::Premium(PremiumProfile {
                exclusive_discount,
                membership_since,
            }),
        })
    }

    /// Corporate customer
    ///
    /// Fields are validated in order company name, company ID, primary
    /// contact.
    ///
    /// # Errors
    ///
    /// - `DataInvalid` for a blank company name or contact
    /// - `InvalidId` for a malformed or checksum-invalid company ID
    pub fn corporate(
        contact: Contact,
        company_name: &str,
        company_id: &str,
        primary_contact: &str,
    ) -> Result<Self, RegistryError> {
        let (company_name, primary_contact) = (company_name.trim(), primary_contact.trim());
        validate_non_empty_text(company_name, "company_name")?;
        validate_national_id(company_id)?;
        validate_non_empty_text(primary_contact, "primary_contact")?;

        Ok(Customer {
            contact,
            kind: CustomerKind::Corporate(CorporateProfile {
                company_name: company_name.to_string(),
                company_id: normalize_national_id(company_id),
                primary_contact: primary_contact.to_string(),
            }),
        })
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut Contact {
        &mut self.contact
    }

    pub fn kind(&self) -> &CustomerKind {
        &self.kind
    }

    pub fn customer_type(&self) -> CustomerType {
        match self.kind {
            CustomerKind::Base => CustomerType::Base,
            CustomerKind::Standard(_) => CustomerType::Standard,
            CustomerKind::Premium(_) => CustomerType::Premium,
            CustomerKind::Corporate(_) => CustomerType::Corporate,
        }
    }

    pub fn name(&self) -> &str {
        self.contact.name()
    }

    /// Normalized (lowercase) email
    pub fn email(&self) -> &str {
        self.contact.email()
    }

    pub fn phone(&self) -> &str {
        self.contact.phone()
    }

    pub fn address(&self) -> &str {
        self.contact.address()
    }

    pub fn as_standard(&self) -> Option<&StandardProfile> {
        match &self.kind {
            CustomerKind::Standard(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_standard_mut(&mut self) -> Option<&mut StandardProfile> {
        match &mut self.kind {
            CustomerKind::Standard(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_premium(&self) -> Option<&PremiumProfile> {
        match &self.kind {
            CustomerKind::Premium(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_premium_mut(&mut self) -> Option<&mut PremiumProfile> {
        match &mut self.kind {
            CustomerKind::Premium(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_corporate(&self) -> Option<&CorporateProfile> {
        match &self.kind {
            CustomerKind::Corporate(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn as_corporate_mut(&mut self) -> Option<&mut CorporateProfile> {
        match &mut self.kind {
            CustomerKind::Corporate(profile) => Some(profile),
            _ => None,
        }
    }

    /// Tax data, available for corporate customers only
    pub fn tax_profile(&self) -> Option<TaxProfile> {
        self.as_corporate().map(|corporate| TaxProfile {
            company_name: corporate.company_name.clone(),
            company_id: corporate.formatted_company_id(),
            primary_contact: corporate.primary_contact.clone(),
            email: self.email().to_string(),
            phone: self.phone().to_string(),
            address: self.address().to_string(),
        })
    }

    /// Multi-line description of the record as of `today`
    ///
    /// Common fields come first (name, email, phone, address), followed by
    /// the variant fields:
    /// - Standard: loyalty points
    /// - Premium: discount, membership date, tenure in months
    /// - Corporate: company name, dot-grouped company ID, primary contact
    pub fn render_info_at(&self, today: NaiveDate) -> String {
        let common = self.contact.render();

        match &self.kind {
            CustomerKind::Base => common,
            CustomerKind::Standard(standard) => format!(
                "=== STANDARD CUSTOMER ===\n{}\nLoyalty Points: {}",
                common, standard.loyalty_points
            ),
            CustomerKind::Premium(premium) => format!(
                "=== PREMIUM CUSTOMER ===\n{}\nExclusive Discount: {}%\nMember Since: {}\nTenure: {} months",
                common,
                premium.exclusive_discount,
                premium.membership_since.format(DATE_FORMAT),
                premium.tenure_months_at(today)
            ),
            CustomerKind::Corporate(corporate) => format!(
                "=== CORPORATE CUSTOMER ===\n{}\nCompany: {}\nCompany ID: {}\nPrimary Contact: {}",
                common,
                corporate.company_name,
                corporate.formatted_company_id(),
                corporate.primary_contact
            ),
        }
    }

    /// Multi-line description as of the local current date
    pub fn render_info(&self) -> String {
        self.render_info_at(Local::now().date_naive())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} customer {} <{}>",
            self.customer_type(),
            self.name(),
            self.email()
        )
    }
}

fn check_discount(discount: Decimal) -> Result<Decimal, RegistryError> {
    check_in_range(
        discount,
        "exclusive_discount",
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
    )
}
