//! Field names accepted by a store update
//!
//! Updates arrive as `field name -> text value` pairs. Each recognized name
//! maps to a [`CustomerField`], and each (variant, field) pair that makes
//! sense maps to a setter. Names that are not recognized, or that do not
//! apply to the record's variant, have no setter and are skipped.

use crate::core::validation::{parse_date, parse_loyalty_points, validate_number_in_range};
use crate::types::{Customer, CustomerType, RegistryError};
use rust_decimal::Decimal;
use std::fmt;

/// Setter invoked for one field of one customer
pub type FieldSetter = fn(&mut Customer, &str) -> Result<(), RegistryError>;

/// Every settable customer field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Address,
    LoyaltyPoints,
    ExclusiveDiscount,
    MembershipSince,
    CompanyName,
    CompanyId,
    PrimaryContact,
}

impl CustomerField {
    pub const ALL: [CustomerField; 10] = [
        CustomerField::Name,
        CustomerField::Email,
        CustomerField::Phone,
        CustomerField::Address,
        CustomerField::LoyaltyPoints,
        CustomerField::ExclusiveDiscount,
        CustomerField::MembershipSince,
        CustomerField::CompanyName,
        CustomerField::CompanyId,
        CustomerField::PrimaryContact,
    ];

    /// Name used in update requests
    pub fn name(self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
            CustomerField::Address => "address",
            CustomerField::LoyaltyPoints => "loyalty_points",
            CustomerField::ExclusiveDiscount => "exclusive_discount",
            CustomerField::MembershipSince => "membership_since",
            CustomerField::CompanyName => "company_name",
            CustomerField::CompanyId => "company_id",
            CustomerField::PrimaryContact => "primary_contact",
        }
    }

    /// Look up a field by its request name
    ///
    /// Returns `None` for unknown names; callers treat that as a no-op.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Setter for this field on a customer of the given variant
    pub fn setter_for(self, customer_type: CustomerType) -> Option<FieldSetter> {
        let setter: FieldSetter = match (customer_type, self) {
            (_, CustomerField::Name) => |c: &mut Customer, v: &str| c.contact_mut().set_name(v),
            (_, CustomerField::Email) => |c: &mut Customer, v: &str| c.contact_mut().set_email(v),
            (_, CustomerField::Phone) => |c: &mut Customer, v: &str| c.contact_mut().set_phone(v),
            (_, CustomerField::Address) => |c: &mut Customer, v: &str| c.contact_mut().set_address(v),
            (CustomerType::Standard, CustomerField::LoyaltyPoints) => set_loyalty_points,
            (CustomerType::Premium, CustomerField::ExclusiveDiscount) => set_exclusive_discount,
            (CustomerType::Premium, CustomerField::MembershipSince) => set_membership_since,
            (CustomerType::Corporate, CustomerField::CompanyName) => set_company_name,
            (CustomerType::Corporate, CustomerField::CompanyId) => set_company_id,
            (CustomerType::Corporate, CustomerField::PrimaryContact) => set_primary_contact,
            _ => return None,
        };
        Some(setter)
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn set_loyalty_points(customer: &mut Customer, value: &str) -> Result<(), RegistryError> {
    let points = parse_loyalty_points(value, "loyalty_points")?;
    if let Some(standard) = customer.as_standard_mut() {
        standard.set_loyalty_points(points);
    }
    Ok(())
}

fn set_exclusive_discount(customer: &mut Customer, value: &str) -> Result<(), RegistryError> {
    let discount = validate_number_in_range(
        value,
        "exclusive_discount",
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
    )?;
    match customer.as_premium_mut() {
        Some(premium) => premium.set_exclusive_discount(discount),
        None => Ok(()),
    }
}

fn set_membership_since(customer: &mut Customer, value: &str) -> Result<(), RegistryError> {
    let date = parse_date(value, "membership_since")?;
    if let Some(premium) = customer.as_premium_mut() {
        premium.set_membership_since(date);
    }
    Ok(())
}

fn set_company_name(customer: &mut Customer, value: &str) -> Result<(), RegistryError> {
    match customer.as_corporate_mut() {
        Some(corporate) => corporate.set_company_name(value),
        None => Ok(()),
    }
}

fn set_company_id(customer: &mut Customer, value: &str) -> Result<(), RegistryError> {
    match customer.as_corporate_mut() {
        Some(corporate) => corporate.set_company_id(value),
        None => Ok(()),
    }
}

fn set_primary_contact(customer: &mut Customer, value: &str) -> Result<(), RegistryError> {
    match customer.as_corporate_mut() {
        Some(corporate) => corporate.set_primary_contact(value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Contact;
    use rstest::rstest;

    fn standard() -> Customer {
        let contact =
            Contact::new("Ana", "ana@example.com", "0912345678", "Calle 1").expect("valid contact");
        Customer::standard(contact, 10)
    }

    #[rstest]
    #[case("name", Some(CustomerField::Name))]
    #[case(" loyalty_points ", Some(CustomerField::LoyaltyPoints))]
    #[case("company_id", Some(CustomerField::CompanyId))]
    #[case("nickname", None)]
    #[case("Name", None)]
    fn test_parse(#[case] name: &str, #[case] expected: Option<CustomerField>) {
        assert_eq!(CustomerField::parse(name), expected);
    }

    #[test]
    fn test_names_round_trip() {
        for field in CustomerField::ALL {
            assert_eq!(CustomerField::parse(field.name()), Some(field));
        }
    }

    #[rstest]
    #[case::common_on_base(CustomerType::Base, CustomerField::Phone, true)]
    #[case::points_on_standard(CustomerType::Standard, CustomerField::LoyaltyPoints, true)]
    #[case::points_on_premium(CustomerType::Premium, CustomerField::LoyaltyPoints, false)]
    #[case::discount_on_premium(CustomerType::Premium, CustomerField::ExclusiveDiscount, true)]
    #[case::company_on_standard(CustomerType::Standard, CustomerField::CompanyName, false)]
    #[case::company_id_on_corporate(CustomerType::Corporate, CustomerField::CompanyId, true)]
    fn test_setter_availability(
        #[case] customer_type: CustomerType,
        #[case] field: CustomerField,
        #[case] available: bool,
    ) {
        assert_eq!(field.setter_for(customer_type).is_some(), available);
    }

    #[test]
    fn test_loyalty_setter_parses_text() {
        let mut customer = standard();
        let setter = CustomerField::LoyaltyPoints
            .setter_for(customer.customer_type())
            .unwrap();

        setter(&mut customer, "75").unwrap();
        assert_eq!(customer.as_standard().unwrap().loyalty_points(), 75);

        assert!(setter(&mut customer, "-5").is_err());
        assert_eq!(customer.as_standard().unwrap().loyalty_points(), 75);
    }
}
