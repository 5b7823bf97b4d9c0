//! Value objects for the sales domain.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Money amount represented in cents to avoid floating point issues.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a Money amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a Money amount from whole currency units.
    ///
    /// Saturates at the bounds of the cent range.
    pub const fn from_units(units: i64) -> Self {
        Self {
            cents: units.saturating_mul(100),
        }
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-unit portion, truncated toward zero.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after whole units).
    pub fn cents_part(&self) -> i64 {
        (self.cents % 100).abs()
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity, saturating on overflow.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }

    /// Multiplies by a quantity. Returns `None` on overflow.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Money::from_cents)
    }

    /// Returns `percentage` percent of this amount, truncated toward zero.
    ///
    /// Saturates when the result falls outside the cent range.
    pub fn percentage(&self, percentage: i64) -> Money {
        let cents = Self::scaled(self.cents, percentage);
        Money {
            cents: cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
        }
    }

    /// Returns `percentage` percent of this amount. Returns `None` when the
    /// result does not fit.
    pub fn checked_percentage(&self, percentage: i64) -> Option<Money> {
        i64::try_from(Self::scaled(self.cents, percentage))
            .ok()
            .map(Money::from_cents)
    }

    /// Adds two amounts. Returns `None` on overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.cents.checked_add(rhs.cents).map(Money::from_cents)
    }

    // i64 * i64 always fits in i128.
    fn scaled(cents: i64, percentage: i64) -> i128 {
        i128::from(cents) * i128::from(percentage) / 100
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        write!(f, "{sign}${}.{:02}", self.units().abs(), self.cents_part())
    }
}

/// Saturating addition; use [`Money::checked_add`] to detect overflow.
impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents = self.cents.saturating_add(rhs.cents);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Postal address owned by a customer.
///
/// Immutable; replace the whole value to change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("Street", &self.street),
            ("Zip", &self.zip),
            ("City", &self.city),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::AddressFieldRequired { field });
            }
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.number, self.zip, self.city
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_units_and_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.units(), 12);
        assert_eq!(money.cents_part(), 34);
        assert_eq!(Money::from_units(50).cents(), 5000);
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn money_percentage_truncates() {
        assert_eq!(Money::from_units(30).percentage(10), Money::from_units(3));
        assert_eq!(Money::from_cents(999).percentage(10).cents(), 99);
        assert_eq!(Money::from_units(10).percentage(100), Money::from_units(10));
        assert_eq!(Money::from_units(10).percentage(-50), Money::from_units(-5));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let big = Money::from_cents(i64::MAX / 2);
        assert_eq!(big.checked_multiply(3), None);
        assert_eq!(big.checked_multiply(2), Some(Money::from_cents(i64::MAX - 1)));
        assert_eq!(big.checked_add(big), Some(Money::from_cents(i64::MAX - 1)));
        assert_eq!(big.checked_add(Money::from_cents(i64::MAX)), None);

        let ten = Money::from_units(10);
        assert_eq!(ten.checked_percentage(i64::MAX), None);
        assert_eq!(ten.checked_percentage(10), Some(Money::from_units(1)));
    }

    #[test]
    fn unchecked_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX / 2);
        assert_eq!(big.multiply(3).cents(), i64::MAX);
        assert_eq!((big + big + big).cents(), i64::MAX);
        assert_eq!(
            Money::from_units(10).percentage(i64::MAX).cents(),
            i64::MAX
        );
        assert_eq!(Money::from_units(i64::MIN).cents(), i64::MIN);
        assert_eq!(Money::from_cents(i64::MIN).cents_part(), 8);
    }

    #[test]
    fn money_sum_of_empty_is_zero() {
        let total: Money = std::iter::empty().sum();
        assert_eq!(total, Money::zero());

        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);
    }

    #[test]
    fn address_requires_street_zip_and_city() {
        assert_eq!(
            Address::new("", 1, "Zipcode 1", "City 1"),
            Err(ValidationError::AddressFieldRequired { field: "Street" })
        );
        assert_eq!(
            Address::new("Street 1", 1, " ", "City 1"),
            Err(ValidationError::AddressFieldRequired { field: "Zip" })
        );
        assert_eq!(
            Address::new("Street 1", 1, "Zipcode 1", ""),
            Err(ValidationError::AddressFieldRequired { field: "City" })
        );
    }

    #[test]
    fn address_compares_by_value() {
        let a = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        let b = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Street 1, 1, Zipcode 1 City 1");
    }
}
