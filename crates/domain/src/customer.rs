//! Customer entity.

use common::CustomerId;
use serde::Serialize;

use crate::entity::Entity;
use crate::error::{PreconditionError, ValidationError};
use crate::value_objects::Address;

/// A customer who places orders and accumulates reward points.
///
/// A customer starts inactive with no address and zero reward points.
/// Activation requires an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Creates a new inactive customer.
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        validate_name(&self.name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the customer's address, if one has been set.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Renames the customer. The name is unchanged on failure.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Sets or replaces the customer's address.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Accumulates reward points, saturating at `u64::MAX`.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }

    /// Marks the customer active.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError::AddressMandatory`] if no address is set.
    pub fn activate(&mut self) -> Result<(), PreconditionError> {
        if self.address.is_none() {
            return Err(PreconditionError::AddressMandatory);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn entity_type() -> &'static str {
        "Customer"
    }

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap()
    }

    #[test]
    fn new_customer_starts_inactive_without_points() {
        let customer = Customer::new("123", "John").unwrap();
        assert_eq!(customer.id().as_str(), "123");
        assert_eq!(customer.name(), "John");
        assert_eq!(customer.reward_points(), 0);
        assert!(!customer.is_active());
        assert!(customer.address().is_none());
    }

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(
            Customer::new("", "John").unwrap_err(),
            ValidationError::IdRequired
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(
            Customer::new("123", "").unwrap_err(),
            ValidationError::NameRequired
        );
    }

    #[test]
    fn change_name_revalidates() {
        let mut customer = Customer::new("123", "John").unwrap();
        customer.change_name("Jane").unwrap();
        assert_eq!(customer.name(), "Jane");

        assert_eq!(customer.change_name(""), Err(ValidationError::NameRequired));
        assert_eq!(customer.name(), "Jane");
    }

    #[test]
    fn activate_requires_address() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        assert_eq!(customer.activate(), Err(PreconditionError::AddressMandatory));
        assert!(!customer.is_active());

        customer.change_address(address());
        customer.activate().unwrap();
        assert!(customer.is_active());
        assert_eq!(customer.address(), Some(&address()));
    }

    #[test]
    fn deactivate_is_unconditional() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.deactivate();
        assert!(!customer.is_active());

        customer.change_address(address());
        customer.activate().unwrap();
        customer.deactivate();
        assert!(!customer.is_active());
    }

    #[test]
    fn reward_points_accumulate() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.add_reward_points(10);
        assert_eq!(customer.reward_points(), 10);
        customer.add_reward_points(10);
        assert_eq!(customer.reward_points(), 20);

        customer.add_reward_points(u64::MAX);
        assert_eq!(customer.reward_points(), u64::MAX);
    }
}
