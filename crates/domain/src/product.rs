//! Product entity.

use common::ProductId;
use serde::Serialize;

use crate::entity::Entity;
use crate::error::ValidationError;
use crate::value_objects::Money;

/// A catalog product with a mutable, non-negative price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a validated product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        let name = name.into();
        validate_name(&name)?;
        validate_price(price)?;
        Ok(Self { id, name, price })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the price. Negative prices are rejected.
    pub fn change_price(&mut self, price: Money) -> Result<(), ValidationError> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn entity_type() -> &'static str {
        "Product"
    }

    fn id(&self) -> &ProductId {
        &self.id
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

fn validate_price(price: Money) -> Result<(), ValidationError> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice {
            cents: price.cents(),
        });
    }
    Ok(())
}
