//! Domain error types.

use thiserror::Error;

/// An entity invariant was violated at construction or mutation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier is empty.
    #[error("Id is required")]
    IdRequired,

    /// Name is empty.
    #[error("Name is required")]
    NameRequired,

    /// Referenced customer id is empty.
    #[error("CustomerId is required")]
    CustomerIdRequired,

    /// Referenced product id is empty.
    #[error("ProductId is required")]
    ProductIdRequired,

    /// Order has no items.
    #[error("Items are required")]
    ItemsRequired,

    /// Quantity below one.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Price below zero.
    #[error("Invalid price: {cents} cents (must not be negative)")]
    NegativePrice { cents: i64 },

    /// Percentage that would drive prices below zero.
    #[error("Invalid percentage: {percentage} (must be at least -100)")]
    InvalidPercentage { percentage: i64 },

    /// A price or total does not fit the cent range.
    #[error("Amount overflow: result exceeds the representable range")]
    AmountOverflow,

    /// Address field is empty.
    #[error("{field} is required")]
    AddressFieldRequired { field: &'static str },
}

/// An operation was attempted while the entity lacks required state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Customer has no address to activate with.
    #[error("Address is mandatory to activate a customer")]
    AddressMandatory,
}

/// Any failure raised by the entity model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),
}
