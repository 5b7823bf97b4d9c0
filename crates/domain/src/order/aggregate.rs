//! Order aggregate implementation.

use common::{CustomerId, OrderId};
use serde::Serialize;

use crate::entity::Entity;
use crate::error::ValidationError;
use crate::value_objects::Money;

use super::OrderItem;

/// Order aggregate root.
///
/// Owns its items; references the customer by id only. The item list is
/// fixed at construction and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a validated order.
    ///
    /// # Errors
    ///
    /// Fails if the id or customer id is empty, or if `items` is empty.
    pub fn new(
        id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if self.customer_id.is_empty() {
            return Err(ValidationError::CustomerIdRequired);
        }
        if self.items.is_empty() {
            return Err(ValidationError::ItemsRequired);
        }
        self.items
            .iter()
            .try_fold(Money::zero(), |sum, item| sum.checked_add(item.total()))
            .ok_or(ValidationError::AmountOverflow)?;
        Ok(())
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Sum of item totals, recomputed on every call.
    ///
    /// Construction rejects item lists whose sum overflows, so this is exact.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Points the order at another customer.
    ///
    /// Whether that customer exists is left to the storage layer.
    pub fn change_customer(
        &mut self,
        customer_id: impl Into<CustomerId>,
    ) -> Result<(), ValidationError> {
        let customer_id = customer_id.into();
        if customer_id.is_empty() {
            return Err(ValidationError::CustomerIdRequired);
        }
        self.customer_id = customer_id;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn entity_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> &OrderId {
        &self.id
    }
}
