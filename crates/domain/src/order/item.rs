//! Order line item.

use common::{OrderItemId, ProductId};
use serde::Serialize;

use crate::entity::Entity;
use crate::error::ValidationError;
use crate::product::Product;
use crate::value_objects::Money;

/// A line in an order.
///
/// Name and price are copied from the product when the item is created, so
/// later catalog price changes do not alter historical order totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    id: OrderItemId,
    name: String,
    price: Money,
    product_id: ProductId,
    quantity: u32,
}

impl OrderItem {
    /// Creates a validated order item.
    pub fn new(
        id: impl Into<OrderItemId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<ProductId>,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let product_id = product_id.into();
        if id.is_empty() {
            return Err(ValidationError::IdRequired);
        }
        if product_id.is_empty() {
            return Err(ValidationError::ProductIdRequired);
        }
        if price.is_negative() {
            return Err(ValidationError::NegativePrice {
                cents: price.cents(),
            });
        }
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity { quantity });
        }
        if price.checked_multiply(quantity).is_none() {
            return Err(ValidationError::AmountOverflow);
        }

        Ok(Self {
            id,
            name: name.into(),
            price,
            product_id,
            quantity,
        })
    }

    /// Snapshots a product's current name and price into a new item.
    pub fn from_product(
        id: impl Into<OrderItemId>,
        product: &Product,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            product.name(),
            product.price(),
            product.id().clone(),
            quantity,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price at the time the item was created.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns price × quantity. Exact, since construction rejects overflow.
    pub fn total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

impl Entity for OrderItem {
    type Id = OrderItemId;

    fn entity_type() -> &'static str {
        "OrderItem"
    }

    fn id(&self) -> &OrderItemId {
        &self.id
    }
}
