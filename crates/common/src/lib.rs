//! Shared identifier types for the sales domain.

mod types;

pub use types::{CustomerId, OrderId, OrderItemId, ProductId};
