//! Domain layer for the sales system.
//!
//! This crate provides the entity model and the stateless services over it:
//! - [`Customer`], [`Product`], [`Order`] and [`OrderItem`] entities
//! - [`Address`] and [`Money`] value objects
//! - [`OrderService`] and [`ProductService`]
//!
//! Entities are validated on construction; a value that violates an
//! invariant never escapes a constructor.

pub mod customer;
pub mod entity;
pub mod error;
pub mod order;
pub mod product;
pub mod service;
pub mod value_objects;

pub use common::{CustomerId, OrderId, OrderItemId, ProductId};
pub use customer::Customer;
pub use entity::Entity;
pub use error::{DomainError, PreconditionError, ValidationError};
pub use order::{Order, OrderItem};
pub use product::Product;
pub use service::{OrderService, ProductService, REWARD_POINTS_PERCENTAGE};
pub use value_objects::{Address, Money};
