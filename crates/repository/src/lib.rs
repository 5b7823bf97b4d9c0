//! Persistence layer for the sales domain.
//!
//! - [`Repository`] contract (create/update/find/find_all) per aggregate
//! - Record shapes shared by all backends ([`OrderRecord`], [`OrderItemRecord`], ...)
//! - [`InMemoryOrderRepository`] and friends for tests
//! - [`SqliteOrderRepository`] and friends backed by `sqlx`

pub mod error;
pub mod memory;
pub mod record;
pub mod sqlite;
pub mod store;

pub use error::{RepositoryError, Result};
pub use memory::{InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository};
pub use record::{CustomerRecord, OrderItemRecord, OrderRecord, ProductRecord};
pub use sqlite::{SqliteCustomerRepository, SqliteOrderRepository, SqliteProductRepository};
pub use store::{CustomerRepository, OrderRepository, ProductRepository, Repository, RepositoryExt};
