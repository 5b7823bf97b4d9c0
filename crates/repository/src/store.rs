use async_trait::async_trait;
use domain::{Customer, Entity, Order, Product};

use crate::Result;

/// Core persistence contract for an aggregate.
///
/// Implementations translate between the in-memory aggregate and its
/// stored records. Every call is a single logical operation against the
/// storage backend. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persists a new aggregate, including any child records it owns.
    ///
    /// Fails with `AlreadyExists` if the id is taken; other storage
    /// failures are passed through.
    async fn create(&self, entity: &E) -> Result<()>;

    /// Overwrites the stored representation of an existing aggregate.
    ///
    /// Fails with `NotFound` if no record has the entity's id.
    async fn update(&self, entity: &E) -> Result<()>;

    /// Loads an aggregate by id, including its child records.
    ///
    /// Fails with `NotFound` if no record has the given id.
    async fn find(&self, id: &E::Id) -> Result<E>;

    /// Loads every stored aggregate, ordered by id.
    ///
    /// Returns an empty vector when nothing is stored.
    async fn find_all(&self) -> Result<Vec<E>>;
}

/// Repository for [`Order`] aggregates (order + items).
pub trait OrderRepository: Repository<Order> {}

impl<T: Repository<Order> + ?Sized> OrderRepository for T {}

/// Repository for [`Customer`] entities.
pub trait CustomerRepository: Repository<Customer> {}

impl<T: Repository<Customer> + ?Sized> CustomerRepository for T {}

/// Repository for [`Product`] entities.
pub trait ProductRepository: Repository<Product> {}

impl<T: Repository<Product> + ?Sized> ProductRepository for T {}

/// Extension trait providing convenience methods for repositories.
#[async_trait]
pub trait RepositoryExt<E: Entity>: Repository<E> {
    /// Loads an aggregate, mapping `NotFound` to `None`.
    async fn find_optional(&self, id: &E::Id) -> Result<Option<E>> {
        match self.find(id).await {
            Ok(entity) => Ok(Some(entity)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Checks whether an aggregate with this id is stored.
    async fn exists(&self, id: &E::Id) -> Result<bool> {
        Ok(self.find_optional(id).await?.is_some())
    }
}

// Blanket implementation for all Repository implementations
impl<E: Entity, T: Repository<E> + ?Sized> RepositoryExt<E> for T {}
