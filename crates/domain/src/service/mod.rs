//! Stateless domain services operating over the entity model.

mod order;
mod product;

pub use order::{OrderService, REWARD_POINTS_PERCENTAGE};
pub use product::ProductService;
