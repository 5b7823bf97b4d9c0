//! Identity trait shared by entities and repository contracts.

/// An object with identity that persists across state changes.
///
/// Repositories key their lookups on [`Entity::Id`] and use
/// [`Entity::entity_type`] when reporting missing records.
pub trait Entity: Clone + Send + Sync {
    /// Strongly-typed identifier.
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync;

    /// Returns the entity type name, e.g. `"Order"`.
    fn entity_type() -> &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
