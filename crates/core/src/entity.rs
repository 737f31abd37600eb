//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Implemented by inventory items, hospitals and swap requests so generic
/// helpers (uniqueness checks, lookups) can work over any of them.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Returns the first identifier that occurs more than once, if any.
pub fn first_duplicate_id<E: Entity>(entities: &[E]) -> Option<&E::Id> {
    let mut seen = std::collections::HashSet::with_capacity(entities.len());
    entities.iter().map(|e| e.id()).find(|id| !seen.insert(*id))
}
