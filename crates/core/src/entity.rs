//! Entity trait: identity assigned by a repository.

/// Entity marker + minimal interface.
///
/// Entities only exist once a repository has created them; the pre-creation
/// shape of each entity is a separate `New*` type without an identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
