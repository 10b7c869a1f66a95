//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// prices of `800.50` are the same price. Contrast with [`crate::Entity`],
/// where two records with identical fields but different ids are distinct.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
