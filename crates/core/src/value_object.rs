//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two values with the same attributes are equal.
/// They are **immutable**; to "modify" one, construct a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PostalCode(String);
///
/// impl ValueObject for PostalCode {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
