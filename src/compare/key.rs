//! Registry keys.
//!
//! A [`TypeKey`] names the left- or right-hand side of a registered function.
//! Exact keys match one concrete type. Family keys match every value a
//! predicate accepts and take the place of a common supertype: the registry
//! consults them, in registration order, only when no exact key matches.

use std::any::TypeId;
use std::fmt;

use crate::value::{Value, type_id_of};

/// Identifies the operand type (or family of types) a function applies to.
#[derive(Clone, Copy)]
pub struct TypeKey {
    name: &'static str,
    kind: KeyKind,
}

#[derive(Clone, Copy)]
enum KeyKind {
    Exact(TypeId),
    Family(fn(&dyn Value) -> bool),
}

impl TypeKey {
    /// The key for exactly the type `T`.
    pub fn of<T: Value>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            kind: KeyKind::Exact(TypeId::of::<T>()),
        }
    }

    /// A named family of types. Two family keys are the same key when their
    /// names are equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verity::compare::TypeKey;
    /// use verity::value::{AsValue, Value};
    ///
    /// fn accepts_text(value: &dyn Value) -> bool {
    ///     value.as_any().is::<String>() || value.as_any().is::<&'static str>()
    /// }
    ///
    /// let text = TypeKey::family("text", accepts_text);
    /// assert!(text.accepts(&String::from("a")));
    /// assert!(!text.accepts(&1));
    /// ```
    pub const fn family(name: &'static str, accepts: fn(&dyn Value) -> bool) -> Self {
        Self {
            name,
            kind: KeyKind::Family(accepts),
        }
    }

    /// The type or family name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is a family key.
    #[inline]
    pub const fn is_family(&self) -> bool {
        matches!(self.kind, KeyKind::Family(_))
    }

    /// The exact [`TypeId`], if this is an exact key.
    #[inline]
    pub const fn exact_id(&self) -> Option<TypeId> {
        match self.kind {
            KeyKind::Exact(type_id) => Some(type_id),
            KeyKind::Family(_) => None,
        }
    }

    /// Whether `value` belongs to this key.
    pub fn accepts(&self, value: &dyn Value) -> bool {
        match self.kind {
            KeyKind::Exact(type_id) => type_id_of(value) == type_id,
            KeyKind::Family(accepts) => accepts(value),
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        match (self.kind, other.kind) {
            (KeyKind::Exact(left), KeyKind::Exact(right)) => left == right,
            (KeyKind::Family(_), KeyKind::Family(_)) => self.name == other.name,
            _ => false,
        }
    }
}

impl Eq for TypeKey {}

impl fmt::Debug for TypeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            KeyKind::Exact(_) => formatter.debug_tuple("Exact").field(&self.name).finish(),
            KeyKind::Family(_) => formatter.debug_tuple("Family").field(&self.name).finish(),
        }
    }
}

// =============================================================================
// Built-in families
// =============================================================================

fn accepts_sequence(value: &dyn Value) -> bool {
    value.sequence().is_some()
}

fn accepts_tuple(value: &dyn Value) -> bool {
    value.tuple().is_some()
}

fn accepts_error(value: &dyn Value) -> bool {
    value.as_error().is_some()
}

const fn accepts_any(_: &dyn Value) -> bool {
    true
}

/// Ordered sequences: every value with a [`Value::sequence`] view.
pub const SEQUENCE: TypeKey = TypeKey::family("sequence", accepts_sequence);

/// Tuple-like values: every value with a [`Value::tuple`] view.
pub const TUPLE: TypeKey = TypeKey::family("tuple", accepts_tuple);

/// Failure-like values: every value with a [`Value::as_error`] view.
pub const ERROR: TypeKey = TypeKey::family("error", accepts_error);

/// Every present value.
pub const ANY: TypeKey = TypeKey::family("any", accepts_any);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_exact_keys_compare_by_type() {
        assert_eq!(TypeKey::of::<i32>(), TypeKey::of::<i32>());
        assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<i64>());
        assert_eq!(TypeKey::of::<i32>().exact_id(), Some(TypeId::of::<i32>()));
    }

    #[rstest]
    fn test_family_keys_compare_by_name() {
        assert_eq!(SEQUENCE, TypeKey::family("sequence", accepts_any));
        assert_ne!(SEQUENCE, TUPLE);
        assert!(SEQUENCE.exact_id().is_none());
    }

    #[rstest]
    fn test_exact_and_family_never_equal() {
        assert_ne!(TypeKey::of::<Vec<i32>>(), SEQUENCE);
    }

    #[rstest]
    fn test_builtin_families_accept_views() {
        assert!(SEQUENCE.accepts(&vec![1]));
        assert!(!SEQUENCE.accepts(&1));
        assert!(TUPLE.accepts(&(1, 2)));
        assert!(!TUPLE.accepts(&[1, 2]));
        assert!(ANY.accepts(&"anything"));
    }

    #[rstest]
    fn test_debug_names_kind() {
        assert_eq!(format!("{SEQUENCE:?}"), "Family(\"sequence\")");
        assert_eq!(format!("{:?}", TypeKey::of::<u8>()), "Exact(\"u8\")");
    }
}
