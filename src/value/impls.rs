//! `Value` implementations for standard library types.

use std::collections::VecDeque;
use std::error::Error as StdError;

use super::{AsValue, Value};
use crate::Comparison;

/// Implements [`Value`](crate::value::Value) for types with `PartialEq` and
/// `PartialOrd`, wiring them into the natural equality and ordering fallbacks.
///
/// Use the `eq:` form for types that only implement `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use verity::impl_value;
/// use verity::compare::ComparisonRegistry;
/// use verity::Comparison;
///
/// #[derive(Debug, PartialEq, PartialOrd)]
/// struct Version(u32, u32);
///
/// #[derive(Debug, PartialEq)]
/// struct Tag(&'static str);
///
/// impl_value!(Version);
/// impl_value!(eq: Tag);
///
/// let registry = ComparisonRegistry::new();
/// assert_eq!(
///     registry.compare(&Version(1, 2), &Version(1, 3)).ok(),
///     Some(Comparison::LessThan)
/// );
/// assert!(registry.are_equal(&Tag("a"), &Tag("a")));
/// assert!(registry.compare(&Tag("a"), &Tag("b")).is_err());
/// ```
#[macro_export]
macro_rules! impl_value {
    (eq: $($type:ty),+ $(,)?) => {
        $(
            impl $crate::value::Value for $type {
                fn natural_equals(&self, other: &dyn $crate::value::Value) -> bool {
                    $crate::value::AsValue::as_any(other)
                        .downcast_ref::<Self>()
                        .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
                }
            }
        )+
    };
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::value::Value for $type {
                fn natural_equals(&self, other: &dyn $crate::value::Value) -> bool {
                    $crate::value::AsValue::as_any(other)
                        .downcast_ref::<Self>()
                        .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
                }

                fn natural_compare(
                    &self,
                    other: &dyn $crate::value::Value,
                ) -> ::core::option::Option<$crate::Comparison> {
                    $crate::value::AsValue::as_any(other)
                        .downcast_ref::<Self>()
                        .and_then(|other| ::core::cmp::PartialOrd::partial_cmp(self, other))
                        .map($crate::Comparison::from)
                }
            }
        )+
    };
}

impl_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);

// =============================================================================
// Text
// =============================================================================

impl Value for String {
    fn is_empty_value(&self) -> Option<bool> {
        Some(self.is_empty())
    }

    fn natural_equals(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn natural_compare(&self, other: &dyn Value) -> Option<Comparison> {
        other
            .as_any()
            .downcast_ref::<Self>()
            .map(|other| Comparison::from(self.cmp(other)))
    }
}

impl Value for &'static str {
    fn is_empty_value(&self) -> Option<bool> {
        Some(self.is_empty())
    }

    fn natural_equals(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn natural_compare(&self, other: &dyn Value) -> Option<Comparison> {
        other
            .as_any()
            .downcast_ref::<Self>()
            .map(|other| Comparison::from(self.cmp(other)))
    }
}

// =============================================================================
// Absence and indirection
// =============================================================================

impl<T: Value> Value for Option<T> {
    fn as_present(&self) -> Option<&dyn Value> {
        self.as_ref().and_then(Value::as_present)
    }
}

impl<T: Value + ?Sized> Value for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn as_present(&self) -> Option<&dyn Value> {
        (**self).as_present()
    }

    fn sequence(&self) -> Option<Vec<&dyn Value>> {
        (**self).sequence()
    }

    fn tuple(&self) -> Option<Vec<&dyn Value>> {
        (**self).tuple()
    }

    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        (**self).as_error()
    }

    fn is_empty_value(&self) -> Option<bool> {
        (**self).is_empty_value()
    }

    fn natural_equals(&self, other: &dyn Value) -> bool {
        (**self).natural_equals(other)
    }

    fn natural_compare(&self, other: &dyn Value) -> Option<Comparison> {
        (**self).natural_compare(other)
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T: Value> Value for Vec<T> {
    fn sequence(&self) -> Option<Vec<&dyn Value>> {
        Some(self.iter().map(AsValue::as_value).collect())
    }
}

impl<T: Value> Value for VecDeque<T> {
    fn sequence(&self) -> Option<Vec<&dyn Value>> {
        Some(self.iter().map(AsValue::as_value).collect())
    }
}

impl<T: Value, const N: usize> Value for [T; N] {
    fn sequence(&self) -> Option<Vec<&dyn Value>> {
        Some(self.iter().map(AsValue::as_value).collect())
    }
}

// =============================================================================
// Tuples
// =============================================================================

macro_rules! impl_tuple_value {
    ($($name:ident . $index:tt),+) => {
        impl<$($name: Value),+> Value for ($($name,)+) {
            fn tuple(&self) -> Option<Vec<&dyn Value>> {
                Some(vec![$(self.$index.as_value()),+])
            }
        }
    };
}

impl_tuple_value!(A.0);
impl_tuple_value!(A.0, B.1);
impl_tuple_value!(A.0, B.1, C.2);
impl_tuple_value!(A.0, B.1, C.2, D.3);
impl_tuple_value!(A.0, B.1, C.2, D.3, E.4);
impl_tuple_value!(A.0, B.1, C.2, D.3, E.4, F.5);
