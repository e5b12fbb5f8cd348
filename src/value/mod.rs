//! Runtime value capabilities.
//!
//! The comparison registry and the message formatter work with values whose
//! concrete types are only known at run time. [`Value`] is the object-safe
//! trait that exposes what they need from such a value:
//!
//! - a stable runtime type identity ([`Value::as_any`], [`Value::type_name`])
//! - a notion of absence ([`Value::as_present`], `None` plays the role of null)
//! - structural views ([`Value::sequence`], [`Value::tuple`], [`Value::as_error`])
//! - fallbacks used when no registered function applies
//!   ([`Value::natural_equals`], [`Value::natural_compare`])
//!
//! Every capability except the identity methods has a default, so user types
//! only override what applies to them. [`impl_value!`](crate::impl_value)
//! implements the trait for types that already have `PartialEq`/`PartialOrd`.
//!
//! # Examples
//!
//! ```rust
//! use verity::value::Value;
//!
//! let present = Some(3);
//! let absent: Option<i32> = None;
//!
//! assert!(present.as_present().is_some());
//! assert!(absent.as_present().is_none());
//! assert_eq!(vec![1, 2].sequence().map(|elements| elements.len()), Some(2));
//! ```

mod impls;

use std::any::{Any, TypeId};
use std::error::Error as StdError;
use std::fmt;

use crate::Comparison;

/// Upcasts implemented for every [`Value`].
///
/// This trait exists so that the default methods of [`Value`] can hand out
/// `&dyn Value` and `&dyn Any` views of `self`. It is implemented by a blanket
/// impl and never needs to be implemented by hand.
pub trait AsValue {
    /// Returns `self` as `&dyn Any` so the concrete type can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` as a `&dyn Value` trait object.
    fn as_value(&self) -> &dyn Value;
}

impl<T: Value> AsValue for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_value(&self) -> &dyn Value {
        self
    }
}

/// A value that can be compared through the registry and described in
/// failure messages.
pub trait Value: AsValue + fmt::Debug + 'static {
    /// The fully qualified name of the concrete type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the value this one stands for, or `None` when it is absent.
    ///
    /// Most types are always present. `Option<T>` returns its contents and
    /// `Box<T>` forwards to the boxed value.
    fn as_present(&self) -> Option<&dyn Value> {
        Some(self.as_value())
    }

    /// Element view of ordered sequences (`Vec`, `VecDeque`, arrays).
    fn sequence(&self) -> Option<Vec<&dyn Value>> {
        None
    }

    /// Positional view of tuple-like values.
    fn tuple(&self) -> Option<Vec<&dyn Value>> {
        None
    }

    /// Error view of failure-like values.
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }

    /// Whether the value is empty, for types that have a notion of emptiness.
    fn is_empty_value(&self) -> Option<bool> {
        self.sequence().map(|elements| elements.is_empty())
    }

    /// Equality used when the registry has no function for the pair.
    ///
    /// The default only recognises identity, which the registry has already
    /// checked, so it returns `false`.
    fn natural_equals(&self, other: &dyn Value) -> bool {
        let _ = other;
        false
    }

    /// Ordering used when the registry has no function for the pair and
    /// neither side is absent. `None` means the pair is not ordered.
    fn natural_compare(&self, other: &dyn Value) -> Option<Comparison> {
        let _ = other;
        None
    }
}

/// Returns the [`TypeId`] of the concrete type behind `value`.
///
/// Calling `type_id()` on a `&dyn Value` directly would yield the id of the
/// trait object type, so lookups always go through [`AsValue::as_any`].
#[inline]
pub fn type_id_of(value: &dyn Value) -> TypeId {
    value.as_any().type_id()
}

/// Returns `true` if both references point at the same value of the same type.
///
/// Identity is address-based. Identical promoted constants and zero-sized
/// values can share an address, so they may report as the same instance.
#[inline]
pub fn is_same_instance(left: &dyn Value, right: &dyn Value) -> bool {
    std::ptr::addr_eq(left as *const dyn Value, right as *const dyn Value)
        && type_id_of(left) == type_id_of(right)
}

/// Strips the module path from a type name, keeping generic arguments.
///
/// ```rust
/// use verity::value::short_type_name;
///
/// assert_eq!(short_type_name("alloc::string::String"), "String");
/// assert_eq!(
///     short_type_name("alloc::vec::Vec<alloc::string::String>"),
///     "Vec<String>"
/// );
/// ```
pub fn short_type_name(full_name: &str) -> String {
    let mut result = String::with_capacity(full_name.len());
    let mut segment = String::new();
    for character in full_name.chars() {
        match character {
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                result.push_str(last_path_segment(&segment));
                segment.clear();
                result.push(character);
            }
            _ => segment.push(character),
        }
    }
    result.push_str(last_path_segment(&segment));
    result
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Opaque;

    impl Value for Opaque {}

    #[rstest]
    fn test_defaults_for_opaque_type() {
        let opaque = Opaque;
        assert!(opaque.as_present().is_some());
        assert!(opaque.sequence().is_none());
        assert!(opaque.tuple().is_none());
        assert!(opaque.as_error().is_none());
        assert!(opaque.is_empty_value().is_none());
        assert!(!opaque.natural_equals(&Opaque));
        assert!(opaque.natural_compare(&Opaque).is_none());
    }

    #[rstest]
    fn test_type_id_of_sees_concrete_type() {
        let boxed: Box<dyn Value> = Box::new(5_i32);
        assert_eq!(type_id_of(boxed.as_ref()), TypeId::of::<i32>());
    }

    #[rstest]
    fn test_is_same_instance() {
        let first = 5_i32;
        let second = 5_i32;
        assert!(is_same_instance(&first, &first));
        assert!(!is_same_instance(&first, &second));
    }

    #[rstest]
    #[case("i32", "i32")]
    #[case("alloc::string::String", "String")]
    #[case("core::option::Option<alloc::vec::Vec<i32>>", "Option<Vec<i32>>")]
    #[case("(i32, alloc::string::String)", "(i32, String)")]
    #[case("&str", "&str")]
    fn test_short_type_name(#[case] full_name: &str, #[case] expected: &str) {
        assert_eq!(short_type_name(full_name), expected);
    }
}
