//! Default function tables.
//!
//! Numeric pairs are compared in the widest representation that holds both
//! operands exactly:
//!
//! | Left / right | Common type |
//! |--------------|-------------|
//! | signed integers and `u8`/`u16`/`u32` | `i64` |
//! | `u64`/`usize` with any unsigned integer | `u64` |
//! | `f32`/`f64` with floats and 8/16/32-bit integers | `f64` |
//!
//! `u64`/`usize` against signed integers, and 64-bit or pointer-width
//! integers against floats, have no lossless common type and are not
//! registered. Comparing them reports an unsupported comparison.

#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_precision_loss)]

use std::error::Error as StdError;

use super::{ComparisonRegistry, ERROR, RegistryOptions, SEQUENCE, TUPLE};
use crate::Comparison;
use crate::value::{Value, type_id_of};

pub(super) fn install(registry: &ComparisonRegistry, options: RegistryOptions) {
    install_signed_pairs(registry, options);
    install_unsigned_wide_pairs(registry, options);
    install_unsigned_narrow_pairs(registry, options);
    install_float_pairs(registry, options);
    install_integer_float_pairs(registry, options);
    install_text_pairs(registry, options);
    if options.equality_defaults {
        install_structural_equality(registry);
    }
}

// =============================================================================
// Numeric
// =============================================================================

fn integers_equal<T: Eq>(lhs: T, rhs: T) -> bool {
    lhs == rhs
}

fn integers_compare<T: Ord>(lhs: T, rhs: T) -> Comparison {
    Comparison::from(lhs.cmp(&rhs))
}

/// NaN equals NaN here so that equality agrees with [`floats_compare`].
fn floats_equal(lhs: f64, rhs: f64) -> bool {
    lhs == rhs || (lhs.is_nan() && rhs.is_nan())
}

/// NaN orders below every number.
fn floats_compare(lhs: f64, rhs: f64) -> Comparison {
    match lhs.partial_cmp(&rhs) {
        Some(ordering) => Comparison::from(ordering),
        None => match (lhs.is_nan(), rhs.is_nan()) {
            (true, true) => Comparison::Equal,
            (true, false) => Comparison::LessThan,
            _ => Comparison::GreaterThan,
        },
    }
}

macro_rules! numeric_pairs {
    ($group:ident via $common:ty, $equal:ident, $compare:ident: [$($left:ty),+] x $rights:tt) => {
        paste::paste! {
            fn [<install_ $group _pairs>](registry: &ComparisonRegistry, options: RegistryOptions) {
                $(
                    numeric_pairs!(@row registry, options, $common, $equal, $compare, $left, $rights);
                )+
            }
        }
    };
    (@row $registry:ident, $options:ident, $common:ty, $equal:ident, $compare:ident, $left:ty, [$($right:ty),+]) => {
        $(
            if $options.equality_defaults {
                $registry.install_equality::<$left, $right, _>(|lhs, rhs| {
                    $equal(*lhs as $common, *rhs as $common)
                });
            }
            if $options.ordering_defaults {
                $registry.install_ordering::<$left, $right, _>(|lhs, rhs| {
                    $compare(*lhs as $common, *rhs as $common)
                });
            }
        )+
    };
}

numeric_pairs!(signed via i64, integers_equal, integers_compare:
    [i8, i16, i32, i64, isize, u8, u16, u32] x [i8, i16, i32, i64, isize, u8, u16, u32]);

numeric_pairs!(unsigned_wide via u64, integers_equal, integers_compare:
    [u64, usize] x [u8, u16, u32, u64, usize]);

numeric_pairs!(unsigned_narrow via u64, integers_equal, integers_compare:
    [u8, u16, u32] x [u64, usize]);

numeric_pairs!(float via f64, floats_equal, floats_compare:
    [f32, f64] x [f32, f64, i8, i16, i32, u8, u16, u32]);

numeric_pairs!(integer_float via f64, floats_equal, floats_compare:
    [i8, i16, i32, u8, u16, u32] x [f32, f64]);

// =============================================================================
// Text
// =============================================================================

fn install_text_pairs(registry: &ComparisonRegistry, options: RegistryOptions) {
    if options.equality_defaults {
        registry.install_equality(|lhs: &String, rhs: &&'static str| lhs == rhs);
        registry.install_equality(|lhs: &&'static str, rhs: &String| lhs == rhs);
    }
    if options.ordering_defaults {
        registry.install_ordering(|lhs: &String, rhs: &&'static str| {
            Comparison::from(lhs.as_str().cmp(*rhs))
        });
        registry.install_ordering(|lhs: &&'static str, rhs: &String| {
            Comparison::from((*lhs).cmp(rhs.as_str()))
        });
    }
}

// =============================================================================
// Structural
// =============================================================================

fn install_structural_equality(registry: &ComparisonRegistry) {
    registry
        .register_equality_for(SEQUENCE, SEQUENCE, sequences_equal)
        .persist();
    registry
        .register_equality_for(TUPLE, TUPLE, tuples_equal)
        .persist();
    registry
        .register_equality_for(ERROR, ERROR, errors_equal)
        .persist();
}

fn elements_equal(
    lhs: Option<Vec<&dyn Value>>,
    rhs: Option<Vec<&dyn Value>>,
    registry: &ComparisonRegistry,
) -> bool {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => {
            lhs.len() == rhs.len()
                && lhs
                    .iter()
                    .zip(&rhs)
                    .all(|(left, right)| registry.are_equal(*left, *right))
        }
        _ => false,
    }
}

/// Same length and pairwise equal elements.
fn sequences_equal(lhs: &dyn Value, rhs: &dyn Value, registry: &ComparisonRegistry) -> bool {
    elements_equal(lhs.sequence(), rhs.sequence(), registry)
}

/// Same arity and pairwise equal positions.
fn tuples_equal(lhs: &dyn Value, rhs: &dyn Value, registry: &ComparisonRegistry) -> bool {
    elements_equal(lhs.tuple(), rhs.tuple(), registry)
}

/// Same concrete type, same message, and equal chains of sources.
fn errors_equal(lhs: &dyn Value, rhs: &dyn Value, _: &ComparisonRegistry) -> bool {
    if type_id_of(lhs) != type_id_of(rhs) {
        return false;
    }
    match (lhs.as_error(), rhs.as_error()) {
        (Some(lhs), Some(rhs)) => error_chains_equal(lhs, rhs),
        _ => false,
    }
}

fn error_chains_equal(lhs: &(dyn StdError + 'static), rhs: &(dyn StdError + 'static)) -> bool {
    if lhs.to_string() != rhs.to_string() {
        return false;
    }
    match (lhs.source(), rhs.source()) {
        (None, None) => true,
        (Some(lhs), Some(rhs)) => error_chains_equal(lhs, rhs),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::TypeKey;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, Comparison::Equal)]
    #[case(-0.0, 0.0, Comparison::Equal)]
    #[case(f64::NAN, f64::NAN, Comparison::Equal)]
    #[case(f64::NAN, f64::NEG_INFINITY, Comparison::LessThan)]
    #[case(1.0, f64::NAN, Comparison::GreaterThan)]
    fn test_floats_compare(#[case] lhs: f64, #[case] rhs: f64, #[case] expected: Comparison) {
        assert_eq!(floats_compare(lhs, rhs), expected);
    }

    #[rstest]
    fn test_floats_equal_treats_nan_as_equal() {
        assert!(floats_equal(f64::NAN, f64::NAN));
        assert!(!floats_equal(f64::NAN, 0.0));
    }

    #[rstest]
    fn test_ambiguous_pairs_are_not_registered() {
        let registry = ComparisonRegistry::with_defaults();
        assert!(!registry.has_ordering(TypeKey::of::<u64>(), TypeKey::of::<i64>()));
        assert!(!registry.has_ordering(TypeKey::of::<i32>(), TypeKey::of::<usize>()));
        assert!(!registry.has_equality(TypeKey::of::<i64>(), TypeKey::of::<f64>()));
        assert!(registry.has_equality(TypeKey::of::<u32>(), TypeKey::of::<i64>()));
        assert!(registry.has_ordering(TypeKey::of::<u8>(), TypeKey::of::<u64>()));
    }

    #[rstest]
    fn test_options_select_tables() {
        let equality_only = ComparisonRegistry::with_options(RegistryOptions {
            equality_defaults: true,
            ordering_defaults: false,
        });
        assert!(equality_only.equality_count() > 0);
        assert_eq!(equality_only.ordering_count(), 0);

        let empty = ComparisonRegistry::with_options(RegistryOptions::empty());
        assert_eq!(empty.equality_count(), 0);
        assert_eq!(empty.ordering_count(), 0);
    }

    #[rstest]
    fn test_pair_counts() {
        let registry = ComparisonRegistry::with_defaults();
        let numeric = 64 + 10 + 6 + 16 + 12;
        assert_eq!(registry.ordering_count(), numeric + 2);
        assert_eq!(registry.equality_count(), numeric + 2 + 3);
    }
}
