#![cfg(feature = "compare")]
//! Property-based tests for ComparisonRegistry laws.
//!
//! This module verifies that the registry satisfies:
//!
//! - **Registered dispatch**: an exact registration decides equality
//! - **Round trip**: register then revoke behaves as never registered
//! - **Null ordering**: absent values order first
//! - **Between**: `is_between` agrees with its definition via `compare`
//! - **Antisymmetry**: swapping operands reverses the comparison
//! - **Cross-width agreement**: numeric defaults agree with `i64`/`f64`

use proptest::prelude::*;
use verity::Comparison;
use verity::compare::ComparisonRegistry;

#[derive(Debug, Clone, Copy)]
struct Cents(i64);

impl verity::value::Value for Cents {}

// =============================================================================
// Registration
// =============================================================================

proptest! {
    #[test]
    fn prop_registered_equality_decides(lhs in any::<i64>(), rhs in any::<i64>(), modulus in 1_i64..100) {
        let registry = ComparisonRegistry::new();
        let _registration = registry.register_equality(move |left: &Cents, right: &Cents| {
            left.0.rem_euclid(modulus) == right.0.rem_euclid(modulus)
        });
        prop_assert_eq!(
            registry.are_equal(&Cents(lhs), &Cents(rhs)),
            lhs.rem_euclid(modulus) == rhs.rem_euclid(modulus)
        );
    }
}

proptest! {
    #[test]
    fn prop_register_then_revoke_round_trips(lhs in any::<i16>(), rhs in any::<u8>(), layers in 1_usize..4) {
        let registry = ComparisonRegistry::with_defaults();
        let before = (registry.are_equal(&lhs, &rhs), registry.compare(&lhs, &rhs));

        let registrations: Vec<_> = (0..layers)
            .flat_map(|_| {
                [
                    registry.register_equality(|_: &i16, _: &u8| true),
                    registry.register_ordering(|_: &i16, _: &u8| Comparison::GreaterThan),
                ]
            })
            .collect();
        for registration in registrations.into_iter().rev() {
            registration.revoke();
        }

        prop_assert_eq!((registry.are_equal(&lhs, &rhs), registry.compare(&lhs, &rhs)), before);
    }
}

// =============================================================================
// Ordering
// =============================================================================

proptest! {
    #[test]
    fn prop_null_orders_first(value in any::<i32>()) {
        let registry = ComparisonRegistry::with_defaults();
        prop_assert_eq!(registry.compare(&None::<i32>, &value), Ok(Comparison::LessThan));
        prop_assert_eq!(registry.compare(&value, &None::<i32>), Ok(Comparison::GreaterThan));
        prop_assert_eq!(registry.compare(&None::<i32>, &None::<u8>), Ok(Comparison::Equal));
    }
}

proptest! {
    #[test]
    fn prop_compare_with_self_is_equal(value in any::<i32>(), text in ".*") {
        let registry = ComparisonRegistry::with_defaults();
        prop_assert_eq!(registry.compare(&value, &value), Ok(Comparison::Equal));
        prop_assert_eq!(registry.compare(&text, &text.clone()), Ok(Comparison::Equal));
    }
}

proptest! {
    #[test]
    fn prop_is_between_matches_definition(lower in any::<i16>(), value in any::<i32>(), upper in any::<u16>()) {
        let registry = ComparisonRegistry::with_defaults();
        let expected = registry.compare(&lower, &value) != Ok(Comparison::GreaterThan)
            && registry.compare(&value, &upper) != Ok(Comparison::GreaterThan);
        prop_assert_eq!(registry.is_between(&lower, &value, &upper), Ok(expected));
    }
}

proptest! {
    #[test]
    fn prop_swapping_operands_reverses(lhs in any::<i8>(), rhs in any::<u32>()) {
        let registry = ComparisonRegistry::with_defaults();
        let forward = registry.compare(&lhs, &rhs);
        let backward = registry.compare(&rhs, &lhs);
        prop_assert_eq!(forward.map(Comparison::reverse), backward);
    }
}

// =============================================================================
// Numeric Defaults
// =============================================================================

proptest! {
    #[test]
    fn prop_integer_widths_agree(lhs in any::<i32>(), rhs in any::<u16>()) {
        let registry = ComparisonRegistry::with_defaults();
        prop_assert_eq!(registry.are_equal(&lhs, &rhs), i64::from(lhs) == i64::from(rhs));
        prop_assert_eq!(
            registry.compare(&lhs, &rhs),
            Ok(Comparison::from(i64::from(lhs).cmp(&i64::from(rhs))))
        );
    }
}

proptest! {
    #[test]
    fn prop_integer_float_agree(lhs in any::<i32>(), rhs in -1.0e10_f64..1.0e10) {
        let registry = ComparisonRegistry::with_defaults();
        let expected = f64::from(lhs).partial_cmp(&rhs).map(Comparison::from);
        prop_assert_eq!(registry.compare(&lhs, &rhs).ok(), expected);
    }
}

proptest! {
    #[test]
    fn prop_sequence_equality_is_elementwise(values in prop::collection::vec(any::<u8>(), 0..16)) {
        let registry = ComparisonRegistry::with_defaults();
        let widened: Vec<i64> = values.iter().copied().map(i64::from).collect();
        prop_assert!(registry.are_equal(&values, &widened));

        let mut longer = widened.clone();
        longer.push(0);
        prop_assert!(!registry.are_equal(&values, &longer));
    }
}
