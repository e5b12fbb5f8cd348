#![cfg(feature = "control")]
//! Property-based tests for LazyResult laws.
//!
//! This module verifies that LazyResult satisfies:
//!
//! - **Idempotence**: force() returns the same outcome every time
//! - **Memoization**: the computation runs at most once across clones
//! - **Functor Laws**: identity and composition for map
//! - **Propagation**: failures pass through then/map untouched
//! - **Recovery**: catch recovers exactly the matching failure type

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use verity::control::{Failure, LazyResult};

#[derive(Debug, thiserror::Error)]
#[error("rejected {0}")]
struct Rejected(i32);

// =============================================================================
// Idempotence and Memoization
// =============================================================================

proptest! {
    #[test]
    fn prop_force_is_idempotent(value in any::<i64>(), forces in 1_usize..8) {
        let result = LazyResult::new(move || Ok::<_, Failure>(value));
        for _ in 0..forces {
            prop_assert_eq!(result.force().ok(), Some(value));
        }
    }
}

proptest! {
    #[test]
    fn prop_computation_runs_at_most_once(value in any::<i32>(), clones in 1_usize..5, fail in any::<bool>()) {
        let count = Rc::new(Cell::new(0));
        let observed = Rc::clone(&count);
        let result = LazyResult::new(move || {
            observed.set(observed.get() + 1);
            if fail { Err(Rejected(value)) } else { Ok(value) }
        });

        let handles: Vec<_> = (0..clones).map(|_| result.clone()).collect();
        for handle in &handles {
            let _ = handle.force();
            let _ = handle.force();
        }
        prop_assert_eq!(count.get(), 1);
    }
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_map_identity(value in any::<i32>()) {
        let result = LazyResult::value(value);
        prop_assert_eq!(result.map(|inner| inner).force().ok(), result.force().ok());
    }
}

proptest! {
    #[test]
    fn prop_map_composition(value in -1000_i32..1000) {
        let first = |inner: i32| inner.wrapping_mul(3);
        let second = |inner: i32| inner - 7;

        let composed = LazyResult::value(value).map(move |inner| second(first(inner)));
        let chained = LazyResult::value(value).map(first).map(second);
        prop_assert_eq!(composed.force().ok(), chained.force().ok());
    }
}

// =============================================================================
// Propagation and Recovery
// =============================================================================

proptest! {
    #[test]
    fn prop_failure_propagates_through_chain(code in any::<i32>(), depth in 1_usize..6) {
        let mut result: LazyResult<i32> = LazyResult::failure(Rejected(code));
        for _ in 0..depth {
            result = result.map(|value| value + 1).then(|value| Ok::<_, Failure>(value));
        }
        let failure = result.force().unwrap_err();
        prop_assert_eq!(failure.find::<Rejected>().map(|rejected| rejected.0), Some(code));
    }
}

proptest! {
    #[test]
    fn prop_catch_recovers_only_matching(code in any::<i32>(), matching in any::<bool>()) {
        let result: LazyResult<i32> = if matching {
            LazyResult::failure(Rejected(code))
        } else {
            LazyResult::failure(Failure::new(code.to_string()))
        };
        let recovered = result.catch(|rejected: &Rejected| rejected.0);
        prop_assert_eq!(recovered.force().is_ok(), matching);
        if matching {
            prop_assert_eq!(recovered.force().ok(), Some(code));
        }
    }
}
