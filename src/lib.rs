//! # verity
//!
//! Assertion, comparison and deferred-computation primitives shared between
//! test and production code.
//!
//! ## Overview
//!
//! - **Comparison**: a runtime-extensible registry dispatching equality and
//!   three-way ordering on pairs of runtime types
//! - **Formatting**: `Message / Expression / Expected / Actual` failure
//!   messages with an injectable value describer
//! - **Control**: `LazyResult`, an at-most-once computation with captured
//!   failures, chaining and typed recovery
//! - **Assertions**: contract checkers that raise typed failures
//!
//! ## Feature Flags
//!
//! - `compare`: the comparison registry
//! - `format`: the message formatter
//! - `control`: `LazyResult`
//! - `assertion`: checkers and contract macros
//! - `serde`: serialization for `Comparison`, `LazyStatus` and
//!   `RegistryOptions`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use verity::prelude::*;
//!
//! let registry = ComparisonRegistry::with_defaults();
//! assert!(registry.are_equal(&5_u8, &5_i32));
//! assert_eq!(registry.compare(&None::<i32>, &1).ok(), Some(Comparison::LessThan));
//!
//! let answer = LazyResult::new(|| "42".parse::<i32>());
//! Precondition::new().assert_equal(&42, &answer.force().unwrap(), ());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use verity::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Comparison;
    pub use crate::value::Value;

    #[cfg(feature = "compare")]
    pub use crate::compare::{ComparisonRegistry, Registration, TypeKey, UnsupportedComparison};

    #[cfg(feature = "format")]
    pub use crate::format::{AssertParameters, MessageFormatter};

    #[cfg(feature = "control")]
    pub use crate::control::{AwaitFailure, Failure, LazyResult};

    #[cfg(feature = "assertion")]
    pub use crate::assertion::{
        AssertionContext, Assertions, Checker, Condition, Postcondition, Precondition,
    };
}

mod comparison;
pub mod value;

pub use comparison::Comparison;

#[cfg(feature = "compare")]
pub mod compare;

#[cfg(feature = "format")]
pub mod format;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "assertion")]
pub mod assertion;
