//! Contract assertions.
//!
//! A checker evaluates a predicate against a [`ComparisonRegistry`] and, when
//! the predicate does not hold, renders a message with a
//! [`MessageFormatter`] and raises a typed failure on the panic channel.
//!
//! - [`Checker`]: the predicates, shared by every checker
//! - [`Assertions`]: raises whatever its failure constructor builds
//! - [`Condition`], [`Precondition`], [`Postcondition`]: raise
//!   [`AssertionFailure`], [`PreconditionFailure`] and
//!   [`PostconditionFailure`]
//! - [`AssertionContext`]: the registry and formatter a checker uses
//! - [`precondition!`](crate::precondition), [`postcondition!`](crate::postcondition)
//!   and [`condition!`](crate::condition): boolean checks that record the
//!   checked expression
//!
//! Contract failures are programming errors. They are never returned as
//! `Result`s.
//!
//! [`ComparisonRegistry`]: crate::compare::ComparisonRegistry
//! [`MessageFormatter`]: crate::format::MessageFormatter
//!
//! # Examples
//!
//! ```rust
//! use std::panic::{AssertUnwindSafe, catch_unwind};
//!
//! use verity::assertion::{Checker, Precondition, PreconditionFailure};
//! use verity::format::AssertParameters;
//!
//! let precondition = Precondition::new();
//! let payload = catch_unwind(AssertUnwindSafe(|| {
//!     precondition.assert_between(&1, &5, &1, AssertParameters::new().with_newline("; "));
//! }))
//! .unwrap_err();
//!
//! let failure = payload.downcast_ref::<PreconditionFailure>().unwrap();
//! assert_eq!(failure.message(), "Expected: equal to 1; Actual: 5");
//! ```

mod checker;
mod checkers;
mod context;
mod error;
mod macros;

pub use checker::{Checker, Disposable};
pub use checkers::{Assertions, Condition, Postcondition, Precondition};
pub use context::AssertionContext;
pub use error::{AssertionFailure, PostconditionFailure, PreconditionFailure};
