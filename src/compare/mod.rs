//! Type-pair comparison dispatch.
//!
//! This module provides the [`ComparisonRegistry`], which resolves equality
//! and ordering functions for a pair of runtime types:
//!
//! - [`ComparisonRegistry`]: the registry itself
//! - [`TypeKey`]: exact type keys and family keys ([`SEQUENCE`], [`TUPLE`],
//!   [`ERROR`], [`ANY`])
//! - [`Registration`]: revocation token returned by every registration
//! - [`RegistryOptions`]: which default tables a new registry installs
//! - [`UnsupportedComparison`]: the error for pairs without an ordering
//!
//! # Resolution order
//!
//! Equality: identity, then the exact left key (or the first accepting left
//! key), then within it the exact right key (or the first accepting right
//! key), then [`Value::natural_equals`](crate::value::Value::natural_equals).
//!
//! Ordering: the exact pair, then the first pair whose keys accept both
//! operands, then the null rules (absent orders first), then
//! [`Value::natural_compare`](crate::value::Value::natural_compare), and
//! finally [`UnsupportedComparison`].
//!
//! # Examples
//!
//! ```rust
//! use verity::compare::{ComparisonRegistry, SEQUENCE};
//! use verity::Comparison;
//!
//! let registry = ComparisonRegistry::with_defaults();
//!
//! // Cross-width numeric equality
//! assert!(registry.are_equal(&5_u8, &5_i64));
//!
//! // Families act as a common supertype
//! let lexicographic = registry.register_ordering_for(SEQUENCE, SEQUENCE, |lhs, rhs, registry| {
//!     let (lhs, rhs) = (lhs.sequence()?, rhs.sequence()?);
//!     for (left, right) in lhs.iter().zip(&rhs) {
//!         match registry.compare(*left, *right).ok()? {
//!             Comparison::Equal => continue,
//!             other => return Some(other),
//!         }
//!     }
//!     Some(Comparison::from(lhs.len().cmp(&rhs.len())))
//! });
//! assert_eq!(registry.compare(&vec![1, 2], &vec![1, 3]).ok(), Some(Comparison::LessThan));
//!
//! lexicographic.revoke();
//! assert!(registry.compare(&vec![1, 2], &vec![1, 3]).is_err());
//! ```

mod defaults;
mod error;
mod key;
mod registry;

pub use error::UnsupportedComparison;
pub use key::{ANY, ERROR, SEQUENCE, TUPLE, TypeKey};
pub use registry::{ComparisonRegistry, EqualityFn, OrderingFn, Registration, RegistryOptions};
