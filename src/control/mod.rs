//! Deferred computations with captured failures.
//!
//! - [`LazyResult`]: a memoized, at-most-once computation yielding a value
//!   or a failure, with chaining and typed recovery
//! - [`AwaitFailure`]: the wrapper surfaced when forcing a failed result
//! - [`Failure`]: a descriptive failure carrying an optional backtrace
//!
//! Evaluation is synchronous: forcing a result runs its computation inline
//! on the calling thread.
//!
//! # Examples
//!
//! ```rust
//! use verity::control::{AwaitFailure, Failure, LazyResult};
//!
//! let config = LazyResult::new(|| -> Result<u16, Failure> { Err(Failure::new("missing port")) });
//! let port = config.then(|port| Ok::<_, Failure>(port + 1));
//!
//! let failure: AwaitFailure = port.force().unwrap_err();
//! assert_eq!(failure.root_cause().to_string(), "missing port");
//!
//! let fallback = port.catch(|_: &Failure| 8080);
//! assert_eq!(fallback.force().ok(), Some(8080));
//! ```

mod failure;
mod lazy_result;

pub use failure::{AwaitFailure, Cause, Failure, into_cause};
pub use lazy_result::{LazyResult, LazyStatus};
