//! Failure types surfaced by [`LazyResult`](super::LazyResult).

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A stored failure cause.
///
/// Causes are shared, so every surfacing of a memoized failure refers to the
/// identical error value.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Converts any boxable error into a [`Cause`].
///
/// Strings are accepted as well and become opaque message-only errors.
pub fn into_cause<E>(error: E) -> Cause
where
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    Arc::from(error.into())
}

/// A descriptive failure with an optional captured backtrace.
///
/// The backtrace is only recorded when backtraces are enabled through
/// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`.
///
/// # Examples
///
/// ```rust
/// use verity::control::Failure;
///
/// let failure = Failure::new("connection reset");
/// assert_eq!(failure.to_string(), "connection reset");
/// assert_eq!(failure.message(), "connection reset");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
    trace: Option<Arc<Backtrace>>,
}

impl Failure {
    /// Creates a failure, capturing a backtrace when enabled.
    pub fn new(message: impl Into<String>) -> Self {
        let backtrace = Backtrace::capture();
        let trace = (backtrace.status() == BacktraceStatus::Captured).then(|| Arc::new(backtrace));
        Self {
            message: message.into(),
            trace,
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The backtrace captured at construction, if any.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.trace.as_deref()
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for Failure {}

impl Value for Failure {
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self)
    }
}

/// The wrapper returned when forcing a failed [`LazyResult`](super::LazyResult).
///
/// Each failed force produces a fresh `AwaitFailure` around the stored
/// cause. [`source`](StdError::source) returns the cause itself, and
/// [`root_cause`](Self::root_cause) descends through nested wrappers.
///
/// # Examples
///
/// ```rust
/// use verity::control::{Failure, LazyResult};
///
/// let result: LazyResult<i32> = LazyResult::failure(Failure::new("boom"));
/// let first = result.force().unwrap_err();
/// let second = result.force().unwrap_err();
///
/// assert!(first.is_same_cause(&second));
/// assert_eq!(first.root_cause().to_string(), "boom");
/// ```
#[derive(Clone)]
pub struct AwaitFailure {
    cause: Cause,
}

impl AwaitFailure {
    /// Wraps a cause.
    pub fn new(cause: Cause) -> Self {
        Self { cause }
    }

    /// The wrapped cause.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Unwraps this layer, returning the cause.
    pub fn into_cause(self) -> Cause {
        self.cause
    }

    /// Returns `true` if both wrappers hold the identical cause.
    pub fn is_same_cause(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cause, &other.cause)
    }

    /// The innermost cause that is not itself an `AwaitFailure`.
    pub fn root_cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        let mut current: &(dyn StdError + Send + Sync + 'static) = self.cause.as_ref();
        while let Some(wrapper) = current.downcast_ref::<Self>() {
            current = wrapper.cause.as_ref();
        }
        current
    }

    /// Finds a cause of type `K`, descending through nested wrappers.
    ///
    /// ```rust
    /// use verity::control::{AwaitFailure, Failure, into_cause};
    ///
    /// let inner = AwaitFailure::new(into_cause(Failure::new("inner")));
    /// let outer = AwaitFailure::new(into_cause(inner));
    ///
    /// assert_eq!(outer.find::<Failure>().map(Failure::message), Some("inner"));
    /// assert!(outer.find::<std::fmt::Error>().is_none());
    /// ```
    pub fn find<K: StdError + 'static>(&self) -> Option<&K> {
        find_cause(&self.cause)
    }
}

pub(super) fn find_cause<K: StdError + 'static>(cause: &Cause) -> Option<&K> {
    let mut current: &(dyn StdError + Send + Sync + 'static) = cause.as_ref();
    loop {
        if let Some(found) = current.downcast_ref::<K>() {
            return Some(found);
        }
        current = current.downcast_ref::<AwaitFailure>()?.cause.as_ref();
    }
}

impl fmt::Display for AwaitFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "lazy result failed: {}", self.cause)
    }
}

impl fmt::Debug for AwaitFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AwaitFailure")
            .field("cause", &self.cause)
            .finish()
    }
}

impl StdError for AwaitFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}

impl Value for AwaitFailure {
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self)
    }
}
