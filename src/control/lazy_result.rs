//! Deferred, memoized computations with captured failures.
//!
//! A [`LazyResult`] is either terminal from the start ([`LazyResult::value`],
//! [`LazyResult::failure`]) or holds a computation that runs on the first
//! [`force`](LazyResult::force). Whatever the computation produces, a value
//! or a failure, is stored and surfaced again by every later force.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use verity::control::{Failure, LazyResult};
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&runs);
//! let parsed = LazyResult::new(move || {
//!     counter.set(counter.get() + 1);
//!     "42".parse::<i32>()
//! });
//!
//! let doubled = parsed.map(|value| value * 2);
//! assert_eq!(runs.get(), 0);
//!
//! assert_eq!(doubled.force().ok(), Some(84));
//! assert_eq!(parsed.force().ok(), Some(42));
//! assert_eq!(runs.get(), 1);
//!
//! let recovered = LazyResult::<i32>::failure(Failure::new("offline"))
//!     .catch(|_: &Failure| -1);
//! assert_eq!(recovered.force().ok(), Some(-1));
//! ```

use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::failure::{AwaitFailure, Cause, find_cause, into_cause};

type Computation<T> = Box<dyn FnOnce() -> Result<T, Cause>>;

enum State<T> {
    Pending(Computation<T>),
    Value(T),
    Failure(Cause),
    Poisoned,
}

/// The observable state of a [`LazyResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LazyStatus {
    /// The computation has not run yet.
    Pending,
    /// A value is stored.
    Value,
    /// A failure is stored.
    Failure,
    /// The computation panicked or is running.
    Poisoned,
}

/// A shared handle to a deferred computation that yields `T` or a failure.
///
/// Cloning the handle shares the memoized outcome: the computation runs at
/// most once across all clones.
///
/// `LazyResult` is neither `Send` nor `Sync`.
pub struct LazyResult<T> {
    state: Rc<RefCell<State<T>>>,
}

impl<T: 'static> LazyResult<T> {
    fn from_state(state: State<T>) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// A result that already holds `value`.
    pub fn value(value: T) -> Self {
        Self::from_state(State::Value(value))
    }

    /// A result that already holds `error` as its failure.
    pub fn failure<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::from_state(State::Failure(into_cause(error)))
    }

    /// A result whose outcome is produced by `computation` on first force.
    ///
    /// Constructing the result never runs the computation.
    pub fn new<F, E>(computation: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + 'static,
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self::from_state(State::Pending(Box::new(move || {
            computation().map_err(into_cause)
        })))
    }

    fn deferred(computation: impl FnOnce() -> Result<T, Cause> + 'static) -> Self {
        Self::from_state(State::Pending(Box::new(computation)))
    }

    /// The current state, without running anything.
    pub fn status(&self) -> LazyStatus {
        match &*self.state.borrow() {
            State::Pending(_) => LazyStatus::Pending,
            State::Value(_) => LazyStatus::Value,
            State::Failure(_) => LazyStatus::Failure,
            State::Poisoned => LazyStatus::Poisoned,
        }
    }

    /// Returns `true` while the computation has not run.
    pub fn is_pending(&self) -> bool {
        self.status() == LazyStatus::Pending
    }

    /// Runs the computation if it is still pending and returns the cause on
    /// failure without wrapping it.
    ///
    /// # Panics
    ///
    /// Panics if the result is poisoned: the computation panicked earlier,
    /// or it is forcing its own result.
    fn evaluate(&self) -> Result<T, Cause>
    where
        T: Clone,
    {
        let computation = {
            let mut state = self.state.borrow_mut();
            match &*state {
                State::Value(value) => return Ok(value.clone()),
                State::Failure(cause) => return Err(Arc::clone(cause)),
                State::Poisoned => panic!("LazyResult instance has been poisoned"),
                State::Pending(_) => {}
            }
            let State::Pending(computation) = std::mem::replace(&mut *state, State::Poisoned) else {
                unreachable!("LazyResult should be pending at this point")
            };
            computation
        };

        tracing::trace!(value_type = std::any::type_name::<T>(), "evaluating lazy result");
        let outcome = computation();

        let mut state = self.state.borrow_mut();
        *state = match &outcome {
            Ok(value) => State::Value(value.clone()),
            Err(cause) => State::Failure(Arc::clone(cause)),
        };
        outcome
    }

    /// Returns the stored value, running the computation first if needed.
    ///
    /// A failure is returned as a fresh [`AwaitFailure`] around the identical
    /// stored cause every time.
    ///
    /// # Panics
    ///
    /// Panics with `LazyResult instance has been poisoned` if the
    /// computation panicked on an earlier force or forces its own result.
    pub fn force(&self) -> Result<T, AwaitFailure>
    where
        T: Clone,
    {
        self.evaluate().map_err(AwaitFailure::new)
    }

    /// Chains a fallible continuation on the value.
    ///
    /// When this result fails, `next` never runs and the child fails with
    /// the same cause.
    pub fn then<U, E, F>(&self, next: F) -> LazyResult<U>
    where
        T: Clone,
        U: 'static,
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
        F: FnOnce(T) -> Result<U, E> + 'static,
    {
        let parent = self.clone();
        LazyResult::deferred(move || next(parent.evaluate()?).map_err(into_cause))
    }

    /// Chains a fallible continuation that ignores the value.
    pub fn then_run<U, E, F>(&self, next: F) -> LazyResult<U>
    where
        T: Clone,
        U: 'static,
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
        F: FnOnce() -> Result<U, E> + 'static,
    {
        let parent = self.clone();
        LazyResult::deferred(move || {
            parent.evaluate()?;
            next().map_err(into_cause)
        })
    }

    /// Transforms the value.
    pub fn map<U, F>(&self, transform: F) -> LazyResult<U>
    where
        T: Clone,
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        let parent = self.clone();
        LazyResult::deferred(move || parent.evaluate().map(transform))
    }

    /// Recovers from failures whose cause is a `K`.
    ///
    /// The cause is searched through any number of nested [`AwaitFailure`]
    /// layers. Other failures propagate unchanged.
    pub fn catch<K, F>(&self, recover: F) -> Self
    where
        T: Clone,
        K: StdError + 'static,
        F: FnOnce(&K) -> T + 'static,
    {
        let parent = self.clone();
        Self::deferred(move || match parent.evaluate() {
            Ok(value) => Ok(value),
            Err(cause) => match find_cause::<K>(&cause) {
                Some(matched) => {
                    tracing::trace!(recovered = std::any::type_name::<K>(), "lazy result recovered");
                    Ok(recover(matched))
                }
                None => Err(cause),
            },
        })
    }

    /// Recovers from failures whose cause is a `K` with `T::default()`.
    pub fn catch_default<K>(&self) -> Self
    where
        T: Clone + Default,
        K: StdError + 'static,
    {
        self.catch(|_: &K| T::default())
    }
}

impl<T> Clone for LazyResult<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: 'static, E> From<Result<T, E>> for LazyResult<T>
where
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::value(value),
            Err(error) => Self::failure(error),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyResult<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => match &*state {
                State::Pending(_) => formatter.write_str("LazyResult(<pending>)"),
                State::Value(value) => formatter.debug_tuple("LazyResult").field(value).finish(),
                State::Failure(cause) => formatter
                    .debug_tuple("LazyResult")
                    .field(&format_args!("<failure: {cause}>"))
                    .finish(),
                State::Poisoned => formatter.write_str("LazyResult(<poisoned>)"),
            },
            Err(_) => formatter.write_str("LazyResult(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Failure;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn counted(counter: &Rc<Cell<usize>>, value: i32) -> LazyResult<i32> {
        let counter = Rc::clone(counter);
        LazyResult::new(move || {
            counter.set(counter.get() + 1);
            Ok::<_, Failure>(value)
        })
    }

    #[rstest]
    fn test_eager_results_are_terminal() {
        assert_eq!(LazyResult::value(3).status(), LazyStatus::Value);
        assert_eq!(
            LazyResult::<i32>::failure(Failure::new("x")).status(),
            LazyStatus::Failure
        );
    }

    #[rstest]
    fn test_computation_runs_once_across_clones() {
        let counter = Rc::new(Cell::new(0));
        let result = counted(&counter, 7);
        let shared = result.clone();
        assert!(result.is_pending());

        assert_eq!(result.force().ok(), Some(7));
        assert_eq!(shared.force().ok(), Some(7));
        assert_eq!(counter.get(), 1);
        assert_eq!(shared.status(), LazyStatus::Value);
    }

    #[rstest]
    fn test_failed_computation_is_memoized() {
        let counter = Rc::new(Cell::new(0));
        let observed = Rc::clone(&counter);
        let result: LazyResult<i32> = LazyResult::new(move || {
            observed.set(observed.get() + 1);
            Err(Failure::new("no route"))
        });

        let first = result.force().unwrap_err();
        let second = result.force().unwrap_err();
        assert!(first.is_same_cause(&second));
        assert_eq!(counter.get(), 1);
        assert_eq!(result.status(), LazyStatus::Failure);
    }

    #[rstest]
    fn test_then_surfaces_single_wrap_layer() {
        let parent: LazyResult<i32> = LazyResult::failure(Failure::new("root"));
        let child = parent.then(|value| Ok::<_, Failure>(value + 1));
        let failure = child.force().unwrap_err();
        assert!(failure.cause().downcast_ref::<Failure>().is_some());
    }

    #[rstest]
    fn test_then_run_ignores_value() {
        let result = LazyResult::value("ignored").then_run(|| Ok::<_, Failure>(5));
        assert_eq!(result.force().ok(), Some(5));
    }

    #[rstest]
    fn test_catch_default() {
        let result: LazyResult<String> = LazyResult::failure(Failure::new("gone"));
        assert_eq!(result.catch_default::<Failure>().force().ok(), Some(String::new()));
    }

    #[rstest]
    fn test_reentrant_force_poisons() {
        let slot: Rc<RefCell<Option<LazyResult<i32>>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let result = LazyResult::new(move || {
            let this = inner.borrow().clone();
            match this {
                Some(this) => this.force().map_err(|failure| failure.into_cause().to_string()),
                None => Ok(0),
            }
        });
        *slot.borrow_mut() = Some(result.clone());

        let outcome = catch_unwind(AssertUnwindSafe(|| result.force()));
        let payload = outcome.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<&str>().copied(),
            Some("LazyResult instance has been poisoned")
        );
        assert_eq!(result.status(), LazyStatus::Poisoned);
        slot.borrow_mut().take();
    }

    #[rstest]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", LazyResult::value(1)), "LazyResult(1)");
        assert_eq!(
            format!("{:?}", LazyResult::new(|| Ok::<i32, Failure>(1))),
            "LazyResult(<pending>)"
        );
    }
}
