//! Concrete checkers.

use std::any::Any;
use std::fmt;

use super::{AssertionContext, AssertionFailure, Checker, PostconditionFailure, PreconditionFailure};

/// A checker that raises a caller-chosen failure type.
///
/// `make_failure` turns the formatted message into the panic payload.
///
/// # Examples
///
/// ```rust
/// use std::panic::{AssertUnwindSafe, catch_unwind};
///
/// use verity::assertion::{Assertions, Checker};
///
/// #[derive(Debug)]
/// struct InvariantBroken(String);
///
/// let invariants = Assertions::new(InvariantBroken);
/// let payload = catch_unwind(AssertUnwindSafe(|| {
///     invariants.assert_equal(&1, &2, ());
/// }))
/// .unwrap_err();
///
/// let failure = payload.downcast_ref::<InvariantBroken>().unwrap();
/// assert!(failure.0.contains("Expected: 1"));
/// ```
pub struct Assertions<E> {
    make_failure: Box<dyn Fn(String) -> E + Send + Sync>,
    context: Option<AssertionContext>,
}

impl<E: Any + Send> Assertions<E> {
    /// A checker raising `make_failure(message)` with the global context.
    pub fn new<F>(make_failure: F) -> Self
    where
        F: Fn(String) -> E + Send + Sync + 'static,
    {
        Self {
            make_failure: Box::new(make_failure),
            context: None,
        }
    }

    /// Uses `context` instead of the global default.
    #[must_use]
    pub fn with_context(mut self, context: AssertionContext) -> Self {
        self.context = Some(context);
        self
    }
}

impl<E: Any + Send> Checker for Assertions<E> {
    fn context(&self) -> Option<&AssertionContext> {
        self.context.as_ref()
    }

    fn fail(&self, message: String) -> ! {
        std::panic::panic_any((self.make_failure)(message))
    }
}

impl<E> fmt::Debug for Assertions<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Assertions")
            .field("failure", &std::any::type_name::<E>())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

macro_rules! fixed_checker {
    ($(#[$attribute:meta])* $name:ident raises $failure:ident) => {
        $(#[$attribute])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            context: Option<AssertionContext>,
        }

        impl $name {
            #[doc = concat!("A checker raising [`", stringify!($failure), "`] with the global context.")]
            pub const fn new() -> Self {
                Self { context: None }
            }

            #[doc = concat!("A checker raising [`", stringify!($failure), "`] with `context`.")]
            pub const fn with_context(context: AssertionContext) -> Self {
                Self {
                    context: Some(context),
                }
            }
        }

        impl Checker for $name {
            fn context(&self) -> Option<&AssertionContext> {
                self.context.as_ref()
            }

            fn fail(&self, message: String) -> ! {
                std::panic::panic_any($failure::new(message))
            }
        }
    };
}

fixed_checker! {
    /// General-purpose assertions.
    Condition raises AssertionFailure
}

fixed_checker! {
    /// Requirements a caller must meet before an operation runs.
    Precondition raises PreconditionFailure
}

fixed_checker! {
    /// Guarantees an operation makes once it returns.
    Postcondition raises PostconditionFailure
}
