//! The assertion predicates shared by every checker.

use super::AssertionContext;
use crate::compare::{ComparisonRegistry, UnsupportedComparison};
use crate::format::{AssertParameters, MessageFormatter};
use crate::value::{Value, is_same_instance};

/// A value that can be disposed, such as a handle or a connection.
pub trait Disposable: Value {
    /// Returns `true` once the value has been disposed.
    fn is_disposed(&self) -> bool;
}

/// The collaborators resolved for one assertion call.
struct Resolved<'a> {
    registry: &'a ComparisonRegistry,
    formatter: &'a MessageFormatter,
}

fn resolve<'a>(
    context: Option<&'a AssertionContext>,
    parameters: &AssertParameters<'a>,
) -> Resolved<'a> {
    let fallback = context.unwrap_or_else(|| AssertionContext::global());
    Resolved {
        registry: parameters.registry().unwrap_or_else(|| fallback.registry()),
        formatter: parameters.formatter().unwrap_or_else(|| fallback.formatter()),
    }
}

fn raise<C: Checker + ?Sized>(checker: &C, message: String) -> ! {
    tracing::error!(%message, "contract violated");
    checker.fail(message)
}

fn unsupported(error: UnsupportedComparison) -> ! {
    tracing::error!(%error, "contract could not be evaluated");
    std::panic::panic_any(error)
}

fn ordered(outcome: Result<bool, UnsupportedComparison>) -> bool {
    outcome.unwrap_or_else(|error| unsupported(error))
}

/// Contract predicates.
///
/// Implementors supply where their collaborators come from and how a
/// violation is raised. Every predicate returns `self` when it holds, so
/// checks can be chained, and never returns when it does not.
///
/// Every predicate accepts anything convertible into [`AssertParameters`]:
/// `()` for no overrides, or a full parameter value.
///
/// # Panics
///
/// Predicates panic through [`fail`](Checker::fail) when they do not hold.
/// Ordering predicates panic with an [`UnsupportedComparison`] payload when
/// the registry cannot order the operands.
///
/// # Examples
///
/// ```rust
/// use verity::assertion::{Checker, Condition};
/// use verity::format::AssertParameters;
///
/// let retries = 3_u8;
/// Condition::new()
///     .assert_greater_than_or_equal_to(&retries, &0_i32, ())
///     .assert_between(&1, &retries, &5_u64, AssertParameters::convenience(Some("retries"), None))
///     .assert_one_of(&retries, &vec![1, 3, 5], ());
/// ```
pub trait Checker {
    /// The configured context, or `None` for the global default.
    fn context(&self) -> Option<&AssertionContext>;

    /// Raises a violation with the formatted `message`.
    fn fail(&self, message: String) -> !;

    /// Requires `condition` to be `true`.
    fn assert_true<'p>(&self, condition: bool, parameters: impl Into<AssertParameters<'p>>) -> &Self {
        if !condition {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(self, resolved.formatter.expected_true(&parameters));
        }
        self
    }

    /// Requires `condition` to be `false`.
    fn assert_false<'p>(&self, condition: bool, parameters: impl Into<AssertParameters<'p>>) -> &Self {
        if condition {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(self, resolved.formatter.expected_false(&parameters));
        }
        self
    }

    /// Requires `value` to be absent.
    fn assert_null<'p, V>(&self, value: &V, parameters: impl Into<AssertParameters<'p>>) -> &Self
    where
        V: Value + ?Sized,
    {
        if value.as_present().is_some() {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(self, resolved.formatter.expected_null(value, &parameters));
        }
        self
    }

    /// Requires `value` to be present.
    fn assert_not_null<'p, V>(&self, value: &V, parameters: impl Into<AssertParameters<'p>>) -> &Self
    where
        V: Value + ?Sized,
    {
        if value.as_present().is_none() {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(self, resolved.formatter.expected_not_null(&parameters));
        }
        self
    }

    /// Requires `value` to be present and, when it has a notion of
    /// emptiness, non-empty.
    fn assert_not_null_and_not_empty<'p, V>(
        &self,
        value: &V,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        V: Value + ?Sized,
    {
        let holds = value
            .as_present()
            .is_some_and(|present| present.is_empty_value() != Some(true));
        if !holds {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(
                self,
                resolved
                    .formatter
                    .expected_not_null_and_not_empty(value, &parameters),
            );
        }
        self
    }

    /// Requires `actual` to equal `expected` under the resolved registry.
    fn assert_equal<'p, E, A>(
        &self,
        expected: &E,
        actual: &A,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if !resolved.registry.are_equal(expected, actual) {
            raise(
                self,
                resolved.formatter.expected_equal(expected, actual, &parameters),
            );
        }
        self
    }

    /// Requires `actual` to differ from `expected` under the resolved
    /// registry.
    fn assert_not_equal<'p, E, A>(
        &self,
        expected: &E,
        actual: &A,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if resolved.registry.are_equal(expected, actual) {
            raise(
                self,
                resolved
                    .formatter
                    .expected_not_equal(expected, actual, &parameters),
            );
        }
        self
    }

    /// Requires `actual` to be the same instance as `expected`.
    ///
    /// Identity is address-based. Promoted constants such as two literal
    /// `&Point(1, 2)` borrows, and zero-sized values, may share an address
    /// and count as the same instance.
    fn assert_same<'p, E, A>(
        &self,
        expected: &E,
        actual: &A,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        if !same_instance(expected, actual) {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(
                self,
                resolved.formatter.expected_same(expected, actual, &parameters),
            );
        }
        self
    }

    /// Requires `actual` to be a different instance from `expected`.
    fn assert_not_same<'p, E, A>(
        &self,
        expected: &E,
        actual: &A,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        if same_instance(expected, actual) {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(
                self,
                resolved
                    .formatter
                    .expected_not_same(expected, actual, &parameters),
            );
        }
        self
    }

    /// Requires `actual > lower_bound`.
    fn assert_greater_than<'p, A, B>(
        &self,
        actual: &A,
        lower_bound: &B,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        A: Value + ?Sized,
        B: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if !ordered(resolved.registry.is_greater_than(actual, lower_bound)) {
            raise(
                self,
                resolved
                    .formatter
                    .expected_greater_than(lower_bound, actual, &parameters),
            );
        }
        self
    }

    /// Requires `actual >= lower_bound`.
    fn assert_greater_than_or_equal_to<'p, A, B>(
        &self,
        actual: &A,
        lower_bound: &B,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        A: Value + ?Sized,
        B: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if !ordered(resolved.registry.is_greater_than_or_equal_to(actual, lower_bound)) {
            raise(
                self,
                resolved.formatter.expected_greater_than_or_equal_to(
                    lower_bound,
                    actual,
                    &parameters,
                ),
            );
        }
        self
    }

    /// Requires `actual < upper_bound`.
    fn assert_less_than<'p, A, B>(
        &self,
        actual: &A,
        upper_bound: &B,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        A: Value + ?Sized,
        B: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if !ordered(resolved.registry.is_less_than(actual, upper_bound)) {
            raise(
                self,
                resolved
                    .formatter
                    .expected_less_than(upper_bound, actual, &parameters),
            );
        }
        self
    }

    /// Requires `actual <= upper_bound`.
    fn assert_less_than_or_equal_to<'p, A, B>(
        &self,
        actual: &A,
        upper_bound: &B,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        A: Value + ?Sized,
        B: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if !ordered(resolved.registry.is_less_than_or_equal_to(actual, upper_bound)) {
            raise(
                self,
                resolved
                    .formatter
                    .expected_less_than_or_equal_to(upper_bound, actual, &parameters),
            );
        }
        self
    }

    /// Requires `lower_bound <= actual <= upper_bound`.
    ///
    /// When the bounds are equal the failure reads `equal to <bound>`.
    fn assert_between<'p, B, A, C>(
        &self,
        lower_bound: &B,
        actual: &A,
        upper_bound: &C,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        B: Value + ?Sized,
        A: Value + ?Sized,
        C: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        if !ordered(resolved.registry.is_between(lower_bound, actual, upper_bound)) {
            let message = if resolved.registry.are_equal(lower_bound, upper_bound) {
                resolved
                    .formatter
                    .expected_equal_to(lower_bound, actual, &parameters)
            } else {
                resolved
                    .formatter
                    .expected_between(lower_bound, actual, upper_bound, &parameters)
            };
            raise(self, message);
        }
        self
    }

    /// Requires `value` to be disposed.
    fn assert_disposed<'p, D>(&self, value: &D, parameters: impl Into<AssertParameters<'p>>) -> &Self
    where
        D: Disposable + ?Sized,
    {
        if !value.is_disposed() {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(self, resolved.formatter.expected_disposed(value, &parameters));
        }
        self
    }

    /// Requires `value` not to be disposed.
    fn assert_not_disposed<'p, D>(
        &self,
        value: &D,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        D: Disposable + ?Sized,
    {
        if value.is_disposed() {
            let parameters = parameters.into();
            let resolved = resolve(self.context(), &parameters);
            raise(
                self,
                resolved.formatter.expected_not_disposed(value, &parameters),
            );
        }
        self
    }

    /// Requires `actual` to equal at least one of `possibilities`.
    ///
    /// `possibilities` is normally a sequence; any other present value is
    /// treated as a single possibility. Empty or absent possibilities always
    /// fail.
    fn assert_one_of<'p, A, P>(
        &self,
        actual: &A,
        possibilities: &P,
        parameters: impl Into<AssertParameters<'p>>,
    ) -> &Self
    where
        A: Value + ?Sized,
        P: Value + ?Sized,
    {
        let parameters = parameters.into();
        let resolved = resolve(self.context(), &parameters);
        let found = possibilities.as_present().is_some_and(|present| {
            present
                .sequence()
                .unwrap_or_else(|| vec![present])
                .into_iter()
                .any(|possibility| resolved.registry.are_equal(possibility, actual))
        });
        if !found {
            raise(
                self,
                resolved
                    .formatter
                    .expected_one_of(possibilities, actual, &parameters),
            );
        }
        self
    }
}

fn same_instance<E, A>(expected: &E, actual: &A) -> bool
where
    E: Value + ?Sized,
    A: Value + ?Sized,
{
    match (expected.as_present(), actual.as_present()) {
        (Some(expected), Some(actual)) => is_same_instance(expected, actual),
        (None, None) => true,
        _ => false,
    }
}
