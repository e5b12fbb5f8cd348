//! Failure message rendering.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use super::{AssertParameters, Describer, describe_value, join_conjunction};
use crate::value::Value;

/// The platform line terminator used when no separator is given.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// The platform line terminator used when no separator is given.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Builds failure messages for every assertion kind.
///
/// Each message is made of up to four lines, in order:
///
/// ```text
/// Message: <parameters.message>        (only when given)
/// Expression: <parameters.expression>  (only when given)
/// Expected: <what the assertion required>
/// Actual: <what it observed>
/// ```
///
/// Values are described by the formatter's [`Describer`]. All methods are
/// pure string builders.
///
/// # Examples
///
/// ```rust
/// use verity::format::{AssertParameters, MessageFormatter};
///
/// let formatter = MessageFormatter::default();
/// let parameters = AssertParameters::new()
///     .with_message("m")
///     .with_expression("e")
///     .with_newline("\n");
///
/// assert_eq!(
///     formatter.expected_equal(&1, &2, &parameters),
///     "Message: m\nExpression: e\nExpected: 1\nActual: 2"
/// );
/// ```
#[derive(Clone)]
pub struct MessageFormatter {
    describer: Describer,
}

impl MessageFormatter {
    /// Creates a formatter with a custom describer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verity::format::{AssertParameters, MessageFormatter};
    ///
    /// let formatter = MessageFormatter::new(|value| match value {
    ///     Some(value) => format!("<{value:?}>"),
    ///     None => "nothing".to_string(),
    /// });
    /// let parameters = AssertParameters::new().with_newline(" / ");
    /// assert_eq!(
    ///     formatter.expected_null(&7, &parameters),
    ///     "Expected: null / Actual: <7>"
    /// );
    /// ```
    pub fn new<F>(describer: F) -> Self
    where
        F: Fn(Option<&dyn Value>) -> String + Send + Sync + 'static,
    {
        Self {
            describer: Arc::new(describer),
        }
    }

    /// Describes a value with this formatter's describer.
    pub fn describe<V: Value + ?Sized>(&self, value: &V) -> String {
        (self.describer)(value.as_present())
    }

    // =========================================================================
    // Boolean and null checks
    // =========================================================================

    /// A value expected to be `true` was `false`.
    pub fn expected_true(&self, parameters: &AssertParameters<'_>) -> String {
        render(parameters, "true", "false")
    }

    /// A value expected to be `false` was `true`.
    pub fn expected_false(&self, parameters: &AssertParameters<'_>) -> String {
        render(parameters, "false", "true")
    }

    /// A value expected to be absent was present.
    pub fn expected_null<V>(&self, value: &V, parameters: &AssertParameters<'_>) -> String
    where
        V: Value + ?Sized,
    {
        render(parameters, super::NULL, self.describe(value))
    }

    /// A value expected to be present was absent.
    pub fn expected_not_null(&self, parameters: &AssertParameters<'_>) -> String {
        render(parameters, "not null", super::NULL)
    }

    /// A value expected to be present and non-empty was absent or empty.
    pub fn expected_not_null_and_not_empty<V>(
        &self,
        value: &V,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        V: Value + ?Sized,
    {
        render(parameters, "not null and not empty", self.describe(value))
    }

    // =========================================================================
    // Identity and equality
    // =========================================================================

    /// `actual` was expected to be the same instance as `expected`.
    pub fn expected_same<E, A>(&self, expected: &E, actual: &A, parameters: &AssertParameters<'_>) -> String
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("same instance as {}", self.describe(expected)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to be a different instance from `expected`.
    pub fn expected_not_same<E, A>(
        &self,
        expected: &E,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("not same instance as {}", self.describe(expected)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to equal `expected`.
    pub fn expected_equal<E, A>(&self, expected: &E, actual: &A, parameters: &AssertParameters<'_>) -> String
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(parameters, self.describe(expected), self.describe(actual))
    }

    /// `actual` was expected to differ from `expected`.
    pub fn expected_not_equal<E, A>(
        &self,
        expected: &E,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("not {}", self.describe(expected)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to equal `expected`; phrased as a relation, for
    /// ranges whose bounds coincide.
    pub fn expected_equal_to<E, A>(&self, expected: &E, actual: &A, parameters: &AssertParameters<'_>) -> String
    where
        E: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("equal to {}", self.describe(expected)),
            self.describe(actual),
        )
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// `actual` was expected to be greater than `lower_bound`.
    pub fn expected_greater_than<B, A>(
        &self,
        lower_bound: &B,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        B: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("greater than {}", self.describe(lower_bound)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to be greater than or equal to `lower_bound`.
    pub fn expected_greater_than_or_equal_to<B, A>(
        &self,
        lower_bound: &B,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        B: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("greater than or equal to {}", self.describe(lower_bound)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to be less than `upper_bound`.
    pub fn expected_less_than<B, A>(
        &self,
        upper_bound: &B,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        B: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("less than {}", self.describe(upper_bound)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to be less than or equal to `upper_bound`.
    pub fn expected_less_than_or_equal_to<B, A>(
        &self,
        upper_bound: &B,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        B: Value + ?Sized,
        A: Value + ?Sized,
    {
        render(
            parameters,
            format!("less than or equal to {}", self.describe(upper_bound)),
            self.describe(actual),
        )
    }

    /// `actual` was expected to lie within `[lower_bound, upper_bound]`.
    pub fn expected_between<B, A, C>(
        &self,
        lower_bound: &B,
        actual: &A,
        upper_bound: &C,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        B: Value + ?Sized,
        A: Value + ?Sized,
        C: Value + ?Sized,
    {
        let bounds = [self.describe(lower_bound), self.describe(upper_bound)];
        render(
            parameters,
            format!("between {}", join_conjunction(&bounds, "and")),
            self.describe(actual),
        )
    }

    // =========================================================================
    // Disposal and membership
    // =========================================================================

    /// `value` was expected to be disposed.
    pub fn expected_disposed<V>(&self, value: &V, parameters: &AssertParameters<'_>) -> String
    where
        V: Value + ?Sized,
    {
        render(
            parameters,
            "disposed",
            format!("not disposed: {}", self.describe(value)),
        )
    }

    /// `value` was expected not to be disposed.
    pub fn expected_not_disposed<V>(&self, value: &V, parameters: &AssertParameters<'_>) -> String
    where
        V: Value + ?Sized,
    {
        render(
            parameters,
            "not disposed",
            format!("disposed: {}", self.describe(value)),
        )
    }

    /// `actual` was expected to equal one of `possibilities`.
    ///
    /// Absent possibilities render as `one of null`, an empty sequence as
    /// `one of no possibilities`.
    pub fn expected_one_of<P, A>(
        &self,
        possibilities: &P,
        actual: &A,
        parameters: &AssertParameters<'_>,
    ) -> String
    where
        P: Value + ?Sized,
        A: Value + ?Sized,
    {
        let expected = match possibilities.as_present() {
            None => format!("one of {}", super::NULL),
            Some(present) => match present.sequence() {
                Some(elements) if elements.is_empty() => "one of no possibilities".to_string(),
                Some(elements) => {
                    let descriptions: Vec<String> = elements
                        .iter()
                        .map(|element| (self.describer)(element.as_present()))
                        .collect();
                    format!("one of {}", join_conjunction(&descriptions, "or"))
                }
                None => format!("one of {}", self.describe(present)),
            },
        };
        render(parameters, expected, self.describe(actual))
    }
}

impl Default for MessageFormatter {
    /// A formatter using [`describe_value`].
    fn default() -> Self {
        Self::new(describe_value)
    }
}

impl fmt::Debug for MessageFormatter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MessageFormatter")
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(MessageFormatter: Send, Sync);

fn render(
    parameters: &AssertParameters<'_>,
    expected: impl fmt::Display,
    actual: impl fmt::Display,
) -> String {
    let mut lines: SmallVec<[String; 4]> = SmallVec::new();
    if let Some(message) = parameters.message() {
        lines.push(format!("Message: {message}"));
    }
    if let Some(expression) = parameters.expression() {
        lines.push(format!("Expression: {expression}"));
    }
    lines.push(format!("Expected: {expected}"));
    lines.push(format!("Actual: {actual}"));
    lines.join(parameters.newline().unwrap_or(LINE_ENDING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn formatter() -> MessageFormatter {
        MessageFormatter::default()
    }

    fn single_line() -> AssertParameters<'static> {
        AssertParameters::new().with_newline(" | ")
    }

    #[rstest]
    fn test_default_separator_is_platform_line_ending(formatter: MessageFormatter) {
        let message = formatter.expected_true(&AssertParameters::new());
        assert_eq!(message, format!("Expected: true{LINE_ENDING}Actual: false"));
    }

    #[rstest]
    fn test_message_and_expression_precede_expectation(formatter: MessageFormatter) {
        let parameters = single_line().with_expression("ready").with_message("boot");
        assert_eq!(
            formatter.expected_false(&parameters),
            "Message: boot | Expression: ready | Expected: false | Actual: true"
        );
    }

    #[rstest]
    #[case::null(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_null(&5, parameters), "Expected: null | Actual: 5")]
    #[case::not_null(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_not_null(parameters), "Expected: not null | Actual: null")]
    #[case::not_empty(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_not_null_and_not_empty(&"", parameters), "Expected: not null and not empty | Actual: \"\"")]
    #[case::same(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_same(&1, &2, parameters), "Expected: same instance as 1 | Actual: 2")]
    #[case::not_same(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_not_same(&1, &1, parameters), "Expected: not same instance as 1 | Actual: 1")]
    #[case::not_equal(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_not_equal(&"a", &"a", parameters), "Expected: not \"a\" | Actual: \"a\"")]
    #[case::equal_to(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_equal_to(&1, &5, parameters), "Expected: equal to 1 | Actual: 5")]
    #[case::greater(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_greater_than(&10, &3, parameters), "Expected: greater than 10 | Actual: 3")]
    #[case::greater_equal(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_greater_than_or_equal_to(&10, &3, parameters), "Expected: greater than or equal to 10 | Actual: 3")]
    #[case::less(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_less_than(&1, &3, parameters), "Expected: less than 1 | Actual: 3")]
    #[case::less_equal(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_less_than_or_equal_to(&1, &3, parameters), "Expected: less than or equal to 1 | Actual: 3")]
    #[case::between(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_between(&1, &50, &10, parameters), "Expected: between 1 and 10 | Actual: 50")]
    #[case::disposed(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_disposed(&"file", parameters), "Expected: disposed | Actual: not disposed: \"file\"")]
    #[case::not_disposed(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_not_disposed(&"file", parameters), "Expected: not disposed | Actual: disposed: \"file\"")]
    #[case::one_of(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_one_of(&vec![1, 2, 3], &4, parameters), "Expected: one of 1, 2, or 3 | Actual: 4")]
    #[case::one_of_empty(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_one_of(&Vec::<i32>::new(), &4, parameters), "Expected: one of no possibilities | Actual: 4")]
    #[case::one_of_absent(|formatter: &MessageFormatter, parameters: &AssertParameters<'_>| formatter.expected_one_of(&None::<Vec<i32>>, &4, parameters), "Expected: one of null | Actual: 4")]
    fn test_message_kinds(
        formatter: MessageFormatter,
        #[case] render_message: fn(&MessageFormatter, &AssertParameters<'_>) -> String,
        #[case] expected: &str,
    ) {
        assert_eq!(render_message(&formatter, &single_line()), expected);
    }

    #[rstest]
    fn test_custom_describer_is_used_for_every_value() {
        let formatter = MessageFormatter::new(|value| match value {
            Some(_) => "#".to_string(),
            None => "-".to_string(),
        });
        assert_eq!(
            formatter.expected_between(&1, &2, &None::<i32>, &single_line()),
            "Expected: between # and - | Actual: #"
        );
    }
}
