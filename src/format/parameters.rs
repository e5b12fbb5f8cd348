//! Per-call assertion overrides.

use std::borrow::Cow;

use super::MessageFormatter;
use crate::compare::ComparisonRegistry;

/// Optional overrides for a single assertion call.
///
/// Every field is optional. The engine reads the parameters and never
/// modifies them.
///
/// # Examples
///
/// ```rust
/// use verity::format::AssertParameters;
///
/// let parameters = AssertParameters::new()
///     .with_message("queue must drain")
///     .with_expression("queue.is_empty()")
///     .with_newline(" | ");
///
/// assert_eq!(parameters.message(), Some("queue must drain"));
/// assert_eq!(parameters.expression(), Some("queue.is_empty()"));
/// assert_eq!(parameters.newline(), Some(" | "));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssertParameters<'a> {
    message: Option<Cow<'a, str>>,
    expression: Option<Cow<'a, str>>,
    newline: Option<Cow<'a, str>>,
    formatter: Option<&'a MessageFormatter>,
    registry: Option<&'a ComparisonRegistry>,
}

impl<'a> AssertParameters<'a> {
    /// Parameters with no overrides.
    pub const fn new() -> Self {
        Self {
            message: None,
            expression: None,
            newline: None,
            formatter: None,
            registry: None,
        }
    }

    /// The convenience form: an optional source expression and an optional
    /// explanatory message.
    pub fn convenience(expression: Option<&'a str>, message: Option<&'a str>) -> Self {
        Self {
            message: message.map(Cow::Borrowed),
            expression: expression.map(Cow::Borrowed),
            ..Self::new()
        }
    }

    /// Sets the explanatory message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source expression text.
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<Cow<'a, str>>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Sets the line separator.
    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<Cow<'a, str>>) -> Self {
        self.newline = Some(newline.into());
        self
    }

    /// Substitutes the message formatter for this call.
    #[must_use]
    pub fn with_formatter(mut self, formatter: &'a MessageFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Substitutes the comparison registry for this call.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a ComparisonRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The explanatory message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The source expression text, if any.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// The line separator override, if any.
    pub fn newline(&self) -> Option<&str> {
        self.newline.as_deref()
    }

    /// The formatter override, if any.
    pub const fn formatter(&self) -> Option<&'a MessageFormatter> {
        self.formatter
    }

    /// The registry override, if any.
    pub const fn registry(&self) -> Option<&'a ComparisonRegistry> {
        self.registry
    }
}

impl From<()> for AssertParameters<'_> {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl<'a> From<&AssertParameters<'a>> for AssertParameters<'a> {
    fn from(parameters: &AssertParameters<'a>) -> Self {
        parameters.clone()
    }
}
