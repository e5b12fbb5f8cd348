//! Configured collaborators for assertion checkers.

use std::sync::{Arc, LazyLock};

use crate::compare::ComparisonRegistry;
use crate::format::MessageFormatter;

static GLOBAL_CONTEXT: LazyLock<AssertionContext> = LazyLock::new(|| {
    tracing::debug!("initializing global assertion context");
    AssertionContext::default()
});

/// The registry and formatter an assertion checker uses.
///
/// Checkers resolve their collaborators per call: overrides in
/// [`AssertParameters`](crate::format::AssertParameters) come first, then
/// the checker's own context, then [`AssertionContext::global`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use verity::assertion::{AssertionContext, Checker, Condition};
/// use verity::compare::{ComparisonRegistry, RegistryOptions};
///
/// let strict = AssertionContext::default().with_registry(Arc::new(
///     ComparisonRegistry::with_options(RegistryOptions::empty()),
/// ));
/// let condition = Condition::with_context(strict);
///
/// condition.assert_equal(&5, &5, ());
/// ```
#[derive(Debug, Clone)]
pub struct AssertionContext {
    registry: Arc<ComparisonRegistry>,
    formatter: Arc<MessageFormatter>,
}

impl AssertionContext {
    /// Bundles a registry and a formatter.
    pub fn new(registry: Arc<ComparisonRegistry>, formatter: Arc<MessageFormatter>) -> Self {
        Self { registry, formatter }
    }

    /// The process-wide default context, created on first use with
    /// [`ComparisonRegistry::with_defaults`] and [`MessageFormatter::default`].
    pub fn global() -> &'static Self {
        &GLOBAL_CONTEXT
    }

    /// Replaces the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<ComparisonRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<MessageFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// The comparison registry.
    pub fn registry(&self) -> &ComparisonRegistry {
        &self.registry
    }

    /// The message formatter.
    pub fn formatter(&self) -> &MessageFormatter {
        &self.formatter
    }
}

impl Default for AssertionContext {
    fn default() -> Self {
        Self::new(
            Arc::new(ComparisonRegistry::with_defaults()),
            Arc::new(MessageFormatter::default()),
        )
    }
}

static_assertions::assert_impl_all!(AssertionContext: Send, Sync);
