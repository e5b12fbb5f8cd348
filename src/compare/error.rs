//! Errors raised by the comparison registry.

use crate::value::short_type_name;

/// No ordering function, null rule, or natural ordering applies to a pair
/// of operand types.
///
/// # Examples
///
/// ```rust
/// use verity::compare::{ComparisonRegistry, UnsupportedComparison};
///
/// let registry = ComparisonRegistry::new();
/// let error = registry.compare(&vec![1], &2).unwrap_err();
/// assert_eq!(error.to_string(), "Unable to compare Vec<i32> and i32.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unable to compare {left} and {right}.")]
pub struct UnsupportedComparison {
    /// Name of the left-hand operand type.
    pub left: String,
    /// Name of the right-hand operand type.
    pub right: String,
}

impl UnsupportedComparison {
    /// Builds the error from two fully qualified type names.
    pub fn new(left_type_name: &str, right_type_name: &str) -> Self {
        Self {
            left: short_type_name(left_type_name),
            right: short_type_name(right_type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_unsupported_comparison_names_both_types() {
        let error = UnsupportedComparison::new("alloc::string::String", "my_crate::Widget");
        assert_eq!(error.left, "String");
        assert_eq!(error.right, "Widget");
        assert_eq!(error.to_string(), "Unable to compare String and Widget.");
    }

    #[rstest]
    fn test_unsupported_comparison_is_error() {
        let error = UnsupportedComparison::new("a", "b");
        let _: &dyn std::error::Error = &error;
    }
}
