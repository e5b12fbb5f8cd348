//! Value descriptions.

use std::sync::Arc;

use crate::value::{Value, short_type_name};

/// Converts a possibly absent value into the text used in failure messages.
pub type Describer = Arc<dyn Fn(Option<&dyn Value>) -> String + Send + Sync>;

/// How an absent value is described.
pub const NULL: &str = "null";

/// The default describer.
///
/// - absent values render as `null`
/// - strings and characters are quoted and escaped
/// - sequences render as `[a,b,c]` and tuples as `(a,b)`, recursively
/// - errors render as `TypeName: "message"`
/// - everything else uses its `Debug` form
///
/// # Examples
///
/// ```rust
/// use verity::format::describe_value;
/// use verity::value::Value;
///
/// assert_eq!(describe_value(None), "null");
/// assert_eq!(describe_value(Some(&"a\"b")), r#""a\"b""#);
/// assert_eq!(describe_value(Some(&vec![1, 2])), "[1,2]");
/// assert_eq!(describe_value(Some(&(1, 'x'))), "(1,'x')");
/// assert_eq!(describe_value(Some(&Some(3))), "3");
/// ```
pub fn describe_value(value: Option<&dyn Value>) -> String {
    let Some(value) = value.and_then(Value::as_present) else {
        return NULL.to_string();
    };
    if let Some(elements) = value.sequence() {
        return format!("[{}]", describe_elements(&elements));
    }
    if let Some(elements) = value.tuple() {
        return format!("({})", describe_elements(&elements));
    }
    if let Some(error) = value.as_error() {
        return format!(
            "{}: {:?}",
            short_type_name(value.type_name()),
            error.to_string()
        );
    }
    format!("{value:?}")
}

fn describe_elements(elements: &[&dyn Value]) -> String {
    elements
        .iter()
        .map(|element| describe_value(Some(*element)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins descriptions in natural language.
///
/// # Examples
///
/// ```rust
/// use verity::format::join_conjunction;
///
/// assert_eq!(join_conjunction(&["1"], "and"), "1");
/// assert_eq!(join_conjunction(&["1", "2"], "and"), "1 and 2");
/// assert_eq!(join_conjunction(&["1", "2", "3"], "or"), "1, 2, or 3");
/// ```
pub fn join_conjunction<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conjunction} {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            format!("{head}, {conjunction} {}", last.as_ref())
        }
    }
}
