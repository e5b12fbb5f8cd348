//! Failure message formatting.
//!
//! - [`MessageFormatter`]: renders one message per assertion kind
//! - [`AssertParameters`]: per-call message, expression, separator and
//!   collaborator overrides
//! - [`describe_value`]: the default value describer
//! - [`join_conjunction`]: natural-language list joining

mod describe;
mod formatter;
mod parameters;

pub use describe::{Describer, NULL, describe_value, join_conjunction};
pub use formatter::{LINE_ENDING, MessageFormatter};
pub use parameters::AssertParameters;
