//! Contract failure payloads.
//!
//! Each failure carries the fully formatted message and is raised as a panic
//! payload with [`std::panic::panic_any`].

use std::error::Error as StdError;

use crate::value::Value;

macro_rules! contract_failure {
    ($(#[$attribute:meta])* $name:ident) => {
        $(#[$attribute])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        #[error("{message}")]
        pub struct $name {
            message: String,
        }

        impl $name {
            /// Creates the failure from a formatted message.
            pub fn new(message: impl Into<String>) -> Self {
                Self {
                    message: message.into(),
                }
            }

            /// The formatted message.
            pub fn message(&self) -> &str {
                &self.message
            }
        }

        impl From<String> for $name {
            fn from(message: String) -> Self {
                Self::new(message)
            }
        }

        impl Value for $name {
            fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
                Some(self)
            }
        }
    };
}

contract_failure! {
    /// Raised by [`Condition`](super::Condition) when an assertion does not hold.
    AssertionFailure
}

contract_failure! {
    /// Raised by [`Precondition`](super::Precondition) when a caller violates
    /// an operation's requirements.
    PreconditionFailure
}

contract_failure! {
    /// Raised by [`Postcondition`](super::Postcondition) when an operation
    /// fails to deliver its guarantees.
    PostconditionFailure
}
