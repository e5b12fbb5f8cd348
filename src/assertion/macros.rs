//! Convenience macros capturing the checked expression.

/// Requires a condition on entry to an operation.
///
/// Raises [`PreconditionFailure`](crate::assertion::PreconditionFailure)
/// with the source text of the condition as the expression, and an
/// optional message.
///
/// # Examples
///
/// ```rust
/// use verity::precondition;
///
/// fn withdraw(balance: u64, amount: u64) -> u64 {
///     precondition!(amount <= balance, "insufficient funds: {amount} > {balance}");
///     balance - amount
/// }
///
/// assert_eq!(withdraw(10, 3), 7);
///
/// let failure = std::panic::catch_unwind(|| withdraw(1, 3)).unwrap_err();
/// let failure = failure
///     .downcast_ref::<verity::assertion::PreconditionFailure>()
///     .unwrap();
/// assert!(failure.message().contains("Expression: amount <= balance"));
/// assert!(failure.message().contains("Message: insufficient funds: 3 > 1"));
/// ```
#[macro_export]
macro_rules! precondition {
    ($($arguments:tt)+) => {
        $crate::__check_condition!($crate::assertion::Precondition, $($arguments)+)
    };
}

/// Requires a condition on exit from an operation.
///
/// Raises [`PostconditionFailure`](crate::assertion::PostconditionFailure).
///
/// ```rust
/// use verity::postcondition;
///
/// let sorted = vec![1, 2, 3];
/// postcondition!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
/// ```
#[macro_export]
macro_rules! postcondition {
    ($($arguments:tt)+) => {
        $crate::__check_condition!($crate::assertion::Postcondition, $($arguments)+)
    };
}

/// Requires a condition to hold.
///
/// Raises [`AssertionFailure`](crate::assertion::AssertionFailure).
#[macro_export]
macro_rules! condition {
    ($($arguments:tt)+) => {
        $crate::__check_condition!($crate::assertion::Condition, $($arguments)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_condition {
    ($checker:path, $condition:expr $(,)?) => {{
        $crate::assertion::Checker::assert_true(
            &<$checker>::new(),
            $condition,
            $crate::format::AssertParameters::convenience(
                ::core::option::Option::Some(::core::stringify!($condition)),
                ::core::option::Option::None,
            ),
        );
    }};
    ($checker:path, $condition:expr, $($message:tt)+) => {{
        $crate::assertion::Checker::assert_true(
            &<$checker>::new(),
            $condition,
            $crate::format::AssertParameters::new()
                .with_expression(::core::stringify!($condition))
                .with_message(::std::format!($($message)+)),
        );
    }};
}
