//! Three-way comparison outcome.
//!
//! [`Comparison`] is the value type every ordering operation in this crate
//! produces. It mirrors [`std::cmp::Ordering`] but is owned by the crate so
//! that registered ordering functions, message formatting, and serialization
//! all agree on a single closed set of outcomes.
//!
//! # Examples
//!
//! ```rust
//! use verity::Comparison;
//! use std::cmp::Ordering;
//!
//! let comparison = Comparison::from(1.cmp(&2));
//! assert_eq!(comparison, Comparison::LessThan);
//! assert_eq!(comparison.reverse(), Comparison::GreaterThan);
//! assert_eq!(Ordering::from(comparison), Ordering::Less);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// The outcome of comparing a left-hand value with a right-hand value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// The left-hand value orders before the right-hand value.
    LessThan,
    /// Both values occupy the same position in the ordering.
    Equal,
    /// The left-hand value orders after the right-hand value.
    GreaterThan,
}

impl Comparison {
    /// Returns `true` for [`Comparison::LessThan`].
    #[inline]
    pub const fn is_less_than(self) -> bool {
        matches!(self, Self::LessThan)
    }

    /// Returns `true` for [`Comparison::Equal`].
    #[inline]
    pub const fn is_equal(self) -> bool {
        matches!(self, Self::Equal)
    }

    /// Returns `true` for [`Comparison::GreaterThan`].
    #[inline]
    pub const fn is_greater_than(self) -> bool {
        matches!(self, Self::GreaterThan)
    }

    /// Returns `true` unless this is [`Comparison::GreaterThan`].
    #[inline]
    pub const fn is_less_than_or_equal(self) -> bool {
        !self.is_greater_than()
    }

    /// Returns `true` unless this is [`Comparison::LessThan`].
    #[inline]
    pub const fn is_greater_than_or_equal(self) -> bool {
        !self.is_less_than()
    }

    /// Swaps the roles of the two operands.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use verity::Comparison;
    ///
    /// assert_eq!(Comparison::Equal.reverse(), Comparison::Equal);
    /// assert_eq!(Comparison::LessThan.reverse(), Comparison::GreaterThan);
    /// ```
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::LessThan => Self::GreaterThan,
            Self::Equal => Self::Equal,
            Self::GreaterThan => Self::LessThan,
        }
    }
}

impl From<Ordering> for Comparison {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::LessThan,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::GreaterThan,
        }
    }
}

impl From<Comparison> for Ordering {
    fn from(comparison: Comparison) -> Self {
        match comparison {
            Comparison::LessThan => Self::Less,
            Comparison::Equal => Self::Equal,
            Comparison::GreaterThan => Self::Greater,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LessThan => "less than",
            Self::Equal => "equal to",
            Self::GreaterThan => "greater than",
        };
        formatter.write_str(text)
    }
}
