//! Parse-or-default results.
//!
//! Several inputs in the shop never fail outright: a quantity typed by hand,
//! a price read from a product card, or a cart read back from storage. They
//! fall back to a safe value instead. [`ParseOutcome`] keeps the fallback
//! visible to callers and tests.

/// The result of a lenient parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    /// The input was well-formed and produced this value.
    Parsed(T),
    /// The input was missing or invalid; this is the substituted default.
    Defaulted(T),
}

impl<T> ParseOutcome<T> {
    /// Returns the value regardless of how it was obtained.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value) => value,
        }
    }

    /// Borrow the value regardless of how it was obtained.
    #[must_use]
    pub const fn value(&self) -> &T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value) => value,
        }
    }

    /// Returns `true` if the value is a substituted default.
    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}
