//! Error type shared by every layer of the engine.

use thiserror::Error;

/// Why a bounded search stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// The budget's deadline passed.
    DeadlineExceeded,
    /// The budget's cancellation token was triggered.
    Cancelled,
}

impl core::fmt::Display for Interrupt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Interrupt::DeadlineExceeded => write!(f, "deadline exceeded"),
            Interrupt::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Errors raised by modular, polynomial and field operations.
///
/// Every operation raises at the point of detection and never returns a
/// partially computed value alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A modulus was non-positive or not prime where a prime is required,
    /// or an input could not be parsed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The element has no multiplicative inverse under its modulus.
    #[error("element is not invertible")]
    NoInverse,

    /// Polynomial division by the zero polynomial.
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// A discrete logarithm, square root or order has no solution.
    #[error("no solution exists")]
    NoSolution,

    /// Factorization produced more factors than the configured capacity.
    #[error("factorization produced more than {capacity} factors")]
    FactorizationOverflow { capacity: usize },

    /// The polynomial is not irreducible.
    #[error("polynomial is not irreducible")]
    NotIrreducible,

    /// A long-running search was stopped by its budget.
    #[error("search interrupted: {0}")]
    Interrupted(Interrupt),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::invalid("modulus should be positive").to_string(),
            "invalid argument: modulus should be positive"
        );
        assert_eq!(Error::NoInverse.to_string(), "element is not invertible");
        assert_eq!(
            Error::FactorizationOverflow { capacity: 4 }.to_string(),
            "factorization produced more than 4 factors"
        );
        assert_eq!(
            Error::Interrupted(Interrupt::Cancelled).to_string(),
            "search interrupted: cancelled"
        );
    }
}
