//! Tunable parameters for primality testing and factorization.

use crate::error::{Error, Result};

/// Miller–Rabin rounds used when a constructor must verify a prime modulus.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 40;

/// Upper bound on the number of prime factors a factorization may return.
pub const DEFAULT_FACTOR_CAPACITY: usize = 1024;

/// Number of random restarts Pollard's rho makes before giving up on a split.
pub const DEFAULT_POLLARD_RETRIES: usize = 64;

/// Engine configuration.
///
/// Missing fields fall back to the defaults when deserialized, so a partial
/// configuration is valid.
///
/// # Example
///
/// ```
/// use modfield::Config;
///
/// let config = Config {
///     primality_rounds: 20,
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.factor_capacity, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Miller–Rabin rounds for primality checks.
    /// Default: 40 (composite slips through with probability below 4^-40)
    pub primality_rounds: usize,

    /// Maximum number of prime factors returned by a factorization.
    /// Default: 1024
    pub factor_capacity: usize,

    /// Random restarts per split attempt in Pollard's rho.
    /// Read by `PollardRho::from_config` and `NumberTheory::from_config`;
    /// a factorizer passed to `NumberTheory::with_config` keeps its own.
    /// Default: 64
    pub pollard_max_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            factor_capacity: DEFAULT_FACTOR_CAPACITY,
            pollard_max_retries: DEFAULT_POLLARD_RETRIES,
        }
    }
}

impl Config {
    /// Reject configurations that would make every search fail.
    pub fn validate(&self) -> Result<()> {
        if self.primality_rounds == 0 {
            return Err(Error::invalid("primality_rounds must be positive"));
        }
        if self.factor_capacity == 0 {
            return Err(Error::invalid("factor_capacity must be positive"));
        }
        if self.pollard_max_retries == 0 {
            return Err(Error::invalid("pollard_max_retries must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.primality_rounds, DEFAULT_PRIMALITY_ROUNDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_values_rejected() {
        let config = Config {
            factor_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidArgument(_))
        ));

        let config = Config {
            primality_rounds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
