//! Integer factorization strategies.
//!
//! A [`Factorizer`] is injected into [`NumberTheory`](crate::NumberTheory) at
//! construction, so the algorithm can be swapped without touching callers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::budget::Budget;
use crate::config::{Config, DEFAULT_POLLARD_RETRIES, DEFAULT_PRIMALITY_ROUNDS};
use crate::error::Result;
use crate::numeric::Numeric;
use crate::utils::{is_probable_prime, SMALL_PRIMES};

/// A strategy that splits an integer into primes.
pub trait Factorizer<N: Numeric>: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Prime factors of `|n|` with multiplicity, ascending.
    ///
    /// Returns an empty list for `|n| <= 1`.
    fn factor(&self, n: &N, budget: &Budget) -> Result<Vec<N>>;
}

/// Trial division by 2 and odd candidates up to `sqrt(n)`.
///
/// # Example
///
/// ```
/// use modfield::{Budget, Factorizer, TrialDivision};
///
/// let factors = TrialDivision.factor(&360i128, &Budget::unlimited()).unwrap();
/// assert_eq!(factors, vec![2, 2, 2, 3, 3, 5]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialDivision;

impl<N: Numeric> Factorizer<N> for TrialDivision {
    fn name(&self) -> &'static str {
        "trial-division"
    }

    fn factor(&self, n: &N, budget: &Budget) -> Result<Vec<N>> {
        let mut factors = Vec::new();
        let mut rest = n.abs();
        if rest <= N::one() {
            return Ok(factors);
        }

        let two = N::from_u64(2);
        while rest.is_even() {
            factors.push(two.clone());
            rest = rest.shr(1);
        }

        let mut d = N::from_u64(3);
        let mut steps = 0u64;
        while d.mul(&d) <= rest {
            while rest.mod_floor(&d).is_zero() {
                factors.push(d.clone());
                rest = rest.div_floor(&d);
            }
            d = d.add(&two);
            steps += 1;
            if steps % 1024 == 0 {
                budget.check()?;
            }
        }
        if rest > N::one() {
            factors.push(rest);
        }
        Ok(factors)
    }
}

/// Pollard's rho with Brent's cycle detection.
///
/// Small primes are stripped by trial division first. Each composite
/// cofactor is split with a random polynomial `x^2 + c`; a failed split is
/// retried with a fresh `c` up to `max_retries` times before falling back to
/// trial division for that cofactor.
///
/// # Example
///
/// ```
/// use modfield::{Budget, Factorizer, PollardRho};
/// use num_bigint::BigInt;
///
/// // 2^64 + 1 = 274177 * 67280421310721
/// let n: BigInt = (BigInt::from(1u8) << 64) + 1u8;
/// let factors = PollardRho::new().with_seed(7).factor(&n, &Budget::unlimited()).unwrap();
/// assert_eq!(factors, vec![BigInt::from(274177u64), BigInt::from(67280421310721u64)]);
/// ```
#[derive(Debug, Clone)]
pub struct PollardRho {
    max_retries: usize,
    primality_rounds: usize,
    seed: Option<u64>,
}

impl Default for PollardRho {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_POLLARD_RETRIES,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            seed: None,
        }
    }
}

/// Iterations folded into one gcd in Brent's variant.
const BRENT_BATCH: u64 = 128;

impl PollardRho {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take retry and primality parameters from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.pollard_max_retries,
            primality_rounds: config.primality_rounds,
            seed: None,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Make every run deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Find a non-trivial divisor of the odd composite `n`.
    fn split<N: Numeric, R: Rng>(&self, n: &N, rng: &mut R, budget: &Budget) -> Result<Option<N>> {
        let root = n.sqrt_floor();
        if root.mul(&root) == *n {
            return Ok(Some(root));
        }

        // c in [1, n - 3] keeps x^2 + c away from the degenerate maps
        let c_span = n.sub(&N::from_u64(3));
        for attempt in 0..self.max_retries {
            budget.check()?;
            let c = N::random_below(&c_span, rng).add(&N::one());
            let x0 = N::random_below(n, rng);
            if let Some(d) = brent(n, &c, x0, budget)? {
                return Ok(Some(d));
            }
            debug!(%n, attempt, "pollard rho cycle closed without a factor, retrying");
        }
        Ok(None)
    }
}

fn brent<N: Numeric>(n: &N, c: &N, x0: N, budget: &Budget) -> Result<Option<N>> {
    let step = |v: &N| v.mul(v).add(c).mod_floor(n);
    let one = N::one();

    let mut y = x0;
    let mut x = y.clone();
    let mut ys = y.clone();
    let mut r = 1u64;
    let mut q = one.clone();
    let mut g = one.clone();

    while g.is_one() {
        x = y.clone();
        for _ in 0..r {
            y = step(&y);
        }
        let mut k = 0u64;
        while k < r && g.is_one() {
            ys = y.clone();
            for _ in 0..BRENT_BATCH.min(r - k) {
                y = step(&y);
                q = q.mul(&x.sub(&y)).mod_floor(n);
            }
            g = q.gcd(n);
            k += BRENT_BATCH;
        }
        r *= 2;
        budget.check()?;
    }

    if g == *n {
        // the batch overshot: replay it one step at a time
        loop {
            ys = step(&ys);
            g = x.sub(&ys).gcd(n);
            if !g.is_one() {
                break;
            }
        }
    }

    if g == *n {
        Ok(None)
    } else {
        Ok(Some(g))
    }
}

impl<N: Numeric> Factorizer<N> for PollardRho {
    fn name(&self) -> &'static str {
        "pollard-rho"
    }

    fn factor(&self, n: &N, budget: &Budget) -> Result<Vec<N>> {
        let mut factors = Vec::new();
        let mut rest = n.abs();
        if rest <= N::one() {
            return Ok(factors);
        }

        for &p in SMALL_PRIMES.iter() {
            let p = N::from_u64(p);
            if p.mul(&p) > rest {
                break;
            }
            while rest.mod_floor(&p).is_zero() {
                factors.push(p.clone());
                rest = rest.div_floor(&p);
            }
        }

        let mut rng = self.rng();
        let mut pending = Vec::new();
        if rest > N::one() {
            pending.push(rest);
        }

        while let Some(m) = pending.pop() {
            budget.check()?;
            if is_probable_prime(&m, self.primality_rounds, &mut rng) {
                factors.push(m);
                continue;
            }
            match self.split(&m, &mut rng, budget)? {
                Some(d) => {
                    debug!(n = %m, divisor = %d, "pollard rho split");
                    let cofactor = m.div_floor(&d);
                    pending.push(d);
                    pending.push(cofactor);
                }
                None => {
                    debug!(n = %m, "pollard rho exhausted retries, using trial division");
                    factors.extend(TrialDivision.factor(&m, budget)?);
                }
            }
        }

        factors.sort();
        Ok(factors)
    }
}
