//! Number-theoretic searches over [`ModInt`] values.
//!
//! [`NumberTheory`] owns the factorization strategy and the configuration.
//! Everything that needs a factorization (totients, orders, generator tests)
//! goes through the injected [`Factorizer`], and every search threads a
//! [`Budget`].

use std::collections::HashMap;

use num_bigint::BigInt;
use tracing::debug;

use crate::budget::Budget;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::numeric::Numeric;
use crate::structures::factor::{Factorizer, PollardRho};
use crate::structures::modint::ModInt;
use crate::utils::{
    carmichael_from_factors, euler_phi_from_factors, is_probable_prime, mod_pow, prime_divisors,
};

/// Budget is polled once per this many iterations of a tight loop.
const CHECK_INTERVAL: u64 = 256;

/// Number-theory engine with an explicit factorization strategy.
///
/// # Example
///
/// ```
/// use modfield::{Budget, NumberTheory, TrialDivision};
///
/// let theory = NumberTheory::<i128>::new(TrialDivision);
/// assert_eq!(theory.factorizer_name(), "trial-division");
/// assert_eq!(theory.euler_phi(&36, &Budget::unlimited()).unwrap(), 12);
/// ```
pub struct NumberTheory<N: Numeric = BigInt> {
    factorizer: Box<dyn Factorizer<N>>,
    config: Config,
}

impl<N: Numeric> Default for NumberTheory<N> {
    fn default() -> Self {
        Self {
            factorizer: Box::new(PollardRho::default()),
            config: Config::default(),
        }
    }
}

impl<N: Numeric> core::fmt::Debug for NumberTheory<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NumberTheory")
            .field("factorizer", &self.factorizer.name())
            .field("config", &self.config)
            .finish()
    }
}

impl<N: Numeric> NumberTheory<N> {
    pub fn new(factorizer: impl Factorizer<N> + 'static) -> Self {
        Self {
            factorizer: Box::new(factorizer),
            config: Config::default(),
        }
    }

    /// Build with an explicit configuration.
    ///
    /// Only `primality_rounds` and `factor_capacity` are read here. The
    /// injected factorizer keeps its own settings; use
    /// [`from_config`](Self::from_config) to hand the retry limit to Pollard's
    /// rho as well.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the configuration fails validation.
    pub fn with_config(factorizer: impl Factorizer<N> + 'static, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            factorizer: Box::new(factorizer),
            config,
        })
    }

    /// Pollard's rho built from `config`, so every field takes effect.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the configuration fails validation.
    pub fn from_config(config: Config) -> Result<Self> {
        let rho = PollardRho::from_config(&config);
        Self::with_config(rho, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn factorizer_name(&self) -> &'static str {
        self.factorizer.name()
    }

    /// Swap the factorization strategy.
    pub fn set_factorizer(&mut self, factorizer: impl Factorizer<N> + 'static) {
        self.factorizer = Box::new(factorizer);
    }

    /// Miller–Rabin with the configured number of rounds.
    pub fn is_prime(&self, n: &N) -> bool {
        is_probable_prime(n, self.config.primality_rounds, &mut rand::thread_rng())
    }

    /// Prime factors of `|n|`, ascending with multiplicity.
    ///
    /// # Errors
    ///
    /// [`Error::FactorizationOverflow`] when more than
    /// [`Config::factor_capacity`] factors are found.
    pub fn factorize(&self, n: &N, budget: &Budget) -> Result<Vec<N>> {
        let factors = self.factorizer.factor(n, budget)?;
        if factors.len() > self.config.factor_capacity {
            return Err(Error::FactorizationOverflow {
                capacity: self.config.factor_capacity,
            });
        }
        debug!(
            strategy = self.factorizer.name(),
            %n,
            count = factors.len(),
            "factorized"
        );
        Ok(factors)
    }

    fn positive_factors(&self, n: &N, budget: &Budget) -> Result<Vec<N>> {
        if !n.is_positive() {
            return Err(Error::invalid(format!("{n} is not a positive integer")));
        }
        self.factorize(n, budget)
    }

    /// Euler's totient `φ(n)` for `n >= 1`.
    pub fn euler_phi(&self, n: &N, budget: &Budget) -> Result<N> {
        Ok(euler_phi_from_factors(&self.positive_factors(n, budget)?))
    }

    /// Carmichael's function `λ(n)` for `n >= 1`.
    pub fn carmichael(&self, n: &N, budget: &Budget) -> Result<N> {
        Ok(carmichael_from_factors(&self.positive_factors(n, budget)?))
    }

    /// Smallest `k >= 1` with `a^k == 1`.
    ///
    /// Starts from `λ(m)` and strips prime factors while the power stays one.
    ///
    /// # Errors
    ///
    /// [`Error::NoSolution`] if `a` is not a unit.
    pub fn multiplicative_order(&self, a: &ModInt<N>, budget: &Budget) -> Result<N> {
        let m = a.modulus();
        if m.is_one() {
            return Ok(N::one());
        }
        if !a.value().gcd(m).is_one() {
            return Err(Error::NoSolution);
        }

        let lambda = self.carmichael(m, budget)?;
        let mut order = lambda.clone();
        for p in prime_divisors(&self.factorize(&lambda, budget)?) {
            while order.mod_floor(&p).is_zero() {
                budget.check()?;
                let candidate = order.div_floor(&p);
                if mod_pow(a.value(), &candidate, m).is_one() {
                    order = candidate;
                } else {
                    break;
                }
            }
        }
        Ok(order)
    }

    fn require_prime(&self, m: &N, what: &str) -> Result<()> {
        if self.is_prime(m) {
            Ok(())
        } else {
            Err(Error::invalid(format!("{what} requires a prime modulus, got {m}")))
        }
    }

    /// Whether `a` generates the multiplicative group of a prime field.
    ///
    /// `a` is a generator iff `a^((p-1)/q) != 1` for every prime `q | p-1`.
    pub fn is_generator(&self, a: &ModInt<N>, budget: &Budget) -> Result<bool> {
        let p = a.modulus();
        self.require_prime(p, "generator test")?;
        if a.value().is_zero() {
            return Ok(false);
        }
        let p_minus_1 = p.sub(&N::one());
        for q in prime_divisors(&self.factorize(&p_minus_1, budget)?) {
            if mod_pow(a.value(), &p_minus_1.div_floor(&q), p).is_one() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Smallest generator modulo the prime `p`.
    pub fn primitive_root(&self, p: &N, budget: &Budget) -> Result<ModInt<N>> {
        self.require_prime(p, "primitive root search")?;
        let p_minus_1 = p.sub(&N::one());
        let primes = prime_divisors(&self.factorize(&p_minus_1, budget)?);

        let mut g = N::one();
        while g < *p {
            budget.check()?;
            let is_root = primes
                .iter()
                .all(|q| !mod_pow(&g, &p_minus_1.div_floor(q), p).is_one());
            if is_root {
                return Ok(ModInt::from_reduced(g, p.clone()));
            }
            g = g.add(&N::one());
        }
        Err(Error::NoSolution)
    }

    /// Smallest `x >= 0` with `base^x == value`.
    ///
    /// Baby-step giant-step, extended to moduli that share factors with the
    /// base: common factors are divided out first, each contributing one to
    /// the exponent offset.
    pub fn discrete_log(&self, value: &ModInt<N>, base: &ModInt<N>, budget: &Budget) -> Result<N> {
        if value.modulus() != base.modulus() {
            return Err(Error::invalid("discrete log operands have different moduli"));
        }
        let one = N::one();
        let mut m = value.modulus().clone();
        let a = base.value().clone();
        let mut b = value.value().clone();

        // k * a^(x - offset) == b (mod m) once a is a unit
        let mut k = one.mod_floor(&m);
        let mut offset = N::zero();
        loop {
            let g = a.gcd(&m);
            if g.is_one() {
                break;
            }
            if b == k {
                return Ok(offset);
            }
            if !b.mod_floor(&g).is_zero() {
                return Err(Error::NoSolution);
            }
            b = b.div_floor(&g);
            m = m.div_floor(&g);
            offset = offset.add(&one);
            k = k.mul(&a.div_floor(&g)).mod_floor(&m);
            budget.check()?;
        }
        let a = a.mod_floor(&m);
        let b = b.mod_floor(&m);
        let k = k.mod_floor(&m);

        let n = m.sqrt_floor().add(&one);
        let a_n = mod_pow(&a, &n, &m);

        // baby steps: b * a^q for q in [0, n]; later q overwrite earlier ones
        let mut table: HashMap<N, N> = HashMap::new();
        let mut cur = b;
        let mut q = N::zero();
        let mut steps = 0u64;
        while q <= n {
            table.insert(cur.clone(), q.clone());
            cur = cur.mul(&a).mod_floor(&m);
            q = q.add(&one);
            steps += 1;
            if steps % CHECK_INTERVAL == 0 {
                budget.check()?;
            }
        }
        debug!(modulus = %m, entries = table.len(), "discrete log baby steps ready");

        // giant steps: k * a^(n p) for p in [1, n]
        let mut cur = k;
        let mut p = one.clone();
        while p <= n {
            cur = cur.mul(&a_n).mod_floor(&m);
            if let Some(q) = table.get(&cur) {
                return Ok(n.mul(&p).sub(q).add(&offset));
            }
            p = p.add(&one);
            steps += 1;
            if steps % CHECK_INTERVAL == 0 {
                budget.check()?;
            }
        }
        Err(Error::NoSolution)
    }

    /// Every square root of `a`, ascending.
    ///
    /// Prime moduli use Tonelli–Shanks; other moduli are scanned exhaustively
    /// under the budget.
    pub fn sqrt(&self, a: &ModInt<N>, budget: &Budget) -> Result<Vec<ModInt<N>>> {
        let m = a.modulus();
        if self.is_prime(m) {
            return Ok(tonelli_shanks(a)
                .map(|r| {
                    let other = m.sub(&r).mod_floor(m);
                    let mut roots = vec![r, other];
                    roots.sort();
                    roots.dedup();
                    roots
                        .into_iter()
                        .map(|v| ModInt::from_reduced(v, m.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default());
        }

        let mut roots = Vec::new();
        let mut x = N::zero();
        let mut steps = 0u64;
        while x < *m {
            if x.mul(&x).mod_floor(m) == *a.value() {
                roots.push(ModInt::from_reduced(x.clone(), m.clone()));
            }
            x = x.add(&N::one());
            steps += 1;
            if steps % CHECK_INTERVAL == 0 {
                budget.check()?;
            }
        }
        Ok(roots)
    }
}

/// One square root of `a` modulo the prime modulus, or `None`.
fn tonelli_shanks<N: Numeric>(a: &ModInt<N>) -> Option<N> {
    let p = a.modulus();
    let v = a.value();
    if v.is_zero() {
        return Some(N::zero());
    }
    let one = N::one();
    let two = N::from_u64(2);
    if *p == two {
        return Some(v.clone());
    }
    if a.legendre() != 1 {
        return None;
    }

    // p - 1 = q * 2^s with q odd
    let mut q = p.sub(&one);
    let mut s = 0u64;
    while q.is_even() {
        q = q.shr(1);
        s += 1;
    }

    if s == 1 {
        // p = 3 mod 4
        let exp = p.add(&one).shr(2);
        return Some(mod_pow(v, &exp, p));
    }

    let mut z = two.clone();
    while a.with_value(&z).legendre() != -1 {
        z = z.add(&one);
    }

    let mut m = s;
    let mut c = mod_pow(&z, &q, p);
    let mut t = mod_pow(v, &q, p);
    let mut r = mod_pow(v, &q.add(&one).shr(1), p);

    while !t.is_one() {
        // least i in (0, m) with t^(2^i) == 1
        let mut i = 0u64;
        let mut t2 = t.clone();
        while !t2.is_one() {
            t2 = t2.mul(&t2).mod_floor(p);
            i += 1;
        }
        let mut b = c.clone();
        for _ in 0..(m - i - 1) {
            b = b.mul(&b).mod_floor(p);
        }
        m = i;
        c = b.mul(&b).mod_floor(p);
        t = t.mul(&c).mod_floor(p);
        r = r.mul(&b).mod_floor(p);
    }
    Some(r)
}
