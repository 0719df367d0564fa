use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::collections::BTreeMap;

use num_bigint::BigInt;

use crate::algebra::ring::Ring;
use crate::config::DEFAULT_PRIMALITY_ROUNDS;
use crate::error::{Error, Result};
use crate::numeric::Numeric;
use crate::structures::modint::ModInt;
use crate::utils::{is_probable_prime, mod_inverse, mod_pow};

/// One term `coefficient * x^degree` of a polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<N: Numeric = BigInt> {
    pub coefficient: ModInt<N>,
    pub degree: usize,
}

/// Polynomial over the prime field GF(p).
///
/// Terms are kept in a map keyed by degree. Coefficients are reduced into
/// `[1, p)`; a zero coefficient is never stored, so the zero polynomial has
/// no terms.
///
/// Every operation returns a new polynomial. Mixing polynomials over
/// different primes in an operator panics.
///
/// # Example
///
/// ```
/// use modfield::Polynomial;
///
/// // x + 1 over GF(5)
/// let p = Polynomial::new(vec![(1i128, 1), (1, 0)], 5).unwrap();
/// assert_eq!((p.clone() + p).to_string(), "2x+2");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial<N: Numeric = BigInt> {
    terms: BTreeMap<usize, N>,
    modulus: N,
}

pub(crate) fn check_prime<N: Numeric>(modulus: &N) -> Result<()> {
    if is_probable_prime(modulus, DEFAULT_PRIMALITY_ROUNDS, &mut rand::thread_rng()) {
        Ok(())
    } else {
        Err(Error::invalid(format!("modulus {modulus} should be prime")))
    }
}

impl<N: Numeric> Polynomial<N> {
    /// Create a polynomial from `(coefficient, degree)` pairs in any order.
    ///
    /// Coefficients are reduced modulo `modulus`, duplicate degrees are
    /// summed and zero terms dropped.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `modulus` is not prime.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// let p = Polynomial::new(vec![(3i128, 0), (2, 2), (4, 2), (-1, 1)], 7).unwrap();
    /// assert_eq!(p.to_string(), "6x^2+6x+3");
    /// assert!(Polynomial::new(vec![(1i128, 1)], 8).is_err());
    /// ```
    pub fn new(pairs: impl IntoIterator<Item = (N, usize)>, modulus: N) -> Result<Self> {
        check_prime(&modulus)?;
        Ok(Self::from_pairs_unchecked(pairs, modulus))
    }

    /// Build without the primality check, for moduli already validated.
    pub(crate) fn from_pairs_unchecked(
        pairs: impl IntoIterator<Item = (N, usize)>,
        modulus: N,
    ) -> Self {
        let mut terms: BTreeMap<usize, N> = BTreeMap::new();
        for (coefficient, degree) in pairs {
            let entry = terms.entry(degree).or_insert_with(N::zero);
            *entry = entry.add(&coefficient).mod_floor(&modulus);
        }
        terms.retain(|_, c| !c.is_zero());
        Self { terms, modulus }
    }

    fn with_terms(&self, terms: BTreeMap<usize, N>) -> Self {
        Self {
            terms,
            modulus: self.modulus.clone(),
        }
    }

    /// The zero polynomial over GF(`modulus`).
    pub fn zero(modulus: N) -> Result<Self> {
        Self::new(core::iter::empty(), modulus)
    }

    /// The constant polynomial `c`.
    pub fn constant(c: N, modulus: N) -> Result<Self> {
        Self::new([(c, 0)], modulus)
    }

    /// The monomial `c * x^degree`.
    pub fn monomial(c: N, degree: usize, modulus: N) -> Result<Self> {
        Self::new([(c, degree)], modulus)
    }

    /// The polynomial `x`.
    pub fn x(modulus: N) -> Result<Self> {
        Self::monomial(N::one(), 1, modulus)
    }

    /// `x^degree + ... + x + 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// assert_eq!(Polynomial::all_ones(3, 2i128).unwrap().to_string(), "x^3+x^2+x+1");
    /// ```
    pub fn all_ones(degree: usize, modulus: N) -> Result<Self> {
        Self::new((0..=degree).map(|d| (N::one(), d)), modulus)
    }

    /// The `order`-th cyclotomic polynomial reduced modulo a prime.
    ///
    /// Built from `x^n - 1 = ∏_{d | n} Φ_d(x)`: each `Φ_d` is `x^d - 1`
    /// divided by the cyclotomic polynomials of the proper divisors of `d`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `order` is zero or `modulus` is not prime.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// let phi6 = Polynomial::cyclotomic(6, 7i128).unwrap();
    /// assert_eq!(phi6.to_string(), "x^2+6x+1"); // x^2 - x + 1
    /// ```
    pub fn cyclotomic(order: usize, modulus: N) -> Result<Self> {
        if order == 0 {
            return Err(Error::invalid("cyclotomic order must be positive"));
        }
        check_prime(&modulus)?;

        let divisors: Vec<usize> = (1..=order).filter(|d| order % d == 0).collect();
        let mut built: BTreeMap<usize, Self> = BTreeMap::new();
        for &d in &divisors {
            let mut phi = Self::from_pairs_unchecked(
                [(N::one(), d), (N::zero().sub(&N::one()), 0)],
                modulus.clone(),
            );
            for (&e, factor) in built.iter() {
                if d % e == 0 {
                    phi = phi.quotient(factor)?;
                }
            }
            built.insert(d, phi);
        }
        built
            .remove(&order)
            .ok_or_else(|| Error::invalid("cyclotomic construction failed"))
    }

    /// The prime the coefficients are reduced by.
    pub fn modulus(&self) -> &N {
        &self.modulus
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Highest degree with a non-zero coefficient; `None` for zero.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// assert_eq!(Polynomial::new(vec![(1i128, 4), (1, 0)], 3).unwrap().degree(), Some(4));
    /// assert_eq!(Polynomial::zero(3i128).unwrap().degree(), None);
    /// ```
    pub fn degree(&self) -> Option<usize> {
        self.terms.keys().next_back().copied()
    }

    /// Number of stored (non-zero) terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    fn lift(&self, c: N) -> ModInt<N> {
        ModInt::from_reduced(c, self.modulus.clone())
    }

    /// Coefficient of `x^degree`, zero when absent.
    pub fn coeff(&self, degree: usize) -> ModInt<N> {
        self.lift(self.terms.get(&degree).cloned().unwrap_or_else(N::zero))
    }

    pub fn leading_coeff(&self) -> Option<ModInt<N>> {
        self.terms
            .values()
            .next_back()
            .map(|c| self.lift(c.clone()))
    }

    /// Terms in descending degree.
    pub fn nodes(&self) -> impl Iterator<Item = Node<N>> + '_ {
        self.terms.iter().rev().map(|(&degree, c)| Node {
            coefficient: self.lift(c.clone()),
            degree,
        })
    }

    /// `(coefficient, degree)` pairs in descending degree.
    pub fn to_pairs(&self) -> Vec<(N, usize)> {
        self.terms
            .iter()
            .rev()
            .map(|(&d, c)| (c.clone(), d))
            .collect()
    }

    /// A copy with `coefficient * x^degree` added.
    pub fn add_term(&self, coefficient: &N, degree: usize) -> Self {
        let mut terms = self.terms.clone();
        let sum = terms
            .get(&degree)
            .cloned()
            .unwrap_or_else(N::zero)
            .add(coefficient)
            .mod_floor(&self.modulus);
        if sum.is_zero() {
            terms.remove(&degree);
        } else {
            terms.insert(degree, sum);
        }
        self.with_terms(terms)
    }

    /// A copy without the `x^degree` term.
    pub fn remove_term(&self, degree: usize) -> Self {
        let mut terms = self.terms.clone();
        terms.remove(&degree);
        self.with_terms(terms)
    }

    fn assert_same_modulus(&self, other: &Self) {
        assert!(
            self.modulus == other.modulus,
            "Polynomial operands must have the same modulus ({} vs {})",
            self.modulus,
            other.modulus
        );
    }

    fn check_same_modulus(&self, other: &Self) -> Result<()> {
        if self.modulus == other.modulus {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "polynomials over different primes ({} vs {})",
                self.modulus, other.modulus
            )))
        }
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        self.assert_same_modulus(rhs);
        let mut terms = self.terms.clone();
        for (&d, c) in &rhs.terms {
            let sum = terms
                .get(&d)
                .map_or_else(|| c.clone(), |a| a.add(c).mod_floor(&self.modulus));
            if sum.is_zero() {
                terms.remove(&d);
            } else {
                terms.insert(d, sum);
            }
        }
        self.with_terms(terms)
    }

    fn neg_ref(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(&d, c)| (d, self.modulus.sub(c)))
            .collect();
        self.with_terms(terms)
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        self.assert_same_modulus(rhs);
        let mut terms: BTreeMap<usize, N> = BTreeMap::new();
        for (&da, a) in &self.terms {
            for (&db, b) in &rhs.terms {
                let entry = terms.entry(da + db).or_insert_with(N::zero);
                *entry = entry.add(&a.mul(b)).mod_floor(&self.modulus);
            }
        }
        terms.retain(|_, c| !c.is_zero());
        self.with_terms(terms)
    }

    /// Multiply every coefficient by the scalar `c`.
    pub fn scale(&self, c: &N) -> Self {
        let c = c.mod_floor(&self.modulus);
        if c.is_zero() {
            return self.zero_like();
        }
        let terms = self
            .terms
            .iter()
            .map(|(&d, a)| (d, a.mul(&c).mod_floor(&self.modulus)))
            .collect();
        self.with_terms(terms)
    }

    /// Divide every coefficient by the scalar `c`.
    ///
    /// # Errors
    ///
    /// [`Error::NoInverse`] if `c` is divisible by the modulus.
    pub fn div_scalar(&self, c: &N) -> Result<Self> {
        let inv = mod_inverse(c, &self.modulus).ok_or(Error::NoInverse)?;
        Ok(self.scale(&inv))
    }

    /// Scale so the leading coefficient is one. `None` for zero.
    pub fn monic(&self) -> Option<Self> {
        let lead = self.terms.values().next_back()?;
        let inv = mod_inverse(lead, &self.modulus)?;
        Some(self.scale(&inv))
    }

    /// Classic long division.
    ///
    /// Returns `(q, r)` with `self = q * divisor + r` and
    /// `deg(r) < deg(divisor)`.
    ///
    /// # Errors
    ///
    /// [`Error::DivisionByZero`] if `divisor` is zero,
    /// [`Error::InvalidArgument`] if the moduli differ.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// // (x^2 - 1) / (x - 1) over GF(7)
    /// let a = Polynomial::new(vec![(1i128, 2), (-1, 0)], 7).unwrap();
    /// let b = Polynomial::new(vec![(1i128, 1), (-1, 0)], 7).unwrap();
    /// let (q, r) = a.div_rem(&b).unwrap();
    /// assert_eq!(q.to_string(), "x+1");
    /// assert_eq!(r.to_string(), "0");
    /// ```
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        self.check_same_modulus(divisor)?;
        let (divisor_deg, divisor_lead) = divisor
            .terms
            .iter()
            .next_back()
            .ok_or(Error::DivisionByZero)?;
        let lead_inv = mod_inverse(divisor_lead, &self.modulus).ok_or(Error::NoInverse)?;

        let mut remainder = self.terms.clone();
        let mut quotient: BTreeMap<usize, N> = BTreeMap::new();

        loop {
            let (d, factor) = match remainder.iter().next_back() {
                Some((&d, c)) if d >= *divisor_deg => {
                    (d, c.mul(&lead_inv).mod_floor(&self.modulus))
                }
                _ => break,
            };
            let shift = d - divisor_deg;
            for (&e, dc) in &divisor.terms {
                let slot = remainder.entry(e + shift).or_insert_with(N::zero);
                *slot = slot.sub(&factor.mul(dc)).mod_floor(&self.modulus);
                if slot.is_zero() {
                    remainder.remove(&(e + shift));
                }
            }
            quotient.insert(shift, factor);
        }

        Ok((self.with_terms(quotient), self.with_terms(remainder)))
    }

    /// Quotient of [`div_rem`](Self::div_rem).
    pub fn quotient(&self, divisor: &Self) -> Result<Self> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    /// Remainder of [`div_rem`](Self::div_rem).
    pub fn remainder(&self, divisor: &Self) -> Result<Self> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Formal derivative.
    ///
    /// Terms whose new coefficient `degree * c` vanishes modulo p are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// // d/dx (x^5 + 3x^2 + 4) over GF(5) = 6x = x
    /// let p = Polynomial::new(vec![(1i128, 5), (3, 2), (4, 0)], 5).unwrap();
    /// assert_eq!(p.derivative().to_string(), "x");
    /// ```
    pub fn derivative(&self) -> Self {
        let pairs = self
            .terms
            .iter()
            .filter(|(&d, _)| d > 0)
            .map(|(&d, c)| (c.mul(&N::from_u64(d as u64)), d - 1));
        Self::from_pairs_unchecked(pairs, self.modulus.clone())
    }

    /// Evaluate at an integer point, reduced modulo p.
    ///
    /// Horner's rule over the sparse terms: gaps between degrees are bridged
    /// with a single modular power.
    pub fn eval_int(&self, x: &N) -> ModInt<N> {
        let p = &self.modulus;
        let x = x.mod_floor(p);
        let mut acc = N::zero();
        let mut prev: Option<usize> = None;
        for (&d, c) in self.terms.iter().rev() {
            if let Some(prev) = prev {
                let gap = N::from_u64((prev - d) as u64);
                acc = acc.mul(&mod_pow(&x, &gap, p)).mod_floor(p);
            }
            acc = acc.add(c).mod_floor(p);
            prev = Some(d);
        }
        if let Some(last) = prev {
            let gap = N::from_u64(last as u64);
            acc = acc.mul(&mod_pow(&x, &gap, p)).mod_floor(p);
        }
        self.lift(acc)
    }

    /// Evaluate at a field element.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `x` is reduced by a different modulus.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::{ModInt, Polynomial};
    ///
    /// // 3x^2 + 2x + 1 at x = 2 over GF(17): 12 + 4 + 1 = 17 = 0
    /// let p = Polynomial::new(vec![(3i128, 2), (2, 1), (1, 0)], 17).unwrap();
    /// let x = ModInt::new(2i128, 17).unwrap();
    /// assert_eq!(*p.eval(&x).unwrap().value(), 0);
    /// ```
    pub fn eval(&self, x: &ModInt<N>) -> Result<ModInt<N>> {
        if *x.modulus() != self.modulus {
            return Err(Error::invalid(format!(
                "evaluation point is reduced mod {}, polynomial mod {}",
                x.modulus(),
                self.modulus
            )));
        }
        Ok(self.eval_int(x.value()))
    }

    /// Greatest common divisor, monic unless both inputs are zero.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// // gcd((x-1)(x-2), (x-2)(x-3)) = x - 2 over GF(17)
    /// let a = Polynomial::new(vec![(1i128, 2), (-3, 1), (2, 0)], 17).unwrap();
    /// let b = Polynomial::new(vec![(1i128, 2), (-5, 1), (6, 0)], 17).unwrap();
    /// assert_eq!(Polynomial::gcd(&a, &b).to_string(), "x+15");
    /// ```
    pub fn gcd(a: &Self, b: &Self) -> Self {
        a.assert_same_modulus(b);
        let mut x = a.clone();
        let mut y = b.clone();
        while !y.is_zero() {
            let r = x.remainder(&y).unwrap_or_else(|_| y.zero_like());
            x = core::mem::replace(&mut y, r);
        }
        x.monic().unwrap_or(x)
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, s, t)` with `s*a + t*b = g`, where `g` is the monic gcd
    /// (zero when both inputs are zero).
    pub fn extended_gcd(a: &Self, b: &Self) -> (Self, Self, Self) {
        a.assert_same_modulus(b);
        let (mut old_r, mut r) = (a.clone(), b.clone());
        let (mut old_s, mut s) = (a.one_like(), a.zero_like());
        let (mut old_t, mut t) = (a.zero_like(), a.one_like());

        while !r.is_zero() {
            let (q, rem) = match old_r.div_rem(&r) {
                Ok(qr) => qr,
                Err(_) => break,
            };
            old_r = core::mem::replace(&mut r, rem);
            let next_s = old_s - q.mul_ref(&s);
            old_s = core::mem::replace(&mut s, next_s);
            let next_t = old_t - q.mul_ref(&t);
            old_t = core::mem::replace(&mut t, next_t);
        }

        if old_r.is_zero() {
            return (old_r, a.zero_like(), a.zero_like());
        }
        let lead_inv = old_r
            .terms
            .values()
            .next_back()
            .and_then(|lead| mod_inverse(lead, &old_r.modulus));
        match lead_inv {
            Some(inv) => (old_r.scale(&inv), old_s.scale(&inv), old_t.scale(&inv)),
            None => (old_r, old_s, old_t),
        }
    }

    /// `self^exp mod modulus` by square-and-multiply.
    ///
    /// # Errors
    ///
    /// [`Error::DivisionByZero`] if `modulus` is zero,
    /// [`Error::InvalidArgument`] for a negative exponent.
    pub fn pow_mod(&self, exp: &N, modulus: &Self) -> Result<Self> {
        if exp.is_negative() {
            return Err(Error::invalid("negative exponent"));
        }
        let base = self.remainder(modulus)?;
        let mut result = self.one_like().remainder(modulus)?;
        for i in (0..exp.bits()).rev() {
            result = result.mul_ref(&result).remainder(modulus)?;
            if exp.bit(i) {
                result = result.mul_ref(&base).remainder(modulus)?;
            }
        }
        Ok(result)
    }

    /// Rabin's irreducibility test over GF(p).
    ///
    /// A polynomial `f` of degree `n` is irreducible iff
    /// `x^(p^n) ≡ x (mod f)` and `gcd(x^(p^(n/q)) - x, f) = 1` for every
    /// prime `q | n`. Constants and zero are not irreducible.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::Polynomial;
    ///
    /// // x^2 - 3 is irreducible over GF(17); x^2 - 4 is not
    /// assert!(Polynomial::new(vec![(1i128, 2), (-3, 0)], 17).unwrap().is_irreducible());
    /// assert!(!Polynomial::new(vec![(1i128, 2), (-4, 0)], 17).unwrap().is_irreducible());
    /// ```
    pub fn is_irreducible(&self) -> bool {
        let n = match self.degree() {
            None | Some(0) => return false,
            Some(1) => return true,
            Some(d) => d,
        };
        let Some(f) = self.monic() else {
            return false;
        };

        let x = Self::from_pairs_unchecked([(N::one(), 1)], self.modulus.clone());
        let prime_divisors = small_prime_divisors(n);

        // h = x^(p^i) mod f
        let mut h = x.clone();
        for i in 1..=n {
            h = match h.pow_mod(&self.modulus, &f) {
                Ok(next) => next,
                Err(_) => return false,
            };
            if prime_divisors.iter().any(|&q| i * q == n) {
                let g = Self::gcd(&(h.clone() - &x), &f);
                if g.degree() != Some(0) {
                    return false;
                }
            }
        }
        (h - &x).is_zero()
    }
}

/// Distinct prime divisors of a small integer, ascending.
fn small_prime_divisors(mut n: usize) -> Vec<usize> {
    let mut primes = Vec::new();
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            primes.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        primes.push(n);
    }
    primes
}

/* ---- Arithmetic operators ---- */

impl<N: Numeric> Add for Polynomial<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_ref(&rhs)
    }
}

impl<N: Numeric> Add<&Polynomial<N>> for Polynomial<N> {
    type Output = Self;

    fn add(self, rhs: &Polynomial<N>) -> Self::Output {
        self.add_ref(rhs)
    }
}

impl<N: Numeric> Add<&Polynomial<N>> for &Polynomial<N> {
    type Output = Polynomial<N>;

    fn add(self, rhs: &Polynomial<N>) -> Self::Output {
        self.add_ref(rhs)
    }
}

impl<N: Numeric> Neg for Polynomial<N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.neg_ref()
    }
}

impl<N: Numeric> Sub for Polynomial<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.add_ref(&rhs.neg_ref())
    }
}

impl<N: Numeric> Sub<&Polynomial<N>> for Polynomial<N> {
    type Output = Self;

    fn sub(self, rhs: &Polynomial<N>) -> Self::Output {
        self.add_ref(&rhs.neg_ref())
    }
}

impl<N: Numeric> Sub<&Polynomial<N>> for &Polynomial<N> {
    type Output = Polynomial<N>;

    fn sub(self, rhs: &Polynomial<N>) -> Self::Output {
        self.add_ref(&rhs.neg_ref())
    }
}

impl<N: Numeric> Mul for Polynomial<N> {
    type Output = Self;

    /// Sparse schoolbook multiplication.
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_ref(&rhs)
    }
}

impl<N: Numeric> Mul<&Polynomial<N>> for Polynomial<N> {
    type Output = Self;

    fn mul(self, rhs: &Polynomial<N>) -> Self::Output {
        self.mul_ref(rhs)
    }
}

impl<N: Numeric> Mul<&Polynomial<N>> for &Polynomial<N> {
    type Output = Polynomial<N>;

    fn mul(self, rhs: &Polynomial<N>) -> Self::Output {
        self.mul_ref(rhs)
    }
}

/// Quotient of long division; panics on a zero divisor.
impl<N: Numeric> Div for Polynomial<N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.quotient(&rhs)
            .expect("division by the zero polynomial")
    }
}

impl<N: Numeric> Div<&Polynomial<N>> for &Polynomial<N> {
    type Output = Polynomial<N>;

    fn div(self, rhs: &Polynomial<N>) -> Self::Output {
        self.quotient(rhs)
            .expect("division by the zero polynomial")
    }
}

/// Remainder of long division; panics on a zero divisor.
impl<N: Numeric> Rem for Polynomial<N> {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Polynomial::remainder(&self, &rhs).expect("division by the zero polynomial")
    }
}

impl<N: Numeric> Rem<&Polynomial<N>> for &Polynomial<N> {
    type Output = Polynomial<N>;

    fn rem(self, rhs: &Polynomial<N>) -> Self::Output {
        Polynomial::remainder(self, rhs).expect("division by the zero polynomial")
    }
}

/* ---- implement Ring ---- */

impl<N: Numeric> Ring for Polynomial<N> {
    fn zero_like(&self) -> Self {
        self.with_terms(BTreeMap::new())
    }

    fn one_like(&self) -> Self {
        Self::from_pairs_unchecked([(N::one(), 0)], self.modulus.clone())
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Descending terms joined by `+`: `3x^2+x+1`. The zero polynomial is `0`.
impl<N: Numeric> fmt::Display for Polynomial<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        let mut first = true;
        for (&d, c) in self.terms.iter().rev() {
            if !first {
                write!(f, "+")?;
            }
            first = false;

            match d {
                0 => write!(f, "{c}")?,
                1 if c.is_one() => write!(f, "x")?,
                1 => write!(f, "{c}x")?,
                _ if c.is_one() => write!(f, "x^{d}")?,
                _ => write!(f, "{c}x^{d}")?,
            }
        }
        Ok(())
    }
}

impl<N: Numeric> fmt::Debug for Polynomial<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial({} over GF({}))", self, self.modulus)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PolynomialRepr {
    modulus: String,
    terms: Vec<(String, usize)>,
}

#[cfg(feature = "serde")]
impl<N: Numeric> serde::Serialize for Polynomial<N> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        PolynomialRepr {
            modulus: self.modulus.to_string(),
            terms: self
                .terms
                .iter()
                .rev()
                .map(|(&d, c)| (c.to_string(), d))
                .collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, N: Numeric> serde::Deserialize<'de> for Polynomial<N> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let repr = PolynomialRepr::deserialize(deserializer)?;
        let modulus = N::parse_decimal(&repr.modulus)
            .ok_or_else(|| D::Error::custom(format!("invalid modulus {:?}", repr.modulus)))?;
        let mut pairs = Vec::with_capacity(repr.terms.len());
        for (c, d) in repr.terms {
            let c = N::parse_decimal(&c)
                .ok_or_else(|| D::Error::custom(format!("invalid coefficient {c:?}")))?;
            pairs.push((c, d));
        }
        Self::new(pairs, modulus).map_err(D::Error::custom)
    }
}
