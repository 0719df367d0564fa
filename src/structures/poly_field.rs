//! Quotient fields `GF(p)[x] / (f)`.
//!
//! With `f` irreducible of degree `n` over GF(p) this is the extension field
//! GF(p^n). Irreducibility of `f` is not enforced by [`PolyField::new`]; use
//! [`PolyField::new_irreducible`] or [`Polynomial::is_irreducible`] when the
//! modulus comes from outside.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigInt;
use tracing::debug;

use crate::algebra::field::Field;
use crate::algebra::ring::Ring;
use crate::budget::Budget;
use crate::error::{Error, Result};
use crate::numeric::Numeric;
use crate::structures::poly::{check_prime, Polynomial};
use crate::theory::NumberTheory;
use crate::utils::prime_divisors;

/// Candidates between two progress events of [`PolyField::find_irreducible`].
const PROGRESS_INTERVAL: u64 = 4096;

/// Budget is polled once per this many steps of the linear order search.
const CHECK_INTERVAL: u64 = 256;

/// Element of `GF(p)[x] / (f)`.
///
/// The value is always reduced: `deg(value) < deg(f)`. The modulus is
/// shared between elements of the same field.
///
/// # Example
///
/// ```
/// use modfield::{Field, PolyField, Polynomial};
///
/// // GF(16) = GF(2)[x] / (x^4 + x + 1)
/// let f = Polynomial::new(vec![(1i128, 4), (1, 1), (1, 0)], 2).unwrap();
/// let x = PolyField::from_pairs(2, f.clone(), vec![(1, 1)]).unwrap();
///
/// let inv = x.inverse().unwrap();
/// assert_eq!(inv.to_string(), "x^3+1");
/// assert_eq!((x * inv).to_string(), "1");
///
/// // x^4 reduces to x + 1
/// assert_eq!(PolyField::from_pairs(2, f, vec![(1, 4)]).unwrap().to_string(), "x+1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PolyField<N: Numeric = BigInt> {
    num_mod: N,
    modulus: Arc<Polynomial<N>>,
    value: Polynomial<N>,
}

impl<N: Numeric> PolyField<N> {
    /// Create the class of `value` modulo `modulus`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `num_mod` is not prime, `modulus` is
    /// constant, or either polynomial is over a different prime.
    pub fn new(num_mod: N, modulus: Polynomial<N>, value: Polynomial<N>) -> Result<Self> {
        check_prime(&num_mod)?;
        for (what, p) in [("modulus", &modulus), ("value", &value)] {
            if *p.modulus() != num_mod {
                return Err(Error::invalid(format!(
                    "{what} polynomial is over GF({}), expected GF({num_mod})",
                    p.modulus()
                )));
            }
        }
        if modulus.degree().unwrap_or(0) < 1 {
            return Err(Error::invalid("field modulus must have degree at least 1"));
        }

        let field = Self {
            num_mod,
            modulus: Arc::new(modulus),
            value: value.zero_like(),
        };
        Ok(field.with_value(value))
    }

    /// Like [`new`](Self::new), but also rejects a reducible modulus.
    ///
    /// # Errors
    ///
    /// [`Error::NotIrreducible`] if `modulus` factors over GF(`num_mod`).
    pub fn new_irreducible(num_mod: N, modulus: Polynomial<N>, value: Polynomial<N>) -> Result<Self> {
        if !modulus.is_irreducible() {
            return Err(Error::NotIrreducible);
        }
        Self::new(num_mod, modulus, value)
    }

    /// Element given by `(coefficient, degree)` pairs.
    pub fn from_pairs(
        num_mod: N,
        modulus: Polynomial<N>,
        pairs: impl IntoIterator<Item = (N, usize)>,
    ) -> Result<Self> {
        // pairs are reduced modulo num_mod, which must be checked first
        check_prime(&num_mod)?;
        let value = Polynomial::from_pairs_unchecked(pairs, num_mod.clone());
        Self::new(num_mod, modulus, value)
    }

    /// The multiplicative identity.
    pub fn one(num_mod: N, modulus: Polynomial<N>) -> Result<Self> {
        Self::from_pairs(num_mod, modulus, [(N::one(), 0)])
    }

    pub fn zero(num_mod: N, modulus: Polynomial<N>) -> Result<Self> {
        Self::from_pairs(num_mod, modulus, core::iter::empty())
    }

    /// Another element of the same field, reduced modulo the field modulus.
    fn with_value(&self, value: Polynomial<N>) -> Self {
        let value = if value.degree() < self.modulus.degree() {
            value
        } else {
            &value % &*self.modulus
        };
        Self {
            num_mod: self.num_mod.clone(),
            modulus: Arc::clone(&self.modulus),
            value,
        }
    }

    pub fn value(&self) -> &Polynomial<N> {
        &self.value
    }

    pub fn modulus(&self) -> &Polynomial<N> {
        &self.modulus
    }

    pub fn num_mod(&self) -> &N {
        &self.num_mod
    }

    /// Degree of the field modulus.
    pub fn degree(&self) -> usize {
        self.modulus.degree().unwrap_or(0)
    }

    /// `p^n - 1`, the size of the multiplicative group when the modulus is
    /// irreducible.
    pub fn group_order(&self) -> N {
        let mut size = N::one();
        for _ in 0..self.degree() {
            size = size.mul(&self.num_mod);
        }
        size.sub(&N::one())
    }

    fn assert_same_field(&self, other: &Self) {
        assert!(
            self.num_mod == other.num_mod
                && (Arc::ptr_eq(&self.modulus, &other.modulus) || self.modulus == other.modulus),
            "PolyField operands must have the same modulus ({} vs {})",
            self.modulus,
            other.modulus
        );
    }

    /// Multiply by the scalar `c`.
    pub fn scale(&self, c: &N) -> Self {
        self.with_value(self.value.scale(c))
    }

    /// Add `coefficient * x^degree`, reducing the result.
    pub fn add_term(&self, coefficient: &N, degree: usize) -> Self {
        self.with_value(self.value.add_term(coefficient, degree))
    }

    /// `self^exp`; a negative exponent goes through the inverse.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::{Field, PolyField, Polynomial};
    ///
    /// let f = Polynomial::new(vec![(1i128, 2), (1, 0)], 3).unwrap(); // GF(9)
    /// let a = PolyField::from_pairs(3, f, vec![(1, 1), (1, 0)]).unwrap();
    /// assert_eq!(a.pow(&8).unwrap().to_string(), "1");
    /// assert_eq!(a.pow(&-1).unwrap(), a.inverse().unwrap());
    /// ```
    pub fn pow(&self, exp: &N) -> Result<Self> {
        if exp.is_negative() {
            return Ok(self.inverse()?.pow_by(&exp.abs()));
        }
        Ok(self.pow_by(exp))
    }

    /// Whether the value, taken as a plain polynomial, is irreducible.
    pub fn is_irreducible(&self) -> bool {
        self.value.is_irreducible()
    }

    /// Multiplicative order with the default factorizer and no time limit.
    pub fn order(&self) -> Result<N> {
        self.order_with(&NumberTheory::default(), &Budget::unlimited())
    }

    /// Smallest `k >= 1` with `self^k == 1`.
    ///
    /// When `self^(p^n - 1) == 1` (always the case over an irreducible
    /// modulus) the order is found by stripping the prime factors of
    /// `p^n - 1`. Otherwise the powers are walked one by one, at most
    /// `p^n - 1` of them.
    ///
    /// # Errors
    ///
    /// [`Error::NoSolution`] for an element that is not a unit.
    pub fn order_with(&self, theory: &NumberTheory<N>, budget: &Budget) -> Result<N> {
        if self.value.is_zero() {
            return Err(Error::NoSolution);
        }
        self.inverse().map_err(|_| Error::NoSolution)?;

        let one = self.one_like();
        let group = self.group_order();

        if self.pow_by(&group) == one {
            let mut order = group.clone();
            for q in prime_divisors(&theory.factorize(&group, budget)?) {
                while order.mod_floor(&q).is_zero() {
                    budget.check()?;
                    let candidate = order.div_floor(&q);
                    if self.pow_by(&candidate) == one {
                        order = candidate;
                    } else {
                        break;
                    }
                }
            }
            return Ok(order);
        }

        debug!(modulus = %self.modulus, bound = %group, "order falls back to linear search");
        let mut power = self.clone();
        let mut k = N::one();
        let mut steps = 0u64;
        while k <= group {
            if power == one {
                return Ok(k);
            }
            power = power * self;
            k = k.add(&N::one());
            steps += 1;
            if steps % CHECK_INTERVAL == 0 {
                budget.check()?;
            }
        }
        Err(Error::NoSolution)
    }

    /// Whether `self` generates the whole multiplicative group.
    pub fn is_generator(&self) -> Result<bool> {
        self.is_generator_with(&NumberTheory::default(), &Budget::unlimited())
    }

    pub fn is_generator_with(&self, theory: &NumberTheory<N>, budget: &Budget) -> Result<bool> {
        match self.order_with(theory, budget) {
            Ok(order) => Ok(order == self.group_order()),
            Err(Error::NoSolution) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Whether the field modulus is a primitive polynomial: irreducible, and
    /// `x` generates the multiplicative group.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::{PolyField, Polynomial};
    ///
    /// let primitive = Polynomial::new(vec![(1i128, 4), (1, 1), (1, 0)], 2).unwrap();
    /// assert!(PolyField::one(2, primitive).unwrap().is_primitive().unwrap());
    ///
    /// // irreducible, but x has order 5
    /// let cyclotomic = Polynomial::all_ones(4, 2i128).unwrap();
    /// assert!(!PolyField::one(2, cyclotomic).unwrap().is_primitive().unwrap());
    /// ```
    pub fn is_primitive(&self) -> Result<bool> {
        if !self.modulus.is_irreducible() {
            return Ok(false);
        }
        let x = Polynomial::from_pairs_unchecked([(N::one(), 1)], self.num_mod.clone());
        self.with_value(x).is_generator()
    }

    /// Monic irreducible polynomials of degree `k` over GF(`num_mod`).
    ///
    /// Candidates are visited in ascending order of their coefficient
    /// vectors, read from `x^(k-1)` down to the constant term. The search
    /// stops after `limit` results when one is given.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `k` is zero or `num_mod` is not prime,
    /// [`Error::Interrupted`] if the budget runs out.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::{Budget, PolyField};
    ///
    /// let found = PolyField::find_irreducible(3i128, 2, None, &Budget::unlimited()).unwrap();
    /// let names: Vec<String> = found.iter().map(|p| p.to_string()).collect();
    /// assert_eq!(names, ["x^2+1", "x^2+x+2", "x^2+2x+2"]);
    /// ```
    pub fn find_irreducible(
        num_mod: N,
        k: usize,
        limit: Option<usize>,
        budget: &Budget,
    ) -> Result<Vec<Polynomial<N>>> {
        if k == 0 {
            return Err(Error::invalid("degree must be positive"));
        }
        check_prime(&num_mod)?;

        let mut found = Vec::new();
        if limit == Some(0) {
            return Ok(found);
        }

        // digits[i] is the coefficient of x^i
        let mut digits = vec![N::zero(); k];
        let mut checked = 0u64;
        loop {
            budget.check()?;
            let candidate = Polynomial::from_pairs_unchecked(
                digits
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(d, c)| (c, d))
                    .chain([(N::one(), k)]),
                num_mod.clone(),
            );
            checked += 1;
            if candidate.is_irreducible() {
                found.push(candidate);
                if limit == Some(found.len()) {
                    break;
                }
            }
            if checked % PROGRESS_INTERVAL == 0 {
                debug!(%num_mod, k, checked, found = found.len(), "irreducible search progress");
            }

            let mut i = 0;
            loop {
                if i == k {
                    debug!(%num_mod, k, checked, found = found.len(), "irreducible search exhausted");
                    return Ok(found);
                }
                digits[i] = digits[i].add(&N::one());
                if digits[i] == num_mod {
                    digits[i] = N::zero();
                    i += 1;
                } else {
                    break;
                }
            }
        }
        Ok(found)
    }
}

/* ---- Arithmetic operators ---- */

impl<N: Numeric> Add for PolyField<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_same_field(&rhs);
        self.with_value(&self.value + &rhs.value)
    }
}

impl<N: Numeric> Add<&PolyField<N>> for PolyField<N> {
    type Output = Self;

    fn add(self, rhs: &PolyField<N>) -> Self::Output {
        self.assert_same_field(rhs);
        self.with_value(&self.value + &rhs.value)
    }
}

impl<N: Numeric> Sub for PolyField<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.assert_same_field(&rhs);
        self.with_value(&self.value - &rhs.value)
    }
}

impl<N: Numeric> Sub<&PolyField<N>> for PolyField<N> {
    type Output = Self;

    fn sub(self, rhs: &PolyField<N>) -> Self::Output {
        self.assert_same_field(rhs);
        self.with_value(&self.value - &rhs.value)
    }
}

impl<N: Numeric> Mul for PolyField<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.assert_same_field(&rhs);
        self.with_value(&self.value * &rhs.value)
    }
}

impl<N: Numeric> Mul<&PolyField<N>> for PolyField<N> {
    type Output = Self;

    fn mul(self, rhs: &PolyField<N>) -> Self::Output {
        self.assert_same_field(rhs);
        self.with_value(&self.value * &rhs.value)
    }
}

impl<N: Numeric> Neg for PolyField<N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let value = -self.value.clone();
        self.with_value(value)
    }
}

/// Division implemented via multiplicative inverse.
impl<N: Numeric> Div for PolyField<N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.try_div(&rhs)
            .expect("division by a non-invertible field element")
    }
}

impl<N: Numeric> Div<&PolyField<N>> for PolyField<N> {
    type Output = Self;

    fn div(self, rhs: &PolyField<N>) -> Self::Output {
        self.try_div(rhs)
            .expect("division by a non-invertible field element")
    }
}

/* ---- implement Ring ---- */

impl<N: Numeric> Ring for PolyField<N> {
    fn zero_like(&self) -> Self {
        self.with_value(self.value.zero_like())
    }

    fn one_like(&self) -> Self {
        self.with_value(self.value.one_like())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

/* ---- implement Field ---- */

impl<N: Numeric> Field for PolyField<N> {
    /// Inverse by the extended Euclidean algorithm on `(value, modulus)`.
    fn inverse(&self) -> Result<Self> {
        let (g, s, _) = Polynomial::extended_gcd(&self.value, &self.modulus);
        if g.degree() == Some(0) {
            Ok(self.with_value(s))
        } else {
            Err(Error::NoInverse)
        }
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.assert_same_field(rhs);
        Ok(self.with_value(&self.value * &rhs.inverse()?.value))
    }
}

impl<N: Numeric> fmt::Display for PolyField<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<N: Numeric> fmt::Debug for PolyField<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolyField({} mod {} over GF({}))",
            self.value, self.modulus, self.num_mod
        )
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(bound = "")]
struct PolyFieldRepr<N: Numeric> {
    num_mod: String,
    modulus: Polynomial<N>,
    value: Polynomial<N>,
}

#[cfg(feature = "serde")]
impl<N: Numeric> serde::Serialize for PolyField<N> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        PolyFieldRepr {
            num_mod: self.num_mod.to_string(),
            modulus: (*self.modulus).clone(),
            value: self.value.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, N: Numeric> serde::Deserialize<'de> for PolyField<N> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let repr = PolyFieldRepr::<N>::deserialize(deserializer)?;
        let num_mod = N::parse_decimal(&repr.num_mod)
            .ok_or_else(|| D::Error::custom(format!("invalid prime {:?}", repr.num_mod)))?;
        Self::new(num_mod, repr.modulus, repr.value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Interrupt;
    use crate::structures::factor::TrialDivision;

    type F = PolyField<i128>;

    fn poly(pairs: &[(i128, usize)], p: i128) -> Polynomial<i128> {
        Polynomial::new(pairs.iter().copied(), p).unwrap()
    }

    /// GF(16) with the primitive modulus x^4 + x + 1.
    fn gf16() -> Polynomial<i128> {
        poly(&[(1, 4), (1, 1), (1, 0)], 2)
    }

    fn elem(modulus: &Polynomial<i128>, pairs: &[(i128, usize)]) -> F {
        let p = *modulus.modulus();
        PolyField::from_pairs(p, modulus.clone(), pairs.iter().copied()).unwrap()
    }

    /// Every element of GF(2)[x] / (f) for a degree-4 `f`.
    fn all_elements(modulus: &Polynomial<i128>) -> Vec<F> {
        (0..16usize)
            .map(|mask| {
                let pairs: Vec<(i128, usize)> =
                    (0..4).filter(|i| mask >> i & 1 == 1).map(|i| (1, i)).collect();
                elem(modulus, &pairs)
            })
            .collect()
    }

    // ---- construction tests ----

    #[test]
    fn construction_reduces() {
        let f = gf16();
        assert_eq!(elem(&f, &[(1, 4)]).to_string(), "x+1");
        assert_eq!(elem(&f, &[(1, 5)]).to_string(), "x^2+x");
        assert!(elem(&f, &[(1, 4), (1, 1), (1, 0)]).is_zero());
        assert_eq!(F::one(2, f.clone()).unwrap().to_string(), "1");
        assert!(F::zero(2, f.clone()).unwrap().is_zero());
        assert_eq!(elem(&f, &[(1, 1)]).degree(), 4);
        assert_eq!(elem(&f, &[(1, 1)]).group_order(), 15);
    }

    #[test]
    fn construction_errors() {
        let f = gf16();
        // prime mismatch
        assert!(matches!(
            F::new(3, f.clone(), poly(&[(1, 0)], 3)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            F::new(2, f.clone(), poly(&[(1, 0)], 3)),
            Err(Error::InvalidArgument(_))
        ));
        // constant modulus
        assert!(matches!(
            F::one(2, poly(&[(1, 0)], 2)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            F::one(2, poly(&[], 2)),
            Err(Error::InvalidArgument(_))
        ));
        // composite num_mod
        let over_four = Polynomial::from_pairs_unchecked([(1i128, 2), (1, 0)], 4);
        assert!(matches!(
            F::one(4, over_four),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn non_positive_prime_is_rejected() {
        let f = gf16();
        for num_mod in [0i128, -2] {
            assert!(matches!(
                F::from_pairs(num_mod, f.clone(), vec![(1, 1)]),
                Err(Error::InvalidArgument(_))
            ));
            assert!(matches!(F::one(num_mod, f.clone()), Err(Error::InvalidArgument(_))));
            assert!(matches!(F::zero(num_mod, f.clone()), Err(Error::InvalidArgument(_))));
        }
    }

    #[test]
    fn checked_constructor_rejects_reducible() {
        // x^2 + 1 = (x + 2)(x + 3) over GF(5)
        let reducible = poly(&[(1, 2), (1, 0)], 5);
        assert_eq!(
            F::new_irreducible(5, reducible.clone(), poly(&[(1, 1)], 5)),
            Err(Error::NotIrreducible)
        );
        assert!(F::new(5, reducible, poly(&[(1, 1)], 5)).is_ok());
        assert!(F::new_irreducible(2, gf16(), poly(&[(1, 1)], 2)).is_ok());
    }

    // ---- arithmetic tests ----

    #[test]
    fn arithmetic() {
        let f = gf16();
        let a = elem(&f, &[(1, 3), (1, 0)]);
        let b = elem(&f, &[(1, 2), (1, 1)]);
        assert_eq!((a.clone() + &b).to_string(), "x^3+x^2+x+1");
        // characteristic 2: a - b == a + b
        assert_eq!(a.clone() - &b, a.clone() + &b);
        // (x^3 + 1)(x^2 + x) = x^5 + x^4 + x^2 + x = (x^2 + x) + (x + 1) + x^2 + x
        assert_eq!((a.clone() * &b).to_string(), "x+1");
        assert!((a.clone() + a.clone()).is_zero());
        assert_eq!(-a.clone(), a);
    }

    #[test]
    fn negation_odd_characteristic() {
        let f = poly(&[(1, 2), (1, 0)], 3);
        let a = elem(&f, &[(1, 1), (2, 0)]);
        assert_eq!((-a.clone()).to_string(), "2x+1");
        assert!((a.clone() + -a).is_zero());
    }

    #[test]
    fn scale_and_add_term() {
        let f = poly(&[(1, 2), (1, 0)], 3);
        let a = elem(&f, &[(1, 1), (2, 0)]);
        assert_eq!(a.scale(&2).to_string(), "2x+1");
        // adding x^2 = -1 reduces
        assert_eq!(a.add_term(&1, 2).to_string(), "x+1");
    }

    #[test]
    fn inverse_of_every_unit() {
        let f = gf16();
        for a in all_elements(&f) {
            if a.is_zero() {
                assert_eq!(a.inverse(), Err(Error::NoInverse));
                continue;
            }
            let inv = a.inverse().unwrap();
            assert_eq!((a.clone() * inv).to_string(), "1", "a = {a}");
        }
    }

    #[test]
    fn non_coprime_has_no_inverse() {
        let f = poly(&[(1, 2), (1, 0)], 5);
        // x + 2 divides the modulus
        let a = elem(&f, &[(1, 1), (2, 0)]);
        assert_eq!(a.inverse(), Err(Error::NoInverse));
        assert!(a.pow(&-1).is_err());
    }

    #[test]
    fn division() {
        let f = gf16();
        let a = elem(&f, &[(1, 3), (1, 0)]);
        let b = elem(&f, &[(1, 2), (1, 1)]);
        let q = a.clone() / &b;
        assert_eq!(q * b, a);
    }

    #[test]
    #[should_panic(expected = "non-invertible")]
    fn division_by_zero_panics() {
        let f = gf16();
        let _ = elem(&f, &[(1, 1)]) / F::zero(2, f).unwrap();
    }

    #[test]
    #[should_panic(expected = "same modulus")]
    fn mixed_fields_panic() {
        let a = elem(&gf16(), &[(1, 1)]);
        let b = elem(&Polynomial::all_ones(4, 2).unwrap(), &[(1, 1)]);
        let _ = a + b;
    }

    #[test]
    fn pow_fermat() {
        let f = gf16();
        for a in all_elements(&f).into_iter().filter(|a| !a.is_zero()) {
            assert_eq!(a.pow(&15).unwrap().to_string(), "1");
            assert_eq!(a.pow(&-1).unwrap(), a.inverse().unwrap());
            assert_eq!(a.pow(&-3).unwrap() * a.pow(&3).unwrap(), a.one_like());
        }
        assert_eq!(elem(&f, &[(1, 1)]).pow(&0).unwrap().to_string(), "1");
    }

    // ---- order tests ----

    #[test]
    fn order_in_gf16() {
        let f = gf16();
        let x = elem(&f, &[(1, 1)]);
        assert_eq!(x.order().unwrap(), 15);
        assert!(x.is_generator().unwrap());
        // x^5 has order 3
        let x5 = x.pow(&5).unwrap();
        assert_eq!(x5.order().unwrap(), 3);
        assert!(!x5.is_generator().unwrap());
        assert_eq!(F::one(2, f.clone()).unwrap().order().unwrap(), 1);
        assert_eq!(F::zero(2, f.clone()).unwrap().order(), Err(Error::NoSolution));
        assert!(!F::zero(2, f).unwrap().is_generator().unwrap());
    }

    #[test]
    fn generator_count() {
        // φ(15) = 8 generators
        let f = gf16();
        let theory = NumberTheory::new(TrialDivision);
        let budget = Budget::unlimited();
        let count = all_elements(&f)
            .iter()
            .filter(|a| a.is_generator_with(&theory, &budget).unwrap())
            .count();
        assert_eq!(count, 8);
    }

    #[test]
    fn order_over_reducible_modulus() {
        // x^2 + 1 = (x + 2)(x + 3) over GF(5); x^2 = -1 so x has order 4
        let f = poly(&[(1, 2), (1, 0)], 5);
        assert_eq!(elem(&f, &[(1, 1)]).order().unwrap(), 4);

        // GF(3)[x] / (x^2): (1 + x)^3 = 1, and 3 does not divide 3^2 - 1
        let g = poly(&[(1, 2)], 3);
        assert_eq!(elem(&g, &[(1, 1), (1, 0)]).order().unwrap(), 3);
        assert_eq!(elem(&g, &[(1, 1)]).order(), Err(Error::NoSolution));
    }

    #[test]
    fn primitive_modulus() {
        assert!(F::one(2, gf16()).unwrap().is_primitive().unwrap());
        assert!(!F::one(2, Polynomial::all_ones(4, 2).unwrap())
            .unwrap()
            .is_primitive()
            .unwrap());
        assert!(!F::one(5, poly(&[(1, 2), (1, 0)], 5))
            .unwrap()
            .is_primitive()
            .unwrap());
    }

    #[test]
    fn value_irreducibility() {
        let f = poly(&[(1, 3), (1, 1), (1, 0)], 2);
        assert!(elem(&f, &[(1, 2), (1, 1), (1, 0)]).is_irreducible());
        assert!(!elem(&f, &[(1, 2), (1, 0)]).is_irreducible());
    }

    // ---- enumeration tests ----

    #[test]
    fn irreducible_counts() {
        let budget = Budget::unlimited();
        // (1/n) Σ μ(d) q^(n/d)
        for (q, k, expected) in [(2i128, 1, 2), (2, 4, 3), (2, 5, 6), (3, 3, 8), (5, 2, 10)] {
            let found = F::find_irreducible(q, k, None, &budget).unwrap();
            assert_eq!(found.len(), expected, "q = {q}, k = {k}");
            assert!(found.iter().all(|p| p.degree() == Some(k)));
        }
    }

    #[test]
    fn irreducible_limit() {
        let budget = Budget::unlimited();
        let first = F::find_irreducible(2, 4, Some(1), &budget).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].to_string(), "x^4+x+1");
        assert!(F::find_irreducible(2, 4, Some(0), &budget).unwrap().is_empty());
    }

    #[test]
    fn irreducible_errors() {
        let budget = Budget::unlimited();
        assert!(matches!(
            F::find_irreducible(2, 0, None, &budget),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            F::find_irreducible(6, 2, None, &budget),
            Err(Error::InvalidArgument(_))
        ));

        let token = crate::budget::CancelToken::new();
        token.cancel();
        assert_eq!(
            F::find_irreducible(7, 6, None, &Budget::unlimited().with_token(token)),
            Err(Error::Interrupted(Interrupt::Cancelled))
        );
    }

    #[test]
    fn debug_format() {
        let a = elem(&gf16(), &[(1, 1)]);
        assert_eq!(format!("{a:?}"), "PolyField(x mod x^4+x+1 over GF(2))");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn round_trip() {
        let f = Polynomial::new(vec![(1i128, 2), (1, 0)], 3).unwrap();
        let a = PolyField::from_pairs(3, f, vec![(2, 1), (1, 0)]).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let b: PolyField<i128> = serde_json::from_str(&json).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn deserialize_reduces() {
        let json = r#"{
            "num_mod": "3",
            "modulus": {"modulus": "3", "terms": [["1", 2], ["1", 0]]},
            "value": {"modulus": "3", "terms": [["1", 2]]}
        }"#;
        let a: PolyField<i128> = serde_json::from_str(json).unwrap();
        assert_eq!(a.to_string(), "2");
    }
}
