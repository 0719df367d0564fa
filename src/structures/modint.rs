use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use rand::Rng;

use crate::algebra::field::Field;
use crate::algebra::ring::Ring;
use crate::budget::Budget;
use crate::error::{Error, Result};
use crate::numeric::Numeric;
use crate::theory::NumberTheory;
use crate::utils::{is_probable_prime, mod_inverse, mod_pow};

/// An integer reduced modulo a positive runtime modulus.
///
/// The value always lies in `[0, modulus)`. Arithmetic operators return new
/// values and panic if the operands carry different moduli, matching the
/// behaviour of the other value types in this crate.
///
/// Equality compares both value and modulus; ordering compares values and is
/// only defined between elements sharing a modulus.
///
/// # Example
///
/// ```
/// use modfield::ModInt;
///
/// let a: ModInt = ModInt::from_u64(7, 11).unwrap();
/// let b: ModInt = ModInt::from_u64(5, 11).unwrap();
/// assert_eq!((a + b).to_string(), "1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ModInt<N: Numeric = BigInt> {
    value: N,
    modulus: N,
}

/// Montgomery reduction parameters for an odd modulus `m`, with `R = 2^bits(m)`.
struct MontgomeryParams<N> {
    modulus: N,
    bits: u64,
    r: N,
    /// `-m^-1 mod R`
    m_prime: N,
}

impl<N: Numeric> MontgomeryParams<N> {
    fn new(modulus: &N) -> Option<Self> {
        if modulus.is_even() {
            return None;
        }
        let bits = modulus.bits();
        let r = N::pow2(bits);
        let inv = mod_inverse(modulus, &r)?;
        let m_prime = r.sub(&inv).mod_floor(&r);
        Some(Self {
            modulus: modulus.clone(),
            bits,
            r,
            m_prime,
        })
    }

    /// Map `a` in `[0, m)` to `aR mod m`.
    fn to_montgomery(&self, a: &N) -> N {
        a.mul(&self.r).mod_floor(&self.modulus)
    }

    /// REDC: `t R^-1 mod m` for `t < mR`.
    fn reduce(&self, t: &N) -> N {
        let u = t.mod_floor(&self.r).mul(&self.m_prime).mod_floor(&self.r);
        let s = t.add(&u.mul(&self.modulus)).shr(self.bits);
        if s >= self.modulus {
            s.sub(&self.modulus)
        } else {
            s
        }
    }
}

impl<N: Numeric> ModInt<N> {
    /// Create `value mod modulus`.
    ///
    /// Negative values are normalized into `[0, modulus)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `modulus <= 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// let a = ModInt::new(-3i128, 7).unwrap();
    /// assert_eq!(*a.value(), 4);
    /// assert!(ModInt::new(1i128, 0).is_err());
    /// ```
    pub fn new(value: N, modulus: N) -> Result<Self> {
        if !modulus.is_positive() {
            return Err(Error::invalid("modulus should be positive"));
        }
        Ok(Self {
            value: value.mod_floor(&modulus),
            modulus,
        })
    }

    /// Create from machine integers.
    pub fn from_u64(value: u64, modulus: u64) -> Result<Self> {
        Self::new(N::from_u64(value), N::from_u64(modulus))
    }

    /// Create from base-10 string literals, as supplied by a text front end.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// let a: ModInt = ModInt::from_decimal("-1", "340282366920938463463374607431768211507").unwrap();
    /// assert_eq!(a.to_string(), "340282366920938463463374607431768211506");
    /// assert!(ModInt::<i128>::from_decimal("x", "7").is_err());
    /// ```
    pub fn from_decimal(value: &str, modulus: &str) -> Result<Self> {
        let v = N::parse_decimal(value)
            .ok_or_else(|| Error::invalid(format!("invalid integer literal {value:?}")))?;
        let m = N::parse_decimal(modulus)
            .ok_or_else(|| Error::invalid(format!("invalid integer literal {modulus:?}")))?;
        Self::new(v, m)
    }

    /// Build from a value already known to lie in `[0, modulus)`.
    #[inline]
    pub(crate) fn from_reduced(value: N, modulus: N) -> Self {
        debug_assert!(!value.is_negative() && value < modulus);
        Self { value, modulus }
    }

    /// Reduce `value` under this element's modulus.
    #[inline]
    pub fn with_value(&self, value: &N) -> Self {
        Self::from_reduced(value.mod_floor(&self.modulus), self.modulus.clone())
    }

    /// The representative in `[0, modulus)`.
    pub fn value(&self) -> &N {
        &self.value
    }

    pub fn modulus(&self) -> &N {
        &self.modulus
    }

    pub fn into_value(self) -> N {
        self.value
    }

    /// Replace the value, reducing it under the current modulus.
    pub fn set_value(&mut self, value: N) {
        self.value = value.mod_floor(&self.modulus);
    }

    /// Replace the modulus and re-reduce the current value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `modulus <= 0`; `self` is left unchanged.
    pub fn set_modulus(&mut self, modulus: N) -> Result<()> {
        if !modulus.is_positive() {
            return Err(Error::invalid("modulus should be positive"));
        }
        self.value = self.value.mod_floor(&modulus);
        self.modulus = modulus;
        Ok(())
    }

    fn assert_same_modulus(&self, other: &Self) {
        assert!(
            self.modulus == other.modulus,
            "ModInt operands must have the same modulus ({} vs {})",
            self.modulus,
            other.modulus
        );
    }

    fn add_ref(&self, rhs: &Self) -> Self {
        self.assert_same_modulus(rhs);
        let mut sum = self.value.add(&rhs.value);
        if sum >= self.modulus {
            sum = sum.sub(&self.modulus);
        }
        Self::from_reduced(sum, self.modulus.clone())
    }

    fn sub_ref(&self, rhs: &Self) -> Self {
        self.assert_same_modulus(rhs);
        let mut diff = self.value.sub(&rhs.value);
        if diff.is_negative() {
            diff = diff.add(&self.modulus);
        }
        Self::from_reduced(diff, self.modulus.clone())
    }

    fn mul_ref(&self, rhs: &Self) -> Self {
        self.assert_same_modulus(rhs);
        Self::from_reduced(
            self.value.mul(&rhs.value).mod_floor(&self.modulus),
            self.modulus.clone(),
        )
    }

    /// Compute `self^exp` by square-and-multiply.
    ///
    /// Negative exponents raise the inverse to `|exp|`.
    ///
    /// # Errors
    ///
    /// [`Error::NoInverse`] for a negative exponent on a non-invertible value.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// let a = ModInt::new(3i128, 7).unwrap();
    /// assert_eq!(*a.pow(&6).unwrap().value(), 1);  // Fermat
    /// assert_eq!(*a.pow(&-1).unwrap().value(), 5);
    /// ```
    pub fn pow(&self, exp: &N) -> Result<Self> {
        if exp.is_negative() {
            let inv = self.inverse()?;
            return Ok(inv.with_value(&mod_pow(&inv.value, &exp.abs(), &self.modulus)));
        }
        Ok(Self::from_reduced(
            mod_pow(&self.value, exp, &self.modulus),
            self.modulus.clone(),
        ))
    }

    /// Compute `self^exp` with Montgomery multiplication.
    ///
    /// Produces exactly the value of [`pow`](Self::pow). Montgomery form needs
    /// an odd modulus, so even moduli fall back to plain square-and-multiply.
    pub fn pow_montgomery(&self, exp: &N) -> Result<Self> {
        let Some(params) = MontgomeryParams::new(&self.modulus) else {
            return self.pow(exp);
        };
        if self.modulus.is_one() {
            return Ok(self.zero_like());
        }
        let base = if exp.is_negative() {
            self.inverse()?
        } else {
            self.clone()
        };
        let exp = exp.abs();

        let base_mont = params.to_montgomery(&base.value);
        let mut acc = params.to_montgomery(&N::one());
        for i in (0..exp.bits()).rev() {
            acc = params.reduce(&acc.mul(&acc));
            if exp.bit(i) {
                acc = params.reduce(&acc.mul(&base_mont));
            }
        }
        Ok(Self::from_reduced(params.reduce(&acc), self.modulus.clone()))
    }

    /// Miller–Rabin test on the value with `rounds` random bases.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// let a = ModInt::<i128>::from_u64(97, 98).unwrap();
    /// assert!(a.is_prime(20));
    /// assert!(!ModInt::<i128>::from_u64(91, 98).unwrap().is_prime(20));
    /// ```
    pub fn is_prime(&self, rounds: usize) -> bool {
        self.is_prime_with_rng(rounds, &mut rand::thread_rng())
    }

    /// Miller–Rabin test on the value using the caller's randomness.
    pub fn is_prime_with_rng<R: Rng + ?Sized>(&self, rounds: usize, rng: &mut R) -> bool {
        is_probable_prime(&self.value, rounds, rng)
    }

    /// Legendre symbol `(value / modulus)` by Euler's criterion.
    ///
    /// Returns `0` for zero, `1` for a non-zero square and `-1` otherwise.
    /// The modulus is assumed to be an odd prime.
    pub fn legendre(&self) -> i8 {
        if self.value.is_zero() {
            return 0;
        }
        let two = N::from_u64(2);
        if self.modulus == two {
            return 1;
        }
        let exp = self.modulus.sub(&N::one()).div_floor(&two);
        if mod_pow(&self.value, &exp, &self.modulus).is_one() {
            1
        } else {
            -1
        }
    }

    /// Prime factors of the value, ascending with multiplicity.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    /// use num_bigint::BigInt;
    ///
    /// let a: ModInt = ModInt::from_u64(360, 1000).unwrap();
    /// let expected: Vec<BigInt> = [2u32, 2, 2, 3, 3, 5].into_iter().map(BigInt::from).collect();
    /// assert_eq!(a.factorize().unwrap(), expected);
    /// ```
    pub fn factorize(&self) -> Result<Vec<N>> {
        NumberTheory::default().factorize(&self.value, &Budget::unlimited())
    }

    /// Prime factors of the value using the engine's injected strategy.
    pub fn factorize_with(&self, theory: &NumberTheory<N>, budget: &Budget) -> Result<Vec<N>> {
        theory.factorize(&self.value, budget)
    }

    /// Smallest `x >= 0` with `base^x == self`.
    ///
    /// # Errors
    ///
    /// [`Error::NoSolution`] when no such exponent exists,
    /// [`Error::InvalidArgument`] when the moduli differ.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// let value: ModInt = ModInt::from_u64(5, 103).unwrap();
    /// let base: ModInt = ModInt::from_u64(3, 103).unwrap();
    /// let x = value.discrete_log(&base).unwrap();
    /// assert_eq!(base.pow(&x).unwrap(), value);
    /// ```
    pub fn discrete_log(&self, base: &Self) -> Result<N> {
        self.discrete_log_budget(base, &Budget::unlimited())
    }

    pub fn discrete_log_budget(&self, base: &Self, budget: &Budget) -> Result<N> {
        NumberTheory::default().discrete_log(self, base, budget)
    }

    /// Every `r` with `r * r == self`, ascending. Empty when none exists.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// let a = ModInt::new(2i128, 7).unwrap();
    /// let roots: Vec<i128> = a.sqrt().unwrap().iter().map(|r| *r.value()).collect();
    /// assert_eq!(roots, vec![3, 4]);
    /// assert!(ModInt::new(3i128, 7).unwrap().sqrt().unwrap().is_empty());
    /// ```
    pub fn sqrt(&self) -> Result<Vec<Self>> {
        self.sqrt_budget(&Budget::unlimited())
    }

    pub fn sqrt_budget(&self, budget: &Budget) -> Result<Vec<Self>> {
        NumberTheory::default().sqrt(self, budget)
    }

    /// Euler's totient of the modulus.
    pub fn euler_phi(&self) -> Result<N> {
        NumberTheory::default().euler_phi(&self.modulus, &Budget::unlimited())
    }

    /// Carmichael's function of the value itself, read as a plain integer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the value is zero.
    pub fn carmichael(&self) -> Result<N> {
        NumberTheory::default().carmichael(&self.value, &Budget::unlimited())
    }

    /// Smallest `k >= 1` with `self^k == 1`.
    ///
    /// # Errors
    ///
    /// [`Error::NoSolution`] if the value shares a factor with the modulus.
    pub fn multiplicative_order(&self) -> Result<N> {
        self.multiplicative_order_budget(&Budget::unlimited())
    }

    pub fn multiplicative_order_budget(&self, budget: &Budget) -> Result<N> {
        NumberTheory::default().multiplicative_order(self, budget)
    }

    /// Whether the value generates the full multiplicative group.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the modulus is not prime.
    ///
    /// # Example
    ///
    /// ```
    /// use modfield::ModInt;
    ///
    /// assert!(ModInt::new(3i128, 7).unwrap().is_generator().unwrap());
    /// assert!(!ModInt::new(2i128, 7).unwrap().is_generator().unwrap());
    /// assert!(ModInt::new(2i128, 8).unwrap().is_generator().is_err());
    /// ```
    pub fn is_generator(&self) -> Result<bool> {
        self.is_generator_budget(&Budget::unlimited())
    }

    pub fn is_generator_budget(&self, budget: &Budget) -> Result<bool> {
        NumberTheory::default().is_generator(self, budget)
    }

    /// Smallest generator of the multiplicative group modulo a prime.
    pub fn primitive_root(modulus: &N) -> Result<Self> {
        NumberTheory::default().primitive_root(modulus, &Budget::unlimited())
    }
}

impl<N: Numeric> PartialOrd for ModInt<N> {
    /// Compares values; `None` across different moduli.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.modulus == other.modulus {
            Some(self.value.cmp(&other.value))
        } else {
            None
        }
    }
}

impl<N: Numeric> fmt::Debug for ModInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModInt({} mod {})", self.value, self.modulus)
    }
}

impl<N: Numeric> fmt::Display for ModInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/* ---- standard arithmetic operators ---- */

impl<N: Numeric> Add for ModInt<N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.add_ref(&rhs)
    }
}

impl<N: Numeric> Add<&ModInt<N>> for ModInt<N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: &ModInt<N>) -> Self::Output {
        self.add_ref(rhs)
    }
}

impl<N: Numeric> Add<&ModInt<N>> for &ModInt<N> {
    type Output = ModInt<N>;

    #[inline]
    fn add(self, rhs: &ModInt<N>) -> Self::Output {
        self.add_ref(rhs)
    }
}

impl<N: Numeric> Sub for ModInt<N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_ref(&rhs)
    }
}

impl<N: Numeric> Sub<&ModInt<N>> for ModInt<N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: &ModInt<N>) -> Self::Output {
        self.sub_ref(rhs)
    }
}

impl<N: Numeric> Sub<&ModInt<N>> for &ModInt<N> {
    type Output = ModInt<N>;

    #[inline]
    fn sub(self, rhs: &ModInt<N>) -> Self::Output {
        self.sub_ref(rhs)
    }
}

impl<N: Numeric> Mul for ModInt<N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_ref(&rhs)
    }
}

impl<N: Numeric> Mul<&ModInt<N>> for ModInt<N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: &ModInt<N>) -> Self::Output {
        self.mul_ref(rhs)
    }
}

impl<N: Numeric> Mul<&ModInt<N>> for &ModInt<N> {
    type Output = ModInt<N>;

    #[inline]
    fn mul(self, rhs: &ModInt<N>) -> Self::Output {
        self.mul_ref(rhs)
    }
}

impl<N: Numeric> Neg for ModInt<N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        if self.value.is_zero() {
            self
        } else {
            let value = self.modulus.sub(&self.value);
            Self::from_reduced(value, self.modulus)
        }
    }
}

/// Division implemented via multiplicative inverse.
impl<N: Numeric> Div for ModInt<N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        self.try_div(&rhs)
            .expect("division by a non-invertible ModInt")
    }
}

impl<N: Numeric> Div<&ModInt<N>> for ModInt<N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: &ModInt<N>) -> Self::Output {
        self.try_div(rhs)
            .expect("division by a non-invertible ModInt")
    }
}

/* ---- implement Ring ---- */

impl<N: Numeric> Ring for ModInt<N> {
    fn zero_like(&self) -> Self {
        Self::from_reduced(N::zero(), self.modulus.clone())
    }

    fn one_like(&self) -> Self {
        self.with_value(&N::one())
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

/* ---- implement Field ---- */

impl<N: Numeric> Field for ModInt<N> {
    /// Inverse by the extended Euclidean algorithm.
    fn inverse(&self) -> Result<Self> {
        mod_inverse(&self.value, &self.modulus)
            .map(|inv| Self::from_reduced(inv, self.modulus.clone()))
            .ok_or(Error::NoInverse)
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.assert_same_modulus(rhs);
        Ok(self.mul_ref(&rhs.inverse()?))
    }
}

/* ---- serde: decimal strings, so values of any size survive JSON ---- */

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ModIntRepr {
    value: String,
    modulus: String,
}

#[cfg(feature = "serde")]
impl<N: Numeric> serde::Serialize for ModInt<N> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ModIntRepr {
            value: self.value.to_string(),
            modulus: self.modulus.to_string(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, N: Numeric> serde::Deserialize<'de> for ModInt<N> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = ModIntRepr::deserialize(deserializer)?;
        Self::from_decimal(&repr.value, &repr.modulus).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serialize_json() {
        let a = ModInt::<BigInt>::from_u64(5, 7).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, r#"{"value":"5","modulus":"7"}"#);
    }

    #[test]
    fn deserialize_reduces() {
        let a: ModInt<i128> = serde_json::from_str(r#"{"value":"-1","modulus":"7"}"#).unwrap();
        assert_eq!(*a.value(), 6);
    }

    #[test]
    fn deserialize_rejects_bad_modulus() {
        let result: core::result::Result<ModInt<i128>, _> =
            serde_json::from_str(r#"{"value":"1","modulus":"0"}"#);
        assert!(result.is_err());
    }
}
