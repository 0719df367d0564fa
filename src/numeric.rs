//! Integer abstraction the engine is generic over.
//!
//! Every value type in this crate is parameterized by a [`Numeric`] integer.
//! [`BigInt`] is the default and gives arbitrary precision; `i128` is a
//! fixed-width alternative that stays exact while products of two reduced
//! values fit, which holds for moduli below 2^63.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use num_bigint::{BigInt, RandBigInt};
use num_integer::{Integer, Roots};
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::Rng;

/// Signed integer operations used by modular and polynomial arithmetic.
///
/// Operations take borrowed operands and return new values, so big-integer
/// implementations never need to consume their inputs.
///
/// # Example
///
/// ```
/// use modfield::Numeric;
/// use num_bigint::BigInt;
///
/// let a = BigInt::parse_decimal("-7").unwrap();
/// let m = BigInt::from_u64(5);
/// assert_eq!(a.mod_floor(&m), BigInt::from_u64(3));
/// assert_eq!(a.div_floor(&m), BigInt::parse_decimal("-2").unwrap());
/// ```
pub trait Numeric: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_u64(v: u64) -> Self;
    fn from_i64(v: i64) -> Self;
    fn to_u64(&self) -> Option<u64>;

    fn to_usize(&self) -> Option<usize> {
        self.to_u64().and_then(|v| usize::try_from(v).ok())
    }

    /// Parse a base-10 literal with an optional leading sign.
    fn parse_decimal(s: &str) -> Option<Self>;

    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;

    /// Quotient rounded toward negative infinity.
    fn div_floor(&self, rhs: &Self) -> Self;

    /// Remainder with the sign of `rhs`; lies in `[0, rhs)` for positive `rhs`.
    fn mod_floor(&self, rhs: &Self) -> Self;

    /// Non-negative greatest common divisor.
    fn gcd(&self, rhs: &Self) -> Self;

    fn abs(&self) -> Self;
    fn is_zero(&self) -> bool;
    fn is_one(&self) -> bool;
    fn is_negative(&self) -> bool;
    fn is_even(&self) -> bool;

    /// Number of significant bits in `|self|`; zero for zero.
    fn bits(&self) -> u64;

    /// Bit `i` of `|self|`.
    fn bit(&self, i: u64) -> bool;

    fn shr(&self, k: u64) -> Self;

    /// `2^k`.
    fn pow2(k: u64) -> Self;

    /// `floor(sqrt(self))` for non-negative `self`.
    fn sqrt_floor(&self) -> Self;

    /// Uniform sample from `[0, bound)`. `bound` must be positive.
    fn random_below<R: Rng + ?Sized>(bound: &Self, rng: &mut R) -> Self;

    #[inline]
    fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative()
    }

    /// Least common multiple of two positive values.
    fn lcm(&self, rhs: &Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::zero();
        }
        self.div_floor(&self.gcd(rhs)).mul(rhs).abs()
    }
}

impl Numeric for BigInt {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn from_u64(v: u64) -> Self {
        BigInt::from(v)
    }

    fn from_i64(v: i64) -> Self {
        BigInt::from(v)
    }

    fn to_u64(&self) -> Option<u64> {
        ToPrimitive::to_u64(self)
    }

    fn parse_decimal(s: &str) -> Option<Self> {
        s.trim().parse::<BigInt>().ok()
    }

    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    #[inline]
    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div_floor(&self, rhs: &Self) -> Self {
        Integer::div_floor(self, rhs)
    }

    #[inline]
    fn mod_floor(&self, rhs: &Self) -> Self {
        Integer::mod_floor(self, rhs)
    }

    fn gcd(&self, rhs: &Self) -> Self {
        Integer::gcd(self, rhs)
    }

    fn abs(&self) -> Self {
        Signed::abs(self)
    }

    fn is_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn is_one(&self) -> bool {
        One::is_one(self)
    }

    fn is_negative(&self) -> bool {
        Signed::is_negative(self)
    }

    fn is_even(&self) -> bool {
        Integer::is_even(self)
    }

    fn bits(&self) -> u64 {
        self.magnitude().bits()
    }

    fn bit(&self, i: u64) -> bool {
        self.magnitude().bit(i)
    }

    fn shr(&self, k: u64) -> Self {
        self >> k
    }

    fn pow2(k: u64) -> Self {
        <BigInt as One>::one() << k
    }

    fn sqrt_floor(&self) -> Self {
        Roots::sqrt(self)
    }

    fn random_below<R: Rng + ?Sized>(bound: &Self, rng: &mut R) -> Self {
        rng.gen_bigint_range(&<BigInt as Zero>::zero(), bound)
    }
}

impl Numeric for i128 {
    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn from_u64(v: u64) -> Self {
        i128::from(v)
    }

    fn from_i64(v: i64) -> Self {
        i128::from(v)
    }

    fn to_u64(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }

    fn parse_decimal(s: &str) -> Option<Self> {
        s.trim().parse::<i128>().ok()
    }

    #[inline]
    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    #[inline]
    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    #[inline]
    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }

    #[inline]
    fn div_floor(&self, rhs: &Self) -> Self {
        Integer::div_floor(self, rhs)
    }

    #[inline]
    fn mod_floor(&self, rhs: &Self) -> Self {
        Integer::mod_floor(self, rhs)
    }

    fn gcd(&self, rhs: &Self) -> Self {
        Integer::gcd(self, rhs)
    }

    fn abs(&self) -> Self {
        i128::abs(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn is_one(&self) -> bool {
        *self == 1
    }

    fn is_negative(&self) -> bool {
        *self < 0
    }

    fn is_even(&self) -> bool {
        *self & 1 == 0
    }

    fn bits(&self) -> u64 {
        u64::from(128 - self.unsigned_abs().leading_zeros())
    }

    fn bit(&self, i: u64) -> bool {
        i < 128 && (self.unsigned_abs() >> i) & 1 == 1
    }

    fn shr(&self, k: u64) -> Self {
        if k >= 128 {
            if *self < 0 {
                -1
            } else {
                0
            }
        } else {
            self >> k
        }
    }

    fn pow2(k: u64) -> Self {
        1i128 << k
    }

    fn sqrt_floor(&self) -> Self {
        Roots::sqrt(self)
    }

    fn random_below<R: Rng + ?Sized>(bound: &Self, rng: &mut R) -> Self {
        rng.gen_range(0..*bound)
    }
}
