use core::ops::{Add, Mul, Neg, Sub};

use crate::numeric::Numeric;

/// A commutative ring whose elements carry their own modulus.
///
/// This trait assumes:
/// - (R, +) is an abelian group with identity `zero_like`
/// - (R, ·) is a monoid with identity `one_like`
/// - multiplication distributes over addition.
///
/// Identities are produced from an existing element because the modulus is
/// a runtime value, not part of the type.
pub trait Ring:
    Sized
    + Clone
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity sharing `self`'s modulus.
    fn zero_like(&self) -> Self;

    /// Multiplicative identity sharing `self`'s modulus.
    fn one_like(&self) -> Self;

    fn is_zero(&self) -> bool;

    #[inline]
    fn square(&self) -> Self {
        self.clone() * self.clone()
    }

    /// `self^exp` by square-and-multiply over the bits of a non-negative `exp`.
    fn pow_by<E: Numeric>(&self, exp: &E) -> Self {
        let mut result = self.one_like();
        for i in (0..exp.bits()).rev() {
            result = result.square();
            if exp.bit(i) {
                result = result * self.clone();
            }
        }
        result
    }
}
