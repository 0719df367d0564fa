use super::ring::Ring;
use crate::error::Result;

/// A (commutative) field.
///
/// Extends `Ring` with multiplicative inverses for all non-zero elements.
pub trait Field: Ring {
    /// Multiplicative inverse `a⁻¹`.
    ///
    /// Fails with [`Error::NoInverse`](crate::Error::NoInverse) when `self`
    /// is zero, or more generally shares a factor with the modulus.
    fn inverse(&self) -> Result<Self>;

    /// Checked division: `self * rhs⁻¹`.
    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self.clone() * rhs.inverse()?)
    }
}
