//! Finite-field arithmetic over arbitrary-precision integers.
//!
//! Three layers, each an immutable value type:
//!
//! - [`ModInt`]: integers modulo `m`, with primality, factorization, discrete
//!   logarithms and square roots.
//! - [`Polynomial`]: polynomials over GF(p).
//! - [`PolyField`]: the quotient `GF(p)[x] / (f)`, a field GF(p^n) when `f`
//!   is irreducible.
//!
//! Every type is generic over a [`Numeric`] integer and defaults to
//! `num_bigint::BigInt`.
//!
//! # Example
//!
//! ```
//! use modfield::{Field, ModInt, Polynomial};
//!
//! let a: ModInt = ModInt::from_u64(3, 7).unwrap();
//! assert_eq!(a.inverse().unwrap().to_string(), "5");
//!
//! let p = Polynomial::new(vec![(1i128, 2), (-1, 0)], 5).unwrap();
//! let q = Polynomial::new(vec![(1i128, 1), (-1, 0)], 5).unwrap();
//! assert_eq!((&p / &q).to_string(), "x+1");
//! ```

pub mod algebra;
pub mod budget;
pub mod config;
pub mod error;
pub mod numeric;
pub mod structures;
pub mod theory;
pub mod utils;

pub use algebra::field::Field;
pub use algebra::ring::Ring;

pub use budget::{Budget, CancelToken};
pub use config::Config;
pub use error::{Error, Interrupt, Result};
pub use numeric::Numeric;
pub use structures::factor::{Factorizer, PollardRho, TrialDivision};
pub use structures::modint::ModInt;
pub use structures::poly::{Node, Polynomial};
pub use structures::poly_field::PolyField;
pub use theory::NumberTheory;
