//! Number-theory helpers over raw [`Numeric`] integers.

use rand::Rng;
use tracing::trace;

use crate::numeric::Numeric;

/// Values below this bound are classified by trial division alone.
pub const SMALL_PRIME_BOUND: u64 = 1024;

const SMALL_PRIME_COUNT: usize = count_small_primes();

/// Every prime below [`SMALL_PRIME_BOUND`], ascending.
pub const SMALL_PRIMES: [u64; SMALL_PRIME_COUNT] = small_primes::<SMALL_PRIME_COUNT>();

/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for small values such as
/// polynomial degrees, not for large integers; see [`is_probable_prime`].
pub const fn is_small_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

const fn count_small_primes() -> usize {
    let mut count = 0;
    let mut n = 2;
    while n < SMALL_PRIME_BOUND {
        if is_small_prime(n) {
            count += 1;
        }
        n += 1;
    }
    count
}

const fn small_primes<const L: usize>() -> [u64; L] {
    let mut out = [0u64; L];
    let mut i = 0;
    let mut n = 2;
    while n < SMALL_PRIME_BOUND {
        if is_small_prime(n) {
            out[i] = n;
            i += 1;
        }
        n += 1;
    }
    out
}

/// Extended Euclid: returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`.
///
/// `g` is non-negative.
pub fn ext_gcd<N: Numeric>(a: &N, b: &N) -> (N, N, N) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (N::one(), N::zero());
    let (mut old_t, mut t) = (N::zero(), N::one());

    while !r.is_zero() {
        let q = old_r.div_floor(&r);
        let next_r = old_r.sub(&q.mul(&r));
        old_r = core::mem::replace(&mut r, next_r);
        let next_s = old_s.sub(&q.mul(&s));
        old_s = core::mem::replace(&mut s, next_s);
        let next_t = old_t.sub(&q.mul(&t));
        old_t = core::mem::replace(&mut t, next_t);
    }

    if old_r.is_negative() {
        let zero = N::zero();
        (
            zero.sub(&old_r),
            zero.sub(&old_s),
            zero.sub(&old_t),
        )
    } else {
        (old_r, old_s, old_t)
    }
}

/// Inverse of `a` modulo `m`, or `None` when `gcd(a, m) != 1`.
///
/// ```
/// use modfield::utils::mod_inverse;
///
/// assert_eq!(mod_inverse(&3i128, &7), Some(5));
/// assert_eq!(mod_inverse(&4i128, &8), None);
/// ```
pub fn mod_inverse<N: Numeric>(a: &N, m: &N) -> Option<N> {
    let (g, x, _) = ext_gcd(&a.mod_floor(m), m);
    if g.is_one() {
        Some(x.mod_floor(m))
    } else {
        None
    }
}

/// `base^exp mod m` by square-and-multiply for non-negative `exp`.
pub fn mod_pow<N: Numeric>(base: &N, exp: &N, m: &N) -> N {
    if m.is_one() {
        return N::zero();
    }
    let base = base.mod_floor(m);
    let mut result = N::one();
    for i in (0..exp.bits()).rev() {
        result = result.mul(&result).mod_floor(m);
        if exp.bit(i) {
            result = result.mul(&base).mod_floor(m);
        }
    }
    result
}

/// Miller–Rabin probable-prime test with `rounds` random bases.
///
/// Values below [`SMALL_PRIME_BOUND`] are decided exactly. A composite above
/// the bound survives with probability at most `4^-rounds`.
pub fn is_probable_prime<N: Numeric, R: Rng + ?Sized>(n: &N, rounds: usize, rng: &mut R) -> bool {
    if n.is_negative() {
        return false;
    }
    if let Some(small) = n.to_u64() {
        if small < SMALL_PRIME_BOUND {
            return is_small_prime(small);
        }
    }
    for &p in SMALL_PRIMES.iter() {
        if n.mod_floor(&N::from_u64(p)).is_zero() {
            return false;
        }
    }

    let one = N::one();
    let two = N::from_u64(2);
    let n_minus_1 = n.sub(&one);
    let mut d = n_minus_1.clone();
    let mut s = 0u64;
    while d.is_even() {
        d = d.shr(1);
        s += 1;
    }

    // bases drawn from [2, n - 2]
    let span = n.sub(&N::from_u64(3));
    'witness: for _ in 0..rounds {
        let a = N::random_below(&span, rng).add(&two);
        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_1 {
            continue;
        }
        for _ in 1..s {
            x = x.mul(&x).mod_floor(n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        trace!(%n, witness = %a, "composite witness found");
        return false;
    }
    true
}

/// Smallest `r` with `r * r >= n`, for non-negative `n`.
pub fn ceil_sqrt<N: Numeric>(n: &N) -> N {
    let r = n.sqrt_floor();
    if r.mul(&r) == *n {
        r
    } else {
        r.add(&N::one())
    }
}

/// Distinct primes of a factor list, ascending.
pub fn prime_divisors<N: Numeric>(factors: &[N]) -> Vec<N> {
    let mut primes = factors.to_vec();
    primes.sort();
    primes.dedup();
    primes
}

/// Group an ascending factor list into `(prime, exponent)` pairs.
pub fn prime_powers<N: Numeric>(factors: &[N]) -> Vec<(N, u32)> {
    let mut sorted = factors.to_vec();
    sorted.sort();
    let mut out: Vec<(N, u32)> = Vec::new();
    for p in sorted {
        match out.last_mut() {
            Some((q, k)) if *q == p => *k += 1,
            _ => out.push((p, 1)),
        }
    }
    out
}

fn pow_u32<N: Numeric>(base: &N, exp: u32) -> N {
    let mut result = N::one();
    for _ in 0..exp {
        result = result.mul(base);
    }
    result
}

/// Euler's totient from the prime factorization of `n`.
///
/// An empty factor list denotes `n = 1`, giving `φ(1) = 1`.
pub fn euler_phi_from_factors<N: Numeric>(factors: &[N]) -> N {
    prime_powers(factors)
        .iter()
        .fold(N::one(), |acc, (p, k)| {
            acc.mul(&pow_u32(p, k - 1)).mul(&p.sub(&N::one()))
        })
}

/// Carmichael's function from the prime factorization of `n`.
///
/// `λ(2) = 1`, `λ(4) = 2`, `λ(2^k) = 2^(k-2)` for `k >= 3`, and
/// `λ(p^k) = p^(k-1) (p-1)` for odd primes; prime powers combine by lcm.
pub fn carmichael_from_factors<N: Numeric>(factors: &[N]) -> N {
    let two = N::from_u64(2);
    prime_powers(factors)
        .iter()
        .fold(N::one(), |acc, (p, k)| {
            let lambda = if *p == two {
                match *k {
                    1 => N::one(),
                    2 => two.clone(),
                    _ => N::pow2(u64::from(*k) - 2),
                }
            } else {
                pow_u32(p, k - 1).mul(&p.sub(&N::one()))
            };
            acc.lcm(&lambda)
        })
}
