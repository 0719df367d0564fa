//! End-to-end checks on the default `BigInt` backend.

use std::time::Duration;

use num_bigint::BigInt;

use modfield::{
    Budget, CancelToken, Config, Error, Field, Interrupt, ModInt, NumberTheory, PollardRho,
    PolyField, Polynomial, TrialDivision,
};

fn big(s: &str) -> BigInt {
    s.parse().unwrap()
}

#[test]
fn modular_addition() {
    let a: ModInt = ModInt::from_u64(7, 11).unwrap();
    let b: ModInt = ModInt::from_u64(5, 11).unwrap();
    assert_eq!((a + b).to_string(), "1");
}

#[test]
fn modular_inverse() {
    let a: ModInt = ModInt::from_u64(3, 7).unwrap();
    assert_eq!(a.inverse().unwrap().to_string(), "5");
    let b: ModInt = ModInt::from_u64(4, 8).unwrap();
    assert_eq!(b.inverse(), Err(Error::NoInverse));
}

#[test]
fn primality_of_the_value() {
    let a: ModInt = ModInt::from_u64(97, 98).unwrap();
    assert!(a.is_prime(20));
}

#[test]
fn polynomial_addition() {
    let p: Polynomial = Polynomial::new(vec![(BigInt::from(1), 1), (BigInt::from(1), 0)], big("5"))
        .unwrap();
    assert_eq!((p.clone() + p).to_string(), "2x+2");
}

#[test]
fn polynomial_division() {
    for p in ["2", "3", "5", "7", "1000000007", "170141183460469231731687303715884105727"] {
        let a: Polynomial =
            Polynomial::new(vec![(BigInt::from(1), 2), (BigInt::from(-1), 0)], big(p)).unwrap();
        let b: Polynomial =
            Polynomial::new(vec![(BigInt::from(1), 1), (BigInt::from(-1), 0)], big(p)).unwrap();
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q.to_string(), "x+1", "p = {p}");
        assert_eq!(r.to_string(), "0", "p = {p}");
    }
}

#[test]
fn discrete_logarithm() {
    let value: ModInt = ModInt::from_u64(5, 103).unwrap();
    let base: ModInt = ModInt::from_u64(3, 103).unwrap();
    let x = value.discrete_log(&base).unwrap();
    assert_eq!(base.pow(&x).unwrap(), value);
}

#[test]
fn string_literals() {
    let a: ModInt = ModInt::from_decimal("-5", "12").unwrap();
    assert_eq!(a.to_string(), "7");
    assert!(matches!(
        ModInt::<BigInt>::from_decimal("12", "-5"),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        ModInt::<BigInt>::from_decimal("1.5", "7"),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn large_prime_field() {
    // 2^127 - 1
    let p = "170141183460469231731687303715884105727";
    let a: ModInt = ModInt::from_decimal("123456789123456789123456789", p).unwrap();
    assert!(ModInt::<BigInt>::from_decimal(p, "340282366920938463463374607431768211456")
        .unwrap()
        .is_prime(20));

    let inv = a.inverse().unwrap();
    assert_eq!((a.clone() * inv).to_string(), "1");
    let p_minus_1 = big(p) - 1u8;
    assert_eq!(a.pow(&p_minus_1).unwrap().to_string(), "1");
    assert_eq!(a.pow(&p_minus_1).unwrap(), a.pow_montgomery(&p_minus_1).unwrap());
    assert_eq!(a.euler_phi().unwrap(), p_minus_1);
    let literal: ModInt = ModInt::new(big(p), big(p) + 1u8).unwrap();
    assert_eq!(literal.carmichael().unwrap(), p_minus_1);
}

#[test]
fn factorization_strategies() {
    // 2^64 + 1 = 274177 * 67280421310721
    let a: ModInt = ModInt::from_decimal("18446744073709551617", "18446744073709551618").unwrap();
    let expected = vec![big("274177"), big("67280421310721")];
    assert_eq!(a.factorize().unwrap(), expected);

    let rho = NumberTheory::new(PollardRho::new().with_seed(5));
    assert_eq!(a.factorize_with(&rho, &Budget::unlimited()).unwrap(), expected);

    let small: ModInt = ModInt::from_u64(360, 1000).unwrap();
    let naive = NumberTheory::new(TrialDivision);
    assert_eq!(
        small.factorize_with(&naive, &Budget::unlimited()).unwrap(),
        [2u32, 2, 2, 3, 3, 5].map(BigInt::from).to_vec()
    );
}

#[test]
fn factor_capacity() {
    let config = Config {
        factor_capacity: 8,
        ..Config::default()
    };
    let theory = NumberTheory::with_config(TrialDivision, config).unwrap();
    let a: ModInt = ModInt::from_u64(1 << 10, 1 << 11).unwrap();
    assert_eq!(
        a.factorize_with(&theory, &Budget::unlimited()),
        Err(Error::FactorizationOverflow { capacity: 8 })
    );
}

#[test]
fn square_roots() {
    // 10^9 + 9 = 1 mod 8 exercises the full Tonelli–Shanks loop
    let p = 1_000_000_009u64;
    let a: ModInt = ModInt::from_u64(2, p).unwrap();
    let roots = a.sqrt().unwrap();
    assert_eq!(roots.len(), 2);
    for r in &roots {
        assert_eq!(r.clone() * r, a);
    }

    let composite: ModInt = ModInt::from_u64(4, 15).unwrap();
    let values: Vec<String> = composite.sqrt().unwrap().iter().map(|r| r.to_string()).collect();
    assert_eq!(values, ["2", "7", "8", "13"]);
}

#[test]
fn generators() {
    let g: ModInt = ModInt::primitive_root(&BigInt::from(1_000_000_007u64)).unwrap();
    assert_eq!(g.to_string(), "5");
    assert!(g.is_generator().unwrap());
    assert_eq!(g.multiplicative_order().unwrap(), BigInt::from(1_000_000_006u64));
}

#[test]
fn extension_field_gf256() {
    // the AES polynomial x^8 + x^4 + x^3 + x + 1
    let modulus: Polynomial = Polynomial::new(
        [8usize, 4, 3, 1, 0].map(|d| (BigInt::from(1), d)),
        BigInt::from(2),
    )
    .unwrap();
    assert!(modulus.is_irreducible());

    // {53} * {CA} = {01}
    let bits = |byte: u8| -> Vec<(BigInt, usize)> {
        (0..8)
            .filter(|i| byte >> i & 1 == 1)
            .map(|i| (BigInt::from(1), i))
            .collect()
    };
    let a = PolyField::from_pairs(BigInt::from(2), modulus.clone(), bits(0x53)).unwrap();
    let b = PolyField::from_pairs(BigInt::from(2), modulus, bits(0xCA)).unwrap();
    assert_eq!((a.clone() * &b).to_string(), "1");
    assert_eq!(a.inverse().unwrap(), b);
    assert_eq!(a.clone() / &b, a.pow(&BigInt::from(2)).unwrap());
}

#[test]
fn cyclotomic_roots_of_unity() {
    // 13 = 1 mod 12, so Φ_12 splits into linear factors over GF(13)
    let phi: Polynomial = Polynomial::cyclotomic(12, BigInt::from(13)).unwrap();
    assert_eq!(phi.to_string(), "x^4+12x^2+1");
    let roots = (0..13u64)
        .filter(|&x| phi.eval_int(&BigInt::from(x)).to_string() == "0")
        .count();
    assert_eq!(roots, 4);
}

#[test]
fn cancelled_search() {
    let token = CancelToken::new();
    let budget = Budget::unlimited().with_token(token.clone());
    token.cancel();

    let value: ModInt = ModInt::from_u64(5, 1_000_000_007).unwrap();
    let base: ModInt = ModInt::from_u64(3, 1_000_000_007).unwrap();
    assert_eq!(
        value.discrete_log_budget(&base, &budget),
        Err(Error::Interrupted(Interrupt::Cancelled))
    );
}

#[test]
fn expired_deadline() {
    let budget = Budget::unlimited().with_timeout(Duration::ZERO);
    std::thread::sleep(Duration::from_millis(1));
    let result = PolyField::<BigInt>::find_irreducible(BigInt::from(7), 8, None, &budget);
    assert_eq!(result, Err(Error::Interrupted(Interrupt::DeadlineExceeded)));
}
