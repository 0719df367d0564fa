//! Benchmarks for modfield operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;

use modfield::{Budget, Factorizer, Field, ModInt, PollardRho, PolyField, Polynomial, TrialDivision};

// 2^127 - 1
const M127: &str = "170141183460469231731687303715884105727";

fn bench_modint_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("ModInt Operations");

    let a: ModInt = ModInt::from_decimal("123456789123456789123456789", M127).unwrap();
    let b: ModInt = ModInt::from_decimal("987654321987654321987654321", M127).unwrap();
    let exp: BigInt = M127.parse::<BigInt>().unwrap() - 2u8;

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(a.clone()) + black_box(&b))
    });

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(a.clone()) * black_box(&b))
    });

    group.bench_function("inverse", |bencher| bencher.iter(|| black_box(&a).inverse()));

    group.bench_function("pow", |bencher| {
        bencher.iter(|| black_box(&a).pow(black_box(&exp)))
    });

    group.bench_function("pow_montgomery", |bencher| {
        bencher.iter(|| black_box(&a).pow_montgomery(black_box(&exp)))
    });

    group.bench_function("is_prime_20", |bencher| {
        let p: ModInt = ModInt::from_decimal(M127, "340282366920938463463374607431768211456").unwrap();
        bencher.iter(|| black_box(&p).is_prime(20))
    });

    group.finish();
}

fn bench_number_theory(c: &mut Criterion) {
    let mut group = c.benchmark_group("Number Theory");
    let budget = Budget::unlimited();

    // 1000003 * 998244353
    let semiprime: i128 = 998_247_347_733_059;
    group.bench_function("trial_division_semiprime", |bencher| {
        bencher.iter(|| TrialDivision.factor(black_box(&semiprime), &budget))
    });
    let rho = PollardRho::new().with_seed(1);
    group.bench_function("pollard_rho_semiprime", |bencher| {
        bencher.iter(|| rho.factor(black_box(&semiprime), &budget))
    });

    let value: ModInt<i128> = ModInt::new(5, 1_000_000_007).unwrap();
    let base: ModInt<i128> = ModInt::new(3, 1_000_000_007).unwrap();
    group.bench_function("discrete_log_1e9", |bencher| {
        bencher.iter(|| black_box(&value).discrete_log(black_box(&base)))
    });

    let square: ModInt<i128> = ModInt::new(2, 1_000_000_009).unwrap();
    group.bench_function("sqrt_1e9", |bencher| {
        bencher.iter(|| black_box(&square).sqrt())
    });

    group.finish();
}

fn bench_poly_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Polynomial Operations");

    for size in [16usize, 64, 256] {
        let p = Polynomial::new((0..size).map(|i| (i as i128 + 1, i)), 998_244_353i128).unwrap();
        let d = Polynomial::new((0..size / 2).map(|i| (3 * i as i128 + 7, i)), 998_244_353i128)
            .unwrap();

        group.bench_with_input(BenchmarkId::new("mul", size), &p, |bencher, p| {
            bencher.iter(|| black_box(p) * black_box(p))
        });

        group.bench_with_input(BenchmarkId::new("div_rem", size), &(p, d), |bencher, (p, d)| {
            bencher.iter(|| black_box(p).div_rem(black_box(d)))
        });
    }

    let p = Polynomial::new((0..64).map(|i| (i as i128 + 1, i)), 998_244_353i128).unwrap();
    group.bench_function("eval_64", |bencher| {
        bencher.iter(|| black_box(&p).eval_int(black_box(&42)))
    });

    group.finish();
}

fn bench_poly_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Polynomial Algorithms");

    let p1 = Polynomial::new(vec![(1i128, 3), (1, 2), (2, 1), (1, 0)], 998_244_353).unwrap();
    let p2 = Polynomial::new(vec![(1i128, 2), (1, 1), (1, 0)], 998_244_353).unwrap();

    group.bench_function("gcd", |bencher| {
        bencher.iter(|| Polynomial::gcd(black_box(&p1), black_box(&p2)))
    });

    group.bench_function("extended_gcd", |bencher| {
        bencher.iter(|| Polynomial::extended_gcd(black_box(&p1), black_box(&p2)))
    });

    // x^2 - 3 (3 is not a QR mod 998244353)
    let irred = Polynomial::new(vec![(1i128, 2), (-3, 0)], 998_244_353).unwrap();
    group.bench_function("is_irreducible_deg2", |bencher| {
        bencher.iter(|| black_box(&irred).is_irreducible())
    });

    group.bench_function("cyclotomic_60", |bencher| {
        bencher.iter(|| Polynomial::cyclotomic(black_box(60), 998_244_353i128))
    });

    group.bench_function("find_irreducible_gf2_deg8", |bencher| {
        bencher.iter(|| PolyField::find_irreducible(2i128, 8, None, &Budget::unlimited()))
    });

    group.finish();
}

fn bench_poly_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("PolyField Operations");

    // GF(2^8) with the AES polynomial
    let aes = Polynomial::new([8usize, 4, 3, 1, 0].map(|d| (1i128, d)), 2).unwrap();
    let a = PolyField::from_pairs(2, aes.clone(), vec![(1, 6), (1, 4), (1, 1), (1, 0)]).unwrap();
    let b = PolyField::from_pairs(2, aes, vec![(1, 7), (1, 6), (1, 3), (1, 1)]).unwrap();

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(a.clone()) * black_box(&b))
    });

    group.bench_function("inverse", |bencher| bencher.iter(|| black_box(&a).inverse()));

    group.bench_function("pow_254", |bencher| {
        bencher.iter(|| black_box(&a).pow(black_box(&254)))
    });

    group.bench_function("order", |bencher| bencher.iter(|| black_box(&a).order()));

    group.finish();
}

criterion_group!(
    benches,
    bench_modint_operations,
    bench_number_theory,
    bench_poly_operations,
    bench_poly_algorithms,
    bench_poly_field,
);
criterion_main!(benches);
