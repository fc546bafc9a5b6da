use walletcrypt::bigint::U256;
use walletcrypt::curve::SECP256K1;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_scalar_mul(c: &mut Criterion) {
    let k = U256::from(0x1234_5678_9abc_def0u64);
    c.bench_function("secp256k1 scalar mul base", |b| {
        b.iter(|| SECP256K1.mul_base(black_box(&k)).unwrap())
    });
}

criterion_group!(benches, bench_scalar_mul);
criterion_main!(benches);
