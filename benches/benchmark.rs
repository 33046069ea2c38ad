//! Benchmarks for Sapphire II cipher operations.
//!
//! Measures keyed initialization, per-byte throughput, whole-buffer
//! throughput scaling across key lengths, and hash finalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sapphire2::Sapphire;

/// Key used consistently across all benchmarks.
const BENCH_KEY: &[u8] = b"benchmark_key_16";

/// Benchmarks keyed initialization time.
///
/// Measures the full key-setup path: the 256-step keyed shuffle driven
/// by the key schedule plus index seeding.
fn bench_keyed_init(c: &mut Criterion) {
    c.bench_function("keyed_init", |b| {
        b.iter(|| Sapphire::new_keyed(black_box(BENCH_KEY)).unwrap());
    });
}

/// Benchmarks single-byte encryption throughput.
///
/// The cipher is initialized once and state advances naturally between
/// iterations, reflecting real-world streaming behavior.
fn bench_encrypt_byte(c: &mut Criterion) {
    let mut cipher = Sapphire::new_keyed(BENCH_KEY).unwrap();

    let mut group = c.benchmark_group("encrypt_single_byte");
    group.throughput(Throughput::Bytes(1));
    group.bench_function("per_byte", |b| {
        b.iter(|| cipher.encrypt_byte(black_box(0xA5)).unwrap());
    });
    group.finish();
}

/// Benchmarks whole-buffer encryption throughput at several buffer sizes.
fn bench_encrypt_buffer(c: &mut Criterion) {
    let sizes: &[usize] = &[64, 1024, 16384];

    let mut group = c.benchmark_group("encrypt_buffer");
    for &size in sizes {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut cipher = Sapphire::new_keyed(BENCH_KEY).unwrap();
            let mut data = vec![0u8; size];
            b.iter(|| cipher.encrypt(black_box(&mut data)).unwrap());
        });
    }
    group.finish();
}

/// Benchmarks hash mode: absorb a 1 KiB message and finalize a 32-byte
/// digest. Finalization dominates short messages (256 flush updates).
fn bench_hash(c: &mut Criterion) {
    c.bench_function("hash_1k_digest_32", |b| {
        let message = vec![0x5Au8; 1024];
        b.iter(|| {
            let mut hasher = Sapphire::new_hash();
            let mut data = message.clone();
            hasher.encrypt(&mut data).unwrap();
            hasher.hash_final(black_box(32)).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_keyed_init,
    bench_encrypt_byte,
    bench_encrypt_buffer,
    bench_hash,
);
criterion_main!(benches);
