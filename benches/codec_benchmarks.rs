use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffpack::{decode, encode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn text_sample(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn skewed_sample(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| b"aaaaaaabbbccde"[rng.gen_range(0..14)])
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let text = text_sample(64 * 1024);
    c.bench_function("encode 64KiB text", |b| {
        b.iter(|| encode(black_box(&text)).unwrap())
    });

    let skewed = skewed_sample(64 * 1024);
    c.bench_function("encode 64KiB skewed", |b| {
        b.iter(|| encode(black_box(&skewed)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let container = encode(&text_sample(64 * 1024)).unwrap().container;
    c.bench_function("decode 64KiB text", |b| {
        b.iter(|| decode(black_box(&container)).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
