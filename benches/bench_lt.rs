use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lt_codec::{Config, Decoder, Encoder};

fn blocks(k: usize, packet_size: usize) -> Vec<Vec<u8>> {
    (0..k).map(|i| vec![i as u8; packet_size]).collect()
}

fn bench_encode_1k_blocks(c: &mut Criterion) {
    let cfg = Config {
        packet_size: 1024,
        ..Config::default()
    };
    let src = blocks(256, 1024);
    let encoder = Encoder::new(src, cfg).unwrap();

    c.bench_function("encode_256_blocks_1k", |b| {
        b.iter(|| {
            let symbols: Vec<_> = encoder.encode(black_box(512)).unwrap().collect();
            black_box(symbols);
        })
    });
}

fn bench_encode_batch_parallel(c: &mut Criterion) {
    let cfg = Config {
        packet_size: 1024,
        ..Config::default()
    };
    let src = blocks(256, 1024);
    let encoder = Encoder::new(src, cfg).unwrap();

    c.bench_function("encode_batch_256_blocks_1k", |b| {
        b.iter(|| {
            let symbols = encoder.encode_batch(black_box(0..512));
            black_box(symbols);
        })
    });
}

fn bench_decode_256_blocks(c: &mut Criterion) {
    let k = 256;
    let cfg = Config {
        packet_size: 1024,
        ..Config::default()
    };
    let src = blocks(k, 1024);
    let encoder = Encoder::new(src, cfg).unwrap();
    let symbols: Vec<_> = encoder.encode((k * 2) as u64).unwrap().collect();
    let decoder = Decoder::new(k, cfg).unwrap();

    c.bench_function("decode_256_blocks", |b| {
        b.iter(|| {
            let outcome = decoder.decode(black_box(symbols.clone())).unwrap();
            black_box(outcome);
        })
    });
}

criterion_group!(
    benches,
    bench_encode_1k_blocks,
    bench_encode_batch_parallel,
    bench_decode_256_blocks
);
criterion_main!(benches);
