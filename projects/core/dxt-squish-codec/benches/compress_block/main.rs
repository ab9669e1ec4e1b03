use core::hint::black_box;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dxt_squish_codec::flags::*;
use dxt_squish_codec::{compress_block, decompress_block, BLOCK_RGBA_LEN};

/// Builds `count` blocks of loosely varying pixels so the fitters have real work to do.
fn generate_blocks(count: usize) -> Vec<[u8; BLOCK_RGBA_LEN]> {
    (0..count)
        .map(|block_idx| {
            core::array::from_fn(|i| {
                let pixel = i / 4;
                match i % 4 {
                    3 => 255,
                    channel => ((block_idx * 7 + pixel * 13 + channel * 29) % 256) as u8,
                }
            })
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compress Blocks (RGBA8888 -> DXT)");

    // 1024 blocks = 64KiB of pixels
    let blocks = generate_blocks(1024);
    group.throughput(Throughput::Bytes((blocks.len() * BLOCK_RGBA_LEN) as u64));

    let cases = [
        ("dxt1_range", DXT1 | COLOUR_RANGE_FIT),
        ("dxt1_cluster", DXT1 | COLOUR_CLUSTER_FIT),
        ("dxt1_iterative", DXT1 | COLOUR_ITERATIVE_CLUSTER_FIT),
        ("dxt5_range", DXT5 | COLOUR_RANGE_FIT),
        ("dxt5_cluster", DXT5 | COLOUR_CLUSTER_FIT),
    ];

    let mut output = [0u8; 16];
    for (name, flags) in cases {
        group.bench_with_input(BenchmarkId::new("compress", name), &flags, |b, &flags| {
            b.iter(|| {
                for block in &blocks {
                    compress_block(black_box(block), &mut output, flags);
                }
            })
        });
    }

    // Decode the last compressed DXT5 output repeatedly.
    group.bench_function("decompress_dxt5", |b| {
        b.iter(|| {
            for _ in 0..blocks.len() {
                black_box(decompress_block(black_box(&output), DXT5));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
