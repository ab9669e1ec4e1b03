use core::hint::black_box;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dxt_squish_api::{Codec, CompressionOptions, Fit, Format, SquishFlags};

/// A `size` x `size` image with a repeating colour pattern.
fn generate_image(size: usize) -> Vec<u8> {
    (0..size * size)
        .flat_map(|pixel| {
            let (x, y) = (pixel % size, pixel / size);
            [(x * 5) as u8, (y * 3) as u8, ((x ^ y) * 7) as u8, 255]
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compress Image (facade)");
    let codec = Codec::linked();

    let size = 128;
    let image = generate_image(size);
    group.throughput(Throughput::Bytes(image.len() as u64));

    for format in [Format::Dxt1, Format::Dxt5] {
        for fit in [Fit::Range, Fit::Cluster] {
            let options = CompressionOptions::new(format).with_fit(fit);
            let flags = SquishFlags::from(options);
            let mut output = vec![0u8; codec.storage_requirements(size, size, flags).unwrap_or(0)];

            group.bench_with_input(
                BenchmarkId::new("compress_image", format!("{format:?}_{fit:?}")),
                &flags,
                |b, &flags| {
                    b.iter(|| {
                        let _ = codec.compress_image_into(black_box(&image), size, size, &mut output, flags);
                    })
                },
            );
        }
    }

    let blocks = codec.compress_image(&image, size, size, Format::Dxt5).unwrap_or_default();
    let mut decoded = vec![0u8; image.len()];
    group.bench_function("decompress_image_dxt5", |b| {
        b.iter(|| {
            let _ = codec.decompress_image_into(black_box(&blocks), size, size, &mut decoded, Format::Dxt5);
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
