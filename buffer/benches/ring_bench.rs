//! Benchmarks for RingBuffer transfers.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use streamring_buffer::RingBuffer;

fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_enqueue");

    for capacity in [64, 1024, 16384].iter() {
        let buf = RingBuffer::<f32>::new(*capacity);

        group.bench_with_input(BenchmarkId::new("single", capacity), capacity, |b, _| {
            b.iter(|| {
                for i in 0..256 {
                    buf.enqueue(black_box(i as f32)).unwrap();
                }
            });
        });

        let batch: Vec<f32> = (0..*capacity.min(&256)).map(|i| i as f32).collect();
        group.bench_with_input(BenchmarkId::new("batch", capacity), capacity, |b, _| {
            b.iter(|| buf.enqueue_batch(black_box(&batch)).unwrap());
        });
    }

    group.finish();
}

fn bench_windowed_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_windowed_read");

    // Window of 512 samples stepping by 128, as in short-time analysis.
    let buf = RingBuffer::<f32>::new(4096);
    let chunk: Vec<f32> = (0..128).map(|i| i as f32).collect();
    buf.enqueue_batch(&vec![0.0; 512]).unwrap();
    let mut window = vec![0.0f32; 512];

    group.bench_function("window_512_step_128", |b| {
        b.iter(|| {
            buf.enqueue_batch(&chunk).unwrap();
            buf.dequeue_batch(black_box(&mut window), 384).unwrap();
        });
    });

    group.bench_function("peek_512", |b| {
        b.iter(|| buf.peek_batch(black_box(&mut window)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_enqueue, bench_windowed_read);
criterion_main!(benches);
