//! Microbenchmarks for the Protocol 1 packet classifier.
//!
//! Measures `classify()` throughput across the packet shapes the
//! gateway sees most often in steady-state streaming: data frames
//! (the hot path) versus the much rarer discovery/set-ip control
//! frames.
//!
//! ## Run
//! ```bash
//! cargo bench --bench bench_classify
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hpsdr_gateway_lib::protocol::classify;

fn data_frame() -> Vec<u8> {
    let mut v = vec![0u8; 1032];
    v[0] = 0xEF;
    v[1] = 0xFE;
    v[2] = 0x01;
    v[3..7].copy_from_slice(&42u32.to_be_bytes());
    v
}

fn discovery_request() -> Vec<u8> {
    let mut v = vec![0u8; 63];
    v[0] = 0xEF;
    v[1] = 0xFE;
    v[2] = 0x02;
    v
}

fn set_ip() -> Vec<u8> {
    let mut v = vec![0u8; 64];
    v[0] = 0xEF;
    v[1] = 0xFE;
    v[2] = 0x04;
    v[4..8].copy_from_slice(&[192, 168, 1, 50]);
    v
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let cases: [(&str, Vec<u8>); 3] =
        [("data_frame", data_frame()), ("discovery_request", discovery_request()), ("set_ip", set_ip())];

    for (name, data) in &cases {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), data, |b, data| {
            b.iter(|| classify(std::hint::black_box(data)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
