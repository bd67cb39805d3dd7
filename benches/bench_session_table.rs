//! Microbenchmarks for the session table's hot-path operations.
//!
//! The engine calls `get_or_create` and `record_to_radio`/
//! `record_to_client` once per datagram on a single task, so their
//! per-call cost sets a hard ceiling on gateway throughput.
//!
//! ## Run
//! ```bash
//! cargo bench --bench bench_session_table
//! ```

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use hpsdr_gateway_lib::auth::Principal;
use hpsdr_gateway_lib::radio::RadioDescriptor;
use hpsdr_gateway_lib::session::SessionTable;

const TTL: Duration = Duration::from_secs(3600);

fn radio() -> RadioDescriptor {
    RadioDescriptor {
        name: "r1".into(),
        hostname: "127.0.0.1".into(),
        control_addr: "127.0.0.1:1024".parse().unwrap(),
        data_addr: "127.0.0.1:1024".parse().unwrap(),
        resolved: true,
    }
}

fn bench_get_or_create_existing(c: &mut Criterion) {
    let table = SessionTable::new();
    let radio = radio();
    let client: SocketAddr = "10.0.0.1:5000".parse().unwrap();
    table.get_or_create(client, &radio, Principal::Anonymous, Instant::now(), TTL);

    c.bench_function("get_or_create/existing_session", |b| {
        b.iter(|| {
            let now = Instant::now();
            table.get_or_create(std::hint::black_box(client), &radio, Principal::Anonymous, now, TTL)
        });
    });
}

fn bench_record_to_radio(c: &mut Criterion) {
    let table = SessionTable::new();
    let radio = radio();
    let client: SocketAddr = "10.0.0.2:5000".parse().unwrap();
    table.get_or_create(client, &radio, Principal::Anonymous, Instant::now(), TTL);

    c.bench_function("record_to_radio", |b| {
        b.iter(|| table.record_to_radio(std::hint::black_box(client), 1032, Instant::now()));
    });
}

fn bench_sweep_idle_empty(c: &mut Criterion) {
    let table = SessionTable::new();
    let radio = radio();
    for i in 0..1000u16 {
        let client: SocketAddr = format!("10.0.{}.{}:5000", i / 256, i % 256).parse().unwrap();
        table.get_or_create(client, &radio, Principal::Anonymous, Instant::now(), TTL);
    }

    c.bench_function("sweep_idle/1000_sessions_none_idle", |b| {
        b.iter(|| table.sweep(Instant::now(), std::time::Duration::from_secs(3600)));
    });
}

criterion_group!(benches, bench_get_or_create_existing, bench_record_to_radio, bench_sweep_idle_empty);
criterion_main!(benches);
