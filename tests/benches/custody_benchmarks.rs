//! # Custody Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Id derivation | < 5µs |
//! | Full lifecycle (create → deliver → sell, committed) | < 100µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use custody_lifecycle::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;

fn random_text(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

fn bench_derive_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("custody-identity");

    for len in [8usize, 64, 512] {
        let chassis = random_text(len);
        let manufacturer = random_text(len);
        let ts = TxTimestamp::new(1_704_164_645, 123_000_000);
        group.throughput(Throughput::Bytes((2 * len) as u64));
        group.bench_with_input(BenchmarkId::new("derive_id", len), &len, |b, _| {
            b.iter(|| derive_id(black_box(&chassis), black_box(&manufacturer), black_box(&ts)));
        });
    }

    group.finish();
}

fn invoke(
    contract: &CustodyContract,
    ledger: &InMemoryLedger,
    identity: &StaticIdentity,
    seconds: i64,
    function: &str,
    args: &[String],
) -> Vec<u8> {
    let mut tx = ledger.begin(format!("tx-{seconds}"), TxTimestamp::new(seconds, 0));
    let payload = {
        let mut ctx = InvocationContext::new(&mut tx, identity);
        contract.invoke(&mut ctx, function, args).unwrap()
    };
    tx.commit().unwrap();
    payload
}

fn bench_full_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("custody-lifecycle");
    let contract = CustodyContract::new(CustodyConfig::default());
    let identity = StaticIdentity::new("mfg-instance");

    group.bench_function("create_deliver_sell", |b| {
        let ledger = InMemoryLedger::new();
        let mut seconds = 1_704_164_645_i64;
        b.iter(|| {
            seconds += 1;
            let created = invoke(
                &contract,
                &ledger,
                &identity,
                seconds,
                "createCar",
                &["CH001".into(), "ACME".into(), "Springfield".into(), "MANUFACTURER".into()],
            );
            let id = CarEnvelope::decode(&created).unwrap().payload.id.to_string();
            invoke(
                &contract,
                &ledger,
                &identity,
                seconds,
                "deliverToDealer",
                &[id.clone(), "D".into(), "Metropolis".into(), "DEALER".into()],
            );
            black_box(invoke(
                &contract,
                &ledger,
                &identity,
                seconds,
                "saleToCustomer",
                &[id, "C".into(), "Gotham".into(), "DEALER".into()],
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_derive_id, bench_full_lifecycle);
criterion_main!(benches);
