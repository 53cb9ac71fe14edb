use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use slircd_clientproto::batch::BatchManager;
use slircd_clientproto::caps::NegotiatedCap;
use slircd_clientproto::config::{ClassBlock, Config};
use slircd_clientproto::isupport::IsupportManager;
use slircd_clientproto::state::{ClassDirectory, LocalSession, Session, SessionInts, SessionTable};
use std::hint::black_box;
use std::sync::Arc;

// Per-message cost of the batch membership check once the start frame is out.
fn should_include_member_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(1));

    let config = Config::default();
    let directory = ClassDirectory::new(&config.classes);
    let (session, _rx) = LocalSession::new("alice", Arc::clone(&directory.classes()[0]), 16);
    session.enable_cap("batch");
    let session: Arc<dyn Session> = session;

    let mut framer = BatchManager::new(
        "irc.bench",
        Arc::new(NegotiatedCap::batch()),
        Arc::new(SessionInts::new("batchbits")),
    );
    let batch = framer.create("chathistory");
    framer.start(batch);
    framer.should_include_member(&session, batch);

    group.bench_function("should_include_member", |b| {
        b.iter(|| framer.should_include_member(black_box(&session), black_box(batch)))
    });

    group.finish();
}

// Full rebuild with nothing changed: token assembly plus a walk over sessions.
fn rebuild_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("isupport");

    let mut config = Config::default();
    config.classes = (0..4)
        .map(|i| ClassBlock {
            name: format!("class{i}"),
            max_channels: 20 + i,
        })
        .collect();
    let directory = ClassDirectory::new(&config.classes);

    for sessions in [100usize, 1000] {
        let table = SessionTable::new();
        let mut receivers = Vec::with_capacity(sessions);
        for i in 0..sessions {
            let class = &directory.classes()[i % directory.classes().len()];
            let (session, rx) = LocalSession::new(format!("user{i}"), Arc::clone(class), 16);
            session.set_registered(true);
            table.insert(session);
            receivers.push(rx);
        }

        let mut isupport = IsupportManager::with_defaults(&config);
        isupport.build(directory.classes(), &table);

        group.throughput(Throughput::Elements(sessions as u64));
        group.bench_with_input(BenchmarkId::new("build", sessions), &sessions, |b, _| {
            b.iter(|| isupport.build(black_box(directory.classes()), &table))
        });
    }

    group.finish();
}

criterion_group!(benches, should_include_member_benchmark, rebuild_benchmark);
criterion_main!(benches);
