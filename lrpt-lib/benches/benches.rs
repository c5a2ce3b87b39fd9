use rand::Rng;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lrpt::deframing::{deinterleave, ResyncOpts, Resynchronizer, DATA_LEN, SYNC_WORD};
use lrpt::doqpsk::{differential_decode, DiffState, IsqrtTable};

fn random_symbols(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

fn framed_symbols(frames: usize) -> Vec<u8> {
    let mut sync = [0xc0u8; 8];
    for (i, s) in sync.iter_mut().enumerate() {
        if (SYNC_WORD >> i) & 1 == 1 {
            *s = 0x40;
        }
    }
    let mut raw = Vec::default();
    for _ in 0..frames {
        raw.extend_from_slice(&sync);
        raw.extend(random_symbols(DATA_LEN));
    }
    raw
}

fn bench_resync(c: &mut Criterion) {
    let framed = framed_symbols(10_000);
    let noise = random_symbols(framed.len());

    let mut group = c.benchmark_group("resync");
    group.throughput(Throughput::Bytes(framed.len() as u64));
    group.bench_function("tracking", |b| {
        b.iter(|| Resynchronizer::new(ResyncOpts::default()).resync(&framed));
    });
    group.bench_function("noise", |b| {
        b.iter(|| Resynchronizer::new(ResyncOpts::default()).resync(&noise));
    });
    group.finish();
}

fn bench_deinterleave(c: &mut Criterion) {
    let data = random_symbols(1_000_000);

    let mut group = c.benchmark_group("deinterleave");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("loop", |b| {
        b.iter(|| deinterleave(&data));
    });
    group.finish();
}

fn bench_differential_decode(c: &mut Criterion) {
    let table = IsqrtTable::new();
    let buf: Vec<i8> = random_symbols(65_536).into_iter().map(|b| b as i8).collect();

    let mut group = c.benchmark_group("differential_decode");
    group.throughput(Throughput::Bytes(buf.len() as u64));
    group.bench_function("loop", |b| {
        b.iter(|| {
            let mut buf = buf.clone();
            let mut state = DiffState::default();
            differential_decode(&table, &mut state, &mut buf).unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_resync,
    bench_deinterleave,
    bench_differential_decode,
);
criterion_main!(benches);
