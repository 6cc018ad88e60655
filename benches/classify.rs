use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spiderwrap::builder::RequestBuilder;
use spiderwrap::catalog::UseCase;
use spiderwrap::target::{classify_target, TargetType};

const TARGETS: &[&str] = &[
    "192.168.1.1",
    "192.168.1.0/24",
    "example.com",
    "a.b.example.com",
    "user@example.com",
    "+14155552671",
    "AS15169",
    "1BoatSLRHtKNngkdXEeobR76b53LETtpyT",
    "@johndoe",
    "John Smith",
    "not a valid@@target",
];

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_mixed_targets", |b| {
        b.iter(|| {
            for target in TARGETS {
                black_box(classify_target(black_box(target)));
            }
        })
    });
}

fn bench_build(c: &mut Criterion) {
    let builder = RequestBuilder::new();
    c.bench_function("build_universal_fallback", |b| {
        b.iter(|| black_box(builder.build(TargetType::Unknown, UseCase::All, "", "")))
    });
    c.bench_function("build_filtered_modules", |b| {
        b.iter(|| black_box(builder.build(TargetType::Domain, UseCase::Passive, "", "")))
    });
}

criterion_group!(benches, bench_classify, bench_build);
criterion_main!(benches);
