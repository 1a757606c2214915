// Copyright (c) 2025 Subsumio GmbH. All rights reserved.
// This software is proprietary and confidential.

//! Subsumio Trust - Performance Benchmarks
//! © 2025 Subsumio GmbH
//!
//! Throughput of classification and policy decisions on the request path

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use subsumio_trust::{classify, CorsGate, OriginRegistry, RedirectPolicy, TrustConfig};

fn bench_policy() -> RedirectPolicy {
    let registry = OriginRegistry::initialize(&TrustConfig {
        host: "app.example.com".to_string(),
        https: true,
        additional_hosts: vec!["alt.example.com".to_string()],
        ..Default::default()
    })
    .unwrap();
    RedirectPolicy::new(Arc::new(registry))
}

fn benchmark_classify(c: &mut Criterion) {
    let candidates = vec![
        "/workspace/abc?tab=files",
        "https://app.example.com/settings",
        "//evil.com/x",
        "https://user:pw@app.example.com/",
        "javascript:alert(1)",
        "https://www.github.com/org/repo",
    ];

    c.bench_function("classify", |b| {
        b.iter(|| {
            for candidate in &candidates {
                let _ = classify(black_box(candidate));
            }
        })
    });
}

fn benchmark_redirect_target(c: &mut Criterion) {
    let policy = bench_policy();
    let candidates = vec![
        "/workspace/abc",
        "https://app.example.com/settings",
        "https://checkout.stripe.com/session/x",
        "https://evil.com/phish",
    ];

    c.bench_function("is_allowed_redirect_target", |b| {
        b.iter(|| {
            for candidate in &candidates {
                let _ = policy.is_allowed_redirect_target(black_box(candidate));
            }
        })
    });
}

fn benchmark_safe_redirect(c: &mut Criterion) {
    let policy = bench_policy();

    c.bench_function("safe_redirect", |b| {
        b.iter(|| {
            let _ = policy.safe_redirect(
                black_box("%2Fworkspace%2Fabc%2F"),
                black_box("https://app.example.com"),
            );
        })
    });
}

fn benchmark_cors_gate(c: &mut Criterion) {
    let gate = CorsGate::new(bench_policy());

    c.bench_function("cors_gate_check", |b| {
        b.iter(|| {
            let _ = gate.check(black_box(Some("https://app.example.com")));
            let _ = gate.check(black_box(Some("https://random.test")));
            let _ = gate.check(black_box(None));
        })
    });
}

criterion_group!(
    benches,
    benchmark_classify,
    benchmark_redirect_target,
    benchmark_safe_redirect,
    benchmark_cors_gate
);
criterion_main!(benches);
