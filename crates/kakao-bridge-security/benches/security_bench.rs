// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Benchmarks for the locally computed digests.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kakao_bridge_security::{PlatformId, code_challenge, key_hash};

fn bench_code_challenge(c: &mut Criterion) {
    let verifier = b"dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    c.bench_function("pkce_code_challenge", |b| {
        b.iter(|| code_challenge(black_box(verifier)))
    });
}

fn bench_key_hash(c: &mut Criterion) {
    // Typical X.509 signing certificate size.
    let certs = vec![vec![0x30u8; 1400]];
    c.bench_function("signing_key_hash", |b| {
        b.iter(|| key_hash(black_box(&certs)).unwrap())
    });
}

fn bench_platform_id(c: &mut Criterion) {
    c.bench_function("platform_id_digest", |b| {
        b.iter(|| PlatformId::from_device_id(black_box("9774d56d682e549c")))
    });
}

criterion_group!(benches, bench_code_challenge, bench_key_hash, bench_platform_id);
criterion_main!(benches);
