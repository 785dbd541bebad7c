//! Benchmarks for token generation, hashing and the in-memory session path.
//!
//! Run with: `cargo bench -p lenslocked-auth`

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lenslocked_auth::config::SessionConfig;
use lenslocked_auth::session::SessionManager;
use lenslocked_auth::storage::InMemoryAuthStorage;
use lenslocked_auth::token::{OsRandom, Sha256TokenHasher, TokenHasher, generate_token};
use lenslocked_auth::types::User;

fn bench_generate_token(c: &mut Criterion) {
    c.bench_function("generate_token_32", |b| {
        b.iter(|| black_box(generate_token(&OsRandom, 32).unwrap()));
    });
    c.bench_function("generate_token_64", |b| {
        b.iter(|| black_box(generate_token(&OsRandom, 64).unwrap()));
    });
}

fn bench_hash_token(c: &mut Criterion) {
    let token = generate_token(&OsRandom, 32).unwrap();
    c.bench_function("sha256_hash_token", |b| {
        b.iter(|| black_box(Sha256TokenHasher.hash(black_box(&token))));
    });
}

fn bench_session_roundtrip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let storage = Arc::new(InMemoryAuthStorage::with_users([User {
        id: 1,
        email: "bench@example.com".to_string(),
        password_hash: String::new(),
    }]));
    let manager = SessionManager::new(storage, SessionConfig::default());

    c.bench_function("session_create_authenticate", |b| {
        b.to_async(&runtime).iter(|| async {
            let session = manager.create(1).await.unwrap();
            let token = session.token.unwrap_or_default();
            black_box(manager.authenticate(&token).await.unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_generate_token,
    bench_hash_token,
    bench_session_roundtrip
);
criterion_main!(benches);
