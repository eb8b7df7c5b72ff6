//! Revocation service behavior against a reachable and an unreachable
//! primary store

use std::sync::Arc;

use crate::services::revocation::{RevocationConfig, RevocationService};
use crate::store::MockStore;
use crate::store::KeyValueStore;

fn service_with(store: Arc<MockStore>) -> RevocationService<MockStore> {
    RevocationService::new(Some(store), RevocationConfig::fast())
}

#[tokio::test]
async fn test_unknown_token_is_not_revoked() {
    let service = service_with(Arc::new(MockStore::new()));

    assert!(!service.is_revoked("never-revoked").await);
}

#[tokio::test]
async fn test_revoke_then_query() {
    let service = service_with(Arc::new(MockStore::new()));

    service.revoke("raw-jwt-abc123").await;

    assert!(service.is_revoked("raw-jwt-abc123").await);
    assert!(!service.is_revoked("raw-jwt-other").await);
}

#[tokio::test]
async fn test_revoke_persists_to_primary_set() {
    let store = Arc::new(MockStore::new());
    let service = service_with(Arc::clone(&store));

    service.revoke("raw-jwt-abc123").await;

    assert!(store
        .set_contains("revoked_tokens", "raw-jwt-abc123")
        .await
        .unwrap());
    // Fallback set stays empty while the primary accepts writes
    assert!(service.fallback().is_empty());
}

#[tokio::test]
async fn test_retention_applied_to_primary_set() {
    let store = Arc::new(MockStore::new());
    let config = RevocationConfig {
        max_retention: Some(std::time::Duration::from_secs(3600)),
        ..RevocationConfig::fast()
    };
    let service = RevocationService::new(Some(Arc::clone(&store)), config);

    service.revoke("raw-jwt-abc123").await;

    assert_eq!(
        store.ttl_of("revoked_tokens"),
        Some(std::time::Duration::from_secs(3600))
    );
}

#[tokio::test]
async fn test_revoke_during_outage_uses_fallback() {
    let store = Arc::new(MockStore::unreachable());
    let service = service_with(Arc::clone(&store));

    // Completes without error even though every store call fails
    service.revoke("raw-jwt-abc123").await;

    assert!(service.is_revoked("raw-jwt-abc123").await);
    assert_eq!(service.fallback().len(), 1);
}

#[tokio::test]
async fn test_outage_revocation_survives_store_recovery() {
    let store = Arc::new(MockStore::unreachable());
    let service = service_with(Arc::clone(&store));

    service.revoke("raw-jwt-abc123").await;
    store.set_available(true);

    // The token never reached the primary, but the process still knows
    assert!(service.is_revoked("raw-jwt-abc123").await);
}

#[tokio::test]
async fn test_is_revoked_fails_open_during_outage() {
    let store = Arc::new(MockStore::new());
    let service = service_with(Arc::clone(&store));

    service.revoke("revoked-while-up").await;
    store.set_available(false);

    // Token only known to the primary: fail open rather than block auth
    assert!(!service.is_revoked("revoked-while-up").await);
    // Token never revoked at all: also false
    assert!(!service.is_revoked("never-revoked").await);
}

#[tokio::test]
async fn test_no_primary_store_configured() {
    let service: RevocationService<MockStore> =
        RevocationService::new(None, RevocationConfig::fast());

    service.revoke("raw-jwt-abc123").await;

    assert!(service.is_revoked("raw-jwt-abc123").await);
    assert!(!service.is_revoked("raw-jwt-other").await);
}
