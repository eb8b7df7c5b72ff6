//! OTP manager behavior against a reachable and an unreachable primary
//! store

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::services::otp::{OtpConfig, OtpManager};
use crate::store::{KeyValueStore, MockStore};

const TTL: Duration = Duration::from_secs(600);

fn manager_with(store: Arc<MockStore>) -> OtpManager<MockStore> {
    OtpManager::new(Some(store), OtpConfig::default())
}

#[tokio::test]
async fn test_generate_then_verify() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", TTL).await;

    assert!(manager.verify(user, "corrA", &code).await);
}

#[tokio::test]
async fn test_wrong_code_rejected() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", TTL).await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    assert!(!manager.verify(user, "corrA", wrong).await);
}

#[tokio::test]
async fn test_wrong_correlation_token_rejected() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", TTL).await;

    assert!(!manager.verify(user, "corrB", &code).await);
}

#[tokio::test]
async fn test_verify_without_generate_is_false() {
    let manager = manager_with(Arc::new(MockStore::new()));

    assert!(!manager.verify(Uuid::new_v4(), "corrA", "482913").await);
}

#[tokio::test]
async fn test_expired_code_rejected() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", Duration::from_millis(20)).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!manager.verify(user, "corrA", &code).await);
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let user = Uuid::new_v4();

    let first = manager.generate(user, "corrA", TTL).await;
    let second = manager.generate(user, "corrB", TTL).await;

    assert!(!manager.verify(user, "corrA", &first).await);
    assert!(manager.verify(user, "corrB", &second).await);
}

#[tokio::test]
async fn test_verification_does_not_consume_entry() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", TTL).await;

    assert!(manager.verify(user, "corrA", &code).await);
    assert!(manager.verify(user, "corrA", &code).await);
}

#[tokio::test]
async fn test_entry_ttl_applied_in_primary() {
    let store = Arc::new(MockStore::new());
    let manager = manager_with(Arc::clone(&store));
    let user = Uuid::new_v4();

    manager.generate(user, "corrA", TTL).await;

    assert_eq!(store.ttl_of(&format!("otp:{}", user)), Some(TTL));
}

#[tokio::test]
async fn test_outage_round_trip_uses_fallback() {
    let store = Arc::new(MockStore::unreachable());
    let manager = manager_with(Arc::clone(&store));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", TTL).await;

    assert_eq!(code.len(), 6);
    assert_eq!(manager.fallback().len(), 1);
    assert!(manager.verify(user, "corrA", &code).await);
    assert!(!manager.verify(user, "corrA", "999999").await);
    assert!(!manager.verify(user, "corrX", &code).await);
}

#[tokio::test]
async fn test_outage_reissue_invalidates_previous_code() {
    let store = Arc::new(MockStore::unreachable());
    let manager = manager_with(Arc::clone(&store));
    let user = Uuid::new_v4();

    let first = manager.generate(user, "corrA", TTL).await;
    let second = manager.generate(user, "corrB", TTL).await;

    assert!(!manager.verify(user, "corrA", &first).await);
    assert!(manager.verify(user, "corrB", &second).await);
}

#[tokio::test]
async fn test_recovery_clears_stale_fallback_entry() {
    let store = Arc::new(MockStore::unreachable());
    let manager = manager_with(Arc::clone(&store));
    let user = Uuid::new_v4();

    // First code lands in the fallback during the outage
    let stale = manager.generate(user, "corrA", TTL).await;

    // Store recovers; the next issuance goes to the primary and must
    // purge the fallback copy
    store.set_available(true);
    let fresh = manager.generate(user, "corrB", TTL).await;

    assert!(manager.fallback().is_empty());
    assert!(manager.verify(user, "corrB", &fresh).await);

    // Even if the store drops again, the replaced code stays dead
    store.set_available(false);
    assert!(!manager.verify(user, "corrA", &stale).await);
}

#[tokio::test]
async fn test_malformed_stored_timestamp_fails_closed() {
    let store = Arc::new(MockStore::new());
    let manager = manager_with(Arc::clone(&store));
    let user = Uuid::new_v4();

    let code = manager.generate(user, "corrA", TTL).await;

    // Corrupt the stored expiry out from under the manager
    store
        .hash_set(
            &format!("otp:{}", user),
            &[("expires_at".to_string(), "garbage".to_string())],
        )
        .await
        .unwrap();

    assert!(!manager.verify(user, "corrA", &code).await);
}

#[tokio::test]
async fn test_no_primary_store_configured() {
    let manager: OtpManager<MockStore> = OtpManager::new(None, OtpConfig::default());
    let user = Uuid::new_v4();

    let code = manager.generate_with_default_ttl(user, "corrA").await;

    assert!(manager.verify(user, "corrA", &code).await);
    assert!(!manager.verify(user, "corrB", &code).await);
}

#[tokio::test]
async fn test_codes_are_independent_per_user() {
    let manager = manager_with(Arc::new(MockStore::new()));
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let alice_code = manager.generate(alice, "corrA", TTL).await;
    let bob_code = manager.generate(bob, "corrB", TTL).await;

    assert!(manager.verify(alice, "corrA", &alice_code).await);
    assert!(manager.verify(bob, "corrB", &bob_code).await);
    assert!(!manager.verify(alice, "corrB", &bob_code).await);
}
