//! Redis implementation of the core key-value store seam
//!
//! Wraps a multiplexed async connection. Every operation is bounded by the
//! configured response timeout; connection establishment retries with
//! exponential backoff. All errors map into `StoreError`, which the core
//! services treat as "take the fallback path".

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, IntoConnectionInfo, RedisResult};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use portal_core::errors::StoreError;
use portal_core::store::KeyValueStore;
use portal_shared::config::CacheConfig;

/// Connection attempts before giving up at startup
const MAX_CONNECT_ATTEMPTS: u32 = 3;

/// Base delay between connection attempts in milliseconds
const CONNECT_RETRY_DELAY_MS: u64 = 500;

/// Backoff cap between connection attempts in milliseconds
const CONNECT_RETRY_DELAY_CAP_MS: u64 = 5000;

/// Redis-backed [`KeyValueStore`]
///
/// Cheap to clone; clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisStore {
    /// Connect to Redis using the given configuration
    ///
    /// Retries the initial connection with exponential backoff. A failure
    /// here is surfaced so the caller can decide to run without a primary
    /// store (the core services accept `None`).
    pub async fn connect(config: CacheConfig) -> Result<Self, StoreError> {
        info!(
            url = %mask_url(&config.url),
            pool_size = config.pool_size,
            database = config.database,
            "Connecting to Redis"
        );

        let mut info = config
            .url
            .as_str()
            .into_connection_info()
            .map_err(|e| StoreError::Unreachable(format!("invalid Redis URL: {}", e)))?;
        if let Some(password) = &config.password {
            info.redis.password = Some(password.clone());
        }
        info.redis.db = config.database as i64;

        let client = Client::open(info)
            .map_err(|e| StoreError::Unreachable(format!("invalid Redis config: {}", e)))?;

        let connection = Self::connect_with_retry(&client, config.connect_timeout()).await?;

        info!("Redis connection established");

        Ok(Self { connection, config })
    }

    async fn connect_with_retry(
        client: &Client,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, StoreError> {
        let mut attempt = 1;
        let mut delay = CONNECT_RETRY_DELAY_MS;

        loop {
            debug!(attempt, "Attempting Redis connection");

            let connect = tokio::time::timeout(
                connect_timeout,
                client.get_multiplexed_async_connection(),
            )
            .await;

            match connect {
                Ok(Ok(connection)) => return Ok(connection),
                Ok(Err(e)) if attempt < MAX_CONNECT_ATTEMPTS => {
                    warn!(
                        attempt,
                        max_attempts = MAX_CONNECT_ATTEMPTS,
                        error = %e,
                        delay_ms = delay,
                        "Redis connection failed, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(CONNECT_RETRY_DELAY_CAP_MS);
                    attempt += 1;
                }
                Ok(Err(e)) => {
                    error!(attempts = attempt, error = %e, "Redis connection failed");
                    return Err(StoreError::Unreachable(e.to_string()));
                }
                Err(_) if attempt < MAX_CONNECT_ATTEMPTS => {
                    warn!(
                        attempt,
                        max_attempts = MAX_CONNECT_ATTEMPTS,
                        timeout_ms = connect_timeout.as_millis() as u64,
                        "Redis connection attempt timed out, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(CONNECT_RETRY_DELAY_CAP_MS);
                    attempt += 1;
                }
                Err(_) => {
                    error!(
                        attempts = attempt,
                        "Redis connection timed out on every attempt"
                    );
                    return Err(StoreError::Timeout {
                        timeout_ms: connect_timeout.as_millis() as u64,
                    });
                }
            }
        }
    }

    /// Run a Redis future under the configured response timeout
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = RedisResult<T>>,
    ) -> Result<T, StoreError> {
        let timeout = self.config.response_timeout();

        match tokio::time::timeout(timeout, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(StoreError::Unreachable(e.to_string())),
            Err(_) => Err(StoreError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();

        let response = self
            .bounded(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            .await?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(StoreError::Unreachable(format!(
                "unexpected PING reply: {}",
                response
            )))
        }
    }

    async fn set_add(&self, set: &str, member: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let set = set.to_string();
        let member = member.to_string();

        self.bounded(async move { conn.sadd::<_, _, ()>(set, member).await })
            .await
    }

    async fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let set = set.to_string();
        let member = member.to_string();

        self.bounded(async move { conn.sismember::<_, _, bool>(set, member).await })
            .await
    }

    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let key = key.to_string();
        let fields = fields.to_vec();

        self.bounded(async move { conn.hset_multiple::<_, _, _, ()>(key, &fields).await })
            .await
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn = self.connection.clone();
        let key = key.to_string();

        self.bounded(async move { conn.hgetall::<_, HashMap<String, String>>(key).await })
            .await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let key = key.to_string();
        let seconds = ttl.as_secs().max(1);

        self.bounded(async move {
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(seconds)
                .query_async::<_, i64>(&mut conn)
                .await
        })
        .await
        .map(|_| ())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let key = key.to_string();

        self.bounded(async move { conn.del::<_, ()>(key).await })
            .await
    }
}

/// Mask credentials embedded in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(proto_end), Some(at_pos)) = (url.find("://"), url.find('@')) {
        if proto_end + 3 < at_pos {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
