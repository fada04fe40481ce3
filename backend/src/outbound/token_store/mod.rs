//! Redis-backed password-reset token store.
//!
//! Tokens live under a namespaced key with a per-key TTL; Redis alone is
//! responsible for expiry, so readers only ever observe presence or absence.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;

use crate::domain::ports::{ResetTokenStore, TokenStoreError};
use crate::domain::UserId;

const KEY_PREFIX: &str = "password-reset:";

fn token_key(token: &str) -> String {
    format!("{KEY_PREFIX}{token}")
}

/// Redis implementation of the [`ResetTokenStore`] port.
#[derive(Clone)]
pub struct RedisResetTokenStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisResetTokenStore {
    /// Connect to Redis and build the connection pool.
    ///
    /// # Errors
    /// Returns [`TokenStoreError::Connection`] when the URL is invalid or the
    /// pool cannot be built.
    pub async fn connect(url: &str) -> Result<Self, TokenStoreError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|err| TokenStoreError::connection(err.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|err| TokenStoreError::connection(err.to_string()))?;
        Ok(Self { pool })
    }

    async fn conn(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, TokenStoreError> {
        self.pool
            .get()
            .await
            .map_err(|err| TokenStoreError::connection(err.to_string()))
    }
}

#[async_trait]
impl ResetTokenStore for RedisResetTokenStore {
    async fn set(
        &self,
        token: &str,
        user_id: &UserId,
        ttl: Duration,
    ) -> Result<(), TokenStoreError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .set_ex(token_key(token), user_id.to_string(), ttl.as_secs())
            .await
            .map_err(|err| TokenStoreError::command(err.to_string()))?;
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<UserId>, TokenStoreError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(token_key(token))
            .await
            .map_err(|err| TokenStoreError::command(err.to_string()))?;

        match value {
            None => Ok(None),
            Some(raw) => UserId::new(&raw).map(Some).map_err(|err| {
                TokenStoreError::command(format!("malformed user id in token entry: {err}"))
            }),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .del(token_key(token))
            .await
            .map_err(|err| TokenStoreError::command(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        assert_eq!(
            token_key("3fa85f64-5717-4562-b3fc-2c963f66afa6"),
            "password-reset:3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
    }
}
