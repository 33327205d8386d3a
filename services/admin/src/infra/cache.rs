use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::TokenStore;
use crate::error::AdminServiceError;

#[derive(Clone)]
pub struct RedisTokenStore {
    pub pool: Pool,
}

fn refresh_key(user_id: i64, token: &str) -> String {
    format!("refresh_token:{}:{}", user_id, token)
}

fn blacklist_key(token: &str) -> String {
    format!("token:blacklist:{}", token)
}

impl RedisTokenStore {
    async fn conn(&self) -> Result<deadpool_redis::Connection, AdminServiceError> {
        self.pool
            .get()
            .await
            .map_err(|e| AdminServiceError::Internal(e.into()))
    }

    /// Round-trip a `PING`; used by the readiness probe.
    pub async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.pool.get().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

impl TokenStore for RedisTokenStore {
    async fn store_refresh(
        &self,
        user_id: i64,
        token: &str,
        ttl_secs: u64,
    ) -> Result<(), AdminServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(refresh_key(user_id, token), user_id, ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AdminServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn refresh_exists(&self, user_id: i64, token: &str) -> Result<bool, AdminServiceError> {
        let mut conn = self.conn().await?;
        let exists: bool = conn
            .exists(refresh_key(user_id, token))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AdminServiceError::Internal(e.into()))?;
        Ok(exists)
    }

    async fn remove_refresh(&self, user_id: i64, token: &str) -> Result<(), AdminServiceError> {
        let mut conn = self.conn().await?;
        let _: i64 = conn
            .del(refresh_key(user_id, token))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AdminServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn blacklist(&self, token: &str, ttl_secs: u64) -> Result<(), AdminServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(blacklist_key(token), 1, ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AdminServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> Result<bool, AdminServiceError> {
        let mut conn = self.conn().await?;
        let exists: bool = conn
            .exists(blacklist_key(token))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AdminServiceError::Internal(e.into()))?;
        Ok(exists)
    }
}
