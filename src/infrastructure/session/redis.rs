use async_trait::async_trait;
use deadpool_redis::{redis, Config, CreatePoolError, Pool, Runtime};
use uuid::Uuid;

use crate::{entities::cart::Cart, errors::AppError, repositories::cart_store::CartStore};

const KEY_PREFIX: &str = "cart";

/// Carts stored as JSON objects under `cart:<user-id>`; every write renews
/// the session TTL.
#[derive(Clone)]
pub struct RedisCartStore {
    pool: Pool,
    ttl_secs: u64,
}

impl RedisCartStore {
    pub fn new(url: &str, ttl_secs: u64) -> Result<Self, CreatePoolError> {
        let pool = Config::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(RedisCartStore { pool, ttl_secs })
    }

    fn key(user_id: &Uuid) -> String {
        format!("{KEY_PREFIX}:{user_id}")
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, AppError> {
        self.pool
            .get()
            .await
            .map_err(|e| AppError::InternalError(format!("Redis pool error: {e}")))
    }
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::InternalError(format!("Redis error: {e}"))
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn load(&self, user_id: &Uuid) -> Result<Cart, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::key(user_id))
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;

        match raw {
            None => Ok(Cart::new()),
            Some(json) => serde_json::from_str(&json).or_else(|e| {
                tracing::warn!(%user_id, "Discarding unreadable cart: {}", e);
                Ok(Cart::new())
            }),
        }
    }

    async fn save(&self, user_id: &Uuid, cart: &Cart) -> Result<(), AppError> {
        if cart.is_empty() {
            return self.clear(user_id).await;
        }

        let json = serde_json::to_string(cart)
            .map_err(|e| AppError::InternalError(format!("Cart serialization failed: {e}")))?;

        let mut conn = self.connection().await?;
        let _: () = redis::cmd("SET")
            .arg(Self::key(user_id))
            .arg(json)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;

        Ok(())
    }

    async fn clear(&self, user_id: &Uuid) -> Result<(), AppError> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("DEL")
            .arg(Self::key(user_id))
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;

        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
