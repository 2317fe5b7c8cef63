//! Session cart storage backends.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{entities::cart::Cart, errors::AppError, repositories::cart_store::CartStore};

pub use self::{memory::InMemoryCartStore, redis::RedisCartStore};

/// The backend chosen at startup: Redis when configured, process memory
/// otherwise.
#[derive(Clone)]
pub enum SessionCartStore {
    Redis(RedisCartStore),
    Memory(InMemoryCartStore),
}

impl SessionCartStore {
    pub fn redis(url: &str, ttl_secs: u64) -> Result<Self, deadpool_redis::CreatePoolError> {
        RedisCartStore::new(url, ttl_secs).map(SessionCartStore::Redis)
    }

    pub fn memory() -> Self {
        SessionCartStore::Memory(InMemoryCartStore::new())
    }
}

#[async_trait]
impl CartStore for SessionCartStore {
    async fn load(&self, user_id: &Uuid) -> Result<Cart, AppError> {
        match self {
            SessionCartStore::Redis(store) => store.load(user_id).await,
            SessionCartStore::Memory(store) => store.load(user_id).await,
        }
    }

    async fn save(&self, user_id: &Uuid, cart: &Cart) -> Result<(), AppError> {
        match self {
            SessionCartStore::Redis(store) => store.save(user_id, cart).await,
            SessionCartStore::Memory(store) => store.save(user_id, cart).await,
        }
    }

    async fn clear(&self, user_id: &Uuid) -> Result<(), AppError> {
        match self {
            SessionCartStore::Redis(store) => store.clear(user_id).await,
            SessionCartStore::Memory(store) => store.clear(user_id).await,
        }
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        match self {
            SessionCartStore::Redis(store) => store.check_connection().await,
            SessionCartStore::Memory(store) => store.check_connection().await,
        }
    }

    fn backend(&self) -> &'static str {
        match self {
            SessionCartStore::Redis(store) => store.backend(),
            SessionCartStore::Memory(store) => store.backend(),
        }
    }
}
