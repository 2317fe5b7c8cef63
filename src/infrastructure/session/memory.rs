use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{entities::cart::Cart, errors::AppError, repositories::cart_store::CartStore};

/// Carts held in process memory. Lost on restart and not shared between
/// instances; meant for development and tests.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    carts: Arc<DashMap<Uuid, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        InMemoryCartStore::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, user_id: &Uuid) -> Result<Cart, AppError> {
        Ok(self
            .carts
            .get(user_id)
            .map(|cart| cart.value().clone())
            .unwrap_or_default())
    }

    async fn save(&self, user_id: &Uuid, cart: &Cart) -> Result<(), AppError> {
        if cart.is_empty() {
            self.carts.remove(user_id);
        } else {
            self.carts.insert(*user_id, cart.clone());
        }
        Ok(())
    }

    async fn clear(&self, user_id: &Uuid) -> Result<(), AppError> {
        self.carts.remove(user_id);
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
