use async_trait::async_trait;
use uuid::Uuid;

use crate::{entities::cart::Cart, errors::AppError};

/// Per-user session storage for carts. A missing cart loads as empty.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load(&self, user_id: &Uuid) -> Result<Cart, AppError>;
    async fn save(&self, user_id: &Uuid, cart: &Cart) -> Result<(), AppError>;
    async fn clear(&self, user_id: &Uuid) -> Result<(), AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
    fn backend(&self) -> &'static str;
}
