mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases, password};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, session, storage};

use auth::jwt::JwtService;
use repositories::sqlx_repo::{
    SqlxArtistRepo, SqlxCascadeRepo, SqlxCategoryRepo, SqlxOrderRepo, SqlxProductRepo,
    SqlxSubmissionRepo, SqlxUserRepo,
};
use session::SessionCartStore;
use shared_repos::SharedRepositories;
use storage::local::LocalMediaStore;
use use_cases::{
    admin::CatalogAdminHandler, artists::ArtistHandler, auth::AuthHandler, cart::CartHandler,
    catalog::CatalogHandler, chatbot::ChatHandler, orders::OrderHandler,
    submissions::SubmissionHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;
pub type AppCatalogHandler =
    CatalogHandler<SqlxCategoryRepo, SqlxProductRepo, SqlxArtistRepo, SqlxSubmissionRepo>;
pub type AppArtistHandler = ArtistHandler<SqlxArtistRepo, SqlxProductRepo, SqlxCategoryRepo, LocalMediaStore>;
pub type AppCartHandler = CartHandler<SqlxProductRepo, SessionCartStore>;
pub type AppOrderHandler = OrderHandler<SqlxProductRepo, SqlxOrderRepo, SessionCartStore>;
pub type AppSubmissionHandler = SubmissionHandler<SqlxSubmissionRepo, LocalMediaStore>;
pub type AppChatHandler = ChatHandler<SqlxProductRepo, SqlxArtistRepo, SqlxCategoryRepo>;
pub type AppCatalogAdminHandler =
    CatalogAdminHandler<SqlxCategoryRepo, SqlxCascadeRepo, LocalMediaStore>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub catalog_handler: AppCatalogHandler,
    pub artist_handler: AppArtistHandler,
    pub cart_handler: AppCartHandler,
    pub order_handler: AppOrderHandler,
    pub submission_handler: AppSubmissionHandler,
    pub chat_handler: AppChatHandler,
    pub admin_handler: AppCatalogAdminHandler,
    pub cart_store: SessionCartStore,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let repos = SharedRepositories::new(pool);
        let jwt_service = JwtService::new(config);
        let media = LocalMediaStore::new(config.media_root.clone());

        let cart_store = config
            .redis_url
            .as_deref()
            .and_then(|url| {
                SessionCartStore::redis(url, config.cart_ttl_secs)
                    .map_err(|e| tracing::error!("Redis pool creation error: {}", e))
                    .ok()
            })
            .unwrap_or_else(|| {
                tracing::warn!("Redis not configured, carts are kept in process memory");
                SessionCartStore::memory()
            });

        AppState {
            auth_handler: AuthHandler::new(repos.user_repo.clone(), jwt_service),
            catalog_handler: CatalogHandler::new(
                repos.category_repo.clone(),
                repos.product_repo.clone(),
                repos.artist_repo.clone(),
                repos.submission_repo.clone(),
            ),
            artist_handler: ArtistHandler::new(
                repos.artist_repo.clone(),
                repos.product_repo.clone(),
                repos.category_repo.clone(),
                media.clone(),
            ),
            cart_handler: CartHandler::new(
                repos.product_repo.clone(),
                cart_store.clone(),
                config.shipping_cost,
            ),
            order_handler: OrderHandler::new(
                repos.product_repo.clone(),
                repos.order_repo.clone(),
                cart_store.clone(),
                config.shipping_cost,
            ),
            submission_handler: SubmissionHandler::new(
                repos.submission_repo.clone(),
                media.clone(),
                config.auto_approve_submissions,
            ),
            chat_handler: ChatHandler::new(
                repos.product_repo.clone(),
                repos.artist_repo.clone(),
                repos.category_repo.clone(),
            ),
            admin_handler: CatalogAdminHandler::new(
                repos.category_repo,
                repos.cascade_repo,
                media,
            ),
            cart_store,
        }
    }
}
