use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    entities::{
        artist::{Artist, ArtistChanges, ArtistInsert, ArtistSummary},
        cart::Cart,
        cascade::{CascadeRoot, DeletionSet},
        category::{Category, CategoryInsert, CategoryStats},
        customization::{CustomizationInsert, CustomizedPainting},
        forms::ImageUpload,
        order::{Order, OrderInsert, OrderItemDetail, OrderItemInsert, OrderStatus},
        product::{PriceStats, Product, ProductCard, ProductInsert, SortKey, UpdateProductRequest},
        submission::{SubmissionInsert, SubmissionRow},
        user::{User, UserInsert},
    },
    errors::AppError,
};

use super::{
    artist::ArtistRepository,
    cart_store::CartStore,
    cascade::CascadeRepository,
    category::CategoryRepository,
    media::{MediaPrefix, MediaStore},
    order::OrderRepository,
    product::ProductRepository,
    submission::SubmissionRepository,
    user::UserRepository,
};

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
        async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
        async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    }
}

mock! {
    pub CategoryRepo {}

    #[async_trait]
    impl CategoryRepository for CategoryRepo {
        async fn list_categories(&self, limit: Option<i64>) -> Result<Vec<Category>, AppError>;
        async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError>;
        async fn create_category(&self, category: &CategoryInsert) -> Result<Category, AppError>;
        async fn category_stats(&self) -> Result<Vec<CategoryStats>, AppError>;
    }
}

mock! {
    pub ProductRepo {}

    #[async_trait]
    impl ProductRepository for ProductRepo {
        async fn get_product(&self, id: i64) -> Result<Option<Product>, AppError>;
        async fn get_product_card(&self, id: i64) -> Result<Option<ProductCard>, AppError>;
        async fn get_products_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, AppError>;
        async fn featured_products(&self, limit: i64) -> Result<Vec<ProductCard>, AppError>;
        async fn recent_products(&self, limit: i64) -> Result<Vec<ProductCard>, AppError>;
        async fn count_by_category(&self, category_id: i64) -> Result<i64, AppError>;
        async fn products_by_category(&self, category_id: i64, offset: i64, limit: i64) -> Result<Vec<ProductCard>, AppError>;
        async fn products_by_artist(&self, artist_id: i64) -> Result<Vec<Product>, AppError>;
        async fn count_search(&self, query: &str) -> Result<i64, AppError>;
        async fn search_products(&self, query: &str, sort: SortKey, offset: i64, limit: i64) -> Result<Vec<ProductCard>, AppError>;
        async fn price_stats(&self) -> Result<PriceStats, AppError>;
        async fn create_product(&self, product: &ProductInsert) -> Result<Product, AppError>;
        async fn update_product(&self, id: i64, changes: &UpdateProductRequest) -> Result<Product, AppError>;
    }
}

mock! {
    pub ArtistRepo {}

    #[async_trait]
    impl ArtistRepository for ArtistRepo {
        async fn get_artist(&self, id: i64) -> Result<Option<Artist>, AppError>;
        async fn get_artist_by_user(&self, user_id: &Uuid) -> Result<Option<Artist>, AppError>;
        async fn count_artists(&self) -> Result<i64, AppError>;
        async fn list_artists(&self, offset: i64, limit: i64) -> Result<Vec<Artist>, AppError>;
        async fn featured_artists(&self, limit: i64) -> Result<Vec<Artist>, AppError>;
        async fn artist_summaries(&self, limit: i64) -> Result<Vec<ArtistSummary>, AppError>;
        async fn create_artist(&self, artist: &ArtistInsert) -> Result<Artist, AppError>;
        async fn update_artist(&self, id: i64, changes: &ArtistChanges) -> Result<Artist, AppError>;
    }
}

mock! {
    pub OrderRepo {}

    #[async_trait]
    impl OrderRepository for OrderRepo {
        async fn create_order(&self, order: &OrderInsert, items: &[OrderItemInsert]) -> Result<Order, AppError>;
        async fn get_order_for_user(&self, id: i64, user_id: &Uuid) -> Result<Option<Order>, AppError>;
        async fn order_items(&self, order_id: i64) -> Result<Vec<OrderItemDetail>, AppError>;
        async fn orders_for_user(&self, user_id: &Uuid) -> Result<Vec<Order>, AppError>;
        async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError>;
    }
}

mock! {
    pub SubmissionRepo {}

    #[async_trait]
    impl SubmissionRepository for SubmissionRepo {
        async fn create_submission(&self, submission: &SubmissionInsert) -> Result<SubmissionRow, AppError>;
        async fn approved_submissions(&self, limit: Option<i64>) -> Result<Vec<SubmissionRow>, AppError>;
        async fn approve_submission(&self, id: i64) -> Result<SubmissionRow, AppError>;
        async fn create_customization(&self, request: &CustomizationInsert) -> Result<CustomizedPainting, AppError>;
        async fn get_customization_for_user(&self, id: i64, user_id: &Uuid) -> Result<Option<CustomizedPainting>, AppError>;
    }
}

mock! {
    pub CascadeRepo {}

    #[async_trait]
    impl CascadeRepository for CascadeRepo {
        async fn deletion_set(&self, root: CascadeRoot) -> Result<Option<DeletionSet>, AppError>;
        async fn delete(&self, set: &DeletionSet) -> Result<Vec<String>, AppError>;
    }
}

mock! {
    pub Media {}

    #[async_trait]
    impl MediaStore for Media {
        async fn save(&self, prefix: MediaPrefix, upload: &ImageUpload) -> Result<String, AppError>;
        async fn remove(&self, key: &str) -> Result<(), AppError>;
    }
}

mock! {
    pub Carts {}

    #[async_trait]
    impl CartStore for Carts {
        async fn load(&self, user_id: &Uuid) -> Result<Cart, AppError>;
        async fn save(&self, user_id: &Uuid, cart: &Cart) -> Result<(), AppError>;
        async fn clear(&self, user_id: &Uuid) -> Result<(), AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
        fn backend(&self) -> &'static str;
    }
}
