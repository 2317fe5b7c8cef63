use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::category::{Category, CategoryInsert, CategoryStats},
    errors::AppError,
    repositories::sqlx_repo::SqlxCategoryRepo,
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self, limit: Option<i64>) -> Result<Vec<Category>, AppError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError>;
    async fn create_category(&self, category: &CategoryInsert) -> Result<Category, AppError>;
    async fn category_stats(&self) -> Result<Vec<CategoryStats>, AppError>;
}

impl SqlxCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCategoryRepo { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepo {
    async fn list_categories(&self, limit: Option<i64>) -> Result<Vec<Category>, AppError> {
        // LIMIT NULL means no limit in Postgres
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, image FROM categories ORDER BY id LIMIT $1"
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, image FROM categories WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create_category(&self, category: &CategoryInsert) -> Result<Category, AppError> {
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, image)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, image
            "#
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn category_stats(&self) -> Result<Vec<CategoryStats>, AppError> {
        let stats = sqlx::query_as::<_, CategoryStats>(
            r#"
            SELECT c.id,
                   c.name,
                   COUNT(p.id) AS product_count,
                   COUNT(DISTINCT p.artist_id) AS artist_count
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY c.id
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }
}
