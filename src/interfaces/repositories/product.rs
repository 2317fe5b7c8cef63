use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    entities::product::{PriceStats, Product, ProductCard, ProductInsert, SortKey, UpdateProductRequest},
    errors::AppError,
    repositories::sqlx_repo::{like_pattern, SqlxProductRepo},
};

const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.description, p.price, p.image, p.stock, p.category_id, p.artist_id, p.is_featured, p.created_at";

const CARD_FROM: &str = " FROM products p
    JOIN artists a ON a.id = p.artist_id
    JOIN categories c ON c.id = p.category_id";

fn card_select() -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder
        .push(PRODUCT_COLUMNS)
        .push(", a.name AS artist_name, c.name AS category_name")
        .push(CARD_FROM);
    builder
}

/// Case-insensitive substring match over the product, artist and category
/// names and the description. An empty query matches everything.
fn push_search_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &str) {
    let pattern = like_pattern(query);
    builder.push(" WHERE (p.name ILIKE ").push_bind(pattern.clone());
    builder.push(" OR p.description ILIKE ").push_bind(pattern.clone());
    builder.push(" OR a.name ILIKE ").push_bind(pattern.clone());
    builder.push(" OR c.name ILIKE ").push_bind(pattern);
    builder.push(")");
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
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

impl SqlxProductRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProductRepo { pool }
    }
}

#[async_trait]
impl ProductRepository for SqlxProductRepo {
    async fn get_product(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn get_product_card(&self, id: i64) -> Result<Option<ProductCard>, AppError> {
        let mut builder = card_select();
        builder.push(" WHERE p.id = ").push_bind(id);

        let card = builder
            .build_query_as::<ProductCard>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(card)
    }

    async fn get_products_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let products = sqlx::query_as::<_, Product>(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ANY($1) ORDER BY p.id")
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn featured_products(&self, limit: i64) -> Result<Vec<ProductCard>, AppError> {
        let mut builder = card_select();
        builder.push(" WHERE p.is_featured = TRUE ORDER BY p.id LIMIT ").push_bind(limit);

        let cards = builder.build_query_as::<ProductCard>().fetch_all(&self.pool).await?;
        Ok(cards)
    }

    async fn recent_products(&self, limit: i64) -> Result<Vec<ProductCard>, AppError> {
        let mut builder = card_select();
        builder
            .push(" ORDER BY ")
            .push(SortKey::Newest.order_by())
            .push(" LIMIT ")
            .push_bind(limit);

        let cards = builder.build_query_as::<ProductCard>().fetch_all(&self.pool).await?;
        Ok(cards)
    }

    async fn count_by_category(&self, category_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn products_by_category(
        &self,
        category_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductCard>, AppError> {
        let mut builder = card_select();
        builder.push(" WHERE p.category_id = ").push_bind(category_id);
        builder.push(" ORDER BY p.id LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let cards = builder.build_query_as::<ProductCard>().fetch_all(&self.pool).await?;
        Ok(cards)
    }

    async fn products_by_artist(&self, artist_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.artist_id = $1 ORDER BY p.created_at DESC, p.id DESC")
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn count_search(&self, query: &str) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*)");
        builder.push(CARD_FROM);
        push_search_filter(&mut builder, query);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn search_products(
        &self,
        query: &str,
        sort: SortKey,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductCard>, AppError> {
        let mut builder = card_select();
        push_search_filter(&mut builder, query);
        builder.push(" ORDER BY ").push(sort.order_by());
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let cards = builder.build_query_as::<ProductCard>().fetch_all(&self.pool).await?;
        Ok(cards)
    }

    async fn price_stats(&self) -> Result<PriceStats, AppError> {
        let stats = sqlx::query_as::<_, PriceStats>(
            r#"
            SELECT MIN(price) AS min_price,
                   MAX(price) AS max_price,
                   ROUND(AVG(price), 2) AS avg_price
            FROM products
            "#
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn create_product(&self, product: &ProductInsert) -> Result<Product, AppError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, image, stock, category_id, artist_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, image, stock, category_id, artist_id, is_featured, created_at
            "#
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.stock)
        .bind(product.category_id)
        .bind(product.artist_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
                AppError::InvalidInput("Unknown category".into())
            }
            _ => AppError::from(e),
        })?;

        Ok(created)
    }

    async fn update_product(&self, id: i64, changes: &UpdateProductRequest) -> Result<Product, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE products SET ");
        let mut fields = builder.separated(", ");

        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name.trim().to_string());
        }
        if let Some(description) = &changes.description {
            fields.push("description = ").push_bind_unseparated(description.clone());
        }
        if let Some(price) = changes.price {
            fields.push("price = ").push_bind_unseparated(price);
        }
        if let Some(stock) = changes.stock {
            fields.push("stock = ").push_bind_unseparated(stock);
        }
        if let Some(category_id) = changes.category_id {
            fields.push("category_id = ").push_bind_unseparated(category_id);
        }
        if let Some(is_featured) = changes.is_featured {
            fields.push("is_featured = ").push_bind_unseparated(is_featured);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(
            " RETURNING id, name, description, price, image, stock, category_id, artist_id, is_featured, created_at"
        );

        builder
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
                    AppError::InvalidInput("Unknown category".into())
                }
                _ => AppError::from(e),
            })?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }
}
