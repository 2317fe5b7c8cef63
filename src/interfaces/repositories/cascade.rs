use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::cascade::{CascadeRoot, DeletionSet, OrderItemRef, ProductRef},
    errors::AppError,
    repositories::sqlx_repo::SqlxCascadeRepo,
};

/// Explicit replacement for ORM cascades: compute what hangs off a catalog
/// row, then remove all of it in one transaction.
#[async_trait]
pub trait CascadeRepository: Send + Sync {
    /// `None` when the root row does not exist.
    async fn deletion_set(&self, root: CascadeRoot) -> Result<Option<DeletionSet>, AppError>;
    /// Returns the stored image keys of the deleted rows.
    async fn delete(&self, set: &DeletionSet) -> Result<Vec<String>, AppError>;
}

impl SqlxCascadeRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCascadeRepo { pool }
    }
}

fn root_parts(root: CascadeRoot) -> (&'static str, &'static str, i64) {
    match root {
        CascadeRoot::Category(id) => ("categories", "category_id", id),
        CascadeRoot::Artist(id) => ("artists", "artist_id", id),
    }
}

#[async_trait]
impl CascadeRepository for SqlxCascadeRepo {
    async fn deletion_set(&self, root: CascadeRoot) -> Result<Option<DeletionSet>, AppError> {
        let (table, fk, id) = root_parts(root);

        let exists: bool = sqlx::query_scalar(&format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if !exists {
            return Ok(None);
        }

        let products = sqlx::query_as::<_, ProductRef>(&format!("SELECT id FROM products WHERE {fk} = $1"))
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        let product_ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let order_items = sqlx::query_as::<_, OrderItemRef>(
            "SELECT id, product_id FROM order_items WHERE product_id = ANY($1)"
        )
        .bind(&product_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(DeletionSet::new(root, &products, &order_items)))
    }

    async fn delete(&self, set: &DeletionSet) -> Result<Vec<String>, AppError> {
        let (table, _, id) = root_parts(set.root);
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_items WHERE id = ANY($1)")
            .bind(&set.order_item_ids)
            .execute(&mut *tx)
            .await?;

        let mut images: Vec<String> = sqlx::query_scalar("DELETE FROM products WHERE id = ANY($1) RETURNING image")
            .bind(&set.product_ids)
            .fetch_all(&mut *tx)
            .await?;

        let image_column = match set.root {
            CascadeRoot::Category(_) => "image",
            CascadeRoot::Artist(_) => "profile_picture",
        };
        let root_image: Option<Option<String>> = sqlx::query_scalar(&format!(
            "DELETE FROM {table} WHERE id = $1 RETURNING {image_column}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        match root_image {
            None => return Err(AppError::NotFound("Record was already deleted".into())),
            Some(image) => images.extend(image),
        }

        tx.commit().await?;
        Ok(images)
    }
}
