use crate::entities::{
    cascade::{CascadeRoot, DeletionSet},
    category::{Category, CategoryDraft, CategoryInsert},
};
use crate::errors::AppError;
use crate::repositories::{
    cascade::CascadeRepository,
    category::CategoryRepository,
    media::{MediaPrefix, MediaStore},
};

pub struct CatalogAdminHandler<C, X, M>
where
    C: CategoryRepository,
    X: CascadeRepository,
    M: MediaStore,
{
    pub category_repo: C,
    pub cascade_repo: X,
    pub media: M,
}

impl<C, X, M> CatalogAdminHandler<C, X, M>
where
    C: CategoryRepository,
    X: CascadeRepository,
    M: MediaStore,
{
    pub fn new(category_repo: C, cascade_repo: X, media: M) -> Self {
        CatalogAdminHandler { category_repo, cascade_repo, media }
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, AppError> {
        let image = self.media.save(MediaPrefix::CategoryImages, &draft.image).await?;

        let insert = CategoryInsert {
            name: draft.name,
            description: draft.description,
            image: image.clone(),
        };

        match self.category_repo.create_category(&insert).await {
            Ok(category) => {
                tracing::info!(category_id = category.id, "Category created");
                Ok(category)
            }
            Err(e) => {
                if let Err(remove_err) = self.media.remove(&image).await {
                    tracing::warn!(%image, "Failed to remove media file: {}", remove_err);
                }
                Err(e)
            }
        }
    }

    /// Removes the root, its products and the order items that reference
    /// them. Image files go after the commit; a failed unlink only logs.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, root: CascadeRoot) -> Result<DeletionSet, AppError> {
        let set = self
            .cascade_repo
            .deletion_set(root)
            .await?
            .ok_or_else(|| match root {
                CascadeRoot::Category(_) => AppError::NotFound("Category not found".into()),
                CascadeRoot::Artist(_) => AppError::NotFound("Artist not found".into()),
            })?;

        let images = self.cascade_repo.delete(&set).await?;
        if set.is_leaf_only() {
            tracing::info!(?root, "Deleted catalog row with no products");
        } else {
            tracing::info!(
                ?root,
                products = set.product_ids.len(),
                order_items = set.order_item_ids.len(),
                "Cascade delete committed"
            );
        }

        for key in images {
            if let Err(e) = self.media.remove(&key).await {
                tracing::warn!(%key, "Failed to remove media file: {}", e);
            }
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::cascade::{OrderItemRef, ProductRef};
    use crate::entities::forms::ImageUpload;
    use crate::repositories::mocks::{MockCascadeRepo, MockCategoryRepo, MockMedia};

    #[tokio::test]
    async fn unknown_root_is_not_found() {
        let mut cascade = MockCascadeRepo::new();
        cascade.expect_deletion_set().returning(|_| Ok(None));
        cascade.expect_delete().never();

        let handler = CatalogAdminHandler::new(MockCategoryRepo::new(), cascade, MockMedia::new());
        let result = handler.delete(CascadeRoot::Artist(9)).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Artist not found"));
    }

    #[tokio::test]
    async fn cascade_removes_images_after_commit() {
        let mut cascade = MockCascadeRepo::new();
        cascade.expect_deletion_set().returning(|root| {
            Ok(Some(DeletionSet::new(
                root,
                &[ProductRef { id: 2 }, ProductRef { id: 1 }],
                &[OrderItemRef { id: 10, product_id: 2 }],
            )))
        });
        cascade
            .expect_delete()
            .withf(|set| set.product_ids == vec![1, 2] && set.order_item_ids == vec![10])
            .times(1)
            .returning(|_| Ok(vec!["products/1.png".into(), "category_images/c.png".into()]));
        let mut media = MockMedia::new();
        media.expect_remove().times(2).returning(|key| {
            if key.starts_with("products/") {
                Err(AppError::InternalError("gone".into()))
            } else {
                Ok(())
            }
        });

        let handler = CatalogAdminHandler::new(MockCategoryRepo::new(), cascade, media);
        let set = handler.delete(CascadeRoot::Category(4)).await.unwrap();

        assert_eq!(set.root, CascadeRoot::Category(4));
        assert_eq!(set.product_ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn category_image_is_stored_under_its_prefix() {
        let mut media = MockMedia::new();
        media
            .expect_save()
            .withf(|prefix, _| *prefix == MediaPrefix::CategoryImages)
            .returning(|_, _| Ok("category_images/x.jpg".into()));
        let mut categories = MockCategoryRepo::new();
        categories.expect_create_category().returning(|c| {
            Ok(Category {
                id: 1,
                name: c.name.clone(),
                description: c.description.clone(),
                image: c.image.clone(),
            })
        });

        let handler = CatalogAdminHandler::new(categories, MockCascadeRepo::new(), media);
        let category = handler
            .create_category(CategoryDraft {
                name: "Abstract".into(),
                description: "Shapes".into(),
                image: ImageUpload::from_path("/tmp/x.jpg", Some("x.jpg"), Some("image/jpeg"), 4),
            })
            .await
            .unwrap();

        assert_eq!(category.image, "category_images/x.jpg");
    }
}
