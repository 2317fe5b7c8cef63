use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::PER_PAGE;
use crate::entities::{
    artist::{Artist, ArtistChanges, ArtistDraft, ArtistInsert, ArtistPatch},
    forms::INVALID_CHOICE,
    pagination::{Page, PageWindow},
    product::{PaintingDraft, Product, ProductInsert, UpdateProductRequest},
    token::Claims,
};
use crate::errors::{AppError, FieldError};
use crate::repositories::{
    artist::ArtistRepository,
    category::CategoryRepository,
    media::{MediaPrefix, MediaStore},
    product::ProductRepository,
};

#[derive(Debug, Serialize)]
pub struct ArtistProfile {
    pub artist: Artist,
    pub products: Vec<Product>,
}

pub struct ArtistHandler<A, P, C, M>
where
    A: ArtistRepository,
    P: ProductRepository,
    C: CategoryRepository,
    M: MediaStore,
{
    pub artist_repo: A,
    pub product_repo: P,
    pub category_repo: C,
    pub media: M,
}

impl<A, P, C, M> ArtistHandler<A, P, C, M>
where
    A: ArtistRepository,
    P: ProductRepository,
    C: CategoryRepository,
    M: MediaStore,
{
    pub fn new(artist_repo: A, product_repo: P, category_repo: C, media: M) -> Self {
        ArtistHandler { artist_repo, product_repo, category_repo, media }
    }

    pub async fn list(&self, page: Option<&str>) -> Result<Page<Artist>, AppError> {
        let total = self.artist_repo.count_artists().await?;
        let window = PageWindow::resolve(page, total, PER_PAGE);
        let artists = self.artist_repo.list_artists(window.offset(), window.limit()).await?;
        Ok(Page::new(artists, window))
    }

    pub async fn profile(&self, artist_id: i64) -> Result<ArtistProfile, AppError> {
        let artist = self.artist(artist_id).await?;
        let products = self.product_repo.products_by_artist(artist.id).await?;
        Ok(ArtistProfile { artist, products })
    }

    /// One profile per user.
    pub async fn create(&self, user_id: &Uuid, draft: ArtistDraft) -> Result<Artist, AppError> {
        if self.artist_repo.get_artist_by_user(user_id).await?.is_some() {
            return Err(AppError::Conflict("You already have an artist profile".into()));
        }

        let profile_picture = match &draft.profile_picture {
            Some(upload) => Some(self.media.save(MediaPrefix::Artists, upload).await?),
            None => None,
        };

        let insert = ArtistInsert {
            user_id: *user_id,
            name: draft.name,
            profession: draft.profession,
            bio: draft.bio,
            profile_picture: profile_picture.clone(),
        };

        match self.artist_repo.create_artist(&insert).await {
            Ok(artist) => {
                tracing::info!(artist_id = artist.id, %user_id, "Artist profile created");
                Ok(artist)
            }
            Err(e) => {
                self.discard(profile_picture.as_deref()).await;
                Err(e)
            }
        }
    }

    pub async fn update(&self, user_id: &Uuid, artist_id: i64, patch: ArtistPatch) -> Result<Artist, AppError> {
        let artist = self.owned_artist(user_id, artist_id).await?;

        let new_picture = match &patch.profile_picture {
            Some(upload) => Some(self.media.save(MediaPrefix::Artists, upload).await?),
            None => None,
        };
        let changes = ArtistChanges {
            name: patch.name,
            profession: patch.profession,
            bio: patch.bio,
            profile_picture: new_picture.clone(),
        };
        if changes.is_empty() {
            return Ok(artist);
        }

        match self.artist_repo.update_artist(artist.id, &changes).await {
            Ok(updated) => {
                if new_picture.is_some() {
                    self.discard(artist.profile_picture.as_deref()).await;
                }
                Ok(updated)
            }
            Err(e) => {
                self.discard(new_picture.as_deref()).await;
                Err(e)
            }
        }
    }

    pub async fn add_painting(&self, user_id: &Uuid, artist_id: i64, draft: PaintingDraft) -> Result<Product, AppError> {
        let artist = self.owned_artist(user_id, artist_id).await?;
        self.ensure_category(draft.category_id).await?;
        let image = self.media.save(MediaPrefix::Products, &draft.image).await?;

        let insert = ProductInsert {
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: image.clone(),
            stock: draft.stock,
            category_id: draft.category_id,
            artist_id: artist.id,
        };

        match self.product_repo.create_product(&insert).await {
            Ok(product) => {
                tracing::info!(product_id = product.id, artist_id = artist.id, "Painting added");
                Ok(product)
            }
            Err(e) => {
                self.discard(Some(&image)).await;
                Err(e)
            }
        }
    }

    /// The owning artist or an admin may edit a product.
    pub async fn update_product(
        &self,
        claims: &Claims,
        product_id: i64,
        request: UpdateProductRequest,
    ) -> Result<Product, AppError> {
        request.validate()?;

        let product = self
            .product_repo
            .get_product(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

        if !claims.admin {
            let user_id = claims.user_id()?;
            let artist = self.artist(product.artist_id).await?;
            if !artist.is_owned_by(&user_id) {
                return Err(AppError::ForbiddenAccess);
            }
        }

        if request.is_empty() {
            return Ok(product);
        }
        if let Some(category_id) = request.category_id {
            self.ensure_category(category_id).await?;
        }
        self.product_repo.update_product(product.id, &request).await
    }

    async fn artist(&self, artist_id: i64) -> Result<Artist, AppError> {
        self.artist_repo
            .get_artist(artist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Artist not found".into()))
    }

    /// A category id that parses but names no row is a field error.
    async fn ensure_category(&self, category_id: i64) -> Result<(), AppError> {
        match self.category_repo.get_category(category_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::ValidationError(vec![FieldError::new("category_id", INVALID_CHOICE)])),
        }
    }

    async fn owned_artist(&self, user_id: &Uuid, artist_id: i64) -> Result<Artist, AppError> {
        let artist = self.artist(artist_id).await?;
        if !artist.is_owned_by(user_id) {
            tracing::warn!(artist_id, %user_id, "Rejected change to another user's artist profile");
            return Err(AppError::ForbiddenAccess);
        }
        Ok(artist)
    }

    async fn discard(&self, key: Option<&str>) {
        if let Some(key) = key {
            if let Err(e) = self.media.remove(key).await {
                tracing::warn!(%key, "Failed to remove media file: {}", e);
            }
        }
    }
}
