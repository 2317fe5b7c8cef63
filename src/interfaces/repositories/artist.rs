use std::borrow::Cow;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::artist::{Artist, ArtistChanges, ArtistInsert, ArtistSummary},
    errors::AppError,
    repositories::sqlx_repo::SqlxArtistRepo,
};

const ARTIST_COLUMNS: &str =
    "id, user_id, name, profession, bio, profile_picture, is_featured, created_at";

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, AppError>;
    async fn get_artist_by_user(&self, user_id: &Uuid) -> Result<Option<Artist>, AppError>;
    async fn count_artists(&self) -> Result<i64, AppError>;
    async fn list_artists(&self, offset: i64, limit: i64) -> Result<Vec<Artist>, AppError>;
    async fn featured_artists(&self, limit: i64) -> Result<Vec<Artist>, AppError>;
    async fn artist_summaries(&self, limit: i64) -> Result<Vec<ArtistSummary>, AppError>;
    async fn create_artist(&self, artist: &ArtistInsert) -> Result<Artist, AppError>;
    async fn update_artist(&self, id: i64, changes: &ArtistChanges) -> Result<Artist, AppError>;
}

impl SqlxArtistRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxArtistRepo { pool }
    }
}

#[async_trait]
impl ArtistRepository for SqlxArtistRepo {
    async fn get_artist(&self, id: i64) -> Result<Option<Artist>, AppError> {
        let artist = sqlx::query_as::<_, Artist>(
            &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(artist)
    }

    async fn get_artist_by_user(&self, user_id: &Uuid) -> Result<Option<Artist>, AppError> {
        let artist = sqlx::query_as::<_, Artist>(
            &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE user_id = $1")
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(artist)
    }

    async fn count_artists(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list_artists(&self, offset: i64, limit: i64) -> Result<Vec<Artist>, AppError> {
        let artists = sqlx::query_as::<_, Artist>(
            &format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id LIMIT $1 OFFSET $2")
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(artists)
    }

    async fn featured_artists(&self, limit: i64) -> Result<Vec<Artist>, AppError> {
        let artists = sqlx::query_as::<_, Artist>(
            &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE is_featured = TRUE ORDER BY id LIMIT $1")
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(artists)
    }

    async fn artist_summaries(&self, limit: i64) -> Result<Vec<ArtistSummary>, AppError> {
        let summaries = sqlx::query_as::<_, ArtistSummary>(
            r#"
            SELECT a.id, a.name, a.profession, a.profile_picture,
                   COUNT(p.id) AS paintings_count
            FROM artists a
            LEFT JOIN products p ON p.artist_id = a.id
            GROUP BY a.id
            ORDER BY a.id
            LIMIT $1
            "#
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn create_artist(&self, artist: &ArtistInsert) -> Result<Artist, AppError> {
        let created = sqlx::query_as::<_, Artist>(
            &format!(
                "INSERT INTO artists (user_id, name, profession, bio, profile_picture)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {ARTIST_COLUMNS}"
            )
        )
        .bind(artist.user_id)
        .bind(&artist.name)
        .bind(&artist.profession)
        .bind(&artist.bio)
        .bind(&artist.profile_picture)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("You already have an artist profile".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(created)
    }

    async fn update_artist(&self, id: i64, changes: &ArtistChanges) -> Result<Artist, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE artists SET ");
        let mut fields = builder.separated(", ");

        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(profession) = &changes.profession {
            fields.push("profession = ").push_bind_unseparated(profession.clone());
        }
        if let Some(bio) = &changes.bio {
            fields.push("bio = ").push_bind_unseparated(bio.clone());
        }
        if let Some(picture) = &changes.profile_picture {
            fields.push("profile_picture = ").push_bind_unseparated(picture.clone());
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING ").push(ARTIST_COLUMNS);

        builder
            .build_query_as::<Artist>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Artist not found".into()))
    }
}
