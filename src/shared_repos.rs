use crate::repositories::sqlx_repo::{
    SqlxArtistRepo, SqlxCascadeRepo, SqlxCategoryRepo, SqlxOrderRepo, SqlxProductRepo,
    SqlxSubmissionRepo, SqlxUserRepo,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: SqlxUserRepo,
    pub category_repo: SqlxCategoryRepo,
    pub product_repo: SqlxProductRepo,
    pub artist_repo: SqlxArtistRepo,
    pub order_repo: SqlxOrderRepo,
    pub submission_repo: SqlxSubmissionRepo,
    pub cascade_repo: SqlxCascadeRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: SqlxUserRepo::new(pool.clone()),
            category_repo: SqlxCategoryRepo::new(pool.clone()),
            product_repo: SqlxProductRepo::new(pool.clone()),
            artist_repo: SqlxArtistRepo::new(pool.clone()),
            order_repo: SqlxOrderRepo::new(pool.clone()),
            submission_repo: SqlxSubmissionRepo::new(pool.clone()),
            cascade_repo: SqlxCascadeRepo::new(pool),
        }
    }
}
