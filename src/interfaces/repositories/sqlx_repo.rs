use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCategoryRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxProductRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxArtistRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxOrderRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSubmissionRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCascadeRepo {
    pub pool: PgPool,
}

/// Escapes LIKE wildcards so user input only ever matches literally.
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
