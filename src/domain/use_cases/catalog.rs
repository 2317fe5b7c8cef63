use serde::Serialize;

use crate::constants::{
    HOME_CATEGORY_LIMIT, HOME_FEATURED_ARTIST_LIMIT, HOME_FEATURED_PRODUCT_LIMIT,
    HOME_SUBMISSION_LIMIT, PER_PAGE,
};
use crate::entities::{
    artist::Artist,
    category::Category,
    pagination::{Page, PageWindow},
    product::{ProductCard, SearchParams, SortKey},
    submission::SubmissionView,
};
use crate::errors::AppError;
use crate::repositories::{
    artist::ArtistRepository, category::CategoryRepository, product::ProductRepository,
    submission::SubmissionRepository,
};

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub categories: Vec<Category>,
    pub featured_products: Vec<ProductCard>,
    pub featured_artists: Vec<Artist>,
    pub recent_submissions: Vec<SubmissionView>,
}

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub products: Page<ProductCard>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub sort: SortKey,
    pub results: Vec<ProductCard>,
    pub results_count: i64,
    pub page: u32,
    pub num_pages: u32,
}

/// Read side of the storefront: home, categories, product detail, search.
pub struct CatalogHandler<C, P, A, S>
where
    C: CategoryRepository,
    P: ProductRepository,
    A: ArtistRepository,
    S: SubmissionRepository,
{
    pub category_repo: C,
    pub product_repo: P,
    pub artist_repo: A,
    pub submission_repo: S,
}

impl<C, P, A, S> CatalogHandler<C, P, A, S>
where
    C: CategoryRepository,
    P: ProductRepository,
    A: ArtistRepository,
    S: SubmissionRepository,
{
    pub fn new(category_repo: C, product_repo: P, artist_repo: A, submission_repo: S) -> Self {
        CatalogHandler { category_repo, product_repo, artist_repo, submission_repo }
    }

    pub async fn home(&self) -> Result<HomePage, AppError> {
        let (categories, featured_products, featured_artists, submissions) = futures_util::try_join!(
            self.category_repo.list_categories(Some(HOME_CATEGORY_LIMIT)),
            self.product_repo.featured_products(HOME_FEATURED_PRODUCT_LIMIT),
            self.artist_repo.featured_artists(HOME_FEATURED_ARTIST_LIMIT),
            self.submission_repo.approved_submissions(Some(HOME_SUBMISSION_LIMIT)),
        )?;

        Ok(HomePage {
            categories,
            featured_products,
            featured_artists,
            recent_submissions: submissions.into_iter().map(SubmissionView::from).collect(),
        })
    }

    pub async fn categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.list_categories(None).await
    }

    pub async fn category_detail(&self, id: i64, page: Option<&str>) -> Result<CategoryPage, AppError> {
        let category = self
            .category_repo
            .get_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

        let total = self.product_repo.count_by_category(id).await?;
        let window = PageWindow::resolve(page, total, PER_PAGE);
        let products = self
            .product_repo
            .products_by_category(id, window.offset(), window.limit())
            .await?;

        Ok(CategoryPage { category, products: Page::new(products, window) })
    }

    pub async fn product_detail(&self, id: i64) -> Result<ProductCard, AppError> {
        self.product_repo
            .get_product_card(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    /// Substring search; an empty query lists the whole catalog in the
    /// requested order.
    pub async fn search(&self, params: SearchParams) -> Result<SearchResults, AppError> {
        let query = params.q.unwrap_or_default().trim().to_string();
        let sort = SortKey::parse(params.sort.as_deref());

        let results_count = self.product_repo.count_search(&query).await?;
        let window = PageWindow::resolve(params.page.as_deref(), results_count, PER_PAGE);
        let results = self
            .product_repo
            .search_products(&query, sort, window.offset(), window.limit())
            .await?;

        Ok(SearchResults {
            query,
            sort,
            results,
            results_count,
            page: window.page,
            num_pages: window.num_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::cart::tests::product;
    use crate::repositories::mocks::{MockArtistRepo, MockCategoryRepo, MockProductRepo, MockSubmissionRepo};
    use rust_decimal_macros::dec;

    fn card(id: i64) -> ProductCard {
        ProductCard {
            product: product(id, dec!(100), 1),
            artist_name: "Mira".into(),
            category_name: "Landscapes".into(),
        }
    }

    fn handler(products: MockProductRepo) -> CatalogHandler<MockCategoryRepo, MockProductRepo, MockArtistRepo, MockSubmissionRepo> {
        CatalogHandler::new(MockCategoryRepo::new(), products, MockArtistRepo::new(), MockSubmissionRepo::new())
    }

    #[tokio::test]
    async fn empty_query_pages_through_everything_with_sort() {
        let mut products = MockProductRepo::new();
        products.expect_count_search().withf(|q| q.is_empty()).returning(|_| Ok(30));
        products
            .expect_search_products()
            .withf(|q, sort, offset, limit| q.is_empty() && *sort == SortKey::PriceLow && *offset == 24 && *limit == 12)
            .returning(|_, _, _, _| Ok((25..=30).map(card).collect()));

        let results = handler(products)
            .search(SearchParams {
                q: Some("".into()),
                sort: Some("price_low".into()),
                page: Some("3".into()),
            })
            .await
            .unwrap();

        assert_eq!(results.results_count, 30);
        assert_eq!((results.page, results.num_pages), (3, 3));
        assert_eq!(results.results.len(), 6);
    }

    #[tokio::test]
    async fn bad_page_and_sort_fall_back() {
        let mut products = MockProductRepo::new();
        products.expect_count_search().returning(|_| Ok(5));
        products
            .expect_search_products()
            .withf(|q, sort, offset, _| q == "rose" && *sort == SortKey::Newest && *offset == 0)
            .returning(|_, _, _, _| Ok((1..=5).map(card).collect()));

        let results = handler(products)
            .search(SearchParams {
                q: Some("  rose ".into()),
                sort: Some("popular".into()),
                page: Some("two".into()),
            })
            .await
            .unwrap();

        assert_eq!(results.query, "rose");
        assert_eq!(results.page, 1);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let mut products = MockProductRepo::new();
        products.expect_get_product_card().returning(|_| Ok(None));

        let err = handler(products).product_detail(9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
