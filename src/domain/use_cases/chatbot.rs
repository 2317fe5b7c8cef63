use crate::constants::CHAT_RESULT_LIMIT;
use crate::entities::chat::{price_range_message, ChatIntent, ChatItem, ChatResponse};
use crate::errors::AppError;
use crate::repositories::{
    artist::ArtistRepository,
    category::CategoryRepository,
    product::ProductRepository,
};

const EMPTY_CATALOG_MESSAGE: &str = "We don't have any paintings listed yet.";

pub struct ChatHandler<P, A, C>
where
    P: ProductRepository,
    A: ArtistRepository,
    C: CategoryRepository,
{
    pub product_repo: P,
    pub artist_repo: A,
    pub category_repo: C,
}

impl<P, A, C> ChatHandler<P, A, C>
where
    P: ProductRepository,
    A: ArtistRepository,
    C: CategoryRepository,
{
    pub fn new(product_repo: P, artist_repo: A, category_repo: C) -> Self {
        ChatHandler { product_repo, artist_repo, category_repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn respond(&self, query: &str) -> Result<ChatResponse, AppError> {
        match ChatIntent::classify(query) {
            ChatIntent::Paintings => self.paintings().await,
            ChatIntent::Artists => self.artists().await,
            ChatIntent::Categories => self.categories().await,
            ChatIntent::Prices => self.prices().await,
            ChatIntent::Help => Ok(ChatResponse::help()),
        }
    }

    async fn paintings(&self) -> Result<ChatResponse, AppError> {
        let items = self
            .product_repo
            .recent_products(CHAT_RESULT_LIMIT)
            .await?
            .into_iter()
            .map(|card| ChatItem::Painting {
                url: format!("/api/v1/products/{}", card.product.id),
                name: card.product.name,
                artist: card.artist_name,
                price: card.product.price,
                image: Some(card.product.image).filter(|i| !i.is_empty()),
                category: card.category_name,
                stock: card.product.stock,
            })
            .collect();

        Ok(ChatResponse::success("Here are some of our recent paintings:", items))
    }

    async fn artists(&self) -> Result<ChatResponse, AppError> {
        let items = self
            .artist_repo
            .artist_summaries(CHAT_RESULT_LIMIT)
            .await?
            .into_iter()
            .map(|artist| ChatItem::Artist {
                url: format!("/api/v1/artists/{}", artist.id),
                name: artist.name,
                profession: artist.profession,
                image: artist.profile_picture,
                paintings_count: artist.paintings_count,
            })
            .collect();

        Ok(ChatResponse::success("Here are some of our talented artists:", items))
    }

    async fn categories(&self) -> Result<ChatResponse, AppError> {
        let items = self
            .category_repo
            .category_stats()
            .await?
            .into_iter()
            .map(|stats| ChatItem::Category {
                url: format!("/api/v1/categories/{}", stats.id),
                name: stats.name,
                count: stats.product_count,
                artists_count: stats.artist_count,
            })
            .collect();

        Ok(ChatResponse::success("We have paintings in these categories:", items))
    }

    async fn prices(&self) -> Result<ChatResponse, AppError> {
        let stats = self.product_repo.price_stats().await?;

        match (stats.min_price, stats.max_price, stats.avg_price) {
            (Some(min_price), Some(max_price), Some(avg_price)) => Ok(ChatResponse::success(
                price_range_message(min_price, max_price),
                vec![ChatItem::PriceInfo {
                    min_price,
                    max_price,
                    avg_price: avg_price.round_dp(2),
                }],
            )),
            _ => Ok(ChatResponse::success(EMPTY_CATALOG_MESSAGE, Vec::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::artist::ArtistSummary;
    use crate::entities::cart::tests::product;
    use crate::entities::category::CategoryStats;
    use crate::entities::chat::{ChatStatus, HELP_MESSAGE};
    use crate::entities::product::{PriceStats, ProductCard};
    use crate::repositories::mocks::{MockArtistRepo, MockCategoryRepo, MockProductRepo};
    use rust_decimal_macros::dec;

    fn handler(products: MockProductRepo) -> ChatHandler<MockProductRepo, MockArtistRepo, MockCategoryRepo> {
        ChatHandler::new(products, MockArtistRepo::new(), MockCategoryRepo::new())
    }

    #[tokio::test]
    async fn painting_query_lists_recent_products() {
        let mut products = MockProductRepo::new();
        products
            .expect_recent_products()
            .withf(|limit| *limit == 5)
            .returning(|_| {
                Ok(vec![ProductCard {
                    product: product(7, dec!(1200), 2),
                    artist_name: "Mira".into(),
                    category_name: "Abstract".into(),
                }])
            });

        let response = handler(products).respond("show me some artworks").await.unwrap();

        assert_eq!(response.status, ChatStatus::Success);
        assert_eq!(response.message, "Here are some of our recent paintings:");
        match &response.data[0] {
            ChatItem::Painting { url, artist, stock, .. } => {
                assert_eq!(url, "/api/v1/products/7");
                assert_eq!(artist, "Mira");
                assert_eq!(*stock, 2);
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[tokio::test]
    async fn artist_question_lists_at_most_five_artists() {
        let mut artists = MockArtistRepo::new();
        artists
            .expect_artist_summaries()
            .withf(|limit| *limit == 5)
            .returning(|limit| {
                Ok((1..=limit)
                    .map(|id| ArtistSummary {
                        id,
                        name: format!("Artist {id}"),
                        profession: "Painter".into(),
                        profile_picture: None,
                        paintings_count: id,
                    })
                    .collect())
            });

        let handler = ChatHandler::new(MockProductRepo::new(), artists, MockCategoryRepo::new());
        let response = handler.respond("What artists do you have?").await.unwrap();

        assert_eq!(response.message, "Here are some of our talented artists:");
        assert!(!response.data.is_empty() && response.data.len() <= 5);

        let body = serde_json::to_value(&response).unwrap();
        for (index, item) in body["data"].as_array().unwrap().iter().enumerate() {
            let id = index + 1;
            assert_eq!(item["type"], "artist");
            assert_eq!(item["name"], format!("Artist {id}"));
            assert_eq!(item["profession"], "Painter");
            assert_eq!(item["url"], format!("/api/v1/artists/{id}"));
        }
    }

    #[tokio::test]
    async fn category_query_reports_counts() {
        let mut categories = MockCategoryRepo::new();
        categories.expect_category_stats().returning(|| {
            Ok(vec![CategoryStats { id: 3, name: "Oil".into(), product_count: 4, artist_count: 2 }])
        });

        let handler = ChatHandler::new(MockProductRepo::new(), MockArtistRepo::new(), categories);
        let response = handler.respond("What TYPE of art?").await.unwrap();

        assert_eq!(
            response.data,
            vec![ChatItem::Category {
                name: "Oil".into(),
                count: 4,
                url: "/api/v1/categories/3".into(),
                artists_count: 2,
            }]
        );
    }

    #[tokio::test]
    async fn price_query_rounds_average() {
        let mut products = MockProductRepo::new();
        products.expect_price_stats().returning(|| {
            Ok(PriceStats {
                min_price: Some(dec!(500.00)),
                max_price: Some(dec!(2500.00)),
                avg_price: Some(dec!(1166.666666)),
            })
        });

        let response = handler(products).respond("how much does it cost").await.unwrap();

        assert_eq!(response.message, "Our paintings range from ₹500.00 to ₹2500.00.");
        assert_eq!(
            response.data,
            vec![ChatItem::PriceInfo {
                min_price: dec!(500.00),
                max_price: dec!(2500.00),
                avg_price: dec!(1166.67),
            }]
        );
    }

    #[tokio::test]
    async fn price_query_on_empty_catalog() {
        let mut products = MockProductRepo::new();
        products.expect_price_stats().returning(|| {
            Ok(PriceStats { min_price: None, max_price: None, avg_price: None })
        });

        let response = handler(products).respond("price?").await.unwrap();

        assert_eq!(response.message, EMPTY_CATALOG_MESSAGE);
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn unmatched_query_gets_help_without_touching_the_store() {
        let response = handler(MockProductRepo::new()).respond("hello there").await.unwrap();

        assert_eq!(response.message, HELP_MESSAGE);
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let mut products = MockProductRepo::new();
        products
            .expect_recent_products()
            .returning(|_| Err(AppError::InternalError("db down".into())));

        let result = handler(products).respond("paintings").await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
