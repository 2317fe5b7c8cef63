use rust_decimal::Decimal;
use uuid::Uuid;

use crate::entities::cart::{Cart, CartActionResponse, CartLine, CartSummary};
use crate::entities::product::Product;
use crate::errors::{AppError, CartError};
use crate::repositories::{cart_store::CartStore, product::ProductRepository};

/// Resolves every cart entry against the catalog in one query.
pub async fn materialize<P>(products: &P, cart: &Cart) -> Result<Vec<CartLine>, AppError>
where
    P: ProductRepository + ?Sized,
{
    let ids = cart.product_ids()?;
    let found = products.get_products_by_ids(&ids).await?;
    Ok(cart.materialize(found)?)
}

pub struct CartHandler<P, S>
where
    P: ProductRepository,
    S: CartStore,
{
    pub product_repo: P,
    pub cart_store: S,
    pub shipping_cost: Decimal,
}

impl<P, S> CartHandler<P, S>
where
    P: ProductRepository,
    S: CartStore,
{
    pub fn new(product_repo: P, cart_store: S, shipping_cost: Decimal) -> Self {
        CartHandler { product_repo, cart_store, shipping_cost }
    }

    async fn product(&self, product_id: i64) -> Result<Product, AppError> {
        self.product_repo
            .get_product(product_id)
            .await?
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()).into())
    }

    pub async fn add(&self, user_id: &Uuid, product_id: i64) -> Result<CartActionResponse, AppError> {
        let product = self.product(product_id).await?;
        let cart = self.cart_store.load(user_id).await?;

        let next = cart.add(&product)?;
        self.cart_store.save(user_id, &next).await?;

        Ok(CartActionResponse::ok(format!("{} added to cart!", product.name)))
    }

    pub async fn update(
        &self,
        user_id: &Uuid,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartActionResponse, AppError> {
        let product = self.product(product_id).await?;
        let cart = self.cart_store.load(user_id).await?;

        let next = cart.update(&product, quantity)?;
        self.cart_store.save(user_id, &next).await?;

        Ok(CartActionResponse::ok(format!("Quantity updated for {}", product.name)))
    }

    /// Works for products deleted since they were added, so stale entries
    /// can always be cleared.
    pub async fn remove(&self, user_id: &Uuid, product_id: i64) -> Result<CartActionResponse, AppError> {
        let cart = self.cart_store.load(user_id).await?;
        let next = cart.remove(product_id)?;
        self.cart_store.save(user_id, &next).await?;

        let message = match self.product_repo.get_product(product_id).await {
            Ok(Some(product)) => format!("{} removed from cart", product.name),
            _ => "Item removed from cart".to_string(),
        };
        Ok(CartActionResponse::ok(message))
    }

    pub async fn view(&self, user_id: &Uuid) -> Result<CartSummary, AppError> {
        let cart = self.cart_store.load(user_id).await?;
        let lines = materialize(&self.product_repo, &cart).await?;
        Ok(CartSummary::new(lines, self.shipping_cost))
    }

    /// Same summary as [`Self::view`], but an empty cart cannot be checked out.
    pub async fn checkout(&self, user_id: &Uuid) -> Result<CartSummary, AppError> {
        let cart = self.cart_store.load(user_id).await?;
        if cart.is_empty() {
            return Err(CartError::EmptyCart.into());
        }
        let lines = materialize(&self.product_repo, &cart).await?;
        Ok(CartSummary::new(lines, self.shipping_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::cart::tests::product;
    use crate::repositories::mocks::MockProductRepo;
    use crate::session::InMemoryCartStore;
    use rust_decimal_macros::dec;

    fn handler(repo: MockProductRepo) -> CartHandler<MockProductRepo, InMemoryCartStore> {
        CartHandler::new(repo, InMemoryCartStore::new(), dec!(100))
    }

    #[tokio::test]
    async fn add_persists_the_new_cart() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_product()
            .returning(|id| Ok(Some(product(id, dec!(500), 3))));

        let handler = handler(repo);
        let user = Uuid::new_v4();
        let response = handler.add(&user, 5).await.unwrap();

        assert!(response.success);
        assert_eq!(response.message, "Painting 5 added to cart!");
        assert_eq!(handler.cart_store.load(&user).await.unwrap().quantity(5), Some(1));
    }

    #[tokio::test]
    async fn add_at_stock_limit_keeps_stored_cart() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_product()
            .returning(|id| Ok(Some(product(id, dec!(500), 1))));

        let handler = handler(repo);
        let user = Uuid::new_v4();
        handler.add(&user, 5).await.unwrap();

        let err = handler.add(&user, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Cart(CartError::StockLimitReached(1))));
        assert_eq!(handler.cart_store.load(&user).await.unwrap().quantity(5), Some(1));
    }

    #[tokio::test]
    async fn add_unknown_product_is_not_found() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_product().returning(|_| Ok(None));

        let err = handler(repo).add(&Uuid::new_v4(), 77).await.unwrap_err();
        assert!(matches!(err, AppError::Cart(CartError::ProductNotFound(id)) if id == "77"));
    }

    #[tokio::test]
    async fn remove_absent_item_fails() {
        let repo = MockProductRepo::new();
        let err = handler(repo).remove(&Uuid::new_v4(), 3).await.unwrap_err();
        assert!(matches!(err, AppError::Cart(CartError::NotInCart)));
    }

    #[tokio::test]
    async fn view_of_empty_cart_charges_nothing() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_products_by_ids()
            .withf(|ids| ids.is_empty())
            .returning(|_| Ok(vec![]));

        let summary = handler(repo).view(&Uuid::new_v4()).await.unwrap();
        assert_eq!(summary.total, Decimal::ZERO);
        assert!(summary.items.is_empty());
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_fails() {
        let repo = MockProductRepo::new();
        let err = handler(repo).checkout(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::Cart(CartError::EmptyCart)));
    }
}
