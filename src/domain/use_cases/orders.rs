use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use super::cart::materialize;
use crate::entities::order::{
    Order, OrderConfirmation, OrderItemInsert, OrderStatus, OrderTotals, PlaceOrderForm, PlacedOrder,
};
use crate::errors::{AppError, CartError};
use crate::repositories::{cart_store::CartStore, order::OrderRepository, product::ProductRepository};

/// Turns a session cart into a persisted order.
pub struct OrderHandler<P, O, S>
where
    P: ProductRepository,
    O: OrderRepository,
    S: CartStore,
{
    pub product_repo: P,
    pub order_repo: O,
    pub cart_store: S,
    pub shipping_cost: Decimal,
}

impl<P, O, S> OrderHandler<P, O, S>
where
    P: ProductRepository,
    O: OrderRepository,
    S: CartStore,
{
    pub fn new(product_repo: P, order_repo: O, cart_store: S, shipping_cost: Decimal) -> Self {
        OrderHandler { product_repo, order_repo, cart_store, shipping_cost }
    }

    /// Prices are snapshotted from the catalog at this moment. The cart is
    /// cleared only once the order and all its items are committed; on any
    /// earlier failure it is left as it was. Stock is read, never
    /// decremented.
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn place_order(&self, user_id: &Uuid, form: PlaceOrderForm) -> Result<PlacedOrder, AppError> {
        form.validate()?;

        let cart = self.cart_store.load(user_id).await?;
        if cart.is_empty() {
            return Err(CartError::EmptyCart.into());
        }

        let lines = materialize(&self.product_repo, &cart).await?;
        let totals = OrderTotals::compute(&lines, self.shipping_cost);
        let items: Vec<OrderItemInsert> = lines.iter().map(OrderItemInsert::from).collect();

        let insert = form.prepare_for_insert(*user_id, totals);
        let order = self.order_repo.create_order(&insert, &items).await?;

        if let Err(e) = self.cart_store.clear(user_id).await {
            // the order exists; a stale cart is the lesser problem
            tracing::error!(order_id = order.id, "Order placed but cart was not cleared: {}", e);
        }

        tracing::info!(
            order_id = order.id,
            items = items.len(),
            total = %order.total_amount,
            "Order placed"
        );
        Ok(PlacedOrder::new(order.id, order.total_amount))
    }

    pub async fn order_history(&self, user_id: &Uuid) -> Result<Vec<Order>, AppError> {
        self.order_repo.orders_for_user(user_id).await
    }

    /// Orders of other users are reported as missing.
    pub async fn confirmation(&self, user_id: &Uuid, order_id: i64) -> Result<OrderConfirmation, AppError> {
        let order = self
            .order_repo
            .get_order_for_user(order_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".into()))?;
        let items = self.order_repo.order_items(order.id).await?;

        Ok(OrderConfirmation { order, items })
    }

    pub async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, AppError> {
        let order = self.order_repo.update_status(order_id, status).await?;
        tracing::info!(order_id, status = ?status, "Order status changed");
        Ok(order)
    }
}
