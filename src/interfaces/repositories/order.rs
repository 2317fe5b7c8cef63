use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::order::{Order, OrderInsert, OrderItemDetail, OrderItemInsert, OrderStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxOrderRepo,
};

const ORDER_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone, address, city, pincode, \
    payment_method, subtotal, shipping_cost, total_amount, status, created_at, updated_at";

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Writes the order and all of its items atomically.
    async fn create_order(&self, order: &OrderInsert, items: &[OrderItemInsert]) -> Result<Order, AppError>;
    async fn get_order_for_user(&self, id: i64, user_id: &Uuid) -> Result<Option<Order>, AppError>;
    async fn order_items(&self, order_id: i64) -> Result<Vec<OrderItemDetail>, AppError>;
    async fn orders_for_user(&self, user_id: &Uuid) -> Result<Vec<Order>, AppError>;
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError>;
}

impl SqlxOrderRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxOrderRepo { pool }
    }
}

#[async_trait]
impl OrderRepository for SqlxOrderRepo {
    async fn create_order(&self, order: &OrderInsert, items: &[OrderItemInsert]) -> Result<Order, AppError> {
        if items.is_empty() {
            return Err(AppError::InvalidInput("An order needs at least one item".into()));
        }

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (
                user_id, first_name, last_name, email, phone, address, city, pincode,
                payment_method, subtotal, shipping_cost, total_amount, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending')
            RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order.user_id)
        .bind(&order.first_name)
        .bind(&order.last_name)
        .bind(&order.email)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.city)
        .bind(&order.pincode)
        .bind(&order.payment_method)
        .bind(order.subtotal)
        .bind(order.shipping_cost)
        .bind(order.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO order_items (order_id, product_id, quantity, price) ");
        builder.push_values(items, |mut row, item| {
            row.push_bind(created.id)
                .push_bind(item.product_id)
                .push_bind(item.quantity)
                .push_bind(item.price);
        });

        // dropping `tx` on error rolls the order row back
        builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn get_order_for_user(&self, id: i64, user_id: &Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn order_items(&self, order_id: i64) -> Result<Vec<OrderItemDetail>, AppError> {
        let items = sqlx::query_as::<_, OrderItemDetail>(
            r#"
            SELECT oi.id, oi.product_id, p.name AS product_name, p.image AS product_image,
                   oi.quantity, oi.price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            "#
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn orders_for_user(&self, user_id: &Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))
    }
}
