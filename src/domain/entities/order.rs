use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::cart::{subtotal, CartLine};
use crate::constants::DEFAULT_PAYMENT_METHOD;

/// Operators may set any status; there is no enforced transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub payment_method: String,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemDetail {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_image: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct OrderConfirmation {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Contact and shipping fields of the checkout form. None of them is
/// required; only the column widths are enforced.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PlaceOrderForm {
    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub last_name: Option<String>,

    #[validate(length(max = 254, message = "Must be at most 254 characters"))]
    pub email: Option<String>,

    #[validate(length(max = 15, message = "Must be at most 15 characters"))]
    pub phone: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 100, message = "Must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 10, message = "Must be at most 10 characters"))]
    pub pincode: Option<String>,

    #[validate(length(max = 50, message = "Must be at most 50 characters"))]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
}

impl OrderTotals {
    pub fn compute(lines: &[CartLine], shipping_cost: Decimal) -> Self {
        let subtotal = subtotal(lines);
        OrderTotals {
            subtotal,
            shipping_cost,
            total_amount: subtotal + shipping_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderInsert {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    pub payment_method: String,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
}

/// One order line with the unit price frozen at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemInsert {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<&CartLine> for OrderItemInsert {
    fn from(line: &CartLine) -> Self {
        OrderItemInsert {
            product_id: line.product.id,
            // cart quantities never exceed an i32 stock value
            quantity: i32::try_from(line.quantity).unwrap_or(i32::MAX),
            price: line.product.price,
        }
    }
}

impl PlaceOrderForm {
    pub fn prepare_for_insert(self, user_id: Uuid, totals: OrderTotals) -> OrderInsert {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        OrderInsert {
            user_id,
            first_name: clean(self.first_name),
            last_name: clean(self.last_name),
            email: clean(self.email),
            phone: clean(self.phone),
            address: clean(self.address),
            city: clean(self.city),
            pincode: clean(self.pincode),
            payment_method: clean(self.payment_method)
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            subtotal: totals.subtotal,
            shipping_cost: totals.shipping_cost,
            total_amount: totals.total_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub total_amount: Decimal,
    pub confirmation_url: String,
}

impl PlacedOrder {
    pub fn new(order_id: i64, total_amount: Decimal) -> Self {
        PlacedOrder {
            order_id,
            total_amount,
            confirmation_url: format!("/api/v1/orders/{order_id}"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::cart::tests::product;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_add_shipping_to_subtotal() {
        let lines = vec![
            CartLine::new(product(1, dec!(500), 3), 1),
            CartLine::new(product(2, dec!(120.25), 3), 2),
        ];

        let totals = OrderTotals::compute(&lines, dec!(100));
        assert_eq!(totals.subtotal, dec!(740.50));
        assert_eq!(totals.total_amount, dec!(840.50));
    }

    #[test]
    fn blank_payment_method_falls_back_to_cod() {
        let form = PlaceOrderForm {
            first_name: Some("  Asha ".into()),
            phone: Some("".into()),
            payment_method: Some("  ".into()),
            ..Default::default()
        };
        let totals = OrderTotals::compute(&[], dec!(100));

        let insert = form.prepare_for_insert(Uuid::nil(), totals);
        assert_eq!(insert.first_name.as_deref(), Some("Asha"));
        assert_eq!(insert.phone, None);
        assert_eq!(insert.payment_method, "COD");
    }

    #[test]
    fn item_snapshot_copies_current_price() {
        let line = CartLine::new(product(4, dec!(75.10), 9), 3);
        let item = OrderItemInsert::from(&line);
        assert_eq!(item, OrderItemInsert { product_id: 4, quantity: 3, price: dec!(75.10) });
    }

    #[test]
    fn status_uses_lowercase_names() {
        let parsed: UpdateOrderStatusRequest = serde_json::from_str(r#"{"status":"shipped"}"#).unwrap();
        assert_eq!(parsed.status, OrderStatus::Shipped);
        assert!(serde_json::from_str::<UpdateOrderStatusRequest>(r#"{"status":"lost"}"#).is_err());
    }
}
