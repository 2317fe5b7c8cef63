use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::errors::CartError;

/// Session cart: product id (as a string key) to a positive quantity.
///
/// Every operation takes the current cart by reference and returns the
/// next one; persisting the result is the caller's job, so a failed
/// operation leaves the stored cart untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(BTreeMap<String, u32>);

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn quantity(&self, product_id: i64) -> Option<u32> {
        self.0.get(&product_id.to_string()).copied()
    }

    pub fn add(&self, product: &Product) -> Result<Cart, CartError> {
        if product.stock <= 0 {
            return Err(CartError::OutOfStock);
        }

        let mut next = self.clone();
        let key = product.id.to_string();
        match next.0.get_mut(&key) {
            Some(quantity) if i64::from(*quantity) < i64::from(product.stock) => *quantity += 1,
            Some(_) => return Err(CartError::StockLimitReached(product.stock)),
            None => {
                next.0.insert(key, 1);
            }
        }
        Ok(next)
    }

    pub fn update(&self, product: &Product, quantity: i64) -> Result<Cart, CartError> {
        if quantity < 1 || quantity > i64::from(product.stock) {
            return Err(CartError::InvalidQuantity(product.stock));
        }

        let mut next = self.clone();
        // bounded by stock, which is an i32
        next.0.insert(product.id.to_string(), quantity as u32);
        Ok(next)
    }

    pub fn remove(&self, product_id: i64) -> Result<Cart, CartError> {
        let mut next = self.clone();
        match next.0.remove(&product_id.to_string()) {
            Some(_) => Ok(next),
            None => Err(CartError::NotInCart),
        }
    }

    /// Entries ordered by product id. A key that is not a product id can
    /// only come from a stale or tampered session and resolves to nothing.
    pub fn entries(&self) -> Result<Vec<(i64, u32)>, CartError> {
        let mut entries = self
            .0
            .iter()
            .map(|(key, quantity)| {
                key.parse::<i64>()
                    .map(|id| (id, *quantity))
                    .map_err(|_| CartError::ProductNotFound(key.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|(id, _)| *id);
        Ok(entries)
    }

    pub fn product_ids(&self) -> Result<Vec<i64>, CartError> {
        Ok(self.entries()?.into_iter().map(|(id, _)| id).collect())
    }

    /// Resolves every entry against freshly loaded products. Any id that
    /// did not come back fails the whole cart.
    pub fn materialize(&self, products: Vec<Product>) -> Result<Vec<CartLine>, CartError> {
        let mut by_id: HashMap<i64, Product> = products.into_iter().map(|p| (p.id, p)).collect();

        self.entries()?
            .into_iter()
            .map(|(id, quantity)| {
                let product = by_id
                    .remove(&id)
                    .ok_or_else(|| CartError::ProductNotFound(id.to_string()))?;
                Ok(CartLine::new(product, quantity))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32) -> Self {
        let line_total = product.price * Decimal::from(quantity);
        CartLine { product, quantity, line_total }
    }
}

pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(|line| line.line_total).sum()
}

#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub item_count: u32,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Shipping is only charged on a non-empty cart.
    pub fn new(items: Vec<CartLine>, shipping_cost: Decimal) -> Self {
        let subtotal = subtotal(&items);
        let shipping = if items.is_empty() { Decimal::ZERO } else { shipping_cost };
        CartSummary {
            item_count: items.iter().map(|line| line.quantity).sum(),
            total: subtotal + shipping,
            subtotal,
            shipping,
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartActionResponse {
    pub success: bool,
    pub message: String,
}

impl CartActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        CartActionResponse { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        CartActionResponse { success: false, message: message.into() }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl Default for UpdateQuantity {
    fn default() -> Self {
        UpdateQuantity { quantity: default_quantity() }
    }
}
