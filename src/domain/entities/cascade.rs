use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct ProductRef {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderItemRef {
    pub id: i64,
    pub product_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CascadeRoot {
    Category(i64),
    Artist(i64),
}

/// Everything that must go when a category or artist is deleted: the root
/// row, the products under it and the order items referencing those
/// products. Rows are removed leaf first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionSet {
    pub root: CascadeRoot,
    pub product_ids: Vec<i64>,
    pub order_item_ids: Vec<i64>,
}

impl DeletionSet {
    /// Order items outside the product set are ignored.
    pub fn new(root: CascadeRoot, products: &[ProductRef], order_items: &[OrderItemRef]) -> Self {
        let mut product_ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let mut order_item_ids: Vec<i64> = order_items
            .iter()
            .filter(|item| product_ids.binary_search(&item.product_id).is_ok())
            .map(|item| item.id)
            .collect();
        order_item_ids.sort_unstable();
        order_item_ids.dedup();

        DeletionSet { root, product_ids, order_item_ids }
    }

    pub fn is_leaf_only(&self) -> bool {
        self.product_ids.is_empty()
    }
}
