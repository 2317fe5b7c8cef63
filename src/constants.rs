use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Page size shared by the search, category and artist listings.
pub const PER_PAGE: u32 = 12;

pub const HOME_CATEGORY_LIMIT: i64 = 3;
pub const HOME_FEATURED_PRODUCT_LIMIT: i64 = 4;
pub const HOME_FEATURED_ARTIST_LIMIT: i64 = 3;
pub const HOME_SUBMISSION_LIMIT: i64 = 6;

pub const CHAT_RESULT_LIMIT: i64 = 5;
pub const CURRENCY_SYMBOL: &str = "₹";

pub const DEFAULT_PAYMENT_METHOD: &str = "COD";
