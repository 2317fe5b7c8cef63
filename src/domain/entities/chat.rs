use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::CURRENCY_SYMBOL;

pub const HELP_MESSAGE: &str = "I can help you with information about paintings, artists, categories, and prices. What would you like to know?";
pub const ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

const PAINTING_WORDS: &[&str] = &["paintings", "artworks", "art pieces"];
const ARTIST_WORDS: &[&str] = &["artist"];
const CATEGORY_WORDS: &[&str] = &["category", "type"];
const PRICE_WORDS: &[&str] = &["price", "cost"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Paintings,
    Artists,
    Categories,
    Prices,
    Help,
}

impl ChatIntent {
    /// Lowercased substring match; the first keyword set that hits wins,
    /// in the order paintings, artists, categories, prices.
    pub fn classify(query: &str) -> Self {
        let query = query.to_lowercase();
        let hits = |words: &[&str]| words.iter().any(|word| query.contains(word));

        if hits(PAINTING_WORDS) {
            ChatIntent::Paintings
        } else if hits(ARTIST_WORDS) {
            ChatIntent::Artists
        } else if hits(CATEGORY_WORDS) {
            ChatIntent::Categories
        } else if hits(PRICE_WORDS) {
            ChatIntent::Prices
        } else {
            ChatIntent::Help
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatItem {
    Painting {
        name: String,
        artist: String,
        price: Decimal,
        image: Option<String>,
        url: String,
        category: String,
        stock: i32,
    },
    Artist {
        name: String,
        profession: String,
        image: Option<String>,
        url: String,
        paintings_count: i64,
    },
    Category {
        name: String,
        count: i64,
        url: String,
        artists_count: i64,
    },
    PriceInfo {
        min_price: Decimal,
        max_price: Decimal,
        avg_price: Decimal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: ChatStatus,
    pub message: String,
    pub data: Vec<ChatItem>,
}

impl ChatResponse {
    pub fn success(message: impl Into<String>, data: Vec<ChatItem>) -> Self {
        ChatResponse {
            status: ChatStatus::Success,
            message: message.into(),
            data,
        }
    }

    pub fn help() -> Self {
        ChatResponse::success(HELP_MESSAGE, Vec::new())
    }

    pub fn error() -> Self {
        ChatResponse {
            status: ChatStatus::Error,
            message: ERROR_MESSAGE.to_string(),
            data: Vec::new(),
        }
    }
}

pub fn price_range_message(min: Decimal, max: Decimal) -> String {
    format!("Our paintings range from {CURRENCY_SYMBOL}{min} to {CURRENCY_SYMBOL}{max}.")
}
