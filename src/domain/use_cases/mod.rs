pub mod admin;
pub mod artists;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod extractors;
pub mod orders;
pub mod submissions;
