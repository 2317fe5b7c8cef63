pub mod artist;
pub mod cart;
pub mod cascade;
pub mod category;
pub mod chat;
pub mod customization;
pub mod forms;
pub mod order;
pub mod pagination;
pub mod product;
pub mod submission;
pub mod token;
pub mod user;
