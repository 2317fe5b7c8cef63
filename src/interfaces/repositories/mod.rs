pub mod artist;
pub mod cart_store;
pub mod cascade;
pub mod category;
pub mod media;
pub mod order;
pub mod product;
pub mod sqlx_repo;
pub mod submission;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod mocks;
