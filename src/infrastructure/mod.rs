pub mod auth;
pub mod db;
pub mod session;
pub mod storage;
