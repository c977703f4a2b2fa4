pub mod auth;
pub mod blog;
pub mod comment;
pub mod common;
pub mod post;
pub mod testing;
pub mod user;
