pub mod db;
pub mod error;
pub mod helpers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
