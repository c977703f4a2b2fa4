pub mod config;
pub mod database;
pub mod modules;
pub mod rabbitmq;
pub mod server;
pub mod services;
pub mod tracer;
pub mod utils;
