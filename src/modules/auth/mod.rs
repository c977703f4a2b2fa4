pub mod confirmation;
pub mod dto;
pub mod guards;
pub mod jwt;
pub mod password;
pub mod repository;
pub mod routes;
pub mod service;
