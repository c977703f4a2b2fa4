pub mod dto;
pub mod service;
pub mod templates;
