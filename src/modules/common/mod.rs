pub mod dto;
pub mod extractors;
pub mod pagination;
pub mod query;
pub mod responses;
pub mod schema;
pub mod validators;
