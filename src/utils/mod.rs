pub mod object_id;
pub mod random;
