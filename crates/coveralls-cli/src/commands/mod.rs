pub mod lookup;
pub mod repository;
