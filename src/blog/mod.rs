pub mod domain;
pub mod pages;
pub mod repository;
pub mod serialize;

pub use repository::{BlogRepository, RepositoryError, SqliteBlogRepository};
