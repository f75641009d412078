// Library exports for the blog
// This allows integration tests and external code to use the blog modules

pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod routes;
pub mod state;
