use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::blog::repository::{BlogRepository, SqliteBlogRepository};
use crate::config::Config;
use crate::graphql::{build_schema, BlogSchema};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repo: Arc<dyn BlogRepository>,
    pub graphql_schema: BlogSchema,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        let repo: Arc<dyn BlogRepository> = Arc::new(SqliteBlogRepository::new(pool));
        let graphql_schema = build_schema(repo.clone(), &config);
        Self {
            config,
            repo,
            graphql_schema,
        }
    }
}
