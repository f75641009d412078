use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use super::queries::QueryRoot;
use crate::blog::repository::BlogRepository;
use crate::config::Config;

/// GraphQL Schema type
pub type BlogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the read-only GraphQL schema over the blog repository
pub fn build_schema(repo: Arc<dyn BlogRepository>, config: &Config) -> BlogSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(repo)
        .data(config.clone())
        .finish()
}
