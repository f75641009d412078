use std::sync::Arc;

use async_graphql::*;

use crate::blog::repository::BlogRepository;
use crate::blog::serialize::{
    serialize_post, serialize_post_detail, serialize_tag, SerializeOptions, SerializedPost,
    SerializedPostDetail, SerializedTag,
};
use crate::config::Config;

fn limit_or(limit: Option<u32>, default: usize) -> usize {
    limit.map(|l| l as usize).unwrap_or(default)
}

/// GraphQL Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Most liked posts, most popular first
    async fn popular_posts(
        &self,
        ctx: &Context<'_>,
        limit: Option<u32>,
    ) -> Result<Vec<SerializedPost>> {
        let repo = ctx.data::<Arc<dyn BlogRepository>>()?;
        let config = ctx.data::<Config>()?;
        let options = SerializeOptions::from_config(config);

        let posts = repo
            .popular_posts(limit_or(limit, config.blog.sidebar_posts))
            .await?;
        Ok(posts.iter().map(|p| serialize_post(p, &options)).collect())
    }

    /// Most recently published posts
    async fn fresh_posts(
        &self,
        ctx: &Context<'_>,
        limit: Option<u32>,
    ) -> Result<Vec<SerializedPost>> {
        let repo = ctx.data::<Arc<dyn BlogRepository>>()?;
        let config = ctx.data::<Config>()?;
        let options = SerializeOptions::from_config(config);

        let posts = repo
            .fresh_posts(limit_or(limit, config.blog.page_posts))
            .await?;
        Ok(posts.iter().map(|p| serialize_post(p, &options)).collect())
    }

    /// All tags by number of posts
    async fn popular_tags(&self, ctx: &Context<'_>) -> Result<Vec<SerializedTag>> {
        let repo = ctx.data::<Arc<dyn BlogRepository>>()?;
        let tags = repo.popular_tags().await?;
        Ok(tags.iter().map(serialize_tag).collect())
    }

    /// A single post with its comments, `null` for an unknown slug
    async fn post(&self, ctx: &Context<'_>, slug: String) -> Result<Option<SerializedPostDetail>> {
        let repo = ctx.data::<Arc<dyn BlogRepository>>()?;
        let config = ctx.data::<Config>()?;

        let Some(post) = repo.find_post(&slug).await? else {
            return Ok(None);
        };
        let comments = repo.post_comments(post.id).await?;
        let options = SerializeOptions::from_config(config);

        Ok(Some(serialize_post_detail(&post, &comments, &options)))
    }

    /// Posts carrying a tag, `null` for an unknown tag
    async fn tag_posts(
        &self,
        ctx: &Context<'_>,
        title: String,
    ) -> Result<Option<Vec<SerializedPost>>> {
        let repo = ctx.data::<Arc<dyn BlogRepository>>()?;
        let config = ctx.data::<Config>()?;

        let Some(tag) = repo.find_tag(&title).await? else {
            return Ok(None);
        };
        let options = SerializeOptions::from_config(config);
        let posts = repo.posts_with_tag(tag.id).await?;

        Ok(Some(
            posts.iter().map(|p| serialize_post(p, &options)).collect(),
        ))
    }
}
