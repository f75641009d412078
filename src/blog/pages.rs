// Page contexts: compose repository queries and serialization.
// Rendering lives in `routes`.
use serde::Serialize;

use crate::blog::repository::BlogRepository;
use crate::blog::serialize::{
    serialize_post, serialize_post_detail, serialize_tag, SerializeOptions, SerializedPost,
    SerializedPostDetail, SerializedTag,
};
use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub most_popular_posts: Vec<SerializedPost>,
    pub page_posts: Vec<SerializedPost>,
    pub popular_tags: Vec<SerializedTag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: SerializedPostDetail,
    pub popular_tags: Vec<SerializedTag>,
    pub most_popular_posts: Vec<SerializedPost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagPage {
    pub tag: String,
    pub posts: Vec<SerializedPost>,
    pub popular_tags: Vec<SerializedTag>,
    pub most_popular_posts: Vec<SerializedPost>,
}

/// Popular posts and tags shown next to every listing.
struct Sidebar {
    most_popular_posts: Vec<SerializedPost>,
    popular_tags: Vec<SerializedTag>,
}

async fn load_sidebar(
    repo: &dyn BlogRepository,
    config: &Config,
    options: &SerializeOptions,
) -> AppResult<Sidebar> {
    let most_popular_posts = repo
        .popular_posts(config.blog.sidebar_posts)
        .await?
        .iter()
        .map(|post| serialize_post(post, options))
        .collect();
    let popular_tags = repo.popular_tags().await?.iter().map(serialize_tag).collect();

    Ok(Sidebar {
        most_popular_posts,
        popular_tags,
    })
}

pub async fn home_page(repo: &dyn BlogRepository, config: &Config) -> AppResult<HomePage> {
    let options = SerializeOptions::from_config(config);
    let sidebar = load_sidebar(repo, config, &options).await?;

    let page_posts = repo
        .fresh_posts(config.blog.page_posts)
        .await?
        .iter()
        .map(|post| serialize_post(post, &options))
        .collect();

    Ok(HomePage {
        most_popular_posts: sidebar.most_popular_posts,
        page_posts,
        popular_tags: sidebar.popular_tags,
    })
}

pub async fn post_page(
    repo: &dyn BlogRepository,
    config: &Config,
    slug: &str,
) -> AppResult<PostPage> {
    let post = repo.find_post(slug).await?.ok_or_else(|| {
        tracing::debug!("No post with slug {:?}", slug);
        AppError::NotFound
    })?;

    let options = SerializeOptions::from_config(config);
    let comments = repo.post_comments(post.id).await?;
    let sidebar = load_sidebar(repo, config, &options).await?;

    Ok(PostPage {
        post: serialize_post_detail(&post, &comments, &options),
        popular_tags: sidebar.popular_tags,
        most_popular_posts: sidebar.most_popular_posts,
    })
}

pub async fn tag_page(
    repo: &dyn BlogRepository,
    config: &Config,
    tag_title: &str,
) -> AppResult<TagPage> {
    let tag = repo.find_tag(tag_title).await?.ok_or_else(|| {
        tracing::debug!("No tag titled {:?}", tag_title);
        AppError::NotFound
    })?;

    let options = SerializeOptions::from_config(config);
    let posts = repo
        .posts_with_tag(tag.id)
        .await?
        .iter()
        .map(|post| serialize_post(post, &options))
        .collect();
    let sidebar = load_sidebar(repo, config, &options).await?;

    Ok(TagPage {
        tag: tag.title,
        posts,
        popular_tags: sidebar.popular_tags,
        most_popular_posts: sidebar.most_popular_posts,
    })
}
