// Flat records handed to templates and the GraphQL API
use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::blog::domain::{CommentWithAuthor, PostSummary, TagWithCount};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Teaser length in characters
    pub teaser_length: usize,
    /// URL prefix uploaded images are served under
    pub media_url: String,
}

impl SerializeOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            teaser_length: config.blog.teaser_length,
            media_url: config.media.url_prefix.clone(),
        }
    }

    fn image_url(&self, image: Option<&str>) -> Option<String> {
        image.map(|path| {
            format!(
                "{}/{}",
                self.media_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct SerializedTag {
    pub title: String,
    pub posts_with_tag: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct SerializedPost {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: i64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<SerializedTag>,
    /// `None` for a post without tags
    pub first_tag_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct SerializedComment {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct SerializedPostDetail {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<SerializedComment>,
    pub likes_amount: i64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<SerializedTag>,
}

pub fn serialize_tag(tag: &TagWithCount) -> SerializedTag {
    SerializedTag {
        title: tag.title.clone(),
        posts_with_tag: tag.posts_count,
    }
}

pub fn serialize_post(post: &PostSummary, options: &SerializeOptions) -> SerializedPost {
    SerializedPost {
        title: post.title.clone(),
        teaser_text: teaser(&post.text, options.teaser_length),
        author: post.author.clone(),
        comments_amount: post.comments_count,
        image_url: options.image_url(post.image.as_deref()),
        published_at: post.published_at,
        slug: post.slug.clone(),
        tags: post.tags.iter().map(serialize_tag).collect(),
        first_tag_title: post.tags.first().map(|tag| tag.title.clone()),
    }
}

pub fn serialize_comment(comment: &CommentWithAuthor) -> SerializedComment {
    SerializedComment {
        text: comment.text.clone(),
        published_at: comment.published_at,
        author: comment.author.clone(),
    }
}

pub fn serialize_post_detail(
    post: &PostSummary,
    comments: &[CommentWithAuthor],
    options: &SerializeOptions,
) -> SerializedPostDetail {
    SerializedPostDetail {
        title: post.title.clone(),
        text: post.text.clone(),
        author: post.author.clone(),
        comments: comments.iter().map(serialize_comment).collect(),
        likes_amount: post.likes_count,
        image_url: options.image_url(post.image.as_deref()),
        published_at: post.published_at,
        slug: post.slug.clone(),
        tags: post.tags.iter().map(serialize_tag).collect(),
    }
}

/// First `length` characters of `text`.
fn teaser(text: &str, length: usize) -> String {
    text.chars().take(length).collect()
}
