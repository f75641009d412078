use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub title: String,
}

/// Insert payload for a post row.
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub author_id: i64,
    /// Path relative to the media directory
    pub image: Option<&'a str>,
    pub published_at: DateTime<Utc>,
    pub slug: &'a str,
}

#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub post_id: i64,
    pub author_id: i64,
    pub text: &'a str,
    pub published_at: DateTime<Utc>,
}
