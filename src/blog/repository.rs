// Repository pattern - every blog read goes through here
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use thiserror::Error;

use crate::blog::domain::{CommentWithAuthor, PostSummary, TagWithCount};
use crate::db::models::Tag;
use crate::db::parse_timestamp;
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Read-only queries behind the blog pages.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Top `limit` posts by popularity, most popular first
    async fn popular_posts(&self, limit: usize) -> Result<Vec<PostSummary>, RepositoryError>;

    /// Latest `limit` posts, newest first
    async fn fresh_posts(&self, limit: usize) -> Result<Vec<PostSummary>, RepositoryError>;

    /// All tags by post count, descending
    async fn popular_tags(&self) -> Result<Vec<TagWithCount>, RepositoryError>;

    async fn find_post(&self, slug: &str) -> Result<Option<PostSummary>, RepositoryError>;

    /// Comments of a post, oldest first
    async fn post_comments(&self, post_id: i64)
        -> Result<Vec<CommentWithAuthor>, RepositoryError>;

    async fn find_tag(&self, title: &str) -> Result<Option<Tag>, RepositoryError>;

    /// Posts carrying the tag, newest first
    async fn posts_with_tag(&self, tag_id: i64) -> Result<Vec<PostSummary>, RepositoryError>;
}

/// SQLite implementation
pub struct SqliteBlogRepository {
    pool: DbPool,
}

impl SqliteBlogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn popular_posts(&self, limit: usize) -> Result<Vec<PostSummary>, RepositoryError> {
        let conn = self.pool.get()?;

        // Same order as `PostPopularity::rank_cmp`
        let mut stmt = conn.prepare(
            "SELECT p.id
             FROM posts p
             LEFT JOIN post_likes l ON l.post_id = p.id
             GROUP BY p.id
             ORDER BY COUNT(l.user_id) DESC, p.id ASC
             LIMIT ?1",
        )?;
        let ids = stmt
            .query_map(params![sql_limit(limit)], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(load_summaries(&conn, &ids)?)
    }

    async fn fresh_posts(&self, limit: usize) -> Result<Vec<PostSummary>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id FROM posts ORDER BY published_at DESC, id DESC LIMIT ?1",
        )?;
        let ids = stmt
            .query_map(params![sql_limit(limit)], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(load_summaries(&conn, &ids)?)
    }

    async fn popular_tags(&self) -> Result<Vec<TagWithCount>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT t.id, t.title, COUNT(pt.post_id) AS posts_count
             FROM tags t
             LEFT JOIN post_tags pt ON pt.tag_id = t.id
             GROUP BY t.id
             ORDER BY posts_count DESC, t.title ASC",
        )?;
        let tags = stmt
            .query_map([], |row| {
                Ok(TagWithCount {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    posts_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tags)
    }

    async fn find_post(&self, slug: &str) -> Result<Option<PostSummary>, RepositoryError> {
        let conn = self.pool.get()?;

        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM posts WHERE slug = ?1",
                params![slug],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => Ok(load_summaries(&conn, &[id])?.pop()),
            None => Ok(None),
        }
    }

    async fn post_comments(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT c.id, c.text, c.published_at, u.username
             FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.post_id = ?1
             ORDER BY c.published_at ASC, c.id ASC",
        )?;
        let comments = stmt
            .query_map(params![post_id], |row| {
                Ok(CommentWithAuthor {
                    id: row.get(0)?,
                    text: row.get(1)?,
                    published_at: timestamp_column(row, 2)?,
                    author: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    async fn find_tag(&self, title: &str) -> Result<Option<Tag>, RepositoryError> {
        let conn = self.pool.get()?;

        let tag = conn
            .query_row(
                "SELECT id, title FROM tags WHERE title = ?1",
                params![title],
                |row| {
                    Ok(Tag {
                        id: row.get(0)?,
                        title: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(tag)
    }

    async fn posts_with_tag(&self, tag_id: i64) -> Result<Vec<PostSummary>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT p.id
             FROM posts p
             JOIN post_tags pt ON pt.post_id = p.id
             WHERE pt.tag_id = ?1
             ORDER BY p.published_at DESC, p.id DESC",
        )?;
        let ids = stmt
            .query_map(params![tag_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(load_summaries(&conn, &ids)?)
    }
}

/// Batch-load posts with author, counts and annotated tags.
/// Two queries regardless of how many ids; output follows `ids` order.
/// The ids travel as a single JSON array parameter, so SQLite's bound
/// variable limit never applies.
fn load_summaries(conn: &Connection, ids: &[i64]) -> rusqlite::Result<Vec<PostSummary>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let id_list = serde_json::to_string(ids)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let mut stmt = conn.prepare(
        "SELECT p.id, p.title, p.text, u.username, p.image, p.published_at, p.slug,
                (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id),
                (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id)
         FROM posts p
         JOIN users u ON u.id = p.author_id
         WHERE p.id IN (SELECT value FROM json_each(?1))",
    )?;
    let mut by_id = stmt
        .query_map(params![id_list], |row| {
            Ok(PostSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                text: row.get(2)?,
                author: row.get(3)?,
                image: row.get(4)?,
                published_at: timestamp_column(row, 5)?,
                slug: row.get(6)?,
                comments_count: row.get(7)?,
                likes_count: row.get(8)?,
                tags: Vec::new(),
            })
        })?
        .map(|r| r.map(|post| (post.id, post)))
        .collect::<Result<HashMap<_, _>, _>>()?;

    let mut stmt = conn.prepare(
        "WITH wanted(post_id) AS (SELECT value FROM json_each(?1)),
              counts(tag_id, posts_count) AS (
                  SELECT tag_id, COUNT(*)
                  FROM post_tags
                  WHERE tag_id IN (SELECT tag_id FROM post_tags
                                   WHERE post_id IN (SELECT post_id FROM wanted))
                  GROUP BY tag_id
              )
         SELECT pt.post_id, t.id, t.title, c.posts_count
         FROM post_tags pt
         JOIN tags t ON t.id = pt.tag_id
         JOIN counts c ON c.tag_id = t.id
         WHERE pt.post_id IN (SELECT post_id FROM wanted)
         ORDER BY t.title ASC, t.id ASC",
    )?;
    let tag_rows = stmt.query_map(params![id_list], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            TagWithCount {
                id: row.get(1)?,
                title: row.get(2)?,
                posts_count: row.get(3)?,
            },
        ))
    })?;
    for tag_row in tag_rows {
        let (post_id, tag) = tag_row?;
        if let Some(post) = by_id.get_mut(&post_id) {
            post.tags.push(tag);
        }
    }

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
