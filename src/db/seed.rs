// Write helpers for demo content and test fixtures. The site itself only reads.
use chrono::{Duration, TimeZone, Utc};
use rusqlite::{params, Connection};

use super::format_timestamp;
use super::models::{NewComment, NewPost};
use crate::state::DbPool;

pub fn insert_user(conn: &Connection, username: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username) VALUES (?1)",
        params![username],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_tag(conn: &Connection, title: &str) -> rusqlite::Result<i64> {
    conn.execute("INSERT INTO tags (title) VALUES (?1)", params![title])?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_post(conn: &Connection, post: &NewPost<'_>) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO posts (title, text, author_id, image, published_at, slug)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            post.title,
            post.text,
            post.author_id,
            post.image,
            format_timestamp(post.published_at),
            post.slug,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn tag_post(conn: &Connection, post_id: i64, tag_id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?1, ?2)",
        params![post_id, tag_id],
    )?;
    Ok(())
}

pub fn like_post(conn: &Connection, post_id: i64, user_id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO post_likes (post_id, user_id) VALUES (?1, ?2)",
        params![post_id, user_id],
    )?;
    Ok(())
}

pub fn insert_comment(conn: &Connection, comment: &NewComment<'_>) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO comments (post_id, author_id, text, published_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            comment.post_id,
            comment.author_id,
            comment.text,
            format_timestamp(comment.published_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

const DEMO_USERS: &[&str] = &["admin", "maria", "oleg", "kate"];
const DEMO_TAGS: &[&str] = &["python", "rust", "django", "databases", "web"];

// (title, slug, tags by index into DEMO_TAGS, likes)
const DEMO_POSTS: &[(&str, &str, &[usize], usize)] = &[
    ("Hello, world", "hello-world", &[4], 1),
    ("Why we moved to SQLite", "why-sqlite", &[3, 4], 3),
    ("Ownership for Python developers", "ownership-for-pythonistas", &[0, 1], 4),
    ("Template inheritance tricks", "template-inheritance", &[2, 4], 2),
    ("Counting things in SQL", "counting-in-sql", &[3], 3),
    ("Writing a tiny web server", "tiny-web-server", &[1, 4], 2),
];

const DEMO_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim \
veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum \
dolore eu fugiat nulla pariatur.";

/// Populate an empty database with demo content.
/// Returns `false` without touching anything if posts already exist.
pub fn seed_demo(pool: &DbPool) -> anyhow::Result<bool> {
    let mut conn = pool.get()?;

    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::info!("Database already has {} posts, skipping demo seed", existing);
        return Ok(false);
    }

    let tx = conn.transaction()?;

    let user_ids = DEMO_USERS
        .iter()
        .map(|name| insert_user(&tx, name))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let tag_ids = DEMO_TAGS
        .iter()
        .map(|title| insert_tag(&tx, title))
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid demo start date"))?;

    for (i, &(title, slug, tags, likes)) in DEMO_POSTS.iter().enumerate() {
        let published_at = start + Duration::days(i as i64 * 3);
        let post_id = insert_post(
            &tx,
            &NewPost {
                title,
                text: DEMO_TEXT,
                author_id: user_ids[0],
                image: None,
                published_at,
                slug,
            },
        )?;

        for &tag in tags {
            tag_post(&tx, post_id, tag_ids[tag])?;
        }
        for &user_id in user_ids.iter().take(likes) {
            like_post(&tx, post_id, user_id)?;
        }
        for (n, &author_id) in user_ids.iter().skip(1).take(i % 3 + 1).enumerate() {
            insert_comment(
                &tx,
                &NewComment {
                    post_id,
                    author_id,
                    text: "Thanks for the write-up!",
                    published_at: published_at + Duration::hours(n as i64 + 1),
                },
            )?;
        }
    }

    tx.commit()?;
    tracing::info!("Seeded {} demo posts", DEMO_POSTS.len());
    Ok(true)
}
