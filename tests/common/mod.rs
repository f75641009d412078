#![allow(dead_code)]
// Shared fixtures: a temp-dir SQLite database plus write helpers.
use std::path::PathBuf;

use blogsite::config::Config;
use blogsite::db;
use blogsite::db::models::{NewComment, NewPost};
use blogsite::state::{AppState, DbPool};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

pub struct TestBlog {
    dir: TempDir,
    pub pool: DbPool,
}

impl TestBlog {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let pool = db::create_pool(&dir.path().join("test.db")).expect("Failed to create test database");
        db::run_migrations(&pool).expect("Failed to run migrations");
        Self { dir, pool }
    }

    pub fn media_dir(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.database.path = Some(self.dir.path().join("test.db"));
        config.media.path = Some(self.media_dir());
        config
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.pool.clone(), self.config())
    }

    pub fn user(&self, username: &str) -> i64 {
        let conn = self.pool.get().unwrap();
        db::seed::insert_user(&conn, username).unwrap()
    }

    pub fn tag(&self, title: &str) -> i64 {
        let conn = self.pool.get().unwrap();
        db::seed::insert_tag(&conn, title).unwrap()
    }

    /// Post titled after its slug, published `day` days after 2024-01-01
    pub fn post(&self, author_id: i64, slug: &str, day: i64) -> i64 {
        let conn = self.pool.get().unwrap();
        db::seed::insert_post(
            &conn,
            &NewPost {
                title: slug,
                text: "Body text of the post.",
                author_id,
                image: None,
                published_at: day_at(day),
                slug,
            },
        )
        .unwrap()
    }

    pub fn tag_post(&self, post_id: i64, tag_id: i64) {
        let conn = self.pool.get().unwrap();
        db::seed::tag_post(&conn, post_id, tag_id).unwrap();
    }

    pub fn like(&self, post_id: i64, user_id: i64) {
        let conn = self.pool.get().unwrap();
        db::seed::like_post(&conn, post_id, user_id).unwrap();
    }

    pub fn comment(&self, post_id: i64, author_id: i64, text: &str, day: i64) -> i64 {
        let conn = self.pool.get().unwrap();
        db::seed::insert_comment(
            &conn,
            &NewComment {
                post_id,
                author_id,
                text,
                published_at: day_at(day),
            },
        )
        .unwrap()
    }
}

pub fn day_at(day: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap() + Duration::days(day)
}
