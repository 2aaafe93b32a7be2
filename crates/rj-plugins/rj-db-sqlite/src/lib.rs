//! # rj-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `rj-core` domain models.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rj_core::models::{Comment, CommentEntry, FeedEntry, Joke, Rating, Stars, User};
use rj_core::traits::JokeRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

const SCHEMA: &str = include_str!("schema.sql");

pub struct SqliteJokeRepo {
    pool: SqlitePool,
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> anyhow::Result<Uuid> {
    Ok(Uuid::from_slice(blob)?)
}

fn column_uuid(row: &SqliteRow, column: &str) -> anyhow::Result<Uuid> {
    blob_to_uuid(row.try_get::<Vec<u8>, _>(column)?.as_slice())
}

impl SqliteJokeRepo {
    /// Opens (or creates) the database at `url` and bootstraps the schema.
    ///
    /// # Developer Note
    /// Every connection to `sqlite::memory:` gets its own empty database, so
    /// in-memory pools are pinned to one connection that is never recycled.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let repo = Self { pool };
        repo.bootstrap().await?;
        log::info!("SQLite joke store ready at {}", url);
        Ok(repo)
    }

    async fn bootstrap(&self) -> anyhow::Result<()> {
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Users are owned by the authentication layer; this is for seeding and tests.
    pub async fn create_user(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO users (id, username, image) VALUES (?, ?, ?)")
            .bind(uuid_to_blob(user.id))
            .bind(&user.username)
            .bind(&user.image)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn row_to_joke(row: &SqliteRow) -> anyhow::Result<Joke> {
    Ok(Joke {
        id: column_uuid(row, "id")?,
        author_id: column_uuid(row, "user_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn row_to_rating(row: &SqliteRow) -> anyhow::Result<Rating> {
    let value: i64 = row.try_get("value")?;
    Ok(Rating {
        id: column_uuid(row, "id")?,
        user_id: column_uuid(row, "user_id")?,
        joke_id: column_uuid(row, "joke_id")?,
        value: Stars::try_from(value)?,
    })
}

fn row_to_comment(row: &SqliteRow) -> anyhow::Result<Comment> {
    Ok(Comment {
        id: column_uuid(row, "id")?,
        user_id: column_uuid(row, "user_id")?,
        joke_id: column_uuid(row, "joke_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl JokeRepo for SqliteJokeRepo {
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, image FROM users WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> anyhow::Result<User> {
            Ok(User {
                id: column_uuid(&row, "id")?,
                username: row.try_get("username")?,
                image: row.try_get("image")?,
            })
        })
        .transpose()
    }

    async fn find_joke(&self, id: Uuid) -> anyhow::Result<Option<Joke>> {
        let row = sqlx::query("SELECT id, user_id, content, created_at, updated_at FROM jokes WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_joke).transpose()
    }

    /// Maps the jokes/users join back to feed entries, newest activity first.
    async fn list_feed(&self) -> anyhow::Result<Vec<FeedEntry>> {
        let rows = sqlx::query(
            "SELECT jokes.id, jokes.user_id, jokes.content, jokes.created_at, jokes.updated_at,
                    users.username, users.image
             FROM jokes
             JOIN users ON users.id = jokes.user_id
             ORDER BY jokes.updated_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> anyhow::Result<FeedEntry> {
                Ok(FeedEntry {
                    joke: row_to_joke(row)?,
                    username: row.try_get("username")?,
                    image: row.try_get("image")?,
                })
            })
            .collect()
    }

    async fn create_joke(&self, joke: Joke) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO jokes (id, user_id, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?)")
            .bind(uuid_to_blob(joke.id))
            .bind(uuid_to_blob(joke.author_id))
            .bind(joke.content)
            .bind(joke.created_at)
            .bind(joke.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_joke(&self, id: Uuid, content: &str, updated_at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query("UPDATE jokes SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(updated_at)
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Ratings and comments go with it through `ON DELETE CASCADE`.
    async fn delete_joke(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM jokes WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_rating(&self, user_id: Uuid, joke_id: Uuid) -> anyhow::Result<Option<Rating>> {
        let row = sqlx::query("SELECT id, user_id, joke_id, value FROM ratings WHERE user_id = ? AND joke_id = ?")
            .bind(uuid_to_blob(user_id))
            .bind(uuid_to_blob(joke_id))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_rating).transpose()
    }

    /// Inserts a rating row.
    ///
    /// # Developer Note
    /// Two requests from the same user can both miss on `find_rating` and race
    /// here. The unique (user_id, joke_id) constraint plus `ON CONFLICT` turns
    /// the loser into an update, so the pair never holds two rows.
    async fn create_rating(&self, rating: Rating) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO ratings (id, user_id, joke_id, value) VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id, joke_id) DO UPDATE SET value = excluded.value"
        )
        .bind(uuid_to_blob(rating.id))
        .bind(uuid_to_blob(rating.user_id))
        .bind(uuid_to_blob(rating.joke_id))
        .bind(i64::from(rating.value.get()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_rating(&self, id: Uuid, value: Stars) -> anyhow::Result<()> {
        sqlx::query("UPDATE ratings SET value = ? WHERE id = ?")
            .bind(i64::from(value.get()))
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_ratings(&self, joke_id: Uuid) -> anyhow::Result<Vec<Rating>> {
        sqlx::query("SELECT id, user_id, joke_id, value FROM ratings WHERE joke_id = ?")
            .bind(uuid_to_blob(joke_id))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_rating)
            .collect()
    }

    async fn find_comment(&self, user_id: Uuid, joke_id: Uuid) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, user_id, joke_id, content, created_at, updated_at
             FROM comments WHERE user_id = ? AND joke_id = ?"
        )
        .bind(uuid_to_blob(user_id))
        .bind(uuid_to_blob(joke_id))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_comment).transpose()
    }

    /// Same conflict handling as [`SqliteJokeRepo::create_rating`].
    async fn create_comment(&self, comment: Comment) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, user_id, joke_id, content, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, joke_id) DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at"
        )
        .bind(uuid_to_blob(comment.id))
        .bind(uuid_to_blob(comment.user_id))
        .bind(uuid_to_blob(comment.joke_id))
        .bind(comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_comment(&self, id: Uuid, content: &str, updated_at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(updated_at)
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_comments(&self, joke_id: Uuid) -> anyhow::Result<Vec<CommentEntry>> {
        let rows = sqlx::query(
            "SELECT comments.id, comments.user_id, comments.joke_id, comments.content,
                    comments.created_at, comments.updated_at, users.username, users.image
             FROM comments
             JOIN users ON users.id = comments.user_id
             WHERE comments.joke_id = ?
             ORDER BY comments.updated_at DESC"
        )
        .bind(uuid_to_blob(joke_id))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> anyhow::Result<CommentEntry> {
                Ok(CommentEntry {
                    comment: row_to_comment(row)?,
                    username: row.try_get("username")?,
                    image: row.try_get("image")?,
                })
            })
            .collect()
    }
}
