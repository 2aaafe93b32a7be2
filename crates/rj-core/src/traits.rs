//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::models::{Comment, CommentEntry, FeedEntry, Joke, Rating, Stars, User};
use uuid::Uuid;

/// Data persistence contract for jokes, ratings and comments.
///
/// Every method is a single read or a single write. Callers compose them;
/// implementations never need to know about interactions or statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeRepo: Send + Sync {
    // User Operations
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    // Joke Operations
    async fn find_joke(&self, id: Uuid) -> anyhow::Result<Option<Joke>>;
    /// All jokes with their author, most recently updated first.
    async fn list_feed(&self) -> anyhow::Result<Vec<FeedEntry>>;
    async fn create_joke(&self, joke: Joke) -> anyhow::Result<()>;
    async fn update_joke(&self, id: Uuid, content: &str, updated_at: DateTime<Utc>) -> anyhow::Result<()>;
    async fn delete_joke(&self, id: Uuid) -> anyhow::Result<()>;

    // Rating Operations
    async fn find_rating(&self, user_id: Uuid, joke_id: Uuid) -> anyhow::Result<Option<Rating>>;
    async fn create_rating(&self, rating: Rating) -> anyhow::Result<()>;
    async fn update_rating(&self, id: Uuid, value: Stars) -> anyhow::Result<()>;
    async fn list_ratings(&self, joke_id: Uuid) -> anyhow::Result<Vec<Rating>>;

    // Comment Operations
    async fn find_comment(&self, user_id: Uuid, joke_id: Uuid) -> anyhow::Result<Option<Comment>>;
    async fn create_comment(&self, comment: Comment) -> anyhow::Result<()>;
    async fn update_comment(&self, id: Uuid, content: &str, updated_at: DateTime<Utc>) -> anyhow::Result<()>;
    /// Comments on a joke with their author, most recently updated first.
    async fn list_comments(&self, joke_id: Uuid) -> anyhow::Result<Vec<CommentEntry>>;
}
