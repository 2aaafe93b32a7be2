//! Joke lifecycle: feed, posting, editing, deleting and the detail view.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CommentEntry, FeedEntry, Joke};
use crate::stats::RatingStats;
use crate::traits::JokeRepo;
use crate::validation::JokeDraft;

/// Everything the joke page shows.
#[derive(Debug, Clone, Serialize)]
pub struct JokeDetail {
    pub joke: Joke,
    pub comments: Vec<CommentEntry>,
    pub stats: RatingStats,
}

pub async fn feed(repo: &dyn JokeRepo) -> Result<Vec<FeedEntry>> {
    Ok(repo.list_feed().await?)
}

pub async fn find_joke(repo: &dyn JokeRepo, id: Uuid) -> Result<Joke> {
    repo.find_joke(id)
        .await?
        .ok_or_else(|| AppError::joke_not_found(id))
}

pub async fn post_joke(repo: &dyn JokeRepo, author_id: Uuid, draft: JokeDraft) -> Result<Joke> {
    let now = Utc::now();
    let joke = Joke {
        id: Uuid::now_v7(),
        author_id,
        content: draft.content,
        created_at: now,
        updated_at: now,
    };
    repo.create_joke(joke.clone()).await?;
    Ok(joke)
}

/// Replaces the text of a joke. Only its author may do this.
pub async fn update_joke(repo: &dyn JokeRepo, user_id: Uuid, id: Uuid, draft: JokeDraft) -> Result<Joke> {
    let mut joke = find_joke(repo, id).await?;
    ensure_author(&joke, user_id, "edit")?;

    joke.content = draft.content;
    joke.updated_at = Utc::now();
    repo.update_joke(joke.id, &joke.content, joke.updated_at).await?;
    Ok(joke)
}

/// Removes a joke along with its ratings and comments. Only its author may do this.
pub async fn delete_joke(repo: &dyn JokeRepo, user_id: Uuid, id: Uuid) -> Result<()> {
    let joke = find_joke(repo, id).await?;
    ensure_author(&joke, user_id, "delete")?;

    repo.delete_joke(joke.id).await?;
    Ok(())
}

pub async fn joke_detail(repo: &dyn JokeRepo, id: Uuid) -> Result<JokeDetail> {
    let joke = find_joke(repo, id).await?;
    let ratings = repo.list_ratings(id).await?;
    let comments = repo.list_comments(id).await?;

    Ok(JokeDetail {
        joke,
        comments,
        stats: RatingStats::from_ratings(&ratings),
    })
}

fn ensure_author(joke: &Joke, user_id: Uuid, action: &str) -> Result<()> {
    if joke.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("You do not have permission to {action} this Joke")))
    }
}
